#![cfg(test)]

mod discovery;
mod fakes;
