mod integration;
mod live;
