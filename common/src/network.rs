pub mod interface;
pub mod ip;
pub mod mac;
pub mod range;
pub mod target;
