pub mod config;
pub mod list;
pub mod render;
pub mod session;
pub mod storage;
pub mod utils;
