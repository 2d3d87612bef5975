pub mod config;
pub mod judge;
pub mod logging;
pub mod render;
