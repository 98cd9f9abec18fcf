pub mod branch;
pub mod command;
pub mod config;
pub mod version;
