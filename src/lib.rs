// src/lib.rs
pub mod app;
pub mod args;
pub mod config;
pub mod error;
pub mod logging;
pub mod options;
pub mod parsers;
pub mod presentation;
pub mod prompt;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
