// clixaw - natural language to shell command translator
// Author: kelexine (https://github.com/kelexine)

pub mod cache;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod gate;
pub mod history;
pub mod utils;
