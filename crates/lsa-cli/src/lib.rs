#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]

pub mod bootstrap;
pub mod error;
pub mod logging;
pub mod parser;
pub mod shutdown;

// Re-export primary types for convenient access
pub use bootstrap::{run, serve_on};
pub use error::CliError;
pub use parser::Cli;
