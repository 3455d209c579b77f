pub mod cli;
pub mod config;
pub mod error;
pub mod init;
pub mod interpreter;
pub mod repl;

// Re-export main types
pub use error::{Error, Result, TypeError};
pub use interpreter::{initialize, typecheck, FlightState, Program, VM};

// Re-export init API for convenience
pub use init::{InitBuilder, InitOptions};
