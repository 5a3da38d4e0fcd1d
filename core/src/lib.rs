pub mod cli;
pub mod config;
pub mod interpreter;
pub mod types;

// Re-export main types
pub use types::*;

pub use config::Config;
pub use interpreter::{interpret, interpret_with_input, InputProvider, ScriptedInput};
