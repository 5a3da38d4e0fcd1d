//! # Executor - Resumable Line-Driven Interpreter
//!
//! ## Core Principles
//!
//! 1. **Line-driven execution**: All state in [`VM`], one program line per step
//! 2. **Typed dispatch**: Lines are classified into a `Command` before any handler runs
//! 3. **Centralized control flow**: [`Control`] records exit, failure and suspension
//! 4. **Pure executor**: No I/O, no async - just runs until suspend or complete
//!
//! Reading input is the only suspension point. The VM stops with
//! `Control::Suspend(name)`, the caller obtains a value however it likes
//! and hands it back with [`VM::resume`].

pub mod exec_loop;
pub mod statements;
pub mod vm;

#[cfg(test)]
mod tests;

// Re-export commonly used items
pub use exec_loop::{run_until_done, step};
pub use statements::EXIT_MESSAGE;
pub use vm::{Control, Step, VM};
