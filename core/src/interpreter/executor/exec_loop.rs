//! Core execution loop
//!
//! This module contains the step() function - the heart of the interpreter.
//! Each step handles one program line: blank and comment lines only move
//! the cursor, everything else is classified and dispatched.
//!
//! ## Function Organization
//! 1. run_until_done() - Top-level driver (calls step repeatedly)
//! 2. step() - Main execution loop (dispatches to command handlers)

use tracing::trace;

use super::statements::execute;
use super::vm::{Control, Step, VM};
use crate::interpreter::errors::InterpreterError;
use crate::interpreter::parser::{clean_line, parse_command};

/* ===================== Public API ===================== */

/// Run the VM until it halts, fails or suspends
///
/// After it returns, inspect `vm.control` for the final state.
pub fn run_until_done(vm: &mut VM) {
    loop {
        match step(vm) {
            Step::Continue => continue,
            Step::Done => break,
        }
    }
}

/// Execute one line of the program
pub fn step(vm: &mut VM) -> Step {
    if vm.control != Control::None {
        return Step::Done;
    }

    // Running past the last line is only reachable if the exit marker sits
    // somewhere it is never executed (inside a payload line, say).
    let Some(raw) = vm.lines.get(vm.cursor) else {
        vm.throw(InterpreterError::UnexpectedEnd);
        return Step::Done;
    };

    let line = clean_line(raw).to_string();
    if line.is_empty() {
        vm.cursor += 1;
        return Step::Continue;
    }

    trace!(line_no = vm.cursor + 1, %line, "executing line");

    if let Err(err) = parse_command(&line).and_then(|command| execute(vm, command)) {
        vm.throw(err);
        return Step::Done;
    }

    match vm.control {
        Control::None => Step::Continue,
        _ => Step::Done,
    }
}
