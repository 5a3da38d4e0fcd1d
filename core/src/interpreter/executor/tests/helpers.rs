//! Test helpers for executor tests

use crate::interpreter::executor::{run_until_done, VM};
use crate::interpreter::{interpret, ErrorKind};
use crate::types::{RunOptions, RunResult};

/// Join program lines with newlines
pub fn program(lines: &[&str]) -> String {
    lines.join("\n")
}

/// Run a program synchronously with default options
pub fn run(lines: &[&str]) -> RunResult {
    interpret(&program(lines), RunOptions::default())
}

/// Run a program with notification lines hidden
pub fn run_quiet(lines: &[&str]) -> RunResult {
    interpret(
        &program(lines),
        RunOptions {
            hide_command_output: true,
        },
    )
}

/// Build a VM and run it until it stops, without resolving suspensions
pub fn run_vm(lines: &[&str]) -> VM {
    let mut vm = VM::new(&program(lines), RunOptions::default());
    run_until_done(&mut vm);
    vm
}

/// Assert the run failed with `kind`, returning its message
pub fn expect_error(result: &RunResult, kind: ErrorKind) -> String {
    assert_eq!(
        result.error_kind,
        Some(kind),
        "unexpected outcome: {:?} / output {:?}",
        result.error,
        result.output
    );
    result.error.clone().unwrap_or_default()
}
