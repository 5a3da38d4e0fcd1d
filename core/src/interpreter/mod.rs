//! INTERFUCK interpreter
//!
//! Leaves first:
//! - [`codec`]: integer -> display character
//! - [`databer`]: Datalings, Datasubs and their creation log
//! - [`expressions`]: arithmetic for `PLEASE CALC :10.`
//! - [`parser`]: line classification into typed commands
//! - [`executor`]: the resumable VM
//! - [`input`]: providers for `PLEASE LISTEN :8.`

pub mod codec;
pub mod databer;
pub mod errors;
pub mod executor;
pub mod expressions;
pub mod input;
pub mod parser;

#[cfg(test)]
mod tests;

pub use databer::{Databer, Entry};
pub use errors::{DataError, ErrorInfo, ErrorKind, EvalError, InterpreterError};
pub use executor::{run_until_done, step, Control, Step, VM};
pub use input::{InputProvider, ScriptedInput};
pub use parser::{parse_command, Command, DisplayTarget};

use tracing::info;

use crate::types::{RunOptions, RunResult};

/* ===================== Public API ===================== */

/// Run a program to completion without an input provider
///
/// Reaching `PLEASE LISTEN :8.` fails the run.
pub fn interpret(source: &str, options: RunOptions) -> RunResult {
    let mut vm = VM::new(source, options);
    run_until_done(&mut vm);

    if let Some(name) = vm.suspended_on().map(str::to_string) {
        vm.throw(InterpreterError::NoInputProvider(name));
    }

    finish(vm)
}

/// Run a program, asking `provider` whenever it waits for input
pub async fn interpret_with_input<P>(source: &str, options: RunOptions, provider: &mut P) -> RunResult
where
    P: InputProvider,
{
    let mut vm = VM::new(source, options);

    loop {
        run_until_done(&mut vm);

        let Some(name) = vm.suspended_on().map(str::to_string) else {
            break;
        };
        let input = provider.provide(&name).await;
        if vm.resume(input).is_err() {
            break;
        }
    }

    finish(vm)
}

fn finish(vm: VM) -> RunResult {
    let result = vm.into_result();
    info!(
        lines = result.output.len(),
        failed = result.error.is_some(),
        "run finished"
    );
    result
}
