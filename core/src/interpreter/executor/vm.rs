//! Virtual Machine state
//!
//! The VM holds all execution state:
//! - lines: The program text, one trimmed entry per line
//! - cursor: Index of the next line to execute
//! - databer: Datalings, Datasubs and their creation log
//! - output: Lines produced so far
//! - control: Whether the run continues, halted, failed or waits for input

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::interpreter::databer::Databer;
use crate::interpreter::errors::{ErrorInfo, InterpreterError, InterpreterResult};
use crate::interpreter::parser::EXIT_MARKER;
use crate::types::{RunOptions, RunResult};

/* ===================== Control ===================== */

/// Control state of a run
///
/// Anything other than `None` stops the step loop. `Suspend` is the only
/// state a run can leave again, through [`VM::resume`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "t", content = "v")]
pub enum Control {
    None,
    /// Waiting for input into the named Datasub
    Suspend(String),
    /// `PLEASE EXIT :6.` ran
    Exit,
    Throw(ErrorInfo),
}

/* ===================== VM ===================== */

/// Virtual Machine state
///
/// This contains everything needed to execute (and serialize/resume) a program.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VM {
    pub lines: Vec<String>,
    pub cursor: usize,
    pub databer: Databer,
    pub output: Vec<String>,
    pub control: Control,
    pub options: RunOptions,
}

impl VM {
    /// Create a new VM for a program
    ///
    /// A program without the exit command fails here, before any line runs.
    pub fn new(source: &str, options: RunOptions) -> Self {
        let mut vm = VM {
            lines: source.split('\n').map(|l| l.trim().to_string()).collect(),
            cursor: 0,
            databer: Databer::new(),
            output: Vec::new(),
            control: Control::None,
            options,
        };

        if !source.contains(EXIT_MARKER) {
            vm.throw(InterpreterError::MissingExit);
        }

        vm
    }

    /// Push a line that is always shown
    pub fn emit(&mut self, line: impl Into<String>) {
        self.output.push(line.into());
    }

    /// Push a notification line, unless command output is hidden
    pub fn notify(&mut self, line: impl Into<String>) {
        if !self.options.hide_command_output {
            self.output.push(line.into());
        }
    }

    /// Fail the run
    pub fn throw(&mut self, err: InterpreterError) {
        warn!(line = self.cursor + 1, error = %err, "program failed");
        self.control = Control::Throw(ErrorInfo::from(&err));
    }

    /// Name of the Datasub the VM is waiting on, if suspended
    pub fn suspended_on(&self) -> Option<&str> {
        match &self.control {
            Control::Suspend(name) => Some(name),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorInfo> {
        match &self.control {
            Control::Throw(info) => Some(info),
            _ => None,
        }
    }

    /// Deliver input to a suspended VM
    ///
    /// The value is written into the Datasub named by the suspension and
    /// the VM becomes runnable again.
    pub fn resume(&mut self, input: impl Into<String>) -> InterpreterResult<()> {
        let Some(name) = self.suspended_on().map(str::to_string) else {
            return Err(InterpreterError::NotSuspended);
        };
        let input = input.into();

        if let Err(err) = self.databer.write_named(&name, input.clone()) {
            let err = InterpreterError::from(err);
            self.throw(err.clone());
            return Err(err);
        }

        debug!(datasub = %name, "resumed with input");
        self.notify(format!("Received input for {name}: {input}"));
        self.control = Control::None;
        Ok(())
    }

    /// Consume the VM into its caller-facing result
    pub fn into_result(self) -> RunResult {
        let (error, error_kind) = match self.control {
            Control::Throw(info) => (Some(info.message), Some(info.kind)),
            _ => (None, None),
        };

        RunResult {
            output: self.output,
            error,
            error_kind,
            datasubs: self.databer.named_snapshot(),
        }
    }
}

/* ===================== Step Result ===================== */

/// Result of executing one step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Continue to next step
    Continue,
    /// Halted, failed or suspended
    Done,
}
