//! Error taxonomy
//!
//! Every failure is terminal: the first error aborts the run. Errors are
//! layered the same way the interpreter is:
//! - [`DataError`] from the Databer
//! - [`EvalError`] from the expression evaluator
//! - [`InterpreterError`] from the executor, wrapping the other two
//!
//! A failed VM keeps only the serialisable [`ErrorInfo`] record.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/* ===================== Error Kinds ===================== */

/// Stable classification of an error, independent of its message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    Amnesia,
    OrbOverload,
    Syntax,
    InvalidValue,
    InvalidName,
    IndexOutOfRange,
    UnknownIndex,
    UnknownName,
    DivisionByZero,
    Math,
    MissingExit,
    UnrecognizedAction,
    Stupid,
}

/// Serialisable error record stored by a failed VM
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub kind: ErrorKind,
    pub message: String,
}

impl ErrorInfo {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl From<&InterpreterError> for ErrorInfo {
    fn from(err: &InterpreterError) -> Self {
        ErrorInfo::new(err.kind(), err.to_string())
    }
}

/* ===================== Databer ===================== */

/// Which numeric-slot mutation ran out of range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotOp {
    Remove,
    Update,
}

impl std::fmt::Display for SlotOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SlotOp::Remove => f.write_str("remove"),
            SlotOp::Update => f.write_str("update"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    #[error("Stupid error: Value \"{0}\" is not numeric")]
    InvalidValue(String),

    #[error("Stupid error: Datasub name cannot be empty")]
    InvalidName,

    #[error("Stupid error: Cannot {op} Dataling at index {index}, out of range")]
    IndexOutOfRange { op: SlotOp, index: usize },

    #[error("Stupid error: No Dataling at index {0}")]
    UnknownIndex(usize),

    #[error("Stupid error: Datasub \"{0}\" does not exist")]
    UnknownName(String),
}

impl DataError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DataError::InvalidValue(_) => ErrorKind::InvalidValue,
            DataError::InvalidName => ErrorKind::InvalidName,
            DataError::IndexOutOfRange { .. } => ErrorKind::IndexOutOfRange,
            DataError::UnknownIndex(_) => ErrorKind::UnknownIndex,
            DataError::UnknownName(_) => ErrorKind::UnknownName,
        }
    }
}

/* ===================== Evaluator ===================== */

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("Stupid error: Datasub \"{0}\" does not exist")]
    UnknownName(String),

    #[error("Math error: Division by zero in \"{0}\"")]
    DivisionByZero(String),

    #[error("Math error: Cannot evaluate \"{0}\"")]
    Math(String),
}

impl EvalError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EvalError::UnknownName(_) => ErrorKind::UnknownName,
            EvalError::DivisionByZero(_) => ErrorKind::DivisionByZero,
            EvalError::Math(_) => ErrorKind::Math,
        }
    }
}

/* ===================== Executor ===================== */

/// Which piece of punctuation a command line forgot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Forgotten {
    Orb,
    SemiOrb,
}

impl std::fmt::Display for Forgotten {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Forgotten::Orb => f.write_str("Orb (.)"),
            Forgotten::SemiOrb => f.write_str("Semi-Orb (:)"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterpreterError {
    #[error("Stupid error: Missing PLEASE EXIT :6. command at the end of the program")]
    MissingExit,

    #[error("Amnesia error: Forgot the {missing} in line: {line}")]
    Amnesia { missing: Forgotten, line: String },

    #[error("Orb overload error: Too many Orbs (.) in line: {0}")]
    OrbOverload(String),

    #[error("Syntax error: Unknown action \"{action} :{ordinal}\" in line: {line}")]
    Syntax {
        action: String,
        ordinal: String,
        line: String,
    },

    #[error("Unrecognized action: {0}")]
    UnrecognizedAction(String),

    #[error("Stupid error: Expected numeric value in the next line after {0}")]
    ExpectedValue(&'static str),

    #[error("Stupid error: Missing value after {0}")]
    MissingValue(&'static str),

    #[error("Stupid error: {0} requires an index")]
    MissingIndex(&'static str),

    #[error("Stupid error: {0} requires a Datasub name")]
    MissingName(&'static str),

    #[error("Stupid error: no valid datasubs found in \"{0}\"")]
    NoValidDatasubs(String),

    #[error("Stupid error: Reached end of program without PLEASE EXIT :6.")]
    UnexpectedEnd,

    #[error("Stupid error: No input provider for PLEASE LISTEN :8. {0}")]
    NoInputProvider(String),

    #[error("Stupid error: Cannot resume a program that is not waiting for input")]
    NotSuspended,

    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl InterpreterError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            InterpreterError::MissingExit => ErrorKind::MissingExit,
            InterpreterError::Amnesia { .. } => ErrorKind::Amnesia,
            InterpreterError::OrbOverload(_) => ErrorKind::OrbOverload,
            InterpreterError::Syntax { .. } => ErrorKind::Syntax,
            InterpreterError::UnrecognizedAction(_) => ErrorKind::UnrecognizedAction,
            InterpreterError::ExpectedValue(_)
            | InterpreterError::MissingValue(_)
            | InterpreterError::MissingIndex(_) => ErrorKind::InvalidValue,
            InterpreterError::MissingName(_) => ErrorKind::InvalidName,
            InterpreterError::NoValidDatasubs(_)
            | InterpreterError::UnexpectedEnd
            | InterpreterError::NoInputProvider(_)
            | InterpreterError::NotSuspended => ErrorKind::Stupid,
            InterpreterError::Data(err) => err.kind(),
            InterpreterError::Eval(err) => err.kind(),
        }
    }
}

pub type InterpreterResult<T> = Result<T, InterpreterError>;
