use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::interpreter::ErrorKind;

/// Per-run interpreter options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunOptions {
    /// Suppress notification lines (created/removed/updated/...).
    /// Display output and the exit message are always kept.
    pub hide_command_output: bool,
}

/// Outcome of a complete run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResult {
    /// Every display/notification line, in execution order
    pub output: Vec<String>,

    /// The terminal error, if the run failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,

    /// Final Datasub values, by name
    pub datasubs: BTreeMap<String, String>,
}

impl RunResult {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}
