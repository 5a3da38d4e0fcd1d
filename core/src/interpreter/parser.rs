//! Line classifier
//!
//! Turns one cleaned program line into a typed [`Command`]. Punctuation
//! checks run first, in a fixed order, so the error a malformed line
//! produces does not depend on which command it was meant to be:
//!
//! 1. `PLEASE ...` without any `.`        -> Amnesia (Orb)
//! 2. a `.` but no `:`                    -> Amnesia (Semi-Orb)
//! 3. more than one `.`                   -> Orb overload
//! 4. `PLEASE <WORD> :<N>.` not a command -> Syntax error
//! 5. anything else that is not a command -> Unrecognized action

use pest::Parser;
use pest_derive::Parser;

use super::errors::{Forgotten, InterpreterError, InterpreterResult};

/* ===================== PEST Parser ===================== */

#[derive(Parser)]
#[grammar = "interpreter/grammar.pest"]
pub(crate) struct GrammarParser;

/* ===================== Constants ===================== */

/// Marker every program must contain
pub const EXIT_MARKER: &str = "PLEASE EXIT :6.";

/// Start of an end-of-line comment
pub const COMMENT_MARKER: &str = "//";

/// A line starting with this is skipped entirely
pub const HASH_COMMENT: char = '#';

/* ===================== Commands ===================== */

/// What `PLEASE CALL :4.` should render
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayTarget {
    /// Every entry, in creation order
    All,
    /// `PLEASE CALL :4.: N`
    Dataling(Option<usize>),
    /// `PLEASE CALL :4.; NAME`
    Datasub(Option<String>),
}

/// A classified command line
///
/// Same-line arguments are optional here; handlers report a missing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    CreateNumeric,
    DeleteNumeric { index: Option<usize> },
    UpdateNumeric { index: Option<usize> },
    Display(DisplayTarget),
    Clear,
    Exit,
    DeleteNamed { name: Option<String> },
    Listen { name: Option<String> },
    CreateNamed { name: Option<String> },
    Calculate { name: Option<String> },
}

impl Command {
    /// The literal command text, used in messages
    pub fn keyword(&self) -> &'static str {
        match self {
            Command::CreateNumeric => "PLEASE DO :1.",
            Command::DeleteNumeric { .. } => "PLEASE DONT :2.",
            Command::UpdateNumeric { .. } => "PLEASE LET :3.",
            Command::Display(_) => "PLEASE CALL :4.",
            Command::Clear => "PLEASE BREACH :5.",
            Command::Exit => "PLEASE EXIT :6.",
            Command::DeleteNamed { .. } => "PLEASE SUB GO :7.",
            Command::Listen { .. } => "PLEASE LISTEN :8.",
            Command::CreateNamed { .. } => "PLEASE ADD :9.",
            Command::Calculate { .. } => "PLEASE CALC :10.",
        }
    }
}

/* ===================== Line Cleaning ===================== */

/// Trim a line and cut it at the comment marker
pub fn strip_comment(raw: &str) -> &str {
    let line = raw.trim();
    match line.find(COMMENT_MARKER) {
        Some(pos) => line[..pos].trim(),
        None => line,
    }
}

/// Cleaned form of a program line; empty means "skip"
pub fn clean_line(raw: &str) -> &str {
    let line = strip_comment(raw);
    if line.starts_with(HASH_COMMENT) {
        ""
    } else {
        line
    }
}

/* ===================== Classification ===================== */

/// Classify a cleaned, non-empty line
pub fn parse_command(line: &str) -> InterpreterResult<Command> {
    check_punctuation(line)?;

    let Ok(mut pairs) = GrammarParser::parse(Rule::command, line) else {
        return Err(InterpreterError::UnrecognizedAction(line.to_string()));
    };
    let Some(command) = pairs.next() else {
        return Err(InterpreterError::UnrecognizedAction(line.to_string()));
    };

    let mut action = String::new();
    let mut ordinal = "";
    let mut rest = "";
    for part in command.into_inner() {
        match part.as_rule() {
            Rule::action_word => {
                action = part.as_str().split_whitespace().collect::<Vec<_>>().join(" ");
            }
            Rule::ordinal => ordinal = part.as_str(),
            Rule::rest => rest = part.as_str(),
            _ => {}
        }
    }

    classify(&action, ordinal, rest).ok_or_else(|| InterpreterError::Syntax {
        action,
        ordinal: ordinal.to_string(),
        line: line.to_string(),
    })
}

fn check_punctuation(line: &str) -> InterpreterResult<()> {
    let orbs = line.matches('.').count();

    if orbs == 0 && line.starts_with("PLEASE") {
        return Err(InterpreterError::Amnesia {
            missing: Forgotten::Orb,
            line: line.to_string(),
        });
    }
    if orbs > 0 && !line.contains(':') {
        return Err(InterpreterError::Amnesia {
            missing: Forgotten::SemiOrb,
            line: line.to_string(),
        });
    }
    if orbs > 1 {
        return Err(InterpreterError::OrbOverload(line.to_string()));
    }
    Ok(())
}

fn classify(action: &str, ordinal: &str, rest: &str) -> Option<Command> {
    let command = match (action, ordinal) {
        ("DO", "1") => Command::CreateNumeric,
        ("DONT", "2") => Command::DeleteNumeric {
            index: leading_index(rest),
        },
        ("LET", "3") => Command::UpdateNumeric {
            index: leading_index(rest),
        },
        ("CALL", "4") => Command::Display(display_target(rest)),
        ("BREACH", "5") => Command::Clear,
        ("EXIT", "6") => Command::Exit,
        ("SUB GO", "7") => Command::DeleteNamed {
            name: leading_name(rest),
        },
        ("LISTEN", "8") => Command::Listen {
            name: leading_name(rest),
        },
        ("ADD", "9") => Command::CreateNamed {
            name: leading_name(rest),
        },
        ("CALC", "10") => Command::Calculate {
            name: leading_name(rest),
        },
        _ => return None,
    };
    Some(command)
}

/* ===================== Arguments ===================== */

fn display_target(rest: &str) -> DisplayTarget {
    let rest = rest.trim_start();
    if let Some(arg) = rest.strip_prefix(':') {
        DisplayTarget::Dataling(leading_index(arg))
    } else if let Some(arg) = rest.strip_prefix(';') {
        DisplayTarget::Datasub(leading_name(arg))
    } else {
        DisplayTarget::All
    }
}

fn leading_index(text: &str) -> Option<usize> {
    let text = text.trim_start();
    let end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    text[..end].parse().ok()
}

fn leading_name(text: &str) -> Option<String> {
    let text = text.trim_start();
    let end = text
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(text.len());
    (end > 0).then(|| text[..end].to_string())
}
