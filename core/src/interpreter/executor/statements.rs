//! Command handlers
//!
//! One handler per command. Each handler either fails without touching
//! the VM, or applies its effect and moves the cursor: one line, or two
//! when it consumed the following payload line.

use tracing::{debug, info};

use super::vm::{Control, VM};
use crate::interpreter::databer::Databer;
use crate::interpreter::errors::{DataError, InterpreterError, InterpreterResult};
use crate::interpreter::expressions::{evaluate, identifiers};
use crate::interpreter::parser::{strip_comment, Command, DisplayTarget};

/// Message pushed by `PLEASE EXIT :6.`
pub const EXIT_MESSAGE: &str = "Exiting INTERFUCK IDE";

/* ===================== Dispatch ===================== */

pub fn execute(vm: &mut VM, command: Command) -> InterpreterResult<()> {
    let keyword = command.keyword();
    debug!(command = keyword, line = vm.cursor + 1, "dispatch");

    match command {
        Command::CreateNumeric => create_numeric(vm, keyword),
        Command::DeleteNumeric { index } => delete_numeric(vm, keyword, index),
        Command::UpdateNumeric { index } => update_numeric(vm, keyword, index),
        Command::Display(target) => display(vm, keyword, target),
        Command::Clear => clear(vm),
        Command::Exit => exit(vm),
        Command::DeleteNamed { name } => delete_named(vm, keyword, name),
        Command::Listen { name } => listen(vm, keyword, name),
        Command::CreateNamed { name } => create_named(vm, keyword, name),
        Command::Calculate { name } => calculate(vm, keyword, name),
    }
}

/* ===================== Payload Lines ===================== */

/// The comment-stripped line after the current command
fn payload(vm: &VM, keyword: &'static str) -> InterpreterResult<String> {
    vm.lines
        .get(vm.cursor + 1)
        .map(|raw| strip_comment(raw).to_string())
        .ok_or(InterpreterError::MissingValue(keyword))
}

fn numeric_payload(vm: &VM, keyword: &'static str) -> InterpreterResult<i64> {
    let text = payload(vm, keyword)?;
    if text.is_empty() {
        return Err(InterpreterError::ExpectedValue(keyword));
    }
    Ok(Databer::parse_value(&text)?)
}

/* ===================== Datalings ===================== */

fn create_numeric(vm: &mut VM, keyword: &'static str) -> InterpreterResult<()> {
    let value = numeric_payload(vm, keyword)?;
    let index = vm.databer.create_numeric(value);

    vm.notify(format!("Created Dataling with value: {value} at index {index}"));
    vm.cursor += 2;
    Ok(())
}

fn delete_numeric(vm: &mut VM, keyword: &'static str, index: Option<usize>) -> InterpreterResult<()> {
    let index = index.ok_or(InterpreterError::MissingIndex(keyword))?;
    vm.databer.delete_numeric(index)?;

    vm.notify(format!("Removed Dataling at index: {index}"));
    vm.cursor += 1;
    Ok(())
}

fn update_numeric(vm: &mut VM, keyword: &'static str, index: Option<usize>) -> InterpreterResult<()> {
    let index = index.ok_or(InterpreterError::MissingIndex(keyword))?;
    let value = numeric_payload(vm, keyword)?;
    vm.databer.update_numeric(index, value)?;

    vm.notify(format!("Updated Dataling at index {index} with value: {value}"));
    vm.cursor += 2;
    Ok(())
}

/* ===================== Display / Clear / Exit ===================== */

fn display(vm: &mut VM, keyword: &'static str, target: DisplayTarget) -> InterpreterResult<()> {
    let rendered = match target {
        DisplayTarget::All => {
            let all = vm.databer.render_all();
            if all.is_empty() {
                "empty".to_string()
            } else {
                all
            }
        }
        DisplayTarget::Dataling(index) => {
            let index = index.ok_or(InterpreterError::MissingIndex(keyword))?;
            vm.databer.render_one(index)?
        }
        DisplayTarget::Datasub(name) => {
            let name = name.ok_or(InterpreterError::MissingName(keyword))?;
            vm.databer
                .read_named(&name)
                .map(str::to_string)
                .ok_or(DataError::UnknownName(name))?
        }
    };

    vm.emit(rendered);
    vm.cursor += 1;
    Ok(())
}

fn clear(vm: &mut VM) -> InterpreterResult<()> {
    vm.databer.clear_all();
    vm.notify("All Datalings and Datasubs removed from Databer");
    vm.cursor += 1;
    Ok(())
}

fn exit(vm: &mut VM) -> InterpreterResult<()> {
    vm.emit(EXIT_MESSAGE);
    vm.control = Control::Exit;
    vm.cursor += 1;
    info!(lines = vm.output.len(), "program exited");
    Ok(())
}

/* ===================== Datasubs ===================== */

fn delete_named(vm: &mut VM, keyword: &'static str, name: Option<String>) -> InterpreterResult<()> {
    let name = name.ok_or(InterpreterError::MissingName(keyword))?;
    vm.databer.delete_named(&name)?;

    vm.notify(format!("Removed Datasub: {name}"));
    vm.cursor += 1;
    Ok(())
}

fn create_named(vm: &mut VM, keyword: &'static str, name: Option<String>) -> InterpreterResult<()> {
    let name = name.ok_or(InterpreterError::MissingName(keyword))?;
    vm.databer.create_named(&name)?;

    vm.notify(format!("Created Datasub: {name}"));
    vm.cursor += 1;
    Ok(())
}

/// Suspend until the caller supplies input for `name`
///
/// The cursor moves past the command first, so resuming continues with
/// the next line.
fn listen(vm: &mut VM, keyword: &'static str, name: Option<String>) -> InterpreterResult<()> {
    let name = name.ok_or(InterpreterError::MissingName(keyword))?;
    if !vm.databer.has_named(&name) {
        return Err(DataError::UnknownName(name).into());
    }

    debug!(datasub = %name, "suspending for input");
    vm.cursor += 1;
    vm.control = Control::Suspend(name);
    Ok(())
}

fn calculate(vm: &mut VM, keyword: &'static str, name: Option<String>) -> InterpreterResult<()> {
    let name = name.ok_or(InterpreterError::MissingName(keyword))?;
    if !vm.databer.has_named(&name) {
        return Err(DataError::UnknownName(name).into());
    }

    let expression = payload(vm, keyword)?;
    if expression.is_empty() {
        return Err(InterpreterError::MissingValue(keyword));
    }

    let tokens = identifiers(&expression);
    let result = if tokens.is_empty() {
        evaluate(&expression, &[], &vm.databer)?
    } else {
        let known: Vec<&str> = tokens
            .into_iter()
            .filter(|token| vm.databer.has_named(token))
            .collect();
        if known.is_empty() {
            return Err(InterpreterError::NoValidDatasubs(expression));
        }
        evaluate(&expression, &known, &vm.databer)?
    };

    vm.databer.write_named(&name, result.clone())?;
    vm.notify(format!("Calculated {expression} = {result}, stored in {name}"));
    vm.cursor += 2;
    Ok(())
}
