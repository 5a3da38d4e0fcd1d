//! Tests for PLEASE LISTEN :8. suspension and resumption

use super::helpers::{program, run_vm};
use crate::interpreter::executor::{run_until_done, Control, EXIT_MESSAGE, VM};
use crate::interpreter::{interpret_with_input, ErrorKind, InputProvider, InterpreterError, ScriptedInput};
use crate::types::RunOptions;
use maplit::btreemap;

const GREETER: &[&str] = &[
    "PLEASE ADD :9. Name",
    "PLEASE LISTEN :8. Name",
    "PLEASE CALL :4.; Name",
    "PLEASE EXIT :6.",
];

/* ===================== Manual Driving ===================== */

#[test]
fn test_listen_suspends_after_command() {
    let vm = run_vm(GREETER);

    assert_eq!(vm.control, Control::Suspend("Name".to_string()));
    assert_eq!(vm.suspended_on(), Some("Name"));
    assert_eq!(vm.cursor, 2);
    assert_eq!(vm.output, vec!["Created Datasub: Name"]);
}

#[test]
fn test_resume_writes_and_continues() {
    let mut vm = run_vm(GREETER);

    vm.resume("Ada").unwrap();
    assert_eq!(vm.control, Control::None);
    run_until_done(&mut vm);

    assert_eq!(vm.control, Control::Exit);
    assert_eq!(
        vm.output,
        vec![
            "Created Datasub: Name",
            "Received input for Name: Ada",
            "Ada",
            EXIT_MESSAGE,
        ]
    );
}

#[test]
fn test_suspended_vm_survives_serialization() {
    let vm = run_vm(GREETER);

    let serialized = serde_json::to_string(&vm).unwrap();
    let mut vm2: VM = serde_json::from_str(&serialized).unwrap();
    assert_eq!(vm2.control, Control::Suspend("Name".to_string()));

    vm2.resume("Grace").unwrap();
    run_until_done(&mut vm2);

    let result = vm2.into_result();
    assert_eq!(result.error, None);
    assert_eq!(result.output[2], "Grace");
    assert_eq!(result.datasubs, btreemap! { "Name".to_string() => "Grace".to_string() });
}

#[test]
fn test_resume_when_not_suspended() {
    let mut vm = VM::new("PLEASE EXIT :6.", RunOptions::default());
    assert_eq!(vm.resume("x"), Err(InterpreterError::NotSuspended));

    run_until_done(&mut vm);
    assert_eq!(
        vm.resume("x").unwrap_err().kind(),
        ErrorKind::Stupid
    );
    assert_eq!(vm.control, Control::Exit);
}

/* ===================== Providers ===================== */

#[test]
fn test_scripted_input() {
    let source = program(&[
        "PLEASE ADD :9. A",
        "PLEASE ADD :9. B",
        "PLEASE LISTEN :8. A",
        "PLEASE LISTEN :8. B",
        "PLEASE ADD :9. Sum",
        "PLEASE CALC :10. Sum",
        "A + B",
        "PLEASE CALL :4.; Sum",
        "PLEASE EXIT :6.",
    ]);
    let mut input = ScriptedInput::new(["20", "22"]);

    let result = tokio_test::block_on(interpret_with_input(
        &source,
        RunOptions {
            hide_command_output: true,
        },
        &mut input,
    ));

    assert_eq!(result.error, None);
    assert_eq!(result.output, vec!["42", EXIT_MESSAGE]);
    assert_eq!(input.asked(), ["A", "B"]);
    assert_eq!(input.remaining(), 0);
}

#[test]
fn test_exhausted_script_gives_empty_string() {
    let mut input = ScriptedInput::new(Vec::<String>::new());
    let result = tokio_test::block_on(interpret_with_input(
        &program(GREETER),
        RunOptions::default(),
        &mut input,
    ));

    assert_eq!(result.error, None);
    assert_eq!(result.output[1], "Received input for Name: ");
    assert_eq!(result.output[2], "");
}

#[test]
fn test_listened_expression_is_not_evaluated() {
    let source = program(&[
        "PLEASE ADD :9. A",
        "PLEASE LISTEN :8. A",
        "PLEASE ADD :9. R",
        "PLEASE CALC :10. R",
        "A + 1",
        "PLEASE EXIT :6.",
    ]);
    let mut input = ScriptedInput::new(["2*3"]);

    let result = tokio_test::block_on(interpret_with_input(&source, RunOptions::default(), &mut input));

    assert_eq!(result.error_kind, Some(ErrorKind::Math));
    assert_eq!(
        result.datasubs,
        btreemap! {
            "A".to_string() => "2*3".to_string(),
            "R".to_string() => String::new(),
        }
    );
}

/// Provider that answers with the name it was asked for
struct Echo {
    calls: usize,
}

impl InputProvider for Echo {
    async fn provide(&mut self, name: &str) -> String {
        self.calls += 1;
        format!("{name}!")
    }
}

#[test]
fn test_custom_provider() {
    let mut echo = Echo { calls: 0 };
    let result = tokio_test::block_on(interpret_with_input(
        &program(GREETER),
        RunOptions::default(),
        &mut echo,
    ));

    assert_eq!(echo.calls, 1);
    assert_eq!(result.output[2], "Name!");
}

#[test]
fn test_failure_after_input_keeps_output() {
    let source = program(&[
        "PLEASE ADD :9. N",
        "PLEASE LISTEN :8. N",
        "PLEASE ADD :9. R",
        "PLEASE CALC :10. R",
        "10 / N",
        "PLEASE EXIT :6.",
    ]);
    let mut input = ScriptedInput::new(["0"]);

    let result = tokio_test::block_on(interpret_with_input(&source, RunOptions::default(), &mut input));

    assert_eq!(result.error_kind, Some(ErrorKind::DivisionByZero));
    assert_eq!(
        result.output,
        vec![
            "Created Datasub: N",
            "Received input for N: 0",
            "Created Datasub: R",
        ]
    );
    assert_eq!(
        result.datasubs,
        btreemap! {
            "N".to_string() => "0".to_string(),
            "R".to_string() => String::new(),
        }
    );
}
