//! Whole-program tests: each command, comments, output and quiet mode

use super::helpers::{program, run, run_quiet, run_vm};
use crate::interpreter::executor::{step, Control, Step, EXIT_MESSAGE, VM};
use crate::types::RunOptions;
use maplit::btreemap;

/* ===================== Datalings ===================== */

#[test]
fn test_hello_he() {
    let result = run(&[
        "PLEASE DO :1.",
        "9",
        "PLEASE DO :1.",
        "6",
        "PLEASE CALL :4.",
        "PLEASE EXIT :6.",
    ]);

    assert_eq!(result.error, None);
    assert_eq!(
        result.output,
        vec![
            "Created Dataling with value: 9 at index 0",
            "Created Dataling with value: 6 at index 1",
            "he",
            EXIT_MESSAGE,
        ]
    );
}

#[test]
fn test_quiet_keeps_display_and_exit() {
    let result = run_quiet(&[
        "PLEASE DO :1.",
        "9",
        "PLEASE DO :1.",
        "6",
        "PLEASE CALL :4.",
        "PLEASE BREACH :5.",
        "PLEASE EXIT :6.",
    ]);

    assert_eq!(result.error, None);
    assert_eq!(result.output, vec!["he", EXIT_MESSAGE]);
}

#[test]
fn test_update_and_delete() {
    let result = run(&[
        "PLEASE DO :1.",
        "9",
        "PLEASE DO :1.",
        "6",
        "PLEASE DO :1.",
        "13",
        "PLEASE LET :3. 0",
        "28",
        "PLEASE DONT :2. 1",
        "PLEASE CALL :4.",
        "PLEASE EXIT :6.",
    ]);

    assert_eq!(result.error, None);
    assert_eq!(
        result.output[3..],
        [
            "Updated Dataling at index 0 with value: 28",
            "Removed Dataling at index: 1",
            "Al",
            EXIT_MESSAGE,
        ]
    );
}

#[test]
fn test_negative_and_large_values_render_as_digits() {
    let result = run_quiet(&[
        "PLEASE DO :1.",
        "-5",
        "PLEASE DO :1.",
        "1000",
        "PLEASE CALL :4.",
        "PLEASE EXIT :6.",
    ]);
    assert_eq!(result.output, vec!["-51000", EXIT_MESSAGE]);
}

/* ===================== Display ===================== */

#[test]
fn test_empty_display() {
    let result = run(&["PLEASE CALL :4.", "PLEASE EXIT :6."]);
    assert_eq!(result.output, vec!["empty", EXIT_MESSAGE]);
}

#[test]
fn test_display_single_values() {
    let result = run_quiet(&[
        "PLEASE DO :1.",
        "66",
        "PLEASE DO :1.",
        "500",
        "PLEASE ADD :9. Word",
        "PLEASE CALC :10. Word",
        "6 * 7",
        "PLEASE CALL :4.: 0",
        "PLEASE CALL :4.: 1",
        "PLEASE CALL :4.; Word",
        "PLEASE EXIT :6.",
    ]);

    assert_eq!(result.error, None);
    assert_eq!(result.output, vec![",", "500", "42", EXIT_MESSAGE]);
}

#[test]
fn test_display_interleaves_datasubs() {
    let result = run_quiet(&[
        "PLEASE DO :1.",
        "9",
        "PLEASE ADD :9. G",
        "PLEASE CALC :10. G",
        "1 + 1",
        "PLEASE DO :1.",
        "10",
        "PLEASE CALL :4.",
        "PLEASE EXIT :6.",
    ]);

    assert_eq!(result.output, vec!["h2i", EXIT_MESSAGE]);
}

#[test]
fn test_breach_clears_everything() {
    let result = run(&[
        "PLEASE DO :1.",
        "9",
        "PLEASE ADD :9. X",
        "PLEASE BREACH :5.",
        "PLEASE CALL :4.",
        "PLEASE EXIT :6.",
    ]);

    assert_eq!(result.error, None);
    assert_eq!(
        result.output[2..],
        [
            "All Datalings and Datasubs removed from Databer",
            "empty",
            EXIT_MESSAGE
        ]
    );
    assert!(result.datasubs.is_empty());
}

/* ===================== Datasubs ===================== */

#[test]
fn test_calc_literal_and_substituted() {
    let result = run(&[
        "PLEASE ADD :9. X",
        "PLEASE CALC :10. X",
        "2 + 3",
        "PLEASE ADD :9. Y",
        "PLEASE CALC :10. Y",
        "X * 3",
        "PLEASE EXIT :6.",
    ]);

    assert_eq!(result.error, None);
    assert_eq!(
        result.output,
        vec![
            "Created Datasub: X",
            "Calculated 2 + 3 = 5, stored in X",
            "Created Datasub: Y",
            "Calculated X * 3 = 15, stored in Y",
            EXIT_MESSAGE,
        ]
    );
    assert_eq!(
        result.datasubs,
        btreemap! {
            "X".to_string() => "5".to_string(),
            "Y".to_string() => "15".to_string(),
        }
    );
}

#[test]
fn test_calc_can_reference_its_own_result() {
    let result = run_quiet(&[
        "PLEASE ADD :9. N",
        "PLEASE CALC :10. N",
        "1",
        "PLEASE CALC :10. N",
        "N + N",
        "PLEASE CALC :10. N",
        "N * 10 / 4",
        "PLEASE CALL :4.; N",
        "PLEASE EXIT :6.",
    ]);

    assert_eq!(result.output, vec!["5", EXIT_MESSAGE]);
}

#[test]
fn test_sub_go_removes_datasub() {
    let result = run(&[
        "PLEASE ADD :9. Temp",
        "PLEASE ADD :9. Keep",
        "PLEASE SUB GO :7. Temp",
        "PLEASE EXIT :6.",
    ]);

    assert_eq!(result.error, None);
    assert_eq!(result.output[2], "Removed Datasub: Temp");
    assert_eq!(
        result.datasubs,
        btreemap! { "Keep".to_string() => String::new() }
    );
}

/* ===================== Comments / Layout ===================== */

#[test]
fn test_comments_and_blank_lines() {
    let source = program(&[
        "// make an h",
        "",
        "# section header",
        "   PLEASE DO :1.   // create",
        "9 // the value",
        "",
        "PLEASE CALL :4. // show",
        "PLEASE EXIT :6.",
    ]);
    let result = crate::interpreter::interpret(&source, Default::default());

    assert_eq!(result.error, None);
    assert_eq!(
        result.output,
        vec!["Created Dataling with value: 9 at index 0", "h", EXIT_MESSAGE]
    );
}

#[test]
fn test_crlf_line_endings() {
    let source = "PLEASE DO :1.\r\n9\r\nPLEASE CALL :4.\r\nPLEASE EXIT :6.\r\n";
    let result = crate::interpreter::interpret(source, Default::default());
    assert_eq!(result.error, None);
    assert_eq!(result.output[1], "h");
}

#[test]
fn test_exit_stops_execution() {
    let vm = run_vm(&[
        "PLEASE CALL :4.",
        "PLEASE EXIT :6.",
        "this line is never looked at",
        "PLEASE DO :1.",
    ]);

    assert_eq!(vm.control, Control::Exit);
    assert_eq!(vm.cursor, 2);
    assert_eq!(vm.output, vec!["empty", EXIT_MESSAGE]);
}

#[test]
fn test_cursor_skips_payload_lines() {
    let mut vm = VM::new(
        &program(&["PLEASE ADD :9. R", "PLEASE DO :1.", "2", "", "PLEASE EXIT :6."]),
        RunOptions::default(),
    );

    assert_eq!(step(&mut vm), Step::Continue);
    assert_eq!(vm.cursor, 1);
    assert_eq!(step(&mut vm), Step::Continue);
    assert_eq!(vm.cursor, 3);
    assert_eq!(step(&mut vm), Step::Continue);
    assert_eq!(vm.cursor, 4);
    assert_eq!(step(&mut vm), Step::Done);
    assert_eq!(vm.control, Control::Exit);
    assert_eq!(vm.databer.read_numeric(0), Some(2));
}
