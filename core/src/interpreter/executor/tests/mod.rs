//! Tests for the executor
//!
//! Organized by feature area

mod helpers;

mod listen_tests;
mod program_tests;
