//! Tests for the interpreter building blocks
//!
//! Organized by component
