//! Tests for the interpreter
//!
//! Organized by component

mod helpers;
mod program_tests;
mod type_checker_tests;
