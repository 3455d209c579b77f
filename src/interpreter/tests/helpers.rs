//! Test helpers for interpreter tests
//!
//! Common utilities for building VMs and evaluating expressions

use crate::config::EngineConfig;
use crate::error::Result;
use crate::interpreter::{eval_expr, initialize, typecheck, Expr, FlightState, Program, Value, VM};

/// VM at the origin, on the ground, with default costs and threshold
pub fn build_vm(battery: f32) -> VM {
    VM::new(initialize((0.0, 0.0), 0.0, battery), EngineConfig::default())
}

/// Evaluate against a default flight state, panicking on error
pub fn eval(expr: &Expr) -> Value {
    eval_expr(expr, &FlightState::default()).expect("Evaluation failed")
}

/// Type check then run autonomously, like the CLI does
pub fn check_and_run(vm: &mut VM, program: &Program) -> Result<Vec<String>> {
    typecheck(program)?;
    vm.run_program(program)
}

pub fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}
