//! # AeroScript Interpreter - Continuation Stack Runtime
//!
//! ## Core Principles
//!
//! 1. **Stack-driven execution**: pending work lives in `VM::stack`, no recursion
//!    across statements
//! 2. **Modes as scopes**: entering and leaving a mode are callbacks scheduled
//!    around its body, so interrupts only need to clear the stack
//! 3. **Checked before run**: `typecheck` rejects every operand combination the
//!    evaluator cannot handle
//! 4. **Pausable**: in interactive mode the VM stops between modes and resumes on
//!    an injected message

pub mod costs;
pub mod exec_loop;
pub mod expressions;
pub mod flight;
pub mod modes;
pub mod program;
pub mod statements;
pub mod type_checker;
pub mod types;
pub mod vm;

#[cfg(test)]
mod tests;

// Re-export commonly used items
pub use costs::CostModel;
pub use exec_loop::{run_until_paused, step};
pub use expressions::eval_expr;
pub use flight::{initialize, FlightState};
pub use modes::{ModeStack, LOW_BATTERY_EVENT};
pub use program::Program;
pub use type_checker::{check_expr, check_stmt, typecheck};
pub use types::{Action, ActionKind, Expr, Mode, Stmt, Value, ValueType, Variable};
pub use vm::{Step, VM};
