//! Type definitions for the interpreter
//!
//! - AST nodes (Expr, Stmt, Action, Mode, Callback)
//! - Runtime values (Value, ValueType)
//! - Flight state accessors (Variable)

pub mod ast;
pub mod values;
pub mod variables;

pub use ast::{Action, ActionKind, Callback, CallbackOp, Expr, Mode, Stmt};
pub use values::{Value, ValueType};
pub use variables::Variable;
