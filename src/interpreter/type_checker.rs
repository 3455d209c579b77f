//! Static type checking
//!
//! Runs over the whole program before the VM executes anything. Every
//! operand combination the evaluator cannot handle is rejected here, so a
//! checked program can only fail at runtime on battery or mode lookups.
//!
//! # Arithmetic compatibility
//!
//! | left \ right | Number | Point | Range |
//! |--------------|--------|-------|-------|
//! | Number       | Number | Point | -     |
//! | Point        | Point  | Point | -     |
//! | Range        | -      | -     | -     |

use super::program::Program;
use super::types::{Action, ActionKind, Expr, Mode, Stmt, ValueType};
use crate::error::{Error, Result, TypeError};
use tracing::debug;

/// Check an entire program
pub fn typecheck(program: &Program) -> Result<()> {
    debug!("Type checking program");
    check_mode(program.root())
}

/// Compute the static type of an expression
pub fn check_expr(expr: &Expr) -> Result<ValueType> {
    match expr {
        Expr::Number { .. } => Ok(ValueType::Number),

        Expr::VariableRef { var } => Ok(var.value_type()),

        Expr::Negate { inner } => match check_expr(inner)? {
            ValueType::Range => Ok(ValueType::Point),
            other => Ok(other),
        },

        Expr::Add { left, right } | Expr::Sub { left, right } | Expr::Mul { left, right } => {
            let l = check_expr(left)?;
            let r = check_expr(right)?;
            arithmetic_result(l, r).ok_or_else(|| {
                TypeError::new(format!("incompatible arithmetic on {} and {}", l, r)).into()
            })
        }

        Expr::RandomRange { lo, hi } => {
            let l = check_expr(lo)?;
            let r = check_expr(hi)?;
            if l != ValueType::Number || r != ValueType::Number {
                return Err(TypeError::new("random ranges take only Numbers").into());
            }
            Ok(ValueType::Number)
        }

        Expr::PointConstruct { x, y } => {
            let l = check_expr(x)?;
            let r = check_expr(y)?;
            if l == ValueType::Point || r == ValueType::Point {
                return Err(Error::InvalidExpressionShape(
                    "nested points are not supported".to_string(),
                ));
            }
            if l != ValueType::Number || r != ValueType::Number {
                return Err(TypeError::new(format!(
                    "point components must be Numbers, got {} and {}",
                    l, r
                ))
                .into());
            }
            Ok(ValueType::Point)
        }
    }
}

/// Check a statement (recursing into modes)
pub fn check_stmt(stmt: &Stmt) -> Result<()> {
    match stmt {
        Stmt::Action(action) => check_action(action),
        Stmt::Mode(mode) => check_mode(mode),
        Stmt::Callback(_) => Ok(()),
    }
}

/// Result type of `+ - *` on the two operand types, if compatible
pub fn arithmetic_result(left: ValueType, right: ValueType) -> Option<ValueType> {
    use ValueType::*;
    match (left, right) {
        (Number, Number) => Some(Number),
        (Point, Point) | (Point, Number) | (Number, Point) => Some(Point),
        _ => None,
    }
}

/* ===================== Internals ===================== */

fn check_action(action: &Action) -> Result<()> {
    expect_type(&action.speed, &[ValueType::Number])?;
    expect_type(&action.duration, &[ValueType::Number])?;
    match action.kind {
        ActionKind::Move => expect_type(&action.data, &[ValueType::Number, ValueType::Point]),
        ActionKind::Turn | ActionKind::AscendDescend => {
            expect_type(&action.data, &[ValueType::Number])
        }
    }
}

fn check_mode(mode: &Mode) -> Result<()> {
    debug!(mode = %mode.id, "Checking mode");
    for stmt in &mode.body {
        check_stmt(stmt)?;
    }
    for submode in mode.submodes.values() {
        check_mode(submode)?;
    }
    Ok(())
}

fn expect_type(expr: &Expr, expected: &[ValueType]) -> Result<()> {
    let actual = check_expr(expr)?;
    if expected.contains(&actual) {
        return Ok(());
    }
    let expected = expected
        .iter()
        .map(ValueType::to_string)
        .collect::<Vec<_>>()
        .join(" or ");
    Err(TypeError::new(format!("expression '{}' is not a {}", expr, expected)).into())
}
