//! Expression evaluation
//!
//! Pure recursive evaluation. The only state touched is the flight state,
//! read through `VariableRef` accessors.

use super::flight::FlightState;
use super::types::{Expr, Value};
use crate::error::{Error, Result, TypeError};
use rand::Rng;
use std::cmp::Ordering;

/// Evaluate an expression to a value
///
/// Returns:
/// - Ok(Value) on success
/// - Err on an operand combination the type checker should have rejected,
///   a nested point, or an empty random interval
pub fn eval_expr(expr: &Expr, flight: &FlightState) -> Result<Value> {
    match expr {
        Expr::Number { v } => Ok(Value::Number(*v)),

        Expr::VariableRef { var } => Ok(var.read(flight)),

        Expr::Negate { inner } => Ok(negate(eval_expr(inner, flight)?)),

        Expr::Add { left, right } => add(eval_expr(left, flight)?, eval_expr(right, flight)?),

        Expr::Sub { left, right } => sub(eval_expr(left, flight)?, eval_expr(right, flight)?),

        Expr::Mul { left, right } => mul(eval_expr(left, flight)?, eval_expr(right, flight)?),

        Expr::RandomRange { lo, hi } => {
            let lo = number_operand(eval_expr(lo, flight)?, "random")?;
            let hi = number_operand(eval_expr(hi, flight)?, "random")?;
            sample(lo, hi)
        }

        Expr::PointConstruct { x, y } => {
            let x = point_component(eval_expr(x, flight)?)?;
            let y = point_component(eval_expr(y, flight)?)?;
            Ok(Value::Point(x, y))
        }
    }
}

/* ===================== Operators ===================== */

/// Unary minus. A range negates into a point of its negated bounds.
pub fn negate(value: Value) -> Value {
    match value {
        Value::Number(n) => Value::Number(-n),
        Value::Point(x, y) => Value::Point(-x, -y),
        Value::Range(start, end) => Value::Point(-start, -end),
    }
}

pub fn add(left: Value, right: Value) -> Result<Value> {
    arithmetic("+", left, right, |a, b| a + b)
}

pub fn sub(left: Value, right: Value) -> Result<Value> {
    arithmetic("-", left, right, |a, b| a - b)
}

pub fn mul(left: Value, right: Value) -> Result<Value> {
    arithmetic("*", left, right, |a, b| a * b)
}

/// Component-wise arithmetic with Number broadcast on either side
fn arithmetic(op: &str, left: Value, right: Value, f: impl Fn(f32, f32) -> f32) -> Result<Value> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(f(a, b))),
        (Value::Point(ax, ay), Value::Point(bx, by)) => Ok(Value::Point(f(ax, bx), f(ay, by))),
        (Value::Point(x, y), Value::Number(n)) => Ok(Value::Point(f(x, n), f(y, n))),
        (Value::Number(n), Value::Point(x, y)) => Ok(Value::Point(f(n, x), f(n, y))),
        (l, r) => Err(TypeError::new(format!(
            "incompatible arithmetic on {} {} {}",
            l.value_type(),
            op,
            r.value_type()
        ))
        .into()),
    }
}

/* ===================== Helpers ===================== */

fn sample(lo: f32, hi: f32) -> Result<Value> {
    if lo.partial_cmp(&hi) != Some(Ordering::Less) {
        return Err(Error::InvalidExpressionShape(format!(
            "random interval [{}, {}) is empty",
            lo, hi
        )));
    }
    // The sampler needs a finite span
    if !(lo.is_finite() && hi.is_finite() && (hi - lo).is_finite()) {
        return Err(Error::InvalidExpressionShape(format!(
            "random interval [{}, {}) is too wide to sample",
            lo, hi
        )));
    }
    Ok(Value::Number(rand::thread_rng().gen_range(lo..hi)))
}

fn number_operand(value: Value, context: &str) -> Result<f32> {
    value.as_number().ok_or_else(|| {
        TypeError::new(format!(
            "{} takes only Numbers, got {}",
            context,
            value.value_type()
        ))
        .into()
    })
}

fn point_component(value: Value) -> Result<f32> {
    match value {
        Value::Number(n) => Ok(n),
        Value::Point(..) => Err(Error::InvalidExpressionShape(
            "nested points are not supported".to_string(),
        )),
        other => Err(TypeError::new(format!(
            "point components must be Numbers, got {}",
            other.value_type()
        ))
        .into()),
    }
}
