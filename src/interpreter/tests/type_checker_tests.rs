//! Tests for static type checking

use super::helpers::{build_vm, check_and_run};
use crate::error::Error;
use crate::interpreter::type_checker::arithmetic_result;
use crate::interpreter::{
    check_expr, check_stmt, typecheck, Action, ActionKind, Expr, Mode, Program, Stmt, ValueType,
    Variable,
};

fn num(v: f32) -> Expr {
    Expr::number(v)
}

fn point(x: f32, y: f32) -> Expr {
    Expr::point(num(x), num(y))
}

/* ===================== Expressions ===================== */

#[test]
fn test_arithmetic_types() {
    assert_eq!(
        check_expr(&Expr::add(num(1.0), num(2.0))).unwrap(),
        ValueType::Number
    );
    assert_eq!(
        check_expr(&Expr::mul(point(1.0, 2.0), num(2.0))).unwrap(),
        ValueType::Point
    );
    assert_eq!(
        check_expr(&Expr::sub(num(2.0), point(1.0, 2.0))).unwrap(),
        ValueType::Point
    );
    assert_eq!(
        check_expr(&Expr::add(point(1.0, 2.0), point(3.0, 4.0))).unwrap(),
        ValueType::Point
    );
}

#[test]
fn test_range_operands_are_incompatible() {
    assert_eq!(arithmetic_result(ValueType::Range, ValueType::Number), None);
    assert_eq!(arithmetic_result(ValueType::Point, ValueType::Range), None);
    assert_eq!(arithmetic_result(ValueType::Range, ValueType::Range), None);
}

#[test]
fn test_variables_have_fixed_types() {
    assert_eq!(
        check_expr(&Expr::var(Variable::CurrentPosition)).unwrap(),
        ValueType::Point
    );
    assert_eq!(
        check_expr(&Expr::var(Variable::BatteryLevel)).unwrap(),
        ValueType::Number
    );
    assert_eq!(
        check_expr(&Expr::add(Expr::var(Variable::InitialPosition), num(1.0))).unwrap(),
        ValueType::Point
    );
}

#[test]
fn test_nested_point_is_rejected() {
    let expr = Expr::add(num(1.0), Expr::point(point(1.0, 2.0), num(3.0)));
    assert!(matches!(
        check_expr(&expr),
        Err(Error::InvalidExpressionShape(_))
    ));
}

#[test]
fn test_random_requires_numbers() {
    assert_eq!(check_expr(&Expr::random_unit()).unwrap(), ValueType::Number);
    let expr = Expr::random(point(0.0, 1.0), num(3.0));
    assert!(matches!(check_expr(&expr), Err(Error::Type(_))));
}

#[test]
fn test_negation_keeps_type() {
    assert_eq!(
        check_expr(&Expr::negate(point(1.0, 2.0))).unwrap(),
        ValueType::Point
    );
    assert_eq!(
        check_expr(&Expr::negate(Expr::var(Variable::Altitude))).unwrap(),
        ValueType::Number
    );
}

/* ===================== Actions ===================== */

fn check_action(action: Action) -> crate::error::Result<()> {
    check_stmt(&Stmt::Action(action))
}

#[test]
fn test_move_accepts_numbers_and_points() {
    assert!(check_action(Action::move_by(num(10.0))).is_ok());
    assert!(check_action(Action::move_by(point(3.0, 4.0))).is_ok());
    assert!(check_action(Action::dock()).is_ok());
    assert!(check_action(Action::descend_to_ground()).is_ok());
}

#[test]
fn test_altitude_and_turn_reject_points() {
    let cases = [
        Action::ascend(point(1.0, 1.0)),
        Action::turn_right(point(0.0, 90.0)),
        Action::turn_left(Expr::var(Variable::CurrentPosition)),
        Action::new(ActionKind::AscendDescend, Expr::var(Variable::InitialPosition)),
    ];
    for action in cases {
        let display = action.to_string();
        assert!(
            matches!(check_action(action), Err(Error::Type(_))),
            "{} should not type check",
            display
        );
    }
}

#[test]
fn test_speed_and_duration_must_be_numbers() {
    let action = Action::move_by(num(1.0)).with_speed(point(1.0, 1.0));
    assert!(matches!(check_action(action), Err(Error::Type(_))));

    let action = Action::turn_right(num(1.0)).with_duration(Expr::var(Variable::CurrentPosition));
    assert!(matches!(check_action(action), Err(Error::Type(_))));

    let action = Action::ascend(num(1.0))
        .with_speed(Expr::random(num(1.0), num(2.0)))
        .with_duration(Expr::mul(num(2.0), Expr::var(Variable::BatteryLevel)));
    assert!(check_action(action).is_ok());
}

/* ===================== Programs ===================== */

#[test]
fn test_non_entry_modes_are_checked_too() {
    let program = Program::from_modes(vec![
        Mode::new("Start").entry().action(Action::move_by(num(1.0))),
        Mode::new("Never").action(Action::ascend(point(1.0, 2.0))),
    ]);
    assert!(matches!(typecheck(&program), Err(Error::Type(_))));
}

#[test]
fn test_nested_submodes_are_checked() {
    let inner = Mode::new("Inner").action(Action::turn_right(point(1.0, 2.0)));
    let program = Program::from_modes(vec![Mode::new("Outer").entry().submode(inner)]);
    assert!(matches!(typecheck(&program), Err(Error::Type(_))));
}

#[test]
fn test_ill_typed_program_never_runs() {
    let program = Program::from_modes(vec![Mode::new("Start")
        .entry()
        .action(Action::move_by(num(10.0)))
        .action(Action::turn_left(point(1.0, 1.0)))]);
    let mut vm = build_vm(100.0);

    assert!(check_and_run(&mut vm, &program).is_err());
    assert_eq!(vm.current_battery(), 100.0);
    assert_eq!(vm.current_position(), (0.0, 0.0));
    assert!(vm.executed().is_empty());
}

#[test]
fn test_well_typed_program_passes() {
    let program = Program::from_modes(vec![
        Mode::new("Takeoff")
            .entry()
            .action(Action::ascend(num(10.0)))
            .then("Survey"),
        Mode::new("Survey")
            .action(Action::move_by(Expr::add(Expr::var(Variable::CurrentPosition), point(1.0, 1.0))))
            .action(Action::dock()),
    ]);
    assert!(typecheck(&program).is_ok());
}
