//! Statement execution handlers
//!
//! Each statement popped off the continuation stack is dispatched to one of
//! these handlers.

use super::costs::Effect;
use super::expressions::eval_expr;
use super::modes::check_battery_level;
use super::types::{Action, Callback, CallbackOp, Mode, Stmt, Value};
use super::vm::VM;
use crate::error::{Result, TypeError};
use std::rc::Rc;
use tracing::{debug, info};

/// Execute an action: price it, charge the battery, update telemetry, then
/// give the low battery reaction a chance to interrupt
pub fn execute_action(vm: &mut VM, action: &Action) -> Result<()> {
    vm.flight.check_invariants()?;

    let speed = number(eval_expr(&action.speed, &vm.flight)?, "speed")?;
    let duration = number(eval_expr(&action.duration, &vm.flight)?, "duration")?;
    let data = eval_expr(&action.data, &vm.flight)?;

    let plan = vm
        .engine
        .costs
        .plan(action.kind, data, speed, duration, vm.flight.position())
        .ok_or_else(|| {
            TypeError::new(format!("{:?} cannot take {} as data", action.kind, data.value_type()))
        })?;

    debug!(kind = ?action.kind, data = %data, cost = plan.cost, "Act");
    vm.flight.consume(plan.cost)?;

    match plan.effect {
        Effect::MoveTo { target, distance } => vm.flight.move_to(target, distance),
        Effect::Turn => {}
        Effect::Altitude { delta } => vm.flight.change_altitude(delta),
    }

    check_battery_level(vm)?;
    Ok(())
}

/// Schedule a mode activation
///
/// Pushes, from bottom to top: the chained successor (resolved in the
/// enclosing scope), the exit callback, the body in reverse, and the enter
/// callback. The body therefore runs in order inside the mode, and the
/// successor runs once the mode has been left.
pub fn activate_mode(vm: &mut VM, mode: &Rc<Mode>) -> Result<()> {
    info!(mode = %mode.id, "Execute");

    if let Some(next) = &mode.next {
        let successor = vm.modes.resolve(next)?;
        vm.push_stmt(Stmt::Mode(successor));
    }

    vm.push_stmt(Stmt::Callback(Callback::exit()));
    vm.push_all_reversed(&mode.body);
    vm.push_stmt(Stmt::Callback(Callback::enter(Rc::clone(mode))));
    Ok(())
}

/// Run a deferred bookkeeping callback
pub fn execute_callback(vm: &mut VM, callback: Callback) -> Result<()> {
    debug!(label = callback.label, "Running callback");
    match callback.op {
        CallbackOp::EnterMode(mode) => vm.modes.push(mode),

        CallbackOp::ExitMode if vm.interactive => {
            // Breakpoint between modes: the mode stays active until resumed
            info!(mode = %vm.modes.scope_name(), "Pausing before leaving");
            vm.flight.pause();
            vm.push_stmt(Stmt::Callback(Callback::pop_on_resume()));
        }

        CallbackOp::ExitMode | CallbackOp::PopMode => {
            vm.modes.pop();
        }
    }
    Ok(())
}

fn number(value: Value, what: &str) -> Result<f32> {
    value.as_number().ok_or_else(|| {
        TypeError::new(format!("{} must be a Number, got {}", what, value.value_type())).into()
    })
}
