//! Mode stack and interrupt dispatch
//!
//! The innermost active mode owns the reaction and message tables that are
//! consulted. An interrupt leaves that mode, drops every pending statement and
//! activates the target mode, resolved in the scope of the mode underneath.

use super::statements::activate_mode;
use super::types::Mode;
use super::vm::VM;
use crate::error::{Error, Result};
use std::rc::Rc;
use tracing::{debug, info, warn};

/// Event name of the reaction fired when the battery runs low
pub const LOW_BATTERY_EVENT: &str = "low battery";

/* ===================== Mode Stack ===================== */

#[derive(Debug, Clone, Default)]
pub struct ModeStack {
    modes: Vec<Rc<Mode>>,
}

impl ModeStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, mode: Rc<Mode>) {
        debug!(mode = %mode.id, depth = self.modes.len() + 1, "Entering mode");
        self.modes.push(mode);
    }

    pub fn pop(&mut self) -> Option<Rc<Mode>> {
        let mode = self.modes.pop();
        if let Some(mode) = &mode {
            debug!(mode = %mode.id, depth = self.modes.len(), "Exiting mode");
        }
        mode
    }

    pub fn top(&self) -> Option<&Rc<Mode>> {
        self.modes.last()
    }

    pub fn depth(&self) -> usize {
        self.modes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }

    pub fn clear(&mut self) {
        self.modes.clear();
    }

    /// Ids from outermost to innermost
    pub fn ids(&self) -> Vec<&str> {
        self.modes.iter().map(|m| m.id.as_str()).collect()
    }

    /// Resolve a mode id in the scope of the innermost mode
    pub fn resolve(&self, id: &str) -> Result<Rc<Mode>> {
        self.top()
            .and_then(|scope| scope.submodes.get(id))
            .cloned()
            .ok_or_else(|| Error::UnknownModeReference {
                id: id.to_string(),
                scope: self.scope_name(),
            })
    }

    pub fn reaction(&self, event: &str) -> Option<&str> {
        self.top()?.reactions.get(event).map(String::as_str)
    }

    pub fn message(&self, name: &str) -> Option<&str> {
        self.top()?.messages.get(name).map(String::as_str)
    }

    pub fn scope_name(&self) -> String {
        match self.top() {
            Some(mode) => format!("mode '{}'", mode.id),
            None => "an empty mode stack".to_string(),
        }
    }
}

/* ===================== Dispatch ===================== */

/// Fire the low battery reaction if the charge is under the threshold
///
/// Returns whether an interrupt took place. Without a matching reaction the
/// low level is only advisory.
pub fn check_battery_level(vm: &mut VM) -> Result<bool> {
    let battery = vm.flight.battery();
    if battery >= vm.engine.low_battery_threshold {
        return Ok(false);
    }

    warn!(battery, threshold = vm.engine.low_battery_threshold, "Low battery");
    match vm.modes.reaction(LOW_BATTERY_EVENT).map(str::to_owned) {
        Some(target) => {
            info!(target = %target, "Reacting to low battery");
            interrupt(vm, &target)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Handle an externally injected message
///
/// Looks in the message table of the active mode first, then in its reaction
/// table. Does not restart the run loop.
pub fn receive_message(vm: &mut VM, name: &str) -> Result<()> {
    info!(message = name, "Received message");
    let target = vm
        .modes
        .message(name)
        .or_else(|| vm.modes.reaction(name))
        .map(str::to_owned);

    match target {
        Some(target) => interrupt(vm, &target),
        None => {
            warn!(message = name, scope = %vm.modes.scope_name(), "Unrecognized message");
            Err(Error::UnrecognizedMessage {
                name: name.to_string(),
                mode: vm.modes.scope_name(),
            })
        }
    }
}

/// Leave the active mode, drop all pending work and jump to `target`
fn interrupt(vm: &mut VM, target: &str) -> Result<()> {
    let left = vm.modes.pop();
    let mode = vm.modes.resolve(target).map_err(|err| {
        // Keep the mode stack intact when the jump cannot happen
        if let Some(left) = &left {
            vm.modes.push(Rc::clone(left));
        }
        err
    })?;

    info!(
        from = left.as_ref().map(|m| m.id.as_str()).unwrap_or("-"),
        to = %mode.id,
        dropped = vm.stack.len(),
        "Interrupting"
    );

    vm.stack.clear();
    activate_mode(vm, &mode)
}
