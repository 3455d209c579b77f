//! Core execution loop
//!
//! 1. run_until_paused() - Top-level driver (calls step repeatedly)
//! 2. step() - Pops one statement and dispatches it

use super::statements::{activate_mode, execute_action, execute_callback};
use super::types::Stmt;
use super::vm::{Step, VM};
use crate::error::Result;
use tracing::{debug, error};

/* ===================== Public API ===================== */

/// Run the VM until the stack is empty or execution pauses
///
/// Returns the ids of the modes activated during this run. Calling it again
/// after new statements were pushed (or after a resume) picks up where it
/// stopped.
pub fn run_until_paused(vm: &mut VM) -> Result<Vec<String>> {
    let start = vm.executed().len();
    loop {
        match step(vm) {
            Ok(Step::Continue) => continue,
            Ok(Step::Done) => break,
            Err(err) => {
                error!(error = %err, "Execution failed");
                if vm.interactive {
                    // Leave the remaining work resumable
                    vm.flight.pause();
                }
                return Err(err);
            }
        }
    }
    debug!(
        pending = vm.stack.len(),
        running = vm.is_running(),
        "Run halted"
    );
    Ok(vm.executed()[start..].to_vec())
}

/// Execute one statement from the top of the continuation stack
pub fn step(vm: &mut VM) -> Result<Step> {
    if !vm.is_running() {
        return Ok(Step::Done);
    }

    let Some(stmt) = vm.stack.pop() else {
        // Nothing left - execution complete
        return Ok(Step::Done);
    };

    match stmt {
        Stmt::Action(action) => execute_action(vm, &action)?,

        Stmt::Mode(mode) => {
            vm.record_execution(&mode.id);
            activate_mode(vm, &mode)?;
        }

        Stmt::Callback(callback) => execute_callback(vm, callback)?,
    }

    Ok(Step::Continue)
}
