//! Virtual Machine state
//!
//! The VM holds all execution state:
//! - stack: Continuation stack of pending statements
//! - modes: Stack of active modes
//! - flight: Telemetry of the vehicle, including the running flag

use super::exec_loop::run_until_paused;
use super::flight::FlightState;
use super::modes::{receive_message, ModeStack};
use super::program::Program;
use super::statements::activate_mode;
use super::types::Stmt;
use crate::config::EngineConfig;
use crate::error::Result;
use tracing::{debug, info};

/* ===================== VM ===================== */

#[derive(Debug)]
pub struct VM {
    /// Continuation stack, top is the last element
    pub stack: Vec<Stmt>,

    /// Active modes, innermost last
    pub modes: ModeStack,

    pub flight: FlightState,

    pub engine: EngineConfig,

    /// Pause between modes so messages can be injected
    pub interactive: bool,

    /// Every mode activation popped off the stack, across runs
    executed: Vec<String>,

    first_mode: Option<String>,
}

impl VM {
    pub fn new(flight: FlightState, engine: EngineConfig) -> Self {
        Self {
            stack: Vec::new(),
            modes: ModeStack::new(),
            flight,
            engine,
            interactive: false,
            executed: Vec::new(),
            first_mode: None,
        }
    }

    /* ===================== Entry Points ===================== */

    /// Run a program autonomously until nothing is left to do
    ///
    /// Returns the ids of the modes activated from the stack, in order. The
    /// root program mode is not counted.
    pub fn run_program(&mut self, program: &Program) -> Result<Vec<String>> {
        info!(modes = program.mode_count(), "Running program");
        self.interactive = false;
        self.start(program)?;
        let executed = run_until_paused(self)?;
        info!(
            executed = executed.len(),
            battery = self.flight.battery(),
            "Program finished"
        );
        Ok(executed)
    }

    /// Run a program until the first pause between modes
    pub fn run_program_interactive(&mut self, program: &Program) -> Result<Vec<String>> {
        info!(modes = program.mode_count(), "Running program interactively");
        self.interactive = true;
        self.start(program)?;
        run_until_paused(self)
    }

    /// Interrupt the active mode with a named message and run until the next
    /// pause
    pub fn inject_message(&mut self, name: &str) -> Result<Vec<String>> {
        receive_message(self, name)?;
        self.flight.resume();
        run_until_paused(self)
    }

    /// Continue a paused run without sending a message
    pub fn resume(&mut self) -> Result<Vec<String>> {
        info!("Resuming");
        self.flight.resume();
        run_until_paused(self)
    }

    fn start(&mut self, program: &Program) -> Result<()> {
        self.stack.clear();
        self.modes.clear();
        self.first_mode = program.first_mode().map(str::to_owned);
        self.flight.resume();
        activate_mode(self, program.root())
    }

    /* ===================== Stack Management ===================== */

    pub fn push_stmt(&mut self, stmt: Stmt) {
        debug!(stmt = %stmt, "Pushed");
        self.stack.push(stmt);
    }

    /// Push statements so that the first one ends up on top
    pub fn push_all_reversed(&mut self, stmts: &[Stmt]) {
        for stmt in stmts.iter().rev() {
            self.push_stmt(stmt.clone());
        }
    }

    pub(crate) fn record_execution(&mut self, id: &str) {
        self.executed.push(id.to_string());
    }

    /* ===================== Telemetry ===================== */

    pub fn current_position(&self) -> (f32, f32) {
        self.flight.position()
    }

    pub fn current_altitude(&self) -> f32 {
        self.flight.altitude()
    }

    pub fn current_battery(&self) -> f32 {
        self.flight.battery()
    }

    pub fn distance_travelled(&self) -> f32 {
        self.flight.distance()
    }

    pub fn is_running(&self) -> bool {
        self.flight.is_running()
    }

    /// Whether a paused run still has work scheduled
    pub fn is_paused(&self) -> bool {
        !self.flight.is_running() && !self.stack.is_empty()
    }

    pub fn first_mode(&self) -> Option<&str> {
        self.first_mode.as_deref()
    }

    pub fn active_mode(&self) -> Option<&str> {
        self.modes.top().map(|m| m.id.as_str())
    }

    pub fn executed(&self) -> &[String] {
        &self.executed
    }
}

/* ===================== Step Result ===================== */

/// Result of executing one step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Continue to next step
    Continue,
    /// Stack exhausted or execution paused
    Done,
}
