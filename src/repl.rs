//! Interactive session
//!
//! Reads one command per line and drives a paused VM. Errors from the VM are
//! reported on the output and the session keeps going.

use crate::interpreter::VM;
use std::io::{self, BufRead, Write};
use std::time::Instant;
use tracing::{error, warn};

const PROMPT: &str = "MO> ";
const OUT: &str = "MO-out>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Help,
    Message,
    Info,
    Continue,
    Exit,
}

struct CommandSpec {
    command: Command,
    name: &'static str,
    help: &'static str,
    parameter: Option<&'static str>,
}

const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        command: Command::Help,
        name: "help",
        help: "Lists the available commands",
        parameter: None,
    },
    CommandSpec {
        command: Command::Message,
        name: "message",
        help: "Send a message to the active mode",
        parameter: Some("The message to send"),
    },
    CommandSpec {
        command: Command::Info,
        name: "info",
        help: "Prints the flight state and the active modes",
        parameter: None,
    },
    CommandSpec {
        command: Command::Continue,
        name: "continue",
        help: "Resume a paused run without a message",
        parameter: None,
    },
    CommandSpec {
        command: Command::Exit,
        name: "exit",
        help: "Exits the session",
        parameter: None,
    },
];

pub struct Repl<'a> {
    vm: &'a mut VM,
    terminating: bool,
}

impl<'a> Repl<'a> {
    pub fn new(vm: &'a mut VM) -> Self {
        Self {
            vm,
            terminating: false,
        }
    }

    pub fn is_terminating(&self) -> bool {
        self.terminating
    }

    /// Read commands until `exit` or end of input
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut out: W) -> io::Result<()> {
        writeln!(out, "Welcome to the AeroScript REPL!")?;
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        for line in input.lines() {
            let line = line?;
            if !line.trim().is_empty() {
                self.command(&line, &mut out)?;
            }
            if self.terminating {
                break;
            }
            write!(out, "{}", PROMPT)?;
            out.flush()?;
        }
        Ok(())
    }

    /// Execute one command line. Returns whether a command ran successfully.
    pub fn command<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<bool> {
        let start = Instant::now();
        let (name, param) = match line.trim().split_once(char::is_whitespace) {
            Some((name, param)) => (name, param.trim()),
            None => (line.trim(), ""),
        };

        let result = match COMMANDS.iter().find(|spec| spec.name == name) {
            None => {
                writeln!(
                    out,
                    "{} Unknown command: {}. Type \"help\" to get a list of available commands",
                    OUT, name
                )?;
                false
            }
            Some(spec) if spec.parameter.is_some() && param.is_empty() => {
                writeln!(
                    out,
                    "{} {} requires a parameter: {}",
                    OUT,
                    spec.name,
                    spec.parameter.unwrap_or_default()
                )?;
                false
            }
            Some(spec) => self.dispatch(spec.command, param, out)?,
        };

        writeln!(
            out,
            "{} Command executed in {:.3} seconds",
            OUT,
            start.elapsed().as_secs_f32()
        )?;
        Ok(result)
    }

    fn dispatch<W: Write>(&mut self, command: Command, param: &str, out: &mut W) -> io::Result<bool> {
        match command {
            Command::Help => {
                for spec in COMMANDS {
                    writeln!(out, "{:>11} - {}", spec.name, spec.help)?;
                    if let Some(parameter) = spec.parameter {
                        writeln!(out, "{:>14} <{}>", "", parameter)?;
                    }
                }
                Ok(true)
            }

            Command::Message => {
                let result = self.vm.inject_message(param);
                self.report(result, out)
            }

            Command::Continue => {
                if !self.vm.is_paused() {
                    writeln!(out, "{} Nothing to resume", OUT)?;
                    return Ok(false);
                }
                let result = self.vm.resume();
                self.report(result, out)
            }

            Command::Info => {
                let (x, y) = self.vm.current_position();
                writeln!(out, "{} Position: ({}, {})", OUT, x, y)?;
                writeln!(out, "{} Altitude: {}", OUT, self.vm.current_altitude())?;
                writeln!(out, "{} Battery level: {}", OUT, self.vm.current_battery())?;
                writeln!(out, "{} Distance travelled: {}", OUT, self.vm.distance_travelled())?;
                writeln!(out, "{} Active modes: {}", OUT, self.vm.modes.ids().join(" > "))?;
                writeln!(out, "{} Pending statements: {}", OUT, self.vm.stack.len())?;
                Ok(true)
            }

            Command::Exit => {
                writeln!(out, "Terminating the REPL")?;
                self.terminating = true;
                Ok(true)
            }
        }
    }

    fn report<W: Write>(
        &mut self,
        result: crate::error::Result<Vec<String>>,
        out: &mut W,
    ) -> io::Result<bool> {
        match result {
            Ok(executed) => {
                if !executed.is_empty() {
                    writeln!(out, "{} Executed: {}", OUT, executed.join(", "))?;
                }
                Ok(true)
            }
            Err(err) => {
                if err.is_recoverable() {
                    warn!(error = %err, "Command rejected");
                } else {
                    error!(error = %err, "Command failed");
                }
                writeln!(out, "{} Error: {}", OUT, err)?;
                Ok(false)
            }
        }
    }
}
