use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::init::from_config;
use crate::interpreter::{typecheck, Program};
use crate::repl::Repl;

#[derive(Parser)]
#[command(name = "aeroscript")]
#[command(about = "AeroScript - run mode-based vehicle missions", long_about = None)]
pub struct Cli {
    /// Path to config file (overrides default search)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Type check and run a parsed program
    Run {
        /// Program tree as JSON
        program: PathBuf,

        /// Initial battery level
        #[arg(short = 'b', long = "battery")]
        battery: Option<f32>,

        /// Initial position
        #[arg(short = 'p', long = "position", num_args = 2, value_names = ["X", "Y"], allow_negative_numbers = true)]
        position: Option<Vec<f32>>,

        /// Initial altitude
        #[arg(short = 'a', long = "altitude", allow_negative_numbers = true)]
        altitude: Option<f32>,

        /// Pause between modes and read commands from stdin
        #[arg(long)]
        repl: bool,
    },

    /// Type check a parsed program without running it
    Check {
        /// Program tree as JSON
        program: PathBuf,
    },

    /// Print the effective configuration
    Config,
}

/// Run the CLI by parsing process arguments
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    run_cli_with_args(cli)
}

fn run_cli_with_args(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Run {
            program,
            battery,
            position,
            altitude,
            repl,
        } => {
            let position = position.map(|p| (p[0], p[1]));
            let config = Config::builder()
                .config_path(cli.config)
                .battery(battery)
                .altitude(altitude)
                .position(position)
                .build()
                .context("Failed to load configuration")?;

            let program = load_program(&program)?;
            typecheck(&program).context("Program failed type checking")?;

            let mut vm = from_config(&config, repl);
            let initial_position = vm.current_position();
            let initial_battery = vm.current_battery();

            if repl {
                vm.run_program_interactive(&program)
                    .context("Program failed before the first pause")?;
                let stdin = io::stdin();
                Repl::new(&mut vm).run(stdin.lock(), io::stdout())?;
            } else {
                let executed = vm.run_program(&program).context("Program aborted")?;
                println!("Executed modes: {}", executed.join(", "));
            }

            println!("Initial Position: {:?}", initial_position);
            println!("Initial Battery level: {}", initial_battery);
            println!("Final Position: {:?}", vm.current_position());
            println!("Final Battery level: {}", vm.current_battery());
            println!("Distance travelled: {}", vm.distance_travelled());
            println!("Execution complete!");
        }

        Commands::Check { program } => {
            let program = load_program(&program)?;
            typecheck(&program).context("Program failed type checking")?;
            println!("{} modes, no type errors", program.mode_count());
        }

        Commands::Config => {
            let config = Config::builder()
                .config_path(cli.config)
                .build()
                .context("Failed to load configuration")?;
            print!("{}", config.to_toml()?);
        }
    }

    Ok(())
}

fn load_program(path: &Path) -> Result<Program> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read program {}", path.display()))?;
    Program::from_json(&source).with_context(|| format!("Failed to parse program {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_flags() {
        let cli = Cli::try_parse_from([
            "aeroscript", "run", "mission.json", "-b", "500", "-p", "1", "-2", "-a", "3", "--repl",
        ])
        .unwrap();

        let Commands::Run {
            program,
            battery,
            position,
            altitude,
            repl,
        } = cli.command
        else {
            unreachable!("Expected run command");
        };
        assert_eq!(program, PathBuf::from("mission.json"));
        assert_eq!(battery, Some(500.0));
        assert_eq!(position, Some(vec![1.0, -2.0]));
        assert_eq!(altitude, Some(3.0));
        assert!(repl);
    }

    #[test]
    fn test_position_requires_two_values() {
        let result = Cli::try_parse_from(["aeroscript", "run", "mission.json", "-p", "1"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::try_parse_from(["aeroscript", "check", "mission.json", "--config", "a.toml"])
            .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("a.toml")));
        assert!(matches!(cli.command, Commands::Check { .. }));
    }
}
