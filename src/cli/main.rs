//! Command-line interface entry point for `UniTrack`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use unitrack::config::Config;
use unitrack::core::models::TargetInput;
use unitrack::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};
use unitrack::{debug, info};

fn main() {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag overrides config logging.level; fallback warn
    let effective_level = args
        .log_level
        .map(Level::from)
        .or_else(|| Level::parse(&config.logging.level))
        .unwrap_or(Level::Warn);

    let mut level = effective_level;
    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    // CLI flag wins, otherwise use config logging.file if set
    let config_log_path: Option<std::path::PathBuf> = if config.logging.file.is_empty() {
        None
    } else {
        Some(std::path::PathBuf::from(&config.logging.file))
    };

    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        let display_path = log_path.to_string_lossy();
        if init_file_logging(log_path) {
            info!("File logging initialized at: {display_path}");
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    let result = match args.command {
        Command::Config { subcommand } => commands::config::run(subcommand, &mut config, &defaults),
        Command::Extract {
            input,
            output,
            import,
            matcher,
        } => commands::extract::run(&input, output.as_ref(), import, matcher.as_deref(), &config),
        Command::Import { input } => commands::import::run_import(&input, &config),
        Command::Export { output } => commands::import::run_export(output.as_ref(), &config),
        Command::Gpa { action } => commands::gpa::run(action, &config),
        Command::Cgpa { action } => commands::cgpa::run(action, &config),
        Command::Attendance { action } => commands::attendance::run(action, &config),
        Command::Target {
            current,
            completed,
            target,
            next,
            reset,
        } => {
            let fields = TargetInput {
                current_cgpa: current.unwrap_or_default(),
                completed_credits: completed.unwrap_or_default(),
                target_cgpa: target.unwrap_or_default(),
                next_sem_credits: next.unwrap_or_default(),
            };
            commands::target::run(fields, reset, &config)
        }
        Command::Dashboard => commands::dashboard::run(&config),
        Command::Reset { yes } => commands::reset_all(&config, yes),
    };

    if let Err(message) = result {
        debug!("Command failed: {message}");
        eprintln!("{message}");
        std::process::exit(1);
    }
}
