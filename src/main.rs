use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use std::process::ExitCode;

use sat_o_scope::fleet::{Fleet, SatelliteId};
use sat_o_scope::forecast::generate;
use sat_o_scope::web::{self, Config};

#[derive(Parser)]
#[command(name = "sat-o-scope")]
#[command(about = "Satellite clock and ephemeris error dashboard")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the dashboard web server
    Serve {
        #[arg(short, long)]
        config: Option<String>,
    },
    /// Print the error forecast for a satellite
    Generate {
        satellite: String,
        /// Force degraded error amplification
        #[arg(long)]
        degraded: bool,
        /// Generation time (RFC3339), defaults to now
        #[arg(long)]
        at: Option<String>,
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
        #[arg(short, long)]
        config: Option<String>,
    },
    /// List the configured fleet
    Fleet {
        #[arg(short, long)]
        config: Option<String>,
    },
    /// Validate a configuration file
    Validate { config: String },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Yaml,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => serve(config.as_deref()),
        Commands::Generate {
            satellite,
            degraded,
            at,
            format,
            config,
        } => generate_forecast(&satellite, degraded, at.as_deref(), format, config.as_deref()),
        Commands::Fleet { config } => list_fleet(config.as_deref()),
        Commands::Validate { config } => validate(&config),
    }
}

fn load_config(path: Option<&str>) -> Option<Config> {
    match path {
        None => Some(Config::default()),
        Some(p) => match Config::from_file(p) {
            Ok(c) => Some(c),
            Err(e) => {
                eprintln!("Error loading config {}: {}", p, e);
                None
            }
        },
    }
}

fn load_fleet(path: Option<&str>) -> Option<Fleet> {
    let config = load_config(path)?;
    match config.load_fleet() {
        Ok(f) => Some(f),
        Err(e) => {
            eprintln!("Error loading fleet: {}", e);
            None
        }
    }
}

fn serve(path: Option<&str>) -> ExitCode {
    let Some(config) = load_config(path) else {
        return ExitCode::FAILURE;
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(web::run_server(config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn generate_forecast(
    satellite: &str,
    degraded: bool,
    at: Option<&str>,
    format: Format,
    config: Option<&str>,
) -> ExitCode {
    let Some(fleet) = load_fleet(config) else {
        return ExitCode::FAILURE;
    };

    let generated_at = match at {
        None => Utc::now(),
        Some(s) => match DateTime::parse_from_rfc3339(s) {
            Ok(dt) => dt.with_timezone(&Utc),
            Err(e) => {
                eprintln!("Invalid time '{}': {}", s, e);
                return ExitCode::FAILURE;
            }
        },
    };

    let id = SatelliteId::from(satellite);
    let series = generate(&id, degraded || fleet.is_degraded(&id), generated_at);

    let rendered = match format {
        Format::Json => serde_json::to_string_pretty(&series).map_err(|e| e.to_string()),
        Format::Yaml => serde_yaml::to_string(&series).map_err(|e| e.to_string()),
    };

    match rendered {
        Ok(out) => {
            println!("{}", out);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to serialize forecast: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn list_fleet(config: Option<&str>) -> ExitCode {
    let Some(fleet) = load_fleet(config) else {
        return ExitCode::FAILURE;
    };

    println!("{} satellites", fleet.len());
    for (i, sat) in fleet.iter().enumerate() {
        println!(
            "  {}: {} {} [{}] updated {}{}",
            i + 1,
            sat.id,
            sat.name,
            sat.status,
            sat.last_update,
            if sat.degraded { " (degraded)" } else { "" }
        );
    }
    ExitCode::SUCCESS
}

fn validate(path: &str) -> ExitCode {
    let config = match Config::from_file(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Parse error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match config.load_fleet() {
        Ok(fleet) => {
            println!("Config is valid ({} satellites)", fleet.len());
            println!("  bind: {}", config.web.bind);
            println!(
                "  session idle timeout: {}",
                humantime::format_duration(config.sessions.idle_timeout)
            );
            println!("  max sessions: {}", config.sessions.max_sessions);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Fleet error: {}", e);
            ExitCode::FAILURE
        }
    }
}
