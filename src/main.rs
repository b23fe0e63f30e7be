//! clinicdesk CLI
//!
//! Entry point for the `clinicdesk` command-line tool: inspect the
//! appointment status graph and check transition decisions the way the
//! booking UI would.

use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;
use std::process;

use clinicdesk::{
    authorized_transitions, is_authorized, ActorRole, AppConfig, AppointmentStatus,
};

#[derive(Parser)]
#[command(name = "clinicdesk")]
#[command(about = "Appointment status decisions for the clinic booking app", version)]
struct Cli {
    /// Path to config file (default: .clinicdesk/config.toml)
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether one status transition is allowed
    Check {
        /// Current appointment status
        #[arg(long)]
        from: String,

        /// Requested appointment status
        #[arg(long)]
        to: String,

        /// Acting role; without one only graph legality is checked
        #[arg(long)]
        role: Option<String>,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// List the transitions available from a status
    Transitions {
        /// Current appointment status
        status: String,

        /// Acting role; without one the full graph-legal set is listed
        #[arg(long)]
        role: Option<String>,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Show the full decision surface for one status
    Explain {
        /// Appointment status to explain
        status: String,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let mut config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            process::exit(1);
        }
    };

    let filter = if cli.verbose {
        "debug".to_string()
    } else {
        config.log_filter.clone()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check {
            from,
            to,
            role,
            json,
        } => {
            config.apply_cli(parse_role_arg(role), json);
            run_check(&from, &to, &config);
        }
        Commands::Transitions { status, role, json } => {
            config.apply_cli(parse_role_arg(role), json);
            run_transitions(&status, &config);
        }
        Commands::Explain { status, json } => {
            config.apply_cli(None, json);
            run_explain(&status, &config);
        }
    }
}

fn parse_status_arg(value: &str) -> AppointmentStatus {
    match value.parse() {
        Ok(status) => status,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn parse_role_arg(value: Option<String>) -> Option<ActorRole> {
    let value = value?;
    match value.parse() {
        Ok(role) => Some(role),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn run_check(from: &str, to: &str, config: &AppConfig) {
    let from = parse_status_arg(from);
    let to = parse_status_arg(to);

    let graph_legal = from.can_transition_to(to);
    // Without a role the decision is pure graph legality; with one it is
    // graph legality narrowed by the authorization policy.
    let allowed = match config.default_role {
        Some(role) => is_authorized(from, to, Some(role)),
        None => graph_legal,
    };

    if config.json_output {
        println!(
            "{}",
            json!({
                "from": from,
                "to": to,
                "role": config.default_role,
                "graph_legal": graph_legal,
                "allowed": allowed,
            })
        );
    } else {
        let verdict = if allowed { "allowed" } else { "denied" };
        match config.default_role {
            Some(role) => println!("{}: {} -> {} as {}", verdict, from, to, role),
            None => println!("{}: {} -> {}", verdict, from, to),
        }
    }

    if !allowed {
        process::exit(2);
    }
}

fn run_transitions(status: &str, config: &AppConfig) {
    let status = parse_status_arg(status);

    let transitions = match config.default_role {
        Some(role) => authorized_transitions(status, Some(role)),
        None => status.available_transitions().to_vec(),
    };

    if config.json_output {
        println!(
            "{}",
            json!({
                "status": status,
                "role": config.default_role,
                "transitions": transitions,
            })
        );
    } else if transitions.is_empty() {
        println!("{}: no transitions available", status);
    } else {
        let names: Vec<&str> = transitions.iter().map(|s| s.as_str()).collect();
        println!("{}: {}", status, names.join(", "));
    }
}

fn run_explain(status: &str, config: &AppConfig) {
    let status = parse_status_arg(status);
    let legal = status.available_transitions();

    if config.json_output {
        let by_role: serde_json::Value = ActorRole::ALL
            .iter()
            .map(|role| {
                (
                    role.as_str().to_string(),
                    json!(authorized_transitions(status, Some(*role))),
                )
            })
            .collect::<serde_json::Map<String, serde_json::Value>>()
            .into();
        println!(
            "{}",
            json!({
                "status": status,
                "terminal": status.is_terminal(),
                "transitions": legal,
                "authorized": by_role,
            })
        );
        return;
    }

    println!("Status: {}", status);
    println!("  Terminal: {}", if status.is_terminal() { "yes" } else { "no" });
    if legal.is_empty() {
        println!("  Transitions: none");
    } else {
        let names: Vec<&str> = legal.iter().map(|s| s.as_str()).collect();
        println!("  Transitions: {}", names.join(", "));
    }
    for role in ActorRole::ALL {
        let authorized = authorized_transitions(status, Some(role));
        let names: Vec<&str> = authorized.iter().map(|s| s.as_str()).collect();
        println!(
            "  {}: {}",
            role,
            if names.is_empty() {
                "none".to_string()
            } else {
                names.join(", ")
            }
        );
    }
}
