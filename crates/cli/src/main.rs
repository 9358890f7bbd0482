//! TrafficLedger CLI - Main entry point

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use trafficledger_cli::commands::{self, AppealInput, ViolationInput};
use trafficledger_cli::{AppContext, ConfigLoader};
use trafficledger_core::StaticIdentity;

#[derive(Parser)]
#[command(name = "trafficledger")]
#[command(about = "TrafficLedger - traffic violation and appeal records", long_about = None)]
struct Cli {
    /// Identity invoking the operation
    #[arg(long, global = true, default_value = "")]
    caller: String,

    /// Role attribute of the caller (omit for an identity without one)
    #[arg(long, global = true)]
    role: Option<String>,

    /// Config file (defaults to $TRAFFICLEDGER_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Data directory, overrides the config file
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a user with a role
    Register {
        user_id: String,
        role: String,
    },

    /// Issue a violation (admin)
    CreateViolation {
        violation_id: String,
        driver_id: String,
        #[arg(long = "type")]
        violation_type: String,
        #[arg(long)]
        location: String,
        #[arg(long)]
        penalty: i64,
        #[arg(long)]
        plate: String,
        /// RFC 3339, defaults to now
        #[arg(long)]
        timestamp: Option<String>,
        #[arg(long, default_value = "")]
        image: String,
        #[arg(long, default_value = "")]
        remark: String,
        #[arg(long)]
        paid: bool,
        /// Mark the violation as active
        #[arg(long)]
        active: bool,
    },

    /// Delete a violation (admin)
    DeleteViolation {
        violation_id: String,
    },

    /// Overwrite payment and violation status (admin)
    UpdateViolation {
        violation_id: String,
        #[arg(action = ArgAction::Set)]
        payment_status: bool,
        #[arg(action = ArgAction::Set)]
        violation_status: bool,
    },

    /// Read one violation
    QueryViolation {
        violation_id: String,
    },

    /// List every violation (admin)
    QueryAllViolations,

    /// List the caller's violations
    QueryMyViolations,

    /// Appeal one of the caller's violations
    SubmitAppeal {
        violation_id: String,
        #[arg(long)]
        text: String,
        #[arg(long, default_value = "")]
        evidence: String,
        /// Defaults to a fresh UUID
        #[arg(long)]
        appeal_id: Option<String>,
        /// RFC 3339, defaults to now
        #[arg(long)]
        timestamp: Option<String>,
    },

    /// List the caller's appeals
    QueryMyAppeals,

    /// List every appeal (admin)
    QueryAllAppeals,

    /// Set an appeal's status (admin)
    UpdateAppealStatus {
        appeal_id: String,
        status: String,
    },

    /// Delete an appeal (admin)
    DeleteAppeal {
        appeal_id: String,
    },

    /// Show the caller id and role
    Whoami,
}

fn run(cli: Cli) -> anyhow::Result<serde_json::Value> {
    let mut config = ConfigLoader::resolve(cli.config.as_deref())?;
    if let Some(data) = cli.data {
        config.data_dir = data;
    }

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let identity = StaticIdentity::new(cli.caller, cli.role.as_deref());
    let ctx = AppContext::open(&config, &identity)?;

    match cli.command {
        Commands::Register { user_id, role } => commands::register(&ctx, &user_id, &role),

        Commands::CreateViolation {
            violation_id,
            driver_id,
            violation_type,
            location,
            penalty,
            plate,
            timestamp,
            image,
            remark,
            paid,
            active,
        } => commands::create_violation(
            &ctx,
            ViolationInput {
                violation_id,
                driver_id,
                violation_type,
                location,
                penalty_amount: penalty,
                timestamp,
                license_plate_number: plate,
                image,
                remark,
                payment_status: paid,
                violation_status: active,
            },
        ),

        Commands::DeleteViolation { violation_id } => commands::delete_violation(&ctx, &violation_id),

        Commands::UpdateViolation {
            violation_id,
            payment_status,
            violation_status,
        } => commands::update_violation(&ctx, &violation_id, payment_status, violation_status),

        Commands::QueryViolation { violation_id } => commands::query_violation(&ctx, &violation_id),
        Commands::QueryAllViolations => commands::query_all_violations(&ctx),
        Commands::QueryMyViolations => commands::query_my_violations(&ctx),

        Commands::SubmitAppeal {
            violation_id,
            text,
            evidence,
            appeal_id,
            timestamp,
        } => commands::submit_appeal(
            &ctx,
            AppealInput {
                appeal_id,
                violation_id,
                appeal_text: text,
                evidence,
                timestamp,
            },
        ),

        Commands::QueryMyAppeals => commands::query_my_appeals(&ctx),
        Commands::QueryAllAppeals => commands::query_all_appeals(&ctx),
        Commands::UpdateAppealStatus { appeal_id, status } => {
            commands::update_appeal_status(&ctx, &appeal_id, &status)
        }
        Commands::DeleteAppeal { appeal_id } => commands::delete_appeal(&ctx, &appeal_id),
        Commands::Whoami => commands::whoami(&ctx),
    }
}

fn main() {
    let cli = Cli::parse();

    match run(cli).and_then(|output| Ok(serde_json::to_string_pretty(&output)?)) {
        Ok(output) => println!("{}", output),
        Err(err) => {
            eprintln!("error: {:#}", err);
            std::process::exit(commands::exit_code(&err));
        }
    }
}
