use anyhow::Context;
use clap::{Parser, Subcommand};
use hospital_core::config::{
    credentials_path_from_env_value, department_policy_from_env_value,
    patient_data_path_from_env_value,
};
use hospital_core::{parse_visit_date, Hospital, Ingestor, RegistryConfig};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod auth;
mod report;
mod session;

use session::Session;

#[derive(Parser)]
#[command(name = "hospital")]
#[command(about = "Hospital registry CLI")]
struct Cli {
    /// Patient data file, CSV or TSV (overrides HOSPITAL_PATIENT_DATA)
    #[arg(long, global = true)]
    data: Option<PathBuf>,
    /// Credentials file (overrides HOSPITAL_CREDENTIALS)
    #[arg(long, global = true)]
    credentials: Option<PathBuf>,
    /// What to do with rows naming an unregistered department: auto-register, reject or skip
    #[arg(long, global = true)]
    department_policy: Option<String>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and use the menu for your role
    Login,
    /// Count visits on a date
    CountVisits {
        /// Date (YYYY-MM-DD)
        date: String,
    },
    /// Show one patient
    FindPatient {
        /// Patient ID
        patient_id: String,
        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },
    /// List departments with patient counts
    Departments,
}

/// Resolves configuration once: CLI flags first, then environment, then defaults.
fn resolve_config(cli: &Cli) -> anyhow::Result<RegistryConfig> {
    let patient_data_path = match &cli.data {
        Some(path) => path.clone(),
        None => patient_data_path_from_env_value(std::env::var("HOSPITAL_PATIENT_DATA").ok()),
    };
    let credentials_path = match &cli.credentials {
        Some(path) => path.clone(),
        None => credentials_path_from_env_value(std::env::var("HOSPITAL_CREDENTIALS").ok()),
    };
    let department_policy = department_policy_from_env_value(
        cli.department_policy
            .clone()
            .or_else(|| std::env::var("HOSPITAL_DEPARTMENT_POLICY").ok()),
    )?;

    Ok(RegistryConfig::new(
        patient_data_path,
        credentials_path,
        department_policy,
    )?)
}

fn load_hospital(cfg: &RegistryConfig) -> anyhow::Result<Hospital> {
    Ingestor::from_config(cfg)
        .load_path(cfg.patient_data_path())
        .with_context(|| {
            format!(
                "failed to load patient data from {}",
                cfg.patient_data_path().display()
            )
        })
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("hospital=info".parse()?)
                .add_directive("hospital_core=warn".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let Some(command) = cli.command.as_ref() else {
        println!("Use 'hospital --help' for commands");
        return Ok(());
    };

    let cfg = resolve_config(&cli)?;
    tracing::info!(
        "using patient data {} (department policy: {})",
        cfg.patient_data_path().display(),
        cfg.department_policy()
    );
    let mut hospital = load_hospital(&cfg)?;

    match command {
        Commands::Login => {
            let users = auth::load_credentials(cfg.credentials_path()).with_context(|| {
                format!(
                    "failed to load credentials from {}",
                    cfg.credentials_path().display()
                )
            })?;

            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            let mut session = Session::new(&mut hospital, stdin.lock(), stdout.lock());
            match session.login(&users)? {
                Some(user) => session.run(user.role)?,
                None => eprintln!("No credentials entered."),
            }
        }
        Commands::CountVisits { date } => match parse_visit_date(date) {
            Ok(date) => println!(
                "Total visits on {}: {}",
                date.format("%Y-%m-%d"),
                hospital.count_visits_on(date)
            ),
            Err(_) => eprintln!("Invalid date format: {date} (expected YYYY-MM-DD)"),
        },
        Commands::FindPatient { patient_id, json } => match hospital.find_patient(patient_id) {
            Some(patient) if *json => {
                println!("{}", serde_json::to_string_pretty(patient)?);
            }
            Some(patient) => {
                print!(
                    "{}",
                    report::patient_report(patient, hospital.department_of(patient_id))
                );
            }
            None => eprintln!("Patient {patient_id} not found."),
        },
        Commands::Departments => {
            print!("{}", report::department_summary(&hospital));
        }
    }

    Ok(())
}
