//! CLI entry point for the survey dashboard.
//!
//! Provides subcommands for viewing and exporting survey statistics,
//! submitting a survey, and managing the dashboard session.

use anyhow::{Result, bail};
use chrono::{Local, Utc};
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::path::Path;
use survey_pulse::analyzers::aggregate::AggregateOptions;
use survey_pulse::analyzers::filter::{FilterCriteria, RatingBucket, StoreFilter};
use survey_pulse::config::Config;
use survey_pulse::fetch::BasicClient;
use survey_pulse::output::{append_store_summaries, print_json, print_pretty, render_report};
use survey_pulse::services::dashboard::Dashboard;
use survey_pulse::session::{FileSessionStore, SessionStatus, check_session, login, logout};
use survey_pulse::submit::{SurveyForm, SurveySubmission, check_endpoint, submit_survey};
use tracing::{error, info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "survey_pulse")]
#[command(about = "Customer satisfaction survey dashboard", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the dashboard report
    Report {
        /// Path to file or URL to fetch (defaults to the configured sheet)
        #[arg(long, value_name = "FILE_OR_URL")]
        source: Option<String>,

        /// Only include one store ("all" for every store)
        #[arg(long, default_value = "all")]
        store: StoreFilter,

        /// Rating bucket: all, excellent, neutral or poor
        #[arg(long, default_value = "all")]
        rating: RatingBucket,

        /// Case-insensitive search over name, email and phone
        #[arg(long, default_value = "")]
        search: String,

        /// Print the view as JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Append the per-store comparison to a CSV file
    Export {
        /// Path to file or URL to fetch (defaults to the configured sheet)
        #[arg(long, value_name = "FILE_OR_URL")]
        source: Option<String>,

        /// CSV file to append results to
        #[arg(short, long, default_value = "stores.csv")]
        output: String,
    },
    /// Submit a survey response
    Submit {
        #[arg(long)]
        store: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        plate: String,
        /// Service rating, 1 to 5
        #[arg(long)]
        service: u8,
        /// Recommendation rating, 1 to 5
        #[arg(long)]
        recommendation: u8,
        #[arg(long)]
        comment: Option<String>,
    },
    /// Check that the submission endpoint is reachable
    Check,
    /// Open a dashboard session
    Login {
        #[arg(long)]
        password: String,
    },
    /// Close the dashboard session
    Logout,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Keep the guard alive so buffered file logs are flushed on exit.
    let _file_guard = init_tracing()?;

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let session_store = FileSessionStore::new(&config.session_file);

    match cli.command {
        Commands::Report {
            source,
            store,
            rating,
            search,
            json,
        } => {
            require_session(&session_store)?;
            let mut dashboard = load_dashboard(&config, source).await?;
            let view = dashboard.set_filter(FilterCriteria {
                store,
                rating,
                search,
            });

            print_pretty(&view);
            if json {
                print_json(&view)?;
            } else {
                println!("{}", render_report(&view));
            }
        }
        Commands::Export { source, output } => {
            require_session(&session_store)?;
            let dashboard = load_dashboard(&config, source).await?;
            let view = dashboard.view();
            append_store_summaries(&output, &view.stores)?;
            info!(output, stores = view.stores.len(), "Store comparison exported");
        }
        Commands::Submit {
            store,
            name,
            phone,
            email,
            plate,
            service,
            recommendation,
            comment,
        } => {
            let form = SurveyForm {
                store,
                name,
                phone,
                email,
                plate,
                service_rating: service,
                recommendation_rating: recommendation,
                comment,
            };
            if let Err(issues) = form.validate() {
                for issue in &issues {
                    warn!(%issue, "Survey form incomplete");
                }
                bail!("survey form has {} problem(s)", issues.len());
            }

            let url = config.script_url()?;
            let submission = SurveySubmission::new(form, Local::now().naive_local());
            let client = BasicClient::new()?;
            if let Err(e) = submit_survey(&client, url, &submission).await {
                error!(error = %e, "Survey submission failed, please try again");
                return Err(e.into());
            }
        }
        Commands::Check => {
            let client = BasicClient::new()?;
            let ok = check_endpoint(&client, config.script_url()?).await;
            info!(ok, "Submission endpoint check");
            if !ok {
                bail!("submission endpoint is not reachable");
            }
        }
        Commands::Login { password } => {
            login(
                &session_store,
                &password,
                config.dashboard_password()?,
                Utc::now(),
            )?;
        }
        Commands::Logout => {
            logout(&session_store)?;
        }
    }

    Ok(())
}

/// Logging setup: colored stderr + JSON rolling log file
fn init_tracing() -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/survey_pulse.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("survey_pulse.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    Ok(file_guard)
}

fn require_session(store: &FileSessionStore) -> Result<()> {
    match check_session(store, Utc::now())? {
        SessionStatus::Valid => Ok(()),
        SessionStatus::Missing => bail!("not logged in, run `survey_pulse login` first"),
        SessionStatus::Expired => bail!("session expired, run `survey_pulse login` again"),
    }
}

/// Loads survey records from a local file or over HTTP into a fresh dashboard.
#[tracing::instrument(skip(config))]
async fn load_dashboard(config: &Config, source: Option<String>) -> Result<Dashboard> {
    let source = match source {
        Some(source) => source,
        None => config.sheet_url()?,
    };

    let client = BasicClient::new()?;
    let mut dashboard = Dashboard::new(AggregateOptions::new(config.stores.clone()));
    dashboard.refresh(&client, &source).await?;

    Ok(dashboard)
}
