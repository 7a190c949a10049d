//! Upload a configuration directory, start a run and wait for it to settle
//!
//! ```bash
//! TFE_TOKEN=... cargo run --example run_wait -- --workspace-id ws-123 ./infra
//! ```

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};

use tfe::hcp::configuration_versions::ConfigurationVersionCreateOptions;
use tfe::hcp::runs::{Run, RunCreateOptions};
use tfe::{Config, ConfigurationVersions, Plans, Runs, TfeClient};

#[derive(Parser, Debug)]
#[command(about = "Upload a configuration and wait for the resulting run")]
struct Args {
    /// Workspace to run in
    #[arg(long)]
    workspace_id: String,

    /// Directory holding the Terraform configuration
    dir: PathBuf,

    /// Run message
    #[arg(long, default_value = "Queued by run_wait")]
    message: String,

    /// Give up after this many seconds
    #[arg(long, default_value_t = 1800)]
    timeout: u64,

    /// Seconds between status checks
    #[arg(long, default_value_t = 5)]
    interval: u64,

    /// Print the plan log when the run stops
    #[arg(long)]
    show_plan_log: bool,

    /// Retry 5xx responses too
    #[arg(long)]
    retry_server_errors: bool,

    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn create_spinner(message: &str) -> Result<ProgressBar, Box<dyn std::error::Error>> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.blue} {msg}")?,
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    Ok(spinner)
}

async fn wait_for_upload(
    client: &TfeClient,
    cv_id: &str,
    interval: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        let cv = client.configuration_versions().read(cv_id).await?;
        match cv.attributes.status.as_str() {
            "uploaded" => return Ok(()),
            "errored" => {
                let reason = cv
                    .attributes
                    .error_message
                    .unwrap_or_else(|| "no error message".to_string());
                return Err(format!("configuration version {} errored: {}", cv_id, reason).into());
            }
            status => debug!("Configuration version {} is {}", cv_id, status),
        }
        tokio::time::sleep(interval).await;
    }
}

async fn wait_for_run(
    client: &TfeClient,
    run_id: &str,
    interval: Duration,
    spinner: &ProgressBar,
) -> tfe::Result<Run> {
    loop {
        let run = client.runs().read(run_id).await?;
        spinner.set_message(format!("Run {} is {}", run_id, run.attributes.status));
        if run.is_final() || run.is_confirmable() {
            return Ok(run);
        }
        tokio::time::sleep(interval).await;
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&args.log_level))
        .init();

    let config = Config::from_env()?.with_retry_server_errors(args.retry_server_errors);
    let client = TfeClient::new(config)?;
    let interval = Duration::from_secs(args.interval);

    let spinner = create_spinner("Creating configuration version...")?;
    let cv = client
        .configuration_versions()
        .create(
            &args.workspace_id,
            ConfigurationVersionCreateOptions {
                auto_queue_runs: Some(false),
                ..Default::default()
            },
        )
        .await?;
    let upload_url = cv
        .upload_url()
        .ok_or("configuration version has no upload URL")?;

    spinner.set_message(format!("Uploading {}...", args.dir.display()));
    client
        .configuration_versions()
        .upload(upload_url, &args.dir)
        .await?;
    let timeout = Duration::from_secs(args.timeout);
    match tokio::time::timeout(timeout, wait_for_upload(&client, &cv.id, interval)).await {
        Ok(result) => result?,
        Err(_) => {
            spinner.finish_with_message(format!("Configuration version {} still uploading, gave up", cv.id));
            return Err(format!("timed out after {}s", args.timeout).into());
        }
    }
    info!("Configuration version {} uploaded", cv.id);

    let run = client
        .runs()
        .create(RunCreateOptions {
            configuration_version_id: Some(cv.id.clone()),
            message: Some(args.message.clone()),
            ..RunCreateOptions::new(&args.workspace_id)
        })
        .await?;
    spinner.set_message(format!("Run {} queued", run.id));

    let waited = tokio::time::timeout(
        timeout,
        wait_for_run(&client, &run.id, interval, &spinner),
    )
    .await;

    let run = match waited {
        Ok(result) => result?,
        Err(_) => {
            spinner.finish_with_message(format!("Run {} still running, gave up", run.id));
            return Err(format!("timed out after {}s", args.timeout).into());
        }
    };
    spinner.finish_with_message(format!("Run {} finished as {}", run.id, run.attributes.status));

    if args.show_plan_log {
        let plan = client.plans().read_for_run(&run.id).await?;
        println!("{}", client.plans().logs(&plan.id).await?);
    }
    if run.is_confirmable() {
        println!("Run {} is waiting for confirmation", run.id);
    }
    Ok(())
}
