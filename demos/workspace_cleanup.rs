//! Delete a workspace after confirming interactively
//!
//! ```bash
//! TFE_TOKEN=... cargo run --example workspace_cleanup -- --org my-org old-sandbox
//! ```

use clap::Parser;
use dialoguer::{theme::ColorfulTheme, Confirm};
use log::debug;

use tfe::hcp::runs::RunListOptions;
use tfe::{Config, Runs, TfeClient, TfeResource, Workspaces};

#[derive(Parser, Debug)]
#[command(about = "Delete a workspace after confirmation")]
struct Args {
    /// Organization name
    #[arg(long, env = "TFE_ORGANIZATION")]
    org: String,

    /// Workspace name
    workspace: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,

    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&args.log_level))
        .init();

    let client = TfeClient::new(Config::from_env()?)?;
    let workspace = match client.workspaces().read(&args.org, &args.workspace).await {
        Ok(ws) => ws,
        Err(e) if e.is_not_found() => {
            eprintln!("Workspace '{}' not found in '{}'", args.workspace, args.org);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let active = client
        .runs()
        .list(&workspace.id, &RunListOptions::non_final())
        .await?;
    debug!("{} non-final run(s) in {}", active.len(), workspace.id);

    println!("Workspace: {} ({})", workspace.name(), workspace.id);
    println!("Resources: {}", workspace.resource_count());
    println!("Locked:    {}", workspace.is_locked());
    if !active.is_empty() {
        println!("Active runs: {}", active.len());
    }

    let confirmed = args.yes
        || Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("Delete workspace '{}'?", workspace.name()))
            .default(false)
            .interact()?;
    if !confirmed {
        println!("Aborted.");
        return Ok(());
    }

    client.workspaces().delete_by_id(&workspace.id).await?;
    println!("Workspace '{}' deleted", workspace.name());
    Ok(())
}
