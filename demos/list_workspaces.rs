//! List the workspaces of an organization as a table
//!
//! ```bash
//! TFE_TOKEN=... cargo run --example list_workspaces -- --org my-org -f prod
//! ```

use clap::Parser;
use comfy_table::{presets::NOTHING, Table};
use log::debug;

use tfe::hcp::workspaces::WorkspaceListOptions;
use tfe::{Config, TfeClient, TfeResource, Workspaces};

#[derive(Parser, Debug)]
#[command(about = "List the workspaces of an organization")]
struct Args {
    /// Organization name
    #[arg(long, env = "TFE_ORGANIZATION")]
    org: String,

    /// Fuzzy name search
    #[arg(short, long)]
    filter: Option<String>,

    /// Only workspaces carrying this tag (repeatable)
    #[arg(long = "tag")]
    tags: Vec<String>,

    /// Hide the header row
    #[arg(long)]
    no_header: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&args.log_level))
        .init();

    let client = TfeClient::new(Config::from_env()?)?;
    let options = WorkspaceListOptions {
        search: args.filter.clone(),
        tags: args.tags.clone(),
        ..Default::default()
    };

    debug!("Listing workspaces of '{}' with {:?}", args.org, options);
    let mut workspaces = client.workspaces().list_all(&args.org, &options).await?;
    workspaces.sort_by(|a, b| a.name().cmp(b.name()));

    let mut table = Table::new();
    table.load_preset(NOTHING);
    if !args.no_header {
        table.set_header(vec![
            "NAME",
            "ID",
            "RESOURCES",
            "EXECUTION MODE",
            "LOCKED",
            "TF VERSION",
            "UPDATED AT",
        ]);
    }
    for ws in &workspaces {
        table.add_row(vec![
            ws.name().to_string(),
            ws.id.clone(),
            ws.resource_count().to_string(),
            ws.execution_mode().to_string(),
            if ws.is_locked() { "yes" } else { "no" }.to_string(),
            ws.terraform_version().to_string(),
            ws.updated_at().to_string(),
        ]);
    }

    println!("{table}");
    eprintln!("{} workspace(s)", workspaces.len());
    Ok(())
}
