//! Cadence CLI Application
//!
//! Command-line interface for the Cadence plan engine: manage plans, run
//! them with shell-command executors, or serve them over MCP.

mod args;
mod cli;
mod mcp;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use cadence_core::PlannerBuilder;
use clap::Parser;
use cli::Cli;
use log::info;
use mcp::{run_stdio_server, CadenceMcpServer};
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        command,
    } = Args::parse();

    let planner = PlannerBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize planner")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("Cadence started");

    match command {
        Some(Plan { command }) => {
            Cli::new(planner, renderer)
                .handle_plan_command(command)
                .await
        }
        Some(Run(args)) => Cli::new(planner, renderer).run(args).await,
        Some(Serve) => {
            info!("Starting Cadence MCP server");
            run_stdio_server(CadenceMcpServer::new(planner))
                .await
                .context("MCP server failed")
        }
        None => Cli::new(planner, renderer).list_plans().await,
    }
}
