//! MCP server implementation for Cadence
//!
//! Exposes the plan store over the Model Context Protocol so that AI
//! assistants can draft, inspect and mark plans while a run is in
//! progress.

use std::future::Future;

use anyhow::Result;
use cadence_core::Planner;
use log::{error, info};
use rmcp::{
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ServerHandler,
};
use tokio::signal::unix::{signal, SignalKind};

pub mod errors;
pub mod handlers;

use handlers::{CreatePlan, Id, MarkItem, McpHandlers, McpResult, PlanRef, UpdatePlan};

/// MCP server for Cadence
#[derive(Clone)]
pub struct CadenceMcpServer {
    planner: Planner,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl CadenceMcpServer {
    /// Create a new Cadence MCP server
    pub fn new(planner: Planner) -> Self {
        Self {
            planner,
            tool_router: Self::tool_router(),
        }
    }

    fn handlers(&self) -> McpHandlers {
        McpHandlers::new(self.planner.clone())
    }

    #[tool(
        name = "create_plan",
        description = "Create a new plan and make it the active plan. Requires a unique id, a title and at least one item. Each item has content and optional tags, media_prompt (a non-empty prompt makes it a media item) and scheduled_time. Fails if a plan with the id already exists."
    )]
    async fn create_plan(&self, params: Parameters<CreatePlan>) -> McpResult {
        self.handlers().create_plan(params).await
    }

    #[tool(
        name = "update_plan",
        description = "Replace the title and/or items of an existing plan. Items that are identical at the same position keep their status and notes; every other item is reset to draft."
    )]
    async fn update_plan(&self, params: Parameters<UpdatePlan>) -> McpResult {
        self.handlers().update_plan(params).await
    }

    #[tool(
        name = "list_plans",
        description = "List every stored plan with its progress, marking the active plan."
    )]
    async fn list_plans(&self) -> McpResult {
        self.handlers().list_plans().await
    }

    #[tool(
        name = "get_plan",
        description = "Show a plan with its progress and every item's status, tags, media prompt, schedule and notes. Omit id to show the active plan."
    )]
    async fn get_plan(&self, params: Parameters<PlanRef>) -> McpResult {
        self.handlers().get_plan(params).await
    }

    #[tool(
        name = "set_active_plan",
        description = "Make the plan with the given id the active plan. Operations that omit a plan id act on the active plan."
    )]
    async fn set_active_plan(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().set_active_plan(params).await
    }

    #[tool(
        name = "mark_item",
        description = "Set the status (draft, ready, completed or failed) and/or notes of one item, by 0-based index. Omit plan_id to use the active plan."
    )]
    async fn mark_item(&self, params: Parameters<MarkItem>) -> McpResult {
        self.handlers().mark_item(params).await
    }

    #[tool(
        name = "delete_plan",
        description = "Permanently delete a plan. If it was the active plan, no plan is active afterwards."
    )]
    async fn delete_plan(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().delete_plan(params).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for CadenceMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "cadence".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(r#"Cadence stores plans of ordered work items and executes them one item at a time.

## Core Concepts
- **Plans**: a titled, ordered list of items under a unique id. One plan is the active plan.
- **Items**: content plus optional tags, media prompt and schedule label. Items with a media prompt are media items; all others are text items.
- **Statuses**: draft → ready → completed or failed. Draft and ready items are still to be executed, in order.

## Workflow
1. Create a plan with `create_plan`; it becomes the active plan.
2. Review it with `get_plan` and refine it with `update_plan`. Unchanged items keep their progress.
3. Record progress with `mark_item`, adding notes for failures.
4. Use `list_plans` and `set_active_plan` to switch between plans, and `delete_plan` to remove one.

## Tools
create_plan, update_plan, list_plans, get_plan, set_active_plan, mark_item, delete_plan"#.to_string()),
        }
    }
}

/// Serve `server` over stdio until the client disconnects or the process
/// receives SIGINT or SIGTERM.
pub async fn run_stdio_server(server: CadenceMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Cadence MCP server listening on stdio");

    let service = server
        .serve(stdio())
        .await
        .inspect_err(|e| error!("Failed to start MCP server: {e}"))?;

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            result?;
            info!("MCP client disconnected");
        }
        _ = sigint.recv() => info!("Received SIGINT, shutting down"),
        _ = sigterm.recv() => info!("Received SIGTERM, shutting down"),
    }

    Ok(())
}
