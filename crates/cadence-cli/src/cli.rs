//! Command handlers for the CLI
//!
//! Each handler converts its clap arguments into core parameter types,
//! calls the planner and hands the rendered result to the terminal
//! renderer:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Planner → Display → Renderer
//! ```

use std::{fs, path::Path, sync::Arc, time::Duration};

use anyhow::{bail, Context, Result};
use cadence_core::{
    params::{CreatePlan, Id, MarkItem, PlanRef, UpdatePlan},
    CommandDrafter, CommandExecutor, ExecutorRegistry, Flow, Item, ItemStatus, OperationStatus,
    Plan, Planner,
};
use log::{debug, info};

use crate::{
    args::{CreateArgs, IdArgs, ItemsArgs, MarkArgs, PlanCommands, RunArgs, ShowArgs, UpdateArgs},
    renderer::TerminalRenderer,
};

impl ItemsArgs {
    /// Collects the items from the JSON file followed by the `--item`
    /// flags. Returns `None` when neither was given.
    fn into_items(self) -> Result<Option<Vec<Item>>> {
        let mut items = match &self.items_file {
            Some(path) => read_items_file(path)?,
            None if self.items.is_empty() => return Ok(None),
            None => Vec::new(),
        };
        items.extend(self.items.into_iter().map(Item::new));
        Ok(Some(items))
    }
}

fn read_items_file(path: &Path) -> Result<Vec<Item>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read items file {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse items file {}", path.display()))
}

impl CreateArgs {
    pub fn into_params(self) -> Result<CreatePlan> {
        Ok(CreatePlan {
            id: self.id,
            title: self.title,
            items: self.items.into_items()?.unwrap_or_default(),
        })
    }
}

impl UpdateArgs {
    pub fn into_params(self) -> Result<UpdatePlan> {
        Ok(UpdatePlan {
            id: self.id,
            title: self.title,
            items: self.items.into_items()?,
        })
    }
}

impl From<ShowArgs> for PlanRef {
    fn from(val: ShowArgs) -> Self {
        PlanRef { id: val.id }
    }
}

impl From<IdArgs> for Id {
    fn from(val: IdArgs) -> Self {
        Id { id: val.id }
    }
}

impl From<MarkArgs> for MarkItem {
    fn from(val: MarkArgs) -> Self {
        MarkItem {
            plan_id: val.plan,
            index: val.index,
            status: val.status,
            notes: val.notes,
        }
    }
}

/// CLI command handler
pub struct Cli {
    planner: Planner,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(planner: Planner, renderer: TerminalRenderer) -> Self {
        Self { planner, renderer }
    }

    /// Dispatch a `plan` subcommand.
    pub async fn handle_plan_command(&self, command: PlanCommands) -> Result<()> {
        match command {
            PlanCommands::Create(args) => self.create_plan(args).await,
            PlanCommands::Update(args) => self.update_plan(args).await,
            PlanCommands::List => self.list_plans().await,
            PlanCommands::Show(args) => self.show_plan(&args.into()).await,
            PlanCommands::Activate(args) => self.activate_plan(&args.into()).await,
            PlanCommands::Mark(args) => self.mark_item(&args.into()).await,
            PlanCommands::Delete(args) => self.delete_plan(&args.into()).await,
        }
    }

    async fn create_plan(&self, args: CreateArgs) -> Result<()> {
        let params = args.into_params()?;
        let result = self
            .planner
            .create_plan_result(&params)
            .await
            .context("Failed to create plan")?;
        self.renderer.render(&result.to_string())
    }

    async fn update_plan(&self, args: UpdateArgs) -> Result<()> {
        let params = args.into_params()?;
        let result = self
            .planner
            .update_plan_result(&params)
            .await
            .context("Failed to update plan")?;
        self.renderer.render(&result.to_string())
    }

    pub async fn list_plans(&self) -> Result<()> {
        let summaries = self
            .planner
            .list_plans_summary()
            .await
            .context("Failed to list plans")?;
        self.renderer.render(&summaries.to_string())
    }

    async fn show_plan(&self, params: &PlanRef) -> Result<()> {
        let plan = self
            .planner
            .get_plan(params)
            .await
            .context("Failed to get plan")?;
        self.renderer.render(&plan.to_string())
    }

    async fn activate_plan(&self, params: &Id) -> Result<()> {
        let result = self
            .planner
            .set_active_plan_result(params)
            .await
            .context("Failed to activate plan")?;
        self.renderer.render(&result.to_string())
    }

    async fn mark_item(&self, params: &MarkItem) -> Result<()> {
        let result = self
            .planner
            .mark_item_result(params)
            .await
            .context("Failed to mark item")?;
        self.renderer.render(&result.to_string())
    }

    async fn delete_plan(&self, params: &Id) -> Result<()> {
        let result = self
            .planner
            .delete_plan_result(params)
            .await
            .context("Failed to delete plan")?;
        self.renderer.render(&result.to_string())
    }

    /// Execute a plan with shell-command executors.
    pub async fn run(&self, args: RunArgs) -> Result<()> {
        let RunArgs {
            request,
            plan_id,
            executors,
            executor_keys,
            primary,
            drafter,
            timeout,
            finish_marker,
        } = args;
        let request = request.unwrap_or_default();

        let mut registry = ExecutorRegistry::new();
        for (key, command) in executors {
            let mut executor = CommandExecutor::new(key.clone(), command);
            if let Some(marker) = &finish_marker {
                executor = executor.with_finish_marker(marker.clone());
            }
            registry.register(key, Arc::new(executor));
        }
        if let Some(primary) = primary {
            if !registry.contains(&primary) {
                bail!("Primary executor '{primary}' is not registered");
            }
            registry = registry.with_primary(primary);
        }

        let mut builder = Flow::builder(self.planner.clone(), registry);
        match plan_id {
            Some(id) => builder = builder.plan_id(id),
            None if request.is_empty() => {
                let active = self
                    .planner
                    .active_plan_id()
                    .await
                    .context("Failed to read the active plan")?;
                if let Some(id) = active {
                    builder = builder.plan_id(id);
                }
            }
            None => {}
        }
        if let Some(keys) = executor_keys {
            builder = builder.executor_keys(keys);
        }
        if let Some(command) = drafter {
            builder = builder.drafter(Arc::new(CommandDrafter::new(command)));
        }
        if let Some(secs) = timeout {
            builder = builder.executor_timeout(Duration::from_secs(secs));
        }

        let flow = builder.build();
        let plan_id = flow.plan_id().to_string();
        info!("Running plan {plan_id}");
        debug!("Executor keys: {:?}", flow.executor_keys());

        let output = flow
            .try_execute(&request)
            .await
            .context("Plan run did not start")?;
        self.renderer.render(&output)?;
        if !output.ends_with('\n') {
            println!();
        }

        // The plan may have been deleted while running.
        if let Ok(plan) = self.planner.get_plan(&PlanRef::id(&plan_id)).await {
            self.renderer.render(&run_status(&plan).to_string())?;
        }
        Ok(())
    }
}

/// Closing line for a run: an error when any item ended up failed.
fn run_status(plan: &Plan) -> OperationStatus {
    let message = format!(
        "Plan '{}' finished with {}/{} items completed",
        plan.id,
        plan.count(ItemStatus::Completed),
        plan.items.len()
    );
    match plan.count(ItemStatus::Failed) {
        0 => OperationStatus::success(message),
        failed => OperationStatus::failure(format!("{message}, {failed} failed")),
    }
}
