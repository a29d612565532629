//! The execution flow: drives one plan from first item to final summary.
//!
//! A [`Flow`] owns a target plan ID. [`Flow::execute`] optionally drafts the
//! plan from a request, then repeats until no active item remains:
//!
//! ```text
//!   Idle ──▶ ItemSelected ──▶ ItemRunning ──▶ ItemSettled ──┐
//!    ▲                                                       │
//!    └───────────────────────────────────────────────────────┘
//!   (no active item, or executor finished) ──▶ Finalizing ──▶ Done
//! ```
//!
//! The next item is found by re-scanning the plan every iteration, so
//! changes made to the plan while the flow runs are picked up. Executor
//! failures mark the item `Failed` and the flow moves on; store failures
//! during bookkeeping are absorbed by an in-memory correction. Only
//! problems before the first item starts abort the run.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use async_trait::async_trait;
//! use cadence_core::{
//!     error::ExecutionError,
//!     executor::{Executor, ExecutorRegistry},
//!     flow::Flow,
//!     PlannerBuilder,
//! };
//!
//! struct Echo;
//!
//! #[async_trait]
//! impl Executor for Echo {
//!     fn name(&self) -> &str {
//!         "echo"
//!     }
//!
//!     async fn run(&self, _prompt: &str) -> Result<String, ExecutionError> {
//!         Ok("done".to_string())
//!     }
//! }
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new().in_memory().build().await?;
//! let registry = ExecutorRegistry::new().with("text", Arc::new(Echo));
//!
//! let output = Flow::builder(planner, registry)
//!     .plan_id("release")
//!     .build()
//!     .execute("Publish the release notes")
//!     .await;
//! assert!(output.contains("Plan completed"));
//! # Ok(())
//! # }
//! ```

use std::{fmt, sync::Arc, time::Duration};

use jiff::Timestamp;
use log::{debug, error, info, warn};

use crate::{
    drafting::{Drafter, PlanSpec},
    error::{ExecutionError, FlowError},
    executor::{Executor, ExecutorRegistry, ExecutorSelector},
    models::ItemStatus,
    params::PlanRef,
    planner::Planner,
};

mod prompts;
pub(crate) mod session;


use session::Session;

/// Where the flow is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowState {
    Idle,
    ItemSelected { index: usize },
    ItemRunning { index: usize, executor: String },
    ItemSettled { index: usize, status: ItemStatus },
    Finalizing,
    Done,
}

impl fmt::Display for FlowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowState::Idle => write!(f, "idle"),
            FlowState::ItemSelected { index } => write!(f, "item {index} selected"),
            FlowState::ItemRunning { index, executor } => {
                write!(f, "item {index} running on '{executor}'")
            }
            FlowState::ItemSettled { index, status } => write!(f, "item {index} {status}"),
            FlowState::Finalizing => write!(f, "finalizing"),
            FlowState::Done => write!(f, "done"),
        }
    }
}

/// Builder for [`Flow`].
pub struct FlowBuilder {
    planner: Planner,
    registry: ExecutorRegistry,
    plan_id: Option<String>,
    executor_keys: Option<Vec<String>>,
    drafter: Option<Arc<dyn Drafter>>,
    executor_timeout: Option<Duration>,
}

impl FlowBuilder {
    pub fn new(planner: Planner, registry: ExecutorRegistry) -> Self {
        Self {
            planner,
            registry,
            plan_id: None,
            executor_keys: None,
            drafter: None,
            executor_timeout: None,
        }
    }

    /// Target plan ID. Defaults to `plan_<unix seconds>`.
    pub fn plan_id(mut self, id: impl Into<String>) -> Self {
        self.plan_id = Some(id.into());
        self
    }

    /// Executor keys tried, in order, when no executor matches an item's
    /// kind. Defaults to every registered key.
    pub fn executor_keys(mut self, keys: Vec<String>) -> Self {
        self.executor_keys = Some(keys);
        self
    }

    /// Collaborator used to draft the plan and write the summary.
    pub fn drafter(mut self, drafter: Arc<dyn Drafter>) -> Self {
        self.drafter = Some(drafter);
        self
    }

    /// Upper bound on a single executor run. An item that exceeds it fails.
    pub fn executor_timeout(mut self, timeout: Duration) -> Self {
        self.executor_timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Flow {
        let plan_id = self
            .plan_id
            .unwrap_or_else(|| format!("plan_{}", Timestamp::now().as_second()));
        let executor_keys = self.executor_keys.unwrap_or_else(|| self.registry.keys());

        Flow {
            planner: self.planner,
            registry: self.registry,
            plan_id,
            executor_keys,
            drafter: self.drafter,
            executor_timeout: self.executor_timeout,
        }
    }
}

/// A single-use run over one plan.
pub struct Flow {
    planner: Planner,
    registry: ExecutorRegistry,
    plan_id: String,
    executor_keys: Vec<String>,
    drafter: Option<Arc<dyn Drafter>>,
    executor_timeout: Option<Duration>,
}

impl Flow {
    pub fn builder(planner: Planner, registry: ExecutorRegistry) -> FlowBuilder {
        FlowBuilder::new(planner, registry)
    }

    pub fn plan_id(&self) -> &str {
        &self.plan_id
    }

    pub fn executor_keys(&self) -> &[String] {
        &self.executor_keys
    }

    /// Runs the flow to completion and returns the accumulated output.
    ///
    /// A non-empty `request` is drafted into a new plan under the target ID.
    /// An empty request runs whatever plan already exists there, creating a
    /// one-item default plan if there is none. Fatal errors are reported as
    /// `Execution failed: ...` rather than returned; use
    /// [`Flow::try_execute`] to tell them apart from executor output.
    pub async fn execute(self, request: &str) -> String {
        match self.try_execute(request).await {
            Ok(output) => output,
            Err(e) => {
                error!("Flow for plan {} failed: {e}", self.plan_id);
                format!("Execution failed: {e}")
            }
        }
    }

    /// Same as [`Flow::execute`], but returns fatal errors instead of
    /// folding them into the output. Once the first item starts, the run
    /// always ends in `Ok`.
    pub async fn try_execute(&self, request: &str) -> Result<String, FlowError> {
        let selector = ExecutorSelector::new(self.registry.clone(), self.executor_keys.clone())?;

        if request.is_empty() {
            self.ensure_plan().await?;
        } else {
            self.draft_plan(request).await?;
        }

        let mut session = Session::open(self.planner.clone(), &self.plan_id).await?;
        let mut state = FlowState::Idle;
        let mut output = String::new();

        loop {
            if !session.refresh().await {
                break;
            }
            let Some(index) = session.view().next_active() else {
                break;
            };
            self.advance(&mut state, FlowState::ItemSelected { index });
            info!("Plan {}: starting item {index}", self.plan_id);

            session.mark(index, ItemStatus::Ready, None).await;

            // The mark may have adopted a concurrently shortened plan.
            let Some(item) = session.view().items.get(index).cloned() else {
                continue;
            };
            let executor = selector.select(Some(item.kind().as_str()));
            self.advance(
                &mut state,
                FlowState::ItemRunning {
                    index,
                    executor: executor.name().to_string(),
                },
            );

            let prompt = prompts::item_prompt(&session.view().to_string(), index, &item);
            let status = match self.run_executor(executor.as_ref(), &prompt).await {
                Ok(result) => {
                    session.mark(index, ItemStatus::Completed, None).await;
                    output.push_str(&result);
                    ItemStatus::Completed
                }
                Err(e) => {
                    error!("Error executing item {index} of plan {}: {e}", self.plan_id);
                    session
                        .mark(index, ItemStatus::Failed, Some(format!("Error: {e}")))
                        .await;
                    output.push_str(&format!("Error executing item {index}: {e}"));
                    ItemStatus::Failed
                }
            };
            output.push('\n');
            self.advance(&mut state, FlowState::ItemSettled { index, status });

            if executor.is_finished() {
                info!(
                    "Executor '{}' finished, stopping plan {} early",
                    executor.name(),
                    self.plan_id
                );
                break;
            }
            self.advance(&mut state, FlowState::Idle);
        }

        self.advance(&mut state, FlowState::Finalizing);
        output.push_str(&self.finalize(&mut session, &selector).await);
        self.advance(&mut state, FlowState::Done);

        Ok(output)
    }

    fn advance(&self, state: &mut FlowState, next: FlowState) {
        debug!("Plan {}: {state} -> {next}", self.plan_id);
        *state = next;
    }

    /// Makes sure a plan exists at the target ID without drafting.
    async fn ensure_plan(&self) -> Result<(), FlowError> {
        match self.planner.get_plan(&PlanRef::id(&self.plan_id)).await {
            Ok(_) => Ok(()),
            Err(e) => {
                debug!("No usable plan at {}: {e}", self.plan_id);
                self.create(PlanSpec::fallback("")).await
            }
        }
    }

    async fn draft_plan(&self, request: &str) -> Result<(), FlowError> {
        info!("Drafting plan {} from request", self.plan_id);

        let spec = match &self.drafter {
            Some(drafter) => {
                let drafted = drafter
                    .draft(prompts::DRAFT_SYSTEM, &prompts::draft_request(request))
                    .await;
                match drafted {
                    Ok(Some(payload)) => PlanSpec::from_payload(payload).unwrap_or_else(|e| {
                        warn!("Drafted plan unusable, using default plan: {e}");
                        PlanSpec::fallback(request)
                    }),
                    Ok(None) => {
                        warn!("Drafter returned no plan, using default plan");
                        PlanSpec::fallback(request)
                    }
                    Err(e) => {
                        warn!("Drafting failed, using default plan: {e}");
                        PlanSpec::fallback(request)
                    }
                }
            }
            None => PlanSpec::fallback(request),
        };

        self.create(spec).await
    }

    async fn create(&self, spec: PlanSpec) -> Result<(), FlowError> {
        self.planner
            .create_plan(&spec.into_create(&self.plan_id))
            .await
            .map(|plan| debug!("Created plan {} with {} items", plan.id, plan.items.len()))
            .map_err(|source| FlowError::PlanCreation { source })
    }

    async fn run_executor(
        &self,
        executor: &dyn Executor,
        prompt: &str,
    ) -> Result<String, ExecutionError> {
        match self.executor_timeout {
            Some(after) => tokio::time::timeout(after, executor.run(prompt))
                .await
                .map_err(|_| ExecutionError::TimedOut { after })?,
            None => executor.run(prompt).await,
        }
    }

    async fn finalize(&self, session: &mut Session, selector: &ExecutorSelector) -> String {
        let plan_text = session.plan_text().await;
        let request = prompts::summary_request(&plan_text);

        if let Some(drafter) = &self.drafter {
            match drafter.summarize(prompts::SUMMARY_SYSTEM, &request).await {
                Ok(summary) => return format!("Plan completed:\n\n{summary}"),
                Err(e) => warn!("Drafter summary failed, asking primary executor: {e}"),
            }
        }

        let primary = selector.primary();
        match self.run_executor(primary.as_ref(), &request).await {
            Ok(summary) => format!("Plan completed:\n\n{summary}"),
            Err(e) => {
                error!("Summary for plan {} failed: {e}", self.plan_id);
                "Plan completed. Error generating summary.".to_string()
            }
        }
    }
}
