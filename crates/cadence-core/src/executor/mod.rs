//! Executors perform the actual work of plan items.
//!
//! An [`Executor`] takes a prompt describing one item and returns its textual
//! outcome. Executors are registered under string keys in an
//! [`ExecutorRegistry`]; the [`ExecutorSelector`] picks one per item.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ExecutionError;

pub mod command;
pub mod selector;

pub use command::CommandExecutor;
pub use selector::ExecutorSelector;

/// Capability that runs a single plan item.
#[async_trait]
pub trait Executor: Send + Sync {
    /// Human-readable name, used in logs.
    fn name(&self) -> &str;

    /// Runs the item described by `prompt` and returns its output.
    async fn run(&self, prompt: &str) -> Result<String, ExecutionError>;

    /// Whether the executor has reached a terminal state and the flow
    /// should stop after the current item.
    fn is_finished(&self) -> bool {
        false
    }
}

/// Executors keyed by name, in registration order.
#[derive(Clone, Default)]
pub struct ExecutorRegistry {
    executors: Vec<(String, Arc<dyn Executor>)>,
    primary: Option<String>,
}

impl ExecutorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an executor, replacing any executor already under `key`.
    pub fn register(&mut self, key: impl Into<String>, executor: Arc<dyn Executor>) {
        let key = key.into();
        match self.executors.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = executor,
            None => self.executors.push((key, executor)),
        }
    }

    /// Builder-style [`ExecutorRegistry::register`].
    pub fn with(mut self, key: impl Into<String>, executor: Arc<dyn Executor>) -> Self {
        self.register(key, executor);
        self
    }

    /// Designates the primary executor. Without this the first registered
    /// executor is primary.
    pub fn with_primary(mut self, key: impl Into<String>) -> Self {
        self.primary = Some(key.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<Arc<dyn Executor>> {
        self.executors
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, e)| Arc::clone(e))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.executors.iter().any(|(k, _)| k == key)
    }

    /// Registered keys in registration order.
    pub fn keys(&self) -> Vec<String> {
        self.executors.iter().map(|(k, _)| k.clone()).collect()
    }

    /// The primary executor, if one is available.
    pub fn primary(&self) -> Option<Arc<dyn Executor>> {
        match &self.primary {
            Some(key) => self.get(key),
            None => self.executors.first().map(|(_, e)| Arc::clone(e)),
        }
    }

    pub fn len(&self) -> usize {
        self.executors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.executors.is_empty()
    }
}

impl std::fmt::Debug for ExecutorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutorRegistry")
            .field("keys", &self.keys())
            .field("primary", &self.primary)
            .finish()
    }
}
