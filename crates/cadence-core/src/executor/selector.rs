//! Executor selection by item kind.

use std::sync::Arc;

use log::debug;

use super::{Executor, ExecutorRegistry};
use crate::error::FlowError;

/// Maps an item kind to an executor.
///
/// Lookup order: the executor registered under the kind itself, then the
/// first configured key present in the registry, then the primary executor.
pub struct ExecutorSelector {
    registry: ExecutorRegistry,
    keys: Vec<String>,
    primary: Arc<dyn Executor>,
}

impl ExecutorSelector {
    /// Creates a selector over `registry`, trying `keys` in order.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::NoPrimaryExecutor` if the registry has no primary
    /// executor.
    pub fn new(registry: ExecutorRegistry, keys: Vec<String>) -> Result<Self, FlowError> {
        let primary = registry.primary().ok_or(FlowError::NoPrimaryExecutor)?;
        Ok(Self {
            registry,
            keys,
            primary,
        })
    }

    /// Picks the executor for an item of the given kind. Never fails.
    pub fn select(&self, kind: Option<&str>) -> Arc<dyn Executor> {
        if let Some(executor) = kind.and_then(|k| self.registry.get(k)) {
            return executor;
        }

        for key in &self.keys {
            if let Some(executor) = self.registry.get(key) {
                debug!("No executor for kind {kind:?}, using configured key '{key}'");
                return executor;
            }
        }

        Arc::clone(&self.primary)
    }

    /// The primary executor.
    pub fn primary(&self) -> Arc<dyn Executor> {
        Arc::clone(&self.primary)
    }
}
