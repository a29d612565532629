//! The plan drafting collaborator boundary.
//!
//! A [`Drafter`] turns a free-text request into a structured plan payload
//! and writes the closing summary of a finished plan. The flow never trusts
//! the payload blindly: anything that does not parse into a usable
//! [`PlanSpec`] is replaced by [`PlanSpec::fallback`], a one-item plan that
//! paraphrases the request.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::{error::DraftError, models::Item, params::CreatePlan};

pub mod command;

pub use command::CommandDrafter;

const TITLE_CHARS: usize = 50;
const CONTENT_CHARS: usize = 100;

/// External capability that drafts and summarizes plans.
#[async_trait]
pub trait Drafter: Send + Sync {
    /// Proposes a plan for `user`. `Ok(None)` means no structured result.
    async fn draft(&self, system: &str, user: &str) -> Result<Option<Value>, DraftError>;

    /// Writes a natural-language summary.
    async fn summarize(&self, system: &str, user: &str) -> Result<String, DraftError>;
}

/// The part of a drafted plan the flow uses. Any proposed ID is ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlanSpec {
    pub title: String,
    #[serde(alias = "posts")]
    pub items: Vec<Item>,
}

impl PlanSpec {
    /// Parses a drafting payload.
    ///
    /// # Errors
    ///
    /// `DraftError::Malformed` if the payload does not have the expected
    /// shape, `DraftError::Incomplete` if it has no title or no items.
    pub fn from_payload(payload: Value) -> Result<Self, DraftError> {
        let spec: PlanSpec = serde_json::from_value(payload)?;
        if spec.title.trim().is_empty() {
            return Err(DraftError::Incomplete {
                reason: "missing title".to_string(),
            });
        }
        if spec.items.is_empty() {
            return Err(DraftError::Incomplete {
                reason: "no items".to_string(),
            });
        }
        Ok(spec)
    }

    /// Single-item plan standing in for a failed or absent draft.
    pub fn fallback(request: &str) -> Self {
        let content = if request.trim().is_empty() {
            "Complete the requested work".to_string()
        } else {
            truncate(request, CONTENT_CHARS)
        };

        Self {
            title: format!("Plan for: {}", truncate(request, TITLE_CHARS)),
            items: vec![Item::new(content)],
        }
    }

    /// Store parameters creating this plan under `id`.
    pub fn into_create(self, id: impl Into<String>) -> CreatePlan {
        CreatePlan {
            id: id.into(),
            title: self.title,
            items: self.items,
        }
    }
}

/// First `max` characters of `text`, with `...` appended when cut.
fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}
