//! Plan model and the pure mutation rules shared by every store backend.
//!
//! Validation, the update merge rule and status bookkeeping live here so the
//! in-memory store, the SQLite store and the flow's fallback path all apply
//! exactly the same logic.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{Item, ItemStatus};
use crate::error::{PlannerError, Result};

/// An ordered collection of items with per-item status and notes.
///
/// `statuses` and `notes` are index-aligned with `items`. Readers must not
/// assume the alignment holds for plans built outside [`Plan::new`]; use
/// [`Plan::status`] / [`Plan::note`] or call [`Plan::normalize`] first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Plan {
    /// Unique key, fixed at creation
    pub id: String,

    /// Display title
    pub title: String,

    /// Items in execution order
    pub items: Vec<Item>,

    /// Status per item
    #[serde(default)]
    pub statuses: Vec<ItemStatus>,

    /// Free-text notes per item
    #[serde(default)]
    pub notes: Vec<String>,

    /// Timestamp when the plan was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the plan was last modified (UTC)
    pub updated_at: Timestamp,
}

impl Plan {
    /// Builds a new plan with every item in `Draft` and empty notes.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::InvalidInput` if the id or title is empty or if
    /// there are no items.
    pub fn new(id: impl Into<String>, title: impl Into<String>, items: Vec<Item>) -> Result<Self> {
        let id = id.into();
        let title = title.into();

        if id.trim().is_empty() {
            return Err(PlannerError::invalid_input("id").with_reason("Plan ID cannot be empty"));
        }
        if title.trim().is_empty() {
            return Err(PlannerError::invalid_input("title").with_reason("Title is required"));
        }
        if items.is_empty() {
            return Err(PlannerError::invalid_input("items")
                .with_reason("Items must be a non-empty list of item objects"));
        }

        let now = Timestamp::now();
        Ok(Self {
            id,
            title,
            statuses: vec![ItemStatus::Draft; items.len()],
            notes: vec![String::new(); items.len()],
            items,
            created_at: now,
            updated_at: now,
        })
    }

    /// Status of the item at `index`, `Draft` when no status was recorded.
    pub fn status(&self, index: usize) -> ItemStatus {
        self.statuses.get(index).copied().unwrap_or_default()
    }

    /// Notes of the item at `index`, empty when none were recorded.
    pub fn note(&self, index: usize) -> &str {
        self.notes.get(index).map(String::as_str).unwrap_or_default()
    }

    /// Restores `len(statuses) == len(notes) == len(items)`.
    pub fn normalize(&mut self) {
        let len = self.items.len();
        self.statuses.resize(len, ItemStatus::Draft);
        self.notes.resize(len, String::new());
    }

    /// Number of items currently in `status`.
    pub fn count(&self, status: ItemStatus) -> usize {
        (0..self.items.len())
            .filter(|&i| self.status(i) == status)
            .count()
    }

    /// Percentage of completed items.
    pub fn progress(&self) -> f64 {
        if self.items.is_empty() {
            0.0
        } else {
            self.count(ItemStatus::Completed) as f64 / self.items.len() as f64 * 100.0
        }
    }

    /// Lowest index whose status is still active.
    pub fn next_active(&self) -> Option<usize> {
        (0..self.items.len()).find(|&i| self.status(i).is_active())
    }

    /// Validates an externally supplied index against the item list.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::IndexOutOfRange` unless `0 <= index < len`.
    pub fn checked_index(&self, index: i64) -> Result<usize> {
        usize::try_from(index)
            .ok()
            .filter(|&i| i < self.items.len())
            .ok_or(PlannerError::IndexOutOfRange {
                index,
                len: self.items.len(),
            })
    }

    /// Applies an update and returns a description of what changed.
    ///
    /// A new item keeps the status and notes of the old item at the same
    /// index only when both items are equal field for field; every other
    /// position starts over as `Draft` with empty notes. Nothing is modified
    /// when validation fails.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::InvalidInput` for an empty title or an empty
    /// item list.
    pub fn apply_update(&mut self, title: Option<&str>, items: Option<Vec<Item>>) -> Result<Vec<String>> {
        if title.is_some_and(|t| t.trim().is_empty()) {
            return Err(PlannerError::invalid_input("title").with_reason("Title cannot be empty"));
        }
        if items.as_ref().is_some_and(Vec::is_empty) {
            return Err(PlannerError::invalid_input("items")
                .with_reason("Items must be a non-empty list of item objects"));
        }

        let mut changes = Vec::new();

        if let Some(title) = title {
            if title != self.title {
                changes.push(format!("Title changed to '{title}'"));
            }
            self.title = title.to_string();
        }

        if let Some(items) = items {
            let mut statuses = Vec::with_capacity(items.len());
            let mut notes = Vec::with_capacity(items.len());
            let mut preserved = 0;

            for (i, item) in items.iter().enumerate() {
                if self.items.get(i) == Some(item) {
                    statuses.push(self.status(i));
                    notes.push(self.note(i).to_string());
                    preserved += 1;
                } else {
                    statuses.push(ItemStatus::Draft);
                    notes.push(String::new());
                }
            }

            changes.push(format!(
                "Items replaced: {} total, {preserved} unchanged, {} reset to draft",
                items.len(),
                items.len() - preserved
            ));

            self.items = items;
            self.statuses = statuses;
            self.notes = notes;
        }

        self.touch();
        Ok(changes)
    }

    /// Sets the status and/or notes of one item after validating the input.
    ///
    /// Returns the validated index.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::IndexOutOfRange` for an index outside the item
    /// list and `PlannerError::InvalidInput` for an unknown status name.
    pub fn apply_mark(&mut self, index: i64, status: Option<&str>, notes: Option<&str>) -> Result<usize> {
        let index = self.checked_index(index)?;
        let status = status
            .map(|s| {
                s.parse::<ItemStatus>()
                    .map_err(|reason| PlannerError::invalid_input("status").with_reason(reason))
            })
            .transpose()?;

        self.normalize();
        if let Some(status) = status {
            self.statuses[index] = status;
        }
        if let Some(notes) = notes {
            self.notes[index] = notes.to_string();
        }
        self.touch();
        Ok(index)
    }

    /// Sets an item's status without validation, growing short bookkeeping
    /// vectors up to the item count. Indices past the last item are
    /// ignored. Returns whether the item exists.
    pub fn force_status(&mut self, index: usize, status: ItemStatus, notes: Option<&str>) -> bool {
        if index >= self.items.len() {
            return false;
        }
        if self.statuses.len() <= index {
            self.statuses.resize(index + 1, ItemStatus::Draft);
        }
        self.statuses[index] = status;

        if let Some(notes) = notes {
            if self.notes.len() <= index {
                self.notes.resize(index + 1, String::new());
            }
            self.notes[index] = notes.to_string();
        }
        true
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}
