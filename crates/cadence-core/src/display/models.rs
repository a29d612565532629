//! Display implementations for domain models.
//!
//! The plan rendering is a pure function of plan state: the flow renders the
//! same text from its own copy of a plan when the store cannot be reached.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::models::{ItemStatus, Plan, PlanSummary};

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header = format!("Plan: {} (ID: {})", self.title, self.id);
        writeln!(f, "{header}")?;
        // One longer than the header, counting its line break.
        writeln!(f, "{}", "=".repeat(header.chars().count() + 1))?;
        writeln!(f)?;

        let total = self.items.len();
        let completed = self.count(ItemStatus::Completed);
        if total > 0 {
            writeln!(
                f,
                "Progress: {completed}/{total} items completed ({:.1}%)",
                self.progress()
            )?;
        } else {
            writeln!(f, "Progress: 0/0 items completed (0%)")?;
        }
        writeln!(
            f,
            "Status: {completed} completed, {} ready, {} failed, {} draft",
            self.count(ItemStatus::Ready),
            self.count(ItemStatus::Failed),
            self.count(ItemStatus::Draft)
        )?;
        writeln!(f)?;
        writeln!(f, "Items:")?;

        for (i, item) in self.items.iter().enumerate() {
            writeln!(f, "{i}. {} Content: {}", self.status(i).mark(), item.content)?;
            if !item.tags.is_empty() {
                writeln!(f, "   Tags: {}", item.tags.join(" "))?;
            }
            if let Some(media) = item.media() {
                writeln!(f, "   Media Prompt: {media}")?;
            }
            if let Some(scheduled) = item.schedule() {
                writeln!(f, "   Scheduled: {scheduled}")?;
            }
            let notes = self.note(i);
            if !notes.is_empty() {
                writeln!(f, "   Notes: {notes}")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let active = if self.active { " (active)" } else { "" };
        writeln!(
            f,
            "• {}{active}: {} - {}/{} items completed (updated {})",
            self.id,
            self.title,
            self.completed_items,
            self.total_items,
            LocalDateTime(&self.updated_at)
        )
    }
}
