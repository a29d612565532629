//! Prompt text sent to drafters and executors.

use crate::models::Item;

pub(crate) const DRAFT_SYSTEM: &str = "You are a planning assistant. Create a concise, actionable plan. \
     Each item should have clear content, relevant tags, and a media prompt where appropriate. \
     Focus on clarity and order of execution.";

pub(crate) const SUMMARY_SYSTEM: &str =
    "You are a planning assistant. Your task is to summarize this completed plan.";

pub(crate) fn draft_request(request: &str) -> String {
    format!("Create a plan with specific items to accomplish: {request}")
}

/// Prompt for one item, embedding the rendered plan.
pub(crate) fn item_prompt(plan_text: &str, index: usize, item: &Item) -> String {
    let tags = if item.tags.is_empty() {
        "No tags".to_string()
    } else {
        item.tags.join(" ")
    };
    let media = match item.media() {
        Some(prompt) => format!("Media prompt: {prompt}"),
        None => "No media required".to_string(),
    };

    let mut prompt = format!(
        "CURRENT PLAN STATUS:\n{plan_text}\n\
         YOUR CURRENT TASK:\n\
         You are now working on item {index}:\n\n\
         Content: \"{}\"\n\
         Tags: {tags}\n\
         {media}\n",
        item.content
    );
    if let Some(schedule) = item.schedule() {
        prompt.push_str(&format!("Scheduled: {schedule}\n"));
    }
    prompt.push_str(
        "\nPlease process this item appropriately. If media is required, generate it first.\n\
         When you are done, confirm that the item has been processed.\n",
    );
    prompt
}

pub(crate) fn summary_request(plan_text: &str) -> String {
    format!(
        "The plan has been completed. Here is the final plan status:\n\n{plan_text}\n\
         Please provide a summary of what was accomplished and any final thoughts or \
         statistics about the plan."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_prompt_mentions_item_fields() {
        let item = Item::new("Launch visual")
            .with_tags(["#spring", "#launch"])
            .with_media_prompt("flowers")
            .with_scheduled_time("Monday 9am");
        let prompt = item_prompt("Plan: X (ID: x)\n", 2, &item);

        assert!(prompt.starts_with("CURRENT PLAN STATUS:\nPlan: X (ID: x)\n"));
        assert!(prompt.contains("You are now working on item 2:"));
        assert!(prompt.contains("Content: \"Launch visual\""));
        assert!(prompt.contains("Tags: #spring #launch"));
        assert!(prompt.contains("Media prompt: flowers"));
        assert!(prompt.contains("Scheduled: Monday 9am"));
    }

    #[test]
    fn test_item_prompt_without_optional_fields() {
        let prompt = item_prompt("", 0, &Item::new("Recap"));
        assert!(prompt.contains("Tags: No tags"));
        assert!(prompt.contains("No media required"));
        assert!(!prompt.contains("Scheduled:"));
    }
}
