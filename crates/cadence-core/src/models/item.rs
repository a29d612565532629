//! Plan item definition.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One unit of work within a plan.
///
/// Two items are the same item only if every field matches; there is no
/// separate identity.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Item {
    /// Display text describing the work
    pub content: String,

    /// Labels rendered alongside the item
    #[serde(default, alias = "hashtags")]
    pub tags: Vec<String>,

    /// Prompt for media generation; a non-empty prompt makes this a media item
    #[serde(default, alias = "image_prompt", skip_serializing_if = "Option::is_none")]
    pub media_prompt: Option<String>,

    /// Free-form schedule label, never interpreted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_time: Option<String>,
}

/// Classification derived from an item's fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Text,
    Media,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Text => "text",
            ItemKind::Media => "media",
        }
    }
}

impl Item {
    /// Creates a text item with the given content.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }

    /// Adds tags to the item.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Sets the media prompt.
    pub fn with_media_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.media_prompt = Some(prompt.into());
        self
    }

    /// Sets the schedule label.
    pub fn with_scheduled_time(mut self, scheduled: impl Into<String>) -> Self {
        self.scheduled_time = Some(scheduled.into());
        self
    }

    /// The media prompt, if present and non-empty.
    pub fn media(&self) -> Option<&str> {
        self.media_prompt.as_deref().filter(|p| !p.is_empty())
    }

    /// The schedule label, if present and non-empty.
    pub fn schedule(&self) -> Option<&str> {
        self.scheduled_time.as_deref().filter(|s| !s.is_empty())
    }

    /// Derived classification: media when a media prompt is set, text otherwise.
    pub fn kind(&self) -> ItemKind {
        if self.media().is_some() {
            ItemKind::Media
        } else {
            ItemKind::Text
        }
    }
}
