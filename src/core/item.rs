//! Display items handed to the host, and the builder that makes them.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::core::dispatch::EvaluationResult;
use crate::platform::{ClipboardAccess, IconResolver, DEFAULT_ICON};

/// Identity tag shared by every item this engine produces.
pub const ITEM_TAG: &str = "calculate_anything";

/// Id of the synthetic "no result" item.
pub const PLACEHOLDER_ID: &str = "calculate_anything_no_result";

/// Deferred, zero-argument callback the host runs when the user picks it.
#[derive(Clone)]
pub struct Action {
    pub id: &'static str,
    pub label: String,
    callback: Arc<dyn Fn() + Send + Sync>,
}

impl Action {
    pub fn new(
        id: &'static str,
        label: impl Into<String>,
        callback: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        Self {
            id,
            label: label.into(),
            callback: Arc::new(callback),
        }
    }

    pub fn invoke(&self) {
        (self.callback)()
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("id", &self.id)
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// A result as the host shows it. Position in the returned list is the rank.
#[derive(Debug, Clone, Serialize)]
pub struct DisplayItem {
    pub id: String,
    pub tag: &'static str,
    pub icon: PathBuf,
    pub text: String,
    pub subtext: String,
    #[serde(serialize_with = "serialize_actions")]
    pub actions: Vec<Action>,
}

fn serialize_actions<S>(actions: &[Action], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_seq(actions.iter().map(|a| a.id))
}

/// Converts evaluation results into display items.
#[derive(Clone)]
pub struct ItemBuilder {
    icons: Arc<dyn IconResolver>,
    clipboard: Arc<dyn ClipboardAccess>,
    copy_label: String,
}

impl ItemBuilder {
    pub fn new(
        icons: Arc<dyn IconResolver>,
        clipboard: Arc<dyn ClipboardAccess>,
        copy_label: impl Into<String>,
    ) -> Self {
        Self {
            icons,
            clipboard,
            copy_label: copy_label.into(),
        }
    }

    /// Build the item at position `rank` of the merged output.
    pub fn build(&self, result: EvaluationResult, rank: usize) -> DisplayItem {
        let icon = self
            .icons
            .resolve(result.icon.as_deref().unwrap_or(DEFAULT_ICON));

        let actions = match result.clipboard {
            Some(text) => vec![self.copy_action(text)],
            None => Vec::new(),
        };

        DisplayItem {
            id: format!("{}_{}", ITEM_TAG, rank),
            tag: ITEM_TAG,
            icon,
            text: result.name,
            subtext: result.description,
            actions,
        }
    }

    /// Build every result, ranked by position.
    pub fn build_all(&self, results: Vec<EvaluationResult>) -> Vec<DisplayItem> {
        results
            .into_iter()
            .enumerate()
            .map(|(rank, result)| self.build(result, rank))
            .collect()
    }

    /// The "no result" item: default icon, no actions.
    pub fn placeholder(&self, text: String, subtext: String) -> DisplayItem {
        DisplayItem {
            id: PLACEHOLDER_ID.to_string(),
            tag: ITEM_TAG,
            icon: self.icons.resolve(DEFAULT_ICON),
            text,
            subtext,
            actions: Vec::new(),
        }
    }

    fn copy_action(&self, text: String) -> Action {
        let clipboard = Arc::clone(&self.clipboard);
        Action::new("clipboard", self.copy_label.clone(), move || {
            if let Err(e) = clipboard.set_text(&text) {
                tracing::warn!(error = %e, "failed to copy result");
            }
        })
    }
}
