use std::sync::{Arc, Mutex};

use crate::error::{CalcError, CalcResult};

/// Write text to the system clipboard
pub trait ClipboardAccess: Send + Sync {
    fn set_text(&self, content: &str) -> CalcResult<()>;
}

/// Cross-platform clipboard using arboard
#[cfg(feature = "clipboard")]
pub struct ArboardClipboard {
    clipboard: Mutex<arboard::Clipboard>,
}

#[cfg(feature = "clipboard")]
impl ArboardClipboard {
    pub fn new() -> CalcResult<Self> {
        let clipboard =
            arboard::Clipboard::new().map_err(|e| CalcError::Clipboard(e.to_string()))?;
        Ok(Self {
            clipboard: Mutex::new(clipboard),
        })
    }
}

#[cfg(feature = "clipboard")]
impl ClipboardAccess for ArboardClipboard {
    fn set_text(&self, content: &str) -> CalcResult<()> {
        self.clipboard
            .lock()
            .map_err(|e| CalcError::Clipboard(e.to_string()))?
            .set_text(content)
            .map_err(|e| CalcError::Clipboard(e.to_string()))
    }
}

/// Clipboard that keeps every write in memory. Used when no system
/// clipboard is available and in tests.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    writes: Mutex<Vec<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// All texts written so far, oldest first
    pub fn writes(&self) -> Vec<String> {
        self.writes
            .lock()
            .map(|w| w.clone())
            .unwrap_or_default()
    }

    pub fn last(&self) -> Option<String> {
        self.writes().pop()
    }
}

impl ClipboardAccess for MemoryClipboard {
    fn set_text(&self, content: &str) -> CalcResult<()> {
        self.writes
            .lock()
            .map_err(|e| CalcError::Clipboard(e.to_string()))?
            .push(content.to_string());
        Ok(())
    }
}

/// The best clipboard available: arboard when built with the `clipboard`
/// feature and a display is reachable, otherwise an in-memory one.
pub fn system_clipboard() -> Arc<dyn ClipboardAccess> {
    #[cfg(feature = "clipboard")]
    {
        match ArboardClipboard::new() {
            Ok(clipboard) => return Arc::new(clipboard),
            Err(e) => tracing::warn!(error = %e, "system clipboard unavailable"),
        }
    }

    Arc::new(MemoryClipboard::new())
}
