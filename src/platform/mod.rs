//! Platform abstraction layer.
//!
//! The query pipeline touches the host OS in two places: resolving icon
//! paths and writing to the clipboard when an item is activated. Both sit
//! behind traits so the pipeline stays testable without a display server.

mod clipboard;
mod icons;

pub use clipboard::{system_clipboard, ClipboardAccess, MemoryClipboard};
#[cfg(feature = "clipboard")]
pub use clipboard::ArboardClipboard;
pub use icons::{AssetDir, IconResolver, DEFAULT_ICON};
