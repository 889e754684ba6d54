//! When to show a "no result" item instead of an empty list.

use crate::config::Snapshot;
use crate::core::item::{DisplayItem, ItemBuilder};
use crate::core::Mode;

const NAMESPACE: &str = "misc";

/// Whether an empty result list should get a placeholder.
///
/// Only empty lists qualify, and then only if the user typed nothing after
/// the trigger (with triggers configured) or the config asks to always show
/// one.
pub fn should_show(items: &[DisplayItem], remainder: &str, cfg: &Snapshot) -> bool {
    if !items.is_empty() {
        return false;
    }

    let bare_trigger = remainder.trim().is_empty() && cfg.has_triggers();
    bare_trigger || cfg.show_empty_placeholder()
}

/// Append the placeholder to `items` if [`should_show`] says so.
pub fn maybe_append_placeholder(
    mut items: Vec<DisplayItem>,
    remainder: &str,
    mode: Mode,
    cfg: &Snapshot,
    builder: &ItemBuilder,
) -> Vec<DisplayItem> {
    if should_show(&items, remainder, cfg) {
        let text = cfg.translate("no-result", NAMESPACE);
        let subtext = cfg.translate(&format!("no-result-{}-description", mode.tag()), NAMESPACE);
        // Always the only item, so it sits at rank 0
        items.push(builder.placeholder(text, subtext));
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dispatch::EvaluationResult;
    use crate::i18n::{Localizer, Translator};
    use crate::platform::{AssetDir, MemoryClipboard};
    use std::sync::Arc;

    /// Echoes keys back so tests can assert on them directly.
    struct KeyEcho;

    impl Localizer for KeyEcho {
        fn translate(&self, key: &str, namespace: &str) -> String {
            format!("{}:{}", namespace, key)
        }
    }

    fn builder() -> ItemBuilder {
        ItemBuilder::new(
            Arc::new(AssetDir::new("/assets")),
            Arc::new(MemoryClipboard::new()),
            "Copy",
        )
    }

    fn snapshot(triggers: &[&str], always: bool) -> Snapshot {
        Snapshot::new(
            triggers.iter().map(|s| s.to_string()).collect(),
            always,
            Arc::new(KeyEcho),
        )
    }

    #[test]
    fn test_bare_trigger_gets_placeholder() {
        let cfg = snapshot(&["=", "time"], false);
        let items = maybe_append_placeholder(Vec::new(), "   ", Mode::Time, &cfg, &builder());

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, crate::core::item::PLACEHOLDER_ID);
        assert_eq!(items[0].text, "misc:no-result");
        assert_eq!(items[0].subtext, "misc:no-result-time-description");
        assert!(items[0].actions.is_empty());
    }

    #[test]
    fn test_non_empty_remainder_suppressed() {
        let cfg = snapshot(&["=", "time"], false);
        let items = maybe_append_placeholder(Vec::new(), "gibberish", Mode::Time, &cfg, &builder());
        assert!(items.is_empty());
    }

    #[test]
    fn test_flag_forces_placeholder() {
        let cfg = snapshot(&["=", "time", "dec", "bin", "hex", "oct"], true);
        let items = maybe_append_placeholder(Vec::new(), "zz", Mode::Hex, &cfg, &builder());
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].subtext, "misc:no-result-hex-description");
    }

    #[test]
    fn test_flag_without_triggers() {
        assert!(!should_show(&[], "", &snapshot(&[], false)));
        assert!(should_show(&[], "", &snapshot(&[], true)));
    }

    #[test]
    fn test_noop_when_items_present() {
        let cfg = snapshot(&["="], true);
        let b = builder();
        let existing = vec![b.build(EvaluationResult::new("= 4", "2+2"), 0)];

        let items = maybe_append_placeholder(existing, "", Mode::Calculator, &cfg, &b);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].text, "= 4");
    }

    #[test]
    fn test_real_strings() {
        let cfg = Snapshot::new(vec!["=".into()], false, Arc::new(Translator::en_us()));
        let items = maybe_append_placeholder(Vec::new(), "", Mode::Calculator, &cfg, &builder());
        assert_eq!(items[0].text, "No result");
        assert_eq!(
            items[0].subtext,
            "Enter an expression, a unit conversion or a percentage"
        );
    }
}
