//! Localized strings for user-facing text.
//!
//! Only `en_US` ships built in. Other languages (or tweaks to English) are
//! overlaid from `<config_dir>/calcany/lang/<language>.toml`:
//!
//! ```toml
//! [misc]
//! no-result = "Kein Ergebnis"
//! ```

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CalcError, CalcResult};

/// Resolves a `(key, namespace)` pair to display text.
///
/// Implementations must always return something; unknown keys fall back to a
/// literal rather than failing.
pub trait Localizer: Send + Sync {
    fn translate(&self, key: &str, namespace: &str) -> String;
}

type Table = HashMap<String, HashMap<String, String>>;

static EN_US: Lazy<Table> = Lazy::new(|| {
    let mut misc = HashMap::new();

    misc.insert("no-result", "No result");
    misc.insert("copy-to-clipboard", "Copy to clipboard");
    misc.insert(
        "no-result-calculator-description",
        "Enter an expression, a unit conversion or a percentage",
    );
    misc.insert(
        "no-result-time-description",
        "Enter a city, \"now\" or an offset like +2 hours",
    );
    misc.insert("no-result-dec-description", "Enter a decimal number");
    misc.insert("no-result-hex-description", "Enter a hexadecimal number");
    misc.insert("no-result-oct-description", "Enter an octal number");
    misc.insert("no-result-bin-description", "Enter a binary number");

    let mut table: Table = HashMap::new();
    table.insert(
        "misc".to_string(),
        misc.into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    );
    table
});

/// Table-backed [`Localizer`] with the built-in English strings as base.
#[derive(Debug, Clone)]
pub struct Translator {
    table: Table,
}

impl Translator {
    /// English strings only.
    pub fn en_us() -> Self {
        Self {
            table: EN_US.clone(),
        }
    }

    /// Built-in strings overlaid with the user's language file, if any.
    /// A missing or broken file is logged and ignored.
    pub fn load(language: &str) -> Self {
        let mut translator = Self::en_us();

        let path = Self::language_path(language);
        if path.exists() {
            if let Err(e) = translator.overlay_file(&path) {
                tracing::warn!(path = %path.display(), error = %e, "ignoring language file");
            }
        } else if language != "en_US" {
            tracing::debug!(language, "no language file, using en_US strings");
        }

        translator
    }

    /// Path of the overlay file for `language`.
    pub fn language_path(language: &str) -> PathBuf {
        crate::config::Config::config_dir()
            .join("lang")
            .join(format!("{}.toml", language))
    }

    pub fn overlay_file(&mut self, path: &Path) -> CalcResult<()> {
        let content = fs::read_to_string(path)?;
        self.overlay_str(&content)
    }

    /// Merge `[namespace] key = "text"` entries over the current table.
    pub fn overlay_str(&mut self, content: &str) -> CalcResult<()> {
        let overlay: Table = toml::from_str(content)
            .map_err(|e| CalcError::Localization(e.to_string()))?;

        for (namespace, entries) in overlay {
            self.table.entry(namespace).or_default().extend(entries);
        }
        Ok(())
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::en_us()
    }
}

impl Localizer for Translator {
    fn translate(&self, key: &str, namespace: &str) -> String {
        match self.table.get(namespace).and_then(|ns| ns.get(key)) {
            Some(text) => text.clone(),
            None => {
                tracing::debug!(key, namespace, "missing translation");
                key.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_strings() {
        let t = Translator::en_us();
        assert_eq!(t.translate("no-result", "misc"), "No result");
        assert_eq!(
            t.translate("no-result-bin-description", "misc"),
            "Enter a binary number"
        );
    }

    #[test]
    fn test_unknown_key_falls_back_to_literal() {
        let t = Translator::en_us();
        assert_eq!(t.translate("does-not-exist", "misc"), "does-not-exist");
        assert_eq!(t.translate("no-result", "nowhere"), "no-result");
    }

    #[test]
    fn test_overlay_replaces_and_extends() {
        let mut t = Translator::en_us();
        t.overlay_str(
            r#"
            [misc]
            no-result = "Kein Ergebnis"

            [units]
            meter = "Meter"
            "#,
        )
        .unwrap();

        assert_eq!(t.translate("no-result", "misc"), "Kein Ergebnis");
        assert_eq!(t.translate("meter", "units"), "Meter");
        // Untouched keys survive the overlay
        assert_eq!(
            t.translate("no-result-hex-description", "misc"),
            "Enter a hexadecimal number"
        );
    }

    #[test]
    fn test_overlay_rejects_bad_toml() {
        let mut t = Translator::en_us();
        assert!(t.overlay_str("misc = [").is_err());
    }
}
