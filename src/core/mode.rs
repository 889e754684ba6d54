//! Computation modes a query can request.

use std::fmt;

/// Category of computation selected by a trigger keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Calculator,
    Time,
    Dec,
    Hex,
    Oct,
    Bin,
}

impl Mode {
    /// Order in which triggers are tested. Calculator is the catch-all and
    /// goes last, but it is still prefix-gated like every other mode.
    pub const PRIORITY: [Mode; 6] = [
        Mode::Time,
        Mode::Dec,
        Mode::Hex,
        Mode::Oct,
        Mode::Bin,
        Mode::Calculator,
    ];

    /// Order in which trigger keywords are stored in the configuration.
    /// Bin comes before Hex here, unlike in [`Mode::PRIORITY`].
    pub const STORAGE: [Mode; 6] = [
        Mode::Calculator,
        Mode::Time,
        Mode::Dec,
        Mode::Bin,
        Mode::Hex,
        Mode::Oct,
    ];

    /// Index of this mode's keyword in the configured trigger list.
    pub fn storage_index(self) -> usize {
        match self {
            Mode::Calculator => 0,
            Mode::Time => 1,
            Mode::Dec => 2,
            Mode::Bin => 3,
            Mode::Hex => 4,
            Mode::Oct => 5,
        }
    }

    /// Lowercase tag used in localization keys (`no-result-<tag>-description`).
    pub fn tag(self) -> &'static str {
        match self {
            Mode::Calculator => "calculator",
            Mode::Time => "time",
            Mode::Dec => "dec",
            Mode::Hex => "hex",
            Mode::Oct => "oct",
            Mode::Bin => "bin",
        }
    }

    /// Keyword used when no trigger is configured for this mode.
    pub fn default_keyword(self) -> &'static str {
        match self {
            Mode::Calculator => "=",
            other => other.tag(),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
