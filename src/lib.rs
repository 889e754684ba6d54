//! calcany - calculate-anything query engine for keyboard launchers.
//!
//! One line of input such as `= 10 km to mi`, `time london` or `hex ff`
//! becomes a ranked list of display items.
//!
//! # Architecture
//!
//! - [`config`] - Settings file and the immutable [`Snapshot`] built from it
//! - [`core`] - Trigger routing, evaluator dispatch, item building, placeholder
//! - [`services`] - Bundled evaluators (calculator, units, percentages, time, bases)
//! - [`platform`] - Clipboard and icon path seams
//! - [`i18n`] - Localized strings
//!
//! # Example
//!
//! ```ignore
//! use calcany::{Config, QueryEngine};
//!
//! let engine = QueryEngine::from_config(&Config::load());
//! for item in engine.query("= 2^10") {
//!     println!("{} - {}", item.text, item.subtext);
//! }
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod i18n;
pub mod platform;
pub mod services;

mod error;

pub use config::{Config, Snapshot};
pub use core::{DisplayItem, EvaluationResult, Evaluator, Mode, QueryEngine};
pub use error::{CalcError, CalcResult};
