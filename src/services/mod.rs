//! Bundled evaluators.
//!
//! Each one is a thin adapter: expression parsing comes from `meval`, time
//! zones from `chrono-tz`, unit factors from a static table.

pub mod base;
pub mod calculator;
pub mod format;
pub mod percentages;
pub mod time;
pub mod units;

use std::sync::Arc;

use crate::config::{Config, Snapshot};
use crate::core::{EvaluatorTable, Mode};

pub use base::{BaseEvaluator, Radix};
pub use calculator::CalculatorEvaluator;
pub use percentages::PercentagesEvaluator;
pub use time::TimeEvaluator;
pub use units::UnitsEvaluator;

/// Evaluator table wired from `config`, with keywords taken from `snapshot`.
pub fn default_table(config: &Config, snapshot: &Snapshot) -> EvaluatorTable {
    let keyword = |mode: Mode| snapshot.display_keyword(mode).to_string();
    let base = |mode: Mode| -> Arc<BaseEvaluator> {
        let radix = Radix::for_mode(mode).unwrap_or(Radix::Dec);
        Arc::new(BaseEvaluator::new(keyword(mode), radix))
    };

    EvaluatorTable {
        units: Arc::new(UnitsEvaluator::new(keyword(Mode::Calculator), config.units.mode)),
        calculator: Arc::new(CalculatorEvaluator::new(keyword(Mode::Calculator))),
        percentages: Arc::new(PercentagesEvaluator::new(keyword(Mode::Calculator))),
        time: Arc::new(TimeEvaluator::new(keyword(Mode::Time), &config.time.cities())),
        dec: base(Mode::Dec),
        hex: base(Mode::Hex),
        oct: base(Mode::Oct),
        bin: base(Mode::Bin),
    }
}
