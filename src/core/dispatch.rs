//! Evaluator trait and the dispatcher that fans a query out to evaluators.
//!
//! # Merge policy
//!
//! Each mode owns a fixed, ordered list of evaluators. Their outputs are
//! concatenated in list order, so list position is the tie-break between
//! evaluators and each evaluator's own ordering is kept as-is. Completion
//! order never matters, including in [`Dispatcher::dispatch_parallel`].
//!
//! # Failure isolation
//!
//! An evaluator that returns an error or panics contributes nothing. The
//! failure is logged and its siblings run as usual; callers never see it.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;

use crate::core::Mode;
use crate::error::CalcResult;

/// Raw evaluator output, before display formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationResult {
    pub name: String,
    pub description: String,
    /// Icon path relative to the asset dir; the default icon if `None`
    pub icon: Option<String>,
    /// Text copied when the item is activated
    pub clipboard: Option<String>,
}

impl EvaluationResult {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            icon: None,
            clipboard: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_clipboard(mut self, clipboard: impl Into<String>) -> Self {
        self.clipboard = Some(clipboard.into());
        self
    }
}

/// Turns the text after a trigger into zero or more results.
///
/// Results come back in the evaluator's own relevance order. Evaluators doing
/// I/O must bound it themselves; a slow evaluator stalls the whole dispatch.
pub trait Evaluator: Send + Sync {
    /// Short name used in logs (e.g., "units", "hex")
    fn name(&self) -> &str;

    /// Keyword this evaluator answers to by default
    fn keyword(&self) -> &str;

    fn evaluate(&self, text: &str) -> CalcResult<Vec<EvaluationResult>>;
}

/// Mode -> evaluator list. The calculator mode fans out to units,
/// expression and percentages, in that order; every other mode has exactly
/// one evaluator.
#[derive(Clone)]
pub struct EvaluatorTable {
    pub units: Arc<dyn Evaluator>,
    pub calculator: Arc<dyn Evaluator>,
    pub percentages: Arc<dyn Evaluator>,
    pub time: Arc<dyn Evaluator>,
    pub dec: Arc<dyn Evaluator>,
    pub hex: Arc<dyn Evaluator>,
    pub oct: Arc<dyn Evaluator>,
    pub bin: Arc<dyn Evaluator>,
}

impl EvaluatorTable {
    /// Evaluators for `mode`, in merge order.
    pub fn evaluators(&self, mode: Mode) -> Vec<&dyn Evaluator> {
        match mode {
            Mode::Calculator => vec![
                self.units.as_ref(),
                self.calculator.as_ref(),
                self.percentages.as_ref(),
            ],
            Mode::Time => vec![self.time.as_ref()],
            Mode::Dec => vec![self.dec.as_ref()],
            Mode::Hex => vec![self.hex.as_ref()],
            Mode::Oct => vec![self.oct.as_ref()],
            Mode::Bin => vec![self.bin.as_ref()],
        }
    }
}

/// Runs the evaluators of a mode and merges their output.
#[derive(Clone)]
pub struct Dispatcher {
    table: EvaluatorTable,
}

impl Dispatcher {
    pub fn new(table: EvaluatorTable) -> Self {
        Self { table }
    }

    /// Run each evaluator of `mode` in turn and concatenate their results.
    pub fn dispatch(&self, mode: Mode, remainder: &str) -> Vec<EvaluationResult> {
        self.table
            .evaluators(mode)
            .into_iter()
            .flat_map(|evaluator| run_isolated(evaluator, remainder))
            .collect()
    }

    /// Same output as [`Dispatcher::dispatch`], with the evaluators running on
    /// scoped threads. Results are buffered and reassembled in list order.
    pub fn dispatch_parallel(&self, mode: Mode, remainder: &str) -> Vec<EvaluationResult> {
        let evaluators = self.table.evaluators(mode);
        if evaluators.len() < 2 {
            return self.dispatch(mode, remainder);
        }

        thread::scope(|scope| {
            let handles: Vec<_> = evaluators
                .iter()
                .map(|&evaluator| scope.spawn(move || run_isolated(evaluator, remainder)))
                .collect();

            handles
                .into_iter()
                .flat_map(|handle| handle.join().unwrap_or_default())
                .collect()
        })
    }
}

/// Call one evaluator, turning errors and panics into an empty contribution.
fn run_isolated(evaluator: &dyn Evaluator, text: &str) -> Vec<EvaluationResult> {
    match panic::catch_unwind(AssertUnwindSafe(|| evaluator.evaluate(text))) {
        Ok(Ok(results)) => {
            tracing::trace!(
                evaluator = evaluator.name(),
                count = results.len(),
                "evaluator finished"
            );
            results
        }
        Ok(Err(e)) => {
            tracing::warn!(evaluator = evaluator.name(), error = %e, "evaluator failed");
            Vec::new()
        }
        Err(payload) => {
            let message = panic_message(&*payload);
            tracing::warn!(evaluator = evaluator.name(), panic = %message, "evaluator panicked");
            Vec::new()
        }
    }
}

/// Text of a panic payload; `panic!` produces either `&str` or `String`.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}
