//! Core query pipeline - platform-agnostic dispatch logic.
//!
//! - [`trigger`] - picks the [`Mode`] a query asks for
//! - [`dispatch`] - runs the mode's evaluators and merges their output
//! - [`item`] - turns evaluation results into display items
//! - [`placeholder`] - decides on the synthetic "no result" item
//! - [`engine`] - wires the above together for the host

pub mod dispatch;
pub mod engine;
pub mod item;
pub mod mode;
pub mod placeholder;
pub mod session;
pub mod trigger;

pub use dispatch::{Dispatcher, EvaluationResult, Evaluator, EvaluatorTable};
pub use engine::QueryEngine;
pub use item::{Action, DisplayItem, ItemBuilder};
pub use mode::Mode;
pub use session::{QuerySession, Ticket};
pub use trigger::{route, Route};
