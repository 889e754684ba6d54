//! The query pipeline: route, dispatch, build items, maybe add a placeholder.

use std::sync::Arc;

use crate::config::{Config, Snapshot};
use crate::core::dispatch::{Dispatcher, EvaluatorTable};
use crate::core::item::{DisplayItem, ItemBuilder};
use crate::core::session::QuerySession;
use crate::core::{placeholder, trigger};
use crate::platform::{self, AssetDir};
use crate::services;

/// Host-facing entry point. Every call is independent; the only shared state
/// is the read-only configuration snapshot.
pub struct QueryEngine {
    snapshot: Arc<Snapshot>,
    dispatcher: Dispatcher,
    builder: ItemBuilder,
    session: QuerySession,
    parallel: bool,
}

impl QueryEngine {
    pub fn new(snapshot: Arc<Snapshot>, table: EvaluatorTable, builder: ItemBuilder) -> Self {
        Self {
            snapshot,
            dispatcher: Dispatcher::new(table),
            builder,
            session: QuerySession::new(),
            parallel: false,
        }
    }

    /// Engine with the bundled evaluators, the discovered asset dir and the
    /// system clipboard.
    pub fn from_config(config: &Config) -> Self {
        let snapshot = config.snapshot();
        let builder = ItemBuilder::new(
            Arc::new(AssetDir::discover()),
            platform::system_clipboard(),
            snapshot.translate("copy-to-clipboard", "misc"),
        );
        let table = services::default_table(config, &snapshot);
        Self::new(snapshot, table, builder)
    }

    /// Run multi-evaluator modes on scoped threads.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Turn one line of input into display items, best first.
    pub fn query(&self, raw: &str) -> Vec<DisplayItem> {
        let Some(route) = trigger::route(raw, &self.snapshot) else {
            tracing::debug!(query = raw, "no trigger matched");
            return Vec::new();
        };
        tracing::debug!(mode = %route.mode, remainder = route.remainder, "routed query");

        let results = if self.parallel {
            self.dispatcher.dispatch_parallel(route.mode, route.remainder)
        } else {
            self.dispatcher.dispatch(route.mode, route.remainder)
        };

        let items = self.builder.build_all(results);
        placeholder::maybe_append_placeholder(
            items,
            route.remainder,
            route.mode,
            &self.snapshot,
            &self.builder,
        )
    }

    /// Like [`QueryEngine::query`], but returns `None` if another query was
    /// started on this engine before this one finished.
    pub fn query_latest(&self, raw: &str) -> Option<Vec<DisplayItem>> {
        let ticket = self.session.begin();
        let items = self.query(raw);
        self.session.accept(ticket, items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dispatch::tests::{calculator_table, Behavior, Stub};
    use crate::core::dispatch::EvaluationResult;
    use crate::i18n::Translator;
    use crate::platform::MemoryClipboard;
    use std::thread;
    use std::time::Duration;

    fn snapshot(triggers: &[&str], always: bool) -> Arc<Snapshot> {
        Arc::new(Snapshot::new(
            triggers.iter().map(|s| s.to_string()).collect(),
            always,
            Arc::new(Translator::en_us()),
        ))
    }

    fn engine_with(
        snapshot: Arc<Snapshot>,
        table: EvaluatorTable,
        clipboard: Arc<MemoryClipboard>,
    ) -> QueryEngine {
        let builder = ItemBuilder::new(Arc::new(AssetDir::new("/assets")), clipboard, "Copy");
        QueryEngine::new(snapshot, table, builder)
    }

    fn fan_out_table() -> EvaluatorTable {
        calculator_table(
            Stub::returning("units", &["A"]),
            Stub::returning("calculator", &[]),
            Stub::returning("percentages", &["B", "C"]),
        )
    }

    fn texts(items: &[DisplayItem]) -> Vec<&str> {
        items.iter().map(|i| i.text.as_str()).collect()
    }

    #[test]
    fn test_fan_out_ranks() {
        let snapshot = snapshot(&crate::config::DEFAULT_TRIGGERS, false);
        for parallel in [false, true] {
            let engine = engine_with(
                snapshot.clone(),
                fan_out_table(),
                Arc::new(MemoryClipboard::new()),
            )
            .with_parallel(parallel);

            let items = engine.query("= 5");
            assert_eq!(texts(&items), ["A", "B", "C"]);
            let ids: Vec<_> = items.iter().map(|i| i.id.as_str()).collect();
            assert_eq!(
                ids,
                [
                    "calculate_anything_0",
                    "calculate_anything_1",
                    "calculate_anything_2"
                ]
            );
        }
    }

    #[test]
    fn test_failure_isolated_end_to_end() {
        let engine = engine_with(
            snapshot(&crate::config::DEFAULT_TRIGGERS, false),
            calculator_table(
                Stub::returning("units", &["A"]),
                Stub::with("calculator", Behavior::Panics),
                Stub::returning("percentages", &["B", "C"]),
            ),
            Arc::new(MemoryClipboard::new()),
        );
        assert_eq!(texts(&engine.query("= 5")), ["A", "B", "C"]);
    }

    #[test]
    fn test_empty_trigger_list_yields_nothing() {
        let units = Stub::returning("units", &["A"]);
        let engine = engine_with(
            snapshot(&[], true),
            calculator_table(
                units.clone(),
                Stub::returning("calculator", &["B"]),
                Stub::returning("percentages", &[]),
            ),
            Arc::new(MemoryClipboard::new()),
        );

        for input in ["", "= 2+2", "2+2", "time "] {
            assert!(engine.query(input).is_empty(), "{input}");
        }
        assert!(units.calls().is_empty());
    }

    #[test]
    fn test_unrouted_query_skips_evaluators() {
        let units = Stub::returning("units", &["A"]);
        let engine = engine_with(
            snapshot(&crate::config::DEFAULT_TRIGGERS, true),
            calculator_table(
                units.clone(),
                Stub::returning("calculator", &[]),
                Stub::returning("percentages", &[]),
            ),
            Arc::new(MemoryClipboard::new()),
        );

        assert!(engine.query("2+2").is_empty());
        assert!(units.calls().is_empty());
    }

    #[test]
    fn test_placeholder_for_bare_trigger() {
        let engine = engine_with(
            snapshot(&crate::config::DEFAULT_TRIGGERS, false),
            fan_out_table(),
            Arc::new(MemoryClipboard::new()),
        );

        let items = engine.query("time  ");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].text, "No result");
        assert_eq!(
            items[0].subtext,
            "Enter a city, \"now\" or an offset like +2 hours"
        );

        // Non-empty remainder, flag off: nothing
        assert!(engine.query("time atlantis").is_empty());
    }

    #[test]
    fn test_clipboard_wiring() {
        let clipboard = Arc::new(MemoryClipboard::new());
        let mut table = fan_out_table();
        table.dec = Stub::with(
            "dec",
            Behavior::Returns(vec![
                EvaluationResult::new("42", "decimal").with_clipboard("42"),
                EvaluationResult::new("no copy", ""),
            ]),
        );
        let engine = engine_with(
            snapshot(&crate::config::DEFAULT_TRIGGERS, false),
            table,
            clipboard.clone(),
        );

        let items = engine.query("dec 42");
        assert_eq!(items[0].actions.len(), 1);
        assert!(items[1].actions.is_empty());

        items[0].actions[0].invoke();
        assert_eq!(clipboard.writes(), ["42"]);
    }

    #[test]
    fn test_superseded_query_dropped() {
        let mut table = fan_out_table();
        table.time = Stub::with(
            "time",
            Behavior::Sleeps(
                Duration::from_millis(500),
                vec![EvaluationResult::new("12:00", "London")],
            ),
        );
        let engine = Arc::new(engine_with(
            snapshot(&crate::config::DEFAULT_TRIGGERS, false),
            table,
            Arc::new(MemoryClipboard::new()),
        ));

        let slow = {
            let engine = Arc::clone(&engine);
            thread::spawn(move || engine.query_latest("time london"))
        };
        thread::sleep(Duration::from_millis(100));
        let fast = engine.query_latest("= 1");

        assert_eq!(fast.map(|items| items.len()), Some(3));
        assert!(slow.join().unwrap().is_none());
    }
}
