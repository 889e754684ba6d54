//! Trigger routing: picks the mode a query asks for.

use crate::config::Snapshot;
use crate::core::Mode;

/// A query that matched a trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route<'a> {
    pub mode: Mode,
    /// Everything after `"<trigger> "`, untrimmed
    pub remainder: &'a str,
}

/// Decide which mode `raw` requests.
///
/// Modes are tested in [`Mode::PRIORITY`] order and the first one whose
/// `"<trigger> "` probe prefixes `raw` wins. Matching is case-sensitive and
/// the separating space is required. Blank trigger slots never match, and an
/// empty trigger list matches nothing.
pub fn route<'a>(raw: &'a str, cfg: &Snapshot) -> Option<Route<'a>> {
    if !cfg.has_triggers() {
        return None;
    }

    Mode::PRIORITY.iter().find_map(|&mode| {
        let trigger = cfg.trigger(mode)?;
        let remainder = raw.strip_prefix(trigger)?.strip_prefix(' ')?;
        Some(Route { mode, remainder })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Translator;
    use std::sync::Arc;

    fn snapshot(triggers: &[&str]) -> Snapshot {
        Snapshot::new(
            triggers.iter().map(|s| s.to_string()).collect(),
            false,
            Arc::new(Translator::en_us()),
        )
    }

    fn defaults() -> Snapshot {
        snapshot(&crate::config::DEFAULT_TRIGGERS)
    }

    #[test]
    fn test_time_trigger() {
        let cfg = defaults();
        for rest in ["", "now", "london", "  +2 hours "] {
            let input = format!("time {}", rest);
            let route = route(&input, &cfg).unwrap();
            assert_eq!(route.mode, Mode::Time);
            assert_eq!(route.remainder, rest);
        }
    }

    #[test]
    fn test_every_mode() {
        let cfg = defaults();
        let cases = [
            ("= 2+2", Mode::Calculator),
            ("dec 10", Mode::Dec),
            ("hex ff", Mode::Hex),
            ("oct 17", Mode::Oct),
            ("bin 101", Mode::Bin),
        ];
        for (input, mode) in cases {
            assert_eq!(route(input, &cfg).unwrap().mode, mode, "{input}");
        }
    }

    #[test]
    fn test_requires_space_separator() {
        let cfg = defaults();
        assert!(route("time", &cfg).is_none());
        assert!(route("timer 5", &cfg).is_none());
        assert!(route("=2+2", &cfg).is_none());
    }

    #[test]
    fn test_case_sensitive() {
        let cfg = defaults();
        assert!(route("TIME now", &cfg).is_none());
        assert!(route("Hex ff", &cfg).is_none());
    }

    #[test]
    fn test_empty_trigger_list_never_matches() {
        let cfg = snapshot(&[]);
        for input in ["", " ", "= 1+1", "time now", "2+2", "hex ff"] {
            assert!(route(input, &cfg).is_none(), "{input}");
        }
    }

    #[test]
    fn test_blank_calculator_trigger_is_not_catch_all() {
        let cfg = snapshot(&["", "time", "dec", "bin", "hex", "oct"]);
        assert!(route("2+2", &cfg).is_none());
        assert!(route(" 2+2", &cfg).is_none());
        assert_eq!(route("time now", &cfg).unwrap().mode, Mode::Time);
    }

    #[test]
    fn test_short_trigger_list() {
        // Only calculator and time configured; other slots are out of range
        let cfg = snapshot(&["=", "time"]);
        assert!(route("hex ff", &cfg).is_none());
        assert_eq!(route("= 1", &cfg).unwrap().mode, Mode::Calculator);
    }

    #[test]
    fn test_overlap_resolved_by_priority() {
        // Same keyword everywhere: Time has the highest priority
        let cfg = snapshot(&["x", "x", "x", "x", "x", "x"]);
        assert_eq!(route("x 1", &cfg).unwrap().mode, Mode::Time);

        // Hex beats Bin even though Bin is stored first
        let cfg = snapshot(&["=", "time", "dec", "b", "b", "oct"]);
        assert_eq!(route("b 11", &cfg).unwrap().mode, Mode::Hex);

        // Priority wins over longest match
        let cfg = snapshot(&["c", "c c", "dec", "bin", "hex", "oct"]);
        let r = route("c c 5", &cfg).unwrap();
        assert_eq!(r.mode, Mode::Time);
        assert_eq!(r.remainder, "5");

        let cfg = snapshot(&["c c", "c", "dec", "bin", "hex", "oct"]);
        let r = route("c c 5", &cfg).unwrap();
        assert_eq!(r.mode, Mode::Time);
        assert_eq!(r.remainder, "c 5");
    }
}
