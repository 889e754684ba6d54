//! Time evaluator: current time in cities and time zones, and offsets from now
//!
//! Accepted queries (after the `time` trigger):
//! - `now` - home time plus every configured default city
//! - `utc`
//! - a city (`london`, `new york`) or an IANA zone (`Europe/Paris`)
//! - an offset from now (`+2 hours`, `-30 min`, `in 3 days`)

use chrono::{DateTime, FixedOffset, Local, TimeDelta, Utc};
use chrono_tz::Tz;

use crate::core::{EvaluationResult, Evaluator};
use crate::error::{CalcError, CalcResult};

const ICON: &str = "images/time.svg";

struct City {
    name: &'static str,
    aliases: &'static [&'static str],
    tz: Tz,
}

const fn city(name: &'static str, aliases: &'static [&'static str], tz: Tz) -> City {
    City { name, aliases, tz }
}

static CITIES: &[City] = &[
    city("New York City", &["new york", "nyc"], Tz::America__New_York),
    city("Los Angeles", &["la"], Tz::America__Los_Angeles),
    city("San Francisco", &["sf"], Tz::America__Los_Angeles),
    city("Chicago", &[], Tz::America__Chicago),
    city("Denver", &[], Tz::America__Denver),
    city("Honolulu", &[], Tz::Pacific__Honolulu),
    city("Toronto", &[], Tz::America__Toronto),
    city("Vancouver", &[], Tz::America__Vancouver),
    city("Mexico City", &[], Tz::America__Mexico_City),
    city("Sao Paulo", &["são paulo"], Tz::America__Sao_Paulo),
    city("London", &[], Tz::Europe__London),
    city("Lisbon", &[], Tz::Europe__Lisbon),
    city("Madrid", &[], Tz::Europe__Madrid),
    city("Paris", &[], Tz::Europe__Paris),
    city("Amsterdam", &[], Tz::Europe__Amsterdam),
    city("Berlin", &[], Tz::Europe__Berlin),
    city("Zurich", &[], Tz::Europe__Zurich),
    city("Rome", &[], Tz::Europe__Rome),
    city("Vienna", &[], Tz::Europe__Vienna),
    city("Stockholm", &[], Tz::Europe__Stockholm),
    city("Warsaw", &[], Tz::Europe__Warsaw),
    city("Athens", &[], Tz::Europe__Athens),
    city("Istanbul", &[], Tz::Europe__Istanbul),
    city("Moscow", &[], Tz::Europe__Moscow),
    city("Cairo", &[], Tz::Africa__Cairo),
    city("Johannesburg", &[], Tz::Africa__Johannesburg),
    city("Dubai", &[], Tz::Asia__Dubai),
    city("Delhi", &["new delhi", "mumbai"], Tz::Asia__Kolkata),
    city("Singapore", &[], Tz::Asia__Singapore),
    city("Hong Kong", &[], Tz::Asia__Hong_Kong),
    city("Beijing", &["shanghai"], Tz::Asia__Shanghai),
    city("Seoul", &[], Tz::Asia__Seoul),
    city("Tokyo", &[], Tz::Asia__Tokyo),
    city("Sydney", &[], Tz::Australia__Sydney),
    city("Auckland", &[], Tz::Pacific__Auckland),
];

/// Find a city by name or alias, ignoring case
fn find_city(query: &str) -> Option<&'static City> {
    let query = query.trim().to_lowercase();
    CITIES
        .iter()
        .find(|c| c.name.to_lowercase() == query || c.aliases.contains(&query.as_str()))
}

/// Strip a trailing country code: "London GB" or "london gb" -> "London"
fn strip_country(entry: &str) -> &str {
    match entry.trim().rsplit_once(' ') {
        Some((name, code))
            if code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic()) =>
        {
            name.trim()
        }
        _ => entry.trim(),
    }
}

/// Parse "+2 hours", "-30 min" or "in 3 days"
fn parse_offset(query: &str) -> Option<TimeDelta> {
    let query = query.trim().to_lowercase();
    let (sign, rest) = if let Some(rest) = query.strip_prefix("in ") {
        (1, rest)
    } else if let Some(rest) = query.strip_prefix('+') {
        (1, rest)
    } else if let Some(rest) = query.strip_prefix('-') {
        (-1, rest)
    } else {
        return None;
    };

    let rest = rest.trim();
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let amount: i64 = rest[..digits_end].parse().ok()?;
    let amount = sign * amount;

    match rest[digits_end..].trim() {
        "m" | "min" | "mins" | "minute" | "minutes" => TimeDelta::try_minutes(amount),
        "h" | "hr" | "hrs" | "hour" | "hours" => TimeDelta::try_hours(amount),
        "d" | "day" | "days" => TimeDelta::try_days(amount),
        "w" | "week" | "weeks" => TimeDelta::try_weeks(amount),
        _ => None,
    }
}

fn time_result(label: &str, at: DateTime<FixedOffset>) -> EvaluationResult {
    EvaluationResult::new(
        format!("{} {}", at.format("%H:%M"), label),
        at.format("%A, %-d %B %Y (UTC%:z)").to_string(),
    )
    .with_icon(ICON)
    .with_clipboard(at.format("%Y-%m-%d %H:%M").to_string())
}

/// Evaluator behind the `time` trigger
#[derive(Debug, Clone)]
pub struct TimeEvaluator {
    keyword: String,
    /// Zone for "now" and offsets; the system zone when `None`
    home: Option<Tz>,
    default_cities: Vec<(String, Tz)>,
    fixed_now: Option<DateTime<Utc>>,
}

impl TimeEvaluator {
    /// `cities` are entries like `"London GB"`. Unknown ones are skipped.
    pub fn new(keyword: impl Into<String>, cities: &[String]) -> Self {
        let default_cities = cities
            .iter()
            .filter_map(|entry| {
                let name = strip_country(entry);
                match find_city(name) {
                    Some(city) => Some((city.name.to_string(), city.tz)),
                    None => {
                        tracing::warn!(city = %entry, "unknown default city");
                        None
                    }
                }
            })
            .collect();

        Self {
            keyword: keyword.into(),
            home: None,
            default_cities,
            fixed_now: None,
        }
    }

    /// Use `tz` instead of the system zone for "now" and offsets.
    pub fn with_home(mut self, tz: Tz) -> Self {
        self.home = Some(tz);
        self
    }

    /// Pin the clock, for reproducible output.
    pub fn with_fixed_now(mut self, now: DateTime<Utc>) -> Self {
        self.fixed_now = Some(now);
        self
    }

    fn now(&self) -> DateTime<Utc> {
        self.fixed_now.unwrap_or_else(Utc::now)
    }

    fn home_label(&self) -> &str {
        self.home.map(|tz| tz.name()).unwrap_or("Local")
    }

    fn at_home(&self, at: DateTime<Utc>) -> DateTime<FixedOffset> {
        match self.home {
            Some(tz) => at.with_timezone(&tz).fixed_offset(),
            None => at.with_timezone(&Local).fixed_offset(),
        }
    }
}

impl Evaluator for TimeEvaluator {
    fn name(&self) -> &str {
        "time"
    }

    fn keyword(&self) -> &str {
        &self.keyword
    }

    fn evaluate(&self, text: &str) -> CalcResult<Vec<EvaluationResult>> {
        let query = text.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let now = self.now();

        if query.eq_ignore_ascii_case("now") {
            let mut results = vec![time_result(self.home_label(), self.at_home(now))];
            results.extend(self.default_cities.iter().map(|(name, tz)| {
                time_result(name, now.with_timezone(tz).fixed_offset())
            }));
            return Ok(results);
        }

        if query.eq_ignore_ascii_case("utc") {
            return Ok(vec![time_result("UTC", now.fixed_offset())]);
        }

        if let Some(delta) = parse_offset(query) {
            let at = now
                .checked_add_signed(delta)
                .ok_or_else(|| CalcError::evaluator(self.name(), "offset out of range"))?;
            let label = format!("{} ({})", self.home_label(), query);
            return Ok(vec![time_result(&label, self.at_home(at))]);
        }

        if let Some(city) = find_city(query).or_else(|| find_city(strip_country(query))) {
            return Ok(vec![time_result(
                city.name,
                now.with_timezone(&city.tz).fixed_offset(),
            )]);
        }

        if let Ok(tz) = query.parse::<Tz>() {
            return Ok(vec![time_result(
                tz.name(),
                now.with_timezone(&tz).fixed_offset(),
            )]);
        }

        Err(CalcError::evaluator(
            self.name(),
            format!("unknown city or time zone '{}'", query),
        ))
    }
}
