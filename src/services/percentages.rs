//! Percentage evaluator
//!
//! Understands `X% of Y`, `Y + X%`, `Y - X%` and `X as % of Y`. Each side
//! may itself be an expression (`15% of 2*40`).

use crate::core::{EvaluationResult, Evaluator};
use crate::error::CalcResult;

use super::calculator;
use super::format::format_number;

const ICON: &str = "images/percent.svg";

#[derive(Debug, Clone, Copy, PartialEq)]
enum Percentage {
    /// X% of Y
    Of { percent: f64, base: f64 },
    /// Y + X% or Y - X%
    Change { base: f64, percent: f64 },
    /// X as a percentage of Y
    Ratio { part: f64, whole: f64 },
}

impl Percentage {
    fn parse(query: &str) -> Option<Self> {
        let query = query.trim().to_lowercase();

        if let Some((part, whole)) = query.split_once(" as % of ") {
            return Some(Percentage::Ratio {
                part: number(part)?,
                whole: number(whole)?,
            });
        }

        if let Some((percent, base)) = query.split_once("% of ") {
            return Some(Percentage::Of {
                percent: number(percent)?,
                base: number(base)?,
            });
        }

        let stripped = query.strip_suffix('%')?;
        let split = stripped.rfind(|c: char| c == '+' || c == '-')?;
        let (base, percent) = (&stripped[..split], &stripped[split + 1..]);
        let sign = if stripped[split..].starts_with('-') { -1.0 } else { 1.0 };

        Some(Percentage::Change {
            base: number(base)?,
            percent: sign * number(percent)?,
        })
    }

    fn value(self) -> Option<f64> {
        let value = match self {
            Percentage::Of { percent, base } => percent * base / 100.0,
            Percentage::Change { base, percent } => base + base * percent / 100.0,
            Percentage::Ratio { part, whole } => {
                if whole == 0.0 {
                    return None;
                }
                part * 100.0 / whole
            }
        };
        value.is_finite().then_some(value)
    }

    fn describe(self) -> String {
        match self {
            Percentage::Of { percent, base } => {
                format!("{}% of {}", format_number(percent), format_number(base))
            }
            Percentage::Change { base, percent } => {
                let op = if percent < 0.0 { '-' } else { '+' };
                format!(
                    "{} {} {}%",
                    format_number(base),
                    op,
                    format_number(percent.abs())
                )
            }
            Percentage::Ratio { part, whole } => {
                format!("{} as % of {}", format_number(part), format_number(whole))
            }
        }
    }
}

fn number(expr: &str) -> Option<f64> {
    calculator::evaluate(expr).filter(|v| v.is_finite())
}

/// Evaluate a percentage query, e.g. "20% of 150" -> 30
pub fn evaluate(query: &str) -> Option<f64> {
    Percentage::parse(query)?.value()
}

/// Percentage calculations for the calculator trigger
#[derive(Debug, Clone)]
pub struct PercentagesEvaluator {
    keyword: String,
}

impl PercentagesEvaluator {
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
        }
    }
}

impl Evaluator for PercentagesEvaluator {
    fn name(&self) -> &str {
        "percentages"
    }

    fn keyword(&self) -> &str {
        &self.keyword
    }

    fn evaluate(&self, text: &str) -> CalcResult<Vec<EvaluationResult>> {
        let Some(percentage) = Percentage::parse(text) else {
            return Ok(Vec::new());
        };
        let Some(value) = percentage.value() else {
            return Ok(Vec::new());
        };

        let result = format_number(value);
        let name = match percentage {
            Percentage::Ratio { .. } => format!("{}%", result),
            _ => result.clone(),
        };

        Ok(vec![EvaluationResult::new(name, percentage.describe())
            .with_icon(ICON)
            .with_clipboard(result)])
    }
}
