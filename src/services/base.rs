//! Number base conversions for the dec, hex, oct and bin triggers

use crate::core::{EvaluationResult, Evaluator, Mode};
use crate::error::{CalcError, CalcResult};

use super::calculator;

const ICON: &str = "images/base.svg";

/// Largest magnitude an f64 holds exactly; decimal expressions beyond it
/// would print digits that aren't really there.
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Radix {
    Dec,
    Hex,
    Oct,
    Bin,
}

impl Radix {
    pub const ALL: [Radix; 4] = [Radix::Dec, Radix::Hex, Radix::Oct, Radix::Bin];

    pub fn base(self) -> u32 {
        match self {
            Radix::Dec => 10,
            Radix::Hex => 16,
            Radix::Oct => 8,
            Radix::Bin => 2,
        }
    }

    pub fn prefix(self) -> &'static str {
        match self {
            Radix::Dec => "",
            Radix::Hex => "0x",
            Radix::Oct => "0o",
            Radix::Bin => "0b",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Radix::Dec => "Decimal",
            Radix::Hex => "Hexadecimal",
            Radix::Oct => "Octal",
            Radix::Bin => "Binary",
        }
    }

    /// The radix a base-conversion mode reads its input in
    pub fn for_mode(mode: Mode) -> Option<Self> {
        match mode {
            Mode::Dec => Some(Radix::Dec),
            Mode::Hex => Some(Radix::Hex),
            Mode::Oct => Some(Radix::Oct),
            Mode::Bin => Some(Radix::Bin),
            Mode::Calculator | Mode::Time => None,
        }
    }

    /// Render `n` with this radix's prefix: `-0xff`, `0b101`, `42`
    pub fn format(self, n: i128) -> String {
        let sign = if n < 0 { "-" } else { "" };
        let magnitude = n.unsigned_abs();
        let digits = match self {
            Radix::Dec => magnitude.to_string(),
            Radix::Hex => format!("{:x}", magnitude),
            Radix::Oct => format!("{:o}", magnitude),
            Radix::Bin => format!("{:b}", magnitude),
        };
        format!("{}{}{}", sign, self.prefix(), digits)
    }

    /// Parse an integer written in this radix. Underscores and spaces are
    /// ignored and the radix prefix is optional.
    pub fn parse(self, text: &str) -> Option<i128> {
        let cleaned: String = text
            .chars()
            .filter(|c| *c != '_' && !c.is_whitespace())
            .collect();

        let (negative, unsigned) = match cleaned.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, cleaned.strip_prefix('+').unwrap_or(&cleaned)),
        };

        let prefix = self.prefix();
        let digits = match unsigned.get(..prefix.len()) {
            Some(head) if !prefix.is_empty() && head.eq_ignore_ascii_case(prefix) => {
                &unsigned[prefix.len()..]
            }
            _ => unsigned,
        };

        // from_str_radix would accept a second sign
        if digits.is_empty() || digits.starts_with(|c: char| c == '+' || c == '-') {
            return None;
        }

        let magnitude = i128::from_str_radix(digits, self.base()).ok()?;
        Some(if negative { -magnitude } else { magnitude })
    }
}

/// Converts a number in one radix to the other three
#[derive(Debug, Clone)]
pub struct BaseEvaluator {
    keyword: String,
    radix: Radix,
}

impl BaseEvaluator {
    pub fn new(keyword: impl Into<String>, radix: Radix) -> Self {
        Self {
            keyword: keyword.into(),
            radix,
        }
    }

    fn parse(&self, text: &str) -> Option<i128> {
        if let Some(n) = self.radix.parse(text) {
            return Some(n);
        }

        // Decimal input may also be an integer-valued expression
        if self.radix == Radix::Dec {
            let value = calculator::evaluate(text)?;
            if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_EXACT_FLOAT {
                return Some(value as i128);
            }
        }

        None
    }
}

impl Evaluator for BaseEvaluator {
    fn name(&self) -> &str {
        match self.radix {
            Radix::Dec => "dec",
            Radix::Hex => "hex",
            Radix::Oct => "oct",
            Radix::Bin => "bin",
        }
    }

    fn keyword(&self) -> &str {
        &self.keyword
    }

    fn evaluate(&self, text: &str) -> CalcResult<Vec<EvaluationResult>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Vec::new());
        }

        let n = self.parse(text).ok_or_else(|| {
            CalcError::evaluator(
                self.name(),
                format!("'{}' is not a {} number", text, self.radix.label().to_lowercase()),
            )
        })?;

        Ok(Radix::ALL
            .iter()
            .filter(|&&r| r != self.radix)
            .map(|&r| {
                let formatted = r.format(n);
                EvaluationResult::new(formatted.clone(), r.label())
                    .with_icon(ICON)
                    .with_clipboard(formatted)
            })
            .collect())
    }
}
