//! Calculator evaluator for math expressions

use crate::core::{EvaluationResult, Evaluator};
use crate::error::{CalcError, CalcResult};

use super::format::format_number;

const ICON: &str = "images/calculator.svg";

/// Evaluate a math expression and return the result
/// Returns None if the expression is invalid or not a math expression
pub fn evaluate(expr: &str) -> Option<f64> {
    let expr = expr.trim();

    if !looks_like_math(expr) {
        return None;
    }

    meval::eval_str(expr).ok()
}

/// Cheap pre-check so plain words never reach the parser
pub fn looks_like_math(expr: &str) -> bool {
    !expr.is_empty() && expr.chars().any(|c| c.is_ascii_digit())
}

/// Format a result for display
/// Removes unnecessary decimal places (e.g., 4.0 -> "4")
pub fn format_result(value: f64) -> String {
    format_number(value)
}

/// Expression evaluator behind the calculator trigger (`= 2^10`)
#[derive(Debug, Clone)]
pub struct CalculatorEvaluator {
    keyword: String,
}

impl CalculatorEvaluator {
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
        }
    }
}

impl Evaluator for CalculatorEvaluator {
    fn name(&self) -> &str {
        "calculator"
    }

    fn keyword(&self) -> &str {
        &self.keyword
    }

    fn evaluate(&self, text: &str) -> CalcResult<Vec<EvaluationResult>> {
        let expr = text.trim();
        let Some(value) = evaluate(expr) else {
            // Not an expression; units or percentages may still pick it up
            return Ok(Vec::new());
        };

        if !value.is_finite() {
            return Err(CalcError::evaluator(
                self.name(),
                format!("'{}' has no finite value", expr),
            ));
        }

        let result = format_result(value);
        Ok(vec![EvaluationResult::new(format!("= {}", result), expr)
            .with_icon(ICON)
            .with_clipboard(result)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_math() {
        assert_eq!(evaluate("2+2"), Some(4.0));
        assert_eq!(evaluate("10 - 3"), Some(7.0));
        assert_eq!(evaluate("5 * 6"), Some(30.0));
        assert_eq!(evaluate("20 / 4"), Some(5.0));
    }

    #[test]
    fn test_complex_expressions() {
        assert_eq!(evaluate("2^10"), Some(1024.0));
        assert_eq!(evaluate("sqrt(16)"), Some(4.0));
        assert_eq!(evaluate("(10 + 5) * 2"), Some(30.0));
    }

    #[test]
    fn test_invalid_expressions() {
        assert_eq!(evaluate("hello"), None);
        assert_eq!(evaluate(""), None);
        assert_eq!(evaluate("abc + def"), None);
        assert_eq!(evaluate("10 km to mi"), None);
    }

    #[test]
    fn test_format_result() {
        assert_eq!(format_result(4.0), "4");
        assert_eq!(format_result(1.23456), "1.23456");
        assert_eq!(format_result(100.0), "100");
    }

    #[test]
    fn test_evaluator_result() {
        let calc = CalculatorEvaluator::new("=");
        let results = calc.evaluate(" 6 * 7 ").unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "= 42");
        assert_eq!(results[0].description, "6 * 7");
        assert_eq!(results[0].clipboard.as_deref(), Some("42"));
    }

    #[test]
    fn test_evaluator_ignores_non_math() {
        let calc = CalculatorEvaluator::new("=");
        assert!(calc.evaluate("").unwrap().is_empty());
        assert!(calc.evaluate("10% of 50").unwrap().is_empty());
    }

    #[test]
    fn test_evaluator_rejects_infinite() {
        let calc = CalculatorEvaluator::new("=");
        assert!(calc.evaluate("1/0").is_err());
    }
}
