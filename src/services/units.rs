//! Unit converter evaluator for measurement units
//!
//! Queries look like `10km to miles`, `32 f in c` or, in crazy mode, just
//! `5 kg` (converted to every other unit of the same category).

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::config::UnitsMode;
use crate::core::{EvaluationResult, Evaluator};
use crate::error::CalcResult;

use super::format::format_quantity;

const ICON: &str = "images/units.svg";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Category {
    Length,
    Weight,
    Volume,
    Temperature,
    Area,
    Speed,
    Time,
    Data,
}

/// One unit: display symbol, category, factor to the category's base unit
/// and the spellings users type for it.
struct UnitDef {
    symbol: &'static str,
    category: Category,
    factor: f64,
    aliases: &'static [&'static str],
}

const fn unit(
    symbol: &'static str,
    category: Category,
    factor: f64,
    aliases: &'static [&'static str],
) -> UnitDef {
    UnitDef {
        symbol,
        category,
        factor,
        aliases,
    }
}

use Category::*;

// Base units: meter, gram, liter, kelvin (offsets handled separately),
// square meter, m/s, second, byte
static UNITS: &[UnitDef] = &[
    unit("m", Length, 1.0, &["m", "meter", "meters", "metre", "metres"]),
    unit("km", Length, 1000.0, &["km", "kilometer", "kilometers", "kilometre", "kilometres"]),
    unit("cm", Length, 0.01, &["cm", "centimeter", "centimeters", "centimetre"]),
    unit("mm", Length, 0.001, &["mm", "millimeter", "millimeters", "millimetre"]),
    unit("mi", Length, 1609.344, &["mi", "mile", "miles"]),
    unit("yd", Length, 0.9144, &["yd", "yard", "yards"]),
    unit("ft", Length, 0.3048, &["ft", "foot", "feet"]),
    unit("in", Length, 0.0254, &["in", "inch", "inches", "\""]),
    unit("nmi", Length, 1852.0, &["nmi", "nautical mile", "nautical miles"]),
    unit("kg", Weight, 1000.0, &["kg", "kilogram", "kilograms", "kilo", "kilos"]),
    unit("g", Weight, 1.0, &["g", "gram", "grams"]),
    unit("mg", Weight, 0.001, &["mg", "milligram", "milligrams"]),
    unit("lb", Weight, 453.592, &["lb", "lbs", "pound", "pounds"]),
    unit("oz", Weight, 28.3495, &["oz", "ounce", "ounces"]),
    unit("t", Weight, 1_000_000.0, &["t", "ton", "tons", "tonne", "tonnes"]),
    unit("st", Weight, 6350.29, &["st", "stone", "stones"]),
    unit("L", Volume, 1.0, &["l", "liter", "liters", "litre", "litres"]),
    unit("mL", Volume, 0.001, &["ml", "milliliter", "milliliters", "millilitre"]),
    unit("gal", Volume, 3.78541, &["gal", "gallon", "gallons"]),
    unit("qt", Volume, 0.946353, &["qt", "quart", "quarts"]),
    unit("pt", Volume, 0.473176, &["pt", "pint", "pints"]),
    unit("cup", Volume, 0.236588, &["cup", "cups"]),
    unit("fl oz", Volume, 0.0295735, &["fl oz", "floz", "fluid ounce", "fluid ounces"]),
    unit("tbsp", Volume, 0.0147868, &["tbsp", "tablespoon", "tablespoons"]),
    unit("tsp", Volume, 0.00492892, &["tsp", "teaspoon", "teaspoons"]),
    unit("°C", Temperature, 1.0, &["c", "celsius", "°c"]),
    unit("°F", Temperature, 1.0, &["f", "fahrenheit", "°f"]),
    unit("K", Temperature, 1.0, &["k", "kelvin"]),
    unit("m²", Area, 1.0, &["sqm", "m2", "m²", "square meter", "square meters"]),
    unit("ft²", Area, 0.092903, &["sqft", "ft2", "ft²", "square foot", "square feet"]),
    unit("km²", Area, 1_000_000.0, &["sqkm", "km2", "km²"]),
    unit("mi²", Area, 2_589_988.0, &["sqmi", "mi2", "mi²"]),
    unit("acre", Area, 4046.86, &["acre", "acres"]),
    unit("ha", Area, 10000.0, &["ha", "hectare", "hectares"]),
    unit("m/s", Speed, 1.0, &["m/s", "mps"]),
    unit("km/h", Speed, 1.0 / 3.6, &["km/h", "kph", "kmh"]),
    unit("mph", Speed, 0.44704, &["mph", "mi/h"]),
    unit("knot", Speed, 0.514444, &["knot", "knots", "kn"]),
    unit("s", Time, 1.0, &["s", "sec", "second", "seconds"]),
    unit("min", Time, 60.0, &["min", "minute", "minutes"]),
    unit("hr", Time, 3600.0, &["h", "hr", "hour", "hours"]),
    unit("day", Time, 86400.0, &["day", "days"]),
    unit("week", Time, 604800.0, &["week", "weeks"]),
    unit("month", Time, 2_629_746.0, &["month", "months"]),
    unit("yr", Time, 31_556_952.0, &["year", "years", "yr"]),
    unit("B", Data, 1.0, &["b", "byte", "bytes"]),
    unit("KB", Data, 1e3, &["kb", "kilobyte", "kilobytes"]),
    unit("MB", Data, 1e6, &["mb", "megabyte", "megabytes"]),
    unit("GB", Data, 1e9, &["gb", "gigabyte", "gigabytes"]),
    unit("TB", Data, 1e12, &["tb", "terabyte", "terabytes"]),
    unit("KiB", Data, 1024.0, &["kib", "kibibyte"]),
    unit("MiB", Data, 1_048_576.0, &["mib", "mebibyte"]),
    unit("GiB", Data, 1_073_741_824.0, &["gib", "gibibyte"]),
    unit("TiB", Data, 1_099_511_627_776.0, &["tib", "tebibyte"]),
];

// Lowercase alias -> index into UNITS
static ALIASES: Lazy<HashMap<&'static str, usize>> = Lazy::new(|| {
    let mut m = HashMap::new();
    for (i, def) in UNITS.iter().enumerate() {
        for alias in def.aliases {
            m.insert(*alias, i);
        }
    }
    m
});

/// A conversion result
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub from_value: f64,
    pub from_unit: String,
    pub to_value: f64,
    pub to_unit: String,
}

impl Conversion {
    /// Format as display string: "10 km = 6.213712 mi"
    pub fn display(&self) -> String {
        format!(
            "{} {} = {} {}",
            format_quantity(self.from_value),
            self.from_unit,
            format_quantity(self.to_value),
            self.to_unit
        )
    }

    /// Get just the result value formatted
    pub fn result(&self) -> String {
        format!("{} {}", format_quantity(self.to_value), self.to_unit)
    }
}

/// Try to parse and convert a unit expression
/// Examples: "10km to miles", "32 f to c", "5 kg in lb"
pub fn convert(query: &str) -> Option<Conversion> {
    let query = query.trim().to_lowercase();
    let (from_part, to_part) = split_target(&query)?;

    let (value, from_raw) = parse_value_unit(from_part)?;
    let from = lookup(from_raw)?;
    let to = lookup(to_part)?;

    convert_between(value, from, to)
}

/// Convert `"5 kg"` to every other unit of its category, in table order.
pub fn convert_all(query: &str) -> Vec<Conversion> {
    let query = query.trim().to_lowercase();
    let Some((value, from_raw)) = parse_value_unit(&query) else {
        return Vec::new();
    };
    let Some(from) = lookup(from_raw) else {
        return Vec::new();
    };

    (0..UNITS.len())
        .filter(|&to| to != from)
        .filter_map(|to| convert_between(value, from, to))
        .collect()
}

/// Split "<from> to <unit>" or "<from> in <unit>"
fn split_target(query: &str) -> Option<(&str, &str)> {
    [" to ", " in "].iter().find_map(|sep| {
        let (from, to) = query.rsplit_once(sep)?;
        let (from, to) = (from.trim(), to.trim());
        (!from.is_empty() && !to.is_empty()).then_some((from, to))
    })
}

/// Parse "10km" or "10 km" into (10.0, "km")
fn parse_value_unit(s: &str) -> Option<(f64, &str)> {
    let s = s.trim();

    let mut num_end = 0;
    let mut has_digit = false;
    let mut has_decimal = false;
    let mut has_sign = false;

    for (i, c) in s.char_indices() {
        if c.is_ascii_digit() {
            has_digit = true;
            num_end = i + 1;
        } else if c == '.' && !has_decimal {
            has_decimal = true;
            num_end = i + 1;
        } else if (c == '-' || c == '+') && !has_sign && !has_digit {
            has_sign = true;
            num_end = i + 1;
        } else {
            break;
        }
    }

    if !has_digit {
        return None;
    }

    let unit_str = s[num_end..].trim();
    if unit_str.is_empty() {
        return None;
    }

    let value: f64 = s[..num_end].parse().ok()?;
    Some((value, unit_str))
}

fn lookup(alias: &str) -> Option<usize> {
    ALIASES.get(alias.trim()).copied()
}

fn convert_between(value: f64, from: usize, to: usize) -> Option<Conversion> {
    let (from_def, to_def) = (&UNITS[from], &UNITS[to]);
    if from_def.category != to_def.category {
        return None;
    }

    let to_value = if from_def.category == Temperature {
        convert_temperature(value, from_def.symbol, to_def.symbol)?
    } else {
        value * from_def.factor / to_def.factor
    };

    Some(Conversion {
        from_value: value,
        from_unit: from_def.symbol.to_string(),
        to_value,
        to_unit: to_def.symbol.to_string(),
    })
}

/// Temperature is affine, so it goes through kelvin instead of a factor
fn convert_temperature(value: f64, from: &str, to: &str) -> Option<f64> {
    let kelvin = match from {
        "°C" => value + 273.15,
        "°F" => (value - 32.0) * 5.0 / 9.0 + 273.15,
        "K" => value,
        _ => return None,
    };

    match to {
        "°C" => Some(kelvin - 273.15),
        "°F" => Some((kelvin - 273.15) * 9.0 / 5.0 + 32.0),
        "K" => Some(kelvin),
        _ => None,
    }
}

/// Unit conversions for the calculator trigger
#[derive(Debug, Clone)]
pub struct UnitsEvaluator {
    keyword: String,
    mode: UnitsMode,
}

impl UnitsEvaluator {
    pub fn new(keyword: impl Into<String>, mode: UnitsMode) -> Self {
        Self {
            keyword: keyword.into(),
            mode,
        }
    }
}

impl Evaluator for UnitsEvaluator {
    fn name(&self) -> &str {
        "units"
    }

    fn keyword(&self) -> &str {
        &self.keyword
    }

    fn evaluate(&self, text: &str) -> CalcResult<Vec<EvaluationResult>> {
        let conversions = match convert(text) {
            Some(conversion) => vec![conversion],
            None if self.mode == UnitsMode::Crazy => convert_all(text),
            None => Vec::new(),
        };

        Ok(conversions
            .into_iter()
            .map(|c| {
                let value = format_quantity(c.to_value);
                EvaluationResult::new(c.result(), c.display())
                    .with_icon(ICON)
                    .with_clipboard(value)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_km_to_miles() {
        let result = convert("10km to miles").unwrap();
        assert!((result.to_value - 6.21371).abs() < 0.001);
        assert_eq!(result.from_unit, "km");
        assert_eq!(result.to_unit, "mi");
    }

    #[test]
    fn test_fahrenheit_to_celsius() {
        let result = convert("32f to c").unwrap();
        assert!((result.to_value - 0.0).abs() < 0.001);

        let result = convert("212 F in C").unwrap();
        assert!((result.to_value - 100.0).abs() < 0.001);
    }

    #[test]
    fn test_kg_to_lb() {
        let result = convert("1kg to lb").unwrap();
        assert!((result.to_value - 2.20462).abs() < 0.001);
    }

    #[test]
    fn test_multi_word_units() {
        let result = convert("2 fl oz to ml").unwrap();
        assert!((result.to_value - 59.147).abs() < 0.01);
    }

    #[test]
    fn test_parse_value_unit() {
        assert_eq!(parse_value_unit("10km"), Some((10.0, "km")));
        assert_eq!(parse_value_unit("10 km"), Some((10.0, "km")));
        assert_eq!(parse_value_unit("3.14 m"), Some((3.14, "m")));
        assert_eq!(parse_value_unit("-5 c"), Some((-5.0, "c")));
        assert_eq!(parse_value_unit("km"), None);
        assert_eq!(parse_value_unit("10"), None);
    }

    #[test]
    fn test_invalid_conversion() {
        // Can't convert between different categories
        assert!(convert("10km to kg").is_none());
        assert!(convert("10 parsecs to km").is_none());
        assert!(convert("2+2").is_none());
    }

    #[test]
    fn test_every_alias_resolves_to_its_unit() {
        for def in UNITS {
            for alias in def.aliases {
                assert_eq!(UNITS[lookup(alias).unwrap()].symbol, def.symbol, "{alias}");
            }
        }
    }

    #[test]
    fn test_normal_mode_needs_target() {
        let units = UnitsEvaluator::new("=", UnitsMode::Normal);
        assert!(units.evaluate("5 kg").unwrap().is_empty());

        let results = units.evaluate("10 km to mi").unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "6.213712 mi");
        assert_eq!(results[0].description, "10 km = 6.213712 mi");
        assert_eq!(results[0].clipboard.as_deref(), Some("6.213712"));
    }

    #[test]
    fn test_crazy_mode_expands_category() {
        let units = UnitsEvaluator::new("=", UnitsMode::Crazy);
        let results = units.evaluate("1 kg").unwrap();

        // Every other weight unit, in table order
        let names: Vec<_> = results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names.len(), 6);
        assert_eq!(names[0], "1000 g");
        assert!(names.iter().all(|n| !n.ends_with(" kg")));
    }
}
