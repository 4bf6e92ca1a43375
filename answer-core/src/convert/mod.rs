//! Dimensional Unit Converter
//!
//! Linear categories convert through a shared base unit:
//!
//! ```text
//!   value * factor[from] / factor[to]
//! ```
//!
//! Temperature is affine, so it is handled out-of-band by going through
//! Celsius with closed-form formulas. A conversion is only ever computed
//! between two units of the same category; everything else is
//! `UnknownConversion`.
//!
//! ## Example
//!
//! ```rust
//! use answer_core::convert::{convert, normalize_unit};
//!
//! assert_eq!(normalize_unit("km"), "kilometers");
//! assert_eq!(convert(1000.0, "meters", "kilometers").unwrap(), 1.0);
//! assert_eq!(convert(100.0, "celsius", "fahrenheit").unwrap(), 212.0);
//! ```

mod tables;
mod units;

pub use tables::Category;
pub use units::normalize_unit;

use std::collections::HashMap;
use std::sync::LazyLock;

use tables::{factors, TEMPERATURE_UNITS};

use crate::error::{AnswerError, Result};

static SHARED: LazyLock<UnitConverter> = LazyLock::new(UnitConverter::new);

/// Convert `value` between two units using the shared converter
pub fn convert(value: f64, from: &str, to: &str) -> Result<f64> {
    SHARED.convert(value, from, to)
}

/// Category of a unit (after normalization), if known
pub fn category_of(unit: &str) -> Option<Category> {
    SHARED.category_of(unit)
}

/// Converter owning its category tables
///
/// Tables are built once at construction and read-only afterwards.
#[derive(Debug, Clone)]
pub struct UnitConverter {
    tables: Vec<(Category, HashMap<&'static str, f64>)>,
}

impl UnitConverter {
    /// Build the category tables
    pub fn new() -> Self {
        let tables = Category::LINEAR
            .iter()
            .map(|&category| (category, factors(category).iter().copied().collect()))
            .collect();
        Self { tables }
    }

    /// Category of a unit (after normalization), if known
    pub fn category_of(&self, unit: &str) -> Option<Category> {
        let unit = normalize_unit(unit);
        if is_temperature(&unit) {
            return Some(Category::Temperature);
        }
        self.tables
            .iter()
            .find(|(_, table)| table.contains_key(unit.as_str()))
            .map(|(category, _)| *category)
    }

    /// Convert `value` from one unit to another
    ///
    /// Both names are normalized first. Identical units return `value`
    /// untouched so no rounding is introduced by a round-trip through the
    /// base unit.
    pub fn convert(&self, value: f64, from: &str, to: &str) -> Result<f64> {
        let from = normalize_unit(from);
        let to = normalize_unit(to);

        if from == to {
            return Ok(value);
        }

        match (is_temperature(&from), is_temperature(&to)) {
            (true, true) => return Ok(temperature(value, &from, &to)),
            (true, false) | (false, true) => {
                return Err(AnswerError::unknown_conversion(from, to));
            }
            (false, false) => {}
        }

        self.tables
            .iter()
            .find_map(|(_, table)| {
                let f = table.get(from.as_str())?;
                let t = table.get(to.as_str())?;
                Some(value * f / t)
            })
            .ok_or_else(|| AnswerError::unknown_conversion(from, to))
    }
}

impl Default for UnitConverter {
    fn default() -> Self {
        Self::new()
    }
}

fn is_temperature(unit: &str) -> bool {
    TEMPERATURE_UNITS.contains(&unit)
}

/// Convert between two canonical temperature units via Celsius
fn temperature(value: f64, from: &str, to: &str) -> f64 {
    let celsius = match from {
        "fahrenheit" => (value - 32.0) * 5.0 / 9.0,
        "kelvin" => value - 273.15,
        _ => value,
    };
    match to {
        "fahrenheit" => celsius * 9.0 / 5.0 + 32.0,
        "kelvin" => celsius + 273.15,
        _ => celsius,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn test_scenarios() {
        assert_eq!(convert(1000.0, "meters", "kilometers").unwrap(), 1.0);
        assert_eq!(convert(1.0, "gigabytes", "megabytes").unwrap(), 1024.0);
        assert_eq!(convert(1.0, "miles", "meters").unwrap(), 1609.344);
        assert_eq!(convert(2.0, "hours", "minutes").unwrap(), 120.0);
        assert_eq!(convert(1.0, "years", "months").unwrap(), 12.0);
    }

    #[test]
    fn test_aliases_are_normalized() {
        assert_eq!(convert(5.0, "km", "m").unwrap(), 5000.0);
        assert_eq!(convert(1.0, "TB", "GB").unwrap(), 1024.0);
        assert!(close(convert(1.0, "lb", "oz").unwrap(), 453.592 / 28.3495));
    }

    #[test]
    fn test_identity_short_circuit() {
        let v = 0.1 + 0.2;
        assert_eq!(convert(v, "feet", "ft").unwrap(), v);
        assert_eq!(convert(-40.0, "c", "celsius").unwrap(), -40.0);
    }

    #[test]
    fn test_temperature_fixed_points() {
        assert_eq!(convert(0.0, "celsius", "fahrenheit").unwrap(), 32.0);
        assert_eq!(convert(100.0, "celsius", "fahrenheit").unwrap(), 212.0);
        assert_eq!(convert(0.0, "celsius", "kelvin").unwrap(), 273.15);
        assert_eq!(convert(32.0, "fahrenheit", "celsius").unwrap(), 0.0);
        assert!(close(convert(-40.0, "fahrenheit", "celsius").unwrap(), -40.0));
        assert!(close(convert(0.0, "kelvin", "fahrenheit").unwrap(), -459.67));
    }

    #[test]
    fn test_cross_category_is_an_error() {
        let err = convert(1.0, "meters", "grams").unwrap_err();
        assert!(matches!(
            err,
            AnswerError::UnknownConversion { ref from, ref to } if from == "meters" && to == "grams"
        ));
    }

    #[test]
    fn test_temperature_with_linear_unit_is_an_error() {
        assert!(convert(10.0, "celsius", "meters").is_err());
        assert!(convert(10.0, "seconds", "kelvin").is_err());
    }

    #[test]
    fn test_unknown_unit_is_an_error() {
        assert!(convert(1.0, "furlongs", "meters").is_err());
        assert!(convert(1.0, "parsecs", "lightyears").is_err());
    }

    #[test]
    fn test_round_trip_within_categories() {
        for category in Category::LINEAR {
            let units = category.units();
            for a in &units {
                for b in &units {
                    let there = convert(123.456, a, b).unwrap();
                    let back = convert(there, b, a).unwrap();
                    assert!(close(back, 123.456), "{a} -> {b} -> {a}: {back}");
                }
            }
        }
    }

    #[test]
    fn test_category_of() {
        assert_eq!(category_of("km"), Some(Category::Length));
        assert_eq!(category_of("MiB"), Some(Category::Data));
        assert_eq!(category_of("°F"), Some(Category::Temperature));
        assert_eq!(category_of("furlongs"), None);
    }
}
