//! Category tables: factor = how many base units one of this unit is

use std::fmt;

use serde::{Deserialize, Serialize};

/// A family of mutually convertible units sharing a base unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Length,
    Mass,
    Volume,
    Time,
    Data,
    Temperature,
}

impl Category {
    /// Linear categories in search order
    pub const LINEAR: [Category; 5] = [
        Category::Length,
        Category::Mass,
        Category::Volume,
        Category::Time,
        Category::Data,
    ];

    /// The reference unit factors are expressed in
    pub fn base_unit(&self) -> &'static str {
        match self {
            Category::Length => "meters",
            Category::Mass => "grams",
            Category::Volume => "liters",
            Category::Time => "seconds",
            Category::Data => "bytes",
            Category::Temperature => "celsius",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Length => "length",
            Category::Mass => "mass",
            Category::Volume => "volume",
            Category::Time => "time",
            Category::Data => "data",
            Category::Temperature => "temperature",
        }
    }

    /// Canonical unit names in this category
    pub fn units(&self) -> Vec<&'static str> {
        match self {
            Category::Temperature => TEMPERATURE_UNITS.to_vec(),
            linear => factors(*linear).iter().map(|(name, _)| *name).collect(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub(crate) const TEMPERATURE_UNITS: [&str; 3] = ["celsius", "fahrenheit", "kelvin"];

const LENGTH: &[(&str, f64)] = &[
    ("meters", 1.0),
    ("kilometers", 1000.0),
    ("centimeters", 0.01),
    ("millimeters", 0.001),
    ("miles", 1609.344),
    ("feet", 0.3048),
    ("inches", 0.0254),
    ("yards", 0.9144),
];

const MASS: &[(&str, f64)] = &[
    ("grams", 1.0),
    ("kilograms", 1000.0),
    ("milligrams", 0.001),
    ("pounds", 453.592),
    ("ounces", 28.3495),
    ("tons", 907185.0),
    ("tonnes", 1_000_000.0),
];

const VOLUME: &[(&str, f64)] = &[
    ("liters", 1.0),
    ("milliliters", 0.001),
    ("gallons", 3.78541),
    ("quarts", 0.946353),
    ("pints", 0.473176),
    ("cups", 0.236588),
];

// Months and years are mean Gregorian lengths
const TIME: &[(&str, f64)] = &[
    ("seconds", 1.0),
    ("minutes", 60.0),
    ("hours", 3600.0),
    ("days", 86400.0),
    ("weeks", 604800.0),
    ("months", 2_629_746.0),
    ("years", 31_556_952.0),
];

// Binary multiples
const DATA: &[(&str, f64)] = &[
    ("bytes", 1.0),
    ("kilobytes", 1024.0),
    ("megabytes", 1_048_576.0),
    ("gigabytes", 1_073_741_824.0),
    ("terabytes", 1_099_511_627_776.0),
];

/// Factor table for a linear category; empty for temperature
pub(crate) fn factors(category: Category) -> &'static [(&'static str, f64)] {
    match category {
        Category::Length => LENGTH,
        Category::Mass => MASS,
        Category::Volume => VOLUME,
        Category::Time => TIME,
        Category::Data => DATA,
        Category::Temperature => &[],
    }
}
