//! Unit alias normalization

/// (alias, canonical) pairs; canonical names map to themselves implicitly
const ALIASES: &[(&str, &str)] = &[
    // length
    ("m", "meters"),
    ("meter", "meters"),
    ("metre", "meters"),
    ("metres", "meters"),
    ("km", "kilometers"),
    ("kms", "kilometers"),
    ("kilometer", "kilometers"),
    ("kilometre", "kilometers"),
    ("kilometres", "kilometers"),
    ("cm", "centimeters"),
    ("centimeter", "centimeters"),
    ("centimetre", "centimeters"),
    ("centimetres", "centimeters"),
    ("mm", "millimeters"),
    ("millimeter", "millimeters"),
    ("millimetre", "millimeters"),
    ("millimetres", "millimeters"),
    ("mi", "miles"),
    ("mile", "miles"),
    ("ft", "feet"),
    ("foot", "feet"),
    ("in", "inches"),
    ("inch", "inches"),
    ("yd", "yards"),
    ("yds", "yards"),
    ("yard", "yards"),
    // mass
    ("g", "grams"),
    ("gram", "grams"),
    ("gramme", "grams"),
    ("grammes", "grams"),
    ("kg", "kilograms"),
    ("kgs", "kilograms"),
    ("kilo", "kilograms"),
    ("kilos", "kilograms"),
    ("kilogram", "kilograms"),
    ("mg", "milligrams"),
    ("milligram", "milligrams"),
    ("lb", "pounds"),
    ("lbs", "pounds"),
    ("pound", "pounds"),
    ("oz", "ounces"),
    ("ounce", "ounces"),
    ("ton", "tons"),
    ("t", "tonnes"),
    ("tonne", "tonnes"),
    // volume
    ("l", "liters"),
    ("liter", "liters"),
    ("litre", "liters"),
    ("litres", "liters"),
    ("ml", "milliliters"),
    ("milliliter", "milliliters"),
    ("millilitre", "milliliters"),
    ("millilitres", "milliliters"),
    ("gal", "gallons"),
    ("gallon", "gallons"),
    ("qt", "quarts"),
    ("quart", "quarts"),
    ("pt", "pints"),
    ("pint", "pints"),
    ("cup", "cups"),
    // time
    ("s", "seconds"),
    ("sec", "seconds"),
    ("secs", "seconds"),
    ("second", "seconds"),
    ("min", "minutes"),
    ("mins", "minutes"),
    ("minute", "minutes"),
    ("h", "hours"),
    ("hr", "hours"),
    ("hrs", "hours"),
    ("hour", "hours"),
    ("d", "days"),
    ("day", "days"),
    ("wk", "weeks"),
    ("wks", "weeks"),
    ("week", "weeks"),
    ("mo", "months"),
    ("month", "months"),
    ("y", "years"),
    ("yr", "years"),
    ("yrs", "years"),
    ("year", "years"),
    // data
    ("b", "bytes"),
    ("byte", "bytes"),
    ("kb", "kilobytes"),
    ("kib", "kilobytes"),
    ("kilobyte", "kilobytes"),
    ("mb", "megabytes"),
    ("mib", "megabytes"),
    ("megabyte", "megabytes"),
    ("gb", "gigabytes"),
    ("gib", "gigabytes"),
    ("gigabyte", "gigabytes"),
    ("tb", "terabytes"),
    ("tib", "terabytes"),
    ("terabyte", "terabytes"),
    // temperature
    ("c", "celsius"),
    ("°c", "celsius"),
    ("degc", "celsius"),
    ("centigrade", "celsius"),
    ("f", "fahrenheit"),
    ("°f", "fahrenheit"),
    ("degf", "fahrenheit"),
    ("k", "kelvin"),
    ("kelvins", "kelvin"),
];

/// Map an abbreviation or synonym to its canonical unit name
///
/// Matching is case-insensitive and ignores surrounding whitespace and a
/// leading "degrees". Unknown names come back lowercased so that the
/// converter can report them.
pub fn normalize_unit(alias: &str) -> String {
    let lowered = alias.trim().to_lowercase();
    let key = lowered
        .strip_prefix("degrees ")
        .or_else(|| lowered.strip_prefix("degree "))
        .unwrap_or(&lowered)
        .trim();

    ALIASES
        .iter()
        .find(|(a, _)| *a == key)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or_else(|| key.to_string())
}
