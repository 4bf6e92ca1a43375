//! Rendering of numeric results
//!
//! Three-way rule:
//! 1. integral and `|n| <= 1e15` → plain integer (`4`, `-12`)
//! 2. `|n| < 1e-4` or `|n| >= 1e10` → shortest scientific (`1e+16`, `1.5e-05`)
//! 3. otherwise → shortest fixed-point, no trailing zeros (`0.5`, `3.14`)

const MAX_PLAIN_INTEGER: f64 = 1e15;
const SCIENTIFIC_BELOW: f64 = 1e-4;
const SCIENTIFIC_FROM: f64 = 1e10;

/// Format a number for display
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "+Inf" } else { "-Inf" }.to_string();
    }

    let abs = n.abs();
    if n.fract() == 0.0 && abs <= MAX_PLAIN_INTEGER {
        // -0.0 renders as "0"
        return format!("{}", n as i64);
    }

    if abs < SCIENTIFIC_BELOW || abs >= SCIENTIFIC_FROM {
        return scientific(n);
    }

    fixed(n)
}

/// Shortest round-trip mantissa with a signed, two-digit-minimum exponent
fn scientific(n: f64) -> String {
    let raw = format!("{:e}", n);
    let Some((mantissa, exponent)) = raw.split_once('e') else {
        return raw;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("{}e{}{:02}", mantissa, sign, exponent.abs())
}

fn fixed(n: f64) -> String {
    let mut out = format!("{}", n);
    if out.contains('.') {
        while out.ends_with('0') {
            out.pop();
        }
        if out.ends_with('.') {
            out.pop();
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers() {
        assert_eq!(format_number(4.0), "4");
        assert_eq!(format_number(-12.0), "-12");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(4e9), "4000000000");
        assert_eq!(format_number(1e15), "1000000000000000");
    }

    #[test]
    fn test_fixed_point() {
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(3.14), "3.14");
        assert_eq!(format_number(-2.25), "-2.25");
        assert_eq!(format_number(0.0001), "0.0001");
        assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
    }

    #[test]
    fn test_scientific() {
        assert_eq!(format_number(1e16), "1e+16");
        assert_eq!(format_number(1.5e-5), "1.5e-05");
        assert_eq!(format_number(-2.5e-7), "-2.5e-07");
        assert_eq!(format_number(12345678901.5), "1.23456789015e+10");
        assert_eq!(format_number(1.2345e100), "1.2345e+100");
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::INFINITY), "+Inf");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Inf");
    }
}
