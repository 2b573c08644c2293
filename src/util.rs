/// m/s to km/h
pub const MPS_TO_KMH: f64 = 3.6;

// Every finite f64 has at most this many fractional decimal digits.
const EXACT_FRACTION_DIGITS: usize = 1074;

/// Round to `decimal_places` and parse back, so the result is the double
/// nearest the fixed-point text shown to the user.
pub fn round_to(val: f64, decimal_places: u32) -> f64 {
    if !val.is_finite() {
        return val;
    }
    format_fixed(val, decimal_places).parse().unwrap_or(val)
}

/// Fixed-decimal text of the exact stored value. Halves round away from
/// zero, so `5.75` gives "5.8" while `1.65` (stored just below) gives "1.6".
pub fn format_fixed(val: f64, decimal_places: u32) -> String {
    let places = decimal_places as usize;
    if !val.is_finite() || places >= EXACT_FRACTION_DIGITS {
        return format!("{:.*}", places, val);
    }

    let exact = format!("{:.*}", EXACT_FRACTION_DIGITS, val.abs());
    let Some((int_part, frac)) = exact.split_once('.') else {
        return format!("{:.*}", places, val);
    };

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac.bytes().take(places))
        .collect();
    let mut int_len = int_part.len();

    if frac.as_bytes()[places] >= b'5' {
        let mut carried = true;
        for d in digits.iter_mut().rev() {
            if *d == b'9' {
                *d = b'0';
            } else {
                *d += 1;
                carried = false;
                break;
            }
        }
        if carried {
            digits.insert(0, b'1');
            int_len += 1;
        }
    }

    let mut out = String::with_capacity(digits.len() + 2);
    if val < 0.0 {
        out.push('-');
    }
    let (whole, fraction) = digits.split_at(int_len);
    out.extend(whole.iter().map(|&d| d as char));
    if places > 0 {
        out.push('.');
        out.extend(fraction.iter().map(|&d| d as char));
    }
    out
}

/// km/h equivalent of a speed in m/s, derived at display time only
pub fn speed_kmh(speed_mps: f64) -> f64 {
    speed_mps * MPS_TO_KMH
}

/// Plain number for echoing inputs back ("100", "2.5"), without trailing zeros
pub fn format_plain(val: f64) -> String {
    if val.is_finite() && (val - val.round()).abs() < f64::EPSILON {
        format!("{}", val.round())
    } else {
        format!("{val}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(17.391304, 2), 17.39);
        assert_eq!(round_to(5.75, 1), 5.8);
        assert_eq!(round_to(-2.345, 0), -2.0);
        assert_eq!(round_to(10.0, 2), 10.0);
    }

    #[test]
    fn test_round_to_uses_stored_value() {
        // 0.525 / 7 is stored just below 0.075
        assert_eq!(round_to(0.525 / 7.0, 2), 0.07);
        assert_eq!(round_to(1.005, 2), 1.0);
        assert_eq!(round_to(0.125, 2), 0.13);
    }

    #[test]
    fn test_round_to_huge_value() {
        assert_eq!(round_to(f64::MAX, 2), f64::MAX);
        assert!(round_to(f64::INFINITY, 2).is_infinite());
    }

    #[test]
    fn test_format_fixed() {
        assert_eq!(format_fixed(5.0, 1), "5.0");
        assert_eq!(format_fixed(5.75, 1), "5.8");
        assert_eq!(format_fixed(10.0, 2), "10.00");
        assert_eq!(format_fixed(0.0, 1), "0.0");
        assert_eq!(format_fixed(1.0 / 3.0, 2), "0.33");
    }

    #[test]
    fn test_format_fixed_rounds_exact_value() {
        // stored just below the tie
        assert_eq!(format_fixed(1.65, 1), "1.6");
        assert_eq!(format_fixed(9.995, 2), "9.99");
        assert_eq!(format_fixed(1.0 + 0.065 * 10.0, 1), "1.6");
        // exact ties go away from zero
        assert_eq!(format_fixed(0.125, 2), "0.13");
        assert_eq!(format_fixed(2.5, 0), "3");
        assert_eq!(format_fixed(-2.5, 0), "-3");
        // carry into the integer part
        assert_eq!(format_fixed(99.96, 1), "100.0");
        assert_eq!(format_fixed(9.96, 1), "10.0");
    }

    #[test]
    fn test_format_fixed_large_and_non_finite() {
        assert_eq!(format_fixed(1e21, 1), "1000000000000000000000.0");
        assert_eq!(format_fixed(f64::INFINITY, 2), "inf");
    }

    #[test]
    fn test_speed_kmh() {
        assert_eq!(format_fixed(speed_kmh(10.0), 2), "36.00");
        assert_eq!(speed_kmh(0.0), 0.0);
        assert!((speed_kmh(1.0) - 3.6).abs() < 1e-12);
    }

    #[test]
    fn test_format_plain() {
        assert_eq!(format_plain(100.0), "100");
        assert_eq!(format_plain(2.5), "2.5");
        assert_eq!(format_plain(0.0), "0");
    }
}
