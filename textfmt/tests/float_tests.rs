use textfmt::{args, fixed, shortest, sprint, ArgumentError, ErrorType, FixedMode, MAX_FLOAT_PRECISION};

struct XorShift(u64);

impl XorShift {
    fn next(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    fn finite_f64(&mut self) -> f64 {
        loop {
            let value = f64::from_bits(self.next());
            if value.is_finite() {
                return value;
            }
        }
    }

    fn finite_f32(&mut self) -> f32 {
        loop {
            #[allow(clippy::cast_possible_truncation)]
            let value = f32::from_bits(self.next() as u32);
            if value.is_finite() {
                return value;
            }
        }
    }
}

fn render(fmt: &str, value: f64) -> String {
    sprint(fmt, &args!(value)).unwrap()
}

#[test]
fn test_default_shortest_form() {
    assert_eq!(render("{}", 0.0), "0.0");
    assert_eq!(render("{}", 42.0), "42.0");
    assert_eq!(render("{}", -42.0), "-42.0");
    assert_eq!(render("{}", 1.5), "1.5");
    assert_eq!(render("{}", -2.25), "-2.25");
    assert_eq!(render("{}", 1e-4), "0.0001");
    assert_eq!(render("{}", 1e-5), "1e-05");
    assert_eq!(render("{}", 9.999e-5), "9.999e-05");
    assert_eq!(render("{}", 1e15), "1000000000000000.0");
    assert_eq!(render("{}", 1e16), "1e+16");
    assert_eq!(render("{}", 1e100), "1e+100");
    assert_eq!(render("{}", 0.1), "0.1");
    assert_eq!(render("{}", 5e-324), "5e-324");
}

#[test]
fn test_f32_uses_its_own_shortest_digits() {
    assert_eq!(sprint("{}", &args!(0.1f32)).unwrap(), "0.1");
    assert_eq!(sprint("{}", &args!(1019666432.0f32)).unwrap(), "1019666400");
    assert_eq!(sprint("{:.3f}", &args!(2.5f32)).unwrap(), "2.500");
}

#[test]
fn test_fixed() {
    assert_eq!(render("{:f}", 0.0), "0.000000");
    assert_eq!(render("{:f}", 392.649), "392.649000");
    assert_eq!(render("{:.2f}", 152.29385), "152.29");
    assert_eq!(render("{:.0f}", 0.1), "0");
    assert_eq!(render("{:.3f}", 0.0005), "0.001");
    assert_eq!(render("{:.3f}", 0.00049), "0.000");
    assert_eq!(render("{:.1f}", -761519619559038.2), "-761519619559038.2");
    assert_eq!(render("{:F}", 1.0), "1.000000");
    assert_eq!(render("{:.0f}", 1e20), "100000000000000000000");
}

#[test]
fn test_fixed_rounds_half_to_even() {
    assert_eq!(render("{:.0f}", 0.5), "0");
    assert_eq!(render("{:.0f}", 1.5), "2");
    assert_eq!(render("{:.0f}", 2.5), "2");
    assert_eq!(render("{:.1f}", 0.25), "0.2");
    assert_eq!(render("{:.1f}", 0.75), "0.8");
}

#[test]
fn test_exponent() {
    assert_eq!(render("{0:e}", 392.649), "3.926490e+02");
    assert_eq!(render("{0:E}", 392.649), "3.926490E+02");
    assert_eq!(render("{:9.1e}", 0.0), "  0.0e+00");
    assert_eq!(render("{:.0e}", 9.5), "1e+01");
    assert_eq!(render("{:#.0e}", 42.0), "4.e+01");
    assert_eq!(render("{:.2e}", 1.5e-300), "1.50e-300");
}

#[test]
fn test_general() {
    assert_eq!(render("{:g}", 4.9014e6), "4.9014e+06");
    assert_eq!(render("{:g}", 0.0), "0");
    assert_eq!(render("{:g}", 100000.0), "100000");
    assert_eq!(render("{:g}", 1000000.0), "1e+06");
    assert_eq!(render("{:G}", 1e-10), "1E-10");
    assert_eq!(render("{0:+010.4g}", 392.649), "+0000392.6");
    assert_eq!(render("{:#.2g}", 0.5), "0.50");
    assert_eq!(render("{:.16g}", 0.1), "0.1");
    assert_eq!(render("{:.3}", 0.00123), "0.00123");
    assert_eq!(render("{:.2}", 1.234e56), "1.2e+56");
}

#[test]
fn test_alternate_keeps_point() {
    assert_eq!(render("{:#}", -42.0), "-42.0");
    assert_eq!(render("{:#6}", 42.0), "  42.0");
    assert_eq!(render("{:#.0f}", 3.0), "3.");
}

#[test]
fn test_percent() {
    assert_eq!(render("{:%}", 0.125), "12.500000%");
    assert_eq!(render("{:.2%}", 0.1234432), "12.34%");
    assert_eq!(render("{:>8.1%}", 0.5), "   50.0%");
}

#[test]
fn test_signs_and_alignment() {
    assert_eq!(render("{:+}", 1.0), "+1.0");
    assert_eq!(render("{: }", 1.0), " 1.0");
    assert_eq!(render("{:= }", 1.0), " 1.0");
    assert_eq!(render("{0:=7}", -42.0), "-  42.0");
    assert_eq!(render("{0:>7}", -42.0), "  -42.0");
    assert_eq!(render("{:+}", 42.0), "+42.0");
    assert_eq!(render("{:+}", -42.0), "-42.0");
    assert_eq!(render("{:07}", 42.0), "00042.0");
    assert_eq!(render("{:07}", -42.0), "-0042.0");
    assert_eq!(render("{:<6}", 1.5), "1.5   ");
    assert_eq!(render("{:^7}", 1.5), "  1.5  ");
    assert_eq!(render("{:08.2f}", -3.14159), "-0003.14");
    assert_eq!(render("{}", -0.0), "-0.0");
}

#[test]
fn test_non_finite() {
    assert_eq!(render("{:+}", f64::NAN), "+nan");
    assert_eq!(render("{: }", f64::INFINITY), " inf");
    assert_eq!(render("{}", f64::NEG_INFINITY), "-inf");
    assert_eq!(render("{:F}", f64::NAN), "NAN");
    assert_eq!(render("{:E}", f64::INFINITY), "INF");
    assert_eq!(render("{:^7}", f64::INFINITY), "  inf  ");
    assert_eq!(render("{:%}", f64::INFINITY), "inf%");
    assert_eq!(render("{:06}", f64::INFINITY), "   inf");
}

#[test]
fn test_float_debug_type_is_shortest() {
    assert_eq!(render("{:?}", 0.3), "0.3");
}

#[test]
fn test_precision_limit() {
    let max = format!("{{:.{MAX_FLOAT_PRECISION}f}}");
    let text = render(&max, 5e-324);
    assert_eq!(text.len(), 2 + MAX_FLOAT_PRECISION);
    assert!(text.starts_with("0.000"));

    let over = format!("{{:.{}f}}", MAX_FLOAT_PRECISION + 1);
    let err = sprint(&over, &args!(1.0)).unwrap_err();
    assert!(matches!(
        err.error_type,
        ErrorType::Argument(ArgumentError::FloatPrecisionTooLarge { .. })
    ));
}

#[test]
fn test_shortest_round_trips_f64() {
    let mut rng = XorShift(0x9E37_79B9_7F4A_7C15);
    for _ in 0..20_000 {
        let value = rng.finite_f64();
        let text = render("{}", value);
        let parsed: f64 = text.parse().unwrap();
        assert_eq!(parsed.to_bits(), value.to_bits(), "{text}");
    }
}

#[test]
fn test_shortest_round_trips_f32() {
    let mut rng = XorShift(0x2545_F491_4F6C_DD1D);
    for _ in 0..20_000 {
        let value = rng.finite_f32();
        let text = sprint("{}", &args!(value)).unwrap();
        let parsed: f32 = text.parse().unwrap();
        assert_eq!(parsed.to_bits(), value.to_bits(), "{text}");
    }
}

#[test]
fn test_shortest_digits_match_std() {
    let mut rng = XorShift(0xD1B5_4A32_D192_ED03);
    for _ in 0..10_000 {
        let value = rng.finite_f64().abs();
        if value == 0.0 {
            continue;
        }
        let digits = shortest(value).unwrap();
        let reference = format!("{value:e}");
        let (mantissa, exponent) = reference.split_once('e').unwrap();
        let reference_digits: String = mantissa.chars().filter(|&c| c != '.').collect();
        let exponent: i32 = exponent.parse().unwrap();

        assert_eq!(digits.as_str(), reference_digits, "{reference}");
        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        let first_digit_exponent = digits.exponent() + digits.len() as i32 - 1;
        assert_eq!(first_digit_exponent, exponent, "{reference}");
    }
}

#[test]
fn test_fixed_decimals_match_std() {
    let mut rng = XorShift(0x0123_4567_89AB_CDEF);
    for round in 0..5_000 {
        // Values between 1e-3 and 1e6 have long exact expansions, so no ties.
        #[allow(clippy::cast_precision_loss)]
        let value = (rng.next() % 1_000_000_000_000) as f64 / 1_000_000.0 + 0.001;
        let precision = round % 12;
        let ours = render(&format!("{{:.{precision}f}}"), value);
        let reference = format!("{value:.precision$}");
        assert_eq!(ours, reference, "{value} .{precision}");
    }
}

#[test]
fn test_fixed_modes_directly() {
    let digits = fixed(3.14159, FixedMode::Significant(3)).unwrap();
    assert_eq!(digits.as_str(), "314");
    assert_eq!(digits.exponent(), -2);

    let digits = fixed(3.14159, FixedMode::Decimals(1)).unwrap();
    assert_eq!(digits.as_str(), "31");
    assert_eq!(digits.exponent(), -1);

    let digits = fixed(99.96, FixedMode::Decimals(1)).unwrap();
    assert_eq!(digits.as_str(), "1000");
    assert_eq!(digits.exponent(), -1);

    assert!(fixed(f64::NAN, FixedMode::Decimals(2)).is_none());
    assert!(shortest(f32::INFINITY).is_none());
}
