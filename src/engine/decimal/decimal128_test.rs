use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::engine::decimal::{DECIMAL128_MAX_RAW, DECIMAL128_MIN_RAW, Decimal128};
use crate::engine::errors::ArithmeticError;

/// Schoolbook multiplication over decimal digit strings. Arbitrary precision
/// reference for the 256-bit multiply path.
fn string_multiply(lhs: &str, rhs: &str) -> String {
    let a: Vec<u32> = lhs.bytes().map(|b| (b - b'0') as u32).collect();
    let b: Vec<u32> = rhs.bytes().map(|b| (b - b'0') as u32).collect();
    let mut out = vec![0u32; a.len() + b.len()];
    for i in (0..a.len()).rev() {
        for j in (0..b.len()).rev() {
            let p = a[i] * b[j] + out[i + j + 1];
            out[i + j + 1] = p % 10;
            out[i + j] += p / 10;
        }
    }
    let digits: String = out
        .iter()
        .skip_while(|d| **d == 0)
        .map(|d| char::from(b'0' + *d as u8))
        .collect();
    if digits.is_empty() {
        "0".to_string()
    } else {
        digits
    }
}

/// Drops the last `n` digits, i.e. truncating division of the magnitude by 10^n.
fn truncate_digits(digits: &str, n: usize) -> i128 {
    if digits.len() <= n {
        return 0;
    }
    digits[..digits.len() - n].parse::<i128>().unwrap()
}

fn random_operand(rng: &mut StdRng, digits: usize) -> (i128, String) {
    let mut value: i128 = 0;
    let mut text = String::with_capacity(digits);
    for i in 0..digits {
        let d: u8 = if i + 1 == digits {
            rng.gen_range(0..=9)
        } else {
            rng.gen_range(1..=9)
        };
        value = value * 10 + d as i128;
        text.push(char::from(b'0' + d));
    }
    (value, text)
}

#[test]
fn add_is_exact_at_fixed_scale() {
    let a = Decimal128::new(1_050);
    let b = Decimal128::new(-25);
    assert_eq!(a.checked_add(b).unwrap(), Decimal128::new(1_025));
    assert_eq!(a.checked_sub(b).unwrap(), Decimal128::new(1_075));
}

#[test]
fn add_and_set_updates_receiver() {
    let mut acc = Decimal128::ZERO;
    for raw in [5, 3, 2] {
        acc.add_and_set(Decimal128::new(raw)).unwrap();
    }
    assert_eq!(acc.raw(), 10);
}

#[test]
fn add_overflow_is_reported_not_wrapped() {
    let err = Decimal128::MAX.checked_add(Decimal128::new(1)).unwrap_err();
    assert_eq!(err, ArithmeticError::Overflow { op: "add" });

    let err = Decimal128::MIN.checked_add(Decimal128::new(-1)).unwrap_err();
    assert_eq!(err, ArithmeticError::Overflow { op: "add" });

    assert!(Decimal128::MIN.checked_sub(Decimal128::new(1)).is_err());
}

#[test]
fn add_and_set_leaves_receiver_unchanged_on_overflow() {
    let mut acc = Decimal128::new(DECIMAL128_MAX_RAW - 1);
    assert!(acc.add_and_set(Decimal128::new(2)).is_err());
    assert_eq!(acc.raw(), DECIMAL128_MAX_RAW - 1);
}

#[test]
fn multiply_rescales_back_to_operand_scale() {
    // 1.50 * 2.00 = 3.00 at scale 2
    let mut a = Decimal128::new(150);
    a.multiply_and_set(Decimal128::new(200), 2).unwrap();
    assert_eq!(a.raw(), 300);
}

#[test]
fn multiply_truncates_toward_zero() {
    // 0.7 * 0.5 = 0.35 -> 0.3 at scale 1
    let pos = Decimal128::new(7).checked_mul(Decimal128::new(5), 1).unwrap();
    assert_eq!(pos.raw(), 3);

    // -0.7 * 0.5 = -0.35 -> -0.3, not -0.4
    let neg = Decimal128::new(-7).checked_mul(Decimal128::new(5), 1).unwrap();
    assert_eq!(neg.raw(), -3);

    let neg2 = Decimal128::new(-7).checked_mul(Decimal128::new(-5), 1).unwrap();
    assert_eq!(neg2.raw(), 3);
}

#[test]
fn multiply_with_zero_precision_is_plain_product() {
    let p = Decimal128::new(-12).checked_mul(Decimal128::new(11), 0).unwrap();
    assert_eq!(p.raw(), -132);
}

#[test]
fn multiply_product_wider_than_128_bits_survives_rescale() {
    // (10^30)^2 = 10^60 only fits in the wide intermediate; /10^30 brings it back.
    let ten_30 = Decimal128::new(10i128.pow(30));
    let p = ten_30.checked_mul(ten_30, 30).unwrap();
    assert_eq!(p.raw(), 10i128.pow(30));
}

#[test]
fn multiply_overflow_after_rescale_is_reported() {
    let err = Decimal128::MAX.checked_mul(Decimal128::new(10), 0).unwrap_err();
    assert_eq!(err, ArithmeticError::Overflow { op: "multiply" });

    let mut acc = Decimal128::new(10i128.pow(30));
    assert!(acc.multiply_and_set(Decimal128::new(10i128.pow(30)), 10).is_err());
    assert_eq!(acc.raw(), 10i128.pow(30));
}

#[test]
fn multiply_extreme_operands_do_not_overflow_intermediate() {
    let p = Decimal128::MIN.checked_mul(Decimal128::MIN, 76).unwrap();
    // 2^254 / 10^76 == 2 (2^254 ~ 2.89e76)
    assert_eq!(p.raw(), 2);
}

#[test]
fn multiply_precision_beyond_wide_range_yields_zero() {
    let p = Decimal128::MAX.checked_mul(Decimal128::MAX, 77).unwrap();
    assert_eq!(p, Decimal128::ZERO);
    let p = Decimal128::MIN.checked_mul(Decimal128::MAX, 200).unwrap();
    assert_eq!(p, Decimal128::ZERO);
}

#[test]
fn multiply_matches_arbitrary_precision_reference() {
    let mut rng = StdRng::seed_from_u64(0x00de_c128);
    for _ in 0..10_000 {
        let (a, a_text) = random_operand(&mut rng, 34);
        let (b, b_text) = random_operand(&mut rng, 34);
        let precision: u32 = rng.gen_range(30..=45);
        let negate_a = rng.gen_bool(0.5);
        let negate_b = rng.gen_bool(0.5);

        let lhs = if negate_a { -a } else { a };
        let rhs = if negate_b { -b } else { b };

        let mut got = Decimal128::new(lhs);
        got.multiply_and_set(Decimal128::new(rhs), precision)
            .unwrap();

        let magnitude = truncate_digits(&string_multiply(&a_text, &b_text), precision as usize);
        let expected = if negate_a != negate_b {
            -magnitude
        } else {
            magnitude
        };
        assert_eq!(
            got.raw(),
            expected,
            "{} * {} at precision {}",
            lhs,
            rhs,
            precision
        );
    }
}

#[test]
fn ordering_compares_raw_values() {
    let mut values = vec![
        Decimal128::new(5),
        Decimal128::MIN,
        Decimal128::new(-5),
        Decimal128::MAX,
        Decimal128::ZERO,
    ];
    values.sort();
    assert_eq!(
        values,
        vec![
            Decimal128::MIN,
            Decimal128::new(-5),
            Decimal128::ZERO,
            Decimal128::new(5),
            Decimal128::MAX,
        ]
    );
    assert!(Decimal128::new(1) > Decimal128::new(-1));
    assert!(Decimal128::new(1) <= Decimal128::new(1));
}

#[test]
fn set_value_replaces_raw_in_place() {
    let mut d = Decimal128::new(42);
    d.set_value(DECIMAL128_MIN_RAW);
    assert_eq!(d, Decimal128::MIN);
    d.set_value(DECIMAL128_MAX_RAW);
    assert_eq!(d, Decimal128::MAX);
}

#[test]
fn from_integer_scales_units() {
    assert_eq!(Decimal128::from_integer(3, 2).unwrap().raw(), 300);
    assert_eq!(Decimal128::from_integer(-7, 0).unwrap().raw(), -7);
    assert!(Decimal128::from_integer(i64::MAX, 30).is_err());
    assert!(Decimal128::from_integer(1, 39).is_err());
}

#[test]
fn to_f64_interprets_scale() {
    assert_eq!(Decimal128::new(150).to_f64(2), 1.5);
    assert_eq!(Decimal128::new(-25).to_f64(1), -2.5);
    assert_eq!(Decimal128::new(7).to_f64(0), 7.0);
}
