//! Decimal digit generation for `f32` and `f64`.
//!
//! Both modes work on the exact binary value (mantissa and exponent bit fields)
//! with big-integer arithmetic, so no intermediate decimal rounding happens:
//!
//! - `shortest` yields the fewest digits that parse back to the same value
//!   (free-format generation between the rounding boundaries of the value);
//! - `fixed` yields a requested number of digits, correctly rounded half to even.
//!
//! The result is a bare digit string plus the decimal exponent of its last digit.
//! Placing the decimal point, the exponent suffix and any padding zeros is left to
//! the caller.

use core::cmp::Ordering;

/// Largest precision accepted for floating-point fields.
///
/// 1100 covers the exact decimal expansion of every `f64`, including the
/// 1074 fractional digits of the smallest subnormal.
pub const MAX_FLOAT_PRECISION: usize = 1100;

// Integer digits of f64::MAX, one carry digit, and the fraction.
const DIGIT_CAPACITY: usize = 309 + 1 + MAX_FLOAT_PRECISION + 10;

// 1280 bits; the scaled values stay below 2^1140.
const BIG_WORDS: usize = 40;

mod private {
    pub trait Sealed {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// Binary floating-point types the digit engine understands
pub trait Float: Copy + private::Sealed {
    #[doc(hidden)]
    const MANTISSA_BITS: u32;
    #[doc(hidden)]
    const EXPONENT_BITS: u32;
    #[doc(hidden)]
    fn raw_bits(self) -> u64;
    #[doc(hidden)]
    fn sign_negative(self) -> bool;
    #[doc(hidden)]
    fn is_nan_value(self) -> bool;
    #[doc(hidden)]
    fn abs_value(self) -> Self;
    #[doc(hidden)]
    fn percent(self) -> Self;
}

impl Float for f32 {
    const MANTISSA_BITS: u32 = 23;
    const EXPONENT_BITS: u32 = 8;

    fn raw_bits(self) -> u64 {
        u64::from(self.to_bits())
    }

    fn sign_negative(self) -> bool {
        self.is_sign_negative()
    }

    fn is_nan_value(self) -> bool {
        self.is_nan()
    }

    fn abs_value(self) -> Self {
        f32::from_bits(self.to_bits() & !(1 << 31))
    }

    fn percent(self) -> Self {
        self * 100.0
    }
}

impl Float for f64 {
    const MANTISSA_BITS: u32 = 52;
    const EXPONENT_BITS: u32 = 11;

    fn raw_bits(self) -> u64 {
        self.to_bits()
    }

    fn sign_negative(self) -> bool {
        self.is_sign_negative()
    }

    fn is_nan_value(self) -> bool {
        self.is_nan()
    }

    fn abs_value(self) -> Self {
        f64::from_bits(self.to_bits() & !(1 << 63))
    }

    fn percent(self) -> Self {
        self * 100.0
    }
}

/// How many digits `fixed` produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixedMode {
    /// Exactly this many digits after the decimal point
    Decimals(usize),
    /// Exactly this many significant digits (0 is treated as 1)
    Significant(usize),
}

/// Decimal digits of a float and the base-10 exponent of the last digit
#[derive(Clone)]
pub struct Digits {
    bytes: [u8; DIGIT_CAPACITY],
    len: usize,
    exponent: i32,
}

impl Digits {
    fn new() -> Self {
        Digits {
            bytes: [0; DIGIT_CAPACITY],
            len: 0,
            exponent: 0,
        }
    }

    fn zeros(count: usize, exponent: i32) -> Self {
        let mut digits = Digits::new();
        let count = count.max(1);
        digits.bytes[..count].fill(b'0');
        digits.len = count;
        digits.exponent = exponent;
        digits
    }

    fn push(&mut self, digit: u8) {
        self.bytes[self.len] = b'0' + digit;
        self.len += 1;
    }

    /// ASCII digits, most significant first
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(self.as_bytes()).unwrap_or_default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Decimal exponent of the last digit
    #[must_use]
    pub fn exponent(&self) -> i32 {
        self.exponent
    }

    /// Drops trailing zeros, keeping at least one digit.
    pub fn trim_trailing_zeros(&mut self) {
        while self.len > 1 && self.bytes[self.len - 1] == b'0' {
            self.len -= 1;
            self.exponent += 1;
        }
    }

    /// Adds one unit in the last place; returns `true` if every digit was a 9.
    fn round_up(&mut self) -> bool {
        for slot in self.bytes[..self.len].iter_mut().rev() {
            if *slot == b'9' {
                *slot = b'0';
            } else {
                *slot += 1;
                return false;
            }
        }
        if self.len > 0 {
            self.bytes[0] = b'1';
        }
        true
    }
}

impl core::fmt::Debug for Digits {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Digits")
            .field("digits", &self.as_str())
            .field("exponent", &self.exponent)
            .finish()
    }
}

struct Decoded {
    mantissa: u64,
    exponent: i32,
    lower_closer: bool,
}

fn decode<F: Float>(value: F) -> Option<Decoded> {
    let bits = value.raw_bits();
    let fraction = bits & ((1u64 << F::MANTISSA_BITS) - 1);
    let exponent_mask = (1u64 << F::EXPONENT_BITS) - 1;
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    let biased = ((bits >> F::MANTISSA_BITS) & exponent_mask) as i32;
    if biased as u64 == exponent_mask {
        return None;
    }

    #[allow(clippy::cast_possible_wrap)]
    let bias = (1i32 << (F::EXPONENT_BITS - 1)) - 1 + F::MANTISSA_BITS as i32;
    Some(if biased == 0 {
        Decoded {
            mantissa: fraction,
            exponent: 1 - bias,
            lower_closer: false,
        }
    } else {
        Decoded {
            mantissa: fraction | (1u64 << F::MANTISSA_BITS),
            exponent: biased - bias,
            lower_closer: fraction == 0 && biased > 1,
        }
    })
}

/// Lower bound for the number of integer digits of `mantissa * 2^exponent`.
fn estimate_decimal_exponent(mantissa: u64, exponent: i32) -> i32 {
    #[allow(clippy::cast_possible_wrap)]
    let log2 = exponent + (u64::BITS - mantissa.leading_zeros()) as i32 - 1;
    (log2 * 1233).div_euclid(4096) - 1
}

/// Shortest digits that read back as `value`; `None` for NaN and infinities.
///
/// The sign is ignored. Zero yields a single `0` with exponent 0.
#[must_use]
pub fn shortest<F: Float>(value: F) -> Option<Digits> {
    let Decoded {
        mantissa,
        exponent,
        lower_closer,
    } = decode(value)?;
    if mantissa == 0 {
        return Some(Digits::zeros(1, 0));
    }
    let inclusive = mantissa % 2 == 0;

    // value = r / s, upper boundary = (r + m_plus) / s, lower = (r - m_minus) / s
    let e = exponent.unsigned_abs();
    let (mut r, mut s, mut m_plus, mut m_minus) = match (exponent >= 0, lower_closer) {
        (true, true) => (
            Big::from_u64(mantissa).shl(e + 2),
            Big::from_u64(4),
            Big::from_u64(1).shl(e + 1),
            Big::from_u64(1).shl(e),
        ),
        (true, false) => (
            Big::from_u64(mantissa).shl(e + 1),
            Big::from_u64(2),
            Big::from_u64(1).shl(e),
            Big::from_u64(1).shl(e),
        ),
        (false, true) => (
            Big::from_u64(mantissa).shl(2),
            Big::from_u64(1).shl(e + 2),
            Big::from_u64(2),
            Big::from_u64(1),
        ),
        (false, false) => (
            Big::from_u64(mantissa).shl(1),
            Big::from_u64(1).shl(e + 1),
            Big::from_u64(1),
            Big::from_u64(1),
        ),
    };

    let mut k = estimate_decimal_exponent(mantissa, exponent);
    if k >= 0 {
        s.mul_pow10(k.unsigned_abs());
    } else {
        let scale = k.unsigned_abs();
        r.mul_pow10(scale);
        m_plus.mul_pow10(scale);
        m_minus.mul_pow10(scale);
    }
    // Smallest k with the upper boundary below 10^k.
    while reaches(&r.plus(&m_plus), &s, inclusive) {
        s.mul_small(10);
        k += 1;
    }

    let mut digits = Digits::new();
    loop {
        r.mul_small(10);
        m_plus.mul_small(10);
        m_minus.mul_small(10);
        k -= 1;
        let digit = r.div_rem_digit(&s);

        let low = match r.cmp(&m_minus) {
            Ordering::Less => true,
            Ordering::Equal => inclusive,
            Ordering::Greater => false,
        };
        let high = reaches(&r.plus(&m_plus), &s, inclusive);
        if !low && !high {
            digits.push(digit);
            continue;
        }

        let round_up = match (low, high) {
            (true, false) => false,
            (false, true) => true,
            _ => r.shl(1).cmp(&s) != Ordering::Less,
        };
        debug_assert!(!(round_up && digit == 9));
        digits.push(if round_up { digit + 1 } else { digit });
        break;
    }
    digits.exponent = k;
    Some(digits)
}

/// Correctly rounded digits of `value`; `None` for NaN, infinities and
/// precisions above `MAX_FLOAT_PRECISION`.
///
/// The sign is ignored. For zero, `Decimals(p)` with `p > 0` yields `p` zeros
/// with exponent `-p`; every other zero request yields a single `0` with
/// exponent 0.
#[must_use]
pub fn fixed<F: Float>(value: F, mode: FixedMode) -> Option<Digits> {
    let Decoded {
        mantissa, exponent, ..
    } = decode(value)?;

    let (decimals, significant) = match mode {
        FixedMode::Decimals(p) if p <= MAX_FLOAT_PRECISION => (Some(p), 0),
        FixedMode::Significant(n) if n <= MAX_FLOAT_PRECISION + 1 => (None, n.max(1)),
        _ => return None,
    };
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    let zero = || match decimals {
        Some(p) if p > 0 => Digits::zeros(p, -(p as i32)),
        _ => Digits::zeros(1, 0),
    };
    if mantissa == 0 {
        return Some(zero());
    }

    // value = r / s
    let (mut r, mut s) = if exponent >= 0 {
        (
            Big::from_u64(mantissa).shl(exponent.unsigned_abs()),
            Big::from_u64(1),
        )
    } else {
        (
            Big::from_u64(mantissa),
            Big::from_u64(1).shl(exponent.unsigned_abs()),
        )
    };

    let mut k = estimate_decimal_exponent(mantissa, exponent);
    if k >= 0 {
        s.mul_pow10(k.unsigned_abs());
    } else {
        r.mul_pow10(k.unsigned_abs());
    }
    // Now 0.1 <= r / s < 1 and value = (r / s) * 10^k.
    while r.cmp(&s) != Ordering::Less {
        s.mul_small(10);
        k += 1;
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    let (count, last_exponent) = match decimals {
        Some(p) => (i64::from(k) + p as i64, -(p as i32)),
        None => (significant as i64, k - significant as i32),
    };

    if count < 0 {
        return Some(zero());
    }
    if count == 0 {
        // The whole value is a fraction of one unit in the last place.
        return Some(if r.shl(1).cmp(&s) == Ordering::Greater {
            let mut digits = Digits::new();
            digits.push(1);
            digits.exponent = last_exponent;
            digits
        } else {
            zero()
        });
    }

    let mut digits = Digits::new();
    for _ in 0..count {
        r.mul_small(10);
        let digit = r.div_rem_digit(&s);
        digits.push(digit);
    }
    digits.exponent = last_exponent;

    let round_up = match r.shl(1).cmp(&s) {
        Ordering::Greater => true,
        Ordering::Equal => digits.bytes[digits.len - 1] % 2 == 1,
        Ordering::Less => false,
    };
    if round_up && digits.round_up() {
        // 99..9 became 100..0: one more integer digit.
        match decimals {
            Some(_) => digits.push(0),
            None => digits.exponent += 1,
        }
    }
    Some(digits)
}

fn reaches(upper: &Big, s: &Big, inclusive: bool) -> bool {
    match upper.cmp(s) {
        Ordering::Greater => true,
        Ordering::Equal => inclusive,
        Ordering::Less => false,
    }
}

/// Unsigned big integer with a fixed number of 32-bit words, little-endian.
#[derive(Clone, Copy)]
struct Big {
    size: usize,
    words: [u32; BIG_WORDS],
}

impl Big {
    #[allow(clippy::cast_possible_truncation)]
    fn from_u64(value: u64) -> Self {
        let mut big = Big {
            size: 0,
            words: [0; BIG_WORDS],
        };
        big.words[0] = value as u32;
        big.words[1] = (value >> 32) as u32;
        big.size = if big.words[1] != 0 {
            2
        } else {
            usize::from(big.words[0] != 0)
        };
        big
    }

    #[allow(clippy::cast_possible_truncation)]
    fn mul_small(&mut self, factor: u32) {
        let mut carry = 0u64;
        for word in &mut self.words[..self.size] {
            let product = u64::from(*word) * u64::from(factor) + carry;
            *word = product as u32;
            carry = product >> 32;
        }
        if carry > 0 {
            self.words[self.size] = carry as u32;
            self.size += 1;
        }
    }

    fn mul_pow10(&mut self, mut exp: u32) {
        const POW10: [u32; 10] = [
            1,
            10,
            100,
            1_000,
            10_000,
            100_000,
            1_000_000,
            10_000_000,
            100_000_000,
            1_000_000_000,
        ];
        while exp >= 9 {
            self.mul_small(POW10[9]);
            exp -= 9;
        }
        if exp > 0 {
            self.mul_small(POW10[exp as usize]);
        }
    }

    fn shl(mut self, bits: u32) -> Self {
        if self.size == 0 {
            return self;
        }
        let word_shift = (bits / 32) as usize;
        let bit_shift = bits % 32;

        if bit_shift > 0 {
            let mut carry = 0u32;
            for word in &mut self.words[..self.size] {
                let current = *word;
                *word = (current << bit_shift) | carry;
                carry = current >> (32 - bit_shift);
            }
            if carry > 0 {
                self.words[self.size] = carry;
                self.size += 1;
            }
        }
        if word_shift > 0 {
            self.words.copy_within(0..self.size, word_shift);
            self.words[..word_shift].fill(0);
            self.size += word_shift;
        }
        self
    }

    #[allow(clippy::cast_possible_truncation)]
    fn plus(&self, other: &Big) -> Big {
        let mut sum = *self;
        let size = self.size.max(other.size);
        let mut carry = 0u64;
        for i in 0..size {
            let total = u64::from(sum.words[i]) + u64::from(other.words[i]) + carry;
            sum.words[i] = total as u32;
            carry = total >> 32;
        }
        sum.size = size;
        if carry > 0 {
            sum.words[size] = carry as u32;
            sum.size += 1;
        }
        sum
    }

    /// `self -= other`; requires `self >= other`.
    fn sub_assign(&mut self, other: &Big) {
        let mut borrow = false;
        for i in 0..self.size {
            let (diff, under) = self.words[i].overflowing_sub(other.words[i]);
            let (diff, under_borrow) = diff.overflowing_sub(u32::from(borrow));
            self.words[i] = diff;
            borrow = under || under_borrow;
        }
        while self.size > 0 && self.words[self.size - 1] == 0 {
            self.size -= 1;
        }
    }

    /// Divides by `divisor` when the quotient is a single decimal digit,
    /// leaving the remainder in `self`.
    fn div_rem_digit(&mut self, divisor: &Big) -> u8 {
        let mut digit = 0;
        while self.cmp(divisor) != Ordering::Less {
            self.sub_assign(divisor);
            digit += 1;
        }
        digit
    }

    fn cmp(&self, other: &Big) -> Ordering {
        self.size.cmp(&other.size).then_with(|| {
            self.words[..self.size]
                .iter()
                .rev()
                .cmp(other.words[..other.size].iter().rev())
        })
    }
}
