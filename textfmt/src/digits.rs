//! Integer digit counting and base-N digit emission.

/// Enough room for `u64::MAX` in base 2.
pub const MAX_INT_DIGITS: usize = 64;

const POWERS_OF_10: [u64; 20] = [
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
    10_000_000_000,
    100_000_000_000,
    1_000_000_000_000,
    10_000_000_000_000,
    100_000_000_000_000,
    1_000_000_000_000_000,
    10_000_000_000_000_000,
    100_000_000_000_000_000,
    1_000_000_000_000_000_000,
    10_000_000_000_000_000_000,
];

const DIGIT_PAIRS: &[u8; 200] = b"\
0001020304050607080910111213141516171819\
2021222324252627282930313233343536373839\
4041424344454647484950515253545556575859\
6061626364656667686970717273747576777879\
8081828384858687888990919293949596979899";

const LOWER_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const UPPER_DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// A radix in `2..=36`, the range the digit alphabet covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Base(u8);

impl Base {
    pub const BINARY: Base = Base(2);
    pub const OCTAL: Base = Base(8);
    pub const DECIMAL: Base = Base(10);
    pub const HEX: Base = Base(16);

    /// `None` outside `2..=36`.
    #[must_use]
    pub fn new(radix: u32) -> Option<Base> {
        match u8::try_from(radix) {
            Ok(radix @ 2..=36) => Some(Base(radix)),
            _ => None,
        }
    }

    #[must_use]
    pub fn get(self) -> u32 {
        u32::from(self.0)
    }
}

/// Number of digits of `n` written in `base`; 1 for zero.
///
/// Base 10 takes the bit length of `n`, scales it by 1233/4096 (just under
/// log10(2)) and corrects the estimate with one table lookup. Power-of-two
/// bases are derived from the bit length directly.
#[must_use]
pub fn count_digits(n: u64, base: Base) -> u32 {
    let base = base.get();
    let bits = u64::BITS - (n | 1).leading_zeros();
    match base {
        10 => {
            let estimate = (bits * 1233) >> 12;
            estimate + u32::from((n | 1) >= POWERS_OF_10[estimate as usize])
        }
        2 | 4 | 8 | 16 | 32 => {
            let shift = base.trailing_zeros();
            bits.div_ceil(shift)
        }
        _ => {
            let base = u64::from(base);
            let mut count = 1;
            let mut rest = n / base;
            while rest > 0 {
                rest /= base;
                count += 1;
            }
            count
        }
    }
}

/// Writes the digits of `n` in `base`, most significant first, at the end of
/// `out`, and returns the written part.
///
/// Letters for bases above 10 are lowercase unless `upper` is set.
pub fn format_unsigned(n: u64, base: Base, upper: bool, out: &mut [u8; MAX_INT_DIGITS]) -> &[u8] {
    let len = count_digits(n, base) as usize;
    let start = MAX_INT_DIGITS - len;
    let digits = &mut out[start..];

    if base == Base::DECIMAL {
        write_decimal(n, digits);
    } else {
        let alphabet = if upper { UPPER_DIGITS } else { LOWER_DIGITS };
        let base = u64::from(base.get());
        let mut rest = n;
        for slot in digits.iter_mut().rev() {
            *slot = alphabet[(rest % base) as usize];
            rest /= base;
        }
    }
    &out[start..]
}

#[allow(clippy::cast_possible_truncation)]
fn write_decimal(mut n: u64, digits: &mut [u8]) {
    let mut end = digits.len();
    while n >= 100 {
        let pair = (n % 100) as usize * 2;
        n /= 100;
        end -= 2;
        digits[end..end + 2].copy_from_slice(&DIGIT_PAIRS[pair..pair + 2]);
    }
    if n >= 10 {
        let pair = n as usize * 2;
        digits[end - 2..end].copy_from_slice(&DIGIT_PAIRS[pair..pair + 2]);
    } else {
        digits[end - 1] = b'0' + n as u8;
    }
}
