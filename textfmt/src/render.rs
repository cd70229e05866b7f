//! Field renderers: one per argument kind, plus the shared padding and
//! truncation rules.

use alloc::borrow::Cow;
use alloc::string::String;

use chunkbuf::ChunkBufError;

use crate::arg::{Arg, ArgKind};
use crate::digits::{format_unsigned, Base, MAX_INT_DIGITS};
use crate::error::{ArgumentError, Result};
use crate::float::{self, FixedMode, Float, MAX_FLOAT_PRECISION};
use crate::formatter::Formatter;
use crate::output::Output;
use crate::spec::{Align, FieldSpec, FormatType, Sign};

/// A run of body bytes, or a run of zeros that is never materialized.
#[derive(Clone, Copy)]
enum Piece<'a> {
    Bytes(&'a [u8]),
    Zeros(usize),
}

impl Piece<'_> {
    fn len(&self) -> usize {
        match self {
            Piece::Bytes(bytes) => bytes.len(),
            Piece::Zeros(count) => *count,
        }
    }

    fn write(&self, out: &mut dyn Output) -> core::result::Result<(), ChunkBufError> {
        match self {
            Piece::Bytes(bytes) => out.write_bytes(bytes),
            Piece::Zeros(count) => out.write_repeated('0', *count),
        }
    }
}

pub(crate) fn render_arg(f: &mut Formatter<'_>, arg: Arg<'_>) -> Result<()> {
    let spec = *f.spec();
    let kind = arg.kind();
    if let Some(ty) = spec.ty {
        if !ty.accepts(kind) {
            return Err(f.error(ArgumentError::InvalidType {
                ty: ty.as_char(),
                kind,
            }));
        }
    }
    let integer_type = spec.ty.is_some_and(FormatType::is_integer);

    match arg {
        Arg::Signed(value, _) => write_integer(f, &spec, value < 0, value.unsigned_abs(), kind),
        Arg::Unsigned(value, _) => write_integer(f, &spec, false, value, kind),
        Arg::Bool(value) if integer_type => {
            write_integer(f, &spec, false, u64::from(value), kind)
        }
        Arg::Bool(value) => {
            check_non_arithmetic(f, &spec)?;
            write_text(f, &spec, if value { "true" } else { "false" }, None)
        }
        Arg::CodePoint(c) if integer_type => {
            write_integer(f, &spec, false, u64::from(u32::from(c)), kind)
        }
        Arg::CodePoint(c) => write_code_point(f, &spec, c),
        Arg::F32(value) => write_float(f, &spec, value),
        Arg::F64(value) => write_float(f, &spec, value),
        Arg::Pointer(address) => write_pointer(f, &spec, address, kind),
        Arg::Str(text) => match spec.ty {
            Some(FormatType::Pointer) => write_pointer(f, &spec, text.as_ptr() as usize, kind),
            Some(FormatType::Quoted | FormatType::Debug) => {
                check_non_arithmetic(f, &spec)?;
                write_text(f, &spec, text, Some('"'))
            }
            _ => {
                check_non_arithmetic(f, &spec)?;
                write_text(f, &spec, text, None)
            }
        },
        Arg::Custom(value) => value.format(f),
    }
}

/// `+`, `-`, space, `#`, `0` and `=` only make sense for numbers.
fn check_non_arithmetic(f: &Formatter<'_>, spec: &FieldSpec) -> Result<()> {
    let flag = if let Some(sign) = spec.sign.flag() {
        sign
    } else if spec.alternate {
        '#'
    } else if spec.zero {
        '0'
    } else if spec.align == Align::Numeric {
        '='
    } else {
        return Ok(());
    };
    Err(f.error(ArgumentError::RequiresArithmetic { flag }))
}

fn check_char_specs(f: &Formatter<'_>, spec: &FieldSpec, kind: ArgKind) -> Result<()> {
    if spec.precision.is_some() {
        return Err(f.error(ArgumentError::PrecisionNotAllowed { kind }));
    }
    if spec.sign != Sign::None || spec.alternate || spec.align == Align::Numeric {
        return Err(f.error(ArgumentError::InvalidCharSpecs));
    }
    Ok(())
}

fn sign_char(negative: bool, sign: Sign) -> Option<char> {
    if negative {
        Some('-')
    } else {
        sign.flag().filter(|&c| c != '-')
    }
}

fn write_integer(
    f: &mut Formatter<'_>,
    spec: &FieldSpec,
    negative: bool,
    magnitude: u64,
    kind: ArgKind,
) -> Result<()> {
    let ty = spec.ty.unwrap_or(FormatType::Decimal);
    if ty == FormatType::Char {
        check_char_specs(f, spec, kind)?;
        let value = if negative {
            -i128::from(magnitude)
        } else {
            i128::from(magnitude)
        };
        let c = u32::try_from(value)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| f.error(ArgumentError::InvalidCodePoint(value)))?;
        let mut encoded = [0u8; 4];
        return write_text(f, spec, c.encode_utf8(&mut encoded), None);
    }
    if spec.precision.is_some() {
        return Err(f.error(ArgumentError::PrecisionNotAllowed { kind }));
    }
    if kind != ArgKind::Signed {
        if let Some(flag) = spec.sign.flag() {
            return Err(f.error(ArgumentError::RequiresSigned { flag }));
        }
    }

    let (base, upper, prefix) = match ty {
        FormatType::Binary => (Base::BINARY, false, "0b"),
        FormatType::BinaryUpper => (Base::BINARY, true, "0B"),
        FormatType::Octal => (Base::OCTAL, false, "0"),
        FormatType::Hex => (Base::HEX, false, "0x"),
        FormatType::HexUpper => (Base::HEX, true, "0X"),
        _ => (Base::DECIMAL, false, ""),
    };
    let prefix = if spec.alternate && !(base == Base::OCTAL && magnitude == 0) {
        prefix
    } else {
        ""
    };
    let mut buf = [0u8; MAX_INT_DIGITS];
    let digits = format_unsigned(magnitude, base, upper, &mut buf);
    pad_number(
        f,
        spec,
        sign_char(negative, spec.sign),
        prefix,
        &[Piece::Bytes(digits)],
    )
}

fn write_pointer(f: &mut Formatter<'_>, spec: &FieldSpec, address: usize, kind: ArgKind) -> Result<()> {
    check_non_arithmetic(f, spec)?;
    if spec.precision.is_some() {
        return Err(f.error(ArgumentError::PrecisionNotAllowed { kind }));
    }
    let mut buf = [0u8; MAX_INT_DIGITS];
    let digits = format_unsigned(address as u64, Base::HEX, false, &mut buf);
    pad_number(f, spec, None, "0x", &[Piece::Bytes(digits)])
}

fn write_code_point(f: &mut Formatter<'_>, spec: &FieldSpec, c: char) -> Result<()> {
    if spec.ty == Some(FormatType::Char) {
        check_char_specs(f, spec, ArgKind::CodePoint)?;
    } else {
        check_non_arithmetic(f, spec)?;
        if spec.precision.is_some() {
            return Err(f.error(ArgumentError::PrecisionNotAllowed {
                kind: ArgKind::CodePoint,
            }));
        }
    }
    let mut encoded = [0u8; 4];
    let text = c.encode_utf8(&mut encoded);
    let quote = (spec.ty == Some(FormatType::Debug)).then_some('\'');
    write_text(f, spec, text, quote)
}

/// Numbers: sign and prefix, then the body. Numeric alignment puts the
/// padding between the two; default alignment is right.
fn pad_number(
    f: &mut Formatter<'_>,
    spec: &FieldSpec,
    sign: Option<char>,
    prefix: &str,
    body: &[Piece<'_>],
) -> Result<()> {
    let columns =
        usize::from(sign.is_some()) + prefix.len() + body.iter().map(Piece::len).sum::<usize>();
    let padding = spec.width.saturating_sub(columns);
    let out = f.out();

    let (before, inside, after) = if spec.align == Align::Numeric {
        (0, padding, 0)
    } else {
        let (before, after) = split_padding(spec.align, Align::Right, padding);
        (before, 0, after)
    };
    out.write_repeated(spec.fill, before)?;
    if let Some(sign) = sign {
        out.write_char(sign)?;
    }
    out.write_str(prefix)?;
    out.write_repeated(spec.fill, inside)?;
    for piece in body {
        piece.write(out)?;
    }
    out.write_repeated(spec.fill, after)?;
    Ok(())
}

fn split_padding(align: Align, default: Align, padding: usize) -> (usize, usize) {
    let align = if align == Align::None { default } else { align };
    match align {
        Align::Left => (0, padding),
        Align::Center => (padding / 2, padding - padding / 2),
        Align::Right | Align::Numeric | Align::None => (padding, 0),
    }
}

/// Byte offset of the code point at position `n`, or the length of `text`.
fn byte_offset(text: &str, n: usize) -> usize {
    text.char_indices().nth(n).map_or(text.len(), |(i, _)| i)
}

/// Cuts `text` to `precision` code points. From 4 columns on, the cut ends
/// in `...`; below that the text is cut plainly.
fn cut_to_precision(text: &str, precision: Option<usize>) -> (&str, bool) {
    match precision {
        Some(p) if text.chars().count() > p => {
            if p >= 4 {
                (&text[..byte_offset(text, p - 3)], true)
            } else {
                (&text[..byte_offset(text, p)], false)
            }
        }
        _ => (text, false),
    }
}

fn escape_into(escaped: &mut String, text: &str, quote: char) {
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            '\0' => escaped.push_str("\\0"),
            c if c == quote => {
                escaped.push('\\');
                escaped.push(c);
            }
            c if c.is_control() => {
                escaped.push_str("\\u{");
                let mut buf = [0u8; MAX_INT_DIGITS];
                let digits = format_unsigned(u64::from(u32::from(c)), Base::HEX, false, &mut buf);
                escaped.extend(digits.iter().map(|&d| char::from(d)));
                escaped.push('}');
            }
            c => escaped.push(c),
        }
    }
}

/// Text: cut to the precision, optionally quoted and escaped, then padded to
/// the width (left by default) or, with `Options::truncate`, cut to it.
pub(crate) fn write_text(
    f: &mut Formatter<'_>,
    spec: &FieldSpec,
    text: &str,
    quote: Option<char>,
) -> Result<()> {
    let (shown, ellipsis) = cut_to_precision(text, spec.precision);
    let body: Cow<'_, str> = match quote {
        None if !ellipsis => Cow::Borrowed(shown),
        None => {
            let mut body = String::from(shown);
            body.push_str("...");
            Cow::Owned(body)
        }
        Some(quote) => {
            let mut body = String::new();
            body.push(quote);
            escape_into(&mut body, shown, quote);
            if ellipsis {
                body.push_str("...");
            }
            body.push(quote);
            Cow::Owned(body)
        }
    };

    let columns = body.chars().count();
    let truncate = f.options().truncate && spec.width > 0 && columns > spec.width;
    let out = f.out();
    if truncate {
        write_truncated(out, &body, columns, spec.width, spec.align == Align::Right)?;
        return Ok(());
    }
    let (before, after) = split_padding(spec.align, Align::Left, spec.width.saturating_sub(columns));
    out.write_repeated(spec.fill, before)?;
    out.write_str(&body)?;
    out.write_repeated(spec.fill, after)?;
    Ok(())
}

/// Fits `text` into `limit` columns: 1 or 2 columns show only dots, from 3
/// on the kept part is marked with `...` on the cut side.
fn write_truncated(
    out: &mut dyn Output,
    text: &str,
    columns: usize,
    limit: usize,
    keep_end: bool,
) -> core::result::Result<(), ChunkBufError> {
    if limit < 3 {
        return out.write_repeated('.', limit);
    }
    let keep = limit - 3;
    if keep_end {
        out.write_str("...")?;
        out.write_str(&text[byte_offset(text, columns - keep)..])
    } else {
        out.write_str(&text[..byte_offset(text, keep)])?;
        out.write_str("...")
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum FloatMode {
    General,
    Exp,
    Fixed,
}

fn write_float<F: Float>(f: &mut Formatter<'_>, spec: &FieldSpec, value: F) -> Result<()> {
    let ty = spec.ty.filter(|&ty| ty != FormatType::Debug);
    let upper = matches!(
        ty,
        Some(FormatType::ExpUpper | FormatType::FixedUpper | FormatType::GeneralUpper)
    );
    let percent = ty == Some(FormatType::Percent);
    let mode = match ty {
        Some(FormatType::Exp | FormatType::ExpUpper) => FloatMode::Exp,
        Some(FormatType::Fixed | FormatType::FixedUpper | FormatType::Percent) => FloatMode::Fixed,
        _ => FloatMode::General,
    };
    if let Some(precision) = spec.precision {
        if precision > MAX_FLOAT_PRECISION {
            return Err(f.error(ArgumentError::FloatPrecisionTooLarge {
                precision,
                max: MAX_FLOAT_PRECISION,
            }));
        }
    }

    let sign = sign_char(value.sign_negative(), spec.sign);
    let suffix: &[u8] = if percent { b"%" } else { b"" };
    let nan = value.is_nan_value();
    let mut magnitude = value.abs_value();
    if percent {
        magnitude = magnitude.percent();
    }

    // A type without precision means 6 digits; no type means shortest.
    let precision = match (ty, spec.precision) {
        (Some(_), None) => Some(6),
        (_, precision) => precision,
    };
    let mut show_point = spec.alternate;
    let digits = match mode {
        FloatMode::Exp => {
            let p = precision.unwrap_or(6);
            show_point |= p != 0;
            float::fixed(magnitude, FixedMode::Significant(p + 1))
        }
        FloatMode::Fixed => {
            let p = precision.unwrap_or(6);
            show_point |= p != 0;
            float::fixed(magnitude, FixedMode::Decimals(p))
        }
        FloatMode::General => match precision {
            Some(p) => float::fixed(magnitude, FixedMode::Significant(p.max(1))).map(|mut d| {
                if !show_point {
                    d.trim_trailing_zeros();
                }
                d
            }),
            None => float::shortest(magnitude),
        },
    };

    let Some(digits) = digits else {
        let text: &[u8] = match (nan, upper) {
            (true, false) => b"nan",
            (true, true) => b"NAN",
            (false, false) => b"inf",
            (false, true) => b"INF",
        };
        let mut spec = *spec;
        if spec.zero {
            spec.fill = ' ';
            if spec.align == Align::Numeric {
                spec.align = Align::Right;
            }
        }
        return pad_number(f, &spec, sign, "", &[Piece::Bytes(text), Piece::Bytes(suffix)]);
    };

    let bytes = digits.as_bytes();
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    let len = bytes.len() as i32;
    let exponent = digits.exponent();
    // Decimal exponent of the first digit
    let output_exp = exponent + len - 1;

    let use_exp = match mode {
        FloatMode::Exp => true,
        FloatMode::Fixed => false,
        FloatMode::General => {
            #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
            let upper_limit = precision.map_or(16, |p| p.max(1) as i32);
            output_exp < -4 || output_exp >= upper_limit
        }
    };

    if use_exp {
        let significant = match mode {
            FloatMode::Exp => precision.unwrap_or(6) + 1,
            _ => precision.map_or(0, |p| p.max(1)),
        };
        let trailing = if show_point {
            significant.saturating_sub(bytes.len())
        } else {
            0
        };
        let point: &[u8] = if show_point || bytes.len() > 1 { b"." } else { b"" };
        let mut exp_buf = [0u8; 5];
        let exp_text = exponent_suffix(output_exp, upper, &mut exp_buf);
        return pad_number(
            f,
            spec,
            sign,
            "",
            &[
                Piece::Bytes(&bytes[..1]),
                Piece::Bytes(point),
                Piece::Bytes(&bytes[1..]),
                Piece::Zeros(trailing),
                Piece::Bytes(exp_text),
                Piece::Bytes(suffix),
            ],
        );
    }

    if exponent >= 0 {
        // The bare `{}` form keeps one zero after the point of an integral value.
        let show_point = show_point || (ty.is_none() && precision.is_none());
        let point: &[u8] = if show_point { b"." } else { b"" };
        let integer_digits = bytes.len() + exponent.unsigned_abs() as usize;
        let trailing = if show_point {
            match precision {
                Some(p) if mode == FloatMode::General => p.saturating_sub(integer_digits),
                None => 1,
                Some(_) => 0,
            }
        } else {
            0
        };
        return pad_number(
            f,
            spec,
            sign,
            "",
            &[
                Piece::Bytes(bytes),
                Piece::Zeros(exponent.unsigned_abs() as usize),
                Piece::Bytes(point),
                Piece::Zeros(trailing),
                Piece::Bytes(suffix),
            ],
        );
    }

    let fraction_digits = exponent.unsigned_abs() as usize;
    if fraction_digits < bytes.len() {
        let split = bytes.len() - fraction_digits;
        pad_number(
            f,
            spec,
            sign,
            "",
            &[
                Piece::Bytes(&bytes[..split]),
                Piece::Bytes(b"."),
                Piece::Bytes(&bytes[split..]),
                Piece::Bytes(suffix),
            ],
        )
    } else {
        pad_number(
            f,
            spec,
            sign,
            "",
            &[
                Piece::Bytes(b"0."),
                Piece::Zeros(fraction_digits - bytes.len()),
                Piece::Bytes(bytes),
                Piece::Bytes(suffix),
            ],
        )
    }
}

/// `e+05`, `E-123`: sign always, at least two digits.
fn exponent_suffix(exponent: i32, upper: bool, buf: &mut [u8; 5]) -> &[u8] {
    buf[0] = if upper { b'E' } else { b'e' };
    buf[1] = if exponent < 0 { b'-' } else { b'+' };
    let mut digits = [0u8; MAX_INT_DIGITS];
    let written = format_unsigned(u64::from(exponent.unsigned_abs()), Base::DECIMAL, false, &mut digits);
    let len = written.len().max(2);
    buf[2..2 + len].fill(b'0');
    buf[2 + len - written.len()..2 + len].copy_from_slice(written);
    &buf[..2 + len]
}
