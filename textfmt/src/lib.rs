#![no_std]

//! `textfmt`: a replacement-field text formatter writing into a `ChunkBuf`.
//!
//! A format string mixes literal text with fields `{arg:spec}` and inline
//! styles `{!...}`. It is parsed into a `Directive` first, so a malformed
//! string fails before any byte is written, and then rendered against a
//! borrowed argument list.
//!
//! ```
//! use textfmt::{args, sprint};
//!
//! let text = sprint("{0:>6.2f}|{1:<5}|{2:#x}", &args!(3.14159, "ab", 255)).unwrap();
//! assert_eq!(text, "  3.14|ab   |0xff");
//! ```
//!
//! # Specifier
//!
//! `[[fill]align][sign][#][0][width][.precision][type]`
//!
//! - align: `<` left, `>` right, `^` center, `=` padding after the sign
//! - sign: `+` always, `-` only negative (default), ` ` space for positive
//! - `#`: base prefix for integers, decimal point kept for floats
//! - `0`: zero padding after the sign, replacing any alignment and fill
//! - width, precision: a number or a nested `{arg-ref}`
//! - type: `d b B o x X c` integers, `e E f F g G %` floats, `s q ?` text, `p` pointer
//!
//! # Styles
//!
//! `{!RED}`, `{!tBRIGHT_CYAN;BG}`, `{!10;20;30;B}`, `{!#ff8000}`, `{!BU}` and
//! the reset `{!}` emit ANSI escape sequences, unless `Options::disable_ansi`
//! is set.
//!
//! # Custom values
//!
//! Implement `Format` and pass a reference; see the trait documentation.
//!
//! ## `no_std` Compatibility
//!
//! Only `core` and `alloc` are used. The `std` feature forwards to the
//! dependencies' `std` features.

extern crate alloc;

mod arg;
mod composite;
mod digits;
mod error;
mod float;
mod formatter;
mod options;
mod output;
mod palette;
mod parse;
mod render;
mod spec;
mod style;

use alloc::string::String;

use chunkbuf::ChunkBuf;

pub use arg::{Arg, ArgKind, Args, Binder, IntWidth};
pub use composite::{DebugList, DebugMap, DebugStruct, DebugTuple};
pub use digits::{count_digits, format_unsigned, Base, MAX_INT_DIGITS};
pub use error::{ArgumentError, Error, ErrorType, Result, SyntaxError};
pub use float::{fixed, shortest, Digits, FixedMode, Float, MAX_FLOAT_PRECISION};
pub use formatter::{Format, Formatter};
pub use options::Options;
pub use output::{LengthCounter, Output};
pub use palette::{color_to_name, name_to_color, terminal_color_name, Color, TerminalColor};
pub use parse::{parse, Directive, Field, Segment};
pub use spec::{Align, ArgRef, Count, FieldSpec, FormatType, Sign, Spec};
pub use style::{encode, ColorKind, Emphasis, Style};

/// Appends the formatted text to `buf` with default options.
///
/// # Errors
///
/// Syntax and argument errors, or out of memory. On error `buf` may hold a
/// partial rendering.
pub fn format_into<const N: usize>(buf: &mut ChunkBuf<N>, fmt: &str, args: &Args<'_>) -> Result<()> {
    render_to(buf, fmt, args, &Options::default())
}

/// Appends the formatted text to `buf`.
///
/// # Errors
///
/// See `format_into`.
pub fn format_into_with<const N: usize>(
    buf: &mut ChunkBuf<N>,
    fmt: &str,
    args: &Args<'_>,
    options: &Options,
) -> Result<()> {
    render_to(buf, fmt, args, options)
}

/// Formats into a new `String`.
///
/// # Errors
///
/// See `format_into`.
pub fn sprint(fmt: &str, args: &Args<'_>) -> Result<String> {
    let mut buf: ChunkBuf = ChunkBuf::new();
    render_to(&mut buf, fmt, args, &Options::default())?;
    let bytes = buf.combine()?;
    #[allow(clippy::expect_used)]
    let text = String::from_utf8(bytes).expect("rendering writes only whole UTF-8 sequences");
    Ok(text)
}

/// Formats into a buffer, then writes it to `writer`.
///
/// Nothing reaches `writer` when formatting fails.
///
/// # Errors
///
/// See `format_into`; a failing `writer` is `ErrorType::Sink`.
pub fn format_to_writer<W: embedded_io::Write>(
    writer: &mut W,
    fmt: &str,
    args: &Args<'_>,
    options: &Options,
) -> Result<()> {
    let mut buf: ChunkBuf = ChunkBuf::new();
    render_to(&mut buf, fmt, args, options)?;
    buf.drain_into(writer)?;
    Ok(())
}

/// Number of bytes `sprint` would produce, without storing them.
///
/// # Errors
///
/// Syntax and argument errors.
pub fn calculate_length(fmt: &str, args: &Args<'_>) -> Result<usize> {
    let mut counter = LengthCounter::new();
    render_to(&mut counter, fmt, args, &Options::default())?;
    Ok(counter.len())
}

fn render_to(out: &mut dyn Output, fmt: &str, args: &Args<'_>, options: &Options) -> Result<()> {
    let result = parse(fmt).and_then(|directive| directive.render(out, args, options));
    if let Err(err) = &result {
        log::debug!("formatting {fmt:?} failed: {err}");
    }
    result
}

/// Builds an `Args` from a list of expressions.
///
/// The result borrows temporaries, so use it inside the call expression:
/// `sprint("{}", &args!(1))`.
#[macro_export]
macro_rules! args {
    ($($value:expr),* $(,)?) => {
        $crate::Args::new(&[$($crate::Arg::from($value)),*])
    };
}

/// `sprint` with the arguments inline: `sprint!("{} {}", 1, "two")`.
#[macro_export]
macro_rules! sprint {
    ($fmt:expr $(, $value:expr)* $(,)?) => {
        $crate::sprint($fmt, &$crate::args!($($value),*))
    };
}
