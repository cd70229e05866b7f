use alloc::vec::Vec;

use crate::arg::{Args, Binder};
use crate::error::{ArgumentError, Error, Result, SyntaxError};
use crate::formatter::Formatter;
use crate::options::Options;
use crate::output::Output;
use crate::palette::{name_to_color, Color, TerminalColor};
use crate::render;
use crate::spec::{Align, ArgRef, Count, FieldSpec, FormatType, Sign, Spec};
use crate::style::{self, ColorKind, Emphasis, Style};

/// A parsed format string, borrowing from it.
///
/// Parsing finds every syntax error before anything is rendered; the same
/// directive can then be rendered any number of times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive<'a> {
    segments: Vec<Segment<'a>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Copied verbatim; `{{` and `}}` are already collapsed
    Literal(&'a str),
    Field(Field<'a>),
    /// `{!...}`
    Style(Style),
}

/// A replacement field `{arg:spec}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field<'a> {
    pub arg: ArgRef<'a>,
    pub spec: Spec<'a>,
    /// Byte offset of the opening brace
    pub index: usize,
}

/// Parses `fmt` into a directive.
///
/// # Errors
///
/// `ErrorType::Syntax` with the byte offset of the offending construct.
pub fn parse(fmt: &str) -> Result<Directive<'_>> {
    let bytes = fmt.as_bytes();
    let mut segments = Vec::new();
    let mut literal_start = 0;
    let mut pos = 0;

    while pos < bytes.len() {
        match bytes[pos] {
            b'{' if bytes.get(pos + 1) == Some(&b'{') => {
                segments.push(Segment::Literal(&fmt[literal_start..=pos]));
                pos += 2;
                literal_start = pos;
            }
            b'}' if bytes.get(pos + 1) == Some(&b'}') => {
                segments.push(Segment::Literal(&fmt[literal_start..=pos]));
                pos += 2;
                literal_start = pos;
            }
            b'}' => return Err(Error::syntax(SyntaxError::UnmatchedBrace, pos)),
            b'{' => {
                if literal_start < pos {
                    segments.push(Segment::Literal(&fmt[literal_start..pos]));
                }
                let mut cursor = Cursor { fmt, pos: pos + 1 };
                let segment = if cursor.eat('!') {
                    let style = parse_style(&mut cursor)?;
                    if !cursor.eat('}') {
                        return Err(cursor.syntax(SyntaxError::UnterminatedStyle));
                    }
                    Segment::Style(style)
                } else {
                    Segment::Field(parse_field(&mut cursor, pos)?)
                };
                segments.push(segment);
                pos = cursor.pos;
                literal_start = pos;
            }
            _ => pos += 1,
        }
    }
    if literal_start < bytes.len() {
        segments.push(Segment::Literal(&fmt[literal_start..]));
    }

    log::trace!("parsed {} segments", segments.len());
    Ok(Directive { segments })
}

impl<'a> Directive<'a> {
    #[must_use]
    pub fn segments(&self) -> &[Segment<'a>] {
        &self.segments
    }

    /// Renders the directive against `args`.
    ///
    /// Implicit references take the arguments in order; explicit ones do not
    /// move that cursor.
    ///
    /// # Errors
    ///
    /// The first argument error, or out of memory. Bytes written before the
    /// failure stay in `out`.
    pub fn render(&self, out: &mut dyn Output, args: &Args<'_>, options: &Options) -> Result<()> {
        let mut binder = Binder::bind(args);
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.write_str(text)?,
                Segment::Style(style) => {
                    if !options.disable_ansi {
                        style::encode(style, out)?;
                    }
                }
                Segment::Field(field) => field.render(out, &mut binder, options)?,
            }
        }
        Ok(())
    }
}

impl Field<'_> {
    fn render(&self, out: &mut dyn Output, binder: &mut Binder<'_, '_>, options: &Options) -> Result<()> {
        let arg = binder.resolve(self.arg, self.index)?;
        let mut spec = self.spec;

        let width = match self.resolve_count(binder, spec.width, Count::WIDTH_ERRORS)? {
            None => 0,
            Some(width) if width >= 0 => width.unsigned_abs(),
            Some(width) if options.truncate => {
                if spec.align == Align::None {
                    spec.align = Align::Right;
                }
                width.unsigned_abs()
            }
            Some(_) => return Err(Error::argument(ArgumentError::NegativeWidth, self.index)),
        };
        let precision = match self.resolve_count(binder, spec.precision, Count::PRECISION_ERRORS)? {
            None => None,
            Some(precision) if precision >= 0 => Some(precision.unsigned_abs()),
            Some(_) => {
                return Err(Error::argument(
                    ArgumentError::NegativePrecision,
                    self.index,
                ))
            }
        };

        #[allow(clippy::cast_possible_truncation)]
        let field_spec = FieldSpec::new(&spec, width as usize, precision.map(|p| p as usize));
        let mut formatter = Formatter::new(out, field_spec, options, self.index);
        render::render_arg(&mut formatter, arg)
    }

    fn resolve_count(
        &self,
        binder: &mut Binder<'_, '_>,
        count: Option<Count<'_>>,
        errors: [ArgumentError; 2],
    ) -> Result<Option<i64>> {
        let [not_integer, too_large] = errors;
        match count {
            None => Ok(None),
            Some(Count::Literal(value)) => Ok(Some(i64::from(value))),
            Some(Count::Arg(reference)) => {
                let value = binder
                    .resolve(reference, self.index)?
                    .as_integer()
                    .ok_or_else(|| Error::argument(not_integer, self.index))?;
                if value.unsigned_abs() > u128::from(i32::MAX.unsigned_abs()) {
                    return Err(Error::argument(too_large, self.index));
                }
                #[allow(clippy::cast_possible_truncation)]
                Ok(Some(value as i64))
            }
        }
    }
}

impl Count<'_> {
    const WIDTH_ERRORS: [ArgumentError; 2] =
        [ArgumentError::WidthNotInteger, ArgumentError::WidthTooLarge];
    const PRECISION_ERRORS: [ArgumentError; 2] = [
        ArgumentError::PrecisionNotInteger,
        ArgumentError::PrecisionTooLarge,
    ];
}

struct Cursor<'a> {
    fmt: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn rest(&self) -> &'a str {
        &self.fmt[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        self.rest().chars().nth(1)
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn syntax(&self, kind: SyntaxError) -> Error {
        Error::syntax(kind, self.pos)
    }

    /// Decimal digits; saturates at `u64::MAX`.
    fn integer(&mut self) -> Option<u64> {
        let digits = self.rest().bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            return None;
        }
        let value = self.rest().as_bytes()[..digits]
            .iter()
            .fold(0u64, |acc, &d| {
                acc.saturating_mul(10).saturating_add(u64::from(d - b'0'))
            });
        self.pos += digits;
        Some(value)
    }

    fn take_while(&mut self, accept: impl Fn(u8) -> bool) -> &'a str {
        let len = self.rest().bytes().take_while(|&b| accept(b)).count();
        let taken = &self.rest()[..len];
        self.pos += len;
        taken
    }
}

fn parse_field<'a>(cursor: &mut Cursor<'a>, index: usize) -> Result<Field<'a>> {
    let arg = parse_arg_ref(cursor)?;
    let spec = if cursor.eat(':') {
        parse_spec(cursor)?
    } else {
        Spec::default()
    };
    if !cursor.eat('}') {
        return Err(cursor.syntax(SyntaxError::UnterminatedField));
    }
    Ok(Field { arg, spec, index })
}

fn parse_arg_ref<'a>(cursor: &mut Cursor<'a>) -> Result<ArgRef<'a>> {
    match cursor.peek() {
        Some(c) if c.is_ascii_digit() => {
            let start = cursor.pos;
            let index = cursor.integer().unwrap_or_default();
            if index > u64::from(i32::MAX.unsigned_abs()) {
                return Err(Error::syntax(SyntaxError::IndexTooLarge, start));
            }
            #[allow(clippy::cast_possible_truncation)]
            Ok(ArgRef::Index(index as usize))
        }
        Some(c) if c.is_ascii_alphabetic() || c == '_' => Ok(ArgRef::Name(
            cursor.take_while(|b| b.is_ascii_alphanumeric() || b == b'_'),
        )),
        _ => Ok(ArgRef::Implicit),
    }
}

fn align_of(c: char) -> Option<Align> {
    match c {
        '<' => Some(Align::Left),
        '>' => Some(Align::Right),
        '^' => Some(Align::Center),
        '=' => Some(Align::Numeric),
        _ => None,
    }
}

/// `[[fill]align][sign][#][0][width][.precision][type]`
fn parse_spec<'a>(cursor: &mut Cursor<'a>) -> Result<Spec<'a>> {
    let mut spec = Spec::default();

    match (cursor.peek(), cursor.peek_second().and_then(align_of)) {
        (Some('{'), Some(_)) => return Err(cursor.syntax(SyntaxError::InvalidFill('{'))),
        (Some(fill), Some(align)) if fill != '}' => {
            spec.fill = fill;
            spec.align = align;
            cursor.bump();
            cursor.bump();
        }
        (Some(c), _) => {
            if let Some(align) = align_of(c) {
                spec.align = align;
                cursor.bump();
            }
        }
        (None, _) => {}
    }

    spec.sign = match cursor.peek() {
        Some('+') => Sign::Plus,
        Some('-') => Sign::Minus,
        Some(' ') => Sign::Space,
        _ => Sign::None,
    };
    if spec.sign != Sign::None {
        cursor.bump();
    }
    spec.alternate = cursor.eat('#');
    spec.zero = cursor.eat('0');

    spec.width = parse_count(cursor, SyntaxError::WidthTooLarge)?;
    if cursor.eat('.') {
        spec.precision = parse_count(cursor, SyntaxError::PrecisionTooLarge)?;
        if spec.precision.is_none() {
            return Err(cursor.syntax(SyntaxError::MissingPrecision));
        }
    }

    match cursor.peek() {
        None | Some('}') => {}
        Some(c) => {
            spec.ty = Some(FormatType::from_char(c).ok_or_else(|| cursor.syntax(SyntaxError::UnknownType(c)))?);
            cursor.bump();
        }
    }
    Ok(spec)
}

/// A literal count, or a nested `{arg-ref}`.
fn parse_count<'a>(cursor: &mut Cursor<'a>, too_large: SyntaxError) -> Result<Option<Count<'a>>> {
    let start = cursor.pos;
    if let Some(value) = cursor.integer() {
        return match u32::try_from(value) {
            Ok(value) if value <= i32::MAX.unsigned_abs() => Ok(Some(Count::Literal(value))),
            _ => Err(Error::syntax(too_large, start)),
        };
    }
    if cursor.eat('{') {
        let reference = parse_arg_ref(cursor)?;
        if !cursor.eat('}') {
            return Err(cursor.syntax(SyntaxError::UnterminatedField));
        }
        return Ok(Some(Count::Arg(reference)));
    }
    Ok(None)
}

/// Everything between `{!` and `}`.
fn parse_style(cursor: &mut Cursor<'_>) -> Result<Style> {
    let mut style = Style::default();
    match cursor.peek() {
        Some('}') => return Ok(style),
        Some(c) if c.is_ascii_alphabetic() => {
            let start = cursor.pos;
            let name = cursor.take_while(|b| b.is_ascii_alphabetic() || b == b'_');
            if !matches!(cursor.peek(), Some(';' | '}') | None) {
                return Err(cursor.syntax(SyntaxError::InvalidColorName));
            }
            let color = match name.strip_prefix('t') {
                Some(terminal) => TerminalColor::from_name(terminal).map(ColorKind::Terminal),
                None => name_to_color(name).map(ColorKind::Rgb),
            };
            match color {
                Some(color) => style.color = color,
                None => style.emphasis = parse_emphasis(name, start)?,
            }
        }
        Some(c) if c.is_ascii_digit() => {
            let r = parse_channel(cursor)?;
            expect_next_channel(cursor)?;
            let g = parse_channel(cursor)?;
            expect_next_channel(cursor)?;
            let b = parse_channel(cursor)?;
            if !matches!(cursor.peek(), Some(';' | '}')) {
                return Err(cursor.syntax(SyntaxError::UnterminatedStyle));
            }
            style.color = ColorKind::Rgb(Color::from_rgb(r, g, b));
        }
        Some('#') => {
            cursor.bump();
            let hex = cursor.rest().get(..6).filter(|hex| hex.bytes().all(|b| b.is_ascii_hexdigit()));
            let value = hex
                .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                .ok_or_else(|| cursor.syntax(SyntaxError::InvalidHexColor))?;
            cursor.pos += 6;
            style.color = ColorKind::Rgb(Color(value));
        }
        _ => return Err(cursor.syntax(SyntaxError::UnterminatedStyle)),
    }

    if cursor.eat(';') {
        if cursor.rest().starts_with("BG") {
            if style.color == ColorKind::None {
                return Err(cursor.syntax(SyntaxError::BackgroundWithoutColor));
            }
            cursor.pos += 2;
            style.background = true;
        } else {
            let start = cursor.pos;
            let letters = cursor.take_while(|b| b.is_ascii_alphabetic());
            style.emphasis |= parse_emphasis(letters, start)?;
        }
    }
    Ok(style)
}

fn parse_emphasis(letters: &str, start: usize) -> Result<Emphasis> {
    let mut emphasis = Emphasis::empty();
    for (offset, letter) in letters.char_indices() {
        emphasis |= Emphasis::from_letter(letter)
            .ok_or_else(|| Error::syntax(SyntaxError::InvalidEmphasis(letter), start + offset))?;
    }
    Ok(emphasis)
}

fn parse_channel(cursor: &mut Cursor<'_>) -> Result<u8> {
    let start = cursor.pos;
    let value = cursor
        .integer()
        .ok_or_else(|| cursor.syntax(SyntaxError::MissingChannel))?;
    u8::try_from(value).map_err(|_| Error::syntax(SyntaxError::InvalidChannel, start))
}

fn expect_next_channel(cursor: &mut Cursor<'_>) -> Result<()> {
    if cursor.peek() == Some(';') && cursor.peek_second().is_some_and(|c| c.is_ascii_digit()) {
        cursor.bump();
        Ok(())
    } else {
        Err(cursor.syntax(SyntaxError::MissingChannel))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field<'a>(directive: &Directive<'a>, n: usize) -> Field<'a> {
        let fields: Vec<Field<'_>> = directive
            .segments()
            .iter()
            .filter_map(|segment| match segment {
                Segment::Field(field) => Some(*field),
                _ => None,
            })
            .collect();
        fields[n]
    }

    #[test]
    fn test_literal_braces_collapse() {
        let directive = parse("a{{b}}c").unwrap();
        assert_eq!(
            directive.segments(),
            &[
                Segment::Literal("a{"),
                Segment::Literal("b}"),
                Segment::Literal("c"),
            ]
        );
    }

    #[test]
    fn test_full_spec_grammar() {
        let directive = parse("{0:*^+#012.3f}").unwrap();
        let spec = field(&directive, 0).spec;
        assert_eq!(spec.fill, '*');
        assert_eq!(spec.align, Align::Center);
        assert_eq!(spec.sign, Sign::Plus);
        assert!(spec.alternate);
        assert!(spec.zero);
        assert_eq!(spec.width, Some(Count::Literal(12)));
        assert_eq!(spec.precision, Some(Count::Literal(3)));
        assert_eq!(spec.ty, Some(FormatType::Fixed));
    }

    #[test]
    fn test_nested_counts_and_names() {
        let directive = parse("{value:{}.{prec}}").unwrap();
        let parsed = field(&directive, 0);
        assert_eq!(parsed.arg, ArgRef::Name("value"));
        assert_eq!(parsed.spec.width, Some(Count::Arg(ArgRef::Implicit)));
        assert_eq!(parsed.spec.precision, Some(Count::Arg(ArgRef::Name("prec"))));
    }

    #[test]
    fn test_multibyte_fill() {
        let directive = parse("{:Ф>4}").unwrap();
        assert_eq!(field(&directive, 0).spec.fill, 'Ф');
    }

    #[test]
    fn test_close_brace_is_not_a_fill() {
        let directive = parse("{:}=").unwrap();
        assert_eq!(directive.segments().len(), 2);
        assert_eq!(directive.segments()[1], Segment::Literal("="));
    }

    #[test]
    fn test_field_index_is_brace_offset() {
        let directive = parse("ab {} {1}").unwrap();
        assert_eq!(field(&directive, 0).index, 3);
        assert_eq!(field(&directive, 1).index, 6);
    }
}
