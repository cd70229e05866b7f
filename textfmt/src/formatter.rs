use crate::arg::{Arg, Args};
use crate::composite::{DebugList, DebugMap, DebugStruct, DebugTuple};
use crate::error::{ArgumentError, Error, Result};
use crate::options::Options;
use crate::output::Output;
use crate::parse::parse;
use crate::render;
use crate::spec::FieldSpec;

/// A value that knows how to render itself.
///
/// The formatter carries the field's specifier unchanged, so the
/// implementation decides what width, precision and the flags mean for it.
///
/// ```
/// use textfmt::{sprint, Args, Arg, Format, Formatter};
///
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// impl Format for Point {
///     fn format(&self, f: &mut Formatter<'_>) -> textfmt::Result<()> {
///         if f.spec().alternate {
///             f.debug_struct("Point").field("x", self.x).field("y", self.y).finish()
///         } else {
///             f.write_fmt("({}, {})", &Args::new(&[self.x.into(), self.y.into()]))
///         }
///     }
/// }
///
/// let p = Point { x: 10, y: 20 };
/// assert_eq!(sprint("{}", &Args::new(&[Arg::from(&p)])).unwrap(), "(10, 20)");
/// assert_eq!(
///     sprint("{:#}", &Args::new(&[Arg::from(&p)])).unwrap(),
///     "Point { x: 10, y: 20 }"
/// );
/// ```
pub trait Format {
    /// # Errors
    ///
    /// Whatever the nested writes report.
    fn format(&self, f: &mut Formatter<'_>) -> Result<()>;
}

/// Rendering context of one field
pub struct Formatter<'o> {
    out: &'o mut dyn Output,
    spec: FieldSpec,
    options: &'o Options,
    index: usize,
}

impl<'o> Formatter<'o> {
    pub(crate) fn new(
        out: &'o mut dyn Output,
        spec: FieldSpec,
        options: &'o Options,
        index: usize,
    ) -> Self {
        Formatter {
            out,
            spec,
            options,
            index,
        }
    }

    /// The field's specifier with width and precision resolved
    #[must_use]
    pub fn spec(&self) -> &FieldSpec {
        &self.spec
    }

    #[must_use]
    pub fn options(&self) -> &Options {
        self.options
    }

    /// Writes `text` as is, ignoring the specifier.
    ///
    /// # Errors
    ///
    /// Out of memory.
    pub fn write_str(&mut self, text: &str) -> Result<()> {
        Ok(self.out.write_str(text)?)
    }

    /// # Errors
    ///
    /// Out of memory.
    pub fn write_char(&mut self, c: char) -> Result<()> {
        Ok(self.out.write_char(c)?)
    }

    /// Writes `text` the way a string argument is written: cut to the
    /// precision, padded to the width.
    ///
    /// # Errors
    ///
    /// Out of memory.
    pub fn pad(&mut self, text: &str) -> Result<()> {
        let spec = self.spec;
        render::write_text(self, &spec, text, None)
    }

    /// Renders `value` under this field's own specifier, padding included.
    ///
    /// # Errors
    ///
    /// The specifier does not fit the value, or out of memory.
    pub fn write_value<'v, A: Into<Arg<'v>>>(&mut self, value: A) -> Result<()> {
        render::render_arg(self, value.into())
    }

    /// Renders a nested value, such as a struct field.
    ///
    /// The value gets `FieldSpec::forwarded_to` its kind: no padding, and no
    /// type, precision or flags it could not render.
    ///
    /// # Errors
    ///
    /// Out of memory, or whatever a nested `Format` reports.
    pub fn write_arg<'v, A: Into<Arg<'v>>>(&mut self, value: A) -> Result<()> {
        let arg = value.into();
        let nested = self.spec.forwarded_to(arg.kind());
        let outer = core::mem::replace(&mut self.spec, nested);
        let result = render::render_arg(self, arg);
        self.spec = outer;
        result
    }

    /// Formats `fmt` with `args` into the same output, with the same options.
    ///
    /// # Errors
    ///
    /// Syntax and argument errors of the nested format string; positions are
    /// relative to `fmt`.
    pub fn write_fmt(&mut self, fmt: &str, args: &Args<'_>) -> Result<()> {
        parse(fmt)?.render(&mut *self.out, args, self.options)
    }

    /// `name { a: 1, b: 2 }`
    pub fn debug_struct<'f>(&'f mut self, name: &str) -> DebugStruct<'f, 'o> {
        DebugStruct::new(self, name)
    }

    /// `name(1, 2)`
    pub fn debug_tuple<'f>(&'f mut self, name: &str) -> DebugTuple<'f, 'o> {
        DebugTuple::new(self, name)
    }

    /// `[1, 2, 3]`
    pub fn debug_list<'f>(&'f mut self) -> DebugList<'f, 'o> {
        DebugList::new(self)
    }

    /// `{ k: v, k2: v2 }`
    pub fn debug_map<'f>(&'f mut self) -> DebugMap<'f, 'o> {
        DebugMap::new(self)
    }

    pub(crate) fn out(&mut self) -> &mut dyn Output {
        &mut *self.out
    }

    pub(crate) fn error(&self, kind: ArgumentError) -> Error {
        Error::argument(kind, self.index)
    }
}
