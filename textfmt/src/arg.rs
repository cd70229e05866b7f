use core::fmt;

use crate::error::{ArgumentError, Error, Result};
use crate::formatter::Format;
use crate::spec::ArgRef;

/// Storage width of an integer argument before it was widened to 64 bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntWidth {
    W8,
    W16,
    W32,
    W64,
    Size,
}

/// One formatting argument: a kind tag plus a borrowed or copied value.
#[derive(Clone, Copy)]
pub enum Arg<'a> {
    Signed(i64, IntWidth),
    Unsigned(u64, IntWidth),
    Bool(bool),
    CodePoint(char),
    F32(f32),
    F64(f64),
    Pointer(usize),
    Str(&'a str),
    Custom(&'a dyn Format),
}

/// The closed set of argument kinds, without values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    Signed,
    Unsigned,
    Bool,
    CodePoint,
    Float,
    Pointer,
    Str,
    Custom,
}

impl fmt::Display for ArgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArgKind::Signed => "signed integer",
            ArgKind::Unsigned => "unsigned integer",
            ArgKind::Bool => "bool",
            ArgKind::CodePoint => "code point",
            ArgKind::Float => "float",
            ArgKind::Pointer => "pointer",
            ArgKind::Str => "string",
            ArgKind::Custom => "custom",
        };
        f.write_str(name)
    }
}

impl Arg<'_> {
    #[must_use]
    pub fn kind(&self) -> ArgKind {
        match self {
            Arg::Signed(..) => ArgKind::Signed,
            Arg::Unsigned(..) => ArgKind::Unsigned,
            Arg::Bool(_) => ArgKind::Bool,
            Arg::CodePoint(_) => ArgKind::CodePoint,
            Arg::F32(_) | Arg::F64(_) => ArgKind::Float,
            Arg::Pointer(_) => ArgKind::Pointer,
            Arg::Str(_) => ArgKind::Str,
            Arg::Custom(_) => ArgKind::Custom,
        }
    }

    /// Rust name of the value's original type, `"custom"` for `Format` values.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Arg::Signed(_, IntWidth::W8) => "i8",
            Arg::Signed(_, IntWidth::W16) => "i16",
            Arg::Signed(_, IntWidth::W32) => "i32",
            Arg::Signed(_, IntWidth::W64) => "i64",
            Arg::Signed(_, IntWidth::Size) => "isize",
            Arg::Unsigned(_, IntWidth::W8) => "u8",
            Arg::Unsigned(_, IntWidth::W16) => "u16",
            Arg::Unsigned(_, IntWidth::W32) => "u32",
            Arg::Unsigned(_, IntWidth::W64) => "u64",
            Arg::Unsigned(_, IntWidth::Size) => "usize",
            Arg::Bool(_) => "bool",
            Arg::CodePoint(_) => "char",
            Arg::F32(_) => "f32",
            Arg::F64(_) => "f64",
            Arg::Pointer(_) => "pointer",
            Arg::Str(_) => "&str",
            Arg::Custom(_) => "custom",
        }
    }

    /// Integer value, as used for dynamic width and precision.
    #[must_use]
    pub fn as_integer(&self) -> Option<i128> {
        match *self {
            Arg::Signed(v, _) => Some(i128::from(v)),
            Arg::Unsigned(v, _) => Some(i128::from(v)),
            _ => None,
        }
    }
}

impl fmt::Debug for Arg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Signed(v, _) => write!(f, "{}({v})", self.type_name()),
            Arg::Unsigned(v, _) => write!(f, "{}({v})", self.type_name()),
            Arg::Bool(v) => write!(f, "bool({v})"),
            Arg::CodePoint(v) => write!(f, "char({v:?})"),
            Arg::F32(v) => write!(f, "f32({v})"),
            Arg::F64(v) => write!(f, "f64({v})"),
            Arg::Pointer(v) => write!(f, "pointer({v:#x})"),
            Arg::Str(v) => write!(f, "str({v:?})"),
            Arg::Custom(_) => f.write_str("custom"),
        }
    }
}

macro_rules! impl_from_int {
    ($variant:ident, $wide:ty, $($ty:ty => $width:ident),+) => {
        $(
            impl From<$ty> for Arg<'_> {
                fn from(value: $ty) -> Self {
                    #[allow(clippy::cast_possible_wrap, clippy::cast_lossless)]
                    Arg::$variant(value as $wide, IntWidth::$width)
                }
            }
        )+
    };
}

impl_from_int!(Signed, i64, i8 => W8, i16 => W16, i32 => W32, i64 => W64, isize => Size);
impl_from_int!(Unsigned, u64, u8 => W8, u16 => W16, u32 => W32, u64 => W64, usize => Size);

impl From<bool> for Arg<'_> {
    fn from(value: bool) -> Self {
        Arg::Bool(value)
    }
}

impl From<char> for Arg<'_> {
    fn from(value: char) -> Self {
        Arg::CodePoint(value)
    }
}

impl From<f32> for Arg<'_> {
    fn from(value: f32) -> Self {
        Arg::F32(value)
    }
}

impl From<f64> for Arg<'_> {
    fn from(value: f64) -> Self {
        Arg::F64(value)
    }
}

impl<'a> From<&'a str> for Arg<'a> {
    fn from(value: &'a str) -> Self {
        Arg::Str(value)
    }
}

impl<T: ?Sized> From<*const T> for Arg<'_> {
    fn from(value: *const T) -> Self {
        Arg::Pointer(value.cast::<()>() as usize)
    }
}

impl<T: ?Sized> From<*mut T> for Arg<'_> {
    fn from(value: *mut T) -> Self {
        Arg::Pointer(value.cast::<()>() as usize)
    }
}

impl<'a, T: Format> From<&'a T> for Arg<'a> {
    fn from(value: &'a T) -> Self {
        Arg::Custom(value)
    }
}

/// Arguments of one formatting call, with an optional name table.
///
/// Nothing is copied: the values and names are borrowed for the duration of the call.
#[derive(Debug, Clone, Copy)]
pub struct Args<'a> {
    values: &'a [Arg<'a>],
    names: &'a [(&'a str, usize)],
}

impl<'a> Args<'a> {
    #[must_use]
    pub fn new(values: &'a [Arg<'a>]) -> Self {
        Args { values, names: &[] }
    }

    /// `names` maps each name to an index into `values`.
    #[must_use]
    pub fn with_names(values: &'a [Arg<'a>], names: &'a [(&'a str, usize)]) -> Self {
        Args { values, names }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<Arg<'a>> {
        self.values.get(index).copied()
    }

    /// Index of the argument registered under `name`
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|&(_, index)| index)
    }
}

impl Default for Args<'_> {
    fn default() -> Self {
        Args::new(&[])
    }
}

/// Resolves argument references during one render of a directive.
///
/// Keeps the implicit cursor: only implicit references advance it.
#[derive(Debug)]
pub struct Binder<'a, 'b> {
    args: &'b Args<'a>,
    next_implicit: usize,
}

impl<'a, 'b> Binder<'a, 'b> {
    #[must_use]
    pub fn bind(args: &'b Args<'a>) -> Self {
        Binder {
            args,
            next_implicit: 0,
        }
    }

    /// Looks up the argument `reference` points to.
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` for a position past the end, `UnknownName` for a
    /// name that is not registered or maps past the end. `at` is the
    /// position reported in the error.
    pub fn resolve(&mut self, reference: ArgRef<'_>, at: usize) -> Result<Arg<'a>> {
        let index = match reference {
            ArgRef::Implicit => {
                let index = self.next_implicit;
                self.next_implicit += 1;
                index
            }
            ArgRef::Index(index) => index,
            ArgRef::Name(name) => self.args.index_of(name).ok_or_else(|| {
                Error::argument(ArgumentError::UnknownName(name.into()), at)
            })?,
        };
        self.args.get(index).ok_or_else(|| {
            Error::argument(
                ArgumentError::IndexOutOfRange {
                    index,
                    count: self.args.len(),
                },
                at,
            )
        })
    }
}
