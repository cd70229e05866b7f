use crate::arg::ArgKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    /// Right for numbers and pointers, left for text
    #[default]
    None,
    Left,
    Right,
    Center,
    /// Padding goes between the sign/prefix and the digits
    Numeric,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sign {
    #[default]
    None,
    Plus,
    Minus,
    Space,
}

impl Sign {
    pub(crate) fn flag(self) -> Option<char> {
        match self {
            Sign::None => None,
            Sign::Plus => Some('+'),
            Sign::Minus => Some('-'),
            Sign::Space => Some(' '),
        }
    }
}

/// Presentation type: the last character of a specifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatType {
    Decimal,
    Binary,
    BinaryUpper,
    Octal,
    Hex,
    HexUpper,
    Char,
    Exp,
    ExpUpper,
    Fixed,
    FixedUpper,
    General,
    GeneralUpper,
    Percent,
    Str,
    Quoted,
    Pointer,
    Debug,
}

impl FormatType {
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        Some(match c {
            'd' => FormatType::Decimal,
            'b' => FormatType::Binary,
            'B' => FormatType::BinaryUpper,
            'o' => FormatType::Octal,
            'x' => FormatType::Hex,
            'X' => FormatType::HexUpper,
            'c' => FormatType::Char,
            'e' => FormatType::Exp,
            'E' => FormatType::ExpUpper,
            'f' => FormatType::Fixed,
            'F' => FormatType::FixedUpper,
            'g' => FormatType::General,
            'G' => FormatType::GeneralUpper,
            '%' => FormatType::Percent,
            's' => FormatType::Str,
            'q' => FormatType::Quoted,
            'p' => FormatType::Pointer,
            '?' => FormatType::Debug,
            _ => return None,
        })
    }

    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            FormatType::Decimal => 'd',
            FormatType::Binary => 'b',
            FormatType::BinaryUpper => 'B',
            FormatType::Octal => 'o',
            FormatType::Hex => 'x',
            FormatType::HexUpper => 'X',
            FormatType::Char => 'c',
            FormatType::Exp => 'e',
            FormatType::ExpUpper => 'E',
            FormatType::Fixed => 'f',
            FormatType::FixedUpper => 'F',
            FormatType::General => 'g',
            FormatType::GeneralUpper => 'G',
            FormatType::Percent => '%',
            FormatType::Str => 's',
            FormatType::Quoted => 'q',
            FormatType::Pointer => 'p',
            FormatType::Debug => '?',
        }
    }

    /// Types that print a number in some base (everything but `c`)
    #[must_use]
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            FormatType::Decimal
                | FormatType::Binary
                | FormatType::BinaryUpper
                | FormatType::Octal
                | FormatType::Hex
                | FormatType::HexUpper
        )
    }

    #[must_use]
    pub fn is_float(self) -> bool {
        matches!(
            self,
            FormatType::Exp
                | FormatType::ExpUpper
                | FormatType::Fixed
                | FormatType::FixedUpper
                | FormatType::General
                | FormatType::GeneralUpper
                | FormatType::Percent
        )
    }

    /// Whether a field of this type can render an argument of `kind`.
    #[must_use]
    pub fn accepts(self, kind: ArgKind) -> bool {
        match kind {
            ArgKind::Custom => true,
            ArgKind::Signed | ArgKind::Unsigned => {
                self.is_integer() || matches!(self, FormatType::Char | FormatType::Debug)
            }
            ArgKind::Bool => {
                self.is_integer() || matches!(self, FormatType::Str | FormatType::Debug)
            }
            ArgKind::CodePoint => {
                self.is_integer()
                    || matches!(self, FormatType::Char | FormatType::Str | FormatType::Debug)
            }
            ArgKind::Float => self.is_float() || self == FormatType::Debug,
            ArgKind::Pointer => self == FormatType::Pointer,
            ArgKind::Str => matches!(
                self,
                FormatType::Str | FormatType::Quoted | FormatType::Debug | FormatType::Pointer
            ),
        }
    }
}

/// Which argument a field (or a nested width/precision) refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgRef<'a> {
    /// The next argument in order
    Implicit,
    Index(usize),
    Name(&'a str),
}

/// A width or precision: written in the format string or taken from an argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Count<'a> {
    Literal(u32),
    Arg(ArgRef<'a>),
}

/// A specifier as written in the format string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spec<'a> {
    pub fill: char,
    pub align: Align,
    pub sign: Sign,
    pub alternate: bool,
    pub zero: bool,
    pub width: Option<Count<'a>>,
    pub precision: Option<Count<'a>>,
    pub ty: Option<FormatType>,
}

impl Default for Spec<'_> {
    fn default() -> Self {
        Spec {
            fill: ' ',
            align: Align::None,
            sign: Sign::None,
            alternate: false,
            zero: false,
            width: None,
            precision: None,
            ty: None,
        }
    }
}

/// A specifier with width and precision resolved to numbers.
///
/// This is what renderers and `Format` implementations see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub fill: char,
    pub align: Align,
    pub sign: Sign,
    pub alternate: bool,
    pub zero: bool,
    pub width: usize,
    pub precision: Option<usize>,
    pub ty: Option<FormatType>,
}

impl Default for FieldSpec {
    fn default() -> Self {
        FieldSpec {
            fill: ' ',
            align: Align::None,
            sign: Sign::None,
            alternate: false,
            zero: false,
            width: 0,
            precision: None,
            ty: None,
        }
    }
}

impl FieldSpec {
    pub(crate) fn new(spec: &Spec<'_>, width: usize, precision: Option<usize>) -> Self {
        let mut field = FieldSpec {
            fill: spec.fill,
            align: spec.align,
            sign: spec.sign,
            alternate: spec.alternate,
            zero: spec.zero,
            width,
            precision,
            ty: spec.ty,
        };
        if field.zero {
            field.align = Align::Numeric;
            field.fill = '0';
        }
        field
    }

    /// The specifier handed to a value nested inside a composite.
    ///
    /// Padding is dropped; a type or precision the nested kind cannot render is
    /// cleared, and so are flags that only apply to numbers.
    #[must_use]
    pub fn forwarded_to(&self, kind: ArgKind) -> FieldSpec {
        let mut nested = FieldSpec {
            fill: ' ',
            align: Align::None,
            zero: false,
            width: 0,
            ..*self
        };
        if let Some(ty) = nested.ty {
            if !ty.accepts(kind) {
                nested.ty = None;
                nested.precision = None;
            }
        }
        let numeric_type = nested.ty.is_some_and(FormatType::is_integer);
        match kind {
            ArgKind::Signed | ArgKind::Float | ArgKind::Custom => {}
            ArgKind::Unsigned => nested.sign = Sign::None,
            ArgKind::Bool | ArgKind::CodePoint if numeric_type => nested.sign = Sign::None,
            ArgKind::Bool | ArgKind::CodePoint | ArgKind::Pointer | ArgKind::Str => {
                nested.sign = Sign::None;
                nested.alternate = false;
            }
        }
        if matches!(
            kind,
            ArgKind::Signed | ArgKind::Unsigned | ArgKind::Bool | ArgKind::CodePoint | ArgKind::Pointer
        ) {
            nested.precision = None;
        }
        nested
    }
}
