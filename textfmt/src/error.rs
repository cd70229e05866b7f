use alloc::string::String;

use chunkbuf::ChunkBufError;
use thiserror::Error;

use crate::arg::ArgKind;

pub type Result<T> = core::result::Result<T, Error>;

/// A failed formatting call.
///
/// `index` is the byte offset in the format string of the construct that failed,
/// or 0 when the failure is not tied to a position (allocation, sink).
#[derive(Error, Debug, PartialEq, Eq, Clone)]
#[error("{error_type} at index {index}")]
pub struct Error {
    pub error_type: ErrorType,
    pub index: usize,
}

#[derive(Error, Debug, PartialEq, Eq, Clone)]
#[allow(clippy::module_name_repetitions)]
pub enum ErrorType {
    #[error("Syntax error: {0}")]
    Syntax(SyntaxError),
    #[error("Argument error: {0}")]
    Argument(ArgumentError),
    #[error("{0}")]
    OutOfMemory(ChunkBufError),
    #[error("Sink error: {0:?}")]
    Sink(embedded_io::ErrorKind),
}

/// Malformed format string
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum SyntaxError {
    #[error("unmatched \"}}\" in format string, use \"}}}}\" for a literal brace")]
    UnmatchedBrace,
    #[error("\"}}\" expected")]
    UnterminatedField,
    #[error("argument index is too big")]
    IndexTooLarge,
    #[error("invalid fill character \"{0}\"")]
    InvalidFill(char),
    #[error("missing precision specifier after \".\"")]
    MissingPrecision,
    #[error("width value is too big")]
    WidthTooLarge,
    #[error("precision value is too big")]
    PrecisionTooLarge,
    #[error("unknown format type \"{0}\"")]
    UnknownType(char),
    #[error("invalid emphasis character \"{0}\", valid ones are B (bold), I (italic), U (underline) and S (strikethrough)")]
    InvalidEmphasis(char),
    #[error("invalid color name, it must be an identifier without digits")]
    InvalidColorName,
    #[error("channel value must be an integer in the range [0-255]")]
    InvalidChannel,
    #[error("expected \";\" followed by the next channel value (3 channels required)")]
    MissingChannel,
    #[error("expected 6 hex digits after \"#\"")]
    InvalidHexColor,
    #[error("color specified as background but there was no color parsed")]
    BackgroundWithoutColor,
    #[error("\"}}\" expected after text style")]
    UnterminatedStyle,
}

/// Format string and arguments do not fit together
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum ArgumentError {
    #[error("argument index {index} out of range, {count} arguments given")]
    IndexOutOfRange {
        /// Index that was referenced
        index: usize,
        /// Number of arguments in the call
        count: usize,
    },
    #[error("no argument named \"{0}\"")]
    UnknownName(String),
    #[error("width was not an integer")]
    WidthNotInteger,
    #[error("negative width")]
    NegativeWidth,
    #[error("width value is too big")]
    WidthTooLarge,
    #[error("precision was not an integer")]
    PrecisionNotInteger,
    #[error("negative precision")]
    NegativePrecision,
    #[error("precision value is too big")]
    PrecisionTooLarge,
    #[error("float precision {precision} exceeds the maximum of {max}")]
    FloatPrecisionTooLarge {
        /// Precision that was requested
        precision: usize,
        /// Largest supported precision
        max: usize,
    },
    #[error("format type \"{ty}\" is not valid for a {kind} argument")]
    InvalidType {
        /// Type character of the field
        ty: char,
        /// Kind of the argument
        kind: ArgKind,
    },
    #[error("format specifier \"{flag}\" requires an arithmetic argument")]
    RequiresArithmetic {
        /// Offending flag character
        flag: char,
    },
    #[error("format specifier \"{flag}\" requires a signed integer argument")]
    RequiresSigned {
        /// Offending flag character
        flag: char,
    },
    #[error("precision is not allowed for a {kind} argument")]
    PrecisionNotAllowed {
        /// Kind of the argument
        kind: ArgKind,
    },
    #[error("sign, \"#\" and \"=\" are not allowed with the \"c\" type")]
    InvalidCharSpecs,
    #[error("{0} is not a valid code point")]
    InvalidCodePoint(i128),
}

impl Error {
    pub(crate) fn syntax(kind: SyntaxError, index: usize) -> Self {
        Error {
            error_type: ErrorType::Syntax(kind),
            index,
        }
    }

    pub(crate) fn argument(kind: ArgumentError, index: usize) -> Self {
        Error {
            error_type: ErrorType::Argument(kind),
            index,
        }
    }

    #[must_use]
    pub fn is_syntax(&self) -> bool {
        matches!(self.error_type, ErrorType::Syntax(_))
    }

    #[must_use]
    pub fn is_argument(&self) -> bool {
        matches!(self.error_type, ErrorType::Argument(_))
    }
}

impl From<ChunkBufError> for Error {
    fn from(err: ChunkBufError) -> Self {
        let error_type = match err {
            ChunkBufError::Sink { kind } => ErrorType::Sink(kind),
            other @ ChunkBufError::OutOfMemory { .. } => ErrorType::OutOfMemory(other),
        };
        Error {
            error_type,
            index: 0,
        }
    }
}
