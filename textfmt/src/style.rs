use core::ops::{BitOr, BitOrAssign};

use chunkbuf::ChunkBufError;

use crate::output::Output;
use crate::palette::{Color, TerminalColor};

/// Set of text emphases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Emphasis(u8);

impl Emphasis {
    pub const BOLD: Emphasis = Emphasis(1);
    pub const ITALIC: Emphasis = Emphasis(1 << 1);
    pub const UNDERLINE: Emphasis = Emphasis(1 << 2);
    pub const STRIKETHROUGH: Emphasis = Emphasis(1 << 3);

    // Emphasis bit and its SGR code, in output order.
    const CODES: [(Emphasis, u8); 4] = [
        (Emphasis::BOLD, 1),
        (Emphasis::ITALIC, 3),
        (Emphasis::UNDERLINE, 4),
        (Emphasis::STRIKETHROUGH, 9),
    ];

    #[must_use]
    pub const fn empty() -> Self {
        Emphasis(0)
    }

    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn contains(self, other: Emphasis) -> bool {
        self.0 & other.0 == other.0
    }

    /// `B`, `I`, `U` or `S`
    #[must_use]
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'B' => Some(Emphasis::BOLD),
            'I' => Some(Emphasis::ITALIC),
            'U' => Some(Emphasis::UNDERLINE),
            'S' => Some(Emphasis::STRIKETHROUGH),
            _ => None,
        }
    }
}

impl BitOr for Emphasis {
    type Output = Emphasis;

    fn bitor(self, rhs: Emphasis) -> Emphasis {
        Emphasis(self.0 | rhs.0)
    }
}

impl BitOrAssign for Emphasis {
    fn bitor_assign(&mut self, rhs: Emphasis) {
        self.0 |= rhs.0;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorKind {
    #[default]
    None,
    Rgb(Color),
    Terminal(TerminalColor),
}

/// A text style as written in a `{!...}` field.
///
/// No color and no emphasis is the reset style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub color: ColorKind,
    pub background: bool,
    pub emphasis: Emphasis,
}

impl Style {
    #[must_use]
    pub fn reset() -> Self {
        Style::default()
    }

    #[must_use]
    pub fn is_reset(&self) -> bool {
        self.color == ColorKind::None && self.emphasis.is_empty()
    }

    #[must_use]
    pub fn rgb(color: Color) -> Self {
        Style {
            color: ColorKind::Rgb(color),
            ..Style::default()
        }
    }

    #[must_use]
    pub fn terminal(color: TerminalColor) -> Self {
        Style {
            color: ColorKind::Terminal(color),
            ..Style::default()
        }
    }

    #[must_use]
    pub fn on_background(self) -> Self {
        Style {
            background: true,
            ..self
        }
    }
}

// "\x1b[48;2;RRR;GGG;BBBm" plus four emphasis codes.
const MAX_ANSI_LEN: usize = 19 + 4 * 4;

struct AnsiCode {
    bytes: [u8; MAX_ANSI_LEN],
    len: usize,
}

impl AnsiCode {
    fn new() -> Self {
        AnsiCode {
            bytes: [0; MAX_ANSI_LEN],
            len: 0,
        }
    }

    fn push(&mut self, bytes: &[u8]) {
        self.bytes[self.len..self.len + bytes.len()].copy_from_slice(bytes);
        self.len += bytes.len();
    }

    fn push_digit(&mut self, digit: u8) {
        self.push(&[b'0' + digit]);
    }

    fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

/// Writes the ANSI escape sequence selecting `style`.
///
/// RGB colors use the 24-bit SGR form with three-digit channels, terminal
/// colors the short indexed form. Every emphasis adds its own sequence after
/// the color. The reset style writes `ESC[0m`.
///
/// # Errors
///
/// Returns `ChunkBufError::OutOfMemory` if `out` cannot grow.
pub fn encode<O: Output + ?Sized>(style: &Style, out: &mut O) -> Result<(), ChunkBufError> {
    let mut code = AnsiCode::new();
    match style.color {
        ColorKind::Rgb(color) => {
            code.push(if style.background {
                b"\x1b[48;2;"
            } else {
                b"\x1b[38;2;"
            });
            for (i, channel) in color.channels().into_iter().enumerate() {
                code.push_digit(channel / 100);
                code.push_digit(channel / 10 % 10);
                code.push_digit(channel % 10);
                code.push(if i == 2 { b"m" } else { b";" });
            }
        }
        ColorKind::Terminal(color) => {
            let mut value = color.code() + if style.background { 10 } else { 0 };
            code.push(b"\x1b[");
            if value >= 100 {
                code.push(b"1");
                value %= 100;
            }
            code.push_digit(value / 10);
            code.push_digit(value % 10);
            code.push(b"m");
        }
        ColorKind::None if style.emphasis.is_empty() => code.push(b"\x1b[0m"),
        ColorKind::None => {}
    }
    for (emphasis, sgr) in Emphasis::CODES {
        if style.emphasis.contains(emphasis) {
            code.push(b"\x1b[");
            code.push_digit(sgr);
            code.push(b"m");
        }
    }
    out.write_bytes(code.as_bytes())
}
