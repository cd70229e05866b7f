/// Per-call switches for `format_into_with` and `format_to_writer`
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Style fields `{!...}` produce no output
    pub disable_ansi: bool,
    /// Text wider than the field width is cut and ends in `...`.
    ///
    /// Also allows a negative dynamic width, which cuts from the front.
    pub truncate: bool,
}

impl Options {
    #[must_use]
    pub fn new() -> Self {
        Options::default()
    }
}
