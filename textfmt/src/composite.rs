//! Builders for struct, tuple, list and map renderings.
//!
//! Each builder writes its opening part on creation and remembers the first
//! error; later calls are skipped once one failed, and `finish` reports it.

use crate::arg::Arg;
use crate::error::Result;
use crate::formatter::Formatter;

pub struct DebugStruct<'f, 'o> {
    fmt: &'f mut Formatter<'o>,
    result: Result<()>,
    has_fields: bool,
}

impl<'f, 'o> DebugStruct<'f, 'o> {
    pub(crate) fn new(fmt: &'f mut Formatter<'o>, name: &str) -> Self {
        let result = fmt.write_str(name);
        DebugStruct {
            fmt,
            result,
            has_fields: false,
        }
    }

    pub fn field<'v, A: Into<Arg<'v>>>(&mut self, name: &str, value: A) -> &mut Self {
        if self.result.is_ok() {
            let prefix = if self.has_fields { ", " } else { " { " };
            self.result = write_entry(self.fmt, prefix, Some(name), value.into());
        }
        self.has_fields = true;
        self
    }

    /// # Errors
    ///
    /// The first error of this builder, or out of memory.
    pub fn finish(&mut self) -> Result<()> {
        self.result.clone()?;
        self.fmt
            .write_str(if self.has_fields { " }" } else { " {}" })
    }
}

pub struct DebugTuple<'f, 'o> {
    fmt: &'f mut Formatter<'o>,
    result: Result<()>,
    has_fields: bool,
}

impl<'f, 'o> DebugTuple<'f, 'o> {
    pub(crate) fn new(fmt: &'f mut Formatter<'o>, name: &str) -> Self {
        let result = fmt.write_str(name);
        DebugTuple {
            fmt,
            result,
            has_fields: false,
        }
    }

    pub fn field<'v, A: Into<Arg<'v>>>(&mut self, value: A) -> &mut Self {
        if self.result.is_ok() {
            let prefix = if self.has_fields { ", " } else { "(" };
            self.result = write_entry(self.fmt, prefix, None, value.into());
        }
        self.has_fields = true;
        self
    }

    /// A tuple without fields is written as its bare name.
    ///
    /// # Errors
    ///
    /// The first error of this builder, or out of memory.
    pub fn finish(&mut self) -> Result<()> {
        self.result.clone()?;
        if self.has_fields {
            self.fmt.write_str(")")
        } else {
            Ok(())
        }
    }
}

pub struct DebugList<'f, 'o> {
    fmt: &'f mut Formatter<'o>,
    result: Result<()>,
    has_entries: bool,
}

impl<'f, 'o> DebugList<'f, 'o> {
    pub(crate) fn new(fmt: &'f mut Formatter<'o>) -> Self {
        let result = fmt.write_str("[");
        DebugList {
            fmt,
            result,
            has_entries: false,
        }
    }

    pub fn entry<'v, A: Into<Arg<'v>>>(&mut self, value: A) -> &mut Self {
        if self.result.is_ok() {
            let prefix = if self.has_entries { ", " } else { "" };
            self.result = write_entry(self.fmt, prefix, None, value.into());
        }
        self.has_entries = true;
        self
    }

    pub fn entries<'v, A, I>(&mut self, values: I) -> &mut Self
    where
        A: Into<Arg<'v>>,
        I: IntoIterator<Item = A>,
    {
        for value in values {
            self.entry(value);
        }
        self
    }

    /// # Errors
    ///
    /// The first error of this builder, or out of memory.
    pub fn finish(&mut self) -> Result<()> {
        self.result.clone()?;
        self.fmt.write_str("]")
    }
}

pub struct DebugMap<'f, 'o> {
    fmt: &'f mut Formatter<'o>,
    result: Result<()>,
    has_entries: bool,
}

impl<'f, 'o> DebugMap<'f, 'o> {
    pub(crate) fn new(fmt: &'f mut Formatter<'o>) -> Self {
        let result = fmt.write_str("{");
        DebugMap {
            fmt,
            result,
            has_entries: false,
        }
    }

    pub fn entry<'k, 'v, K, V>(&mut self, key: K, value: V) -> &mut Self
    where
        K: Into<Arg<'k>>,
        V: Into<Arg<'v>>,
    {
        if self.result.is_ok() {
            let prefix = if self.has_entries { ", " } else { " " };
            self.result = write_entry(self.fmt, prefix, None, key.into())
                .and_then(|()| write_entry(self.fmt, ": ", None, value.into()));
        }
        self.has_entries = true;
        self
    }

    /// # Errors
    ///
    /// The first error of this builder, or out of memory.
    pub fn finish(&mut self) -> Result<()> {
        self.result.clone()?;
        self.fmt
            .write_str(if self.has_entries { " }" } else { "}" })
    }
}

fn write_entry(
    fmt: &mut Formatter<'_>,
    prefix: &str,
    name: Option<&str>,
    value: Arg<'_>,
) -> Result<()> {
    fmt.write_str(prefix)?;
    if let Some(name) = name {
        fmt.write_str(name)?;
        fmt.write_str(": ")?;
    }
    fmt.write_arg(value)
}
