//! Group code / value tokenizer for ASCII DXF

use std::str::Lines;

/// A DXF code/value pair borrowed from the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodePair<'a> {
    /// The DXF group code
    pub code: i32,
    /// Trimmed value line
    pub value: &'a str,
}

impl<'a> CodePair<'a> {
    /// Create a new code/value pair
    pub fn new(code: i32, value: &'a str) -> Self {
        Self { code, value }
    }

    /// True for a `(0, name)` record tag
    pub fn is_tag(&self, name: &str) -> bool {
        self.code == 0 && self.value == name
    }

    /// True for `ENDSEC`, `SECTION` or `EOF`; sub-readers stop here
    pub fn is_section_boundary(&self) -> bool {
        self.code == 0 && matches!(self.value, "ENDSEC" | "SECTION" | "EOF")
    }

    /// Get value as double
    pub fn as_double(&self) -> Option<f64> {
        self.value.parse::<f64>().ok().filter(|v| v.is_finite())
    }

    /// Get value as i16.
    ///
    /// Some writers emit integer codes as `"7.0"`, so a whole float is accepted.
    pub fn as_i16(&self) -> Option<i16> {
        self.value.parse::<i16>().ok().or_else(|| {
            self.as_double()
                .filter(|v| v.fract() == 0.0 && *v >= i16::MIN as f64 && *v <= i16::MAX as f64)
                .map(|v| v as i16)
        })
    }
}

/// Turns DXF text into code/value pairs, two lines at a time.
///
/// A pair whose code line is not an integer is dropped together with its
/// value line. Dropped pairs are counted in [`Tokenizer::skipped`].
pub struct Tokenizer<'a> {
    lines: Lines<'a>,
    skipped: usize,
}

impl<'a> Tokenizer<'a> {
    /// Tokenize `text`; `\n` and `\r\n` line endings are both accepted
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines(),
            skipped: 0,
        }
    }

    /// Pairs dropped so far
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = CodePair<'a>;

    fn next(&mut self) -> Option<CodePair<'a>> {
        loop {
            let code_line = self.lines.next()?.trim();
            let Some(value_line) = self.lines.next() else {
                if !code_line.is_empty() {
                    tracing::trace!(line = code_line, "dangling code line dropped");
                    self.skipped += 1;
                }
                return None;
            };

            match code_line.parse::<i32>() {
                Ok(code) => return Some(CodePair::new(code, value_line.trim())),
                Err(_) => {
                    tracing::trace!(code = code_line, "pair with non-integer code skipped");
                    self.skipped += 1;
                }
            }
        }
    }
}
