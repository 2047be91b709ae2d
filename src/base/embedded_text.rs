//! Embedded text with a map back to host offsets.
//!
//! A host value is rarely handed to an embedded parser verbatim: XML
//! attribute values and text, for instance, spell `<` as `&lt;`. The
//! decoded text is what gets parsed, and [`EmbeddedText::to_host`] maps
//! offsets in it back onto the host document.

use std::ops::Range;

use text_size::{TextRange, TextSize};

/// Decoded embedded text plus its position in the host document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedText {
    text: String,
    /// `(decoded offset, host offset)` pairs, sorted, one per run of
    /// verbatim text. Offsets within a run advance together.
    runs: Vec<(TextSize, TextSize)>,
}

impl EmbeddedText {
    /// Text copied from the host as-is, starting at `start`.
    pub fn verbatim(text: impl Into<String>, start: TextSize) -> Self {
        Self {
            text: text.into(),
            runs: vec![(TextSize::new(0), start)],
        }
    }

    /// Decode XML character and predefined entity references in `raw`,
    /// which starts at host offset `start`.
    ///
    /// Unknown or malformed references are kept as written.
    pub fn decode_xml(raw: &str, start: TextSize) -> Self {
        let mut text = String::with_capacity(raw.len());
        let mut runs = vec![(TextSize::new(0), start)];
        let mut rest = raw;
        let mut consumed = 0usize;

        while let Some(amp) = rest.find('&') {
            text.push_str(&rest[..amp]);
            consumed += amp;
            rest = &rest[amp..];

            let decoded = rest
                .find(';')
                .and_then(|semi| decode_reference(&rest[1..semi]).map(|c| (c, semi + 1)));
            match decoded {
                Some((c, len)) => {
                    runs.push((text_size(text.len()), start + text_size(consumed)));
                    text.push(c);
                    consumed += len;
                    rest = &rest[len..];
                    runs.push((text_size(text.len()), start + text_size(consumed)));
                }
                None => {
                    text.push('&');
                    consumed += 1;
                    rest = &rest[1..];
                }
            }
        }
        text.push_str(rest);
        runs.dedup_by_key(|run| run.0);

        Self { text, runs }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> TextSize {
        text_size(self.text.len())
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Host offset of the start of the text.
    pub fn start(&self) -> TextSize {
        self.runs.first().map_or(TextSize::new(0), |run| run.1)
    }

    /// True if every offset maps to the host by a constant shift.
    pub fn is_verbatim(&self) -> bool {
        self.runs.len() == 1
    }

    /// Map an offset in the decoded text to a host offset.
    ///
    /// An offset inside a decoded reference maps to the start of that
    /// reference.
    pub fn to_host(&self, offset: TextSize) -> TextSize {
        let index = self.runs.partition_point(|run| run.0 <= offset);
        match index.checked_sub(1).and_then(|i| self.runs.get(i)) {
            Some(&(decoded, host)) => {
                let next = self.runs.get(index).map(|run| run.0);
                match next {
                    // The run is a single decoded reference.
                    Some(next) if self.is_reference_run(index - 1) && offset < next => host,
                    _ => host + (offset - decoded),
                }
            }
            None => self.start() + offset,
        }
    }

    /// Map a range in the decoded text to a host range.
    pub fn range_to_host(&self, range: TextRange) -> TextRange {
        let start = self.to_host(range.start());
        let end = if range.is_empty() {
            start
        } else {
            self.to_host(range.end())
        };
        TextRange::new(start, end.max(start))
    }

    /// Map a host offset into the decoded text, if it falls inside it.
    pub fn from_host(&self, offset: TextSize) -> Option<TextSize> {
        let index = self.runs.partition_point(|run| run.1 <= offset);
        let &(decoded, host) = self.runs.get(index.checked_sub(1)?)?;
        let mapped = if self.is_reference_run(index - 1) {
            decoded
        } else {
            decoded + (offset - host)
        };
        (mapped <= self.len()).then_some(mapped)
    }

    /// Slice of the decoded text.
    pub fn slice(&self, range: TextRange) -> Option<&str> {
        self.text.get(Range::<usize>::from(range))
    }

    fn is_reference_run(&self, index: usize) -> bool {
        let Some(&(decoded, host)) = self.runs.get(index) else {
            return false;
        };
        match self.runs.get(index + 1) {
            Some(&(next_decoded, next_host)) => {
                next_host - host != next_decoded - decoded
            }
            None => false,
        }
    }
}

fn decode_reference(name: &str) -> Option<char> {
    match name {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let code = if let Some(hex) = name.strip_prefix("#x") {
                u32::from_str_radix(hex, 16).ok()?
            } else if let Some(dec) = name.strip_prefix('#') {
                dec.parse().ok()?
            } else {
                return None;
            };
            char::from_u32(code)
        }
    }
}

fn text_size(len: usize) -> TextSize {
    TextSize::try_from(len).unwrap_or(TextSize::new(u32::MAX))
}
