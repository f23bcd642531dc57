use crate::errors::{CsvReverseError, CsvReverseResult};

/// Delimiter behaviour as specified in the command line
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Delimiter {
    /// Use the default delimiter (comma)
    #[default]
    Default,

    /// Use the specified delimiter
    Character(u8),
}

impl Delimiter {
    /// Create a Delimiter by parsing the command line argument for the delimiter
    pub fn from_arg(
        delimiter_arg: &Option<String>,
        tab_separation: bool,
    ) -> CsvReverseResult<Self> {
        if tab_separation {
            return Ok(Delimiter::Character(b'\t'));
        }

        if let Some(s) = delimiter_arg {
            if s == r"\t" {
                return Ok(Delimiter::Character(b'\t'));
            }
            let mut chars = s.chars();
            let c = chars.next().ok_or(CsvReverseError::DelimiterEmpty)?;
            if !c.is_ascii() {
                return Err(CsvReverseError::DelimiterNotAscii(c));
            }
            if chars.next().is_some() {
                return Err(CsvReverseError::DelimiterMultipleCharacters(s.clone()));
            }
            Ok(Delimiter::Character(c as u8))
        } else {
            Ok(Delimiter::Default)
        }
    }

    pub fn as_byte(&self) -> u8 {
        match self {
            Delimiter::Default => b',',
            Delimiter::Character(c) => *c,
        }
    }
}
