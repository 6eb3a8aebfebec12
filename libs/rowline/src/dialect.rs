use serde::{Deserialize, Serialize};

use crate::error::EncodeError;

/// When field tokens get wrapped in the quote character.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuoteStyle {
    /// Quote only tokens containing the delimiter, the quote character, or
    /// an embedded line break.
    #[default]
    Minimal,
    /// Quote every token.
    All,
    /// Quote every token that did not render from a numeric value.
    NonNumeric,
    /// Never quote; special characters must be escaped instead.
    None,
}

/// Delimited-text profile: delimiter, quoting, and row terminator rules.
///
/// Presets mirror the common spreadsheet conventions:
/// - [`Dialect::excel`] — comma, double-quote, minimal quoting, CRLF.
/// - [`Dialect::excel_tab`] — same with a tab delimiter.
/// - [`Dialect::unix`] — LF-terminated, everything quoted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dialect {
    pub delimiter: char,
    pub quote: char,
    pub quoting: QuoteStyle,
    /// An embedded quote character is doubled when set; otherwise it is
    /// prefixed with `escape`.
    pub double_quote: bool,
    pub escape: Option<char>,
    pub line_terminator: String,
}

impl Default for Dialect {
    fn default() -> Self {
        Self::excel()
    }
}

impl Dialect {
    pub fn excel() -> Self {
        Self {
            delimiter: ',',
            quote: '"',
            quoting: QuoteStyle::Minimal,
            double_quote: true,
            escape: None,
            line_terminator: "\r\n".to_string(),
        }
    }

    pub fn excel_tab() -> Self {
        Self {
            delimiter: '\t',
            ..Self::excel()
        }
    }

    pub fn unix() -> Self {
        Self {
            quoting: QuoteStyle::All,
            line_terminator: "\n".to_string(),
            ..Self::excel()
        }
    }

    /// Resolve a preset by its config-facing name.
    pub fn named(name: &str) -> Option<Self> {
        match name {
            "excel" => Some(Self::excel()),
            "excel-tab" => Some(Self::excel_tab()),
            "unix" => Some(Self::unix()),
            _ => None,
        }
    }

    /// Check the profile is internally consistent.
    ///
    /// Escaping gaps (`double_quote` off with no escape character) surface
    /// only when a token actually needs escaping, not here.
    pub fn validate(&self) -> Result<(), EncodeError> {
        if self.delimiter == '\0' {
            return Err(invalid("delimiter must be set"));
        }
        if self.line_terminator.is_empty() {
            return Err(invalid("line terminator must not be empty"));
        }
        if self.quoting != QuoteStyle::None {
            if self.quote == '\0' {
                return Err(invalid("quote character must be set when quoting is in effect"));
            }
            if self.quote == self.delimiter {
                return Err(invalid("quote character must differ from the delimiter"));
            }
        }
        Ok(())
    }
}

fn invalid(reason: &str) -> EncodeError {
    EncodeError::Dialect {
        reason: reason.to_string(),
    }
}
