use serde::{Deserialize, Serialize};

use crate::dialect::{Dialect, QuoteStyle};
use crate::error::EncodeError;
use crate::render;
use crate::value::Value;

/// Options for a single [`encode`] call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeOptions {
    /// Substituted when a column key is entirely absent from the record.
    /// A key that is present with a `Null` value renders as empty text
    /// instead; the two coincide only while this stays empty.
    pub missing_value: String,
    /// Ignore record keys not listed in the column order. When false their
    /// presence fails the call.
    pub discard_extras: bool,
    pub dialect: Dialect,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            missing_value: String::new(),
            discard_extras: true,
            dialect: Dialect::default(),
        }
    }
}

/// Convert one mapping-shaped record into one delimited text line.
///
/// Keys from `column_order` are looked up in `record` in order (key identity
/// is `Value` equality); repeated keys re-emit the same value once per
/// occurrence. The returned line carries no trailing terminator.
///
/// Fails fast with no partial output: shape violations and an invalid
/// dialect are `Type`-kind errors, an empty column order and rejected extra
/// fields are `Value`-kind errors.
pub fn encode(
    record: &Value,
    column_order: &Value,
    options: &EncodeOptions,
) -> Result<String, EncodeError> {
    let Value::Map(entries) = record else {
        return Err(EncodeError::RecordShape {
            actual: record.kind_name(),
        });
    };
    let Value::Array(columns) = column_order else {
        return Err(EncodeError::ColumnOrderShape {
            actual: column_order.kind_name(),
        });
    };
    if columns.is_empty() {
        return Err(EncodeError::EmptyColumnOrder);
    }
    options.dialect.validate()?;

    if !options.discard_extras {
        reject_extras(entries, columns)?;
    }

    let row = write_row(record, columns, options)?;

    // The writer terminates the row; exactly that one terminator comes
    // back off.
    let line = row
        .strip_suffix(options.dialect.line_terminator.as_str())
        .unwrap_or(&row);
    Ok(line.to_string())
}

fn reject_extras(entries: &[(Value, Value)], columns: &[Value]) -> Result<(), EncodeError> {
    let extras: Vec<String> = entries
        .iter()
        .filter(|(key, _)| !columns.contains(key))
        .map(|(key, _)| render::literal(key))
        .collect();
    if extras.is_empty() {
        Ok(())
    } else {
        Err(EncodeError::ExtraFields {
            extras: extras.join(", "),
        })
    }
}

/// Assemble one terminated row: tokens joined by the delimiter, each quoted
/// or escaped per the dialect.
fn write_row(
    record: &Value,
    columns: &[Value],
    options: &EncodeOptions,
) -> Result<String, EncodeError> {
    let dialect = &options.dialect;
    let mut row = String::new();
    for (i, key) in columns.iter().enumerate() {
        if i > 0 {
            row.push(dialect.delimiter);
        }
        match record.get(key) {
            Some(value) => {
                let token = render::display(value);
                let numeric = matches!(value, Value::Int(_) | Value::Float(_));
                push_token(&mut row, &token, numeric, dialect)?;
            }
            None => push_token(&mut row, &options.missing_value, false, dialect)?,
        }
    }
    row.push_str(&dialect.line_terminator);
    Ok(row)
}

fn push_token(
    out: &mut String,
    token: &str,
    numeric: bool,
    dialect: &Dialect,
) -> Result<(), EncodeError> {
    let quote = match dialect.quoting {
        QuoteStyle::All => true,
        QuoteStyle::NonNumeric => !numeric,
        QuoteStyle::Minimal => needs_quoting(token, dialect),
        QuoteStyle::None => return push_escaped(out, token, dialect),
    };
    if quote {
        push_quoted(out, token, dialect)
    } else {
        out.push_str(token);
        Ok(())
    }
}

fn needs_quoting(token: &str, dialect: &Dialect) -> bool {
    token
        .chars()
        .any(|c| c == dialect.delimiter || c == dialect.quote || c == '\r' || c == '\n')
}

fn push_quoted(out: &mut String, token: &str, dialect: &Dialect) -> Result<(), EncodeError> {
    out.push(dialect.quote);
    for c in token.chars() {
        if c == dialect.quote {
            if dialect.double_quote {
                out.push(dialect.quote);
            } else if let Some(escape) = dialect.escape {
                out.push(escape);
            } else {
                return Err(EncodeError::EscapeRequired {
                    token: token.to_string(),
                });
            }
        }
        out.push(c);
    }
    out.push(dialect.quote);
    Ok(())
}

/// `QuoteStyle::None`: no quotes ever; the delimiter, the quote character,
/// the escape character itself, and line breaks get escape-prefixed.
fn push_escaped(out: &mut String, token: &str, dialect: &Dialect) -> Result<(), EncodeError> {
    for c in token.chars() {
        let special = c == dialect.delimiter
            || c == dialect.quote
            || c == '\r'
            || c == '\n'
            || Some(c) == dialect.escape;
        if special {
            match dialect.escape {
                Some(escape) => out.push(escape),
                None => {
                    return Err(EncodeError::EscapeRequired {
                        token: token.to_string(),
                    });
                }
            }
        }
        out.push(c);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn opts() -> EncodeOptions {
        EncodeOptions::default()
    }

    #[test]
    fn test_record_must_be_map() {
        let err = encode(&Value::from("x"), &Value::array(["a"]), &opts()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
        assert!(err.to_string().contains("got str"));
    }

    #[test]
    fn test_column_order_must_be_array() {
        let record = Value::map([("a", 1)]);
        let err = encode(&record, &Value::Int(3), &opts()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
        assert!(err.to_string().contains("got int"));
    }

    #[test]
    fn test_column_order_must_be_non_empty() {
        let record = Value::map([("a", 1)]);
        let columns = Value::Array(vec![]);
        let err = encode(&record, &columns, &opts()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Value);
    }

    #[test]
    fn test_invalid_dialect_is_type_kind() {
        let record = Value::map([("a", 1)]);
        let options = EncodeOptions {
            dialect: Dialect {
                quote: ',',
                ..Dialect::excel()
            },
            ..opts()
        };
        let err = encode(&record, &Value::array(["a"]), &options).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
    }

    #[test]
    fn test_absent_key_uses_missing_value() {
        let record = Value::map([("a", 1)]);
        let options = EncodeOptions {
            missing_value: "N/A".to_string(),
            ..opts()
        };
        let line = encode(&record, &Value::array(["a", "b"]), &options).unwrap();
        assert_eq!(line, "1,N/A");
    }

    #[test]
    fn test_present_null_renders_empty_not_missing_value() {
        let record = Value::map([(Value::from("a"), Value::Null)]);
        let options = EncodeOptions {
            missing_value: "N/A".to_string(),
            ..opts()
        };
        let line = encode(&record, &Value::array(["a", "b"]), &options).unwrap();
        assert_eq!(line, ",N/A");
    }

    #[test]
    fn test_missing_value_is_quoted_like_any_token() {
        let record = Value::Map(vec![]);
        let options = EncodeOptions {
            missing_value: "n,a".to_string(),
            ..opts()
        };
        let line = encode(&record, &Value::array(["a", "b"]), &options).unwrap();
        assert_eq!(line, "\"n,a\",\"n,a\"");
    }

    #[test]
    fn test_repeated_columns_re_emit_value() {
        let record = Value::map([("herp", 1), ("derp", 2)]);
        let line = encode(&record, &Value::array(["herp", "herp"]), &opts()).unwrap();
        assert_eq!(line, "1,1");
    }

    #[test]
    fn test_extras_ignored_by_default() {
        let record = Value::map([("herp", 1), ("derp", 2), ("blerp", 3)]);
        let line = encode(&record, &Value::array(["herp", "derp"]), &opts()).unwrap();
        assert_eq!(line, "1,2");
    }

    #[test]
    fn test_extras_rejected_when_not_discarded() {
        let record = Value::map([("herp", 1), ("derp", 2), ("blerp", 3), ("merp", 4)]);
        let options = EncodeOptions {
            discard_extras: false,
            ..opts()
        };
        let err = encode(&record, &Value::array(["herp", "derp"]), &options).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Value);
        assert_eq!(
            err.to_string(),
            "record contains fields not in column order: 'blerp', 'merp'"
        );
    }

    #[test]
    fn test_exact_columns_pass_with_extras_rejected() {
        let record = Value::map([("herp", 1), ("derp", 2)]);
        let options = EncodeOptions {
            discard_extras: false,
            ..opts()
        };
        let line = encode(&record, &Value::array(["derp", "herp"]), &options).unwrap();
        assert_eq!(line, "2,1");
    }

    #[test]
    fn test_quote_all_style() {
        let record = Value::map([(Value::from("a"), Value::Int(1)), (Value::from("b"), Value::from("x"))]);
        let options = EncodeOptions {
            dialect: Dialect {
                quoting: QuoteStyle::All,
                ..Dialect::excel()
            },
            ..opts()
        };
        let line = encode(&record, &Value::array(["a", "b"]), &options).unwrap();
        assert_eq!(line, "\"1\",\"x\"");
    }

    #[test]
    fn test_quote_non_numeric_style() {
        let record = Value::map([
            (Value::from("n"), Value::Int(1)),
            (Value::from("f"), Value::Float(2.5)),
            (Value::from("s"), Value::from("1")),
        ]);
        let options = EncodeOptions {
            dialect: Dialect {
                quoting: QuoteStyle::NonNumeric,
                ..Dialect::excel()
            },
            ..opts()
        };
        let line = encode(&record, &Value::array(["n", "f", "s"]), &options).unwrap();
        assert_eq!(line, "1,2.5,\"1\"");
    }

    #[test]
    fn test_quote_none_escapes_specials() {
        let record = Value::map([("a", "x,y"), ("b", "z")]);
        let options = EncodeOptions {
            dialect: Dialect {
                quoting: QuoteStyle::None,
                escape: Some('\\'),
                ..Dialect::excel()
            },
            ..opts()
        };
        let line = encode(&record, &Value::array(["a", "b"]), &options).unwrap();
        assert_eq!(line, "x\\,y,z");
    }

    #[test]
    fn test_quote_none_without_escape_fails() {
        let record = Value::map([("a", "x,y")]);
        let options = EncodeOptions {
            dialect: Dialect {
                quoting: QuoteStyle::None,
                ..Dialect::excel()
            },
            ..opts()
        };
        let err = encode(&record, &Value::array(["a"]), &options).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Value);
    }

    #[test]
    fn test_embedded_quote_doubled() {
        let record = Value::map([("a", "say \"hi\"")]);
        let line = encode(&record, &Value::array(["a"]), &opts()).unwrap();
        assert_eq!(line, "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_embedded_quote_escaped_when_doubling_off() {
        let record = Value::map([("a", "say \"hi\"")]);
        let options = EncodeOptions {
            dialect: Dialect {
                double_quote: false,
                escape: Some('\\'),
                ..Dialect::excel()
            },
            ..opts()
        };
        let line = encode(&record, &Value::array(["a"]), &options).unwrap();
        assert_eq!(line, "\"say \\\"hi\\\"\"");
    }

    #[test]
    fn test_embedded_quote_without_doubling_or_escape_fails() {
        let record = Value::map([("a", "say \"hi\"")]);
        let options = EncodeOptions {
            dialect: Dialect {
                double_quote: false,
                ..Dialect::excel()
            },
            ..opts()
        };
        let err = encode(&record, &Value::array(["a"]), &options).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Value);
    }

    #[test]
    fn test_embedded_line_break_is_quoted() {
        let record = Value::map([("a", "x\ny")]);
        let line = encode(&record, &Value::array(["a"]), &opts()).unwrap();
        assert_eq!(line, "\"x\ny\"");
    }

    #[test]
    fn test_only_one_trailing_terminator_stripped() {
        // A field ending in the terminator sequence is quoted, and the strip
        // takes the row terminator alone, not the field's tail.
        let record = Value::map([("a", "x\r\n")]);
        let line = encode(&record, &Value::array(["a"]), &opts()).unwrap();
        assert_eq!(line, "\"x\r\n\"");
    }

    #[test]
    fn test_custom_terminator_stripped() {
        let record = Value::map([("a", 1), ("b", 2)]);
        let options = EncodeOptions {
            dialect: Dialect {
                line_terminator: "\n".to_string(),
                ..Dialect::excel()
            },
            ..opts()
        };
        let line = encode(&record, &Value::array(["a", "b"]), &options).unwrap();
        assert_eq!(line, "1,2");
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let options: EncodeOptions = serde_json::from_str("{}").unwrap();
        assert!(options.discard_extras);
        assert_eq!(options.missing_value, "");
        assert_eq!(options.dialect, Dialect::excel());
    }
}
