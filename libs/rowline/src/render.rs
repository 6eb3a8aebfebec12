//! Value → text rendering.
//!
//! The rules are explicit and total per value category, so the emitted text
//! is pinned by this module rather than by whatever a generic to-string
//! conversion happens to produce. Two forms exist:
//!
//! - [`display`] — the top-level field token.
//! - [`literal`] — the form an element takes inside a composite.
//!
//! They differ only for `Null` (empty vs `None`) and `Str` (bare vs
//! single-quoted).

use crate::value::Value;

/// Render a value as a top-level field token.
///
/// - `Null` → empty text.
/// - `Bool` → `True` / `False`.
/// - `Int` → literal digits.
/// - `Float` → digits with a trailing `.0` when integral; `nan`/`inf`/`-inf`
///   when non-finite; exponent form for magnitudes ≥ 1e16 or below 1e-4.
/// - `Str` → the text itself, unmodified.
/// - Composites → their [`literal`] form.
pub fn display(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => bool_token(*b).to_string(),
        Value::Int(i) => i.to_string(),
        Value::Float(f) => float_token(*f),
        Value::Str(s) => s.clone(),
        composite => literal(composite),
    }
}

/// Render a value as it appears inside a composite literal.
///
/// - `Null` → `None`.
/// - `Str` → single-quoted, `\` and `'` backslash-escaped.
/// - `Array` → `[e1, e2, ...]`, element order preserved.
/// - `Tuple` → `(e1, e2, ...)`; one element renders `(e1,)`.
/// - `Map` → `{k1: v1, ...}`, insertion order preserved.
/// - Scalars otherwise as in [`display`].
pub fn literal(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Str(s) => quoted(s),
        Value::Array(items) => format!("[{}]", join(items)),
        Value::Tuple(items) if items.len() == 1 => format!("({},)", literal(&items[0])),
        Value::Tuple(items) => format!("({})", join(items)),
        Value::Map(entries) => {
            let body: Vec<String> = entries
                .iter()
                .map(|(k, v)| format!("{}: {}", literal(k), literal(v)))
                .collect();
            format!("{{{}}}", body.join(", "))
        }
        scalar => display(scalar),
    }
}

fn join(items: &[Value]) -> String {
    items.iter().map(literal).collect::<Vec<_>>().join(", ")
}

fn bool_token(b: bool) -> &'static str {
    if b { "True" } else { "False" }
}

fn quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        if c == '\\' || c == '\'' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('\'');
    out
}

/// Integral finite floats keep a trailing `.0`; exponent form kicks in at
/// |x| ≥ 1e16 and 0 < |x| < 1e-4, with a signed two-digit-minimum exponent.
fn float_token(f: f64) -> String {
    if f.is_nan() {
        return "nan".to_string();
    }
    if f.is_infinite() {
        return if f < 0.0 { "-inf" } else { "inf" }.to_string();
    }
    let abs = f.abs();
    if abs != 0.0 && !(1e-4..1e16).contains(&abs) {
        return exponent_token(f);
    }
    if f == f.trunc() {
        format!("{f:.1}")
    } else {
        format!("{f}")
    }
}

fn exponent_token(f: f64) -> String {
    let raw = format!("{f:e}");
    match raw.split_once('e') {
        Some((mantissa, exp)) => {
            let exp: i32 = exp.parse().unwrap_or(0);
            format!("{mantissa}e{exp:+03}")
        }
        None => raw,
    }
}
