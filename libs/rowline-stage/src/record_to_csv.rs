use serde::{Deserialize, Serialize};

use rowline::{Dialect, EncodeError, EncodeOptions, Value, encode};

use crate::stage::Stage;

/// Construction-time configuration for [`RecordToCsv`].
///
/// Deserializable from whatever config document the hosting pipeline
/// carries; every field has a default except that an empty `columns` list
/// will fail each `process` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    /// Column keys, in emission order. Plain JSON values — strings,
    /// numbers, booleans — become the lookup keys.
    pub columns: Vec<serde_json::Value>,
    /// Substituted for columns entirely absent from a record.
    pub missing_value: String,
    /// Ignore record keys outside `columns`; when false their presence
    /// fails the record.
    pub discard_extras: bool,
    pub dialect: Dialect,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            missing_value: String::new(),
            discard_extras: true,
            dialect: Dialect::default(),
        }
    }
}

/// Stage adapter: one record in, exactly one delimited line out.
///
/// Configuration is captured at construction and immutable thereafter.
/// `process` delegates to [`rowline::encode`] and propagates its failures
/// untouched — no retry, no swallowing; the hosting pipeline decides
/// whether to drop, retry, or fail the enclosing job.
pub struct RecordToCsv {
    columns: Value,
    options: EncodeOptions,
}

impl RecordToCsv {
    pub fn new(config: StageConfig) -> Self {
        let columns = Value::Array(config.columns.into_iter().map(Value::from).collect());
        Self {
            columns,
            options: EncodeOptions {
                missing_value: config.missing_value,
                discard_extras: config.discard_extras,
                dialect: config.dialect,
            },
        }
    }
}

impl Stage for RecordToCsv {
    fn process(&self, record: &Value) -> Result<Vec<String>, EncodeError> {
        let line = encode(record, &self.columns, &self.options)?;
        tracing::trace!(stage = self.name(), bytes = line.len(), "encoded record");
        Ok(vec![line])
    }

    fn name(&self) -> &'static str {
        "record-to-csv"
    }
}
