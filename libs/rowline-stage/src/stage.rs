use rowline::{EncodeError, Value};

/// One unit of per-element transformation: one record in, zero or more
/// output lines out.
///
/// Implementations are immutable after construction (`process` takes
/// `&self`) and `Send + Sync`, so a hosting parallel-execution framework
/// can share one instance across any number of concurrent workers. The
/// host owns scheduling, retries, and partial-failure handling; a failed
/// record surfaces as the returned error, nothing is swallowed.
pub trait Stage: Send + Sync {
    /// Process a single input record, returning zero or more output lines.
    fn process(&self, record: &Value) -> Result<Vec<String>, EncodeError>;

    /// The display name of this stage.
    fn name(&self) -> &'static str;
}
