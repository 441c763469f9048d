/// Per-call values supplied by the caller's execution context.
///
/// Passed explicitly to [`crate::RpcMethodInfo::build_request`]; nothing here
/// is read from global or thread-local state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallContext {
    log_id: Option<i64>,
}

impl CallContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forces `log_id` onto every request built with this context, taking
    /// precedence over the method's log id generator.
    pub fn with_log_id(mut self, log_id: i64) -> Self {
        self.log_id = Some(log_id);
        self
    }

    pub fn log_id(&self) -> Option<i64> {
        self.log_id
    }
}
