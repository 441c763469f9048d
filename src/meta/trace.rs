use crate::meta::RpcRequestMeta;

/// The tracing fields of a request, viewed together.
///
/// Not a wire type of its own: it is read from and written into
/// [`RpcRequestMeta`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trace {
    pub trace_id: i64,
    pub trace_key: String,
    pub span_id: i64,
    pub parent_span_id: i64,
}

impl Trace {
    pub fn new(
        trace_id: i64,
        trace_key: impl Into<String>,
        span_id: i64,
        parent_span_id: i64,
    ) -> Self {
        Self {
            trace_id,
            trace_key: trace_key.into(),
            span_id,
            parent_span_id,
        }
    }

    pub(crate) fn apply_to(self, request: &mut RpcRequestMeta) {
        request.trace_id = self.trace_id;
        request.trace_key = self.trace_key;
        request.span_id = self.span_id;
        request.parent_span_id = self.parent_span_id;
    }
}

impl From<&RpcRequestMeta> for Trace {
    fn from(request: &RpcRequestMeta) -> Self {
        Self {
            trace_id: request.trace_id,
            trace_key: request.trace_key.clone(),
            span_id: request.span_id,
            parent_span_id: request.parent_span_id,
        }
    }
}
