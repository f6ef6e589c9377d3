use serde_json::Value;

/// One decoded event record: the common fields plus a per-kind payload.
#[derive(Debug, Clone)]
pub struct Envelope {
    /// Wire discriminator (`response`, `ops`, `error`, `wreck`, or any
    /// generic kind such as `log` and `request`).
    pub kind: String,
    pub timestamp_ms: i64,
    /// Supplied tags, order preserved, duplicates allowed.
    pub tags: Vec<String>,
    /// Correlation id shared by a request's tail entries and its
    /// response.
    pub id: Option<String>,
    /// The wire `data` field, decoded for every kind: the generic
    /// rendering rule reads it, including for flushed tail entries of
    /// other kinds.
    pub data: DataField,
    pub payload: Payload,
}

#[derive(Debug, Clone)]
pub enum Payload {
    Response(ResponseFields),
    Ops(OpsFields),
    Error(ErrorFields),
    Outbound(OutboundFields),
    Generic,
}

/// Request summary (`response` kind).
#[derive(Debug, Clone)]
pub struct ResponseFields {
    pub instance: String,
    pub method: String,
    pub path: String,
    pub query: Option<Value>,
    pub status_code: Option<i64>,
    pub response_time_ms: Option<i64>,
    pub headers: Option<Value>,
    pub request_payload: Option<Value>,
    pub response_payload: Option<Value>,
}

/// Resource usage snapshot (`ops` kind).
#[derive(Debug, Clone)]
pub struct OpsFields {
    pub rss_bytes: f64,
    pub uptime_secs: f64,
    pub load: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct ErrorFields {
    pub message: Option<String>,
    pub stack: Option<String>,
}

/// Outbound HTTP call result (`wreck` kind): either a status pair or an
/// error, never both rendered.
#[derive(Debug, Clone)]
pub struct OutboundFields {
    pub method: String,
    pub url: String,
    pub status_code: Option<i64>,
    pub status_message: Option<String>,
    pub error: Option<ErrorFields>,
    pub time_spent_ms: Option<i64>,
}

/// The `data` field of a generic event.
#[derive(Debug, Clone)]
pub enum DataField {
    Text(String),
    Object(Value),
    None,
}

impl Envelope {
    pub fn is_response(&self) -> bool {
        matches!(self.payload, Payload::Response(_))
    }

    /// Tail-eligible: any non-response, non-ops event carrying a
    /// correlation id.
    pub fn tail_eligible(&self) -> bool {
        self.id.is_some()
            && !matches!(self.payload, Payload::Response(_) | Payload::Ops(_))
    }
}
