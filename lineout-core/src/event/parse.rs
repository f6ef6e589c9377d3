use super::types::{
    DataField, Envelope, ErrorFields, OpsFields, OutboundFields, Payload, ResponseFields,
};
use chrono::Utc;
use serde_json::Value;

impl Envelope {
    /// Decode one raw record. Total: every field access degrades to a
    /// placeholder value, so one malformed record never stops the
    /// stream.
    pub fn from_value(record: &Value) -> Envelope {
        let kind = record
            .get("event")
            .and_then(Value::as_str)
            .unwrap_or("log")
            .to_string();

        let payload = match kind.as_str() {
            "response" => Payload::Response(parse_response(record)),
            "ops" => Payload::Ops(parse_ops(record)),
            "error" => Payload::Error(parse_error(record.get("error"))),
            "wreck" => Payload::Outbound(parse_outbound(record)),
            _ => Payload::Generic,
        };

        Envelope {
            kind,
            timestamp_ms: coerce_timestamp(record.get("timestamp")),
            tags: normalize_tags(record.get("tags")),
            id: field_str(record, "id"),
            data: parse_data(record.get("data")),
            payload,
        }
    }
}

fn field_str(record: &Value, key: &str) -> Option<String> {
    record.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Numbers may arrive as JSON strings (e.g. `"200"`).
fn field_i64(record: &Value, key: &str) -> Option<i64> {
    let value = record.get(key)?;
    value
        .as_i64()
        .or_else(|| value.as_str().and_then(|s| s.parse().ok()))
}

fn field_object(record: &Value, key: &str) -> Option<Value> {
    record.get(key).filter(|v| !v.is_null()).cloned()
}

/// Timestamps arrive as a number or a numeric string. Anything else
/// falls back to the current process time; that leniency is part of the
/// output contract.
fn coerce_timestamp(value: Option<&Value>) -> i64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    parsed.unwrap_or_else(|| {
        tracing::debug!("record carried no usable timestamp, substituting current time");
        Utc::now().timestamp_millis()
    })
}

/// `tags` may be absent, a single string, or an array.
fn normalize_tags(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.iter().map(tag_text).collect(),
        Some(Value::Null) | None => Vec::new(),
        Some(other) => vec![tag_text(other)],
    }
}

fn tag_text(value: &Value) -> String {
    match value.as_str() {
        Some(s) => s.to_string(),
        None => value.to_string(),
    }
}

fn parse_response(record: &Value) -> ResponseFields {
    ResponseFields {
        instance: field_str(record, "instance").unwrap_or_default(),
        method: field_str(record, "method").unwrap_or_default(),
        path: field_str(record, "path").unwrap_or_default(),
        query: field_object(record, "query"),
        status_code: field_i64(record, "statusCode"),
        response_time_ms: field_i64(record, "responseTime"),
        headers: field_object(record, "headers"),
        request_payload: field_object(record, "requestPayload"),
        response_payload: field_object(record, "responsePayload"),
    }
}

fn parse_ops(record: &Value) -> OpsFields {
    let proc = record.get("proc");

    OpsFields {
        rss_bytes: proc
            .and_then(|p| p.get("mem"))
            .and_then(|m| m.get("rss"))
            .and_then(Value::as_f64)
            .unwrap_or(0.0),
        uptime_secs: proc
            .and_then(|p| p.get("uptime"))
            .and_then(Value::as_f64)
            .unwrap_or(0.0),
        load: record
            .get("os")
            .and_then(|o| o.get("load"))
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_f64).collect())
            .unwrap_or_default(),
    }
}

fn parse_error(error: Option<&Value>) -> ErrorFields {
    ErrorFields {
        message: error.and_then(|e| field_str(e, "message")),
        stack: error.and_then(|e| field_str(e, "stack")),
    }
}

fn parse_outbound(record: &Value) -> OutboundFields {
    let request = record.get("request");
    let response = record.get("response");

    OutboundFields {
        method: request
            .and_then(|r| field_str(r, "method"))
            .unwrap_or_default(),
        url: request.and_then(|r| field_str(r, "url")).unwrap_or_default(),
        status_code: response.and_then(|r| field_i64(r, "statusCode")),
        status_message: response.and_then(|r| field_str(r, "statusMessage")),
        error: record
            .get("error")
            .filter(|v| !v.is_null())
            .map(|e| parse_error(Some(e))),
        time_spent_ms: field_i64(record, "timeSpent"),
    }
}

fn parse_data(value: Option<&Value>) -> DataField {
    match value {
        None | Some(Value::Null) => DataField::None,
        Some(Value::String(s)) if s.is_empty() => DataField::None,
        Some(Value::String(s)) => DataField::Text(s.clone()),
        Some(other) => DataField::Object(other.clone()),
    }
}
