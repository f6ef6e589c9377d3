use crate::config::Settings;
use crate::event::{
    DataField, Envelope, ErrorFields, OpsFields, OutboundFields, Payload, ResponseFields,
};
use crate::palette;
use serde_json::Value;

/// Render one event's payload text. Total over all inputs: malformed
/// fields degrade to placeholders instead of failing the stream.
pub fn render(event: &Envelope, settings: &Settings) -> String {
    match &event.payload {
        Payload::Response(fields) => response(fields, settings),
        Payload::Ops(fields) => ops(fields),
        Payload::Error(fields) => error(fields),
        Payload::Outbound(fields) => outbound(fields, settings),
        Payload::Generic => data_text(&event.data),
    }
}

/// The generic rendering rule, also applied to flushed tail entries
/// whatever their original kind.
pub fn data_text(data: &DataField) -> String {
    match data {
        DataField::Text(text) => format!("data: {text}"),
        DataField::Object(value) => format!("data: {}", json_text(value)),
        DataField::None => "data: (none)".to_string(),
    }
}

fn response(fields: &ResponseFields, settings: &Settings) -> String {
    let method = palette::method(&fields.method, settings.color);
    let status = palette::status(fields.status_code, settings.color);
    let query = fields.query.as_ref().map(json_text).unwrap_or_default();
    let response_time = fields.response_time_ms.unwrap_or(0);

    let mut output = format!(
        "{}: {} {} {} {} ({}ms)",
        fields.instance, method, fields.path, query, status, response_time
    );

    let extras = [
        (settings.request_headers, &fields.headers),
        (settings.request_payload, &fields.request_payload),
        (settings.response_payload, &fields.response_payload),
    ];

    for (enabled, value) in extras {
        if enabled && let Some(value) = value {
            output.push(' ');
            output.push_str(&json_text(value));
        }
    }

    output
}

fn ops(fields: &OpsFields) -> String {
    let memory = (fields.rss_bytes / (1024.0 * 1024.0)).round();
    let load = fields
        .load
        .iter()
        .map(|l| l.to_string())
        .collect::<Vec<_>>()
        .join(",");

    format!(
        "memory: {}Mb, uptime (seconds): {}, load: [{}]",
        memory, fields.uptime_secs, load
    )
}

fn error(fields: &ErrorFields) -> String {
    format!(
        "message: {}, stack: {}",
        fields.message.as_deref().unwrap_or("undefined"),
        fields.stack.as_deref().unwrap_or("undefined")
    )
}

fn outbound(fields: &OutboundFields, settings: &Settings) -> String {
    let method = palette::method(&fields.method, settings.color);

    match &fields.error {
        Some(error) => format!(
            "{} {} error: {} stack: {}",
            method,
            fields.url,
            error.message.as_deref().unwrap_or("undefined"),
            error.stack.as_deref().unwrap_or("undefined")
        ),
        None => format!(
            "{} {} {} {} ({}ms)",
            method,
            fields.url,
            palette::status(fields.status_code, settings.color),
            fields.status_message.as_deref().unwrap_or(""),
            fields.time_spent_ms.unwrap_or(0)
        ),
    }
}

fn json_text(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "[unserializable]".to_string())
}
