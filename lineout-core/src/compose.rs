use crate::timefmt::TimeFormatter;

/// Combine one rendered payload with its timestamp, tag list and
/// optional correlation id into the final newline-terminated line.
///
/// Tags are joined verbatim; a tag containing the separator is not
/// escaped. The output format is stable.
pub fn compose(
    time: &TimeFormatter,
    timestamp_ms: i64,
    tags: &[String],
    id: Option<&str>,
    payload: &str,
) -> String {
    let timestamp = time.render(timestamp_ms);
    let tags = tags.join(",");
    let id = id.map(|id| format!(" ({id})")).unwrap_or_default();

    format!("{timestamp}, [{tags}]{id} {payload}\n")
}
