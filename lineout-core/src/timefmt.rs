use chrono::{Local, TimeZone, Utc};

/// Renders epoch-millisecond timestamps with a compact pattern syntax.
///
/// Recognized tokens: `YYYY`, `YY`, `MM`, `DD`, `HH`, `mm`, `ss`,
/// `SSS`. Every other character is literal. The pattern is translated
/// to a strftime spec once, at construction.
#[derive(Debug, Clone)]
pub struct TimeFormatter {
    spec: String,
    utc: bool,
}

impl TimeFormatter {
    pub fn new(pattern: &str, utc: bool) -> Self {
        Self {
            spec: translate(pattern),
            utc,
        }
    }

    /// Out-of-range millis fall back to the current time, matching the
    /// lenient timestamp policy at the decode boundary.
    pub fn render(&self, timestamp_ms: i64) -> String {
        if self.utc {
            let dt = Utc
                .timestamp_millis_opt(timestamp_ms)
                .single()
                .unwrap_or_else(Utc::now);
            dt.format(&self.spec).to_string()
        } else {
            let dt = Local
                .timestamp_millis_opt(timestamp_ms)
                .single()
                .unwrap_or_else(Local::now);
            dt.format(&self.spec).to_string()
        }
    }
}

fn translate(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut spec = String::with_capacity(pattern.len());
    let mut i = 0;

    while i < chars.len() {
        let current = chars[i];
        let mut run = 1;
        while i + run < chars.len() && chars[i + run] == current {
            run += 1;
        }

        match (current, run) {
            ('Y', 4) => spec.push_str("%Y"),
            ('Y', 2) => spec.push_str("%y"),
            ('M', 2) => spec.push_str("%m"),
            ('D', 2) => spec.push_str("%d"),
            ('H', 2) => spec.push_str("%H"),
            ('m', 2) => spec.push_str("%M"),
            ('s', 2) => spec.push_str("%S"),
            ('S', 3) => spec.push_str("%3f"),
            _ => {
                for _ in 0..run {
                    if current == '%' {
                        spec.push_str("%%");
                    } else {
                        spec.push(current);
                    }
                }
            }
        }

        i += run;
    }

    spec
}
