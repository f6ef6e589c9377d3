use crate::compose::compose;
use crate::config::Settings;
use crate::event::{Envelope, Payload};
use crate::render;
use crate::tail::TailCorrelator;
use crate::timefmt::TimeFormatter;
use serde_json::Value;
use std::io::{BufRead, Write};

/// The formatting transform: one raw record in, zero or more rendered
/// lines out, strictly in processing order.
pub struct Reporter {
    settings: Settings,
    time: TimeFormatter,
    tails: TailCorrelator,
}

impl Reporter {
    pub fn new(settings: Settings) -> Self {
        let time = TimeFormatter::new(&settings.format, settings.utc);
        let tails = TailCorrelator::new(settings.tail.clone());

        Self {
            settings,
            time,
            tails,
        }
    }

    pub fn process(&mut self, record: &Value) -> Vec<String> {
        let event = Envelope::from_value(record);

        if event.is_response() {
            return self.process_response(&event);
        }

        if self.tails.observe(&event) {
            return Vec::new();
        }

        vec![self.direct_line(&event)]
    }

    /// Tail lines first, then the response's own line.
    fn process_response(&mut self, event: &Envelope) -> Vec<String> {
        let mut lines = Vec::new();

        if let Some(id) = event.id.as_deref() {
            let flushed = self.tails.flush(id);
            for tail in &flushed {
                lines.push(self.tail_line(tail));
            }
        }

        lines.push(self.direct_line(event));
        lines
    }

    fn direct_line(&self, event: &Envelope) -> String {
        let payload = render::render(event, &self.settings);

        // the generic rule is the only one that shows the correlation id
        let id = match event.payload {
            Payload::Generic => event.id.as_deref(),
            _ => None,
        };

        self.compose_line(event, id, &payload)
    }

    /// Flushed tail entries render through the generic data rule
    /// whatever their original kind, and always carry their id.
    fn tail_line(&self, event: &Envelope) -> String {
        let payload = render::data_text(&event.data);

        self.compose_line(event, event.id.as_deref(), &payload)
    }

    fn compose_line(&self, event: &Envelope, id: Option<&str>, payload: &str) -> String {
        let mut tags = Vec::with_capacity(event.tags.len() + 1);
        tags.push(event.kind.clone());
        tags.extend(event.tags.iter().cloned());

        compose(&self.time, event.timestamp_ms, &tags, id, payload)
    }
}

/// Drive a whole stream: each input line that parses as a JSON object
/// is processed; anything else passes through unchanged. Tail buffers
/// still pending at end-of-stream are discarded.
pub fn run_stream<R: BufRead, W: Write>(
    reader: R,
    mut writer: W,
    reporter: &mut Reporter,
) -> std::io::Result<()> {
    for line in reader.lines() {
        let line = line?;

        let Ok(record) = serde_json::from_str::<Value>(&line) else {
            writeln!(writer, "{line}")?;
            continue;
        };

        if !record.is_object() {
            writeln!(writer, "{line}")?;
            continue;
        }

        for rendered in reporter.process(&record) {
            writer.write_all(rendered.as_bytes())?;
        }
    }

    writer.flush()
}
