use crate::config::TailPolicy;
use crate::event::Envelope;
use std::collections::HashMap;

/// Buffers tail-eligible events per correlation id until the matching
/// response arrives.
///
/// Buffers are created on the first entry for an unseen id and removed
/// on flush. Ids whose response never arrives keep their buffer until
/// process end; the population is bounded by in-flight requests, not by
/// total request volume.
#[derive(Debug)]
pub struct TailCorrelator {
    policy: TailPolicy,
    buffers: HashMap<String, Vec<Envelope>>,
}

impl TailCorrelator {
    pub fn new(policy: TailPolicy) -> Self {
        Self {
            policy,
            buffers: HashMap::new(),
        }
    }

    /// Offer a non-response event. Returns true when the event was
    /// absorbed into a buffer and must not be rendered yet. With the
    /// `None` policy nothing is ever buffered, checked before any
    /// allocation.
    pub fn observe(&mut self, event: &Envelope) -> bool {
        if matches!(self.policy, TailPolicy::None) {
            return false;
        }
        if !event.tail_eligible() {
            return false;
        }
        let Some(id) = event.id.as_deref() else {
            return false;
        };

        self.buffers
            .entry(id.to_string())
            .or_default()
            .push(event.clone());
        true
    }

    /// Remove and return the entries for `id` that pass the tag filter,
    /// in arrival order. Unknown ids yield an empty flush.
    pub fn flush(&mut self, id: &str) -> Vec<Envelope> {
        let entries = self.buffers.remove(id).unwrap_or_default();

        match &self.policy {
            TailPolicy::None => Vec::new(),
            TailPolicy::All => entries,
            TailPolicy::Tags(wanted) => entries
                .into_iter()
                .filter(|e| e.tags.iter().any(|t| wanted.contains(t)))
                .collect(),
        }
    }

    pub fn pending_ids(&self) -> usize {
        self.buffers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn tail_event(id: &str, data: &str, tags: &[&str]) -> Envelope {
        Envelope::from_value(&json!({
            "event": "log",
            "timestamp": 1,
            "id": id,
            "tags": tags,
            "data": data
        }))
    }

    #[test]
    fn none_policy_never_buffers() {
        let mut correlator = TailCorrelator::new(TailPolicy::None);

        assert!(!correlator.observe(&tail_event("x", "a", &[])));
        assert_eq!(correlator.pending_ids(), 0);
        assert!(correlator.flush("x").is_empty());
    }

    #[test]
    fn all_policy_buffers_and_flushes_in_arrival_order() {
        let mut correlator = TailCorrelator::new(TailPolicy::All);

        assert!(correlator.observe(&tail_event("x", "a", &[])));
        assert!(correlator.observe(&tail_event("x", "b", &[])));
        assert!(correlator.observe(&tail_event("x", "c", &[])));

        let flushed = correlator.flush("x");
        let order: Vec<_> = flushed
            .iter()
            .map(|e| match &e.data {
                crate::event::DataField::Text(t) => t.clone(),
                _ => panic!("expected text data"),
            })
            .collect();

        assert_eq!(order, vec!["a", "b", "c"]);
        // buffer is gone after the flush
        assert_eq!(correlator.pending_ids(), 0);
        assert!(correlator.flush("x").is_empty());
    }

    #[test]
    fn concurrent_ids_keep_separate_buffers() {
        let mut correlator = TailCorrelator::new(TailPolicy::All);

        correlator.observe(&tail_event("x", "for-x", &[]));
        correlator.observe(&tail_event("y", "for-y", &[]));

        assert_eq!(correlator.flush("x").len(), 1);
        assert_eq!(correlator.flush("y").len(), 1);
    }

    #[test]
    fn tag_policy_filters_on_supplied_tags() {
        let mut correlator =
            TailCorrelator::new(TailPolicy::Tags(vec!["foo".to_string()]));

        correlator.observe(&tail_event("x", "a", &["bar"]));
        correlator.observe(&tail_event("x", "b", &["foo", "bar"]));
        correlator.observe(&tail_event("x", "c", &[]));

        let flushed = correlator.flush("x");

        assert_eq!(flushed.len(), 1);
        assert_eq!(flushed[0].tags, vec!["foo", "bar"]);
    }

    #[test]
    fn events_without_id_are_not_absorbed() {
        let mut correlator = TailCorrelator::new(TailPolicy::All);
        let event = Envelope::from_value(&json!({
            "event": "log", "timestamp": 1, "data": "a"
        }));

        assert!(!correlator.observe(&event));
        assert_eq!(correlator.pending_ids(), 0);
    }

    #[test]
    fn unknown_id_flushes_empty() {
        let mut correlator = TailCorrelator::new(TailPolicy::All);

        assert!(correlator.flush("never-seen").is_empty());
    }
}
