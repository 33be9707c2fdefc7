use std::collections::hash_map::Entry as MapEntry;
use std::collections::HashMap;

use crate::feed::MessageSink;
use crate::schema::{parse_record, InboundMessage, Vector3};

use super::adapter::RenderAdapter;
use super::risk::{matching_alert, resolve_risk};
use super::trail::{TrailBuffer, CAPACITY};
use super::types::{ObjectKey, ObjectUpdate, TrackedObject};

// Object and trail share one slot so neither can exist without the other.
#[derive(Debug)]
struct Entry {
    object: TrackedObject,
    trail: TrailBuffer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Created,
    Updated,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProcessReport {
    pub created: usize,
    pub updated: usize,
    pub skipped: usize,
}

impl ProcessReport {
    pub fn applied(&self) -> usize {
        self.created + self.updated
    }
}

/// Current state of every object seen on the feed.
///
/// Entries are never removed; an object that drops out of the feed keeps its
/// last known state.
pub struct Registry<A> {
    entries: HashMap<ObjectKey, Entry>,
    trail_capacity: usize,
    adapter: A,
}

impl<A: RenderAdapter> Registry<A> {
    #[allow(dead_code)]
    pub fn new(adapter: A) -> Self {
        Self::with_trail_capacity(adapter, CAPACITY)
    }

    pub fn with_trail_capacity(adapter: A, trail_capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            trail_capacity,
            adapter,
        }
    }

    pub fn upsert(&mut self, update: ObjectUpdate) -> Upsert {
        match self.entries.entry(update.key) {
            MapEntry::Occupied(mut slot) => {
                let entry = slot.get_mut();
                entry.object.name = update.name;
                entry.object.position = update.position;
                entry.object.risk_class = update.risk_class;
                entry.trail.append(update.position);
                self.adapter.on_object_updated(&entry.object, &entry.trail);
                Upsert::Updated
            }
            MapEntry::Vacant(slot) => {
                let entry = slot.insert(Entry {
                    object: TrackedObject {
                        kind: update.key.kind,
                        id: update.key.id,
                        name: update.name,
                        position: update.position,
                        risk_class: update.risk_class,
                    },
                    trail: TrailBuffer::with_capacity(self.trail_capacity),
                });
                entry.trail.append(update.position);
                self.adapter.on_object_created(&entry.object, &entry.trail);
                Upsert::Created
            }
        }
    }

    /// Applies every valid object record of `message`, in order.
    ///
    /// Invalid records are logged and skipped; the rest of the message is
    /// still applied.
    pub fn process_message(&mut self, message: &InboundMessage) -> ProcessReport {
        let mut report = ProcessReport::default();

        for (index, raw) in message.objects.iter().enumerate() {
            let record = match parse_record(index, raw) {
                Ok(record) => record,
                Err(e) => {
                    log::warn!("Skipping {}", e);
                    report.skipped += 1;
                    continue;
                }
            };

            let key = ObjectKey::new(record.kind, record.id);
            let risk_class = resolve_risk(key, &message.alerts);
            if log::log_enabled!(log::Level::Debug) {
                if let Some(alert) = matching_alert(key, &message.alerts) {
                    log::debug!(
                        "{} flagged {} (distance {:?} km, speed {:?} km/s, score {:?})",
                        key,
                        alert.risk_class,
                        alert.distance_km,
                        alert.speed_km_s,
                        alert.risk_score
                    );
                }
            }

            let update = ObjectUpdate {
                key,
                position: record.position(),
                name: record.name.unwrap_or_else(|| key.to_string()),
                risk_class,
            };
            match self.upsert(update) {
                Upsert::Created => report.created += 1,
                Upsert::Updated => report.updated += 1,
            }
        }

        log::debug!(
            "Applied message at {:?}: {} created, {} updated, {} skipped",
            message.timestamp,
            report.created,
            report.updated,
            report.skipped
        );
        report
    }

    #[allow(dead_code)]
    pub fn get(&self, key: &ObjectKey) -> Option<&TrackedObject> {
        self.entries.get(key).map(|entry| &entry.object)
    }

    pub fn trail(&self, key: &ObjectKey) -> Option<&TrailBuffer> {
        self.entries.get(key).map(|entry| &entry.trail)
    }

    #[allow(dead_code)]
    pub fn trail_snapshot(&self, key: &ObjectKey) -> Option<Vec<Vector3>> {
        self.trail(key).map(TrailBuffer::snapshot)
    }

    /// All objects with their trails, ordered by key.
    pub fn objects(&self) -> Vec<(&TrackedObject, &TrailBuffer)> {
        let mut objects: Vec<_> = self
            .entries
            .values()
            .map(|entry| (&entry.object, &entry.trail))
            .collect();
        objects.sort_by_key(|(object, _)| object.key());
        objects
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }
}

impl<A: RenderAdapter> MessageSink for Registry<A> {
    fn deliver(&mut self, message: InboundMessage) {
        self.process_message(&message);
    }
}
