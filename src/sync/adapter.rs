use std::collections::HashMap;

use crate::schema::RiskClass;

use super::trail::TrailBuffer;
use super::types::{ObjectKey, TrackedObject};

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Consumer of registry state changes, typically a scene renderer.
///
/// Notifications arrive after the object state and its trail have both been
/// updated, so `trail.latest()` is always `object.position`.
pub trait RenderAdapter {
    fn on_object_created(&mut self, object: &TrackedObject, trail: &TrailBuffer);
    fn on_object_updated(&mut self, object: &TrackedObject, trail: &TrailBuffer);
}

/// Reports registry changes through the log.
#[derive(Debug, Default)]
pub struct LogAdapter {
    risk: HashMap<ObjectKey, RiskClass>,
    created: u64,
    updated: u64,
}

impl LogAdapter {
    pub fn created(&self) -> u64 {
        self.created
    }

    pub fn updated(&self) -> u64 {
        self.updated
    }
}

impl RenderAdapter for LogAdapter {
    fn on_object_created(&mut self, object: &TrackedObject, _trail: &TrailBuffer) {
        self.created += 1;
        self.risk.insert(object.key(), object.risk_class);
        log::info!(
            "Tracking {} {} ({}) risk={} altitude={:.0} km",
            object.kind,
            object.id,
            object.name,
            object.risk_class,
            object.position.norm() - EARTH_RADIUS_KM
        );
    }

    fn on_object_updated(&mut self, object: &TrackedObject, trail: &TrailBuffer) {
        self.updated += 1;
        let previous = self.risk.insert(object.key(), object.risk_class);
        if previous != Some(object.risk_class) {
            log::info!(
                "{} risk {} -> {}",
                object.key(),
                previous.unwrap_or_default(),
                object.risk_class
            );
        }
        log::debug!(
            "{} at {} (trail {}/{})",
            object.key(),
            object.position,
            trail.len(),
            trail.capacity()
        );
    }
}
