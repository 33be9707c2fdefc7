use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::Display;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ObjectKind {
    Satellite,
    Debris,
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Deserialize,
    Serialize,
    Display,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum RiskClass {
    #[default]
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ObjectId(pub u64);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Earth-centered inertial coordinates, in kilometers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn norm(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1}, {:.1}) km", self.x, self.y, self.z)
    }
}

/// One validated entry of a message's `objects` array.
///
/// Fields other than these (velocity among them) are ignored and never make a
/// record invalid.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ObjectRecord {
    #[serde(rename = "type")]
    pub kind: ObjectKind,
    pub id: ObjectId,
    #[serde(default)]
    pub name: Option<String>,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl ObjectRecord {
    pub fn position(&self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }
}

/// Risk classification attached to a single tracked object.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub subject_kind: ObjectKind,
    pub subject_id: ObjectId,
    pub risk_class: RiskClass,
    pub distance_km: Option<f64>,
    pub speed_km_s: Option<f64>,
    pub risk_score: Option<f64>,
}

impl Alert {
    #[allow(dead_code)]
    pub fn new(subject_kind: ObjectKind, subject_id: ObjectId, risk_class: RiskClass) -> Self {
        Self {
            subject_kind,
            subject_id,
            risk_class,
            distance_km: None,
            speed_km_s: None,
            risk_score: None,
        }
    }

    pub fn matches(&self, kind: ObjectKind, id: ObjectId) -> bool {
        self.subject_kind == kind && self.subject_id == id
    }
}

/// A parsed feed frame.
///
/// Object records stay as raw JSON here and are validated one at a time by
/// the registry, so a single bad record does not discard the whole frame.
#[derive(Debug, Clone, Default)]
pub struct InboundMessage {
    pub timestamp: Option<DateTime<Utc>>,
    pub objects: Vec<serde_json::Value>,
    pub alerts: Vec<Alert>,
}
