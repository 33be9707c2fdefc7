use serde::Serialize;
use std::fmt;

use crate::schema::{ObjectId, ObjectKind, RiskClass, Vector3};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectKey {
    pub kind: ObjectKind,
    pub id: ObjectId,
}

impl ObjectKey {
    pub fn new(kind: ObjectKind, id: ObjectId) -> Self {
        Self { kind, id }
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.kind, self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackedObject {
    #[serde(rename = "type")]
    pub kind: ObjectKind,
    pub id: ObjectId,
    pub name: String,
    pub position: Vector3,
    pub risk_class: RiskClass,
}

impl TrackedObject {
    pub fn key(&self) -> ObjectKey {
        ObjectKey::new(self.kind, self.id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectUpdate {
    pub key: ObjectKey,
    pub name: String,
    pub position: Vector3,
    pub risk_class: RiskClass,
}
