use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use super::error::{FrameError, RecordError};
use super::types::{Alert, InboundMessage, ObjectId, ObjectKind, ObjectRecord, RiskClass};

#[derive(Debug, Deserialize)]
struct WireMessage {
    #[serde(default)]
    timestamp: Option<Value>,
    objects: Vec<Value>,
    #[serde(default)]
    alerts: Option<Vec<Value>>,
}

/// Alerts are emitted per satellite/debris conjunction, so one entry can
/// name a subject of each kind.
#[derive(Debug, Deserialize)]
struct WireAlert {
    #[serde(default)]
    sat_id: Option<ObjectId>,
    #[serde(default)]
    debris_id: Option<ObjectId>,
    risk_class: RiskClass,
    // Metadata only; a value of the wrong type is dropped, not the alert.
    #[serde(default)]
    distance: Option<Value>,
    #[serde(default)]
    speed: Option<Value>,
    #[serde(default)]
    risk_score: Option<Value>,
}

fn number(value: Option<&Value>) -> Option<f64> {
    value.and_then(Value::as_f64)
}

impl WireAlert {
    fn into_alerts(self) -> impl Iterator<Item = Alert> {
        let subjects = [
            self.sat_id.map(|id| (ObjectKind::Satellite, id)),
            self.debris_id.map(|id| (ObjectKind::Debris, id)),
        ];
        let risk_class = self.risk_class;
        let distance_km = number(self.distance.as_ref());
        let speed_km_s = number(self.speed.as_ref());
        let risk_score = number(self.risk_score.as_ref());
        subjects.into_iter().flatten().map(move |(kind, id)| Alert {
            subject_kind: kind,
            subject_id: id,
            risk_class,
            distance_km,
            speed_km_s,
            risk_score,
        })
    }
}

pub fn parse_frame(payload: &[u8]) -> Result<InboundMessage, FrameError> {
    if payload.iter().all(|b| b.is_ascii_whitespace()) {
        return Err(FrameError::Empty);
    }

    let wire: WireMessage = serde_json::from_slice(payload)?;

    let timestamp = wire
        .timestamp
        .as_ref()
        .and_then(Value::as_str)
        .and_then(parse_timestamp);

    let mut alerts = Vec::new();
    for (index, raw) in wire.alerts.unwrap_or_default().iter().enumerate() {
        match WireAlert::deserialize(raw) {
            Ok(alert) => alerts.extend(alert.into_alerts()),
            Err(e) => log::debug!("Ignoring alert {}: {}", index, e),
        }
    }

    Ok(InboundMessage {
        timestamp,
        objects: wire.objects,
        alerts,
    })
}

pub fn parse_record(index: usize, raw: &Value) -> Result<ObjectRecord, RecordError> {
    ObjectRecord::deserialize(raw).map_err(|source| RecordError::Invalid { index, source })
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Vector3;
    use chrono::Timelike;

    #[test]
    fn parses_feed_message() {
        let frame = br#"{
            "timestamp": "2025-03-01T12:30:05.250000Z",
            "objects": [
                {"id": 1, "name": "ISS", "type": "satellite", "x": 6800.5, "y": -12.0, "z": 3.25,
                 "vx": 1.0, "vy": 7.5, "vz": 0.1},
                {"id": 9, "name": "FRAG", "type": "debris", "x": 7000, "y": 0, "z": 0}
            ],
            "alerts": [
                {"sat_id": 1, "debris_id": 9, "distance": 12.5, "speed": 3.1,
                 "risk_score": 81, "risk_class": "HIGH"}
            ]
        }"#;

        let message = parse_frame(frame).unwrap();
        let timestamp = message.timestamp.unwrap();
        assert_eq!(timestamp.hour(), 12);
        assert_eq!(timestamp.second(), 5);
        assert_eq!(message.objects.len(), 2);

        let first = parse_record(0, &message.objects[0]).unwrap();
        assert_eq!(first.kind, ObjectKind::Satellite);
        assert_eq!(first.id, ObjectId(1));
        assert_eq!(first.name.as_deref(), Some("ISS"));
        assert_eq!(first.position(), Vector3::new(6800.5, -12.0, 3.25));

        let second = parse_record(1, &message.objects[1]).unwrap();
        assert_eq!(second.kind, ObjectKind::Debris);

        assert_eq!(message.alerts.len(), 2);
        assert_eq!(message.alerts[0].subject_kind, ObjectKind::Satellite);
        assert_eq!(message.alerts[0].subject_id, ObjectId(1));
        assert_eq!(message.alerts[1].subject_kind, ObjectKind::Debris);
        assert_eq!(message.alerts[1].subject_id, ObjectId(9));
        assert_eq!(message.alerts[1].risk_class, RiskClass::High);
        assert_eq!(message.alerts[1].distance_km, Some(12.5));
        assert_eq!(message.alerts[1].risk_score, Some(81.0));
    }

    #[test]
    fn alerts_are_optional() {
        let absent = parse_frame(br#"{"objects": []}"#).unwrap();
        assert!(absent.alerts.is_empty());
        assert!(absent.timestamp.is_none());

        let null = parse_frame(br#"{"objects": [], "alerts": null}"#).unwrap();
        assert!(null.alerts.is_empty());
    }

    #[test]
    fn rejects_malformed_frames() {
        assert!(matches!(parse_frame(b""), Err(FrameError::Empty)));
        assert!(matches!(parse_frame(b"  \n"), Err(FrameError::Empty)));
        assert!(matches!(parse_frame(b"not json"), Err(FrameError::Json(_))));
        assert!(matches!(parse_frame(b"[1, 2, 3]"), Err(FrameError::Json(_))));
        assert!(matches!(
            parse_frame(br#"{"alerts": []}"#),
            Err(FrameError::Json(_))
        ));
        assert!(matches!(
            parse_frame(br#"{"objects": {"id": 1}}"#),
            Err(FrameError::Json(_))
        ));
    }

    #[test]
    fn bad_alert_entries_are_dropped() {
        let message = parse_frame(
            br#"{"objects": [], "alerts": [
                {"sat_id": 3, "risk_class": "SEVERE"},
                {"sat_id": 4},
                {"risk_class": "HIGH"},
                {"debris_id": 5, "risk_class": "MEDIUM"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(
            message.alerts,
            vec![Alert::new(ObjectKind::Debris, ObjectId(5), RiskClass::Medium)]
        );
    }

    #[test]
    fn bad_alert_metadata_keeps_alert() {
        let message = parse_frame(
            br#"{"objects": [], "alerts": [
                {"sat_id": 2, "debris_id": 9, "distance": "12.5", "speed": null,
                 "risk_score": [1], "risk_class": "HIGH"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(
            message.alerts,
            vec![
                Alert::new(ObjectKind::Satellite, ObjectId(2), RiskClass::High),
                Alert::new(ObjectKind::Debris, ObjectId(9), RiskClass::High),
            ]
        );
    }

    #[test]
    fn velocity_does_not_decide_validity() {
        let raw: Value = serde_json::from_str(
            r#"{"type": "satellite", "id": 1, "x": 7000, "y": 0, "z": 0,
                "vx": "n/a", "vy": null, "vz": {"km_s": 7.5}}"#,
        )
        .unwrap();
        let record = parse_record(0, &raw).unwrap();
        assert_eq!(record.position(), Vector3::new(7000.0, 0.0, 0.0));
    }

    #[test]
    fn unparseable_timestamp_is_dropped() {
        let message = parse_frame(br#"{"timestamp": "yesterday", "objects": []}"#).unwrap();
        assert!(message.timestamp.is_none());

        let numeric = parse_frame(br#"{"timestamp": 1700000000, "objects": []}"#).unwrap();
        assert!(numeric.timestamp.is_none());
    }

    #[test]
    fn record_errors_carry_index() {
        let raw: Value =
            serde_json::from_str(r#"{"type": "satellite", "id": 2, "x": "abc", "y": 0, "z": 0}"#)
                .unwrap();
        let err = parse_record(4, &raw).unwrap_err();
        assert!(err.to_string().starts_with("object record 4:"));

        let unknown_type: Value =
            serde_json::from_str(r#"{"type": "rocket", "id": 2, "x": 1, "y": 0, "z": 0}"#)
                .unwrap();
        assert!(parse_record(0, &unknown_type).is_err());

        let missing_z: Value =
            serde_json::from_str(r#"{"type": "debris", "id": 2, "x": 1, "y": 0}"#).unwrap();
        assert!(parse_record(0, &missing_z).is_err());
    }

    #[test]
    fn name_is_optional() {
        let raw: Value =
            serde_json::from_str(r#"{"type": "debris", "id": 7, "x": 1, "y": 2, "z": 3}"#).unwrap();
        let record = parse_record(0, &raw).unwrap();
        assert_eq!(record.name, None);
    }
}
