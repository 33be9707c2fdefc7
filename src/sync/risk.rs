use crate::schema::{Alert, RiskClass};

use super::types::ObjectKey;

/// First alert, in feed order, that names this object.
pub fn matching_alert(key: ObjectKey, alerts: &[Alert]) -> Option<&Alert> {
    alerts.iter().find(|alert| alert.matches(key.kind, key.id))
}

/// Risk class of the first matching alert, `Low` when nothing matches.
///
/// Later alerts for the same object are ignored even when they are more
/// severe.
pub fn resolve_risk(key: ObjectKey, alerts: &[Alert]) -> RiskClass {
    matching_alert(key, alerts)
        .map(|alert| alert.risk_class)
        .unwrap_or_default()
}
