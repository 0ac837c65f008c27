//! Custom assertions for alert lists

use std::collections::BTreeSet;

use codeguard_analyzer::{Alert, AlertDetail, AlertKind};

pub fn kinds(alerts: &[Alert]) -> Vec<AlertKind> {
    alerts.iter().map(Alert::kind).collect()
}

pub fn count_kind(alerts: &[Alert], kind: AlertKind) -> usize {
    alerts.iter().filter(|alert| alert.kind() == kind).count()
}

/// Assert that no alert of `kind` is present
pub fn assert_no_kind(alerts: &[Alert], kind: AlertKind) {
    assert_eq!(
        count_kind(alerts, kind),
        0,
        "Expected no {kind} alerts, got: {:?}",
        alerts
    );
}

/// Names reported as unused, as a set
pub fn unused_names(alerts: &[Alert]) -> BTreeSet<String> {
    alerts
        .iter()
        .filter_map(|alert| match &alert.detail {
            AlertDetail::UnusedVariable { variable_name } => Some(variable_name.clone()),
            _ => None,
        })
        .collect()
}

/// Identifiers reported as containing Hebrew, in report order
pub fn hebrew_identifiers(alerts: &[Alert]) -> Vec<String> {
    alerts
        .iter()
        .filter_map(|alert| match &alert.detail {
            AlertDetail::NonLatinIdentifier { identifier, .. } => Some(identifier.clone()),
            _ => None,
        })
        .collect()
}

pub fn set(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|name| name.to_string()).collect()
}
