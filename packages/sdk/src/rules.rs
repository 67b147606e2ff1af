//! Validation rule helpers shared by every gem. Each returns `Some` with an
//! Error diagnostic when the rule is violated; rules never fail and never
//! short-circuit each other.

use std::collections::HashMap;

use crate::Diagnostic;

pub fn required_string(path: &str, value: &str, message: &str) -> Option<Diagnostic> {
    if value.is_empty() {
        Some(Diagnostic::error(path, message))
    } else {
        None
    }
}

pub fn required_list<T>(path: &str, items: &[T], message: &str) -> Option<Diagnostic> {
    if items.is_empty() {
        Some(Diagnostic::error(path, message))
    } else {
        None
    }
}

/// Checks a selected column against the current schema snapshot. Skipped for
/// an empty selection — emptiness is the required-field rule's concern.
/// `label` reads as "Selected {label} {column} is not present in input
/// schema.", so pass e.g. `"column"` or `"longitude column"`.
pub fn column_in_schema(
    path: &str,
    label: &str,
    column: &str,
    field_names: &[String],
) -> Option<Diagnostic> {
    if column.is_empty() || field_names.iter().any(|name| name == column) {
        return None;
    }
    Some(Diagnostic::error(
        path,
        format!("Selected {label} {column} is not present in input schema."),
    ))
}

/// Fires when a non-empty selection does not resolve to one of the allowed
/// numeric type names. An unknown column counts as non-numeric, matching the
/// original lookup-with-default behavior.
pub fn numeric_column(
    path: &str,
    column: &str,
    types: &HashMap<String, String>,
    allowed: &[&str],
    message: &str,
) -> Option<Diagnostic> {
    if column.is_empty() {
        return None;
    }
    let resolved = types.get(column).map(String::as_str).unwrap_or("");
    if allowed.contains(&resolved) {
        None
    } else {
        Some(Diagnostic::error(path, message))
    }
}

pub fn at_least_one(path: &str, flags: &[bool], message: &str) -> Option<Diagnostic> {
    if flags.iter().any(|flag| *flag) {
        None
    } else {
        Some(Diagnostic::error(path, message))
    }
}

pub fn float_literal(
    path: &str,
    value: &str,
    empty_message: &str,
    parse_message: &str,
) -> Option<Diagnostic> {
    if value.trim().is_empty() {
        Some(Diagnostic::error(path, empty_message))
    } else if value.trim().parse::<f64>().is_err() {
        Some(Diagnostic::error(path, parse_message))
    } else {
        None
    }
}
