use std::collections::HashMap;
use std::sync::OnceLock;

use jsonschema::JSONSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::SchemaError;

static PORT_SCHEMA_DOCUMENT: OnceLock<JsonValue> = OnceLock::new();
static PORT_SCHEMA_VALIDATOR: OnceLock<Result<JSONSchema, String>> = OnceLock::new();

/// One column of an upstream relation, with `dataType` flattened to its
/// type name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaField {
    pub name: String,
    #[serde(rename = "dataType")]
    pub data_type: String,
}

impl SchemaField {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawSchema {
    fields: Vec<RawField>,
}

#[derive(Debug, Deserialize)]
struct RawField {
    name: String,
    #[serde(rename = "dataType")]
    data_type: RawDataType,
}

#[derive(Debug, Deserialize)]
struct RawDataType {
    #[serde(rename = "type")]
    kind: String,
}

/// Parse a host-serialized port schema into its column list.
///
/// The host may serialize the document with single-quoted keys; quoting is
/// normalized before parsing. A literal quote inside a name corrupts the
/// document — the upstream serializer never produces one.
pub fn parse_port_schema(raw: &str) -> Result<Vec<SchemaField>, SchemaError> {
    let normalized = raw.replace('\'', "\"");
    let document: JsonValue = serde_json::from_str(&normalized)?;

    let validator = port_schema_validator()?;
    if let Err(errors) = validator.validate(&document) {
        return Err(SchemaError::MalformedSchema(format_validation_errors(
            errors,
        )));
    }

    let schema: RawSchema = serde_json::from_value(document).map_err(|error| {
        SchemaError::MalformedSchema(format!(
            "port schema does not match expected shape: {error}"
        ))
    })?;

    Ok(schema
        .fields
        .into_iter()
        .map(|field| SchemaField {
            name: field.name,
            data_type: field.data_type.kind,
        })
        .collect())
}

/// Compact JSON blob of a schema snapshot, the form embedded into macro
/// arguments and persisted parameters.
pub fn snapshot_json(fields: &[SchemaField]) -> String {
    serde_json::to_string(fields).expect("schema snapshot must serialize")
}

/// Inverse of `snapshot_json`.
pub fn parse_snapshot(raw: &str) -> Result<Vec<SchemaField>, SchemaError> {
    Ok(serde_json::from_str(raw)?)
}

pub fn field_names(fields: &[SchemaField]) -> Vec<String> {
    fields.iter().map(|field| field.name.clone()).collect()
}

/// Column name to lowercase type name.
pub fn type_lookup(fields: &[SchemaField]) -> HashMap<String, String> {
    fields
        .iter()
        .map(|field| (field.name.clone(), field.data_type.to_lowercase()))
        .collect()
}

fn port_schema_document() -> &'static JsonValue {
    PORT_SCHEMA_DOCUMENT.get_or_init(|| {
        let raw = include_str!("port_schema.schema.json");
        serde_json::from_str(raw).expect("port_schema.schema.json must be valid JSON")
    })
}

fn port_schema_validator() -> Result<&'static JSONSchema, SchemaError> {
    let result = PORT_SCHEMA_VALIDATOR.get_or_init(|| {
        JSONSchema::compile(port_schema_document())
            .map_err(|error| format!("failed to compile port schema document: {error}"))
    });

    match result {
        Ok(schema) => Ok(schema),
        Err(message) => Err(SchemaError::MalformedSchema(message.clone())),
    }
}

fn format_validation_errors<'a>(
    errors: impl Iterator<Item = jsonschema::ValidationError<'a>>,
) -> String {
    let mut parts = Vec::new();
    for error in errors {
        let path = error.instance_path.to_string();
        let message = error.to_string();
        if path.is_empty() {
            parts.push(message);
        } else {
            parts.push(format!("{path} {message}"));
        }
    }
    if parts.is_empty() {
        "unknown validation error".to_string()
    } else {
        parts.join("; ")
    }
}
