use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("port schema is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("malformed port schema: {0}")]
    MalformedSchema(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParameterError {
    #[error("missing required parameter '{0}'")]
    Missing(String),

    #[error("parameter '{name}' is not a valid {expected}: '{value}'")]
    Invalid {
        name: String,
        expected: &'static str,
        value: String,
    },
}
