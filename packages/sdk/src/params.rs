use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::ParameterError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroParameter {
    pub name: String,
    pub value: String,
}

impl MacroParameter {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// The durable representation of a gem's configuration: macro identity plus
/// an ordered parameter list whose values are always strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MacroProperties {
    pub macro_name: String,
    pub project_name: String,
    pub parameters: Vec<MacroParameter>,
}

/// Name-indexed view over a parameter list with typed lookups. A duplicated
/// name resolves to its last occurrence.
#[derive(Debug, Default)]
pub struct ParameterMap {
    values: HashMap<String, String>,
}

impl ParameterMap {
    pub fn from_parameters(parameters: &[MacroParameter]) -> Self {
        let mut values = HashMap::new();
        for parameter in parameters {
            values.insert(parameter.name.clone(), parameter.value.clone());
        }
        Self { values }
    }

    pub fn string(&self, name: &str) -> Result<String, ParameterError> {
        self.values
            .get(name)
            .cloned()
            .ok_or_else(|| ParameterError::Missing(name.to_string()))
    }

    pub fn int(&self, name: &str) -> Result<i64, ParameterError> {
        let value = self.string(name)?;
        value.parse().map_err(|_| ParameterError::Invalid {
            name: name.to_string(),
            expected: "integer",
            value,
        })
    }

    pub fn float(&self, name: &str) -> Result<f64, ParameterError> {
        let value = self.string(name)?;
        value.parse().map_err(|_| ParameterError::Invalid {
            name: name.to_string(),
            expected: "float",
            value,
        })
    }

    pub fn bool(&self, name: &str) -> Result<bool, ParameterError> {
        Ok(self.string(name)?.to_lowercase() == "true")
    }

    pub fn string_list(&self, name: &str) -> Result<Vec<String>, ParameterError> {
        Ok(parse_display_list(&self.string(name)?))
    }

    pub fn nested_string_list(&self, name: &str) -> Result<Vec<Vec<String>>, ParameterError> {
        Ok(parse_nested_display_list(&self.string(name)?))
    }
}

/// Display-string form of a string list: `['a', 'b']`. This is both the
/// persisted parameter encoding and the list-literal form embedded into
/// macro arguments.
pub fn display_list(items: &[String]) -> String {
    let inner = items
        .iter()
        .map(|item| format!("'{item}'"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{inner}]")
}

/// Display-string form of a list of string lists: `[['a', 'b'], ['c']]`.
pub fn nested_display_list(groups: &[Vec<String>]) -> String {
    let inner = groups
        .iter()
        .map(|group| display_list(group))
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{inner}]")
}

/// Inverse of `display_list`. Items containing a literal quote or comma are
/// not recoverable, matching the formatter's own limitation.
pub fn parse_display_list(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    let Some(inner) = trimmed
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
    else {
        return Vec::new();
    };
    parse_display_items(inner)
}

/// Inverse of `nested_display_list`.
pub fn parse_nested_display_list(raw: &str) -> Vec<Vec<String>> {
    let trimmed = raw.trim();
    let Some(mut rest) = trimmed
        .strip_prefix('[')
        .and_then(|inner| inner.strip_suffix(']'))
    else {
        return Vec::new();
    };

    let mut groups = Vec::new();
    while let Some(start) = rest.find('[') {
        let Some(length) = rest[start + 1..].find(']') else {
            break;
        };
        groups.push(parse_display_items(&rest[start + 1..start + 1 + length]));
        rest = &rest[start + 1 + length + 1..];
    }
    groups
}

fn parse_display_items(inner: &str) -> Vec<String> {
    let inner = inner.trim();
    if inner.is_empty() {
        return Vec::new();
    }
    inner
        .split(',')
        .map(|item| item.trim().trim_matches('\'').to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{
        display_list, nested_display_list, parse_display_list, parse_nested_display_list,
        MacroParameter, ParameterMap,
    };
    use crate::ParameterError;

    fn map(entries: &[(&str, &str)]) -> ParameterMap {
        let parameters: Vec<MacroParameter> = entries
            .iter()
            .map(|(name, value)| MacroParameter::new(*name, *value))
            .collect();
        ParameterMap::from_parameters(&parameters)
    }

    #[test]
    fn missing_parameter_fails_loudly() {
        let parameters = map(&[("unit", "miles")]);

        assert_eq!(
            parameters.string("distance"),
            Err(ParameterError::Missing("distance".to_string()))
        );
    }

    #[test]
    fn typed_lookups_parse_stored_strings() {
        let parameters = map(&[
            ("distance", "5"),
            ("tolerance", "1.5"),
            ("outputDistance", "true"),
            ("outputCardDirection", "False"),
        ]);

        assert_eq!(parameters.int("distance"), Ok(5));
        assert_eq!(parameters.float("tolerance"), Ok(1.5));
        assert_eq!(parameters.bool("outputDistance"), Ok(true));
        assert_eq!(parameters.bool("outputCardDirection"), Ok(false));
    }

    #[test]
    fn non_numeric_int_is_invalid() {
        let parameters = map(&[("distance", "five")]);

        assert_eq!(
            parameters.int("distance"),
            Err(ParameterError::Invalid {
                name: "distance".to_string(),
                expected: "integer",
                value: "five".to_string(),
            })
        );
    }

    #[test]
    fn display_list_round_trips() {
        let items = vec!["orders".to_string(), "customers".to_string()];

        let rendered = display_list(&items);

        assert_eq!(rendered, "['orders', 'customers']");
        assert_eq!(parse_display_list(&rendered), items);
    }

    #[test]
    fn empty_display_list_round_trips() {
        assert_eq!(display_list(&[]), "[]");
        assert_eq!(parse_display_list("[]"), Vec::<String>::new());
    }

    #[test]
    fn nested_display_list_round_trips() {
        let groups = vec![
            vec!["lon".to_string(), "lat".to_string(), "point".to_string()],
            vec!["x".to_string()],
        ];

        let rendered = nested_display_list(&groups);

        assert_eq!(rendered, "[['lon', 'lat', 'point'], ['x']]");
        assert_eq!(parse_nested_display_list(&rendered), groups);
    }

    #[test]
    fn string_list_lookup_parses_display_form() {
        let parameters = map(&[("relation_name", "['orders']")]);

        assert_eq!(
            parameters.string_list("relation_name"),
            Ok(vec!["orders".to_string()])
        );
    }
}
