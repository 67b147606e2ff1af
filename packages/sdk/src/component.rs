use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProviderType {
    Databricks,
    Snowflake,
    BigQuery,
    ProphecyManaged,
}

impl ProviderType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Databricks => "databricks",
            Self::Snowflake => "snowflake",
            Self::BigQuery => "big-query",
            Self::ProphecyManaged => "prophecy-managed",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "databricks" => Some(Self::Databricks),
            "snowflake" => Some(Self::Snowflake),
            "big-query" => Some(Self::BigQuery),
            "prophecy-managed" => Some(Self::ProphecyManaged),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub source: String,
    pub target_port: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    #[serde(default)]
    pub nodes: BTreeMap<String, GraphNode>,
    #[serde(default)]
    pub connections: Vec<Connection>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SqlContext {
    #[serde(default)]
    pub graph: Graph,
}

/// `schema` is the raw document as the host serialized it, possibly with
/// single-quoted keys. Parse it through `parse_port_schema`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputPort {
    pub id: String,
    #[serde(default)]
    pub schema: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ports {
    #[serde(default)]
    pub inputs: Vec<InputPort>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component<P> {
    pub ports: Ports,
    pub properties: P,
}

impl<P> Component<P> {
    pub fn bind_properties(self, properties: P) -> Self {
        Self {
            ports: self.ports,
            properties,
        }
    }

    pub fn input_schema(&self, index: usize) -> &str {
        self.ports
            .inputs
            .get(index)
            .map(|port| port.schema.as_str())
            .unwrap_or("")
    }
}

/// One entry per input port, in port order. A port with no matching
/// connection, an unknown source node, or an unlabeled node yields `""`.
/// When several connections target the same port the last one wins.
pub fn relation_names<P>(component: &Component<P>, context: &SqlContext) -> Vec<String> {
    component
        .ports
        .inputs
        .iter()
        .map(|port| {
            let mut upstream = None;
            for connection in &context.graph.connections {
                if connection.target_port == port.id {
                    upstream = context.graph.nodes.get(&connection.source);
                }
            }
            upstream
                .and_then(|node| node.label.clone())
                .unwrap_or_default()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{relation_names, Component, Connection, Graph, GraphNode, InputPort, Ports, ProviderType, SqlContext};

    fn context_with(nodes: &[(&str, Option<&str>)], connections: &[(&str, &str)]) -> SqlContext {
        let mut graph = Graph::default();
        for (id, label) in nodes {
            graph.nodes.insert(
                (*id).to_string(),
                GraphNode {
                    label: label.map(str::to_string),
                },
            );
        }
        for (source, target_port) in connections {
            graph.connections.push(Connection {
                source: (*source).to_string(),
                target_port: (*target_port).to_string(),
            });
        }
        SqlContext { graph }
    }

    fn component_with_ports(ids: &[&str]) -> Component<()> {
        Component {
            ports: Ports {
                inputs: ids
                    .iter()
                    .map(|id| InputPort {
                        id: (*id).to_string(),
                        schema: String::new(),
                    })
                    .collect(),
            },
            properties: (),
        }
    }

    #[test]
    fn resolves_one_name_per_port_in_port_order() {
        let component = component_with_ports(&["in0", "in1"]);
        let context = context_with(
            &[("n1", Some("orders")), ("n2", Some("customers"))],
            &[("n1", "in0"), ("n2", "in1")],
        );

        assert_eq!(relation_names(&component, &context), vec!["orders", "customers"]);
    }

    #[test]
    fn unconnected_port_yields_empty_string() {
        let component = component_with_ports(&["in0", "in1"]);
        let context = context_with(&[("n1", Some("orders"))], &[("n1", "in0")]);

        assert_eq!(relation_names(&component, &context), vec!["orders", ""]);
    }

    #[test]
    fn unlabeled_node_yields_empty_string() {
        let component = component_with_ports(&["in0"]);
        let context = context_with(&[("n1", None)], &[("n1", "in0")]);

        assert_eq!(relation_names(&component, &context), vec![""]);
    }

    #[test]
    fn last_connection_targeting_a_port_wins() {
        let component = component_with_ports(&["in0"]);
        let context = context_with(
            &[("n1", Some("stale")), ("n2", Some("fresh"))],
            &[("n1", "in0"), ("n2", "in0")],
        );

        assert_eq!(relation_names(&component, &context), vec!["fresh"]);
    }

    #[test]
    fn provider_type_round_trips_through_str() {
        for provider in [
            ProviderType::Databricks,
            ProviderType::Snowflake,
            ProviderType::BigQuery,
            ProviderType::ProphecyManaged,
        ] {
            assert_eq!(ProviderType::from_str(provider.as_str()), Some(provider));
        }
        assert_eq!(ProviderType::from_str("duckdb"), None);
    }
}
