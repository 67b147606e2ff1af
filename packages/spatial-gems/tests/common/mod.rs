#![allow(dead_code)]

use gem_sdk::{
    Component, Connection, Diagnostic, Graph, GraphNode, InputPort, Ports, SqlContext,
};

/// Port schema in the host's single-quoted serialization.
pub fn single_quoted_schema(columns: &[(&str, &str)]) -> String {
    let fields = columns
        .iter()
        .map(|(name, data_type)| {
            format!("{{'name': '{name}', 'dataType': {{'type': '{data_type}'}}}}")
        })
        .collect::<Vec<_>>()
        .join(", ");
    format!("{{'fields': [{fields}]}}")
}

pub fn component<P>(ports: &[(&str, &str)], properties: P) -> Component<P> {
    Component {
        ports: Ports {
            inputs: ports
                .iter()
                .map(|(id, schema)| InputPort {
                    id: (*id).to_string(),
                    schema: (*schema).to_string(),
                })
                .collect(),
        },
        properties,
    }
}

/// Context whose graph connects labeled nodes to ports, one connection per
/// `(node_id, label, target_port)` triple.
pub fn context(upstream: &[(&str, &str, &str)]) -> SqlContext {
    let mut graph = Graph::default();
    for (node_id, label, target_port) in upstream {
        graph.nodes.insert(
            (*node_id).to_string(),
            GraphNode {
                label: Some((*label).to_string()),
            },
        );
        graph.connections.push(Connection {
            source: (*node_id).to_string(),
            target_port: (*target_port).to_string(),
        });
    }
    SqlContext { graph }
}

pub fn messages(diagnostics: &[Diagnostic]) -> Vec<&str> {
    diagnostics
        .iter()
        .map(|diagnostic| diagnostic.message.as_str())
        .collect()
}
