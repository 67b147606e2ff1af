mod component;
mod diagnostic;
mod dialog;
mod error;
mod macro_call;
mod params;
pub mod rules;
mod schema;
mod spec;

pub use component::{
    relation_names, Component, Connection, Graph, GraphNode, InputPort, Ports, ProviderType,
    SqlContext,
};
pub use diagnostic::{Diagnostic, Severity};
pub use dialog::{Column, Dialog, Element, SelectOption};
pub use error::{ParameterError, SchemaError};
pub use macro_call::{macro_call, quoted};
pub use params::{
    display_list, nested_display_list, parse_display_list, parse_nested_display_list,
    MacroParameter, MacroProperties, ParameterMap,
};
pub use schema::{
    field_names, parse_port_schema, parse_snapshot, snapshot_json, type_lookup, SchemaField,
};
pub use spec::MacroSpec;
