use gem_sdk::{
    display_list, macro_call, parse_port_schema, quoted, relation_names, snapshot_json, Column,
    Component, Dialog, Element, MacroParameter, MacroProperties, MacroSpec, ParameterError,
    ParameterMap, ProviderType, SchemaError, SqlContext,
};
use serde::{Deserialize, Serialize};

use crate::DATABRICKS_PREVIEW_NOTE;

/// Computes a buffer polygon of the given radius around each geometry.
pub struct Buffer;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BufferProperties {
    pub relation_name: Vec<String>,
    pub schema: String,
    pub distance: i64,
    pub unit: String,
    pub geometry_column_name: String,
}

impl Default for BufferProperties {
    fn default() -> Self {
        Self {
            relation_name: Vec::new(),
            schema: String::new(),
            distance: 1,
            unit: "miles".to_string(),
            geometry_column_name: String::new(),
        }
    }
}

impl Buffer {
    fn refresh(
        &self,
        context: &SqlContext,
        component: Component<BufferProperties>,
    ) -> Result<Component<BufferProperties>, SchemaError> {
        let fields = parse_port_schema(component.input_schema(0))?;
        let properties = BufferProperties {
            schema: snapshot_json(&fields),
            relation_name: relation_names(&component, context),
            ..component.properties.clone()
        };
        Ok(component.bind_properties(properties))
    }
}

impl MacroSpec for Buffer {
    type Properties = BufferProperties;

    fn name(&self) -> &'static str {
        "Buffer"
    }

    fn supported_providers(&self) -> &'static [ProviderType] {
        &[ProviderType::Databricks]
    }

    fn dialog(&self) -> Dialog {
        Dialog::new("Buffer").with_element(Element::columns_layout(
            Some("1rem"),
            Some("100%"),
            vec![
                Column::sized("content", vec![Element::ports_with_add_or_delete()]),
                Column::new(vec![Element::stack_layout(
                    None,
                    None,
                    vec![
                        Element::alert("warning", DATABRICKS_PREVIEW_NOTE),
                        Element::schema_columns_dropdown(
                            "Geometry column",
                            "component.ports.inputs[0].schema",
                            "geometryColumnName",
                        ),
                        Element::number_box("Distance", "distance", Some("10"), None, None),
                        Element::select_box(
                            "Units",
                            "unit",
                            &[("Miles", "miles"), ("Kilometers", "kms")],
                        ),
                    ],
                )]),
            ],
        ))
    }

    fn on_change(
        &self,
        context: &SqlContext,
        _old_state: &Component<BufferProperties>,
        new_state: Component<BufferProperties>,
    ) -> Result<Component<BufferProperties>, SchemaError> {
        self.refresh(context, new_state)
    }

    fn update_input_port_slug(
        &self,
        context: &SqlContext,
        component: Component<BufferProperties>,
    ) -> Result<Component<BufferProperties>, SchemaError> {
        self.refresh(context, component)
    }

    fn apply(&self, properties: &BufferProperties) -> String {
        let table_name = properties.relation_name.join(",");
        let arguments = vec![
            quoted(&table_name),
            properties.schema.clone(),
            quoted(&properties.geometry_column_name),
            properties.distance.to_string(),
            quoted(&properties.unit),
        ];
        macro_call(self.project_name(), self.name(), &arguments)
    }

    fn load_properties(
        &self,
        properties: &MacroProperties,
    ) -> Result<BufferProperties, ParameterError> {
        let parameters = ParameterMap::from_parameters(&properties.parameters);
        Ok(BufferProperties {
            relation_name: parameters.string_list("relation_name")?,
            schema: parameters.string("schema")?,
            // The geometry column has always been persisted under this name;
            // changing it would orphan existing saved pipelines.
            geometry_column_name: parameters.string("destinationColumnNames")?,
            distance: parameters.int("distance")?,
            unit: parameters.string("unit")?,
        })
    }

    fn unload_properties(&self, properties: &BufferProperties) -> MacroProperties {
        MacroProperties {
            macro_name: self.name().to_string(),
            project_name: self.project_name().to_string(),
            parameters: vec![
                MacroParameter::new("relation_name", display_list(&properties.relation_name)),
                MacroParameter::new("schema", properties.schema.clone()),
                MacroParameter::new(
                    "destinationColumnNames",
                    properties.geometry_column_name.clone(),
                ),
                MacroParameter::new("distance", properties.distance.to_string()),
                MacroParameter::new("unit", properties.unit.clone()),
            ],
        }
    }
}
