use gem_sdk::{
    display_list, macro_call, parse_port_schema, quoted, relation_names, rules, snapshot_json,
    Column, Component, Diagnostic, Dialog, Element, MacroParameter, MacroProperties, MacroSpec,
    ParameterError, ParameterMap, ProviderType, SchemaError, SqlContext,
};
use serde::{Deserialize, Serialize};

use crate::DATABRICKS_PREVIEW_NOTE;

/// Reduces geometry vertex counts within a tolerance.
pub struct Simplify;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimplifyProperties {
    pub relation_name: Vec<String>,
    pub schema: String,
    pub tolerance: String,
    pub unit: String,
    pub geom_column_name: String,
}

impl Default for SimplifyProperties {
    fn default() -> Self {
        Self {
            relation_name: Vec::new(),
            schema: String::new(),
            tolerance: "1".to_string(),
            unit: "kms".to_string(),
            geom_column_name: String::new(),
        }
    }
}

impl Simplify {
    fn refresh(
        &self,
        context: &SqlContext,
        component: Component<SimplifyProperties>,
    ) -> Result<Component<SimplifyProperties>, SchemaError> {
        let fields = parse_port_schema(component.input_schema(0))?;
        let properties = SimplifyProperties {
            schema: snapshot_json(&fields),
            relation_name: relation_names(&component, context),
            ..component.properties.clone()
        };
        Ok(component.bind_properties(properties))
    }
}

impl MacroSpec for Simplify {
    type Properties = SimplifyProperties;

    fn name(&self) -> &'static str {
        "Simplify"
    }

    fn supported_providers(&self) -> &'static [ProviderType] {
        &[ProviderType::Databricks]
    }

    fn dialog(&self) -> Dialog {
        Dialog::new("Simplify").with_element(Element::columns_layout(
            Some("1rem"),
            Some("100%"),
            vec![
                Column::sized("content", vec![Element::ports_with_add_or_delete()]),
                Column::new(vec![Element::stack_layout(
                    None,
                    None,
                    vec![
                        Element::condition(
                            "$.sql.metainfo.providerType",
                            "databricks",
                            vec![Element::alert("warning", DATABRICKS_PREVIEW_NOTE)],
                        ),
                        Element::schema_columns_dropdown(
                            "Geometry column (WKT format)",
                            "component.ports.inputs[0].schema",
                            "geom_column_name",
                        ),
                        Element::text_box("Tolerance", "tolerance", Some("1.0")),
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

    fn validate(
        &self,
        _context: &SqlContext,
        component: &Component<SimplifyProperties>,
    ) -> Vec<Diagnostic> {
        rules::float_literal(
            "properties.tolerance",
            &component.properties.tolerance,
            "Field 'Tolerance' cannot be empty.",
            "Field 'Tolerance' must be a float.",
        )
        .into_iter()
        .collect()
    }

    fn on_change(
        &self,
        context: &SqlContext,
        _old_state: &Component<SimplifyProperties>,
        new_state: Component<SimplifyProperties>,
    ) -> Result<Component<SimplifyProperties>, SchemaError> {
        self.refresh(context, new_state)
    }

    fn update_input_port_slug(
        &self,
        context: &SqlContext,
        component: Component<SimplifyProperties>,
    ) -> Result<Component<SimplifyProperties>, SchemaError> {
        self.refresh(context, component)
    }

    fn apply(&self, properties: &SimplifyProperties) -> String {
        let table_name = properties.relation_name.join(",");
        let arguments = vec![
            quoted(&table_name),
            properties.schema.clone(),
            quoted(&properties.geom_column_name),
            properties.tolerance.clone(),
            quoted(&properties.unit),
        ];
        macro_call(self.project_name(), self.name(), &arguments)
    }

    fn load_properties(
        &self,
        properties: &MacroProperties,
    ) -> Result<SimplifyProperties, ParameterError> {
        let parameters = ParameterMap::from_parameters(&properties.parameters);
        Ok(SimplifyProperties {
            relation_name: parameters.string_list("relation_name")?,
            schema: parameters.string("schema")?,
            // Persisted under the same name Buffer uses for its geometry
            // column; reading any other key would break saved pipelines.
            geom_column_name: parameters.string("destinationColumnNames")?,
            tolerance: parameters.string("tolerance")?,
            unit: parameters.string("unit")?,
        })
    }

    fn unload_properties(&self, properties: &SimplifyProperties) -> MacroProperties {
        MacroProperties {
            macro_name: self.name().to_string(),
            project_name: self.project_name().to_string(),
            parameters: vec![
                MacroParameter::new("relation_name", display_list(&properties.relation_name)),
                MacroParameter::new("schema", properties.schema.clone()),
                MacroParameter::new(
                    "destinationColumnNames",
                    properties.geom_column_name.clone(),
                ),
                MacroParameter::new("tolerance", properties.tolerance.clone()),
                MacroParameter::new("unit", properties.unit.clone()),
            ],
        }
    }
}
