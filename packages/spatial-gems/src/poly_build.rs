use gem_sdk::{
    display_list, field_names, macro_call, parse_port_schema, quoted, relation_names, rules,
    Column, Component, Diagnostic, Dialog, Element, MacroParameter, MacroProperties, MacroSpec,
    ParameterError, ParameterMap, ProviderType, SchemaError, SqlContext,
};
use serde::{Deserialize, Serialize};

/// Builds polygons or polylines from ordered point sequences.
pub struct PolyBuild;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolyBuildProperties {
    pub relation_name: Vec<String>,
    pub build_method: String,
    pub longitude_column_name: String,
    pub latitude_column_name: String,
    pub group_column_name: String,
    pub sequence_column_name: String,
}

impl Default for PolyBuildProperties {
    fn default() -> Self {
        Self {
            relation_name: Vec::new(),
            build_method: "SequencePolygon".to_string(),
            longitude_column_name: String::new(),
            latitude_column_name: String::new(),
            group_column_name: String::new(),
            sequence_column_name: String::new(),
        }
    }
}

impl PolyBuild {
    fn refresh(
        &self,
        context: &SqlContext,
        component: Component<PolyBuildProperties>,
    ) -> Component<PolyBuildProperties> {
        let properties = PolyBuildProperties {
            relation_name: relation_names(&component, context),
            ..component.properties.clone()
        };
        component.bind_properties(properties)
    }
}

impl MacroSpec for PolyBuild {
    type Properties = PolyBuildProperties;

    fn name(&self) -> &'static str {
        "PolyBuild"
    }

    fn supported_providers(&self) -> &'static [ProviderType] {
        &[ProviderType::Databricks]
    }

    fn dialog(&self) -> Dialog {
        Dialog::new("PolyBuild").with_element(Element::columns_layout(
            Some("1rem"),
            Some("100%"),
            vec![
                Column::sized("content", vec![Element::ports()]),
                Column::new(vec![Element::stack_layout(
                    None,
                    Some("100%"),
                    vec![Element::step_container(vec![Element::step(vec![
                        Element::stack_layout(
                            None,
                            Some("100%"),
                            vec![
                                Element::select_box(
                                    "Build Method",
                                    "buildMethod",
                                    &[
                                        ("Sequence Polygon", "SequencePolygon"),
                                        ("Sequence Polyline", "SequencePolyline"),
                                    ],
                                ),
                                Element::columns_layout(
                                    Some("1rem"),
                                    Some("100%"),
                                    vec![
                                        Column::new(vec![Element::schema_columns_dropdown(
                                            "Longitude Column Name",
                                            "component.ports.inputs[0].schema",
                                            "longitudeColumnName",
                                        )]),
                                        Column::new(vec![Element::schema_columns_dropdown(
                                            "Latitude Column Name",
                                            "component.ports.inputs[0].schema",
                                            "latitudeColumnName",
                                        )]),
                                    ],
                                ),
                                Element::schema_columns_dropdown(
                                    "Group Field",
                                    "component.ports.inputs[0].schema",
                                    "groupColumnName",
                                ),
                                Element::schema_columns_dropdown(
                                    "Sequence Field",
                                    "component.ports.inputs[0].schema",
                                    "sequenceColumnName",
                                ),
                            ],
                        ),
                    ])])],
                )]),
            ],
        ))
    }

    fn validate(
        &self,
        _context: &SqlContext,
        component: &Component<PolyBuildProperties>,
    ) -> Vec<Diagnostic> {
        let properties = &component.properties;
        let mut diagnostics = Vec::new();

        diagnostics.extend(rules::required_string(
            "component.properties.longitudeColumnName",
            &properties.longitude_column_name,
            "Please select the longitude column",
        ));
        diagnostics.extend(rules::required_string(
            "component.properties.latitudeColumnName",
            &properties.latitude_column_name,
            "Please select the latitude column",
        ));

        if let Ok(fields) = parse_port_schema(component.input_schema(0)) {
            let names = field_names(&fields);
            diagnostics.extend(rules::column_in_schema(
                "component.properties.longitudeColumnName",
                "longitude column",
                &properties.longitude_column_name,
                &names,
            ));
            diagnostics.extend(rules::column_in_schema(
                "component.properties.latitudeColumnName",
                "latitude column",
                &properties.latitude_column_name,
                &names,
            ));
            diagnostics.extend(rules::column_in_schema(
                "component.properties.groupColumnName",
                "group column",
                &properties.group_column_name,
                &names,
            ));
            diagnostics.extend(rules::column_in_schema(
                "component.properties.sequenceColumnName",
                "sequence column",
                &properties.sequence_column_name,
                &names,
            ));
        }

        diagnostics
    }

    fn on_change(
        &self,
        context: &SqlContext,
        _old_state: &Component<PolyBuildProperties>,
        new_state: Component<PolyBuildProperties>,
    ) -> Result<Component<PolyBuildProperties>, SchemaError> {
        Ok(self.refresh(context, new_state))
    }

    fn update_input_port_slug(
        &self,
        context: &SqlContext,
        component: Component<PolyBuildProperties>,
    ) -> Result<Component<PolyBuildProperties>, SchemaError> {
        Ok(self.refresh(context, component))
    }

    fn apply(&self, properties: &PolyBuildProperties) -> String {
        let table_name = properties.relation_name.join(",");
        let arguments = vec![
            quoted(&table_name),
            quoted(&properties.build_method),
            quoted(&properties.longitude_column_name),
            quoted(&properties.latitude_column_name),
            quoted(&properties.group_column_name),
            quoted(&properties.sequence_column_name),
        ];
        macro_call(self.project_name(), self.name(), &arguments)
    }

    fn load_properties(
        &self,
        properties: &MacroProperties,
    ) -> Result<PolyBuildProperties, ParameterError> {
        let parameters = ParameterMap::from_parameters(&properties.parameters);
        Ok(PolyBuildProperties {
            relation_name: parameters.string_list("relation_name")?,
            build_method: parameters.string("buildMethod")?,
            longitude_column_name: parameters.string("longitudeColumnName")?,
            latitude_column_name: parameters.string("latitudeColumnName")?,
            group_column_name: parameters.string("groupColumnName")?,
            sequence_column_name: parameters.string("sequenceColumnName")?,
        })
    }

    fn unload_properties(&self, properties: &PolyBuildProperties) -> MacroProperties {
        MacroProperties {
            macro_name: self.name().to_string(),
            project_name: self.project_name().to_string(),
            parameters: vec![
                MacroParameter::new("relation_name", display_list(&properties.relation_name)),
                MacroParameter::new("buildMethod", properties.build_method.clone()),
                MacroParameter::new(
                    "longitudeColumnName",
                    properties.longitude_column_name.clone(),
                ),
                MacroParameter::new(
                    "latitudeColumnName",
                    properties.latitude_column_name.clone(),
                ),
                MacroParameter::new("groupColumnName", properties.group_column_name.clone()),
                MacroParameter::new(
                    "sequenceColumnName",
                    properties.sequence_column_name.clone(),
                ),
            ],
        }
    }
}
