use gem_sdk::{
    display_list, field_names, macro_call, parse_port_schema, parse_snapshot, quoted,
    relation_names, rules, snapshot_json, Column, Component, Diagnostic, Dialog, Element,
    MacroParameter, MacroProperties, MacroSpec, ParameterError, ParameterMap, ProviderType,
    SchemaError, SqlContext,
};
use serde::{Deserialize, Serialize};

use crate::WKT_INPUT_NOTE;

/// Joins each source point to its nearest target points within a distance cap.
pub struct FindNearest;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FindNearestProperties {
    pub relation_name: Vec<String>,
    pub source_schema: String,
    pub target_schema: String,
    pub source_column_name: String,
    pub destination_column_name: String,
    pub source_type: String,
    pub target_type: String,
    pub nearest_points: i64,
    pub max_distance: i64,
    pub units: String,
    pub ignore_zero_distance: bool,
}

impl Default for FindNearestProperties {
    fn default() -> Self {
        Self {
            relation_name: Vec::new(),
            source_schema: String::new(),
            target_schema: String::new(),
            source_column_name: String::new(),
            destination_column_name: String::new(),
            source_type: "point".to_string(),
            target_type: "point".to_string(),
            nearest_points: 1,
            max_distance: 20,
            units: "kms".to_string(),
            ignore_zero_distance: false,
        }
    }
}

impl FindNearest {
    fn refresh(
        &self,
        context: &SqlContext,
        component: Component<FindNearestProperties>,
    ) -> Result<Component<FindNearestProperties>, SchemaError> {
        let source_fields = parse_port_schema(component.input_schema(0))?;
        let target_fields = parse_port_schema(component.input_schema(1))?;
        let properties = FindNearestProperties {
            source_schema: snapshot_json(&source_fields),
            target_schema: snapshot_json(&target_fields),
            relation_name: relation_names(&component, context),
            ..component.properties.clone()
        };
        Ok(component.bind_properties(properties))
    }
}

impl MacroSpec for FindNearest {
    type Properties = FindNearestProperties;

    fn name(&self) -> &'static str {
        "FindNearest"
    }

    fn min_input_ports(&self) -> usize {
        2
    }

    fn supported_providers(&self) -> &'static [ProviderType] {
        &[ProviderType::Databricks]
    }

    fn dialog(&self) -> Dialog {
        Dialog::new("FindNearest").with_element(Element::columns_layout(
            Some("1rem"),
            Some("100%"),
            vec![
                Column::sized("content", vec![Element::ports()]),
                Column::new(vec![Element::stack_layout(
                    None,
                    Some("100%"),
                    vec![
                        Element::step_container(vec![Element::step(vec![Element::stack_layout(
                            None,
                            Some("100%"),
                            vec![
                                Element::title("Spatial Object Fields"),
                                Element::columns_layout(
                                    Some("1rem"),
                                    Some("100%"),
                                    vec![
                                        Column::new(vec![Element::select_box(
                                            "Source Centroid Type",
                                            "sourceType",
                                            &[("Point", "point")],
                                        )]),
                                        Column::new(vec![Element::schema_columns_dropdown(
                                            "Source Centroid Column",
                                            "component.ports.inputs[0].schema",
                                            "sourceColumnName",
                                        )]),
                                        Column::new(vec![Element::select_box(
                                            "Target Centroid Type",
                                            "targetType",
                                            &[("Point", "point")],
                                        )]),
                                        Column::new(vec![Element::schema_columns_dropdown(
                                            "Target Centroid Column",
                                            "component.ports.inputs[1].schema",
                                            "destinationColumnName",
                                        )]),
                                    ],
                                ),
                            ],
                        )])]),
                        Element::step_container(vec![Element::step(vec![Element::stack_layout(
                            None,
                            Some("100%"),
                            vec![
                                Element::title("Select Output Options"),
                                Element::number_box(
                                    "How many nearest points to find?",
                                    "nearestPoints",
                                    Some("1"),
                                    Some(1),
                                    None,
                                ),
                                Element::native_text("Maximum Distance"),
                                Element::columns_layout(
                                    Some("1rem"),
                                    Some("100%"),
                                    vec![
                                        Column::new(vec![Element::number_box(
                                            "",
                                            "maxDistance",
                                            Some("20"),
                                            Some(0),
                                            None,
                                        )]),
                                        Column::new(vec![Element::select_box(
                                            "",
                                            "units",
                                            &[
                                                ("Kilometers", "kms"),
                                                ("Miles", "mls"),
                                                ("Feet", "feet"),
                                                ("Meters", "mtr"),
                                            ],
                                        )]),
                                    ],
                                ),
                                Element::checkbox(
                                    "Ignore 0 Distance Matches",
                                    "ignoreZeroDistance",
                                ),
                            ],
                        )])]),
                        Element::alert("success", WKT_INPUT_NOTE),
                    ],
                )]),
            ],
        ))
    }

    fn validate(
        &self,
        _context: &SqlContext,
        component: &Component<FindNearestProperties>,
    ) -> Vec<Diagnostic> {
        let properties = &component.properties;
        let mut diagnostics = Vec::new();

        diagnostics.extend(rules::required_string(
            "component.properties.sourceColumnName",
            &properties.source_column_name,
            "Please select a source column",
        ));
        diagnostics.extend(rules::required_string(
            "component.properties.destinationColumnName",
            &properties.destination_column_name,
            "Please select a destination column",
        ));

        if let Ok(fields) = parse_port_schema(component.input_schema(0)) {
            diagnostics.extend(rules::column_in_schema(
                "component.properties.sourceColumnName",
                "column",
                &properties.source_column_name,
                &field_names(&fields),
            ));
        }
        if let Ok(fields) = parse_port_schema(component.input_schema(1)) {
            diagnostics.extend(rules::column_in_schema(
                "component.properties.destinationColumnName",
                "column",
                &properties.destination_column_name,
                &field_names(&fields),
            ));
        }

        diagnostics
    }

    fn on_change(
        &self,
        context: &SqlContext,
        _old_state: &Component<FindNearestProperties>,
        new_state: Component<FindNearestProperties>,
    ) -> Result<Component<FindNearestProperties>, SchemaError> {
        self.refresh(context, new_state)
    }

    fn update_input_port_slug(
        &self,
        context: &SqlContext,
        component: Component<FindNearestProperties>,
    ) -> Result<Component<FindNearestProperties>, SchemaError> {
        self.refresh(context, component)
    }

    fn apply(&self, properties: &FindNearestProperties) -> String {
        let source_columns =
            field_names(&parse_snapshot(&properties.source_schema).unwrap_or_default());
        let target_columns =
            field_names(&parse_snapshot(&properties.target_schema).unwrap_or_default());

        let arguments = vec![
            display_list(&properties.relation_name),
            quoted(&properties.source_column_name),
            quoted(&properties.destination_column_name),
            quoted(&properties.source_type),
            quoted(&properties.target_type),
            properties.nearest_points.to_string(),
            properties.max_distance.to_string(),
            quoted(&properties.units),
            properties.ignore_zero_distance.to_string(),
            display_list(&source_columns),
            display_list(&target_columns),
        ];
        macro_call(self.project_name(), self.name(), &arguments)
    }

    fn load_properties(
        &self,
        properties: &MacroProperties,
    ) -> Result<FindNearestProperties, ParameterError> {
        let parameters = ParameterMap::from_parameters(&properties.parameters);
        Ok(FindNearestProperties {
            relation_name: parameters.string_list("relation_name")?,
            source_schema: parameters.string("source_schema")?,
            target_schema: parameters.string("target_schema")?,
            source_column_name: parameters.string("sourceColumnName")?,
            destination_column_name: parameters.string("destinationColumnName")?,
            source_type: parameters.string("sourceType")?,
            target_type: parameters.string("targetType")?,
            nearest_points: parameters.int("nearestPoints")?,
            max_distance: parameters.int("maxDistance")?,
            units: parameters.string("units")?,
            ignore_zero_distance: parameters.bool("ignoreZeroDistance")?,
        })
    }

    fn unload_properties(&self, properties: &FindNearestProperties) -> MacroProperties {
        MacroProperties {
            macro_name: self.name().to_string(),
            project_name: self.project_name().to_string(),
            parameters: vec![
                MacroParameter::new("relation_name", display_list(&properties.relation_name)),
                MacroParameter::new("source_schema", properties.source_schema.clone()),
                MacroParameter::new("target_schema", properties.target_schema.clone()),
                MacroParameter::new("sourceColumnName", properties.source_column_name.clone()),
                MacroParameter::new(
                    "destinationColumnName",
                    properties.destination_column_name.clone(),
                ),
                MacroParameter::new("sourceType", properties.source_type.clone()),
                MacroParameter::new("targetType", properties.target_type.clone()),
                MacroParameter::new("nearestPoints", properties.nearest_points.to_string()),
                MacroParameter::new("maxDistance", properties.max_distance.to_string()),
                MacroParameter::new("units", properties.units.clone()),
                MacroParameter::new(
                    "ignoreZeroDistance",
                    properties.ignore_zero_distance.to_string(),
                ),
            ],
        }
    }
}
