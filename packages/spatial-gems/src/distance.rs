use gem_sdk::{
    display_list, field_names, macro_call, parse_port_schema, parse_snapshot, quoted,
    relation_names, rules, snapshot_json, Column, Component, Diagnostic, Dialog, Element,
    MacroParameter, MacroProperties, MacroSpec, ParameterError, ParameterMap, ProviderType,
    SchemaError, SqlContext,
};
use serde::{Deserialize, Serialize};

use crate::WKT_INPUT_NOTE;

/// Distance, and optionally direction, between two point columns.
pub struct Distance;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistanceProperties {
    pub relation_name: Vec<String>,
    pub schema: String,
    pub source_column_names: String,
    pub destination_column_names: String,
    pub source_type: String,
    pub destination_type: String,
    pub output_distance: bool,
    pub units: String,
    pub output_card_direction: bool,
    pub output_direction_degrees: bool,
}

impl Default for DistanceProperties {
    fn default() -> Self {
        Self {
            relation_name: Vec::new(),
            schema: String::new(),
            source_column_names: String::new(),
            destination_column_names: String::new(),
            source_type: "point".to_string(),
            destination_type: "point".to_string(),
            output_distance: false,
            units: "kms".to_string(),
            output_card_direction: false,
            output_direction_degrees: false,
        }
    }
}

impl Distance {
    fn refresh(
        &self,
        context: &SqlContext,
        component: Component<DistanceProperties>,
    ) -> Result<Component<DistanceProperties>, SchemaError> {
        let fields = parse_port_schema(component.input_schema(0))?;
        let properties = DistanceProperties {
            schema: snapshot_json(&fields),
            relation_name: relation_names(&component, context),
            ..component.properties.clone()
        };
        Ok(component.bind_properties(properties))
    }
}

impl MacroSpec for Distance {
    type Properties = DistanceProperties;

    fn name(&self) -> &'static str {
        "Distance"
    }

    fn supported_providers(&self) -> &'static [ProviderType] {
        &[ProviderType::Databricks, ProviderType::ProphecyManaged]
    }

    fn dialog(&self) -> Dialog {
        Dialog::new("Distance").with_element(Element::columns_layout(
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
                                            "Source Type",
                                            "sourceType",
                                            &[("Point", "point")],
                                        )]),
                                        Column::new(vec![Element::schema_columns_dropdown(
                                            "Source Column",
                                            "component.ports.inputs[0].schema",
                                            "sourceColumnNames",
                                        )]),
                                        Column::new(vec![Element::select_box(
                                            "Destination Type",
                                            "destinationType",
                                            &[("Point", "point")],
                                        )]),
                                        Column::new(vec![Element::schema_columns_dropdown(
                                            "Destination Column",
                                            "component.ports.inputs[0].schema",
                                            "destinationColumnNames",
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
                                Element::checkbox("Output Distance", "outputDistance"),
                                Element::condition(
                                    "component.properties.outputDistance",
                                    "true",
                                    vec![Element::select_box(
                                        "Units",
                                        "units",
                                        &[
                                            ("Kilometers", "kms"),
                                            ("Miles", "mls"),
                                            ("Feet", "feet"),
                                            ("Meters", "mtr"),
                                        ],
                                    )],
                                ),
                                Element::checkbox(
                                    "Output Cardinal Direction",
                                    "outputCardDirection",
                                ),
                                Element::checkbox(
                                    "Output Direction in Degrees",
                                    "outputDirectionDegrees",
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
        component: &Component<DistanceProperties>,
    ) -> Vec<Diagnostic> {
        let properties = &component.properties;
        let mut diagnostics = Vec::new();

        diagnostics.extend(rules::required_string(
            "component.properties.sourceColumnNames",
            &properties.source_column_names,
            "Please select a source column",
        ));
        diagnostics.extend(rules::required_string(
            "component.properties.destinationColumnNames",
            &properties.destination_column_names,
            "Please select a destination column",
        ));

        if let Ok(fields) = parse_port_schema(component.input_schema(0)) {
            let names = field_names(&fields);
            diagnostics.extend(rules::column_in_schema(
                "component.properties.sourceColumnNames",
                "recordId column",
                &properties.source_column_names,
                &names,
            ));
            diagnostics.extend(rules::column_in_schema(
                "component.properties.destinationColumnNames",
                "recordId column",
                &properties.destination_column_names,
                &names,
            ));
        }

        diagnostics.extend(rules::at_least_one(
            "properties.outputDistance",
            &[
                properties.output_distance,
                properties.output_card_direction,
                properties.output_direction_degrees,
            ],
            "Please select at least one output column option",
        ));

        diagnostics
    }

    fn on_change(
        &self,
        context: &SqlContext,
        _old_state: &Component<DistanceProperties>,
        new_state: Component<DistanceProperties>,
    ) -> Result<Component<DistanceProperties>, SchemaError> {
        self.refresh(context, new_state)
    }

    fn update_input_port_slug(
        &self,
        context: &SqlContext,
        component: Component<DistanceProperties>,
    ) -> Result<Component<DistanceProperties>, SchemaError> {
        self.refresh(context, component)
    }

    fn apply(&self, properties: &DistanceProperties) -> String {
        let table_name = properties.relation_name.join(",");
        let all_column_names =
            field_names(&parse_snapshot(&properties.schema).unwrap_or_default());

        let arguments = vec![
            quoted(&table_name),
            quoted(&properties.source_column_names),
            quoted(&properties.destination_column_names),
            quoted(&properties.source_type),
            quoted(&properties.destination_type),
            properties.output_distance.to_string(),
            quoted(&properties.units),
            properties.output_card_direction.to_string(),
            properties.output_direction_degrees.to_string(),
            display_list(&all_column_names),
        ];
        macro_call(self.project_name(), self.name(), &arguments)
    }

    fn load_properties(
        &self,
        properties: &MacroProperties,
    ) -> Result<DistanceProperties, ParameterError> {
        let parameters = ParameterMap::from_parameters(&properties.parameters);
        Ok(DistanceProperties {
            relation_name: parameters.string_list("relation_name")?,
            schema: parameters.string("schema")?,
            source_column_names: parameters.string("sourceColumnNames")?,
            destination_column_names: parameters.string("destinationColumnNames")?,
            source_type: parameters.string("sourceType")?,
            destination_type: parameters.string("destinationType")?,
            output_distance: parameters.bool("outputDistance")?,
            units: parameters.string("units")?,
            output_card_direction: parameters.bool("outputCardDirection")?,
            output_direction_degrees: parameters.bool("outputDirectionDegrees")?,
        })
    }

    fn unload_properties(&self, properties: &DistanceProperties) -> MacroProperties {
        MacroProperties {
            macro_name: self.name().to_string(),
            project_name: self.project_name().to_string(),
            parameters: vec![
                MacroParameter::new("relation_name", display_list(&properties.relation_name)),
                MacroParameter::new("schema", properties.schema.clone()),
                MacroParameter::new(
                    "sourceColumnNames",
                    properties.source_column_names.clone(),
                ),
                MacroParameter::new(
                    "destinationColumnNames",
                    properties.destination_column_names.clone(),
                ),
                MacroParameter::new("sourceType", properties.source_type.clone()),
                MacroParameter::new("destinationType", properties.destination_type.clone()),
                MacroParameter::new("outputDistance", properties.output_distance.to_string()),
                MacroParameter::new("units", properties.units.clone()),
                MacroParameter::new(
                    "outputCardDirection",
                    properties.output_card_direction.to_string(),
                ),
                MacroParameter::new(
                    "outputDirectionDegrees",
                    properties.output_direction_degrees.to_string(),
                ),
            ],
        }
    }
}
