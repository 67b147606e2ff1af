use gem_sdk::{
    display_list, field_names, macro_call, parse_port_schema, quoted, relation_names, rules,
    type_lookup, Column, Component, Diagnostic, Dialog, Element, MacroParameter, MacroProperties,
    MacroSpec, ParameterError, ParameterMap, ProviderType, SchemaError, SqlContext,
};
use serde::{Deserialize, Serialize};

const ADVANCED_SETTINGS_NOTE: &str = "**Advanced Settings**\n\
     - **Resolution**: H3 resolution controls how big each hexagon is, lower resolutions mean \
     bigger hexes (like countries), higher resolutions mean smaller hexes (like street, \
     buildings etc)\n\
     - **Grid Distance**: Defines the number of hexagon steps away from the center to generate \
     surronding hexagons\n\
     - **Decay Function**: Determines how heat fades with distance: constant applies equal \
     weight to all neighbors, linear reduces weight linearly with distance, and exponential \
     halves the weight with each step away";

const HEAT_NUMERIC_TYPES: &[&str] = &[
    "tinyint", "smallint", "int", "integer", "bigint", "float", "double", "decimal", "numeric",
];

/// Aggregates point weights into an H3 hexagon heat map.
pub struct HeatMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatMapProperties {
    pub relation_name: Vec<String>,
    pub longitude_column_name: String,
    pub latitude_column_name: String,
    pub heat_column_name: String,
    pub decay_type: String,
    pub resolution: i64,
    pub grid_distance: i64,
}

impl Default for HeatMapProperties {
    fn default() -> Self {
        Self {
            relation_name: Vec::new(),
            longitude_column_name: String::new(),
            latitude_column_name: String::new(),
            heat_column_name: String::new(),
            decay_type: "constant".to_string(),
            resolution: 8,
            grid_distance: 1,
        }
    }
}

impl HeatMap {
    fn refresh(
        &self,
        context: &SqlContext,
        component: Component<HeatMapProperties>,
    ) -> Component<HeatMapProperties> {
        let properties = HeatMapProperties {
            relation_name: relation_names(&component, context),
            ..component.properties.clone()
        };
        component.bind_properties(properties)
    }
}

impl MacroSpec for HeatMap {
    type Properties = HeatMapProperties;

    fn name(&self) -> &'static str {
        "HeatMap"
    }

    fn supported_providers(&self) -> &'static [ProviderType] {
        &[ProviderType::Databricks]
    }

    fn dialog(&self) -> Dialog {
        Dialog::new("HeatMap").with_element(Element::columns_layout(
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
                                Element::title("Choose Geo Points"),
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
                            ],
                        )])]),
                        Element::step_container(vec![Element::step(vec![Element::stack_layout(
                            None,
                            Some("100%"),
                            vec![
                                Element::title("Advanced Settings"),
                                Element::columns_layout(
                                    Some("1rem"),
                                    Some("100%"),
                                    vec![
                                        Column::new(vec![Element::schema_columns_dropdown(
                                            "Heat Column Name",
                                            "component.ports.inputs[0].schema",
                                            "heatColumnName",
                                        )]),
                                        Column::new(vec![Element::select_box(
                                            "Decay Function",
                                            "decayType",
                                            &[
                                                ("Constant", "constant"),
                                                ("Linear", "linear"),
                                                ("Exponential", "exp"),
                                            ],
                                        )]),
                                    ],
                                ),
                                Element::columns_layout(
                                    Some("1rem"),
                                    Some("100%"),
                                    vec![
                                        Column::new(vec![Element::number_box(
                                            "Resolution",
                                            "resolution",
                                            Some("0"),
                                            Some(0),
                                            Some(15),
                                        )]),
                                        Column::new(vec![Element::number_box(
                                            "Grid Distance",
                                            "gridDistance",
                                            Some("0"),
                                            Some(0),
                                            None,
                                        )]),
                                    ],
                                ),
                            ],
                        )])]),
                        Element::alert("success", ADVANCED_SETTINGS_NOTE),
                    ],
                )]),
            ],
        ))
    }

    fn validate(
        &self,
        _context: &SqlContext,
        component: &Component<HeatMapProperties>,
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
            // The message always said "latitude column" here; kept so saved
            // pipelines surface the exact diagnostics users are used to.
            diagnostics.extend(rules::column_in_schema(
                "component.properties.heatColumnName",
                "latitude column",
                &properties.heat_column_name,
                &names,
            ));

            if !properties.heat_column_name.is_empty() {
                let types = type_lookup(&fields);
                if let Some(dtype) = types.get(&properties.heat_column_name) {
                    if !HEAT_NUMERIC_TYPES.contains(&dtype.as_str()) {
                        diagnostics.push(Diagnostic::error(
                            "component.properties.heatColumnName",
                            format!(
                                "Selected heat column is of type '{dtype}', which is not numeric."
                            ),
                        ));
                    }
                }
            }
        }

        diagnostics
    }

    fn on_change(
        &self,
        context: &SqlContext,
        _old_state: &Component<HeatMapProperties>,
        new_state: Component<HeatMapProperties>,
    ) -> Result<Component<HeatMapProperties>, SchemaError> {
        Ok(self.refresh(context, new_state))
    }

    fn update_input_port_slug(
        &self,
        context: &SqlContext,
        component: Component<HeatMapProperties>,
    ) -> Result<Component<HeatMapProperties>, SchemaError> {
        Ok(self.refresh(context, component))
    }

    fn apply(&self, properties: &HeatMapProperties) -> String {
        let table_name = properties.relation_name.join(",");
        let arguments = vec![
            quoted(&table_name),
            quoted(&properties.longitude_column_name),
            quoted(&properties.latitude_column_name),
            properties.resolution.to_string(),
            properties.grid_distance.to_string(),
            quoted(&properties.heat_column_name),
            quoted(&properties.decay_type),
        ];
        macro_call(self.project_name(), self.name(), &arguments)
    }

    fn load_properties(
        &self,
        properties: &MacroProperties,
    ) -> Result<HeatMapProperties, ParameterError> {
        let parameters = ParameterMap::from_parameters(&properties.parameters);
        Ok(HeatMapProperties {
            relation_name: parameters.string_list("relation_name")?,
            longitude_column_name: parameters.string("longitudeColumnName")?,
            latitude_column_name: parameters.string("latitudeColumnName")?,
            resolution: parameters.int("resolution")?,
            grid_distance: parameters.int("gridDistance")?,
            heat_column_name: parameters.string("heatColumnName")?,
            decay_type: parameters.string("decayType")?,
        })
    }

    fn unload_properties(&self, properties: &HeatMapProperties) -> MacroProperties {
        MacroProperties {
            macro_name: self.name().to_string(),
            project_name: self.project_name().to_string(),
            parameters: vec![
                MacroParameter::new("relation_name", display_list(&properties.relation_name)),
                MacroParameter::new(
                    "longitudeColumnName",
                    properties.longitude_column_name.clone(),
                ),
                MacroParameter::new(
                    "latitudeColumnName",
                    properties.latitude_column_name.clone(),
                ),
                MacroParameter::new("resolution", properties.resolution.to_string()),
                MacroParameter::new("gridDistance", properties.grid_distance.to_string()),
                MacroParameter::new("heatColumnName", properties.heat_column_name.clone()),
                MacroParameter::new("decayType", properties.decay_type.clone()),
            ],
        }
    }
}
