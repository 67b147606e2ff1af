use gem_sdk::{
    display_list, field_names, macro_call, nested_display_list, parse_port_schema, quoted,
    relation_names, rules, Column, Component, Diagnostic, Dialog, Element, MacroParameter,
    MacroProperties, MacroSpec, ParameterError, ParameterMap, ProviderType, SchemaError,
    SqlContext,
};
use serde::{Deserialize, Serialize};

use crate::DATABRICKS_PREVIEW_NOTE;

const MATCH_TYPES_IMAGE: &str =
    "![alt text](https://docs.prophecy.io/img/spatial/match-types.jpg)";

const WKT_PAIR_NOTE: &str =
    "This gem requires that the Source column and Destination column contain geometric values \
     in Well-Known Text (WKT) format. To convert longitude and latitude coordinates into WKT \
     format, use the [CreatePoint gem](https://docs.prophecy.io/analysts/create-point/) for \
     points and the [PolyBuild gem](https://docs.prophecy.io/analysts/polybuild/) for polygons \
     and lines.";

/// Joins two relations on a spatial predicate between their geometry columns.
pub struct SpatialMatch;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpatialMatchProperties {
    pub relation_name: Vec<String>,
    pub schemas: Vec<Vec<String>>,
    pub source_column: String,
    pub target_column: String,
    pub match_type: String,
}

impl SpatialMatch {
    fn refresh(
        &self,
        context: &SqlContext,
        component: Component<SpatialMatchProperties>,
    ) -> Result<Component<SpatialMatchProperties>, SchemaError> {
        let mut schemas = Vec::with_capacity(component.ports.inputs.len());
        for port in &component.ports.inputs {
            let fields = parse_port_schema(&port.schema)?;
            schemas.push(field_names(&fields));
        }
        let properties = SpatialMatchProperties {
            relation_name: relation_names(&component, context),
            schemas,
            ..component.properties.clone()
        };
        Ok(component.bind_properties(properties))
    }
}

impl MacroSpec for SpatialMatch {
    type Properties = SpatialMatchProperties;

    fn name(&self) -> &'static str {
        "SpatialMatch"
    }

    fn min_input_ports(&self) -> usize {
        2
    }

    fn supported_providers(&self) -> &'static [ProviderType] {
        &[ProviderType::Databricks]
    }

    fn dialog(&self) -> Dialog {
        Dialog::new("SpatialMatch").with_element(Element::columns_layout(
            Some("1rem"),
            Some("auto"),
            vec![
                Column::sized("content", vec![Element::ports()]),
                Column::new(vec![Element::stack_layout(
                    None,
                    Some("100%"),
                    vec![
                        Element::condition(
                            "$.sql.metainfo.providerType",
                            "databricks",
                            vec![Element::alert("warning", DATABRICKS_PREVIEW_NOTE)],
                        ),
                        Element::step_container(vec![Element::step(vec![Element::stack_layout(
                            None,
                            Some("100%"),
                            vec![
                                Element::title("Spatial Object Fields"),
                                Element::columns_layout(
                                    Some("1rem"),
                                    Some("100%"),
                                    vec![
                                        Column::new(vec![Element::schema_columns_dropdown(
                                            "Source (smaller geometry - e.g. points or lines)",
                                            "component.ports.inputs[0].schema",
                                            "source_column",
                                        )]),
                                        Column::new(vec![Element::schema_columns_dropdown(
                                            "Target (larger shapes - e.g. polygons)",
                                            "component.ports.inputs[1].schema",
                                            "target_column",
                                        )]),
                                    ],
                                ),
                            ],
                        )])]),
                        Element::step_container(vec![Element::step(vec![Element::select_box(
                            "Select Match Type",
                            "match_type",
                            &[
                                ("Source Intersects Target", "intersects"),
                                ("Source Contains Target", "contains"),
                                ("Source Within Target", "within"),
                                ("Source Touches Target", "touches"),
                                (
                                    "Source Touches or Intersects Target",
                                    "touches_or_intersects",
                                ),
                                ("Source Envelope Intersects Target Envelope", "envelope"),
                            ],
                        )])]),
                        Element::title("Match Types"),
                        Element::alert("info", MATCH_TYPES_IMAGE),
                        Element::alert("success", WKT_PAIR_NOTE),
                    ],
                )]),
            ],
        ))
    }

    fn validate(
        &self,
        _context: &SqlContext,
        component: &Component<SpatialMatchProperties>,
    ) -> Vec<Diagnostic> {
        let properties = &component.properties;
        let mut diagnostics = Vec::new();

        diagnostics.extend(rules::required_string(
            "component.properties.source_column",
            &properties.source_column,
            "Please select a source column",
        ));
        diagnostics.extend(rules::required_string(
            "component.properties.target_column",
            &properties.target_column,
            "Please select a target column",
        ));

        if let Ok(fields) = parse_port_schema(component.input_schema(0)) {
            diagnostics.extend(rules::column_in_schema(
                "component.properties.source_column",
                "column",
                &properties.source_column,
                &field_names(&fields),
            ));
        }
        if let Ok(fields) = parse_port_schema(component.input_schema(1)) {
            diagnostics.extend(rules::column_in_schema(
                "component.properties.target_column",
                "column",
                &properties.target_column,
                &field_names(&fields),
            ));
        }

        diagnostics
    }

    fn on_change(
        &self,
        context: &SqlContext,
        _old_state: &Component<SpatialMatchProperties>,
        new_state: Component<SpatialMatchProperties>,
    ) -> Result<Component<SpatialMatchProperties>, SchemaError> {
        self.refresh(context, new_state)
    }

    fn update_input_port_slug(
        &self,
        context: &SqlContext,
        component: Component<SpatialMatchProperties>,
    ) -> Result<Component<SpatialMatchProperties>, SchemaError> {
        self.refresh(context, component)
    }

    fn apply(&self, properties: &SpatialMatchProperties) -> String {
        let arguments = vec![
            display_list(&properties.relation_name),
            nested_display_list(&properties.schemas),
            quoted(&properties.source_column),
            quoted(&properties.target_column),
            quoted(&properties.match_type),
        ];
        macro_call(self.project_name(), self.name(), &arguments)
    }

    fn load_properties(
        &self,
        properties: &MacroProperties,
    ) -> Result<SpatialMatchProperties, ParameterError> {
        let parameters = ParameterMap::from_parameters(&properties.parameters);
        Ok(SpatialMatchProperties {
            relation_name: parameters.string_list("relation_name")?,
            schemas: parameters.nested_string_list("schemas")?,
            match_type: parameters.string("match_type")?,
            source_column: parameters.string("source_column")?,
            target_column: parameters.string("target_column")?,
        })
    }

    fn unload_properties(&self, properties: &SpatialMatchProperties) -> MacroProperties {
        MacroProperties {
            macro_name: self.name().to_string(),
            project_name: self.project_name().to_string(),
            parameters: vec![
                MacroParameter::new("relation_name", display_list(&properties.relation_name)),
                MacroParameter::new("schemas", nested_display_list(&properties.schemas)),
                MacroParameter::new("match_type", properties.match_type.clone()),
                MacroParameter::new("source_column", properties.source_column.clone()),
                MacroParameter::new("target_column", properties.target_column.clone()),
            ],
        }
    }
}
