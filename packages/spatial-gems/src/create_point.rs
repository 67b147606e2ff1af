use gem_sdk::{
    display_list, field_names, macro_call, nested_display_list, parse_port_schema, quoted,
    relation_names, rules, type_lookup, Column, Component, Diagnostic, Dialog, Element,
    MacroParameter, MacroProperties, MacroSpec, ParameterError, ParameterMap, ProviderType,
    SchemaError, SqlContext,
};
use serde::{Deserialize, Serialize};

const NUMERIC_TYPES: &[&str] = &[
    "int", "integer", "float", "double", "long", "decimal", "bigint", "smallint", "tinyint",
];

/// Builds WKT point geometries out of longitude/latitude column pairs.
pub struct CreatePoint;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointMapping {
    pub longitude_column_name: String,
    pub latitude_column_name: String,
    pub target_column_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreatePointProperties {
    pub add_fields: Vec<PointMapping>,
    pub relation_name: Vec<String>,
}

impl CreatePoint {
    /// Handler for the dialog's "Click to Add a Point" button.
    pub fn on_button_click(
        &self,
        state: Component<CreatePointProperties>,
    ) -> Component<CreatePointProperties> {
        let mut properties = state.properties.clone();
        properties.add_fields.push(PointMapping::default());
        state.bind_properties(properties)
    }

    fn refresh(
        &self,
        context: &SqlContext,
        component: Component<CreatePointProperties>,
    ) -> Component<CreatePointProperties> {
        let properties = CreatePointProperties {
            relation_name: relation_names(&component, context),
            ..component.properties.clone()
        };
        component.bind_properties(properties)
    }
}

impl MacroSpec for CreatePoint {
    type Properties = CreatePointProperties;

    fn name(&self) -> &'static str {
        "CreatePoint"
    }

    fn supported_providers(&self) -> &'static [ProviderType] {
        &[ProviderType::Databricks, ProviderType::ProphecyManaged]
    }

    fn dialog(&self) -> Dialog {
        let row = vec![Element::columns_layout(
            Some("1rem"),
            None,
            vec![
                Column::sized(
                    "0.5fr",
                    vec![Element::schema_columns_dropdown(
                        "Longitude Column Name",
                        "component.ports.inputs[0].schema",
                        "record.longitudeColumnName",
                    )],
                ),
                Column::sized(
                    "0.5fr",
                    vec![Element::schema_columns_dropdown(
                        "Latitude Column Name",
                        "component.ports.inputs[0].schema",
                        "record.latitudeColumnName",
                    )],
                ),
                Column::sized(
                    "0.5fr",
                    vec![Element::text_box(
                        "Target Column Name",
                        "record.targetColumnName",
                        Some(""),
                    )],
                ),
            ],
        )];

        Dialog::new("CreatePoint").with_element(Element::columns_layout(
            Some("1rem"),
            Some("100%"),
            vec![
                Column::sized("content", vec![Element::ports()]),
                Column::new(vec![Element::stack_layout(
                    Some("1rem"),
                    None,
                    vec![
                        Element::title("Create Spatial Points"),
                        Element::alert(
                            "success",
                            "Please add Latitude,Longitude and Target Column Name as Pair\n\
                             * **Longitude Column Name** - Column containing Longitude values \n\
                             * **Latitude Column Name** - Column containing Latitude values \n\
                             * **Target Column Name** - Target column name to keep transformed \
                             Geo Spatial Data \n",
                        ),
                        Element::step_container(vec![Element::step(vec![Element::OrderedList {
                            label: "Add Fields".to_string(),
                            property: "addFields".to_string(),
                            empty_container_text: Some("Add a Point".to_string()),
                            row,
                            allow_delete: true,
                        }])]),
                        Element::button("Click to Add a Point", "onButtonClick"),
                    ],
                )]),
            ],
        ))
    }

    fn validate(
        &self,
        _context: &SqlContext,
        component: &Component<CreatePointProperties>,
    ) -> Vec<Diagnostic> {
        let path = "component.properties.addFields";
        let mut diagnostics = Vec::new();

        diagnostics.extend(rules::required_list(
            path,
            &component.properties.add_fields,
            "Please add atleast one point",
        ));

        // Schema-dependent checks are skipped while the upstream schema is
        // unreadable; validation must never fail outright.
        let fields = parse_port_schema(component.input_schema(0)).unwrap_or_default();
        let types = type_lookup(&fields);

        if !fields.is_empty() {
            for mapping in &component.properties.add_fields {
                diagnostics.extend(rules::numeric_column(
                    path,
                    &mapping.longitude_column_name,
                    &types,
                    NUMERIC_TYPES,
                    "Please give a longitude field with numeric data type",
                ));
                diagnostics.extend(rules::numeric_column(
                    path,
                    &mapping.latitude_column_name,
                    &types,
                    NUMERIC_TYPES,
                    "Please give a latitude field with numeric data type",
                ));
            }
        }

        for mapping in &component.properties.add_fields {
            diagnostics.extend(rules::required_string(
                path,
                &mapping.longitude_column_name,
                "Please select the longitude column name",
            ));
            diagnostics.extend(rules::required_string(
                path,
                &mapping.latitude_column_name,
                "Please select the latitude column name",
            ));
            diagnostics.extend(rules::required_string(
                path,
                &mapping.target_column_name,
                "Please provide a target column name",
            ));
        }

        if !fields.is_empty() {
            let names = field_names(&fields);
            let pickers: [fn(&PointMapping) -> &str; 2] = [
                |mapping| &mapping.longitude_column_name,
                |mapping| &mapping.latitude_column_name,
            ];
            for pick in pickers {
                let missing: Vec<String> = component
                    .properties
                    .add_fields
                    .iter()
                    .map(|mapping| pick(mapping).to_string())
                    .filter(|column| !column.is_empty() && !names.contains(column))
                    .collect();
                if !missing.is_empty() {
                    diagnostics.push(Diagnostic::error(
                        path,
                        format!(
                            "Selected matchField columns {} is not present in input schema.",
                            display_list(&missing)
                        ),
                    ));
                }
            }
        }

        diagnostics
    }

    fn on_change(
        &self,
        context: &SqlContext,
        _old_state: &Component<CreatePointProperties>,
        new_state: Component<CreatePointProperties>,
    ) -> Result<Component<CreatePointProperties>, SchemaError> {
        Ok(self.refresh(context, new_state))
    }

    fn update_input_port_slug(
        &self,
        context: &SqlContext,
        component: Component<CreatePointProperties>,
    ) -> Result<Component<CreatePointProperties>, SchemaError> {
        Ok(self.refresh(context, component))
    }

    fn apply(&self, properties: &CreatePointProperties) -> String {
        let table_name = properties.relation_name.join(",");
        let grouped: Vec<Vec<String>> = properties
            .add_fields
            .iter()
            .map(|mapping| {
                vec![
                    mapping.longitude_column_name.clone(),
                    mapping.latitude_column_name.clone(),
                    mapping.target_column_name.clone(),
                ]
            })
            .collect();

        let arguments = vec![quoted(&table_name), nested_display_list(&grouped)];
        macro_call(self.project_name(), self.name(), &arguments)
    }

    fn load_properties(
        &self,
        properties: &MacroProperties,
    ) -> Result<CreatePointProperties, ParameterError> {
        let parameters = ParameterMap::from_parameters(&properties.parameters);
        // Point mappings were never persisted; only the relation list
        // survives a save/load cycle.
        Ok(CreatePointProperties {
            relation_name: parameters.string_list("relation_name")?,
            ..CreatePointProperties::default()
        })
    }

    fn unload_properties(&self, properties: &CreatePointProperties) -> MacroProperties {
        MacroProperties {
            macro_name: self.name().to_string(),
            project_name: self.project_name().to_string(),
            parameters: vec![MacroParameter::new(
                "relation_name",
                display_list(&properties.relation_name),
            )],
        }
    }
}
