use gem_sdk::{MacroSpec, ProviderType};
use spatial_gems::{
    Buffer, CreatePoint, Distance, FindNearest, HeatMap, PolyBuild, Simplify, SpatialMatch,
};

#[test]
fn buffer_dialog_binds_geometry_distance_and_units() {
    let json = serde_json::to_value(Buffer.dialog()).expect("dialog should serialize");

    assert_eq!(json["title"], "Buffer");
    let controls = &json["elements"][0]["columns"][1]["content"][0]["elements"];
    assert_eq!(controls[0]["kind"], "alertBox");
    assert_eq!(controls[0]["variant"], "warning");
    assert_eq!(controls[1]["kind"], "schemaColumnsDropdown");
    assert_eq!(controls[1]["property"], "geometryColumnName");
    assert_eq!(controls[2]["kind"], "numberBox");
    assert_eq!(controls[2]["property"], "distance");
    assert_eq!(controls[3]["options"][0]["value"], "miles");
    assert_eq!(controls[3]["options"][1]["value"], "kms");
}

#[test]
fn buffer_ports_allow_adding_and_deleting_inputs() {
    let json = serde_json::to_value(Buffer.dialog()).expect("dialog should serialize");

    let ports = &json["elements"][0]["columns"][0]["content"][0];
    assert_eq!(ports["kind"], "ports");
    assert_eq!(ports["allowInputAddOrDelete"], true);
}

#[test]
fn create_point_dialog_repeats_a_row_per_mapping() {
    let json = serde_json::to_value(CreatePoint.dialog()).expect("dialog should serialize");

    let stack = &json["elements"][0]["columns"][1]["content"][0]["elements"];
    let list = &stack[2]["elements"][0]["elements"][0];
    assert_eq!(list["kind"], "orderedList");
    assert_eq!(list["property"], "addFields");
    assert_eq!(list["emptyContainerText"], "Add a Point");
    assert_eq!(list["allowDelete"], true);
    let row_columns = &list["row"][0]["columns"];
    assert_eq!(
        row_columns[0]["content"][0]["property"],
        "record.longitudeColumnName"
    );
    assert_eq!(
        row_columns[1]["content"][0]["property"],
        "record.latitudeColumnName"
    );
    assert_eq!(
        row_columns[2]["content"][0]["property"],
        "record.targetColumnName"
    );
    assert_eq!(stack[3]["kind"], "button");
    assert_eq!(stack[3]["action"], "onButtonClick");
}

#[test]
fn distance_units_select_renders_only_when_distance_output_is_on() {
    let json = serde_json::to_value(Distance.dialog()).expect("dialog should serialize");

    let output_step =
        &json["elements"][0]["columns"][1]["content"][0]["elements"][1]["elements"][0];
    let condition = &output_step["elements"][0]["elements"][2];
    assert_eq!(condition["kind"], "condition");
    assert_eq!(condition["expression"], "component.properties.outputDistance");
    assert_eq!(condition["equals"], "true");
    assert_eq!(condition["then"][0]["property"], "units");
}

#[test]
fn find_nearest_binds_each_centroid_to_its_own_port_schema() {
    let json = serde_json::to_value(FindNearest.dialog()).expect("dialog should serialize");

    let fields = &json["elements"][0]["columns"][1]["content"][0]["elements"][0]["elements"][0]
        ["elements"][0]["elements"][1]["columns"];
    assert_eq!(
        fields[1]["content"][0]["schemaBinding"],
        "component.ports.inputs[0].schema"
    );
    assert_eq!(
        fields[3]["content"][0]["schemaBinding"],
        "component.ports.inputs[1].schema"
    );
}

#[test]
fn simplify_preview_warning_is_gated_on_databricks() {
    let json = serde_json::to_value(Simplify.dialog()).expect("dialog should serialize");

    let condition = &json["elements"][0]["columns"][1]["content"][0]["elements"][0];
    assert_eq!(condition["kind"], "condition");
    assert_eq!(condition["expression"], "$.sql.metainfo.providerType");
    assert_eq!(condition["equals"], "databricks");
    assert_eq!(condition["then"][0]["kind"], "alertBox");
}

#[test]
fn spatial_match_offers_the_six_match_types() {
    let json = serde_json::to_value(SpatialMatch.dialog()).expect("dialog should serialize");

    let select = &json["elements"][0]["columns"][1]["content"][0]["elements"][2]["elements"][0]
        ["elements"][0];
    assert_eq!(select["property"], "match_type");
    let values: Vec<&str> = select["options"]
        .as_array()
        .expect("options should be an array")
        .iter()
        .map(|option| option["value"].as_str().expect("value should be a string"))
        .collect();
    assert_eq!(
        values,
        vec![
            "intersects",
            "contains",
            "within",
            "touches",
            "touches_or_intersects",
            "envelope",
        ]
    );
}

#[test]
fn gem_metadata_matches_the_macro_library() {
    assert_eq!(Buffer.name(), "Buffer");
    assert_eq!(Buffer.project_name(), "prophecy_spatial");
    assert_eq!(Buffer.category(), "Spatial");
    assert_eq!(Buffer.min_input_ports(), 1);
    assert_eq!(FindNearest.min_input_ports(), 2);
    assert_eq!(SpatialMatch.min_input_ports(), 2);

    assert_eq!(
        CreatePoint.supported_providers(),
        &[ProviderType::Databricks, ProviderType::ProphecyManaged]
    );
    assert_eq!(
        Distance.supported_providers(),
        &[ProviderType::Databricks, ProviderType::ProphecyManaged]
    );
    for providers in [
        Buffer.supported_providers(),
        FindNearest.supported_providers(),
        HeatMap.supported_providers(),
        PolyBuild.supported_providers(),
        Simplify.supported_providers(),
        SpatialMatch.supported_providers(),
    ] {
        assert_eq!(providers, &[ProviderType::Databricks]);
    }
}
