use gem_sdk::MacroSpec;
use spatial_gems::{
    Buffer, BufferProperties, CreatePoint, CreatePointProperties, Distance, DistanceProperties,
    FindNearest, FindNearestProperties, HeatMap, HeatMapProperties, PointMapping, PolyBuild,
    PolyBuildProperties, Simplify, SimplifyProperties, SpatialMatch, SpatialMatchProperties,
};

#[test]
fn buffer_renders_macro_call_with_raw_schema_blob() {
    let schema = r#"[{"name":"geom","dataType":"string"}]"#;
    let properties = BufferProperties {
        relation_name: vec!["orders".to_string()],
        schema: schema.to_string(),
        distance: 5,
        unit: "miles".to_string(),
        geometry_column_name: "geom".to_string(),
    };

    assert_eq!(
        Buffer.apply(&properties),
        format!("{{{{ prophecy_spatial.Buffer('orders',{schema},'geom',5,'miles') }}}}")
    );
}

#[test]
fn buffer_joins_multiple_relations_into_one_quoted_argument() {
    let properties = BufferProperties {
        relation_name: vec!["orders".to_string(), "customers".to_string()],
        ..BufferProperties::default()
    };

    let call = Buffer.apply(&properties);

    assert!(call.starts_with("{{ prophecy_spatial.Buffer('orders,customers',"));
}

#[test]
fn create_point_renders_mappings_as_nested_list_literal() {
    let properties = CreatePointProperties {
        relation_name: vec!["trips".to_string()],
        add_fields: vec![
            PointMapping {
                longitude_column_name: "lon".to_string(),
                latitude_column_name: "lat".to_string(),
                target_column_name: "point".to_string(),
            },
            PointMapping {
                longitude_column_name: "lon2".to_string(),
                latitude_column_name: "lat2".to_string(),
                target_column_name: "point2".to_string(),
            },
        ],
    };

    assert_eq!(
        CreatePoint.apply(&properties),
        "{{ prophecy_spatial.CreatePoint('trips',\
         [['lon', 'lat', 'point'], ['lon2', 'lat2', 'point2']]) }}"
    );
}

#[test]
fn distance_renders_flags_lowercase_and_appends_all_column_names() {
    let properties = DistanceProperties {
        relation_name: vec!["trips".to_string()],
        schema: r#"[{"name":"a","dataType":"string"},{"name":"b","dataType":"string"}]"#
            .to_string(),
        source_column_names: "a".to_string(),
        destination_column_names: "b".to_string(),
        output_distance: true,
        ..DistanceProperties::default()
    };

    assert_eq!(
        Distance.apply(&properties),
        "{{ prophecy_spatial.Distance('trips','a','b','point','point',true,'kms',false,false,\
         ['a', 'b']) }}"
    );
}

#[test]
fn distance_with_unreadable_snapshot_renders_empty_column_list() {
    let properties = DistanceProperties {
        schema: "not json".to_string(),
        ..DistanceProperties::default()
    };

    let call = Distance.apply(&properties);

    assert!(call.ends_with(",[]) }}"));
}

#[test]
fn find_nearest_renders_relation_list_literal_and_both_schemas() {
    let properties = FindNearestProperties {
        relation_name: vec!["stores".to_string(), "customers".to_string()],
        source_schema: r#"[{"name":"s","dataType":"string"}]"#.to_string(),
        target_schema: r#"[{"name":"t","dataType":"string"}]"#.to_string(),
        source_column_name: "s".to_string(),
        destination_column_name: "t".to_string(),
        nearest_points: 3,
        max_distance: 50,
        ignore_zero_distance: true,
        ..FindNearestProperties::default()
    };

    assert_eq!(
        FindNearest.apply(&properties),
        "{{ prophecy_spatial.FindNearest(['stores', 'customers'],'s','t','point','point',3,50,\
         'kms',true,['s'],['t']) }}"
    );
}

#[test]
fn heat_map_renders_resolution_and_grid_distance_unquoted() {
    let properties = HeatMapProperties {
        relation_name: vec!["pings".to_string()],
        longitude_column_name: "lon".to_string(),
        latitude_column_name: "lat".to_string(),
        heat_column_name: "weight".to_string(),
        ..HeatMapProperties::default()
    };

    assert_eq!(
        HeatMap.apply(&properties),
        "{{ prophecy_spatial.HeatMap('pings','lon','lat',8,1,'weight','constant') }}"
    );
}

#[test]
fn poly_build_renders_six_quoted_arguments() {
    let properties = PolyBuildProperties {
        relation_name: vec!["routes".to_string()],
        longitude_column_name: "lon".to_string(),
        latitude_column_name: "lat".to_string(),
        group_column_name: "route_id".to_string(),
        sequence_column_name: "seq".to_string(),
        ..PolyBuildProperties::default()
    };

    assert_eq!(
        PolyBuild.apply(&properties),
        "{{ prophecy_spatial.PolyBuild('routes','SequencePolygon','lon','lat','route_id',\
         'seq') }}"
    );
}

#[test]
fn simplify_renders_tolerance_verbatim() {
    let properties = SimplifyProperties {
        relation_name: vec!["shapes".to_string()],
        schema: r#"[{"name":"geom","dataType":"string"}]"#.to_string(),
        tolerance: "0.25".to_string(),
        geom_column_name: "geom".to_string(),
        ..SimplifyProperties::default()
    };

    assert_eq!(
        Simplify.apply(&properties),
        "{{ prophecy_spatial.Simplify('shapes',\
         [{\"name\":\"geom\",\"dataType\":\"string\"}],'geom',0.25,'kms') }}"
    );
}

#[test]
fn spatial_match_renders_per_port_column_lists() {
    let properties = SpatialMatchProperties {
        relation_name: vec!["points".to_string(), "zones".to_string()],
        schemas: vec![
            vec!["geo".to_string()],
            vec!["boundary".to_string(), "zone_id".to_string()],
        ],
        source_column: "geo".to_string(),
        target_column: "boundary".to_string(),
        match_type: "within".to_string(),
    };

    assert_eq!(
        SpatialMatch.apply(&properties),
        "{{ prophecy_spatial.SpatialMatch(['points', 'zones'],\
         [['geo'], ['boundary', 'zone_id']],'geo','boundary','within') }}"
    );
}

#[test]
fn quoted_arguments_embed_quotes_unescaped() {
    let properties = BufferProperties {
        relation_name: vec!["o'brien".to_string()],
        ..BufferProperties::default()
    };

    let call = Buffer.apply(&properties);

    assert!(call.contains("('o'brien',"));
}
