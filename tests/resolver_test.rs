mod common;

use common::{alias, analysis_of, collection, fixture_analysis, rgb, snapshot, variable};
use serde_json::json;
use tokenweave::format::ResolvedValue;
use tokenweave::resolver::Outcome;
use tokenweave::Layer;

#[test]
fn test_component_token_resolves_through_three_layers() {
    let analysis = fixture_analysis();
    let resolution = analysis.resolve("3:30", None).unwrap();

    assert_eq!(resolution.value, ResolvedValue::Text("#1484FF".into()));
    assert_eq!(resolution.outcome, Outcome::Literal);

    let hops: Vec<(&str, Layer)> = resolution
        .chain
        .iter()
        .map(|hop| (hop.flat_id.as_str(), hop.layer))
        .collect();
    assert_eq!(
        hops,
        vec![
            ("kds-comp-primary", Layer::Component),
            ("kds-sys-color-primary", Layer::Semantic),
            ("kds-sys-color-base-blue", Layer::Primitive),
        ]
    );
    assert_eq!(resolution.chain[2].name, "blue");
    assert_eq!(resolution.chain[2].path, "base");
    assert_eq!(resolution.chain[0].path, "");
}

#[test]
fn test_requested_mode_selects_the_first_value() {
    let analysis = fixture_analysis();

    let dark = analysis.resolve("2:20", Some("2:1")).unwrap();
    assert_eq!(dark.value.to_string(), "#0A5FCC");

    let by_name = analysis.resolve("kds-sys-color-primary", Some("dark")).unwrap();
    assert_eq!(by_name, dark);

    let light = analysis.resolve("2:20", None).unwrap();
    assert_eq!(light.value.to_string(), "#1484FF");
}

#[test]
fn test_unknown_mode_falls_back_to_default() {
    let analysis = fixture_analysis();
    let resolution = analysis.resolve("3:30", Some("no-such-mode")).unwrap();
    assert_eq!(resolution.value.to_string(), "#1484FF");
}

#[test]
fn test_targets_are_read_in_their_own_default_mode() {
    // The component token has a single mode; the semantic target has two and must be read
    // in its default (light) mode, not in the component's mode id.
    let analysis = fixture_analysis();
    let resolution = analysis.resolve("3:30", Some("3:0")).unwrap();
    assert_eq!(resolution.value.to_string(), "#1484FF");
}

#[test]
fn test_cycle_halts_with_placeholder() {
    let analysis = fixture_analysis();
    let resolution = analysis.resolve("3:32", None).unwrap();

    assert_eq!(resolution.outcome, Outcome::Cycle);
    assert!(resolution.value.is_unresolved());
    assert_eq!(resolution.value.to_string(), "Alias");

    let names: Vec<&str> = resolution.chain.iter().map(|hop| hop.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b"]);
}

#[test]
fn test_missing_target_is_unresolved_not_an_error() {
    let analysis = fixture_analysis();
    let resolution = analysis.resolve("2:24", None).unwrap();

    assert_eq!(resolution.outcome, Outcome::Unresolved);
    assert_eq!(resolution.value, ResolvedValue::Unresolved);
    assert_eq!(resolution.chain.len(), 1);
    assert!(!resolution.is_resolved());
}

#[test]
fn test_missing_target_falls_back_to_canonical_owner() {
    let primitive = snapshot(
        json!({ "VariableCollectionId:1:0": collection("Colors", "1:0") }),
        json!({ "VariableID:1:1": variable("base/blue", "VariableCollectionId:1:0", "1:0", rgb(0.0, 0.0, 1.0)) }),
    );
    let semantic = snapshot(
        json!({ "VariableCollectionId:2:0": collection("Colors", "2:0") }),
        json!({ "VariableID:2:1": variable("base/blue", "VariableCollectionId:2:0", "2:0", alias("VariableID:7:77")) }),
    );
    let analysis = analysis_of(&[(Layer::Primitive, primitive), (Layer::Semantic, semantic)]);

    let resolution = analysis.resolve("2:1", None).unwrap();
    assert_eq!(resolution.outcome, Outcome::Literal);
    assert_eq!(resolution.value.to_string(), "#0000FF");

    let layers: Vec<Layer> = resolution.chain.iter().map(|hop| hop.layer).collect();
    assert_eq!(layers, vec![Layer::Semantic, Layer::Primitive]);
}

#[test]
fn test_consecutive_hops_for_the_same_token_collapse() {
    let primitive = snapshot(
        json!({ "VariableCollectionId:1:0": collection("Colors", "1:0") }),
        json!({ "VariableID:1:1": variable("base", "VariableCollectionId:1:0", "1:0", rgb(1.0, 1.0, 1.0)) }),
    );
    let semantic = snapshot(
        json!({
            "VariableCollectionId:2:0": collection("Theme", "2:0"),
            "VariableCollectionId:2:1": collection("Legacy", "2:1")
        }),
        json!({
            "VariableID:2:1": variable("surface/bright", "VariableCollectionId:2:0", "2:0", alias("VariableID:2:2")),
            "VariableID:2:2": variable("surface/bright", "VariableCollectionId:2:1", "2:1", alias("VariableID:1:1"))
        }),
    );
    let analysis = analysis_of(&[(Layer::Primitive, primitive), (Layer::Semantic, semantic)]);

    let resolution = analysis.resolve("2:1", None).unwrap();
    assert_eq!(resolution.value.to_string(), "#FFFFFF");
    let hops: Vec<&str> = resolution.chain.iter().map(|hop| hop.flat_id.as_str()).collect();
    assert_eq!(hops, vec!["kds-theme-surface-bright", "kds-sys-color-base"]);
}

#[test]
fn test_literals_are_formatted_by_token_name() {
    let analysis = fixture_analysis();
    let value = |token: &str| analysis.resolve(token, None).unwrap().value;

    assert_eq!(value("1:13").to_string(), "16px");
    assert_eq!(value("1:14").to_string(), "0");
    assert_eq!(value("1:16").to_string(), "45deg");
    assert_eq!(value("1:12").to_string(), "rgba(0, 0, 0, 0.32)");
    assert_eq!(value("1:15"), ResolvedValue::Weight(700));
    assert_eq!(serde_json::to_value(value("1:15")).unwrap(), json!(700));
    assert_eq!(serde_json::to_value(value("2:24")).unwrap(), json!("Alias"));
}

#[test]
fn test_resolution_is_repeatable() {
    let analysis = fixture_analysis();
    let resolver = analysis.resolver();
    let variable = analysis.store().get("3:30").unwrap();

    let first = resolver.resolve_default(variable);
    let second = resolver.resolve(variable, None);
    assert_eq!(first, second);
}

#[test]
fn test_unknown_token_is_none() {
    let analysis = fixture_analysis();
    assert!(analysis.resolve("9:99", None).is_none());
}
