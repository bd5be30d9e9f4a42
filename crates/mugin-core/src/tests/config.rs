use crate::merge::deep_merge_value;
use crate::*;
use serde_json::json;

#[test]
fn graph_config_overrides_merge_onto_defaults() {
    let base = GraphConfig::default();
    assert_eq!(base.max_weight, config::DEFAULT_MAX_WEIGHT);
    let cfg = base.with_overrides(&json!({ "maxWeight": 5 })).unwrap();
    assert_eq!(cfg.max_weight, 5);
    let same = base.with_overrides(&json!({ "unrelated": true })).unwrap();
    assert_eq!(same, base);
}

#[test]
fn graph_config_rejects_mistyped_override() {
    let err = GraphConfig::default()
        .with_overrides(&json!({ "maxWeight": "many" }))
        .unwrap_err();
    assert!(matches!(err, Error::Json(_)));
}

#[test]
fn deep_merge_merges_objects_and_replaces_everything_else() {
    let mut base = json!({
        "a": { "b": 1, "c": [1, 2] },
        "d": "keep"
    });
    deep_merge_value(&mut base, &json!({ "a": { "c": [3] , "e": null } }));
    assert_eq!(
        base,
        json!({
            "a": { "b": 1, "c": [3], "e": null },
            "d": "keep"
        })
    );
}
