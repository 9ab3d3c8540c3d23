use super::*;
use crate::graft::node::ParamType;
use serde_json::json;

fn scaled(factor: f64) -> Graft {
    let mut b = GraftBuilder::new();
    let product = b.literal("p1");
    let load = b.push_op("load", vec![product]);
    let f = b.literal(factor);
    let mul = b.push_op("mul", vec![load, f]);
    b.finish(mul).unwrap()
}

#[test]
fn cache_id_is_a_pure_function_of_structure() {
    let a = scaled(2.0);
    let b = scaled(2.0);
    assert_eq!(a.cache_id(), b.cache_id());
    assert_eq!(compute_cache_id(&a), a.cache_id());
    assert_ne!(scaled(3.0).cache_id(), a.cache_id());
}

#[test]
fn resolve_reports_unknown_keys() {
    let g = scaled(2.0);
    let root = g.returns().as_str().to_string();
    assert!(g.resolve(&root).unwrap().is_op("mul"));
    let err = g.resolve("does-not-exist").unwrap_err();
    assert!(matches!(err, GraftError::UnknownKey(_)));
}

#[test]
fn resolve_literal_rejects_operations() {
    let g = scaled(2.0);
    let root = g.returns().as_str().to_string();
    assert!(g.resolve_literal(&root).is_err());
}

#[test]
fn serialized_graft_is_flat_mapping() {
    let g = scaled(2.0);
    let v = serde_json::to_value(&g).unwrap();
    let obj = v.as_object().unwrap();
    assert_eq!(obj.len(), g.len() + 2);
    assert_eq!(obj[RETURNS_KEY], json!(g.returns().as_str()));
    assert_eq!(obj[CACHE_ID_KEY], json!(g.cache_id().to_string()));
}

#[test]
fn deserialize_round_trips_exactly() {
    let g = scaled(2.0);
    let text = serde_json::to_string(&g).unwrap();
    let back: Graft = serde_json::from_str(&text).unwrap();
    assert_eq!(back, g);
}

#[test]
fn deserialize_ignores_stored_cache_id_and_rekeys() {
    let raw = json!({
        "a": "p1",
        "b": {"op_type": "load", "args": ["a"]},
        "returns": "b",
        "cache_id": "stale"
    });
    let g: Graft = serde_json::from_value(raw).unwrap();
    assert_ne!(g.returns().as_str(), "b");
    assert_eq!(g.cache_id(), compute_cache_id(&g));

    let mut b = GraftBuilder::new();
    let p = b.literal("p1");
    let load = b.push_op("load", vec![p]);
    assert_eq!(g, b.finish(load).unwrap());
}

#[test]
fn deserialize_rejects_malformed_grafts() {
    let missing_returns = json!({"a": 1});
    assert!(serde_json::from_value::<Graft>(missing_returns).is_err());

    let dangling = json!({"b": {"op_type": "neg", "args": ["a"]}, "returns": "b"});
    let err = serde_json::from_value::<Graft>(dangling).unwrap_err();
    assert!(err.to_string().contains("undefined key"));
}

#[test]
fn deserialize_rejects_record_lookalikes() {
    for bad in [
        json!({"a": {"op_type": "add", "args": ["x"], "extra": 1}, "x": 1, "returns": "a"}),
        json!({"a": {"args": ["x"]}, "x": 1, "returns": "a"}),
        json!({"a": {"param": "t", "type": "Datetime", "default": 0}, "returns": "a"}),
        json!({"a": {"literal": 1, "other": 2}, "returns": "a"}),
    ] {
        let err = serde_json::from_value::<Graft>(bad).unwrap_err();
        assert!(err.to_string().contains("malformed"), "{err}");
    }
}

#[test]
fn inline_non_string_arguments_become_literal_nodes() {
    let g: Graft = serde_json::from_value(json!({
        "x": "p1",
        "a": {"op_type": "add", "args": ["x", 2], "kwargs": {"scale": [1.0, 2.0]}},
        "returns": "a"
    }))
    .unwrap();
    let expected = {
        let mut b = GraftBuilder::new();
        let x = b.literal("p1");
        let two = b.literal(2);
        let scale = b.literal(json!([1.0, 2.0]));
        let kwargs = BTreeMap::from([("scale".to_string(), scale)]);
        let root = b.push_op_with_kwargs("add", vec![x, two], kwargs);
        b.finish(root).unwrap()
    };
    assert_eq!(g, expected);
    assert_eq!(g.len(), 4);
}

#[test]
fn inline_keys_do_not_clash_with_existing_entries() {
    let g: Graft = serde_json::from_value(json!({
        "a/1": "taken",
        "x": "p1",
        "a": {"op_type": "pair", "args": ["x", {"pad": 3}, "a/1"]},
        "returns": "a"
    }))
    .unwrap();
    let op = g.root().as_op().unwrap();
    let args: Vec<&Value> = op
        .args
        .iter()
        .map(|k| g.resolve_literal(k.as_str()).unwrap())
        .collect();
    assert_eq!(args, [&json!("p1"), &json!({"pad": 3}), &json!("taken")]);
}

#[test]
fn string_arguments_must_name_nodes() {
    let text = json!({"a": {"op_type": "mosaic", "args": ["p1", "red green"]}, "returns": "a"});
    let err = serde_json::from_value::<Graft>(text).unwrap_err();
    assert!(err.to_string().contains("undefined key 'p1'"), "{err}");
    assert!(err.to_string().contains("string arguments name nodes"), "{err}");
}

#[test]
fn reset_graft_is_idempotent_on_canonical_grafts() {
    let g = scaled(2.0);
    assert_eq!(reset_graft(&g).unwrap(), g);
}

#[test]
fn parameters_are_listed() {
    let mut b = GraftBuilder::new();
    let start = b.param(&Parameter::datetime("start"));
    let root = b.push_op("load", vec![start]);
    let g = b.finish(root).unwrap();
    let params = g.parameters();
    assert_eq!(params.len(), 1);
    assert_eq!(params[0].name, "start");
    assert_eq!(params[0].param_type, ParamType::Datetime);
}

#[test]
fn rewrite_leaves_input_untouched() {
    let g = scaled(2.0);
    let before = g.clone();
    let rewritten = g
        .rewrite(|b, node| {
            if node.is_op("mul") {
                let two = b.literal(10.0);
                let args = node.references().into_iter().take(1).cloned().collect();
                return Ok(Node::Op(crate::graft::node::OpNode::new(
                    "mul",
                    vec![args, vec![two]].concat(),
                )));
            }
            Ok(node)
        })
        .unwrap();
    assert_eq!(g, before);
    assert_eq!(rewritten, scaled(10.0));
}
