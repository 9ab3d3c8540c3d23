use super::*;
use crate::graft::builder::GraftBuilder;
use serde_json::json;
use std::collections::BTreeMap;

#[test]
fn only_matching_op_types_change() {
    let mut b = GraftBuilder::new();
    let x = b.literal(1);
    let mut kwargs = BTreeMap::new();
    kwargs.insert("mode".to_string(), b.literal("a"));
    let target = b.push_op_with_kwargs("target", vec![x.clone()], kwargs.clone());
    let other = b.push_op_with_kwargs("other", vec![x], kwargs);
    let root = b.push_op("pair", vec![target, other]);
    let g = b.finish(root).unwrap();

    let out = update_kwarg(&g, &["target"], "mode", json!("b")).unwrap();
    let mode_of = |op_type: &str| {
        out.nodes()
            .filter_map(|(_, n)| n.as_op())
            .find(|op| op.op_type == op_type)
            .map(|op| out.resolve_literal(op.kwargs["mode"].as_str()).unwrap().clone())
    };
    assert_eq!(mode_of("target"), Some(json!("b")));
    assert_eq!(mode_of("other"), Some(json!("a")));
}

#[test]
fn no_match_keeps_the_graft() {
    let g = Graft::nullary("load");
    assert_eq!(update_kwarg(&g, &["mosaic"], "resampler", json!("near")).unwrap(), g);
}
