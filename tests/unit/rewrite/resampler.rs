use super::*;
use crate::graft::builder::GraftBuilder;
use crate::graft::node::Node;
use pretty_assertions::assert_eq;
use std::collections::BTreeMap;

fn source(
    b: &mut GraftBuilder,
    op_type: &str,
    resampler: Option<&str>,
) -> crate::graft::node::NodeKey {
    let product = b.literal("p1");
    let bands = b.literal("red");
    let mut kwargs = BTreeMap::new();
    kwargs.insert("pad".to_string(), b.literal(4));
    if let Some(r) = resampler {
        kwargs.insert("resampler".to_string(), b.literal(r));
    }
    b.push_op_with_kwargs(op_type, vec![product, bands], kwargs)
}

fn mixed() -> Graft {
    let mut b = GraftBuilder::new();
    let mosaic = source(&mut b, op_kind::MOSAIC, Some("near"));
    let stack = source(&mut b, op_kind::STACK_SCENES, None);
    let reduced = b.push_op("reduction", vec![stack]);
    let root = b.push_op("add", vec![mosaic, reduced]);
    b.finish(root).unwrap()
}

fn resampler_values(g: &Graft) -> Vec<(String, Option<Value>)> {
    g.nodes()
        .filter_map(|(_, n)| n.as_op())
        .filter(|op| op_kind::RESAMPLER_BEARING.contains(&op.op_type.as_str()))
        .map(|op| {
            let value = op
                .kwargs
                .get("resampler")
                .map(|k| g.resolve_literal(k.as_str()).unwrap().clone());
            (op.op_type.clone(), value)
        })
        .collect()
}

#[test]
fn every_bearing_node_gets_the_new_resampler() {
    let g = mixed();
    let out = update_resampler(&g, ResampleAlgorithm::Cubic).unwrap();
    let mut values = resampler_values(&out);
    values.sort_by(|a, b| a.0.cmp(&b.0));
    assert_eq!(
        values,
        vec![
            ("mosaic".to_string(), Some(Value::from("cubic"))),
            ("stack_scenes".to_string(), Some(Value::from("cubic"))),
        ]
    );
}

#[test]
fn other_arguments_are_untouched() {
    let g = mixed();
    let out = update_resampler(&g, ResampleAlgorithm::Average).unwrap();
    for (_, node) in out.nodes() {
        let Some(op) = node.as_op() else { continue };
        for (name, key) in &op.kwargs {
            if name == "pad" {
                assert_eq!(out.resolve(key.as_str()).unwrap(), &Node::Literal(Value::from(4)));
            }
        }
    }
    assert_eq!(out.root_op_type(), Some("add"));
    assert_eq!(out.len(), g.len());
}

#[test]
fn input_graft_is_not_modified() {
    let g = mixed();
    let before = g.clone();
    let out = update_resampler(&g, ResampleAlgorithm::Mode).unwrap();
    assert_eq!(g, before);
    assert_ne!(out.cache_id(), g.cache_id());
}

#[test]
fn resampler_names_are_validated() {
    for r in ResampleAlgorithm::ALL {
        assert_eq!(r.as_str().parse::<ResampleAlgorithm>().unwrap(), r);
        assert_eq!(serde_json::to_value(r).unwrap(), Value::from(r.as_str()));
    }
    let err = "sharpest".parse::<ResampleAlgorithm>().unwrap_err();
    assert!(matches!(err, GraftError::Validation(_)));
}
