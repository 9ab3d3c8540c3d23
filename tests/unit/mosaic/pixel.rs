use super::*;
use crate::algebra::operand::ComputeMap;
use crate::graft::graph::Graft;
use crate::mosaic::model::MosaicMetadata;
use serde_json::json;

fn mosaic() -> Mosaic {
    Mosaic::new(
        Graft::nullary("load"),
        MosaicMetadata::with_bands(vec!["red".to_string()]),
    )
}

fn literal_args(m: &Mosaic) -> Vec<Value> {
    let g = m.graft();
    g.root().as_op().unwrap().args[1..]
        .iter()
        .map(|k| g.resolve_literal(k.as_str()).unwrap().clone())
        .collect()
}

#[test]
fn clip_references_both_bounds() {
    let clipped = mosaic().clip(0.0, 0.3).unwrap();
    assert_eq!(clipped.graft().root_op_type(), Some(op_kind::CLIP));
    assert_eq!(literal_args(&clipped), vec![json!(0.0), json!(0.3)]);
    assert_eq!(clipped.bands(), ["red".to_string()]);
}

#[test]
fn clip_requires_strict_order() {
    for (lo, hi) in [(1.0, 1.0), (2.0, 1.0), (f64::NAN, 1.0)] {
        let err = mosaic().clip(lo, hi).unwrap_err();
        assert!(matches!(err, GraftError::Validation(_)), "{lo} {hi}");
    }
    let msg = mosaic().clip(5.0, 2.0).unwrap_err().to_string();
    assert!(msg.contains('5') && msg.contains('2'), "{msg}");
}

#[test]
fn mask_merges_the_mask_graft() {
    let cloud = ComputeMap::new(Graft::nullary("cloud_mask"));
    let masked = mosaic().mask(&cloud);
    let g = masked.graft();
    let op = g.root().as_op().unwrap();
    assert_eq!(op.op_type, op_kind::MASK);
    assert!(g.resolve(op.args[1].as_str()).unwrap().is_op("cloud_mask"));
}

#[test]
fn filled_takes_any_json_scalar() {
    assert_eq!(literal_args(&mosaic().filled(0)), vec![json!(0)]);
    assert_eq!(literal_args(&mosaic().filled(-9999.5)), vec![json!(-9999.5)]);
    assert_eq!(
        mosaic().filled(0).graft().root_op_type(),
        Some(op_kind::FILL_MASK)
    );
}
