use super::*;
use crate::algebra::operand::ComputeMap;
use crate::graft::graph::Graft;
use crate::mosaic::model::{Mosaic, MosaicMetadata};

fn mosaic() -> Mosaic {
    Mosaic::new(
        Graft::nullary("load"),
        MosaicMetadata::with_bands(vec!["ndvi".to_string()]),
    )
}

#[test]
fn comparisons_emit_named_nodes() {
    let m = mosaic();
    let cases = [
        (m.gt(0.5_f64), "gt"),
        (m.ge(0.5_f64), "ge"),
        (m.lt(0.5_f64), "lt"),
        (m.le(0.5_f64), "le"),
        (m.equal(0.5_f64), "eq"),
        (m.not_equal(0.5_f64), "ne"),
    ];
    for (out, name) in cases {
        assert_eq!(out.graft().root_op_type(), Some(name));
        assert_eq!(out.bands(), m.bands());
    }
}

#[test]
fn floor_div_and_pow() {
    let m = mosaic();
    assert_eq!(m.floor_div(3_i32).graft().root_op_type(), Some("floordiv"));
    assert_eq!(m.pow(&m).graft().root_op_type(), Some("pow"));
}

#[test]
fn sign_helpers() {
    let m = mosaic();
    assert_eq!(m.negate(), -&m);
    assert_eq!(m.positive().graft().root_op_type(), Some("pos"));
    assert_eq!(Signed::abs(&m).graft().root_op_type(), Some("abs"));
}

#[test]
fn logical_methods_match_operators() {
    let m = mosaic();
    let other = ComputeMap::new(Graft::nullary("cloud_mask"));
    assert_eq!(m.logical_and(&other), &m & &other);
    assert_eq!(m.logical_or(&other), &m | &other);
    assert_eq!(m.logical_xor(&other), &m ^ &other);
    assert_eq!(m.logical_not(), !&m);
}

#[test]
fn compute_map_participates_too() {
    let map = ComputeMap::new(Graft::nullary("ones"));
    let out: ComputeMap = map.gt(1_i32);
    assert_eq!(out.graft().root_op_type(), Some("gt"));
}
