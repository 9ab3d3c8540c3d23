use super::*;
use crate::algebra::operand::ComputeMap;
use crate::graft::graph::Graft;
use crate::mosaic::model::{Mosaic, MosaicMetadata};
use serde_json::json;

fn mosaic() -> Mosaic {
    Mosaic::new(
        Graft::nullary("load"),
        MosaicMetadata::with_bands(vec!["red".to_string(), "nir".to_string()]),
    )
}

#[test]
fn band_reduction_names_the_single_output_band() {
    let out = mosaic().reduce(Reducer::Mean, Axis::Bands).unwrap();
    let g = out.graft();
    assert_eq!(g.root_op_type(), Some(crate::graft::op_kind::REDUCTION));
    let args = &g.root().as_op().unwrap().args;
    assert_eq!(g.resolve_literal(args[1].as_str()).unwrap(), &json!("mean"));
    assert_eq!(g.resolve_literal(args[2].as_str()).unwrap(), &json!("bands"));
    assert_eq!(out.bands(), ["mean".to_string()]);
}

#[test]
fn mosaic_rejects_other_axes() {
    for axis in [Axis::Pixels, Axis::Images] {
        let err = mosaic().reduce(Reducer::Sum, axis).unwrap_err();
        assert!(matches!(err, GraftError::NotImplemented(_)), "{err}");
        assert!(err.to_string().contains("Mosaic"));
    }
}

#[test]
fn compute_map_accepts_every_axis() {
    let map = ComputeMap::new(Graft::nullary("stack"));
    for axis in [Axis::Bands, Axis::Pixels, Axis::Images] {
        assert!(map.median(axis).is_ok());
    }
}

#[test]
fn shorthands_delegate_to_reduce() {
    let m = mosaic();
    assert_eq!(
        m.max(Axis::Bands).unwrap(),
        m.reduce(Reducer::Max, Axis::Bands).unwrap()
    );
    assert_eq!(m.std(Axis::Bands).unwrap().bands(), ["std".to_string()]);
}

#[test]
fn names_parse_back() {
    for r in [
        Reducer::Sum,
        Reducer::Mean,
        Reducer::Min,
        Reducer::Max,
        Reducer::Median,
        Reducer::Std,
        Reducer::Prod,
    ] {
        assert_eq!(r.as_str().parse::<Reducer>().unwrap(), r);
    }
    assert_eq!("pixels".parse::<Axis>().unwrap(), Axis::Pixels);
    assert!(matches!(
        "time".parse::<Axis>(),
        Err(GraftError::Validation(_))
    ));
}
