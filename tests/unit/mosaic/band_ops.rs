use super::*;
use crate::catalog::StaticCatalog;
use crate::graft::graph::Graft;
use crate::mosaic::model::MosaicMetadata;
use crate::mosaic::options::MosaicOptions;
use crate::rewrite::resampler::ResampleAlgorithm;
use pretty_assertions::assert_eq;
use serde_json::json;

fn rgb() -> Mosaic {
    let catalog = StaticCatalog::new().with_product("p1", "Product one");
    Mosaic::from_product_bands(
        &catalog,
        "p1",
        "red green blue",
        Some("2020-01-01".into()),
        Some("2020-06-01".into()),
        MosaicOptions::new().with_resampler(ResampleAlgorithm::Bilinear),
    )
    .unwrap()
}

fn derived() -> Mosaic {
    let m = rgb();
    (&m * 2.0_f64).pick_bands("red green blue").unwrap()
}

fn bands_literal(m: &Mosaic) -> serde_json::Value {
    let op = m.graft().root().as_op().unwrap();
    m.graft().resolve_literal(op.args[1].as_str()).unwrap().clone()
}

#[test]
fn pick_on_mosaic_root_rederives_the_node() {
    let m = rgb();
    let red = m.pick_bands(["red"]).unwrap();
    assert_eq!(red.bands(), ["red".to_string()]);
    assert_eq!(red.graft().root_op_type(), Some(op_kind::MOSAIC));
    assert_eq!(bands_literal(&red), json!("red"));
    assert_eq!(red.product_id(), Some("p1"));
    assert_eq!(red.start_datetime(), m.start_datetime());

    let kwargs = &red.graft().root().as_op().unwrap().kwargs;
    assert_eq!(
        red.graft().resolve_literal(kwargs["resampler"].as_str()).unwrap(),
        &json!("bilinear")
    );
    // shallow: product, bands, two dates, resampler, root
    assert_eq!(red.graft().len(), 6);
}

#[test]
fn rederived_pick_equals_a_fresh_factory_call() {
    let catalog = StaticCatalog::new().with_product("p1", "Product one");
    let fresh = Mosaic::from_product_bands(
        &catalog,
        "p1",
        "blue red",
        Some("2020-01-01".into()),
        Some("2020-06-01".into()),
        MosaicOptions::new().with_resampler(ResampleAlgorithm::Bilinear),
    )
    .unwrap();
    assert_eq!(rgb().pick_bands("blue red").unwrap(), fresh);
}

#[test]
fn pick_on_derived_graft_wraps() {
    let m = derived();
    let nir_free = m.pick_bands(vec!["green", "red"]).unwrap();
    assert_eq!(nir_free.graft().root_op_type(), Some(op_kind::PICK_BANDS));
    assert_eq!(nir_free.bands(), ["green", "red"].map(String::from));
    let op = nir_free.graft().root().as_op().unwrap();
    assert!(nir_free.graft().resolve(op.args[0].as_str()).unwrap().is_op("pick_bands"));
}

#[test]
fn pick_rejects_bands_outside_the_mosaic() {
    for m in [rgb(), derived()] {
        let err = m.pick_bands("red nir").unwrap_err();
        assert!(matches!(err, GraftError::Validation(_)));
        assert!(err.to_string().contains("nir"));
    }
}

#[test]
fn pick_does_not_modify_the_input() {
    let m = rgb();
    let before = m.clone();
    let _ = m.pick_bands("green").unwrap();
    assert_eq!(m, before);
}

#[test]
fn pick_with_unknown_bands_skips_the_subset_check() {
    let m = Mosaic::new(Graft::nullary("load"), MosaicMetadata::default());
    let picked = m.pick_bands("swir1").unwrap();
    assert_eq!(picked.bands(), ["swir1".to_string()]);
}

#[test]
fn unpack_many_and_one() {
    let m = rgb();
    let UnpackedBands::Many(parts) = m.unpack_bands(["red", "green"]).unwrap() else {
        panic!("expected one mosaic per band");
    };
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0].bands(), ["red".to_string()]);
    assert_eq!(parts[1].bands(), ["green".to_string()]);

    let one = m.unpack_bands(["red"]).unwrap();
    assert_eq!(one, UnpackedBands::One(m.pick_bands("red").unwrap()));
    assert_eq!(one.len(), 1);
}

#[test]
fn rename_requires_matching_length() {
    let m = rgb();
    let renamed = m.rename_bands("r g b").unwrap();
    assert_eq!(renamed.bands(), ["r", "g", "b"].map(String::from));
    assert_eq!(renamed.graft().root_op_type(), Some(op_kind::RENAME_BANDS));
    assert_eq!(renamed.product_id(), Some("p1"));

    assert!(m.rename_bands("r g").is_err());
}

#[test]
fn concat_with_band_names_selects_from_self() {
    let m = rgb();
    let stacked = m.concat_bands(["red"]).unwrap();
    assert_eq!(stacked.bands(), ["red", "green", "blue", "red"].map(String::from));
    let op = stacked.graft().root().as_op().unwrap();
    assert_eq!(op.op_type, op_kind::CONCAT_BANDS);
    assert_eq!(op.args.len(), 2);
}

#[test]
fn concat_with_foreign_band_names_fails() {
    let err = rgb().concat_bands(["nir"]).unwrap_err();
    assert!(matches!(err, GraftError::Validation(_)));
}

#[test]
fn concat_with_another_mosaic() {
    let nir = Mosaic::new(
        Graft::nullary("nir_source"),
        MosaicMetadata::with_bands(vec!["nir".to_string()]),
    );
    let stacked = rgb().pick_bands("red").unwrap().concat_bands(&nir).unwrap();
    assert_eq!(stacked.bands(), ["red", "nir"].map(String::from));
}
