use super::*;
use crate::catalog::StaticCatalog;
use crate::foundation::error::GraftError;
use crate::graft::graph::compute_cache_id;
use crate::graft::node::Parameter;
use crate::mosaic::options::MosaicOptions;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

fn ndvi() -> Mosaic {
    let catalog = StaticCatalog::new().with_product("p1", "Product one");
    let m = Mosaic::from_product_bands(
        &catalog,
        "p1",
        "red nir",
        Some("2021-05-01T12:30:00Z".into()),
        Some(Parameter::datetime("until").into()),
        MosaicOptions::new(),
    )
    .unwrap();
    let red = m.pick_bands("red").unwrap();
    let nir = m.pick_bands("nir").unwrap();
    (&nir - &red) / (&nir + &red)
}

#[test]
fn round_trip_is_exact() {
    let m = ndvi();
    let back = Mosaic::deserialize(&m.serialize().unwrap()).unwrap();
    assert_eq!(back, m);
    assert_eq!(back.graft().cache_id(), compute_cache_id(back.graft()));
}

#[test]
fn record_shape() {
    let m = ndvi();
    let v: Value = serde_json::from_str(&m.serialize().unwrap()).unwrap();
    assert_eq!(v["product_id"], json!("p1"));
    assert_eq!(v["bands"], json!(["nir"]));
    assert_eq!(v["start_datetime"], json!("2021-05-01T12:30:00Z"));
    assert_eq!(v["end_datetime"], json!("until"));
    assert_eq!(v["graft"]["returns"], json!(m.graft().returns().as_str()));
}

#[test]
fn space_delimited_bands_and_missing_fields_are_accepted() {
    let m = Mosaic::deserialize(
        r#"{
            "graft": {"a": "p1", "b": {"op_type": "mosaic", "args": ["a", "a"]}, "returns": "b"},
            "bands": "red green"
        }"#,
    )
    .unwrap();
    assert_eq!(m.bands(), ["red", "green"].map(String::from));
    assert_eq!(m.product_id(), None);
    assert_eq!(m.start_datetime(), None);
}

#[test]
fn stale_cache_id_is_replaced() {
    let m = ndvi();
    let mut v: Value = serde_json::from_str(&m.serialize().unwrap()).unwrap();
    v["graft"]["cache_id"] = json!("0000");
    let back = Mosaic::deserialize(&v.to_string()).unwrap();
    assert_eq!(back.graft().cache_id(), m.graft().cache_id());
}

#[test]
fn malformed_records_fail() {
    let dangling =
        r#"{"graft": {"b": {"op_type": "neg", "args": ["z"]}, "returns": "b"}, "bands": []}"#;
    assert!(matches!(Mosaic::deserialize(dangling), Err(GraftError::Serde(_))));
    assert!(Mosaic::deserialize("not json").is_err());
}

#[test]
fn deferred_dates_must_be_graft_parameters() {
    let mut v: Value = serde_json::from_str(&ndvi().serialize().unwrap()).unwrap();
    v["start_datetime"] = json!("2020-13-45");
    let err = Mosaic::deserialize(&v.to_string()).unwrap_err();
    assert!(matches!(err, GraftError::Validation(_)));
    assert!(err.to_string().contains("2020-13-45"));

    v["start_datetime"] = json!("until");
    let back = Mosaic::deserialize(&v.to_string()).unwrap();
    assert_eq!(back.start_datetime(), Some(&DateBound::Parameter("until".to_string())));
}
