use super::*;

fn mosaic() -> Mosaic {
    Mosaic::new(
        Graft::nullary("load"),
        MosaicMetadata::with_bands(vec!["red".to_string()]),
    )
}

#[test]
fn precedence_prefers_mosaic_and_ties_go_left() {
    let map = Some(EntityKind::ComputeMap);
    let mosaic = Some(EntityKind::Mosaic);
    assert_eq!(EntityKind::resolve(map, mosaic), mosaic);
    assert_eq!(EntityKind::resolve(mosaic, map), mosaic);
    assert_eq!(EntityKind::resolve(None, map), map);
    assert_eq!(EntityKind::resolve(map, None), map);
    assert_eq!(EntityKind::resolve(None, None), None);
}

#[test]
fn operands_report_their_kind() {
    assert_eq!(Operand::from(1.5_f64).kind(), None);
    assert_eq!(Operand::from(mosaic()).kind(), Some(EntityKind::Mosaic));
    let map = ComputeMap::new(Graft::nullary("zeros"));
    assert_eq!(Operand::from(&map).kind(), Some(EntityKind::ComputeMap));
}

#[test]
fn entity_operand_carries_graft_and_metadata() {
    let m = mosaic();
    let Operand::Entity(e) = m.to_operand() else {
        panic!("expected an entity operand");
    };
    assert_eq!(&e.graft, Entity::graft(&m));
    assert_eq!(e.metadata.as_ref().map(|md| md.bands.clone()), Some(vec!["red".to_string()]));

    let map = ComputeMap::from(Graft::nullary("zeros"));
    let Operand::Entity(e) = map.to_operand() else {
        panic!("expected an entity operand");
    };
    assert!(e.metadata.is_none());
}

#[test]
fn literal_operands_keep_their_json_value() {
    let Operand::Literal(v) = Operand::from(vec![1.0, 2.0]) else {
        panic!("expected a literal");
    };
    assert_eq!(v, serde_json::json!([1.0, 2.0]));
}

#[test]
fn display_names_the_entity() {
    assert_eq!(EntityKind::Mosaic.to_string(), "Mosaic");
    assert_eq!(EntityKind::ComputeMap.to_string(), "ComputeMap");
}
