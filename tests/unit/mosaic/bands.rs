use super::*;

fn names(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

#[test]
fn joined_and_list_forms_agree() {
    let expected = names(&["red", "green", "blue"]);
    assert_eq!(format_bands("red green blue"), expected);
    assert_eq!(format_bands("  red\tgreen  blue "), expected);
    assert_eq!(format_bands(["red", "green", "blue"]), expected);
    assert_eq!(format_bands(vec!["red green", "blue"]), expected);
    assert_eq!(format_bands(expected.clone()), expected);
}

#[test]
fn join_is_space_delimited() {
    assert_eq!(join_bands(&names(&["red", "nir"])), "red nir");
}

#[test]
fn order_is_preserved() {
    assert_eq!(format_bands("nir red"), names(&["nir", "red"]));
}

#[test]
fn empty_selection_is_rejected() {
    assert!(require_bands(format_bands("   ")).is_err());
    assert!(require_bands(names(&["red"])).is_ok());
}

#[test]
fn subset_check_names_both_sets() {
    let available = names(&["red", "green"]);
    assert!(require_subset(&names(&["green", "red"]), &available).is_ok());
    assert!(require_subset(&available, &available).is_ok());

    let err = require_subset(&names(&["nir"]), &available).unwrap_err();
    let msg = err.to_string();
    assert!(matches!(err, GraftError::Validation(_)));
    assert!(msg.contains("nir") && msg.contains("green"), "{msg}");
}
