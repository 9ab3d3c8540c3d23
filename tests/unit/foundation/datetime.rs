use super::*;

#[test]
fn accepted_forms_normalize_to_utc() {
    let midnight = "2020-01-01T00:00:00Z";
    for s in [
        "2020-01-01",
        "2020-01-01T00:00:00",
        "2020-01-01 00:00:00",
        "2020-01-01T00:00:00Z",
        "2020-01-01T01:00:00+01:00",
    ] {
        let bound = normalize_datetime_or_none(Some(s.into())).unwrap().unwrap();
        assert_eq!(bound.to_canonical_string(), midnight, "input {s}");
    }
}

#[test]
fn dates_and_instants_are_accepted() {
    let d = NaiveDate::from_ymd_opt(2020, 6, 1).unwrap();
    let bound = normalize_datetime_or_none(Some(d.into())).unwrap().unwrap();
    assert_eq!(bound.to_string(), "2020-06-01T00:00:00Z");

    let t = d.and_hms_opt(12, 30, 0).unwrap().and_utc();
    let bound = normalize_datetime_or_none(Some(t.into())).unwrap().unwrap();
    assert_eq!(bound, DateBound::Instant(t));
}

#[test]
fn none_stays_unset() {
    assert_eq!(normalize_datetime_or_none(None).unwrap(), None);
}

#[test]
fn garbage_text_is_rejected() {
    let err = normalize_datetime_or_none(Some("last tuesday".into())).unwrap_err();
    assert!(matches!(err, GraftError::Validation(_)));
}

#[test]
fn datetime_parameters_pass_through_by_name() {
    let bound = normalize_datetime_or_none(Some(Parameter::datetime("start").into()))
        .unwrap()
        .unwrap();
    assert_eq!(bound, DateBound::Parameter("start".to_string()));
    assert_eq!(bound.as_parameter(), Some(Parameter::datetime("start")));
}

#[test]
fn mistyped_parameters_are_rejected() {
    let p = Parameter::new("start", ParamType::Int);
    let err = normalize_datetime_or_none(Some(p.into())).unwrap_err();
    assert!(err.to_string().contains("must be Datetime, not Int"));
}

#[test]
fn serde_distinguishes_instants_from_parameter_names() {
    let inst: DateBound = serde_json::from_str("\"2020-01-01T00:00:00Z\"").unwrap();
    assert!(matches!(inst, DateBound::Instant(_)));
    let param: DateBound = serde_json::from_str("\"start\"").unwrap();
    assert_eq!(param, DateBound::Parameter("start".to_string()));
    assert_eq!(serde_json::to_string(&inst).unwrap(), "\"2020-01-01T00:00:00Z\"");
}
