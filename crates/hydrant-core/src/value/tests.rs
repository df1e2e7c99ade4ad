use crate::{
    types::{Date, Decimal, Duration, Float64, Timestamp},
    value::{Value, ValueTag},
};

#[test]
fn from_impls_pick_the_expected_variant() {
    assert_eq!(Value::from(true), Value::Bool(true));
    assert_eq!(Value::from(5u8), Value::Uint(5));
    assert_eq!(Value::from(-5i16), Value::Int(-5));
    assert_eq!(Value::from(1_000i32), Value::Int(1_000));
    assert_eq!(Value::from("hello"), Value::Text("hello".to_string()));
    assert_eq!(Value::from(vec![7u8, 8, 9]), Value::Blob(vec![7, 8, 9]));
    assert_eq!(Value::from(None::<i32>), Value::Null);
    assert_eq!(Value::from(Some(3i64)), Value::Int(3));
}

#[test]
fn non_finite_floats_collapse_to_null() {
    assert_eq!(Value::from(f64::NAN), Value::Null);
    assert_eq!(Value::from(f32::INFINITY), Value::Null);
    assert_eq!(Value::from(1.5f64), Value::Float64(Float64::try_new(1.5).unwrap()));
}

#[test]
fn tags_and_labels_are_stable() {
    assert_eq!(Value::Null.tag(), ValueTag::Null);
    assert_eq!(Value::Int(1).tag().label(), "int");
    assert_eq!(Value::Text(String::new()).tag().label(), "text");
    assert_eq!(Value::Blob(vec![]).tag().to_u8(), 1);
    assert_eq!(ValueTag::Uint.to_u8(), 12);
}

#[test]
fn display_renders_cells_for_format_strings() {
    assert_eq!(Value::Null.to_string(), "");
    assert_eq!(Value::Int(-42).to_string(), "-42");
    assert_eq!(Value::Text("abc".into()).to_string(), "abc");
    assert_eq!(Value::Blob(vec![0xde, 0xad]).to_string(), "dead");
    assert_eq!(Value::Bool(false).to_string(), "false");
}

#[test]
fn scalar_wrappers_round_trip_through_value() {
    let date = Date::from_ymd(1900, 3, 11).unwrap();
    assert_eq!(Value::from(date).tag(), ValueTag::Date);

    let ts = Timestamp::from_millis(1_000);
    assert_eq!(Value::from(ts), Value::Timestamp(ts));

    let dur = Duration::from_secs(90);
    assert_eq!(Value::from(dur), Value::Duration(dur));

    let dec = Decimal::new(105, 1);
    assert_eq!(Value::from(dec), Value::Decimal(dec));
}

#[test]
fn serialized_form_is_tagged_by_variant() {
    let json = serde_json::to_string(&Value::Int(7)).unwrap();
    assert_eq!(json, r#"{"Int":7}"#);
    assert_eq!(serde_json::to_string(&Value::Null).unwrap(), r#""Null""#);
}
