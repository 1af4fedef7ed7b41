//! Tests for create and update payload validation.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn valid_payload() -> Value {
    json!({
        "employee_id": "EMP001",
        "name": "John Doe",
        "age": 30,
        "department": "Engineering",
    })
}

fn kinds(errors: &ValidationErrors) -> Vec<(&str, ViolationKind)> {
    errors
        .violations()
        .iter()
        .map(|violation| (violation.field(), violation.kind()))
        .collect()
}

#[rstest]
fn full_validation_accepts_valid_payload(valid_payload: Value) {
    let employee = validate_full(&valid_payload).expect("valid");
    assert_eq!(employee.employee_id().as_ref(), "EMP001");
    assert_eq!(employee.name().as_ref(), "John Doe");
    assert_eq!(employee.age().get(), 30);
    assert_eq!(employee.department(), Department::Engineering);
}

#[rstest]
fn full_validation_reports_every_missing_field() {
    let errors = validate_full(&json!({})).expect_err("empty payload");
    assert_eq!(
        kinds(&errors),
        [
            (FIELD_EMPLOYEE_ID, ViolationKind::Missing),
            (FIELD_NAME, ViolationKind::Missing),
            (FIELD_AGE, ViolationKind::Missing),
            (FIELD_DEPARTMENT, ViolationKind::Missing),
        ]
    );
}

#[rstest]
fn full_validation_accumulates_in_field_order() {
    let payload = json!({
        "zeta": 1,
        "department": "Unknown",
        "age": 15,
        "name": "   ",
        "employee_id": "EMP 001",
        "alpha": true,
    });
    let errors = validate_full(&payload).expect_err("invalid payload");
    assert_eq!(
        kinds(&errors),
        [
            (
                FIELD_EMPLOYEE_ID,
                ViolationKind::StringPatternMismatch {
                    pattern: crate::domain::employee::EMPLOYEE_ID_PATTERN
                }
            ),
            (FIELD_NAME, ViolationKind::Blank),
            (FIELD_AGE, ViolationKind::GreaterThanEqual { min: 18 }),
            (FIELD_DEPARTMENT, ViolationKind::Enum),
            ("alpha", ViolationKind::ExtraForbidden),
            ("zeta", ViolationKind::ExtraForbidden),
        ]
    );
}

#[rstest]
#[case(json!("30"), ViolationKind::IntType)]
#[case(json!(30.5), ViolationKind::IntType)]
#[case(json!(null), ViolationKind::NullNotAllowed)]
#[case(json!(101), ViolationKind::LessThanEqual { max: 100 })]
#[case(json!(u64::MAX), ViolationKind::LessThanEqual { max: 100 })]
#[case(json!(15.0), ViolationKind::GreaterThanEqual { min: 18 })]
#[case(json!(-3.0), ViolationKind::GreaterThanEqual { min: 18 })]
#[case(json!(1e20), ViolationKind::LessThanEqual { max: 100 })]
fn full_validation_rejects_bad_ages(
    mut valid_payload: Value,
    #[case] age: Value,
    #[case] expected: ViolationKind,
) {
    valid_payload[FIELD_AGE] = age;
    let errors = validate_full(&valid_payload).expect_err("bad age");
    assert_eq!(kinds(&errors), [(FIELD_AGE, expected)]);
}

#[rstest]
fn whole_float_age_is_accepted(mut valid_payload: Value) {
    valid_payload[FIELD_AGE] = json!(30.0);
    let employee = validate_full(&valid_payload).expect("integral age");
    assert_eq!(employee.age().get(), 30);
}

#[rstest]
#[case(json!(42))]
#[case(json!(["EMP001"]))]
fn full_validation_rejects_non_string_ids(mut valid_payload: Value, #[case] id: Value) {
    valid_payload[FIELD_EMPLOYEE_ID] = id;
    let errors = validate_full(&valid_payload).expect_err("bad id");
    assert_eq!(
        kinds(&errors),
        [(FIELD_EMPLOYEE_ID, ViolationKind::StringType)]
    );
}

#[rstest]
#[case(json!([]))]
#[case(json!("EMP001"))]
#[case(json!(null))]
fn non_object_payloads_are_rejected(#[case] payload: Value) {
    let errors = validate_full(&payload).expect_err("not an object");
    assert_eq!(kinds(&errors), [(FIELD_BODY, ViolationKind::ObjectType)]);
    let errors = validate_partial(&payload).expect_err("not an object");
    assert_eq!(kinds(&errors), [(FIELD_BODY, ViolationKind::ObjectType)]);
}

#[rstest]
fn partial_validation_accepts_subset() {
    let patch = validate_partial(&json!({ "age": 31 })).expect("valid");
    assert_eq!(patch.age.map(Age::get), Some(31));
    assert!(patch.name.is_none());
    assert!(patch.department.is_none());
}

#[rstest]
fn partial_validation_accepts_empty_object() {
    let patch = validate_partial(&json!({})).expect("valid");
    assert!(patch.is_empty());
}

#[rstest]
fn partial_validation_rejects_identifier_change() {
    let errors =
        validate_partial(&json!({ "employee_id": "EMP999", "age": 31 })).expect_err("immutable");
    assert_eq!(kinds(&errors), [(FIELD_EMPLOYEE_ID, ViolationKind::Immutable)]);
}

#[rstest]
fn partial_validation_rejects_explicit_null() {
    let errors = validate_partial(&json!({ "name": null })).expect_err("null");
    assert_eq!(kinds(&errors), [(FIELD_NAME, ViolationKind::NullNotAllowed)]);
}

#[rstest]
fn partial_validation_accumulates() {
    let errors = validate_partial(&json!({
        "department": "Finance ",
        "name": "J",
        "salary": 10,
    }))
    .expect_err("invalid");
    assert_eq!(
        kinds(&errors),
        [
            (FIELD_NAME, ViolationKind::StringTooShort { min: 2 }),
            (FIELD_DEPARTMENT, ViolationKind::Enum),
            ("salary", ViolationKind::ExtraForbidden),
        ]
    );
}

#[rstest]
fn department_filter_parses_exact_names() {
    assert_eq!(parse_department_filter(None), Ok(None));
    assert_eq!(
        parse_department_filter(Some("Human Resources")),
        Ok(Some(Department::HumanResources))
    );
    let errors = parse_department_filter(Some("hr")).expect_err("unknown");
    assert_eq!(kinds(&errors), [(FIELD_DEPARTMENT, ViolationKind::Enum)]);
}

#[rstest]
fn details_carry_kind_value_and_constraint() {
    let errors = validate_partial(&json!({ "age": 12 })).expect_err("too young");
    assert_eq!(
        errors.to_details(),
        json!({
            "violations": [{
                "field": "age",
                "kind": "greater_than_equal",
                "message": "input should be greater than or equal to 18",
                "value": 12,
                "constraint": { "ge": 18 },
            }]
        })
    );
}

#[rstest]
fn missing_fields_serialise_without_value() {
    let errors = validate_full(&json!({
        "employee_id": "EMP001",
        "name": "John Doe",
        "age": 30,
    }))
    .expect_err("missing department");
    assert_eq!(
        errors.to_details(),
        json!({
            "violations": [{
                "field": "department",
                "kind": "missing",
                "message": "field required",
            }]
        })
    );
}

#[rstest]
fn display_lists_each_violation() {
    let errors = validate_partial(&json!({ "name": "", "age": "x" })).expect_err("invalid");
    assert_eq!(
        errors.to_string(),
        "2 validation errors: name: value must not be blank; age: input should be a valid integer"
    );
}
