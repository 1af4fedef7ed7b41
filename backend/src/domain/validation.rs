//! Payload validation for employee create and update requests.
//!
//! Validators inspect a decoded JSON document field by field and collect
//! every violation instead of stopping at the first one. Fields are checked
//! in the order `employee_id`, `name`, `age`, `department`, followed by any
//! unknown keys in the order the document yields them.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value, json};

use super::employee::{
    AGE_MAX, AGE_MIN, Age, Department, Employee, EmployeeId, EmployeeName, EmployeePatch,
};

/// Wire name of the identifier field.
pub const FIELD_EMPLOYEE_ID: &str = "employee_id";
/// Wire name of the name field.
pub const FIELD_NAME: &str = "name";
/// Wire name of the age field.
pub const FIELD_AGE: &str = "age";
/// Wire name of the department field.
pub const FIELD_DEPARTMENT: &str = "department";
/// Field path used for violations of the document as a whole.
pub const FIELD_BODY: &str = "body";
/// Field path used for violations of the query string as a whole.
pub const FIELD_QUERY: &str = "query";

const KNOWN_FIELDS: [&str; 4] = [FIELD_EMPLOYEE_ID, FIELD_NAME, FIELD_AGE, FIELD_DEPARTMENT];

/// The rule a field broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ViolationKind {
    #[error("field required")]
    Missing,
    #[error("extra inputs are not permitted")]
    ExtraForbidden,
    #[error("field cannot be changed")]
    Immutable,
    #[error("value must not be null")]
    NullNotAllowed,
    #[error("input should be a valid string")]
    StringType,
    #[error("input should be a valid integer")]
    IntType,
    #[error("input should be a JSON object")]
    ObjectType,
    #[error("value must not be blank")]
    Blank,
    #[error("string should have at least {min} characters")]
    StringTooShort { min: usize },
    #[error("string should have at most {max} characters")]
    StringTooLong { max: usize },
    #[error("string should match pattern '{pattern}'")]
    StringPatternMismatch { pattern: &'static str },
    #[error("input should be greater than or equal to {min}")]
    GreaterThanEqual { min: i64 },
    #[error("input should be less than or equal to {max}")]
    LessThanEqual { max: i64 },
    #[error("input should be one of the listed departments")]
    Enum,
    #[error("input could not be parsed")]
    Unparseable,
}

impl ViolationKind {
    /// Stable machine-readable name of the rule.
    pub const fn code(self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::ExtraForbidden => "extra_forbidden",
            Self::Immutable => "immutable",
            Self::NullNotAllowed => "null_not_allowed",
            Self::StringType => "string_type",
            Self::IntType => "int_type",
            Self::ObjectType => "object_type",
            Self::Blank => "blank",
            Self::StringTooShort { .. } => "string_too_short",
            Self::StringTooLong { .. } => "string_too_long",
            Self::StringPatternMismatch { .. } => "string_pattern_mismatch",
            Self::GreaterThanEqual { .. } => "greater_than_equal",
            Self::LessThanEqual { .. } => "less_than_equal",
            Self::Enum => "enum",
            Self::Unparseable => "parse_error",
        }
    }

    /// The bound or allowed set the rule enforces, if it has one.
    pub fn constraint(self) -> Option<Value> {
        match self {
            Self::StringTooShort { min } => Some(json!({ "min_length": min })),
            Self::StringTooLong { max } => Some(json!({ "max_length": max })),
            Self::StringPatternMismatch { pattern } => Some(json!({ "pattern": pattern })),
            Self::GreaterThanEqual { min } => Some(json!({ "ge": min })),
            Self::LessThanEqual { max } => Some(json!({ "le": max })),
            Self::Enum => Some(json!({
                "expected": Department::ALL.map(Department::as_str),
            })),
            _ => None,
        }
    }
}

/// A single rejected field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldViolation {
    field: String,
    kind: ViolationKind,
    value: Option<Value>,
}

impl FieldViolation {
    /// Record that `field` broke `kind`, optionally keeping the rejected input.
    pub fn new(field: impl Into<String>, kind: ViolationKind, value: Option<Value>) -> Self {
        Self {
            field: field.into(),
            kind,
            value,
        }
    }

    /// Offending field, or `body` for document-level violations.
    pub fn field(&self) -> &str {
        self.field.as_str()
    }

    /// Broken rule.
    pub fn kind(&self) -> ViolationKind {
        self.kind
    }

    /// Rejected input, when there was one.
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.kind)
    }
}

#[derive(Serialize)]
struct FieldViolationDto<'a> {
    field: &'a str,
    kind: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    constraint: Option<Value>,
}

impl Serialize for FieldViolation {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        FieldViolationDto {
            field: &self.field,
            kind: self.kind.code(),
            message: self.kind.to_string(),
            value: self.value.as_ref(),
            constraint: self.kind.constraint(),
        }
        .serialize(serializer)
    }
}

/// Every violation found in one payload, in check order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationErrors {
    violations: Vec<FieldViolation>,
}

impl ValidationErrors {
    /// Collect violations gathered elsewhere, keeping their order.
    pub fn new(violations: Vec<FieldViolation>) -> Self {
        Self { violations }
    }

    /// Wrap a single violation.
    pub fn single(violation: FieldViolation) -> Self {
        Self {
            violations: vec![violation],
        }
    }

    /// Violations in check order.
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Consume the collection, yielding the individual violations.
    pub fn into_violations(self) -> Vec<FieldViolation> {
        self.violations
    }

    /// Fields that failed, in check order.
    pub fn fields(&self) -> Vec<&str> {
        self.violations.iter().map(FieldViolation::field).collect()
    }

    /// Structured form for error payload details.
    pub fn to_details(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.violations.len();
        write!(
            f,
            "{count} validation error{}",
            if count == 1 { "" } else { "s" }
        )?;
        for (index, violation) in self.violations.iter().enumerate() {
            f.write_str(if index == 0 { ": " } else { "; " })?;
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

#[derive(Default)]
struct Collector {
    violations: Vec<FieldViolation>,
}

impl Collector {
    fn push(&mut self, field: &str, kind: ViolationKind, value: Option<&Value>) {
        self.violations
            .push(FieldViolation::new(field, kind, value.cloned()));
    }

    fn required<T>(
        &mut self,
        object: &Map<String, Value>,
        field: &str,
        parse: fn(&Value) -> Result<T, ViolationKind>,
    ) -> Option<T> {
        match object.get(field) {
            Some(value) => self.check(field, value, parse),
            None => {
                self.push(field, ViolationKind::Missing, None);
                None
            }
        }
    }

    fn optional<T>(
        &mut self,
        object: &Map<String, Value>,
        field: &str,
        parse: fn(&Value) -> Result<T, ViolationKind>,
    ) -> Option<T> {
        object
            .get(field)
            .and_then(|value| self.check(field, value, parse))
    }

    fn check<T>(
        &mut self,
        field: &str,
        value: &Value,
        parse: fn(&Value) -> Result<T, ViolationKind>,
    ) -> Option<T> {
        match parse(value) {
            Ok(parsed) => Some(parsed),
            Err(kind) => {
                self.push(field, kind, Some(value));
                None
            }
        }
    }

    fn reject_unknown(&mut self, object: &Map<String, Value>) {
        for (key, value) in object {
            if !KNOWN_FIELDS.contains(&key.as_str()) {
                self.push(key, ViolationKind::ExtraForbidden, Some(value));
            }
        }
    }

    fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    fn into_errors(self) -> ValidationErrors {
        ValidationErrors {
            violations: self.violations,
        }
    }
}

fn as_object(payload: &Value) -> Result<&Map<String, Value>, ValidationErrors> {
    payload.as_object().ok_or_else(|| {
        ValidationErrors::single(FieldViolation::new(
            FIELD_BODY,
            ViolationKind::ObjectType,
            Some(payload.clone()),
        ))
    })
}

fn as_str(value: &Value) -> Result<&str, ViolationKind> {
    match value {
        Value::String(s) => Ok(s.as_str()),
        Value::Null => Err(ViolationKind::NullNotAllowed),
        _ => Err(ViolationKind::StringType),
    }
}

fn parse_employee_id(value: &Value) -> Result<EmployeeId, ViolationKind> {
    EmployeeId::new(as_str(value)?)
}

fn parse_name(value: &Value) -> Result<EmployeeName, ViolationKind> {
    EmployeeName::new(as_str(value)?)
}

fn parse_age(value: &Value) -> Result<Age, ViolationKind> {
    match value {
        Value::Number(number) => match (number.as_i64(), number.as_u64(), number.as_f64()) {
            (Some(age), _, _) => Age::new(age),
            (None, Some(_), _) => Err(ViolationKind::LessThanEqual { max: AGE_MAX }),
            (None, None, Some(float)) if float.fract() == 0.0 => integral_age(float),
            _ => Err(ViolationKind::IntType),
        },
        Value::Null => Err(ViolationKind::NullNotAllowed),
        _ => Err(ViolationKind::IntType),
    }
}

/// Whole-valued floats such as `30.0` count as integers.
fn integral_age(value: f64) -> Result<Age, ViolationKind> {
    if value < 0.0 {
        Err(ViolationKind::GreaterThanEqual { min: AGE_MIN })
    } else if value > 1_000.0 {
        Err(ViolationKind::LessThanEqual { max: AGE_MAX })
    } else {
        Age::new(value as i64)
    }
}

fn parse_department(value: &Value) -> Result<Department, ViolationKind> {
    as_str(value)?.parse().map_err(|_| ViolationKind::Enum)
}

/// Validate a create payload into a complete [`Employee`].
///
/// All four fields are required and unknown keys are rejected.
///
/// # Examples
/// ```
/// use employee_api::domain::validation::validate_full;
/// use serde_json::json;
///
/// let employee = validate_full(&json!({
///     "employee_id": "EMP001",
///     "name": "  John Doe ",
///     "age": 30,
///     "department": "Engineering",
/// }))
/// .expect("valid payload");
/// assert_eq!(employee.name().as_ref(), "John Doe");
///
/// let errors = validate_full(&json!({ "employee_id": "EMP 1" })).unwrap_err();
/// assert_eq!(errors.fields(), ["employee_id", "name", "age", "department"]);
/// ```
pub fn validate_full(payload: &Value) -> Result<Employee, ValidationErrors> {
    let object = as_object(payload)?;
    let mut collector = Collector::default();
    let employee_id = collector.required(object, FIELD_EMPLOYEE_ID, parse_employee_id);
    let name = collector.required(object, FIELD_NAME, parse_name);
    let age = collector.required(object, FIELD_AGE, parse_age);
    let department = collector.required(object, FIELD_DEPARTMENT, parse_department);
    collector.reject_unknown(object);

    match (employee_id, name, age, department) {
        (Some(employee_id), Some(name), Some(age), Some(department)) if collector.is_empty() => {
            Ok(Employee::new(employee_id, name, age, department))
        }
        _ => Err(collector.into_errors()),
    }
}

/// Validate an update payload into an [`EmployeePatch`].
///
/// Every field is optional, but a supplied field must be valid and may not
/// be `null`. Supplying `employee_id` at all is a violation.
pub fn validate_partial(payload: &Value) -> Result<EmployeePatch, ValidationErrors> {
    let object = as_object(payload)?;
    let mut collector = Collector::default();
    if let Some(value) = object.get(FIELD_EMPLOYEE_ID) {
        collector.push(FIELD_EMPLOYEE_ID, ViolationKind::Immutable, Some(value));
    }
    let name = collector.optional(object, FIELD_NAME, parse_name);
    let age = collector.optional(object, FIELD_AGE, parse_age);
    let department = collector.optional(object, FIELD_DEPARTMENT, parse_department);
    collector.reject_unknown(object);

    if collector.is_empty() {
        Ok(EmployeePatch {
            name,
            age,
            department,
        })
    } else {
        Err(collector.into_errors())
    }
}

/// Parse an optional department filter from a query string value.
pub fn parse_department_filter(raw: Option<&str>) -> Result<Option<Department>, ValidationErrors> {
    raw.map(|raw| {
        raw.parse::<Department>().map_err(|_| {
            ValidationErrors::single(FieldViolation::new(
                FIELD_DEPARTMENT,
                ViolationKind::Enum,
                Some(Value::String(raw.to_owned())),
            ))
        })
    })
    .transpose()
}

#[cfg(test)]
mod tests;
