//! Employee record and its value objects.
//!
//! Each value object validates itself on construction, so an [`Employee`]
//! assembled from them always satisfies the record invariants. Constructors
//! report failures as a [`ViolationKind`] so the validator can attach the
//! field name and offending value.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::validation::ViolationKind;

/// Maximum length of an employee identifier.
pub const EMPLOYEE_ID_MAX: usize = 50;
/// Pattern every employee identifier must match.
pub const EMPLOYEE_ID_PATTERN: &str = "^[A-Za-z0-9_-]+$";
/// Minimum length of a trimmed employee name.
pub const NAME_MIN: usize = 2;
/// Maximum length of a trimmed employee name.
pub const NAME_MAX: usize = 100;
/// Youngest accepted working age.
pub const AGE_MIN: i64 = 18;
/// Oldest accepted age.
pub const AGE_MAX: i64 = 100;

static EMPLOYEE_ID_RE: OnceLock<Regex> = OnceLock::new();

fn employee_id_regex() -> &'static Regex {
    EMPLOYEE_ID_RE.get_or_init(|| {
        Regex::new(EMPLOYEE_ID_PATTERN)
            .unwrap_or_else(|error| panic!("employee id regex failed to compile: {error}"))
    })
}

/// Externally supplied business key of an employee.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmployeeId(String);

impl EmployeeId {
    /// Validate and construct an identifier.
    ///
    /// # Examples
    /// ```
    /// use employee_api::domain::EmployeeId;
    ///
    /// assert!(EmployeeId::new("EMP-001").is_ok());
    /// assert!(EmployeeId::new("EMP 001").is_err());
    /// ```
    pub fn new(id: impl Into<String>) -> Result<Self, ViolationKind> {
        let id = id.into();
        let length = id.chars().count();
        if length == 0 {
            return Err(ViolationKind::StringTooShort { min: 1 });
        }
        if length > EMPLOYEE_ID_MAX {
            return Err(ViolationKind::StringTooLong {
                max: EMPLOYEE_ID_MAX,
            });
        }
        if !employee_id_regex().is_match(&id) {
            return Err(ViolationKind::StringPatternMismatch {
                pattern: EMPLOYEE_ID_PATTERN,
            });
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for EmployeeId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<EmployeeId> for String {
    fn from(value: EmployeeId) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmployeeId {
    type Error = ViolationKind;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Full name of an employee, stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmployeeName(String);

impl EmployeeName {
    /// Trim and validate a name.
    ///
    /// Length bounds apply to the trimmed value.
    pub fn new(name: impl AsRef<str>) -> Result<Self, ViolationKind> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ViolationKind::Blank);
        }
        let length = trimmed.chars().count();
        if length < NAME_MIN {
            return Err(ViolationKind::StringTooShort { min: NAME_MIN });
        }
        if length > NAME_MAX {
            return Err(ViolationKind::StringTooLong { max: NAME_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for EmployeeName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmployeeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<EmployeeName> for String {
    fn from(value: EmployeeName) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmployeeName {
    type Error = ViolationKind;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Age in whole years within `[AGE_MIN, AGE_MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Age(u8);

impl Age {
    /// Validate and construct an age.
    ///
    /// # Examples
    /// ```
    /// use employee_api::domain::{Age, ViolationKind};
    ///
    /// assert_eq!(Age::new(30).map(|age| age.get()), Ok(30));
    /// assert_eq!(Age::new(15), Err(ViolationKind::GreaterThanEqual { min: 18 }));
    /// ```
    pub fn new(age: i64) -> Result<Self, ViolationKind> {
        if age < AGE_MIN {
            return Err(ViolationKind::GreaterThanEqual { min: AGE_MIN });
        }
        if age > AGE_MAX {
            return Err(ViolationKind::LessThanEqual { max: AGE_MAX });
        }
        u8::try_from(age)
            .map(Self)
            .map_err(|_| ViolationKind::LessThanEqual { max: AGE_MAX })
    }

    /// Age in years.
    pub fn get(self) -> u8 {
        self.0
    }
}

impl From<Age> for i64 {
    fn from(value: Age) -> Self {
        i64::from(value.0)
    }
}

impl TryFrom<i64> for Age {
    type Error = ViolationKind;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Raised when a string names no known department.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown department: {0:?}")]
pub struct UnknownDepartment(pub String);

/// The closed set of departments an employee can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Department {
    Engineering,
    Marketing,
    Finance,
    HumanResources,
    Sales,
    Operations,
    InformationTechnology,
    Legal,
    CustomerService,
    ResearchAndDevelopment,
}

impl Department {
    /// Every department in canonical order.
    pub const ALL: [Department; 10] = [
        Self::Engineering,
        Self::Marketing,
        Self::Finance,
        Self::HumanResources,
        Self::Sales,
        Self::Operations,
        Self::InformationTechnology,
        Self::Legal,
        Self::CustomerService,
        Self::ResearchAndDevelopment,
    ];

    /// Display name, which is also the wire and storage representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Engineering => "Engineering",
            Self::Marketing => "Marketing",
            Self::Finance => "Finance",
            Self::HumanResources => "Human Resources",
            Self::Sales => "Sales",
            Self::Operations => "Operations",
            Self::InformationTechnology => "Information Technology",
            Self::Legal => "Legal",
            Self::CustomerService => "Customer Service",
            Self::ResearchAndDevelopment => "Research and Development",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Department {
    type Err = UnknownDepartment;

    /// Exact match only: no trimming, no case folding.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|department| department.as_str() == s)
            .ok_or_else(|| UnknownDepartment(s.to_owned()))
    }
}

impl TryFrom<String> for Department {
    type Error = UnknownDepartment;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Department> for &'static str {
    fn from(value: Department) -> Self {
        value.as_str()
    }
}

/// A stored employee record.
///
/// ## Invariants
/// - Every field satisfies its value object's validation.
/// - `employee_id` never changes once the record exists; [`EmployeePatch`]
///   has no way to express a change to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Employee {
    employee_id: EmployeeId,
    name: EmployeeName,
    age: Age,
    department: Department,
}

impl Employee {
    /// Assemble a record from validated parts.
    pub fn new(
        employee_id: EmployeeId,
        name: EmployeeName,
        age: Age,
        department: Department,
    ) -> Self {
        Self {
            employee_id,
            name,
            age,
            department,
        }
    }

    /// Business key.
    pub fn employee_id(&self) -> &EmployeeId {
        &self.employee_id
    }

    /// Full name.
    pub fn name(&self) -> &EmployeeName {
        &self.name
    }

    /// Age in years.
    pub fn age(&self) -> Age {
        self.age
    }

    /// Department.
    pub fn department(&self) -> Department {
        self.department
    }
}

/// Fields to change on an existing record; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeePatch {
    pub name: Option<EmployeeName>,
    pub age: Option<Age>,
    pub department: Option<Department>,
}

impl EmployeePatch {
    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none() && self.department.is_none()
    }

    /// Merge the supplied fields onto `employee`.
    ///
    /// # Examples
    /// ```
    /// use employee_api::domain::{Age, Department, Employee, EmployeeId, EmployeeName, EmployeePatch};
    ///
    /// let employee = Employee::new(
    ///     EmployeeId::new("EMP001").expect("id"),
    ///     EmployeeName::new("John Doe").expect("name"),
    ///     Age::new(30).expect("age"),
    ///     Department::Engineering,
    /// );
    /// let patch = EmployeePatch { age: Some(Age::new(31).expect("age")), ..EmployeePatch::default() };
    /// let merged = patch.apply_to(employee.clone());
    /// assert_eq!(merged.age().get(), 31);
    /// assert_eq!(merged.name(), employee.name());
    /// ```
    pub fn apply_to(&self, employee: Employee) -> Employee {
        let Employee {
            employee_id,
            name,
            age,
            department,
        } = employee;
        Employee {
            employee_id,
            name: self.name.clone().unwrap_or(name),
            age: self.age.unwrap_or(age),
            department: self.department.unwrap_or(department),
        }
    }
}
