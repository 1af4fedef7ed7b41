//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and never
//! leave it. Conversion back into domain types re-validates every column so
//! a hand-edited row cannot smuggle an invalid record into the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::{Age, Department, Employee, EmployeeId, EmployeeName, EmployeePatch};

use super::schema::employees;

/// Row struct for reading from the employees table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = employees)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct EmployeeRow {
    pub employee_id: String,
    pub name: String,
    pub age: i32,
    pub department: String,
}

impl TryFrom<EmployeeRow> for Employee {
    type Error = String;

    fn try_from(row: EmployeeRow) -> Result<Self, Self::Error> {
        let invalid = |column: &str, detail: String| {
            format!("stored employee {} has invalid {column}: {detail}", row.employee_id)
        };
        let employee_id = EmployeeId::new(row.employee_id.as_str())
            .map_err(|err| invalid("employee_id", err.to_string()))?;
        let name =
            EmployeeName::new(row.name.as_str()).map_err(|err| invalid("name", err.to_string()))?;
        let age = Age::new(i64::from(row.age)).map_err(|err| invalid("age", err.to_string()))?;
        let department = row
            .department
            .parse::<Department>()
            .map_err(|err| invalid("department", err.to_string()))?;
        Ok(Employee::new(employee_id, name, age, department))
    }
}

/// Insertable struct for creating employee records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = employees)]
pub(crate) struct NewEmployeeRow<'a> {
    pub employee_id: &'a str,
    pub name: &'a str,
    pub age: i32,
    pub department: &'a str,
}

impl<'a> From<&'a Employee> for NewEmployeeRow<'a> {
    fn from(employee: &'a Employee) -> Self {
        Self {
            employee_id: employee.employee_id().as_ref(),
            name: employee.name().as_ref(),
            age: i32::from(employee.age().get()),
            department: employee.department().as_str(),
        }
    }
}

/// Changeset for partial updates; `None` columns are left untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = employees)]
pub(crate) struct EmployeeChangeset<'a> {
    pub name: Option<&'a str>,
    pub age: Option<i32>,
    pub department: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> EmployeeChangeset<'a> {
    pub(crate) fn from_patch(patch: &'a EmployeePatch, updated_at: DateTime<Utc>) -> Self {
        Self {
            name: patch.name.as_ref().map(AsRef::as_ref),
            age: patch.age.map(|age| i32::from(age.get())),
            department: patch.department.map(Department::as_str),
            updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn row(age: i32, department: &str) -> EmployeeRow {
        EmployeeRow {
            employee_id: "EMP001".into(),
            name: "John Doe".into(),
            age,
            department: department.into(),
        }
    }

    #[rstest]
    fn valid_row_converts() {
        let employee = Employee::try_from(row(30, "Human Resources")).expect("valid row");
        assert_eq!(employee.department(), Department::HumanResources);
        assert_eq!(employee.age().get(), 30);
    }

    #[rstest]
    #[case(row(12, "Sales"), "age")]
    #[case(row(30, "Janitorial"), "department")]
    fn invalid_rows_are_reported(#[case] row: EmployeeRow, #[case] column: &str) {
        let err = Employee::try_from(row).expect_err("invalid row");
        assert!(err.contains(column), "{err}");
        assert!(err.contains("EMP001"), "{err}");
    }

    #[rstest]
    fn changeset_carries_only_patched_columns() {
        let patch = EmployeePatch {
            age: Some(Age::new(41).expect("age")),
            ..EmployeePatch::default()
        };
        let changeset = EmployeeChangeset::from_patch(&patch, Utc::now());
        assert_eq!(changeset.age, Some(41));
        assert!(changeset.name.is_none());
        assert!(changeset.department.is_none());
    }

    #[rstest]
    fn insert_row_borrows_domain_values() {
        let employee = Employee::try_from(row(30, "Legal")).expect("valid row");
        let new_row = NewEmployeeRow::from(&employee);
        assert_eq!(new_row.employee_id, "EMP001");
        assert_eq!(new_row.department, "Legal");
        assert_eq!(new_row.age, 30);
    }
}
