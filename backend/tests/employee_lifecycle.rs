//! Lifecycle behaviour of the employee service over the in-process store.

use std::sync::Arc;

use employee_api::domain::ports::{EmployeeCommand, EmployeeQuery, ListEmployeesRequest};
use employee_api::domain::{
    Department, Employee, EmployeeError, EmployeeService, ErrorCode, ViolationKind,
};
use employee_api::outbound::memory::InMemoryEmployeeRepository;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

type Service = EmployeeService<InMemoryEmployeeRepository>;

#[fixture]
fn service() -> Arc<Service> {
    Arc::new(EmployeeService::new(Arc::new(
        InMemoryEmployeeRepository::new(),
    )))
}

fn payload(id: &str, name: &str, age: i64, department: &str) -> Value {
    json!({
        "employee_id": id,
        "name": name,
        "age": age,
        "department": department,
    })
}

fn page(page: i64, limit: i64) -> ListEmployeesRequest {
    ListEmployeesRequest {
        page,
        limit,
        department: None,
    }
}

fn violations(err: EmployeeError) -> Vec<(String, ViolationKind)> {
    match err {
        EmployeeError::Validation(errors) => errors
            .into_violations()
            .into_iter()
            .map(|violation| (violation.field().to_owned(), violation.kind()))
            .collect(),
        other => panic!("expected validation error, got {other:?}"),
    }
}

async fn seed(service: &Service, count: usize, department: &str) -> Vec<Employee> {
    let mut created = Vec::with_capacity(count);
    for index in 0..count {
        let employee = service
            .create(payload(
                &format!("EMP{index:03}"),
                &format!("Employee {index}"),
                30,
                department,
            ))
            .await
            .expect("seed record");
        created.push(employee);
    }
    created
}

#[rstest]
#[tokio::test]
async fn created_record_reads_back_unchanged(service: Arc<Service>) {
    let created = service
        .create(payload("EMP001", "John Doe", 30, "Engineering"))
        .await
        .expect("created");
    let fetched = service.get("EMP001").await.expect("fetched");
    assert_eq!(created, fetched);
    assert_eq!(fetched.name().as_ref(), "John Doe");
    assert_eq!(fetched.age().get(), 30);
}

#[rstest]
#[tokio::test]
async fn names_are_stored_trimmed(service: Arc<Service>) {
    let created = service
        .create(payload("EMP001", "  Jane Roe  ", 41, "Legal"))
        .await
        .expect("created");
    assert_eq!(created.name().as_ref(), "Jane Roe");
}

#[rstest]
#[tokio::test]
async fn duplicate_create_always_conflicts(service: Arc<Service>) {
    service
        .create(payload("EMP001", "John Doe", 30, "Engineering"))
        .await
        .expect("first create");
    let err = service
        .create(payload("EMP001", "Someone Else", 45, "Sales"))
        .await
        .expect_err("duplicate");
    assert_eq!(err, EmployeeError::conflict("EMP001"));

    let kept = service.get("EMP001").await.expect("original kept");
    assert_eq!(kept.name().as_ref(), "John Doe");
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_duplicate_creates_admit_exactly_one(service: Arc<Service>) {
    let attempts = (0..16).map(|attempt| {
        let service = Arc::clone(&service);
        tokio::spawn(async move {
            service
                .create(payload(
                    "RACE01",
                    &format!("Racer {attempt}"),
                    25,
                    "Operations",
                ))
                .await
        })
    });
    let mut created = 0;
    let mut conflicts = 0;
    for handle in attempts.collect::<Vec<_>>() {
        match handle.await.expect("task joins") {
            Ok(_) => created += 1,
            Err(err) => {
                assert_eq!(err.code(), ErrorCode::Conflict);
                conflicts += 1;
            }
        }
    }
    assert_eq!((created, conflicts), (1, 15));
}

#[rstest]
#[tokio::test]
async fn empty_update_changes_nothing(service: Arc<Service>) {
    let created = service
        .create(payload("EMP001", "John Doe", 30, "Engineering"))
        .await
        .expect("created");
    let updated = service
        .update("EMP001", json!({}))
        .await
        .expect("no-op update");
    assert_eq!(created, updated);
}

#[rstest]
#[tokio::test]
async fn age_only_update_preserves_other_fields(service: Arc<Service>) {
    service
        .create(payload("EMP001", "John Doe", 30, "Engineering"))
        .await
        .expect("created");
    let updated = service
        .update("EMP001", json!({ "age": 31 }))
        .await
        .expect("updated");
    assert_eq!(updated.age().get(), 31);
    assert_eq!(updated.name().as_ref(), "John Doe");
    assert_eq!(updated.department(), Department::Engineering);
    assert_eq!(service.get("EMP001").await.expect("fetched"), updated);
}

#[rstest]
#[tokio::test]
async fn deleted_record_is_gone(service: Arc<Service>) {
    service
        .create(payload("EMP001", "John Doe", 30, "Engineering"))
        .await
        .expect("created");
    let removed = service.delete("EMP001").await.expect("deleted");
    assert_eq!(removed.as_ref(), "EMP001");
    assert_eq!(
        service.get("EMP001").await.expect_err("gone"),
        EmployeeError::not_found("EMP001")
    );
    assert_eq!(
        service.delete("EMP001").await.expect_err("already gone").code(),
        ErrorCode::NotFound
    );
}

#[rstest]
#[tokio::test]
async fn twenty_five_records_paginate_ten_ten_five(service: Arc<Service>) {
    let seeded = seed(&service, 25, "Finance").await;

    let mut sizes = Vec::new();
    let mut seen = Vec::new();
    for number in 1..=4 {
        let listed = service.list(page(number, 10)).await.expect("listed");
        assert_eq!(listed.total_count, 25);
        sizes.push(listed.items.len());
        seen.extend(listed.items);
    }
    assert_eq!(sizes, [10, 10, 5, 0]);
    assert_eq!(seen, seeded, "pages follow insertion order without overlap");
}

#[rstest]
#[tokio::test]
async fn department_filter_counts_filtered_records(service: Arc<Service>) {
    seed(&service, 3, "Sales").await;
    service
        .create(payload("ENG001", "Grace Hopper", 50, "Engineering"))
        .await
        .expect("created");

    let listed = service
        .list(ListEmployeesRequest {
            department: Some("Engineering".to_owned()),
            ..page(1, 10)
        })
        .await
        .expect("listed");
    assert_eq!(listed.total_count, 1);
    assert_eq!(listed.items.len(), 1);
    assert_eq!(listed.items[0].employee_id().as_ref(), "ENG001");
}

#[rstest]
#[tokio::test]
async fn underage_employee_is_rejected_on_age(service: Arc<Service>) {
    let err = service
        .create(payload("EMP002", "Young Person", 15, "Engineering"))
        .await
        .expect_err("too young");
    assert_eq!(
        violations(err),
        [(
            "age".to_owned(),
            ViolationKind::GreaterThanEqual { min: 18 }
        )]
    );
    assert_eq!(
        service.get("EMP002").await.expect_err("not stored").code(),
        ErrorCode::NotFound
    );
}

#[rstest]
#[tokio::test]
async fn department_with_trailing_space_is_rejected(service: Arc<Service>) {
    let err = service
        .create(payload("EMP003", "Pat Smith", 40, "Sales "))
        .await
        .expect_err("not an exact department");
    assert_eq!(
        violations(err),
        [("department".to_owned(), ViolationKind::Enum)]
    );
}

#[rstest]
#[tokio::test]
async fn emp001_scenario(service: Arc<Service>) {
    service
        .create(payload("EMP001", "John Doe", 30, "Engineering"))
        .await
        .expect("created");

    let listed = service
        .list(ListEmployeesRequest::default())
        .await
        .expect("listed");
    assert_eq!(listed.total_count, 1);
    assert_eq!((listed.page, listed.limit), (1, 10));

    let updated = service
        .update(
            "EMP001",
            json!({ "age": 31, "department": "Information Technology" }),
        )
        .await
        .expect("updated");
    assert_eq!(updated.age().get(), 31);
    assert_eq!(updated.department(), Department::InformationTechnology);

    service.delete("EMP001").await.expect("deleted");
    let listed = service
        .list(ListEmployeesRequest::default())
        .await
        .expect("listed");
    assert_eq!(listed.total_count, 0);
    assert!(listed.items.is_empty());
}

#[rstest]
fn departments_are_the_closed_set(service: Arc<Service>) {
    let departments = service.list_departments();
    assert_eq!(departments.len(), 10);
    assert_eq!(departments.first(), Some(&Department::Engineering));
    assert_eq!(
        departments.last(),
        Some(&Department::ResearchAndDevelopment)
    );
}
