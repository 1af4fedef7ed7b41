//! Tests for employee HTTP handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use mockall::predicate::eq;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::{MockEmployeeCommand, MockEmployeeQuery, MockStoreHealth};
use crate::domain::validation::validate_full;
use crate::domain::{Age, Department, EmployeeError, EmployeeId, EmployeeName};
use crate::inbound::http::error::{json_config, query_config};

#[fixture]
fn john() -> Employee {
    Employee::new(
        EmployeeId::new("EMP001").expect("id"),
        EmployeeName::new("John Doe").expect("name"),
        Age::new(30).expect("age"),
        Department::Engineering,
    )
}

fn test_app(
    command: MockEmployeeCommand,
    query: MockEmployeeQuery,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = HttpState::new(
        Arc::new(command),
        Arc::new(query),
        Arc::new(MockStoreHealth::new()),
    );
    App::new()
        .app_data(web::Data::new(state))
        .app_data(json_config())
        .app_data(query_config())
        .service(create_employee)
        .service(list_employees)
        .service(list_departments)
        .service(get_employee)
        .service(update_employee)
        .service(delete_employee)
}

async fn call(
    command: MockEmployeeCommand,
    query: MockEmployeeQuery,
    request: actix_test::TestRequest,
) -> (StatusCode, Value) {
    let app = actix_test::init_service(test_app(command, query)).await;
    let response = actix_test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, value)
}

#[rstest]
#[actix_web::test]
async fn create_answers_created_with_envelope(john: Employee) {
    let mut command = MockEmployeeCommand::new();
    command
        .expect_create()
        .withf(|payload| payload["employee_id"] == "EMP001")
        .times(1)
        .return_once(move |_| Ok(john));

    let (status, body) = call(
        command,
        MockEmployeeQuery::new(),
        actix_test::TestRequest::post().uri("/employees").set_json(json!({
            "employee_id": "EMP001",
            "name": "John Doe",
            "age": 30,
            "department": "Engineering",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({
            "message": "Employee created successfully",
            "data": {
                "employee": {
                    "employee_id": "EMP001",
                    "name": "John Doe",
                    "age": 30,
                    "department": "Engineering",
                }
            }
        })
    );
}

#[rstest]
#[actix_web::test]
async fn create_validation_failure_is_unprocessable() {
    let mut command = MockEmployeeCommand::new();
    command.expect_create().times(1).return_once(|payload| {
        Err(EmployeeError::from(
            validate_full(&payload).expect_err("invalid payload"),
        ))
    });

    let (status, body) = call(
        command,
        MockEmployeeQuery::new(),
        actix_test::TestRequest::post()
            .uri("/employees")
            .set_json(json!({ "name": "J", "age": 15 })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "validation_failed");
    let fields: Vec<&str> = body["details"]["violations"]
        .as_array()
        .expect("violations")
        .iter()
        .filter_map(|violation| violation["field"].as_str())
        .collect();
    assert_eq!(fields, ["employee_id", "name", "age", "department"]);
}

#[rstest]
#[actix_web::test]
async fn undecodable_body_never_reaches_service() {
    let mut command = MockEmployeeCommand::new();
    command.expect_create().never();

    let (status, body) = call(
        command,
        MockEmployeeQuery::new(),
        actix_test::TestRequest::post()
            .uri("/employees")
            .insert_header(("content-type", "application/json"))
            .set_payload("{\"employee_id\": "),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["details"]["violations"][0]["field"], "body");
}

#[rstest]
#[actix_web::test]
async fn create_conflict_is_reported() {
    let mut command = MockEmployeeCommand::new();
    command
        .expect_create()
        .return_once(|_| Err(EmployeeError::conflict("EMP001")));

    let (status, body) = call(
        command,
        MockEmployeeQuery::new(),
        actix_test::TestRequest::post()
            .uri("/employees")
            .set_json(json!({})),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["details"], json!({ "employee_id": "EMP001" }));
}

#[rstest]
#[actix_web::test]
async fn list_applies_defaults(john: Employee) {
    let mut query = MockEmployeeQuery::new();
    query
        .expect_list()
        .with(eq(ListEmployeesRequest::default()))
        .times(1)
        .return_once(move |_| {
            let request = pagination::PageRequest::try_new(1, 10).expect("valid page");
            Ok(Page::new(request, 1, vec![john]))
        });

    let (status, body) = call(
        MockEmployeeCommand::new(),
        query,
        actix_test::TestRequest::get().uri("/employees"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_count"], 1);
    assert_eq!(body["page"], 1);
    assert_eq!(body["limit"], 10);
    assert_eq!(body["employees"][0]["employee_id"], "EMP001");
}

#[rstest]
#[actix_web::test]
async fn list_forwards_filter_and_paging() {
    let mut query = MockEmployeeQuery::new();
    query
        .expect_list()
        .with(eq(ListEmployeesRequest {
            page: 2,
            limit: 5,
            department: Some("Human Resources".to_owned()),
        }))
        .times(1)
        .return_once(|_| {
            let request = pagination::PageRequest::try_new(2, 5).expect("valid page");
            Ok(Page::new(request, 0, Vec::new()))
        });

    let (status, body) = call(
        MockEmployeeCommand::new(),
        query,
        actix_test::TestRequest::get()
            .uri("/employees?page=2&limit=5&department=Human%20Resources"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["employees"], json!([]));
}

#[rstest]
#[actix_web::test]
async fn malformed_query_is_a_query_violation() {
    let mut query = MockEmployeeQuery::new();
    query.expect_list().never();

    let (status, body) = call(
        MockEmployeeCommand::new(),
        query,
        actix_test::TestRequest::get().uri("/employees?page=first"),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["details"]["violations"][0]["field"], "query");
}

#[rstest]
#[actix_web::test]
async fn departments_route_is_not_an_employee_lookup() {
    let mut query = MockEmployeeQuery::new();
    query.expect_get().never();
    query
        .expect_list_departments()
        .times(1)
        .return_const(Department::ALL.to_vec());

    let (status, body) = call(
        MockEmployeeCommand::new(),
        query,
        actix_test::TestRequest::get().uri("/employees/meta/departments"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["departments"].as_array().map(Vec::len), Some(10));
    assert_eq!(body["departments"][3], "Human Resources");
}

#[rstest]
#[actix_web::test]
async fn get_returns_bare_employee(john: Employee) {
    let mut query = MockEmployeeQuery::new();
    query
        .expect_get()
        .with(eq("EMP001"))
        .times(1)
        .return_once(move |_| Ok(john));

    let (status, body) = call(
        MockEmployeeCommand::new(),
        query,
        actix_test::TestRequest::get().uri("/employees/EMP001"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "John Doe");
    assert_eq!(body["department"], "Engineering");
}

#[rstest]
#[actix_web::test]
async fn get_missing_is_not_found() {
    let mut query = MockEmployeeQuery::new();
    query
        .expect_get()
        .return_once(|id| Err(EmployeeError::not_found(id)));

    let (status, body) = call(
        MockEmployeeCommand::new(),
        query,
        actix_test::TestRequest::get().uri("/employees/EMP404"),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
    assert_eq!(body["message"], "employee with ID 'EMP404' not found");
}

#[rstest]
#[actix_web::test]
async fn update_answers_with_envelope(john: Employee) {
    let mut command = MockEmployeeCommand::new();
    command
        .expect_update()
        .withf(|id, payload| id == "EMP001" && *payload == json!({ "age": 31 }))
        .times(1)
        .return_once(move |_, _| Ok(john));

    let (status, body) = call(
        command,
        MockEmployeeQuery::new(),
        actix_test::TestRequest::patch()
            .uri("/employees/EMP001")
            .set_json(json!({ "age": 31 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Employee updated successfully");
    assert_eq!(body["data"]["employee"]["employee_id"], "EMP001");
}

#[rstest]
#[actix_web::test]
async fn delete_reports_removed_id() {
    let mut command = MockEmployeeCommand::new();
    command
        .expect_delete()
        .with(eq("EMP001"))
        .times(1)
        .return_once(|id| Ok(EmployeeId::new(id).expect("id")));

    let (status, body) = call(
        command,
        MockEmployeeQuery::new(),
        actix_test::TestRequest::delete().uri("/employees/EMP001"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "message": "Employee deleted successfully",
            "data": { "deleted_employee_id": "EMP001" },
        })
    );
}

#[rstest]
#[actix_web::test]
async fn store_outage_is_service_unavailable() {
    let mut command = MockEmployeeCommand::new();
    command.expect_delete().return_once(|_| {
        Err(EmployeeError::StoreUnavailable {
            message: "database connection error".to_owned(),
        })
    });

    let (status, body) = call(
        command,
        MockEmployeeQuery::new(),
        actix_test::TestRequest::delete().uri("/employees/EMP001"),
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["message"], "record store unavailable");
    assert!(body.get("details").is_none());
}
