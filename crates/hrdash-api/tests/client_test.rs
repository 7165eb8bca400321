#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` using wiremock.

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use hrdash_api::{
    ApiClient, BearerToken, ChangePasswordRequest, Criteria, Department, Dependent, DependentKey,
    EditUserRequest, Employee, Error, Page, PageRequest, Project, TransportConfig,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let client = ApiClient::new(&server.uri(), &TransportConfig::default()).unwrap();
    (server, client)
}

fn token() -> BearerToken {
    BearerToken::new("tkn-123")
}

fn department_json(dnum: i64, name: &str) -> serde_json::Value {
    json!({
        "dnum": dnum,
        "dname": name,
        "supervisorSsn": 111_223_333,
        "mgsStartDate": "2022-01-01T00:00:00.000Z",
        "createdBy": "admin",
        "createdDate": "2022-01-01",
        "modifiedBy": null,
        "modifiedDate": null
    })
}

// ── Auth ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_login_success() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({ "email": "ada@example.com", "password": "hunter22!" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "jwt-abc",
            "user": { "fullName": "Ada Lovelace", "email": "ada@example.com", "role": "ADMIN" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let password = SecretString::from("hunter22!".to_owned());
    let resp = client.login("ada@example.com", &password).await.unwrap();

    assert_eq!(resp.token.expose(), "jwt-abc");
    assert_eq!(resp.user.full_name, "Ada Lovelace");
    assert_eq!(resp.user.role, "ADMIN");
}

#[tokio::test]
async fn test_login_failure_carries_server_message() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Bad credentials" })),
        )
        .mount(&server)
        .await;

    let password = SecretString::from("nope".to_owned());
    let err = client.login("ada@example.com", &password).await.unwrap_err();

    assert!(err.is_unauthorized(), "expected Unauthorized, got: {err:?}");
    assert_eq!(err.server_message(), Some("Bad credentials"));
}

#[tokio::test]
async fn test_logout_sends_bearer() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .and(header("authorization", "Bearer tkn-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "bye" })))
        .expect(1)
        .mount(&server)
        .await;

    let ack = client.logout(&token()).await.unwrap();
    assert_eq!(ack, json!({ "message": "bye" }));
}

#[tokio::test]
async fn test_change_password_uses_patch() {
    let (server, client) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/changepassword"))
        .and(body_json(json!({
            "oldPassword": "old-pass",
            "newPassword": "n3w-pass!",
            "confirmPassword": "n3w-pass!"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let request = ChangePasswordRequest {
        old_password: SecretString::from("old-pass".to_owned()),
        new_password: SecretString::from("n3w-pass!".to_owned()),
        confirm_password: SecretString::from("n3w-pass!".to_owned()),
    };
    let ack = client.change_password(&token(), &request).await.unwrap();
    assert_eq!(ack, serde_json::Value::Null);
}

#[tokio::test]
async fn test_edit_user_uses_put() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/users/edit"))
        .and(body_json(json!({ "email": "new@example.com" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "updated" })))
        .expect(1)
        .mount(&server)
        .await;

    let request = EditUserRequest {
        full_name: None,
        email: Some("new@example.com".into()),
    };
    client.edit_user(&token(), &request).await.unwrap();
}

// ── Resources ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_departments_uses_page_number_param() {
    let (server, client) = setup().await;

    let envelope = json!({
        "departments": [department_json(1, "Research"), department_json(2, "Sales")],
        "page_number": 0,
        "page_size": 5,
        "totalPages": 1
    });

    Mock::given(method("GET"))
        .and(path("/departments"))
        .and(query_param("pageNumber", "0"))
        .and(query_param("pageSize", "5"))
        .and(header("authorization", "Bearer tkn-123"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let page: Page<Department> = client
        .list(&token(), PageRequest::new(0, 5).unwrap())
        .await
        .unwrap();

    assert_eq!(page.len(), 2);
    assert_eq!(page.items[1].dname, "Sales");
    assert_eq!(serde_json::to_value(&page).unwrap(), envelope);
}

#[tokio::test]
async fn test_list_employees_uses_page_num_param() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/employees"))
        .and(query_param("pageNum", "2"))
        .and(query_param("pageSize", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "employees": [],
            "page_number": 2,
            "page_size": 10
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page: Page<Employee> = client
        .list(&token(), PageRequest::new(2, 10).unwrap())
        .await
        .unwrap();
    assert!(page.is_empty());
    assert_eq!(page.total_pages, None);
}

#[tokio::test]
async fn test_blank_token_still_sends_bearer_header() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/projects"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "projects": [],
            "page_number": 0,
            "page_size": 10
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page: Page<Project> = client
        .list(&BearerToken::none(), PageRequest::first())
        .await
        .unwrap();
    assert!(page.is_empty());
}

#[tokio::test]
async fn test_create_returns_server_representation() {
    let (server, client) = setup().await;

    let mut draft = Department::new(9, "Legal");
    draft.supervisor_ssn = Some(111_223_333);

    Mock::given(method("POST"))
        .and(path("/departments"))
        .respond_with(ResponseTemplate::new(201).set_body_json(department_json(9, "Legal")))
        .expect(1)
        .mount(&server)
        .await;

    let created = client.create(&token(), &draft).await.unwrap();
    assert_eq!(created.dnum, 9);
    assert_eq!(created.created_by.as_deref(), Some("admin"));
}

#[tokio::test]
async fn test_update_sends_whole_entity() {
    let (server, client) = setup().await;

    let mut employee = Employee::new(123_456_789, "Ada Lovelace");
    employee.department_number = Some(5);

    Mock::given(method("PUT"))
        .and(path("/employees"))
        .and(body_json(serde_json::to_value(&employee).unwrap()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::to_value(&employee).unwrap()))
        .expect(1)
        .mount(&server)
        .await;

    let updated = client.update(&token(), &employee).await.unwrap();
    assert_eq!(updated, employee);
}

#[tokio::test]
async fn test_delete_composite_key() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/dependents/123456789/Mary%20Ann"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Deleted"))
        .expect(1)
        .mount(&server)
        .await;

    let key = DependentKey {
        employee_ssn: 123_456_789,
        dependent_name: "Mary Ann".into(),
    };
    let ack = client.delete::<Dependent>(&token(), &key).await.unwrap();
    assert_eq!(ack, json!("Deleted"));
}

#[tokio::test]
async fn test_delete_returns_ack() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/departments/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "Department deleted" })))
        .expect(1)
        .mount(&server)
        .await;

    let ack = client.delete::<Department>(&token(), &7).await.unwrap();
    assert_eq!(ack["message"], "Department deleted");
}

#[tokio::test]
async fn test_search_body_and_envelope() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/departments/search"))
        .and(body_json(json!({
            "searchArgs": { "dname": "Eng" },
            "pageNumber": 0,
            "pageSize": 5
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "departments": [department_json(3, "Engineering")],
            "page_number": 0,
            "page_size": 5,
            "totalPages": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut criteria = Criteria::new();
    criteria.insert("dname".into(), "Eng".into());
    let page: Page<Department> = client
        .search(&token(), &criteria, PageRequest::new(0, 5).unwrap())
        .await
        .unwrap();

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].dname, "Engineering");
}

// ── Errors ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_api_error_with_message() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/projects"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({ "message": "Project already exists" })),
        )
        .mount(&server)
        .await;

    let err = client
        .create(&token(), &Project::new(1, "Apollo"))
        .await
        .unwrap_err();

    match err {
        Error::Api { status, message, .. } => {
            assert_eq!(status, 409);
            assert_eq!(message.as_deref(), Some("Project already exists"));
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_expired_token_is_unauthorized() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/departments"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client
        .list::<Department>(&token(), PageRequest::first())
        .await
        .unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.server_message(), None);
}

#[tokio::test]
async fn test_unreadable_multibyte_body_is_deserialization_error() {
    let (server, client) = setup().await;

    // 301 bytes, with a two-byte character straddling byte 200.
    let body = format!("a{}", "é".repeat(150));
    Mock::given(method("GET"))
        .and(path("/departments"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body.clone()))
        .mount(&server)
        .await;

    let err = client
        .list::<Department>(&token(), PageRequest::first())
        .await
        .unwrap_err();
    match err {
        Error::Deserialization { body: raw, .. } => assert_eq!(raw, body),
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let base_url = Url::parse("http://127.0.0.1:1").unwrap();
    let client = ApiClient::with_client(reqwest::Client::new(), base_url);

    let err = client
        .list::<Department>(&token(), PageRequest::first())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Transport(_)), "got: {err:?}");
}
