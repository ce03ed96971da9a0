#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` using wiremock.

use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use webdash_api::{ApiClient, Error, ImageUpload, ProjectPayload, RoleRequest, Technology};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = ApiClient::with_client(reqwest::Client::new(), base_url);
    (server, client)
}

fn user_json() -> serde_json::Value {
    json!({
        "id": 7,
        "name": "Admin",
        "email": "admin@x.com",
        "email_verified_at": null,
        "created_at": "2024-01-01T00:00:00.000000Z",
        "updated_at": "2024-01-02T00:00:00.000000Z",
        "roles": [{ "id": 1, "name": "Admin", "guard_name": "web", "permissions": [] }],
        "branch": null,
        "all_permissions": [{ "id": 4, "name": "user-list", "guard_name": "web" }],
        "permissions": []
    })
}

// ── Headers ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_requests_carry_accept_and_bearer_headers() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/profile"))
        .and(header("accept", "application/json"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "status": "success", "user": user_json() })),
        )
        .expect(1)
        .mount(&server)
        .await;

    client.set_token(Some("tok-123".to_string().into()));
    let user = client.profile().await.unwrap();
    assert_eq!(user.email, "admin@x.com");
}

#[tokio::test]
async fn test_no_authorization_header_without_token() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/seos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "success", "data": [] })))
        .mount(&server)
        .await;

    assert!(!client.has_token());
    let pages = client.list_seo_pages().await.unwrap();
    assert!(pages.is_empty());

    let received = server.received_requests().await.unwrap();
    assert!(!received[0].headers.contains_key("authorization"));
}

// ── Login ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_login_success() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_json(json!({ "email": "admin@x.com", "password": "secret" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "message": "Login successful",
            "token": "abc",
            "user": user_json(),
        })))
        .mount(&server)
        .await;

    let secret: secrecy::SecretString = "secret".to_string().into();
    let login = client.login("admin@x.com", &secret).await.unwrap();

    assert_eq!(login.user.id, 7);
    assert_eq!(login.message.as_deref(), Some("Login successful"));
    assert_eq!(secrecy::ExposeSecret::expose_secret(&login.token), "abc");
}

#[tokio::test]
async fn test_login_error_status_is_rejected_with_message() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "status": "error", "message": "Invalid credentials" })),
        )
        .mount(&server)
        .await;

    let secret: secrecy::SecretString = "nope".to_string().into();
    let result = client.login("admin@x.com", &secret).await;

    match result {
        Err(Error::Rejected { message }) => assert_eq!(message, "Invalid credentials"),
        other => panic!("expected Rejected, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_login_without_token_falls_back_to_generic_message() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "success" })))
        .mount(&server)
        .await;

    let secret: secrecy::SecretString = "secret".to_string().into();
    let err = client.login("admin@x.com", &secret).await.unwrap_err();
    assert_eq!(err.to_string(), "Login failed");
}

// ── Response normalisation ──────────────────────────────────────────

#[tokio::test]
async fn test_capitalised_status_is_accepted() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/roles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "Success",
            "message": "Role list",
            "role": [{
                "id": 1,
                "name": "Admin",
                "guard_name": "web",
                "permissions": [{ "id": 2, "name": "role-list", "guard_name": "web",
                                  "pivot": { "role_id": 1, "permission_id": 2 } }]
            }]
        })))
        .mount(&server)
        .await;

    let roles = client.list_roles().await.unwrap();
    assert_eq!(roles.len(), 1);
    assert_eq!(roles[0].permissions[0].name, "role-list");
}

#[tokio::test]
async fn test_capitalised_error_status_is_rejected() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/permissions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "status": "Error", "message": "Name taken" })),
        )
        .mount(&server)
        .await;

    let req = webdash_api::PermissionRequest {
        name: "user-list".into(),
        guard_name: None,
    };
    let err = client.create_permission(&req).await.unwrap_err();
    assert!(matches!(err, Error::Rejected { ref message } if message == "Name taken"));
}

#[tokio::test]
async fn test_json_error_uses_backend_message() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/seos/9"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({ "status": "error", "message": "In use" })),
        )
        .mount(&server)
        .await;

    let err = client.delete_seo_page(9).await.unwrap_err();
    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 422);
            assert_eq!(message, "In use");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_json_error_without_message_uses_generic_text() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/permissions"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({})))
        .mount(&server)
        .await;

    let err = client.list_permissions().await.unwrap_err();
    assert_eq!(err.to_string(), "HTTP error! status: 500");
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_non_json_ok_is_empty_success() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/user_delete/3"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let ack = client.delete_user(3).await.unwrap();
    assert_eq!(ack.message, None);
}

#[tokio::test]
async fn test_non_json_ok_list_is_empty_collection() {
    let (server, client) = setup().await;

    for route in ["/roles", "/seos", "/admin/projects", "/user_list"] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_string(""))
            .mount(&server)
            .await;
    }

    assert_eq!(client.list_roles().await.unwrap().len(), 0);
    assert_eq!(client.list_seo_pages().await.unwrap().len(), 0);
    assert_eq!(client.list_projects().await.unwrap().len(), 0);
    assert!(client.list_users(1).await.unwrap().data.is_empty());
}

#[tokio::test]
async fn test_non_json_ok_single_record_is_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/admin/projects/9"))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .mount(&server)
        .await;

    let err = client.get_project(9).await.unwrap_err();
    assert!(matches!(err, Error::Deserialization { .. }));
}

#[tokio::test]
async fn test_non_json_error_is_http_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/admin/projects"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad gateway"))
        .mount(&server)
        .await;

    let err = client.list_projects().await.unwrap_err();
    assert!(matches!(err, Error::Http { status: 502 }));
    assert_eq!(err.to_string(), "HTTP error! status: 502");
}

#[tokio::test]
async fn test_unauthorized_is_flagged() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/profile"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Unauthenticated." })),
        )
        .mount(&server)
        .await;

    let err = client.profile().await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.to_string(), "Unauthenticated.");
}

// ── Users ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_users_reads_pagination_envelope() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/user_list"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "message": "ok",
            "users": {
                "current_page": 2,
                "data": [user_json()],
                "from": 11,
                "last_page": 3,
                "per_page": 10,
                "to": 11,
                "total": 21,
                "links": [{ "url": null, "label": "&laquo; Previous", "active": false }]
            }
        })))
        .mount(&server)
        .await;

    let page = client.list_users(2).await.unwrap();
    assert_eq!(page.current_page, 2);
    assert_eq!(page.total, 21);
    assert!(page.has_next());
    assert_eq!(page.data[0].roles[0].name, "Admin");
}

// ── Roles ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_update_role_encodes_query_string() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/roles/4"))
        .and(query_param("name", "Editor"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "status": "success", "message": "Role updated" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let req = RoleRequest {
        name: "Editor".into(),
        permission: vec!["post-list".into(), "post-edit".into()],
    };
    let ack = client.update_role(4, &req).await.unwrap();
    assert_eq!(ack.message.as_deref(), Some("Role updated"));

    let received = server.received_requests().await.unwrap();
    let perms: Vec<String> = received[0]
        .url
        .query_pairs()
        .filter(|(k, _)| k == "permission[]")
        .map(|(_, v)| v.into_owned())
        .collect();
    assert_eq!(perms, vec!["post-list", "post-edit"]);
}

#[tokio::test]
async fn test_role_members_are_grouped_by_role() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/role_wise_user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "roles": {
                "Admin": [{ "user_id": 1, "email": "a@x.com", "name": "A", "role_name": "Admin" }],
                "Editor": []
            }
        })))
        .mount(&server)
        .await;

    let members = client.role_members().await.unwrap();
    assert_eq!(members["Admin"][0].user_id, 1);
    assert!(members["Editor"].is_empty());
}

// ── Projects ────────────────────────────────────────────────────────

fn project_payload(image: Option<ImageUpload>) -> ProjectPayload {
    ProjectPayload {
        title: "Portal".into(),
        short_description: "Customer portal".into(),
        category: "Web".into(),
        duration: "3 months".into(),
        team_size: "4".into(),
        rating: "4.5".into(),
        client: "Acme".into(),
        year: "2024".into(),
        technologies: vec![Technology {
            name: "Rust".into(),
            icon: "rust.svg".into(),
        }],
        live_url: Some("https://portal.example".into()),
        github_url: None,
        status: true,
        image,
    }
}

#[tokio::test]
async fn test_update_project_without_image_uses_json_put() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/admin/projects/5"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "success" })))
        .expect(1)
        .mount(&server)
        .await;

    client.update_project(5, &project_payload(None)).await.unwrap();
}

#[tokio::test]
async fn test_update_project_with_image_spoofs_put() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/admin/projects/5"))
        .and(header_exists("content-type"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "status": "success", "message": "Project updated" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let image = ImageUpload {
        file_name: "cover.png".into(),
        content_type: "image/png".into(),
        bytes: vec![0x89, 0x50, 0x4e, 0x47],
    };
    let ack = client.update_project(5, &project_payload(Some(image))).await.unwrap();
    assert_eq!(ack.message.as_deref(), Some("Project updated"));

    let received = server.received_requests().await.unwrap();
    let content_type = received[0].headers["content-type"].to_str().unwrap();
    assert!(content_type.starts_with("multipart/form-data; boundary="));

    let body = String::from_utf8_lossy(&received[0].body);
    assert!(body.contains("name=\"_method\"\r\n\r\nPUT"));
    assert!(body.contains("name=\"technologies[0][name]\"\r\n\r\nRust"));
    assert!(body.contains("name=\"status\"\r\n\r\n1"));
    assert!(body.contains("name=\"image_url\"; filename=\"cover.png\""));
}

// ── Contact ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_contact_messages_use_success_flag() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/contact-messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [{
                "id": 1,
                "first_name": "Jo",
                "last_name": "Park",
                "phone_number": "555",
                "email_address": "jo@x.com",
                "company": null,
                "subject": "Hello",
                "message": "Hi there",
                "created_at": "2024-05-01",
                "updated_at": "2024-05-01"
            }]
        })))
        .mount(&server)
        .await;

    let messages = client.list_contact_messages().await.unwrap();
    assert_eq!(messages[0].full_name(), "Jo Park");
}
