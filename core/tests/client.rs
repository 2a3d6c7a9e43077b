//! Scenarios that drive `ApiClient` directly, without a resource wrapper.

mod common;

use placeholder_core::{
    ApiClient, ApiError, Empty, HarnessConfig, HttpMethod, Post, User,
};

use common::{init_tracing, start_server, MISSING_ID};

#[test]
fn get_all_users_with_raw_request() {
    let base = start_server();
    let client = ApiClient::new(&base);
    let request = client.create_request("/users", HttpMethod::Get);
    let env = client.execute::<Vec<User>>(&request).unwrap();
    env.assert_status(200).unwrap();
    assert!(!env.data_or_err().unwrap().is_empty());
}

#[test]
fn create_user_with_body() {
    let base = start_server();
    let client = ApiClient::new(&base);
    let payload = serde_json::json!({
        "name": "John Doe",
        "email": "john.doe@example.com",
        "username": "johndoe",
        "address": { "street": "123 Main St", "suite": "", "city": "New York", "zipcode": "10001" }
    });
    let request = client
        .create_request_with_body("/users", HttpMethod::Post, &payload)
        .unwrap();
    let env = client.execute::<User>(&request).unwrap();
    env.assert_status(201).unwrap();
    let user = env.data_or_err().unwrap();
    assert!(user.id > 0);
    assert_eq!(user.address.city, "New York");
}

#[test]
fn assert_status_failure_carries_context() {
    let base = start_server();
    let client = ApiClient::new(&base);
    let request = client.create_request(&format!("/users/{MISSING_ID}"), HttpMethod::Get);
    let env = client.execute::<User>(&request).unwrap();
    let err = env.assert_status(200).unwrap_err();
    match err {
        ApiError::Assertion { expected, actual, message } => {
            assert_eq!(expected, "200");
            assert_eq!(actual, "404");
            assert!(message.contains(&format!("/users/{MISSING_ID}")));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn mismatched_shape_preserves_raw_body() {
    let base = start_server();
    let client = ApiClient::new(&base);
    let request = client.create_request("/posts", HttpMethod::Get);
    let env = client.execute::<Post>(&request).unwrap();
    env.assert_status(200).unwrap();
    assert!(env.data.is_none());
    assert!(env.raw_body.starts_with('['));
    assert!(matches!(env.into_data(), Err(ApiError::Decode { status: 200, .. })));
}

#[test]
fn delete_with_raw_request() {
    let base = start_server();
    let client = ApiClient::new(&base);
    let request = client.create_request("/users/1", HttpMethod::Delete);
    let env = client.execute::<Empty>(&request).unwrap();
    env.assert_status(200).unwrap();
}

#[test]
fn config_driven_client_sends_bearer_and_reaches_server() {
    let base = start_server();
    let config = HarnessConfig {
        base_url: base,
        timeout_secs: 5,
        api_key: Some("test-key".to_string()),
    };
    let client = ApiClient::from_config(&config);
    let request = client.create_request("/users/1", HttpMethod::Get);
    assert_eq!(request.header("Authorization"), Some("Bearer test-key"));
    let env = client.execute::<User>(&request).unwrap();
    env.assert_status(200).unwrap();
}

#[test]
fn refused_connection_is_a_transport_error() {
    init_tracing();
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client = ApiClient::new(&format!("http://127.0.0.1:{port}"));
    let request = client.create_request("/users", HttpMethod::Get);
    let err = client.execute::<Vec<User>>(&request).unwrap_err();
    match err {
        ApiError::Transport { method, url, .. } => {
            assert_eq!(method, HttpMethod::Get);
            assert_eq!(url, format!("http://127.0.0.1:{port}/users"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn unanswered_request_times_out_as_transport_error() {
    init_tracing();
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    // Accept the connection and never answer.
    std::thread::spawn(move || {
        let held = listener.accept();
        std::thread::sleep(std::time::Duration::from_secs(10));
        drop(held);
    });

    let config = HarnessConfig {
        base_url: format!("http://{addr}"),
        timeout_secs: 1,
        api_key: None,
    };
    let client = ApiClient::from_config(&config);
    let request = client.create_request("/users", HttpMethod::Get);
    let started = std::time::Instant::now();
    let err = client.execute::<Vec<User>>(&request).unwrap_err();
    assert!(started.elapsed() < std::time::Duration::from_secs(5));
    match err {
        ApiError::Transport { method, url, .. } => {
            assert_eq!(method, HttpMethod::Get);
            assert_eq!(url, format!("http://{addr}/users"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
