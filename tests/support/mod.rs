#![allow(dead_code)]

use axum::Router;
use serde_json::{json, Map, Value};
use skillonx_client::{
    AccountType, ApiClient, ClientConfig, DeviceInfo, Environment, MemorySessionStore, Session,
    UserDetails,
};

/// Serve `app` on an ephemeral local port and return a client pointed at it.
pub async fn spawn(app: Router) -> ApiClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });

    let config =
        ClientConfig::for_environment(Environment::Development).with_base_url(format!("http://{addr}"));
    ApiClient::new(config).expect("build client")
}

pub fn device() -> DeviceInfo {
    DeviceInfo {
        user_agent: "tests".to_string(),
        platform: "linux x86_64".to_string(),
        language: "en-US".to_string(),
        screen_resolution: "1280x720".to_string(),
        time_zone: "UTC".to_string(),
    }
}

pub fn university_session(id: &str, token: &str) -> Session<MemorySessionStore> {
    let mut session = Session::hydrate(MemorySessionStore::default()).expect("hydrate");
    let mut user = Map::new();
    user.insert("_id".to_string(), json!(id));
    session
        .login(UserDetails {
            user,
            user_type: AccountType::University,
            token: token.to_string(),
            is_authenticated: true,
        })
        .expect("login");
    session
}

pub fn students_payload() -> Value {
    json!({
        "data": [
            {
                "_id": "b",
                "firstName": "Bea",
                "lastName": "Bell",
                "email": "bea@example.com",
                "assessmentResults": [
                    { "workshopId": "w1", "score": { "obtainedMarks": 100, "totalMarks": 100 } },
                    { "workshopId": "w2", "score": { "obtainedMarks": 0, "totalMarks": 50 } }
                ]
            },
            {
                "_id": "c",
                "firstName": "Cy",
                "lastName": "Cole",
                "email": "cy@example.com",
                "assessmentResults": []
            },
            {
                "_id": "a",
                "firstName": "Ada",
                "lastName": "Ames",
                "email": "ada@example.com",
                "assessmentResults": [
                    { "workshopId": "w1", "score": { "obtainedMarks": 80, "totalMarks": 100 } },
                    { "workshopId": "w1", "score": { "obtainedMarks": 60, "totalMarks": 100 } }
                ]
            }
        ]
    })
}
