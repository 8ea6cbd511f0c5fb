//! End-to-end checks of `HttpGateway` against a stand-in backend.

use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use carbon_core::gateway::GatewayConfig;
use carbon_core::{
    AuthFields, CarbonGateway, DetailedAnswers, DietHabit, GatewayError, QuickAnswers,
    RegionQuery, ShoppingLevel, Vehicle,
};
use carbon_http::HttpGateway;

async fn gateway_for(server: &MockServer) -> HttpGateway {
    HttpGateway::new(&GatewayConfig {
        base_url: server.uri(),
        ..GatewayConfig::default()
    })
    .unwrap()
}

#[tokio::test]
async fn anonymous_session_is_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/me"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "is_logged_in": false })))
        .mount(&server)
        .await;
    let gateway = gateway_for(&server).await;

    let status = gateway.session().await.unwrap();

    assert!(!status.is_logged_in);
    assert_eq!(status.into_user(), None);
}

#[tokio::test]
async fn existing_session_yields_the_user() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "is_logged_in": true,
            "user": { "username": "alice", "fullName": "Alice Chen" }
        })))
        .mount(&server)
        .await;
    let gateway = gateway_for(&server).await;

    let user = gateway.session().await.unwrap().into_user().unwrap();

    assert_eq!(user.username, "alice");
    assert_eq!(user.display_name(), "Alice Chen");
}

#[tokio::test]
async fn login_sends_only_credentials_and_keeps_the_session_cookie() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(body_json(json!({ "username": "alice", "password": "pw" })))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "session=abc123; Path=/")
                .set_body_json(json!({
                    "message": "登入成功",
                    "user": { "username": "alice", "fullName": "Alice Chen" }
                })),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/calculate/history"))
        .and(header("cookie", "session=abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    let gateway = gateway_for(&server).await;

    let user = gateway.login("alice", "pw").await.unwrap();
    let history = gateway.history().await.unwrap();

    assert_eq!(user.username, "alice");
    assert!(history.is_empty());
}

#[tokio::test]
async fn bad_credentials_surface_the_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "error": "帳號或密碼錯誤" })))
        .mount(&server)
        .await;
    let gateway = gateway_for(&server).await;

    let error = gateway.login("alice", "wrong").await.unwrap_err();

    assert_eq!(error, GatewayError::Unauthorized("帳號或密碼錯誤".to_string()));
    assert_eq!(error.user_message(), "帳號或密碼錯誤");
}

#[tokio::test]
async fn register_posts_every_form_field() {
    let server = MockServer::start().await;
    let fields = AuthFields {
        username: "bob".to_string(),
        password: "pw".to_string(),
        email: "bob@example.com".to_string(),
        ..AuthFields::default()
    };
    Mock::given(method("POST"))
        .and(path("/api/register"))
        .and(body_json(serde_json::to_value(&fields).unwrap()))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "message": "註冊成功！請登入" })))
        .mount(&server)
        .await;
    let gateway = gateway_for(&server).await;

    let registration = gateway.register(&fields).await.unwrap();

    assert_eq!(registration.message.as_deref(), Some("註冊成功！請登入"));
}

#[tokio::test]
async fn duplicate_registration_is_rejected_with_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/register"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({ "error": "帳號或 Email 已被註冊" })))
        .mount(&server)
        .await;
    let gateway = gateway_for(&server).await;

    let error = gateway.register(&AuthFields::default()).await.unwrap_err();

    assert_eq!(
        error,
        GatewayError::Rejected {
            status: 409,
            message: "帳號或 Email 已被註冊".to_string(),
        }
    );
}

#[tokio::test]
async fn quick_estimate_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/calculate/quick"))
        .and(body_json(json!({ "commute": "bike", "diet": "vegetarian", "shopping": "low" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 500,
            "breakdown": { "transport": 50, "diet": 200, "consumption": 250 },
            "top_source": "consumption",
            "suggestion": "Repair before you replace."
        })))
        .mount(&server)
        .await;
    let gateway = gateway_for(&server).await;
    let answers = QuickAnswers {
        commute: Vehicle::Bike,
        diet: DietHabit::Vegetarian,
        shopping: ShoppingLevel::Low,
    };

    let result = gateway.calculate_quick(&answers).await.unwrap();

    assert_eq!(result.total, dec!(500));
    assert_eq!(result.breakdown["diet"], dec!(200));
    assert_eq!(result.top_source.as_deref(), Some("consumption"));
}

#[tokio::test]
async fn detailed_estimate_sends_nested_categories() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/calculate/detailed"))
        .and(body_json(json!({
            "energy": { "electricity": 120.0, "gas": 0.0, "water": 0.0 },
            "transport": { "km": 0.0, "type": "scooter_gas" },
            "diet": { "meat": 0.0, "veg": 0.0, "grain": 0.0 },
            "consumption": { "clothes": 0.0, "electronics": 0.0 },
            "waste": { "bags": 0.0, "recycle": 0.0 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 61.2,
            "breakdown": { "energy": 61.2 }
        })))
        .mount(&server)
        .await;
    let gateway = gateway_for(&server).await;
    let mut answers = DetailedAnswers::default();
    answers.energy.electricity = dec!(120);

    let result = gateway.calculate_detailed(&answers).await.unwrap();

    assert_eq!(result.total, dec!(61.2));
    assert_eq!(result.suggestion, None);
}

#[tokio::test]
async fn estimate_without_session_is_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/calculate/detailed"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "error": "請先登入" })))
        .mount(&server)
        .await;
    let gateway = gateway_for(&server).await;

    let error = gateway
        .calculate_detailed(&DetailedAnswers::default())
        .await
        .unwrap_err();

    assert_eq!(error, GatewayError::Unauthorized("請先登入".to_string()));
}

#[tokio::test]
async fn history_accepts_string_encoded_breakdowns() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/calculate/history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 2,
                "log_type": "detailed",
                "total_carbon": 88.5,
                "breakdown": "{\"energy\": 50.5, \"diet\": 38}",
                "created_at": "Tue, 14 Jan 2025 08:30:00 GMT"
            },
            {
                "id": 1,
                "log_type": "quick",
                "total_carbon": 500,
                "breakdown": { "transport": 500 },
                "created_at": "Mon, 13 Jan 2025 08:30:00 GMT"
            }
        ])))
        .mount(&server)
        .await;
    let gateway = gateway_for(&server).await;

    let history = gateway.history().await.unwrap();

    assert_eq!(history.len(), 2);
    assert_eq!(history[0].id, Some(2));
    assert_eq!(history[0].breakdown["energy"], dec!(50.5));
    assert_eq!(history[1].total_carbon, dec!(500));
    assert!(history[0].created_at_utc() > history[1].created_at_utc());
}

#[tokio::test]
async fn regional_stats_forward_the_filter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/stats/region"))
        .and(query_param("city", "高雄市"))
        .and(query_param("district", "仁武區"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sample_count": 3,
            "avg_total": 210.4,
            "breakdown_avg": { "transport": 120.1, "diet": 90.3 },
            "top_source": "交通",
            "chart_data": [
                { "name": "交通", "value": 120.1 },
                { "name": "飲食", "value": 90.3 }
            ]
        })))
        .mount(&server)
        .await;
    let gateway = gateway_for(&server).await;
    let query = RegionQuery::new(Some("高雄市"), Some("仁武區"));

    let stats = gateway.regional_stats(&query).await.unwrap();

    assert_eq!(stats.sample_count, 3);
    assert_eq!(stats.top_source, "交通");
    assert_eq!(stats.chart_data.len(), 2);
}

#[tokio::test]
async fn regional_stats_without_samples() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/stats/region"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sample_count": 0,
            "avg_total": 0,
            "breakdown_avg": {},
            "top_source": "無資料"
        })))
        .mount(&server)
        .await;
    let gateway = gateway_for(&server).await;

    let stats = gateway.regional_stats(&RegionQuery::default()).await.unwrap();

    assert!(stats.is_empty());
    assert!(stats.chart_data.is_empty());
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/calculate/quick"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html>oops</html>", "text/html"))
        .mount(&server)
        .await;
    let gateway = gateway_for(&server).await;

    let error = gateway
        .calculate_quick(&QuickAnswers::default())
        .await
        .unwrap_err();

    assert!(matches!(error, GatewayError::Decode(_)));
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    let server = MockServer::start().await;
    let gateway = gateway_for(&server).await;
    drop(server);

    let error = gateway.history().await.unwrap_err();

    assert!(matches!(error, GatewayError::Transport(_)));
}

#[tokio::test]
async fn logout_accepts_any_json_acknowledgment() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/logout"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "已登出" })))
        .expect(1)
        .mount(&server)
        .await;
    let gateway = gateway_for(&server).await;

    gateway.logout().await.unwrap();
}
