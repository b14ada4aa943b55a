use std::sync::Arc;

use actix_web::http::header::{AUTHORIZATION, CONTENT_DISPOSITION, CONTENT_TYPE};
use actix_web::http::StatusCode;
use actix_web::web::{self, Data};
use actix_web::{test, App};
use async_trait::async_trait;
use serde_json::Value;

use adgenius::account::CredentialsBody;
use adgenius::campaign::{decode_share_link, CampaignBody, PendingGenerations, ShareBody};
use adgenius::config::Config;
use adgenius::database::{Database, MemoryDatabase};
use adgenius::insight::InsightBody;
use adgenius::provider::Provider;
use adgenius::session::SessionBody;
use adgenius::Error;

struct FixedProvider(&'static str);

#[async_trait]
impl Provider for FixedProvider {
    async fn generate(&self, _prompt: &str) -> Result<String, Error> {
        Ok(self.0.to_owned())
    }
}

struct BrokenProvider;

#[async_trait]
impl Provider for BrokenProvider {
    async fn generate(&self, _prompt: &str) -> Result<String, Error> {
        Err(Error::ProviderError {
            reason: "connection reset".into(),
        })
    }
}

macro_rules! init_app {
    ($provider:expr) => {{
        let db: Arc<dyn Database> = Arc::new(MemoryDatabase::new());
        let provider: Arc<dyn Provider> = Arc::new($provider);
        let config = Config {
            public_url: "https://x.test".into(),
            ..Config::default()
        };
        test::init_service(
            App::new()
                .app_data(Data::from(db))
                .app_data(Data::from(provider))
                .app_data(Data::new(PendingGenerations::new()))
                .app_data(Data::new(config))
                .configure(adgenius::configure)
                .default_service(web::to(adgenius::path_does_not_exist)),
        )
        .await
    }};
}

fn credentials(username: &str, password: &str) -> CredentialsBody {
    CredentialsBody {
        username: username.into(),
        password: password.into(),
    }
}

fn bearer(session: &SessionBody) -> (actix_web::http::header::HeaderName, String) {
    (AUTHORIZATION, format!("Bearer {}", session.session_id))
}

#[actix_web::test]
async fn signup_login_and_logout() {
    let app = init_app!(FixedProvider("copy"));

    let req = test::TestRequest::post()
        .uri("/accounts")
        .set_json(&credentials("ada", "lovelace"))
        .to_request();
    let signed_up: SessionBody = test::call_and_read_body_json(&app, req).await;
    assert_eq!(signed_up.username, "ada");

    let req = test::TestRequest::get()
        .uri("/sessions/current")
        .insert_header(bearer(&signed_up))
        .to_request();
    let current: SessionBody = test::call_and_read_body_json(&app, req).await;
    assert_eq!(current.session_id, signed_up.session_id);

    let req = test::TestRequest::delete()
        .uri("/sessions/current")
        .insert_header(bearer(&signed_up))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri("/sessions/current")
        .insert_header(bearer(&signed_up))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/sessions")
        .set_json(&credentials("ada", "lovelace"))
        .to_request();
    let logged_in: SessionBody = test::call_and_read_body_json(&app, req).await;
    assert_eq!(logged_in.username, "ada");
    assert_ne!(logged_in.session_id, signed_up.session_id);
}

#[actix_web::test]
async fn credential_failures_use_error_envelope() {
    let app = init_app!(FixedProvider("copy"));

    let req = test::TestRequest::post()
        .uri("/accounts")
        .set_json(&credentials("ada", "lovelace"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/accounts")
        .set_json(&credentials("ada", "other"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error_code"], "E4091000");
    assert_eq!(body["error_meta"]["username"], "ada");

    let req = test::TestRequest::post()
        .uri("/sessions")
        .set_json(&credentials("ada", "wrong"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error_code"], "E4011001");

    let req = test::TestRequest::post()
        .uri("/sessions")
        .set_json(&credentials("nobody", "lovelace"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn generate_list_export_and_share() {
    let app = init_app!(FixedProvider("Great \"deal\"!"));

    let req = test::TestRequest::post()
        .uri("/accounts")
        .set_json(&credentials("ada", "lovelace"))
        .to_request();
    let session: SessionBody = test::call_and_read_body_json(&app, req).await;

    for product in ["Shoes", "Socks"].iter() {
        let req = test::TestRequest::post()
            .uri("/campaigns")
            .insert_header(bearer(&session))
            .set_json(&serde_json::json!({
                "platform": "facebook",
                "product": product,
                "audience": "Teens",
            }))
            .to_request();
        let created: CampaignBody = test::call_and_read_body_json(&app, req).await;
        assert_eq!(created.product, *product);
        assert_eq!(created.ad_copy, "Great \"deal\"!");
    }

    let req = test::TestRequest::get()
        .uri("/campaigns")
        .insert_header(bearer(&session))
        .to_request();
    let campaigns: Vec<CampaignBody> = test::call_and_read_body_json(&app, req).await;
    let indexes: Vec<usize> = campaigns.iter().map(|c| c.index).collect();
    assert_eq!(indexes, vec![0, 1]);
    assert_eq!(campaigns[1].product, "Socks");

    let req = test::TestRequest::get()
        .uri("/campaigns/export")
        .insert_header(bearer(&session))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(CONTENT_TYPE).unwrap(),
        "text/csv; charset=utf-8"
    );
    assert!(resp
        .headers()
        .get(CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .contains("ad_campaigns.csv"));
    let csv = test::read_body(resp).await;
    assert_eq!(
        csv,
        "Platform,Product,Audience,Ad Copy\n\
         \"facebook\",\"Shoes\",\"Teens\",\"Great \"\"deal\"\"!\"\n\
         \"facebook\",\"Socks\",\"Teens\",\"Great \"\"deal\"\"!\"\n"
    );

    let req = test::TestRequest::get()
        .uri("/campaigns/1/share")
        .insert_header(bearer(&session))
        .to_request();
    let share: ShareBody = test::call_and_read_body_json(&app, req).await;
    assert!(share.link.starts_with("https://x.test/share?data="));
    let shared = decode_share_link(&share.link).unwrap();
    assert_eq!(shared.product, "Socks");
    assert_eq!(shared.ad_copy, "Great \"deal\"!");

    let req = test::TestRequest::get()
        .uri("/campaigns/7/share")
        .insert_header(bearer(&session))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn provider_failure_is_bad_gateway() {
    let app = init_app!(BrokenProvider);

    let req = test::TestRequest::post()
        .uri("/accounts")
        .set_json(&credentials("ada", "lovelace"))
        .to_request();
    let session: SessionBody = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/campaigns")
        .insert_header(bearer(&session))
        .set_json(&serde_json::json!({
            "platform": "google",
            "product": "Shoes",
            "audience": "Teens",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error_code"], "E5021000");

    let req = test::TestRequest::get()
        .uri("/campaigns")
        .insert_header(bearer(&session))
        .to_request();
    let campaigns: Vec<CampaignBody> = test::call_and_read_body_json(&app, req).await;
    assert!(campaigns.is_empty());
}

#[actix_web::test]
async fn campaigns_require_a_session() {
    let app = init_app!(FixedProvider("copy"));

    let req = test::TestRequest::get().uri("/campaigns").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/campaigns/export")
        .insert_header((AUTHORIZATION, "Bearer SES-not-a-session"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn bad_input_is_rejected() {
    let app = init_app!(FixedProvider("copy"));

    let req = test::TestRequest::post()
        .uri("/accounts")
        .set_json(&credentials("ada", "lovelace"))
        .to_request();
    let session: SessionBody = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/campaigns")
        .insert_header(bearer(&session))
        .set_json(&serde_json::json!({
            "platform": "myspace",
            "product": "Shoes",
            "audience": "Teens",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error_code"], "E4001000");

    let req = test::TestRequest::get()
        .uri("/campaigns/first/share")
        .insert_header(bearer(&session))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get().uri("/nowhere").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error_code"], "E4041000");
}

#[actix_web::test]
async fn uploaded_csv_becomes_past_data() {
    let app = init_app!(FixedProvider("copy"));

    let req = test::TestRequest::post()
        .uri("/accounts")
        .set_json(&credentials("ada", "lovelace"))
        .to_request();
    let session: SessionBody = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/insights")
        .insert_header(bearer(&session))
        .insert_header((CONTENT_TYPE, "text/csv"))
        .set_payload("campaign,ctr\na,1\nb,2\nc,3\nd,4\n")
        .to_request();
    let insight: InsightBody = test::call_and_read_body_json(&app, req).await;

    let rows: Vec<Value> = serde_json::from_str(&insight.past_data).unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[2]["campaign"], "c");
}
