//! Engine HTTP API: health, contact submission and message listing.

use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder, ResponseError, get, post, web};
use serde_json::json;
use tracing::{error, info, warn};

use crate::models::{ContactReceipt, ContactRequest, MessageView, SystemStatus};
use crate::store::{MessageStore, StoreError};

/// Registers the engine routes and its JSON extractor settings.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_rejection))
        .service(health)
        .service(contact)
        .service(messages);
}

fn json_rejection(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    warn!(error = %err, "Rejected malformed contact payload");
    let response = HttpResponse::UnprocessableEntity().json(json!({ "error": err.to_string() }));
    InternalError::from_response(err, response).into()
}

impl ResponseError for StoreError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        error!(error = %self, "Message store failure");
        HttpResponse::InternalServerError().json(json!({ "error": "internal server error" }))
    }
}

/// Always 200; the body carries the health state.
#[get("/health")]
async fn health(store: web::Data<dyn MessageStore>) -> impl Responder {
    let status = if store.ping().await {
        SystemStatus::operational()
    } else {
        SystemStatus::store_unreachable()
    };
    HttpResponse::Ok().json(status)
}

#[post("/contact")]
async fn contact(
    store: web::Data<dyn MessageStore>,
    payload: web::Json<ContactRequest>,
) -> Result<HttpResponse, StoreError> {
    let message = store.create(payload.into_inner()).await?;
    info!(message_id = message.id, "Contact message received.");
    Ok(HttpResponse::Ok().json(ContactReceipt::received()))
}

#[get("/messages")]
async fn messages(store: web::Data<dyn MessageStore>) -> Result<HttpResponse, StoreError> {
    let views: Vec<MessageView> = store
        .list_all()
        .await?
        .into_iter()
        .map(MessageView::from)
        .collect();
    Ok(HttpResponse::Ok().json(views))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SqliteMessageStore;
    use actix_web::{App, test};
    use serde_json::Value;
    use sqlx::SqlitePool;
    use sqlx::sqlite::SqlitePoolOptions;
    use std::sync::Arc;

    async fn memory_store() -> (SqlitePool, web::Data<dyn MessageStore>) {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to open in-memory database");
        let store = SqliteMessageStore::new(pool.clone());
        store.ensure_schema().await.expect("Failed to create schema");
        let store: Arc<dyn MessageStore> = Arc::new(store);
        (pool, web::Data::from(store))
    }

    fn contact_body(name: &str, email: &str, message: &str) -> Value {
        json!({ "name": name, "email": email, "message": message })
    }

    #[actix_web::test]
    async fn test_health_reports_operational() {
        let (_pool, store) = memory_store().await;
        let app = test::init_service(App::new().app_data(store).configure(configure)).await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "Operational");
        assert_eq!(body["db"], "Connected");
        assert_eq!(body["version"], "v27.2.0");
    }

    #[actix_web::test]
    async fn test_health_stays_200_when_store_is_gone() {
        let (pool, store) = memory_store().await;
        let app = test::init_service(App::new().app_data(store).configure(configure)).await;
        pool.close().await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "Degraded");
        assert_eq!(body["db"], "Disconnected");
    }

    #[actix_web::test]
    async fn test_contact_persists_one_message_per_request() {
        let (_pool, store) = memory_store().await;
        let app = test::init_service(App::new().app_data(store.clone()).configure(configure)).await;

        let cases = [
            contact_body("Ada", "ada@example.com", "Hello"),
            contact_body("", "", ""),
            contact_body("Grace", "not-an-email", "multi\nline <b>body</b>"),
        ];

        for (i, case) in cases.iter().enumerate() {
            let req = test::TestRequest::post().uri("/contact").set_json(case).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);

            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body, json!({ "status": "Received" }));
            assert_eq!(store.list_all().await.unwrap().len(), i + 1);
        }
    }

    #[actix_web::test]
    async fn test_messages_round_trip_newest_first() {
        let (_pool, store) = memory_store().await;
        let app = test::init_service(App::new().app_data(store).configure(configure)).await;

        let req = test::TestRequest::get().uri("/messages").to_request();
        let empty: Vec<MessageView> = test::call_and_read_body_json(&app, req).await;
        assert!(empty.is_empty());

        for i in 0..3 {
            let body = contact_body(&format!("sender {i}"), "s@example.com", &format!("body {i} ✓"));
            let req = test::TestRequest::post().uri("/contact").set_json(&body).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
        }

        let req = test::TestRequest::get().uri("/messages").to_request();
        let listed: Vec<MessageView> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(listed.len(), 3);
        assert_eq!(listed[0].name, "sender 2");
        assert_eq!(listed[0].message, "body 2 ✓");
        assert_eq!(listed[2].name, "sender 0");
        assert!(listed.iter().all(|m| m.id > 0 && !m.date.is_empty()));
        assert!(listed[0].id > listed[1].id);
    }

    #[actix_web::test]
    async fn test_missing_field_is_unprocessable() {
        let (_pool, store) = memory_store().await;
        let app = test::init_service(App::new().app_data(store.clone()).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/contact")
            .set_json(json!({ "name": "Ada", "email": "ada@example.com" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_store_failure_surfaces_as_500() {
        let (pool, store) = memory_store().await;
        let app = test::init_service(App::new().app_data(store).configure(configure)).await;
        pool.close().await;

        let req = test::TestRequest::post()
            .uri("/contact")
            .set_json(contact_body("Ada", "ada@example.com", "Hello"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let req = test::TestRequest::get().uri("/messages").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
