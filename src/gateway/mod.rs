//! User-facing tier: renders pages and proxies the contact form to the engine.
//!
//! Every engine call is best-effort. A failed call is logged and replaced by
//! a fallback view model, so pages render even when the engine is down. Only
//! a template failure turns into an error response.

mod upstream;
mod views;

pub use upstream::{EngineClient, UpstreamError};
pub use views::{AdminPage, BACKEND_UNAVAILABLE, IndexPage, PLACEHOLDER_VIEWER_COUNT, Views};

use actix_web::error::{InternalError, UrlencodedError};
use actix_web::http::header::ContentType;
use actix_web::{HttpRequest, HttpResponse, ResponseError, get, post, web};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::models::{ContactRequest, SystemStatus};

/// Shared per-process context handed to every gateway handler.
pub struct GatewayState {
    pub engine: EngineClient,
    pub views: Views,
}

impl GatewayState {
    pub fn new(engine: EngineClient, views: Views) -> Self {
        GatewayState { engine, views }
    }
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("failed to render page: {0}")]
    Render(#[from] minijinja::Error),
}

impl ResponseError for GatewayError {
    fn error_response(&self) -> HttpResponse {
        error!(error = %self, "Gateway internal error");
        HttpResponse::InternalServerError()
            .content_type(ContentType::plaintext())
            .body("internal server error")
    }
}

/// Registers the gateway routes and its form extractor settings.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::FormConfig::default().error_handler(form_rejection))
        .service(index)
        .service(contact)
        .service(admin);
}

fn form_rejection(err: UrlencodedError, _req: &HttpRequest) -> actix_web::Error {
    warn!(error = %err, "Rejected contact form");
    let response = HttpResponse::UnprocessableEntity()
        .content_type(ContentType::plaintext())
        .body(err.to_string());
    InternalError::from_response(err, response).into()
}

fn log_fallback(call: &'static str, err: &UpstreamError) {
    if err.is_expected() {
        warn!(call, error = %err, "Engine unavailable, rendering fallback view.");
    } else {
        error!(call, error = %err, "Unexpected engine failure, rendering fallback view.");
    }
}

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok().content_type(ContentType::html()).body(body)
}

#[get("/")]
async fn index(state: web::Data<GatewayState>) -> Result<HttpResponse, GatewayError> {
    let system = match state.engine.health().await {
        Ok(status) => status,
        Err(err) => {
            log_fallback("health", &err);
            SystemStatus::offline()
        }
    };

    Ok(html(state.views.index(&IndexPage::with_status(system))?))
}

#[post("/contact")]
async fn contact(
    state: web::Data<GatewayState>,
    form: web::Form<ContactRequest>,
) -> Result<HttpResponse, GatewayError> {
    let page = match state.engine.submit_contact(&form).await {
        Ok(()) => {
            info!("Contact form forwarded to engine.");
            IndexPage::submitted()
        }
        Err(err) => {
            log_fallback("contact", &err);
            IndexPage::backend_unavailable()
        }
    };

    Ok(html(state.views.index(&page)?))
}

// Unauthenticated: anyone reaching the gateway can read every submission.
#[get("/admin")]
async fn admin(state: web::Data<GatewayState>) -> Result<HttpResponse, GatewayError> {
    let messages = match state.engine.messages().await {
        Ok(messages) => messages,
        Err(err) => {
            log_fallback("messages", &err);
            Vec::new()
        }
    };

    Ok(html(state.views.admin(&AdminPage::new(messages))?))
}
