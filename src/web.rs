use actix_web::{middleware, web, App, HttpResponse, HttpServer, Result};
use serde::Deserialize;
use std::sync::Mutex;
use tracing::{info, warn};

use crate::config::ScheduleRequest;
use crate::error::ScheduleError;
use crate::export::roster_csv_string;
use crate::schedule::{generate, ScheduleOutcome};

/// The most recently generated schedule; every POST replaces it.
pub struct AppState {
    pub latest: Mutex<Option<ScheduleOutcome>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            latest: Mutex::new(None),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Deserialize)]
pub struct GenerateQuery {
    /// Skip input clamping and reject out-of-range values instead.
    #[serde(default)]
    strict: bool,
}

fn lock_error() -> actix_web::Error {
    actix_web::error::ErrorInternalServerError("Schedule state is unavailable")
}

// Generate endpoint
async fn generate_schedule(
    req: web::Json<ScheduleRequest>,
    query: web::Query<GenerateQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let request = if query.strict {
        req.into_inner()
    } else {
        req.clamped()
    };

    match generate(&request) {
        Ok(outcome) => {
            let response = HttpResponse::Ok().json(&outcome);
            *state.latest.lock().map_err(|_| lock_error())? = Some(outcome);
            Ok(response)
        }
        Err(e @ (ScheduleError::Validation(_) | ScheduleError::Infeasible { .. })) => {
            warn!(error = %e, "Rejected schedule request");
            Ok(HttpResponse::BadRequest().json(serde_json::json!({
                "success": false,
                "error": e.to_string()
            })))
        }
        Err(e) => Err(actix_web::error::ErrorInternalServerError(e.to_string())),
    }
}

// Latest schedule endpoint
async fn get_schedule(state: web::Data<AppState>) -> Result<HttpResponse> {
    let latest = state.latest.lock().map_err(|_| lock_error())?;

    if let Some(ref outcome) = *latest {
        Ok(HttpResponse::Ok().json(outcome))
    } else {
        Ok(HttpResponse::NotFound().json(serde_json::json!({"error": "No schedule generated yet"})))
    }
}

async fn get_tally(state: web::Data<AppState>) -> Result<HttpResponse> {
    let latest = state.latest.lock().map_err(|_| lock_error())?;

    if let Some(ref outcome) = *latest {
        Ok(HttpResponse::Ok().json(&outcome.tally))
    } else {
        Ok(HttpResponse::NotFound().json(serde_json::json!({"error": "No schedule generated yet"})))
    }
}

async fn get_schedule_csv(state: web::Data<AppState>) -> Result<HttpResponse> {
    let latest = state.latest.lock().map_err(|_| lock_error())?;

    if let Some(ref outcome) = *latest {
        let body = roster_csv_string(outcome)
            .map_err(|e| actix_web::error::ErrorInternalServerError(e.to_string()))?;
        Ok(HttpResponse::Ok().content_type("text/csv").body(body))
    } else {
        Ok(HttpResponse::NotFound().json(serde_json::json!({"error": "No schedule generated yet"})))
    }
}

async fn health() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({"status": "ok"})))
}

/// Registers the API routes; shared by the server and the tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/health", web::get().to(health))
        .service(
            web::resource("/api/schedule")
                .route(web::post().to(generate_schedule))
                .route(web::get().to(get_schedule)),
        )
        .route("/api/schedule/tally", web::get().to(get_tally))
        .route("/api/schedule/csv", web::get().to(get_schedule_csv));
}

pub async fn start_server(port: u16) -> std::io::Result<()> {
    let app_state = web::Data::new(AppState::new());

    info!(port, "Starting web server");

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
