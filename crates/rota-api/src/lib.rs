//! rota-api: REST API for the pharmacy rota.
//!
//! Provides axum route handlers for the staff and schedule rows, plus
//! read-only endpoints over the availability engine and calendar views.
//!
//! # API Routes
//!
//! | Method | Path | Description |
//! |---|---|---|
//! | GET | `/api/staff` | List staff rows |
//! | POST | `/api/staff` | Insert a staff row with its profile |
//! | GET | `/api/staff/{id}` | Staff row with profile |
//! | GET | `/api/schedules` | List schedule rows |
//! | POST | `/api/schedules` | Insert a schedule row |
//! | GET | `/api/availability` | `?role&day&hour[&minute]` → `{available}` |
//! | GET | `/api/tasks` | `?day&hour` → task block or `null` |
//! | GET | `/api/tasks/{day}/slots` | Quarter-hour task spans |
//! | GET | `/api/calendar/{view}` | `?date=YYYY-MM-DD` → view model |
//! | POST | `/api/notify` | Notify confirmation receipt |
//! | GET | `/healthz` | Liveness |

pub mod handlers;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use rota_core::{Engine, RotaConfig};
use rota_state::StateStore;

/// Shared state for API handlers.
#[derive(Clone)]
pub struct ApiState {
    pub store: StateStore,
    pub engine: Arc<Engine>,
    pub config: Arc<RotaConfig>,
}

/// Build the complete API router.
pub fn build_router(store: StateStore, engine: Engine, config: RotaConfig) -> Router {
    let api_state = ApiState {
        store,
        engine: Arc::new(engine),
        config: Arc::new(config),
    };

    let api_routes = Router::new()
        .route("/staff", get(handlers::list_staff).post(handlers::create_staff))
        .route("/staff/{id}", get(handlers::get_staff))
        .route("/schedules", get(handlers::list_schedules).post(handlers::create_schedule))
        .route("/availability", get(handlers::availability))
        .route("/tasks", get(handlers::task))
        .route("/tasks/{day}/slots", get(handlers::task_slots))
        .route("/calendar/{view}", get(handlers::calendar))
        .route("/notify", post(handlers::notify))
        .with_state(api_state);

    Router::new()
        .nest("/api", api_routes)
        .route("/healthz", get(handlers::healthz))
}
