//! REST API handlers.
//!
//! Row handlers read/write via `StateStore`; the rest are pure reads over
//! the loaded `Engine`. Successful responses are the bare JSON value;
//! failures are `{"error": "..."}`.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use rota_calendar::{CalendarView, NotifyRequest};
use rota_core::{
    AvailabilityQuery, DayOfWeek, Quarter, Role, StaffMember, StaffProfile, parse_hour, tasks,
};
use rota_state::*;

use crate::ApiState;

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

fn error_response(msg: &str, status: StatusCode) -> impl IntoResponse {
    (
        status,
        Json(ErrorBody {
            error: msg.to_string(),
        }),
    )
}

fn bad_request(e: impl std::fmt::Display) -> axum::response::Response {
    error_response(&e.to_string(), StatusCode::BAD_REQUEST).into_response()
}

fn internal(e: impl std::fmt::Display) -> axum::response::Response {
    error_response(&e.to_string(), StatusCode::INTERNAL_SERVER_ERROR).into_response()
}

/// Hour from a query string: an integer in 0..=23.
fn hour_param(raw: &str) -> Result<u8, String> {
    let hour: u8 = raw
        .trim()
        .parse()
        .map_err(|_| format!("invalid hour: {raw:?}"))?;
    parse_hour(hour).map_err(|e| e.to_string())
}

fn minute_param(raw: &str) -> Result<Quarter, String> {
    let minute: u8 = raw
        .trim()
        .parse()
        .map_err(|_| format!("invalid minute: {raw:?}"))?;
    Quarter::from_minutes(minute).map_err(|e| e.to_string())
}

// ── Health ─────────────────────────────────────────────────────

/// GET /healthz
pub async fn healthz() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ── Staff ──────────────────────────────────────────────────────

/// Staff row plus its contact profile.
#[derive(Debug, Serialize)]
pub struct StaffDetail {
    #[serde(flatten)]
    pub staff: StaffMember,
    pub profile: StaffProfile,
}

/// GET /api/staff
pub async fn list_staff(State(state): State<ApiState>) -> impl IntoResponse {
    match state.store.list_staff() {
        Ok(staff) => Json(staff).into_response(),
        Err(e) => internal(e),
    }
}

/// GET /api/staff/:id
pub async fn get_staff(State(state): State<ApiState>, Path(id): Path<u64>) -> impl IntoResponse {
    match state.store.get_staff(id) {
        Ok(Some(staff)) => match state.store.get_profile(id) {
            Ok(stored) => {
                // Rows written before profiles were stored fall back to the config.
                let profile = stored
                    .or_else(|| state.config.staff_for(staff.role).map(|s| s.profile.clone()))
                    .unwrap_or_default();
                Json(StaffDetail { staff, profile }).into_response()
            }
            Err(e) => internal(e),
        },
        Ok(None) => error_response("staff member not found", StatusCode::NOT_FOUND).into_response(),
        Err(e) => internal(e),
    }
}

fn blank_to_none(field: &mut Option<String>) {
    *field = field
        .take()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
}

/// Trim the add-staff form and reject what the dialog would not submit.
fn clean_new_staff(mut new: NewStaff) -> Result<NewStaff, String> {
    new.name = new.name.trim().to_string();
    if new.name.is_empty() {
        return Err("name must not be empty".to_string());
    }
    let profile = &mut new.profile;
    for field in [
        &mut profile.pronunciation,
        &mut profile.pronouns,
        &mut profile.phone,
        &mut profile.email,
    ] {
        blank_to_none(field);
    }
    if let Some(email) = &profile.email {
        if !email.contains('@') {
            return Err(format!("invalid email: {email:?}"));
        }
    }
    Ok(new)
}

/// POST /api/staff
pub async fn create_staff(
    State(state): State<ApiState>,
    Json(new): Json<NewStaff>,
) -> impl IntoResponse {
    let new = match clean_new_staff(new) {
        Ok(new) => new,
        Err(e) => return bad_request(e),
    };
    let profile = new.profile.clone();
    match state.store.insert_staff(new) {
        Ok(staff) => {
            info!(id = staff.id, role = %staff.role, name = %staff.name, "staff created");
            Json(StaffDetail { staff, profile }).into_response()
        }
        Err(e) => internal(e),
    }
}

// ── Schedules ──────────────────────────────────────────────────

/// GET /api/schedules
pub async fn list_schedules(State(state): State<ApiState>) -> impl IntoResponse {
    match state.store.list_schedules() {
        Ok(schedules) => Json(schedules).into_response(),
        Err(e) => internal(e),
    }
}

/// POST /api/schedules
pub async fn create_schedule(
    State(state): State<ApiState>,
    Json(new): Json<NewSchedule>,
) -> impl IntoResponse {
    match state.store.insert_schedule(new) {
        Ok(schedule) => {
            info!(id = schedule.id, staff_id = schedule.staff_id, day = %schedule.day_of_week, "schedule created");
            Json(schedule).into_response()
        }
        Err(e) => internal(e),
    }
}

// ── Availability ───────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AvailabilityParams {
    pub role: String,
    pub day: String,
    pub hour: String,
    pub minute: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AvailabilityAnswer {
    pub available: bool,
}

fn availability_query(params: &AvailabilityParams) -> Result<AvailabilityQuery, String> {
    Ok(AvailabilityQuery {
        role: params.role.parse::<Role>().map_err(|e| e.to_string())?,
        day: params.day.parse::<DayOfWeek>().map_err(|e| e.to_string())?,
        hour: hour_param(&params.hour)?,
        quarter: params.minute.as_deref().map(minute_param).transpose()?,
    })
}

/// GET /api/availability?role&day&hour[&minute]
pub async fn availability(
    State(state): State<ApiState>,
    Query(params): Query<AvailabilityParams>,
) -> impl IntoResponse {
    match availability_query(&params) {
        Ok(query) => Json(AvailabilityAnswer {
            available: rota_core::availability::resolve(&state.engine.table, &query),
        })
        .into_response(),
        Err(e) => bad_request(e),
    }
}

// ── Tasks ──────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TaskParams {
    pub day: String,
    pub hour: String,
}

/// GET /api/tasks?day&hour
pub async fn task(
    State(state): State<ApiState>,
    Query(params): Query<TaskParams>,
) -> impl IntoResponse {
    let day = match params.day.parse::<DayOfWeek>() {
        Ok(day) => day,
        Err(e) => return bad_request(e),
    };
    let hour = match hour_param(&params.hour) {
        Ok(hour) => hour,
        Err(e) => return bad_request(e),
    };
    let engine = &state.engine;
    Json(engine.task_for(engine.task_role, day, hour)).into_response()
}

/// GET /api/tasks/:day/slots
pub async fn task_slots(Path(day): Path<String>) -> impl IntoResponse {
    match day.parse::<DayOfWeek>() {
        Ok(day) => Json(tasks::task_spans(day)).into_response(),
        Err(e) => bad_request(e),
    }
}

// ── Calendar ───────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CalendarParams {
    pub date: Option<String>,
}

/// GET /api/calendar/:view?date=YYYY-MM-DD
///
/// Without a date the configured anchor date is used.
pub async fn calendar(
    State(state): State<ApiState>,
    Path(view): Path<String>,
    Query(params): Query<CalendarParams>,
) -> impl IntoResponse {
    let view = match view.parse::<CalendarView>() {
        Ok(view) => view,
        Err(e) => return bad_request(e),
    };
    let date = match params.date.as_deref() {
        Some(raw) => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(date) => date,
            Err(e) => return bad_request(format!("invalid date {raw:?}: {e}")),
        },
        None => state.config.server.anchor_date,
    };
    let roster = match state.store.list_staff() {
        Ok(roster) => roster,
        Err(e) => return internal(e),
    };
    Json(rota_calendar::build(view, &state.engine, &roster, date)).into_response()
}

// ── Notify ─────────────────────────────────────────────────────

/// POST /api/notify
pub async fn notify(
    State(state): State<ApiState>,
    Json(req): Json<NotifyRequest>,
) -> impl IntoResponse {
    let roster = match state.store.list_staff() {
        Ok(roster) => roster,
        Err(e) => return internal(e),
    };
    let receipt = rota_calendar::notify::confirm(&req, &roster);
    info!(method = receipt.method.as_str(), summary = %receipt.summary, "notify confirmed");
    Json(receipt).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::to_bytes;
    use chrono::{TimeZone, Utc};
    use rota_core::{Engine, NotifyMethod, Recurrence, RotaConfig};

    fn test_state() -> ApiState {
        let config = RotaConfig::default();
        let store = StateStore::open_in_memory().unwrap();
        let roster: Vec<NewStaff> = config.staff.iter().map(NewStaff::from).collect();
        store.seed_staff(&roster).unwrap();
        ApiState {
            store,
            engine: Arc::new(Engine::from_config(&config).unwrap()),
            config: Arc::new(config),
        }
    }

    async fn body_json(resp: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn avail(role: &str, day: &str, hour: &str) -> AvailabilityParams {
        AvailabilityParams {
            role: role.to_string(),
            day: day.to_string(),
            hour: hour.to_string(),
            minute: None,
        }
    }

    fn new_schedule(staff_id: u64) -> NewSchedule {
        NewSchedule {
            staff_id,
            start_time: Utc.with_ymd_and_hms(2024, 12, 9, 14, 0, 0).unwrap(),
            end_time: Utc.with_ymd_and_hms(2024, 12, 9, 16, 0, 0).unwrap(),
            day_of_week: "Monday".to_string(),
            recurrence: Recurrence::None,
        }
    }

    fn new_staff(name: &str) -> NewStaff {
        NewStaff {
            name: name.to_string(),
            role: Role::Technician,
            color: "bg-purple-100".to_string(),
            profile: StaffProfile::default(),
        }
    }

    // ── Staff ──────────────────────────────────────────────────

    #[tokio::test]
    async fn list_staff_returns_seeded_roster() {
        let resp = list_staff(State(test_state())).await.into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json.as_array().unwrap().len(), 5);
        assert_eq!(json[0]["id"], 1);
        assert_eq!(json[0]["role"], "Pharmacist1");
        assert_eq!(json[0]["color"], "bg-blue-100");
    }

    #[tokio::test]
    async fn get_staff_includes_profile() {
        let resp = get_staff(State(test_state()), Path(1)).await.into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["name"], "Pharmacist 1");
        assert_eq!(json["profile"]["phone"], "905-867-5309");
    }

    #[tokio::test]
    async fn create_staff_stores_profile() {
        let state = test_state();
        let mut new = new_staff("  Riley  ");
        new.profile.pronunciation = Some("RY-lee".to_string());
        new.profile.pronouns = Some("they/them".to_string());
        new.profile.phone = Some("".to_string());
        new.profile.email = Some("riley@example.com".to_string());

        let resp = create_staff(State(state.clone()), Json(new)).await.into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        let created = body_json(resp).await;
        assert_eq!(created["id"], 6);
        assert_eq!(created["name"], "Riley");
        assert_eq!(created["role"], "Technician");
        assert_eq!(created["profile"]["pronouns"], "they/them");
        assert!(created["profile"].get("phone").is_none());

        let resp = get_staff(State(state.clone()), Path(6)).await.into_response();
        let json = body_json(resp).await;
        assert_eq!(json["profile"]["email"], "riley@example.com");
        assert_eq!(json["profile"]["pronunciation"], "RY-lee");

        let resp = list_staff(State(state)).await.into_response();
        assert_eq!(body_json(resp).await.as_array().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn create_staff_rejects_bad_form() {
        let state = test_state();
        let resp = create_staff(State(state.clone()), Json(new_staff("   ")))
            .await
            .into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let mut new = new_staff("Riley");
        new.profile.email = Some("riley.example.com".to_string());
        let resp = create_staff(State(state.clone()), Json(new)).await.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(resp).await["error"].as_str().unwrap().contains("email"));

        let resp = list_staff(State(state)).await.into_response();
        assert_eq!(body_json(resp).await.as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn get_nonexistent_staff() {
        let resp = get_staff(State(test_state()), Path(99)).await.into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    // ── Schedules ──────────────────────────────────────────────

    #[tokio::test]
    async fn create_then_list_schedules() {
        let state = test_state();
        let resp = create_schedule(State(state.clone()), Json(new_schedule(3)))
            .await
            .into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        let created = body_json(resp).await;
        assert_eq!(created["id"], 1);
        assert_eq!(created["staffId"], 3);
        assert_eq!(created["recurrence"], "none");

        let resp = list_schedules(State(state)).await.into_response();
        let json = body_json(resp).await;
        assert_eq!(json.as_array().unwrap().len(), 1);
        assert_eq!(json[0]["dayOfWeek"], "Monday");
    }

    #[tokio::test]
    async fn create_schedule_for_unknown_staff_fails() {
        let resp = create_schedule(State(test_state()), Json(new_schedule(42)))
            .await
            .into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(resp).await;
        assert!(json["error"].as_str().unwrap().contains("42"));
    }

    // ── Availability ───────────────────────────────────────────

    #[tokio::test]
    async fn availability_answers() {
        let state = test_state();
        let cases = [
            ("Pharmacist1", "Monday", "9", true),
            ("Pharmacist1", "Monday", "10", false),
            ("Pharmacist2", "Monday", "4", false),
            ("Technician", "Sunday", "12", false),
            ("Assistant1", "Sunday", "12", true),
        ];
        for (role, day, hour, expected) in cases {
            let resp = availability(State(state.clone()), Query(avail(role, day, hour)))
                .await
                .into_response();
            assert_eq!(resp.status(), StatusCode::OK);
            let json = body_json(resp).await;
            assert_eq!(json["available"], expected, "{role} {day} {hour}");
        }
    }

    #[tokio::test]
    async fn availability_accepts_quarter_minute() {
        let mut params = avail("Pharmacist1", "Saturday", "12");
        params.minute = Some("45".to_string());
        let resp = availability(State(test_state()), Query(params)).await.into_response();
        assert_eq!(body_json(resp).await["available"], true);
    }

    #[tokio::test]
    async fn availability_rejects_bad_input() {
        let state = test_state();
        for params in [
            avail("Manager", "Monday", "9"),
            avail("Pharmacist1", "Funday", "9"),
            avail("Pharmacist1", "Monday", "24"),
            avail("Pharmacist1", "Monday", "nine"),
        ] {
            let resp = availability(State(state.clone()), Query(params))
                .await
                .into_response();
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
            assert!(body_json(resp).await["error"].is_string());
        }

        let mut params = avail("Pharmacist1", "Monday", "9");
        params.minute = Some("20".to_string());
        let resp = availability(State(state), Query(params)).await.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    // ── Tasks ──────────────────────────────────────────────────

    #[tokio::test]
    async fn task_for_hour() {
        let params = TaskParams {
            day: "Monday".to_string(),
            hour: "11".to_string(),
        };
        let resp = task(State(test_state()), Query(params)).await.into_response();
        let json = body_json(resp).await;
        assert_eq!(json["task"], "Flu Shot");
        assert_eq!(json["time"], "11:00am to 1:00pm");
    }

    #[tokio::test]
    async fn task_gap_is_null() {
        let params = TaskParams {
            day: "Monday".to_string(),
            hour: "13".to_string(),
        };
        let resp = task(State(test_state()), Query(params)).await.into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(body_json(resp).await.is_null());
    }

    #[tokio::test]
    async fn task_slots_for_saturday() {
        let resp = task_slots(Path("Saturday".to_string())).await.into_response();
        let json = body_json(resp).await;
        assert_eq!(json.as_array().unwrap().len(), 1);
        assert_eq!(json[0]["time"], "9:00am-5:00pm");

        let resp = task_slots(Path("Someday".to_string())).await.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    // ── Calendar ───────────────────────────────────────────────

    #[tokio::test]
    async fn calendar_defaults_to_anchor_date() {
        let resp = calendar(
            State(test_state()),
            Path("month".to_string()),
            Query(CalendarParams { date: None }),
        )
        .await
        .into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["view"], "month");
        assert_eq!(json["title"], "December 2024");
    }

    #[tokio::test]
    async fn calendar_rejects_bad_view_and_date() {
        let state = test_state();
        let resp = calendar(
            State(state.clone()),
            Path("year".to_string()),
            Query(CalendarParams { date: None }),
        )
        .await
        .into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = calendar(
            State(state),
            Path("week".to_string()),
            Query(CalendarParams {
                date: Some("12/09/2024".to_string()),
            }),
        )
        .await
        .into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    // ── Notify ─────────────────────────────────────────────────

    #[tokio::test]
    async fn notify_everyone() {
        let req = NotifyRequest {
            method: NotifyMethod::Email,
            staff: Role::ALL.to_vec(),
        };
        let resp = notify(State(test_state()), Json(req)).await.into_response();
        let json = body_json(resp).await;
        assert_eq!(json["summary"], "Everyone");
        assert_eq!(json["delivered"], false);
    }

    #[tokio::test]
    async fn healthz_ok() {
        let resp = healthz().await.into_response();
        assert_eq!(body_json(resp).await["status"], "ok");
    }
}
