use crate::clock::parse_date_key;
use crate::errors::AppError;
use crate::history::medical_history;
use crate::models::{
    ConnectionRequest, DailyRecord, HeartRateRequest, HistoryResponse, MealRequest, MealType,
    MetricsResponse, RecordPatch, VitalsResponse,
};
use crate::state::AppState;
use crate::stats::build_metrics;
use crate::ui::{render_index, DashboardView};
use crate::vitals::is_emergency;
use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Json,
};
use tracing::{error, info, warn};

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let (today, week) = state
        .with_store(|store| (store.today(), store.week()))
        .await?;
    let vitals = state.vitals.lock().await.snapshot();
    let metrics = build_metrics(&today, &week);

    Ok(Html(render_index(&DashboardView {
        metrics: &metrics,
        vitals: &vitals,
        history: &medical_history(),
    })))
}

pub async fn get_today(State(state): State<AppState>) -> Result<Json<DailyRecord>, AppError> {
    let today = state.with_store(|store| store.today()).await?;
    Ok(Json(today))
}

pub async fn get_week(State(state): State<AppState>) -> Result<Json<Vec<DailyRecord>>, AppError> {
    let week = state.with_store(|store| store.week()).await?;
    Ok(Json(week))
}

pub async fn get_metrics(State(state): State<AppState>) -> Result<Json<MetricsResponse>, AppError> {
    let (today, week) = state
        .with_store(|store| (store.today(), store.week()))
        .await?;
    Ok(Json(build_metrics(&today, &week)))
}

pub async fn update_day(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(patch): Json<RecordPatch>,
) -> Result<Json<DailyRecord>, AppError> {
    let date = parse_date_key(date.trim())
        .ok_or_else(|| AppError::bad_request("date must be formatted as YYYY-MM-DD"))?;
    patch.validate()?;

    let record = state
        .with_store(move |store| store.update_record(date, patch))
        .await?
        .inspect_err(log_write_failure)?;
    info!(date = %record.date, "daily record updated");
    Ok(Json(record))
}

pub async fn step_tick(State(state): State<AppState>) -> Result<Json<DailyRecord>, AppError> {
    let record = state
        .with_store(|store| store.simulate_step_increment())
        .await?
        .inspect_err(log_write_failure)?;
    Ok(Json(record))
}

pub async fn log_meal(
    State(state): State<AppState>,
    Json(payload): Json<MealRequest>,
) -> Result<Json<DailyRecord>, AppError> {
    let meal = payload
        .meal
        .parse::<MealType>()
        .map_err(AppError::bad_request)?;

    let record = apply_meal(&state, meal).await?;
    Ok(Json(record))
}

pub async fn log_meal_form(
    State(state): State<AppState>,
    Path(meal): Path<String>,
) -> Result<Redirect, AppError> {
    let meal = meal.parse::<MealType>().map_err(AppError::bad_request)?;
    apply_meal(&state, meal).await?;
    Ok(Redirect::to("/"))
}

async fn apply_meal(state: &AppState, meal: MealType) -> Result<DailyRecord, AppError> {
    let record = state
        .with_store(move |store| store.simulate_nutrition_boost(meal))
        .await?
        .inspect_err(log_write_failure)?;
    info!(%meal, "meal logged");
    Ok(record)
}

pub async fn get_vitals(State(state): State<AppState>) -> Json<VitalsResponse> {
    Json(state.vitals.lock().await.snapshot())
}

pub async fn set_connection(
    State(state): State<AppState>,
    Json(payload): Json<ConnectionRequest>,
) -> Json<VitalsResponse> {
    let mut vitals = state.vitals.lock().await;
    vitals.set_connected(payload.connected);
    log_connection(payload.connected);
    Json(vitals.snapshot())
}

/// Feeds a reading in by hand, e.g. to exercise the emergency alert.
pub async fn record_heart_rate(
    State(state): State<AppState>,
    Json(payload): Json<HeartRateRequest>,
) -> Json<VitalsResponse> {
    let mut vitals = state.vitals.lock().await;
    vitals.record_heart_rate(payload.bpm);
    if is_emergency(payload.bpm) {
        warn!(bpm = payload.bpm, "emergency heart rate reading");
    }
    Json(vitals.snapshot())
}

pub async fn toggle_connection(State(state): State<AppState>) -> Redirect {
    let connected = state.vitals.lock().await.toggle();
    log_connection(connected);
    Redirect::to("/")
}

pub async fn get_history() -> Json<HistoryResponse> {
    Json(medical_history())
}

fn log_connection(connected: bool) {
    if connected {
        info!("connected to hospital chair");
    } else {
        info!("disconnected from hospital chair");
    }
}

fn log_write_failure(err: &AppError) {
    error!("failed to write daily data: {err}");
}
