use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, patch, post},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/meal/:meal", post(handlers::log_meal_form))
        .route("/connection/toggle", post(handlers::toggle_connection))
        .route("/api/today", get(handlers::get_today))
        .route("/api/week", get(handlers::get_week))
        .route("/api/metrics", get(handlers::get_metrics))
        .route("/api/days/:date", patch(handlers::update_day))
        .route("/api/steps/tick", post(handlers::step_tick))
        .route("/api/meals", post(handlers::log_meal))
        .route("/api/vitals", get(handlers::get_vitals))
        .route("/api/vitals/heart-rate", post(handlers::record_heart_rate))
        .route("/api/connection", post(handlers::set_connection))
        .route("/api/history", get(handlers::get_history))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::random::ThreadRandom;
    use crate::storage::MemoryStorage;
    use crate::store::DailyDataStore;
    use crate::vitals::VitalsMonitor;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use chrono::NaiveDate;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn test_app(storage: MemoryStorage) -> Router {
        let today = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        router(AppState::new(
            DailyDataStore::new(storage, FixedClock(today), ThreadRandom),
            VitalsMonitor::new(ThreadRandom),
        ))
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, body.to_vec())
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn week_endpoint_returns_seven_days() {
        let app = test_app(MemoryStorage::new());
        let (status, body) = send(&app, get("/api/week")).await;

        assert_eq!(status, StatusCode::OK);
        let week: Vec<Value> = serde_json::from_slice(&body).unwrap();
        assert_eq!(week.len(), 7);
        assert_eq!(week[0]["date"], "2025-12-30");
        assert_eq!(week[6]["date"], "2026-01-05");
    }

    #[tokio::test]
    async fn patch_day_merges_and_persists() {
        let storage = MemoryStorage::new();
        let app = test_app(storage.clone());

        let (status, _) = send(
            &app,
            json_request("PATCH", "/api/days/2026-01-05", json!({ "steps": 9999 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = send(&app, get("/api/today")).await;
        let today: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(today["steps"], 9999);
        assert_eq!(storage.snapshot()["2026-01-05"].steps, 9999);
    }

    #[tokio::test]
    async fn patch_day_rejects_bad_date() {
        let app = test_app(MemoryStorage::new());
        let (status, _) = send(
            &app,
            json_request("PATCH", "/api/days/yesterday", json!({ "steps": 1 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn patch_day_rejects_out_of_range_values() {
        let storage = MemoryStorage::new();
        let app = test_app(storage.clone());

        let (status, body) = send(
            &app,
            json_request("PATCH", "/api/days/2026-01-05", json!({ "tiredness": 999 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(String::from_utf8(body).unwrap().contains("tiredness"));

        let nutrition = json!({
            "nutrition": {
                "protein": 85, "carbs": 80, "fats": 150,
                "fiber": 40, "vitaminC": 90, "iron": 500
            }
        });
        let (status, _) = send(&app, json_request("PATCH", "/api/days/2026-01-05", nutrition)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        assert!(storage.snapshot().is_empty());
    }

    #[tokio::test]
    async fn meal_endpoint_validates_and_clamps() {
        let app = test_app(MemoryStorage::new());

        let (status, body) = send(&app, json_request("POST", "/api/meals", json!({ "meal": "brunch" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(String::from_utf8(body).unwrap().contains("breakfast"));

        for _ in 0..5 {
            let (status, body) =
                send(&app, json_request("POST", "/api/meals", json!({ "meal": "dinner" }))).await;
            assert_eq!(status, StatusCode::OK);
            let record: Value = serde_json::from_slice(&body).unwrap();
            for field in ["protein", "carbs", "fats", "fiber", "vitaminC", "iron"] {
                assert!(record["nutrition"][field].as_u64().unwrap() <= 100);
            }
        }
    }

    #[tokio::test]
    async fn meal_form_redirects_home() {
        let app = test_app(MemoryStorage::new());
        let request = Request::post("/meal/breakfast").body(Body::empty()).unwrap();
        let (status, _) = send(&app, request).await;
        assert_eq!(status, StatusCode::SEE_OTHER);
    }

    #[tokio::test]
    async fn connection_toggle_changes_vitals() {
        let app = test_app(MemoryStorage::new());

        let (_, body) = send(&app, get("/api/vitals")).await;
        let vitals: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(vitals["connected"], false);
        assert_eq!(vitals["heart_rate"], 72);
        assert_eq!(vitals["alert"]["active"], false);

        let (_, body) = send(
            &app,
            json_request("POST", "/api/connection", json!({ "connected": true })),
        )
        .await;
        let vitals: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(vitals["connected"], true);
        assert_eq!(vitals["device"], "Chair #HC-204");
    }

    #[tokio::test]
    async fn manual_heart_rate_raises_alert() {
        let app = test_app(MemoryStorage::new());

        let (status, body) = send(
            &app,
            json_request("POST", "/api/vitals/heart-rate", json!({ "bpm": 120 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let vitals: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(vitals["heart_rate"], 120);
        assert_eq!(vitals["alert"]["active"], true);
    }

    #[tokio::test]
    async fn dashboard_renders_sections() {
        let app = test_app(MemoryStorage::new());
        let (status, body) = send(&app, get("/")).await;
        assert_eq!(status, StatusCode::OK);

        let html = String::from_utf8(body).unwrap();
        assert!(html.contains("Hospital Chair Monitor"));
        assert!(html.contains("Medical History"));
        assert!(html.contains("/meal/lunch"));
        assert!(!html.contains("{{"));
    }

    #[tokio::test]
    async fn history_lists_static_events() {
        let app = test_app(MemoryStorage::new());
        let (_, body) = send(&app, get("/api/history")).await;
        let history: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(history["patient"]["name"], "John Doe");
        assert_eq!(history["events"].as_array().unwrap().len(), 5);
    }
}
