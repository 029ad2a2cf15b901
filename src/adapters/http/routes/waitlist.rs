use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::{
    adapters::http::app_state::AppState,
    app_error::{AppError, AppResult, FieldError},
    application::validators::validate_waitlist_form,
    domain::entities::waitlist_entry::WaitlistEntry,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/waitlist", get(list_entries).post(join_waitlist))
        .route("/waitlist/stats", get(get_stats))
}

/// Missing fields deserialize as empty strings so they are reported by the
/// form validation alongside every other failing field.
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct JoinWaitlistPayload {
    email: String,
    clinic_name: String,
    clinic_size: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EntrySummary {
    id: Uuid,
    email: String,
    clinic_name: String,
}

#[derive(Serialize)]
struct JoinWaitlistResponse {
    message: &'static str,
    entry: EntrySummary,
}

#[derive(Serialize)]
struct StatsResponse {
    count: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EntryView {
    id: Uuid,
    email: String,
    clinic_name: String,
    clinic_size: String,
    created_at: DateTime<Utc>,
}

impl From<WaitlistEntry> for EntryView {
    fn from(entry: WaitlistEntry) -> Self {
        Self {
            id: entry.id,
            email: entry.email,
            clinic_name: entry.clinic_name,
            clinic_size: entry.clinic_size,
            created_at: entry.created_at,
        }
    }
}

#[derive(Serialize)]
struct ListResponse {
    entries: Vec<EntryView>,
}

/// POST /api/waitlist
async fn join_waitlist(
    State(app_state): State<AppState>,
    payload: Result<Json<JoinWaitlistPayload>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(payload) = payload
        .map_err(|rejection| AppError::Validation(vec![FieldError::body(rejection.body_text())]))?;

    let candidate =
        validate_waitlist_form(&payload.email, &payload.clinic_name, &payload.clinic_size)?;

    let entry = app_state.waitlist_use_cases.register(candidate).await?;

    info!(entry_id = %entry.id, "Waitlist entry created");

    Ok((
        StatusCode::CREATED,
        Json(JoinWaitlistResponse {
            message: "Successfully joined the waitlist!",
            entry: EntrySummary {
                id: entry.id,
                email: entry.email,
                clinic_name: entry.clinic_name,
            },
        }),
    ))
}

/// GET /api/waitlist/stats
async fn get_stats(State(app_state): State<AppState>) -> AppResult<impl IntoResponse> {
    let count = app_state.waitlist_use_cases.count().await?;
    Ok(Json(StatsResponse { count }))
}

/// GET /api/waitlist
/// Lists every entry, newest first. 404 unless listing is enabled in config.
async fn list_entries(State(app_state): State<AppState>) -> AppResult<impl IntoResponse> {
    if !app_state.config.listing_enabled {
        return Err(AppError::NotFound);
    }

    let entries = app_state.waitlist_use_cases.list_entries().await?;
    Ok(Json(ListResponse {
        entries: entries.into_iter().map(EntryView::from).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_test::TestServer;
    use serde_json::{Value, json};

    use crate::test_utils::{FailingWaitlistRepo, TestAppStateBuilder, create_test_entry};

    fn build_test_router(app_state: AppState) -> Router<()> {
        router().with_state(app_state)
    }

    fn server(app_state: AppState) -> TestServer {
        TestServer::new(build_test_router(app_state)).unwrap()
    }

    // =========================================================================
    // POST /waitlist
    // =========================================================================

    #[tokio::test]
    async fn join_waitlist_success_returns_201_with_entry() {
        let server = server(TestAppStateBuilder::new().build());

        let response = server
            .post("/waitlist")
            .json(&json!({
                "email": "a@x.com",
                "clinicName": "Clinic A",
                "clinicSize": "1-5"
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["message"], "Successfully joined the waitlist!");
        assert_eq!(body["entry"]["email"], "a@x.com");
        assert_eq!(body["entry"]["clinicName"], "Clinic A");
        assert!(Uuid::parse_str(body["entry"]["id"].as_str().unwrap()).is_ok());
        assert!(body["entry"].get("clinicSize").is_none());
    }

    #[tokio::test]
    async fn join_waitlist_duplicate_email_returns_400_and_keeps_count() {
        let server = server(TestAppStateBuilder::new().build());

        server
            .post("/waitlist")
            .json(&json!({ "email": "a@x.com", "clinicName": "Clinic A", "clinicSize": "1-5" }))
            .await
            .assert_status(StatusCode::CREATED);

        let response = server
            .post("/waitlist")
            .json(&json!({ "email": "a@x.com", "clinicName": "Clinic B", "clinicSize": "20+" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["message"], "This email is already on our waitlist!");

        let stats: Value = server.get("/waitlist/stats").await.json();
        assert_eq!(stats["count"], 1);
    }

    #[tokio::test]
    async fn join_waitlist_seeded_email_is_duplicate() {
        let app_state = TestAppStateBuilder::new()
            .with_entry(create_test_entry(|e| e.email = "seeded@x.com".into()))
            .build();
        let server = server(app_state);

        let response = server
            .post("/waitlist")
            .json(&json!({ "email": "seeded@x.com", "clinicName": "Clinic", "clinicSize": "6-20" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn join_waitlist_invalid_email_returns_400_with_errors() {
        let server = server(TestAppStateBuilder::new().build());

        let response = server
            .post("/waitlist")
            .json(&json!({ "email": "not-an-email", "clinicName": "Clinic", "clinicSize": "1-5" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["message"], "Invalid form data");
        assert_eq!(body["errors"][0]["path"], json!(["email"]));
    }

    #[tokio::test]
    async fn join_waitlist_missing_fields_are_all_reported() {
        let server = server(TestAppStateBuilder::new().build());

        let response = server.post("/waitlist").json(&json!({})).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["errors"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn join_waitlist_wrong_types_return_400() {
        let server = server(TestAppStateBuilder::new().build());

        let response = server
            .post("/waitlist")
            .json(&json!({ "email": 42, "clinicName": "Clinic", "clinicSize": "1-5" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["message"], "Invalid form data");
        assert_eq!(body["errors"][0]["path"], json!([]));
    }

    #[tokio::test]
    async fn join_waitlist_non_json_body_returns_400() {
        let server = server(TestAppStateBuilder::new().build());

        let response = server.post("/waitlist").text("email=a@x.com").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["message"], "Invalid form data");
    }

    #[tokio::test]
    async fn join_waitlist_storage_fault_returns_500() {
        let app_state = TestAppStateBuilder::new()
            .with_waitlist_repo(std::sync::Arc::new(FailingWaitlistRepo))
            .build();
        let server = server(app_state);

        let response = server
            .post("/waitlist")
            .json(&json!({ "email": "a@x.com", "clinicName": "Clinic", "clinicSize": "1-5" }))
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert_eq!(body["message"], "Internal server error");
    }

    // =========================================================================
    // GET /waitlist/stats
    // =========================================================================

    #[tokio::test]
    async fn stats_on_empty_store_is_zero() {
        let server = server(TestAppStateBuilder::new().build());

        let response = server.get("/waitlist/stats").await;

        response.assert_status_ok();
        response.assert_json(&json!({ "count": 0 }));
    }

    #[tokio::test]
    async fn stats_counts_three_distinct_signups() {
        let server = server(TestAppStateBuilder::new().build());

        for email in ["a@x.com", "b@x.com", "c@x.com"] {
            server
                .post("/waitlist")
                .json(&json!({ "email": email, "clinicName": "Clinic", "clinicSize": "1-5" }))
                .await
                .assert_status(StatusCode::CREATED);
        }

        server
            .get("/waitlist/stats")
            .await
            .assert_json(&json!({ "count": 3 }));
    }

    #[tokio::test]
    async fn stats_storage_fault_returns_500() {
        let app_state = TestAppStateBuilder::new()
            .with_waitlist_repo(std::sync::Arc::new(FailingWaitlistRepo))
            .build();

        let response = server(app_state).get("/waitlist/stats").await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    }

    // =========================================================================
    // GET /waitlist
    // =========================================================================

    #[tokio::test]
    async fn list_is_hidden_by_default() {
        let server = server(TestAppStateBuilder::new().build());

        server
            .get("/waitlist")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn list_returns_entries_newest_first_when_enabled() {
        let older = create_test_entry(|e| {
            e.email = "old@x.com".into();
            e.created_at -= chrono::Duration::hours(1);
        });
        let newer = create_test_entry(|e| e.email = "new@x.com".into());
        let app_state = TestAppStateBuilder::new()
            .with_listing_enabled()
            .with_entry(older)
            .with_entry(newer)
            .build();

        let response = server(app_state).get("/waitlist").await;

        response.assert_status_ok();
        let body: Value = response.json();
        let entries = body["entries"].as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["email"], "new@x.com");
        assert_eq!(entries[1]["email"], "old@x.com");
        assert!(entries[0]["clinicSize"].is_string());
        assert!(entries[0]["createdAt"].is_string());
    }
}
