use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use dynasty_core::SeasonPatch;
use dynasty_server_app::{ServiceError, workflow::season::SeasonTransitionView};
use serde::{Deserialize, Serialize};

use crate::{
    AppState,
    auth::Auth,
    error::{ApiError, ApiJson},
    http::{
        coach::{JsonCoach, coach_id},
        dynasty::{JsonDynasty, dynasty_id},
    },
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonCoachFailure {
    coach_id: String,
    error: String,
}

#[derive(Serialize)]
pub struct JsonTransition {
    dynasty: JsonDynasty,
    coaches: Vec<JsonCoach>,
    failures: Vec<JsonCoachFailure>,
}

/// 207 when at least one coach could not be moved.
fn transition_response(view: SeasonTransitionView) -> (StatusCode, Json<JsonTransition>) {
    let status = if view.failures.is_empty() {
        StatusCode::OK
    } else {
        StatusCode::MULTI_STATUS
    };
    let body = JsonTransition {
        dynasty: view.dynasty.into(),
        coaches: view.coaches.into_iter().map(JsonCoach::from).collect(),
        failures: view
            .failures
            .into_iter()
            .map(|f| JsonCoachFailure {
                coach_id: f.coach_id.to_string(),
                error: f.message,
            })
            .collect(),
    };
    (status, Json(body))
}

pub async fn advance(
    Auth(account): Auth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<JsonTransition>), ApiError> {
    let view = state
        .app
        .season_advance_use_case
        .advance_season(account.account_id, dynasty_id(&id)?)
        .await?;
    Ok(transition_response(view))
}

pub async fn rollback(
    Auth(account): Auth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<JsonTransition>), ApiError> {
    let view = state
        .app
        .season_rollback_use_case
        .rollback_season(account.account_id, dynasty_id(&id)?)
        .await?;
    Ok(transition_response(view))
}

fn invalid(field: &str, message: &str) -> ApiError {
    ApiError(ServiceError::InvalidInput {
        field: Some(field.to_string()),
        message: message.to_string(),
    })
}

fn season_year(raw: &str) -> Result<i32, ApiError> {
    raw.trim()
        .parse()
        .map_err(|_| invalid("year", "must be an integer year"))
}

/// Counts arrive as raw JSON so a fractional or textual value is reported
/// against its own field. Null counts as absent.
fn integer_field(
    field: &str,
    value: Option<serde_json::Value>,
) -> Result<Option<i64>, ApiError> {
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(value) => value
            .as_i64()
            .map(Some)
            .ok_or_else(|| invalid(field, "must be an integer")),
    }
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSeasonRequest {
    wins: Option<serde_json::Value>,
    losses: Option<serde_json::Value>,
    college: Option<String>,
    position: Option<String>,
    conf_champ: Option<bool>,
    post_season: Option<String>,
    bowl_game: Option<String>,
    bowl_opponent: Option<String>,
    bowl_result: Option<bool>,
    playoff_seed: Option<serde_json::Value>,
    playoff_result: Option<String>,
}

impl TryFrom<UpdateSeasonRequest> for SeasonPatch {
    type Error = ApiError;

    fn try_from(req: UpdateSeasonRequest) -> Result<Self, Self::Error> {
        Ok(SeasonPatch {
            wins: integer_field("wins", req.wins)?,
            losses: integer_field("losses", req.losses)?,
            college: req.college,
            position: req.position.as_deref().map(str::parse).transpose()?,
            conf_champ: req.conf_champ,
            post_season: req.post_season.as_deref().map(str::parse).transpose()?,
            bowl_game: req.bowl_game,
            bowl_opponent: req.bowl_opponent,
            bowl_result: req.bowl_result,
            playoff_seed: integer_field("playoffSeed", req.playoff_seed)?,
            playoff_result: req.playoff_result.as_deref().map(str::parse).transpose()?,
        })
    }
}

pub async fn update(
    Auth(account): Auth,
    State(state): State<AppState>,
    Path((id, coach, year)): Path<(String, String, String)>,
    ApiJson(req): ApiJson<UpdateSeasonRequest>,
) -> Result<Json<JsonCoach>, ApiError> {
    let year = season_year(&year)?;
    let patch = SeasonPatch::try_from(req)?;
    let coach = state
        .app
        .season_update_use_case
        .update_season(
            account.account_id,
            dynasty_id(&id)?,
            coach_id(&coach)?,
            year,
            patch,
        )
        .await?;
    Ok(Json(coach.into()))
}

pub async fn toggle_edit(
    Auth(account): Auth,
    State(state): State<AppState>,
    Path((id, coach, year)): Path<(String, String, String)>,
) -> Result<Json<JsonCoach>, ApiError> {
    let year = season_year(&year)?;
    let coach = state
        .app
        .season_toggle_edit_use_case
        .toggle_season_edit(account.account_id, dynasty_id(&id)?, coach_id(&coach)?, year)
        .await?;
    Ok(Json(coach.into()))
}

#[cfg(test)]
mod tests {
    use axum::response::IntoResponse;
    use chrono::{NaiveDate, Utc};
    use dynasty_core::{Career, PlayoffResult, Position, PostSeasonKind};
    use dynasty_server_app::{
        domain::{AccountId, CoachId, DynastyId, coach::Coach},
        workflow::{dynasty::DynastyView, season::CoachFailure},
    };
    use serde_json::json;

    use super::*;

    fn transition(failures: Vec<CoachFailure>) -> SeasonTransitionView {
        let dynasty_id = DynastyId::new();
        let career = Career::start(2025, "Alabama", Position::HeadCoach).unwrap();
        let coach = Coach::new(dynasty_id, "Nick".to_string(), "Saban".to_string(), career);
        SeasonTransitionView {
            dynasty: DynastyView {
                dynasty_id,
                owner_id: AccountId::new(),
                name: "Bama".to_string(),
                start_date: NaiveDate::from_ymd_opt(2024, 8, 1).unwrap(),
                current_year: 2025,
                shared_with: Vec::new(),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            coaches: vec![coach.into()],
            failures,
        }
    }

    async fn respond(view: SeasonTransitionView) -> (StatusCode, serde_json::Value) {
        let response = transition_response(view).into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_clean_transition_is_ok() {
        let (status, body) = respond(transition(Vec::new())).await;
        assert_eq!(status, StatusCode::OK);
        let keys: Vec<&str> = body.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys.len(), 3);
        for key in ["dynasty", "coaches", "failures"] {
            assert!(keys.contains(&key));
        }
        assert_eq!(body["dynasty"]["currentYear"], 2025);
        assert_eq!(body["coaches"][0]["currentYear"], 2025);
        assert_eq!(body["failures"], json!([]));
    }

    #[tokio::test]
    async fn test_partial_transition_is_multi_status() {
        let coach_id = CoachId::new();
        let (status, body) = respond(transition(vec![CoachFailure {
            coach_id,
            message: "Season 2025 already exists".to_string(),
        }]))
        .await;
        assert_eq!(status, StatusCode::MULTI_STATUS);
        assert_eq!(
            body["failures"],
            json!([{ "coachId": coach_id.to_string(), "error": "Season 2025 already exists" }])
        );
    }

    #[test]
    fn test_year_segment_must_be_an_integer() {
        assert_eq!(season_year("2024").unwrap(), 2024);
        let err = season_year("abc").unwrap_err();
        assert_eq!(err.0.kind(), "invalid_input");
        assert_eq!(err.0.field(), Some("year"));
        assert!(season_year("2024.5").is_err());
    }

    #[test]
    fn test_fractional_count_names_its_field() {
        let req: UpdateSeasonRequest =
            serde_json::from_value(json!({ "wins": 3.5, "losses": 2 })).unwrap();
        let err = SeasonPatch::try_from(req).unwrap_err();
        assert_eq!(err.0.field(), Some("wins"));

        let req: UpdateSeasonRequest =
            serde_json::from_value(json!({ "losses": "two", "playoffSeed": null })).unwrap();
        let err = SeasonPatch::try_from(req).unwrap_err();
        assert_eq!(err.0.field(), Some("losses"));

        let req: UpdateSeasonRequest =
            serde_json::from_value(json!({ "playoffSeed": 1.5 })).unwrap();
        assert_eq!(
            SeasonPatch::try_from(req).unwrap_err().0.field(),
            Some("playoffSeed")
        );
    }

    #[test]
    fn test_request_codes_are_parsed() {
        let req = UpdateSeasonRequest {
            wins: Some(json!(11)),
            position: Some("OC".to_string()),
            post_season: Some("playoff".to_string()),
            playoff_seed: Some(json!(3)),
            playoff_result: Some("semifinal_loss".to_string()),
            ..Default::default()
        };
        let patch = SeasonPatch::try_from(req).unwrap();
        assert_eq!(patch.wins, Some(11));
        assert_eq!(patch.position, Some(Position::OffensiveCoordinator));
        assert_eq!(patch.post_season, Some(PostSeasonKind::Playoff));
        assert_eq!(patch.playoff_result, Some(PlayoffResult::SemifinalLoss));
    }

    #[test]
    fn test_unknown_post_season_is_invalid_input() {
        let req = UpdateSeasonRequest {
            post_season: Some("exhibition".to_string()),
            ..Default::default()
        };
        let err = SeasonPatch::try_from(req).unwrap_err();
        assert!(matches!(err.0, ServiceError::InvalidInput { .. }));
    }
}
