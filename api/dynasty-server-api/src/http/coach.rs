use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use dynasty_core::{PostSeason, Season};
use dynasty_server_app::{
    domain::CoachId,
    workflow::coach::{CoachView, create::NewCoach, update::CoachChanges},
};
use serde::{Deserialize, Serialize};

use crate::{
    AppState,
    auth::Auth,
    error::{ApiError, ApiJson},
    http::{dynasty::dynasty_id, parse_id},
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonSeason {
    year: i32,
    wins: u32,
    losses: u32,
    is_editable: bool,
    college: String,
    position: &'static str,
    conf_champ: bool,
    post_season: &'static str,
    bowl_game: String,
    bowl_opponent: String,
    bowl_result: bool,
    playoff_seed: Option<u8>,
    playoff_result: &'static str,
}

impl From<Season> for JsonSeason {
    fn from(season: Season) -> Self {
        let mut json = JsonSeason {
            year: season.year,
            wins: season.wins,
            losses: season.losses,
            is_editable: season.is_editable,
            college: season.college,
            position: season.position.code(),
            conf_champ: season.conf_champ,
            post_season: season.post_season.kind().code(),
            bowl_game: String::new(),
            bowl_opponent: String::new(),
            bowl_result: false,
            playoff_seed: None,
            playoff_result: "none",
        };
        match season.post_season {
            PostSeason::None => {}
            PostSeason::Bowl(bowl) => {
                json.bowl_game = bowl.game;
                json.bowl_opponent = bowl.opponent;
                json.bowl_result = bowl.won;
            }
            PostSeason::Playoff(playoff) => {
                json.playoff_seed = playoff.seed;
                json.playoff_result = playoff.result.code();
            }
        }
        json
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonPositionRecord {
    position: &'static str,
    wins: u32,
    losses: u32,
    win_percentage: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonCoach {
    id: String,
    dynasty_id: String,
    first_name: String,
    last_name: String,
    college: String,
    position: &'static str,
    current_year: i32,
    seasons: Vec<JsonSeason>,
    wins: u32,
    losses: u32,
    win_percentage: f64,
    postseason_wins: u32,
    postseason_losses: u32,
    position_records: Vec<JsonPositionRecord>,
    conf_championships: u32,
    national_championships: u32,
    created_at: String,
    updated_at: String,
}

impl From<CoachView> for JsonCoach {
    fn from(coach: CoachView) -> Self {
        let record = coach.record;
        JsonCoach {
            id: coach.coach_id.to_string(),
            dynasty_id: coach.dynasty_id.to_string(),
            first_name: coach.first_name,
            last_name: coach.last_name,
            college: coach.college,
            position: coach.position.code(),
            current_year: coach.current_year,
            seasons: coach.seasons.into_iter().map(JsonSeason::from).collect(),
            wins: record.career.wins,
            losses: record.career.losses,
            win_percentage: record.career.win_percentage(),
            postseason_wins: record.postseason.wins,
            postseason_losses: record.postseason.losses,
            position_records: record
                .by_position
                .iter()
                .map(|p| JsonPositionRecord {
                    position: p.position.code(),
                    wins: p.record.wins,
                    losses: p.record.losses,
                    win_percentage: p.record.win_percentage(),
                })
                .collect(),
            conf_championships: record.conf_championships,
            national_championships: record.national_championships,
            created_at: coach.created_at.to_rfc3339(),
            updated_at: coach.updated_at.to_rfc3339(),
        }
    }
}

pub(super) fn coach_id(raw: &str) -> Result<CoachId, ApiError> {
    parse_id(raw, "Coach").map(CoachId)
}

pub async fn list(
    Auth(account): Auth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<JsonCoach>>, ApiError> {
    let coaches = state
        .app
        .coach_list_use_case
        .list_coaches(account.account_id, dynasty_id(&id)?)
        .await?;
    Ok(Json(coaches.into_iter().map(JsonCoach::from).collect()))
}

pub async fn get(
    Auth(account): Auth,
    State(state): State<AppState>,
    Path((id, coach)): Path<(String, String)>,
) -> Result<Json<JsonCoach>, ApiError> {
    let coach = state
        .app
        .coach_get_use_case
        .get_coach(account.account_id, dynasty_id(&id)?, coach_id(&coach)?)
        .await?;
    Ok(Json(coach.into()))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCoachRequest {
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
    #[serde(default)]
    college: String,
    #[serde(default)]
    position: String,
}

pub async fn create(
    Auth(account): Auth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<CreateCoachRequest>,
) -> Result<(StatusCode, Json<JsonCoach>), ApiError> {
    let new_coach = NewCoach {
        first_name: req.first_name,
        last_name: req.last_name,
        college: req.college,
        position: req.position,
    };
    let coach = state
        .app
        .coach_create_use_case
        .create_coach(account.account_id, dynasty_id(&id)?, new_coach)
        .await?;
    Ok((StatusCode::CREATED, Json(coach.into())))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCoachRequest {
    first_name: Option<String>,
    last_name: Option<String>,
    college: Option<String>,
    position: Option<String>,
}

pub async fn update(
    Auth(account): Auth,
    State(state): State<AppState>,
    Path((id, coach)): Path<(String, String)>,
    ApiJson(req): ApiJson<UpdateCoachRequest>,
) -> Result<Json<JsonCoach>, ApiError> {
    let changes = CoachChanges {
        first_name: req.first_name,
        last_name: req.last_name,
        college: req.college,
        position: req.position,
    };
    let coach = state
        .app
        .coach_update_use_case
        .update_coach(account.account_id, dynasty_id(&id)?, coach_id(&coach)?, changes)
        .await?;
    Ok(Json(coach.into()))
}

pub async fn delete(
    Auth(account): Auth,
    State(state): State<AppState>,
    Path((id, coach)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    state
        .app
        .coach_delete_use_case
        .delete_coach(account.account_id, dynasty_id(&id)?, coach_id(&coach)?)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
