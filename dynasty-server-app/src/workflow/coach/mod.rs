use chrono::{DateTime, Utc};
use dynasty_core::{CareerRecord, Position, Season};

use crate::domain::{CoachId, DynastyId, coach::Coach};

pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

/// A coach with its seasons and the aggregates derived from them.
#[derive(Clone, Debug, PartialEq)]
pub struct CoachView {
    pub coach_id: CoachId,
    pub dynasty_id: DynastyId,
    pub first_name: String,
    pub last_name: String,
    pub college: String,
    pub position: Position,
    pub current_year: i32,
    pub seasons: Vec<Season>,
    pub record: CareerRecord,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Coach> for CoachView {
    fn from(coach: Coach) -> Self {
        let career = &coach.career;
        Self {
            coach_id: coach.coach_id,
            dynasty_id: coach.dynasty_id,
            college: career.college().to_string(),
            position: career.position(),
            current_year: career.current_year(),
            seasons: career.seasons().to_vec(),
            record: career.record(),
            first_name: coach.first_name,
            last_name: coach.last_name,
            created_at: coach.created_at,
            updated_at: coach.updated_at,
        }
    }
}
