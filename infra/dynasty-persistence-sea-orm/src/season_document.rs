use dynasty_core::{
    BowlOutcome, PlayoffOutcome, PlayoffResult, Position, PostSeason, PostSeasonKind, Season,
};
use serde::{Deserialize, Serialize};

/// Stored shape of a season inside the coach row.
#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
struct SeasonDocument {
    year: i32,
    wins: u32,
    losses: u32,
    is_editable: bool,
    college: String,
    position: String,
    conf_champ: bool,
    post_season: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    bowl_game: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    bowl_opponent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    bowl_result: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    playoff_seed: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    playoff_result: Option<String>,
}

impl From<&Season> for SeasonDocument {
    fn from(season: &Season) -> Self {
        let mut doc = SeasonDocument {
            year: season.year,
            wins: season.wins,
            losses: season.losses,
            is_editable: season.is_editable,
            college: season.college.clone(),
            position: season.position.code().to_string(),
            conf_champ: season.conf_champ,
            post_season: season.post_season.kind().code().to_string(),
            bowl_game: None,
            bowl_opponent: None,
            bowl_result: None,
            playoff_seed: None,
            playoff_result: None,
        };
        match &season.post_season {
            PostSeason::None => {}
            PostSeason::Bowl(bowl) => {
                doc.bowl_game = Some(bowl.game.clone());
                doc.bowl_opponent = Some(bowl.opponent.clone());
                doc.bowl_result = Some(bowl.won);
            }
            PostSeason::Playoff(playoff) => {
                doc.playoff_seed = playoff.seed;
                doc.playoff_result = Some(playoff.result.code().to_string());
            }
        }
        doc
    }
}

impl TryFrom<SeasonDocument> for Season {
    type Error = String;

    fn try_from(doc: SeasonDocument) -> Result<Self, Self::Error> {
        let position: Position = doc.position.parse().map_err(|e| format!("{}", e))?;
        let kind: PostSeasonKind = doc.post_season.parse().map_err(|e| format!("{}", e))?;
        let post_season = match kind {
            PostSeasonKind::None => PostSeason::None,
            PostSeasonKind::Bowl => PostSeason::Bowl(BowlOutcome {
                game: doc.bowl_game.unwrap_or_default(),
                opponent: doc.bowl_opponent.unwrap_or_default(),
                won: doc.bowl_result.unwrap_or(false),
            }),
            PostSeasonKind::Playoff => PostSeason::Playoff(PlayoffOutcome {
                seed: doc.playoff_seed,
                result: doc
                    .playoff_result
                    .as_deref()
                    .map(str::parse::<PlayoffResult>)
                    .transpose()
                    .map_err(|e| format!("{}", e))?
                    .unwrap_or_default(),
            }),
        };
        Ok(Season {
            year: doc.year,
            wins: doc.wins,
            losses: doc.losses,
            is_editable: doc.is_editable,
            college: doc.college,
            position,
            conf_champ: doc.conf_champ,
            post_season,
        })
    }
}

pub fn seasons_to_json(seasons: &[Season]) -> serde_json::Value {
    let docs: Vec<SeasonDocument> = seasons.iter().map(SeasonDocument::from).collect();
    serde_json::to_value(docs).unwrap_or_else(|_| serde_json::json!([]))
}

pub fn seasons_from_json(value: serde_json::Value) -> Result<Vec<Season>, String> {
    let docs: Vec<SeasonDocument> = serde_json::from_value(value).map_err(|e| e.to_string())?;
    docs.into_iter().map(Season::try_from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playoff_season_document() {
        let mut season = Season::new(2025, "Ohio State".to_string(), Position::HeadCoach);
        season.wins = 14;
        season.losses = 2;
        season.post_season = PostSeason::Playoff(PlayoffOutcome {
            seed: Some(8),
            result: PlayoffResult::Champion,
        });

        let json = seasons_to_json(std::slice::from_ref(&season));
        assert_eq!(
            json,
            serde_json::json!([{
                "year": 2025,
                "wins": 14,
                "losses": 2,
                "isEditable": true,
                "college": "Ohio State",
                "position": "HC",
                "confChamp": false,
                "postSeason": "playoff",
                "playoffSeed": 8,
                "playoffResult": "champion"
            }])
        );
        assert_eq!(seasons_from_json(json), Ok(vec![season]));
    }

    #[test]
    fn test_bowl_fields_without_bowl_branch_are_dropped() {
        let json = serde_json::json!([{
            "year": 2024,
            "wins": 7,
            "losses": 5,
            "isEditable": false,
            "college": "Iowa",
            "position": "DC",
            "confChamp": false,
            "postSeason": "none",
            "bowlGame": "Music City Bowl"
        }]);
        let seasons = seasons_from_json(json).unwrap();
        assert_eq!(seasons[0].post_season, PostSeason::None);
        assert_eq!(seasons[0].position, Position::DefensiveCoordinator);
    }

    #[test]
    fn test_corrupt_document_is_an_error() {
        let json = serde_json::json!([{
            "year": 2024,
            "wins": 7,
            "losses": 5,
            "isEditable": false,
            "college": "Iowa",
            "position": "QB",
            "confChamp": false,
            "postSeason": "none"
        }]);
        assert!(seasons_from_json(json).is_err());
    }
}
