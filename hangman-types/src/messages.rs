use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::LeaderboardEntry;

/// Body of `POST /new` when a nickname is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewPlayerRequest {
    pub nick: String,
}

/// Body of `POST /new` when a round result is recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct GameResultRequest {
    pub nick: String,
    pub game_points: u32,
}

/// Body of `GET /ranking`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RankingResponse {
    pub rank: Vec<LeaderboardEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_result_uses_camel_case_points() {
        let body = GameResultRequest {
            nick: "ashe-main".to_string(),
            game_points: 120,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["nick"], "ashe-main");
        assert_eq!(json["gamePoints"], 120);
        assert!(json.get("game_points").is_none());
    }

    #[test]
    fn test_register_body_has_only_nick() {
        let json = serde_json::to_value(NewPlayerRequest {
            nick: "teemo".to_string(),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({ "nick": "teemo" }));
    }

    #[test]
    fn test_ranking_response_parses_service_payload() {
        let payload = r#"{"rank":[{"nick":"a","points":30},{"nick":"b","points":10}]}"#;
        let response: RankingResponse = serde_json::from_str(payload).unwrap();
        assert_eq!(response.rank.len(), 2);
        assert_eq!(response.rank[0].nick, "a");
        assert_eq!(response.rank[1].points, 10);
    }
}
