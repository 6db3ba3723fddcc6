//! Shared fixtures for integration tests

use serde_json::{json, Value};

/// A top-scorers envelope shaped like the live API response
pub fn top_scorers_payload(players: &[(&str, Option<i64>, Option<i64>)]) -> Value {
    let response: Vec<Value> = players
        .iter()
        .map(|(name, total, assists)| {
            json!({
                "player": { "name": name, "nationality": "France" },
                "statistics": [{
                    "team": { "id": 85, "name": "Paris Saint Germain" },
                    "league": { "id": 61, "season": 2021 },
                    "goals": { "total": total, "conceded": 0, "assists": assists, "saves": null }
                }]
            })
        })
        .collect();

    json!({
        "get": "players/topscorers",
        "parameters": { "season": "2021", "league": "61" },
        "errors": [],
        "results": response.len(),
        "paging": { "current": 1, "total": 1 },
        "response": response
    })
}

pub fn top_assists_payload() -> Value {
    json!({
        "get": "players/topassists",
        "parameters": { "season": "2021", "league": "61" },
        "errors": [],
        "results": 1,
        "paging": { "current": 1, "total": 1 },
        "response": [{
            "player": { "name": "Dimitri Payet" },
            "statistics": [{ "goals": { "total": 16, "assists": 13 } }]
        }]
    })
}
