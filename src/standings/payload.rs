use crate::error::{Error, Result};
use crate::generic_structs::{Figure, Standings, TeamStanding};
use log::{debug, warn};
use serde::Deserialize;
use serde_json::Value;

/// The shapes a points table document comes in.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// `{"table": {"group": [...]}}`, as served by the remote api.
    Nested(Vec<TeamStanding>),
    /// `{"points": [...]}`, as stored locally. Taken as is.
    Flat(Vec<TeamStanding>),
    /// Neither of the above.
    Unrecognized,
}

impl Payload {
    pub fn parse(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content)?;
        Self::from_value(value)
    }

    /// Nested wins over flat when a document somehow carries both.
    pub fn from_value(mut value: Value) -> Result<Self> {
        if let Some(group) = present(value.pointer_mut("/table/group")) {
            let teams: Vec<ParseNestedTeam> = decode(group, "table.group")?;
            debug!("Nested payload with {} teams", teams.len());
            return Ok(Payload::Nested(
                teams.into_iter().map(ParseNestedTeam::into_standing).collect(),
            ));
        }
        if let Some(points) = present(value.get_mut("points")) {
            let teams: Vec<TeamStanding> = decode(points, "points")?;
            debug!("Flat payload with {} teams", teams.len());
            return Ok(Payload::Flat(teams));
        }
        Ok(Payload::Unrecognized)
    }

    pub fn into_standings(self) -> Standings {
        match self {
            Payload::Nested(points) | Payload::Flat(points) => Standings::from(points),
            Payload::Unrecognized => {
                warn!("Payload has neither table.group nor points, rendering an empty table");
                Standings::default()
            }
        }
    }
}

fn present(value: Option<&mut Value>) -> Option<Value> {
    match value {
        Some(v) if !v.is_null() => Some(v.take()),
        _ => None,
    }
}

fn decode<T: serde::de::DeserializeOwned>(value: Value, at: &str) -> Result<T> {
    serde_json::from_value(value).map_err(|e| Error::Payload(format!("{}: {}", at, e)))
}

/// Remote api rows. Same fields as ours, but tied and no_result may be missing.
#[derive(Deserialize, Debug)]
struct ParseNestedTeam {
    position: u32,
    team_name: String,
    team_flag: Option<String>,
    played: u32,
    won: u32,
    lost: u32,
    tied: Option<u32>,
    no_result: Option<u32>,
    points: Figure,
    nrr: Figure,
}

impl ParseNestedTeam {
    fn into_standing(self) -> TeamStanding {
        TeamStanding {
            position: self.position,
            team_name: self.team_name,
            team_flag: self.team_flag,
            played: self.played,
            won: self.won,
            lost: self.lost,
            tied: Some(self.tied.unwrap_or(0)),
            no_result: Some(self.no_result.unwrap_or(0)),
            points: self.points,
            nrr: self.nrr,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn nested_defaults_missing_counts() {
        let _ = env_logger::builder().is_test(true).try_init();

        let value = json!({"table": {"group": [
            {"position": 1, "team_name": "A", "played": 2, "won": 2, "lost": 0, "points": 4, "nrr": 1.5}
        ]}});
        let standings = Payload::from_value(value).unwrap().into_standings();
        assert_eq!(standings.len(), 1);
        let a = &standings.points[0];
        assert_eq!(a.tied, Some(0));
        assert_eq!(a.no_result, Some(0));
        assert_eq!(a.position, 1);
        assert_eq!(a.team_name, "A");
        assert_eq!(a.team_flag, None);
        assert_eq!((a.played, a.won, a.lost), (2, 2, 0));
        assert_eq!(a.points.to_string(), "4");
        assert_eq!(a.nrr.to_string(), "1.5");
    }

    #[test]
    fn flat_is_taken_verbatim() {
        let value = json!({"points": [
            {"position": 1, "team_name": "B", "played": 1, "won": 0, "lost": 1, "tied": 0, "no_result": 0, "points": 0, "nrr": -0.2}
        ]});
        let payload = Payload::from_value(value.clone()).unwrap();
        let points = match payload {
            Payload::Flat(points) => points,
            other => panic!("expected flat payload, got {:?}", other),
        };
        assert_eq!(serde_json::to_value(&points).unwrap(), value["points"]);
    }

    #[test]
    fn flat_leaves_absent_counts_absent() {
        let payload = Payload::parse(include_str!("flat.json")).unwrap();
        let standings = payload.into_standings();
        let kkr = &standings.points[1];
        assert_eq!(kkr.tied, None);
        assert_eq!(kkr.tied(), 0);
        assert_eq!(kkr.no_result, Some(2));
        assert_eq!(standings.points[2].nrr.to_string(), "-0.647");
    }

    #[test]
    fn nested_fixture_keeps_source_order() {
        let payload = Payload::parse(include_str!("nested.json")).unwrap();
        let standings = payload.into_standings();
        let names: Vec<_> = standings.iter().map(|t| t.team_name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Gujarat Titans",
                "Royal Challengers Bengaluru",
                "Punjab Kings",
                "Mumbai Indians"
            ]
        );
        // 19 points sits below 18, the source knows best
        assert_eq!(standings.points[1].points.to_string(), "19");
        assert_eq!(standings.points[1].nrr.to_string(), "+0.301");
        assert_eq!(standings.points[2].tied, Some(0));
        assert_eq!(standings.points[3].team_flag, None);
    }

    #[test]
    fn nested_wins_over_flat() {
        let value = json!({
            "table": {"group": [
                {"position": 1, "team_name": "Nested", "played": 0, "won": 0, "lost": 0, "points": 0, "nrr": 0}
            ]},
            "points": []
        });
        assert!(matches!(Payload::from_value(value).unwrap(), Payload::Nested(ref t) if t.len() == 1));
    }

    #[test]
    fn unknown_shapes_are_empty() {
        for value in [
            json!({}),
            json!({"table": null}),
            json!({"table": [{"table": []}]}),
            json!({"points": null}),
            json!([1, 2, 3]),
        ] {
            let payload = Payload::from_value(value.clone()).unwrap();
            assert_eq!(payload, Payload::Unrecognized, "{}", value);
            assert!(payload.into_standings().is_empty());
        }
    }

    #[test]
    fn malformed_records_are_errors() {
        let err = Payload::from_value(json!({"points": "nope"})).unwrap_err();
        assert!(matches!(err, Error::Payload(_)));
        let err = Payload::from_value(json!({"table": {"group": [{"team_name": "X"}]}})).unwrap_err();
        assert!(matches!(err, Error::Payload(ref m) if m.starts_with("table.group")));
    }

    #[test]
    fn broken_json_is_an_error() {
        assert!(matches!(Payload::parse("{\"points\": ["), Err(Error::Json(_))));
    }
}
