use serde::{Deserialize, Serialize};
use std::fmt;

/// One team's line in a points table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamStanding {
    pub position: u32,
    pub team_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_flag: Option<String>,
    pub played: u32,
    pub won: u32,
    pub lost: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tied: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_result: Option<u32>,
    pub points: Figure,
    pub nrr: Figure,
}

impl TeamStanding {
    pub fn tied(&self) -> u32 {
        self.tied.unwrap_or(0)
    }

    pub fn no_result(&self) -> u32 {
        self.no_result.unwrap_or(0)
    }

    /// Flag url, if there is one worth showing. Empty strings count as missing.
    pub fn flag(&self) -> Option<&str> {
        self.team_flag.as_deref().filter(|flag| !flag.is_empty())
    }
}

impl fmt::Display for TeamStanding {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{position}. {team} {points}pts {won}-{lost}-{tied}-{no_result} ({played}) nrr {nrr}",
            position = self.position,
            team = self.team_name,
            points = self.points,
            won = self.won,
            lost = self.lost,
            tied = self.tied(),
            no_result = self.no_result(),
            played = self.played,
            nrr = self.nrr
        )
    }
}

/// A number as the source wrote it. Points and net run rate are shown verbatim, so we never
/// round-trip them through a float.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Figure {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for Figure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Figure::Number(n) => write!(f, "{}", n),
            Figure::Text(t) => write!(f, "{}", t),
        }
    }
}

impl From<i64> for Figure {
    fn from(n: i64) -> Self {
        Figure::Number(n.into())
    }
}

impl From<&str> for Figure {
    fn from(s: &str) -> Self {
        Figure::Text(s.to_owned())
    }
}

/// Ordered standings, as given by the source. Never re-sorted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Standings {
    pub points: Vec<TeamStanding>,
}

impl Standings {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TeamStanding> {
        self.points.iter()
    }
}

impl From<Vec<TeamStanding>> for Standings {
    fn from(points: Vec<TeamStanding>) -> Self {
        Standings { points }
    }
}

impl fmt::Display for Standings {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for team in &self.points {
            writeln!(f, "{}", team)?;
        }
        Ok(())
    }
}
