//! Snapshot data model for one game turn, as served by the simulation engine.
//! A snapshot is decoded fresh from every engine response and never mutated.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ClientError, ClientResult};

/// Number of series the engine serializes into `money`.
pub const MONEY_SERIES: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Turn index (or column index for `money`). Absent in some engine payloads.
    #[serde(default)]
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    #[serde(default)]
    pub key: String,
    pub values: Vec<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PieSegment {
    pub label: String,
    pub value: f64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CellKind {
    /// Drawn as a circle.
    Person,
    /// Anything else the engine places on the grid (employers); drawn as a square.
    Other(String),
}

impl From<String> for CellKind {
    fn from(raw: String) -> Self {
        if raw == "person" {
            CellKind::Person
        } else {
            CellKind::Other(raw)
        }
    }
}

impl From<CellKind> for String {
    fn from(kind: CellKind) -> Self {
        match kind {
            CellKind::Person => "person".to_string(),
            CellKind::Other(raw) => raw,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridCell {
    pub x: i32,
    pub y: i32,
    #[serde(rename = "type", alias = "kind")]
    pub kind: CellKind,
    pub color: String,
    /// Engine-rendered markup shown in the hover tooltip.
    #[serde(default)]
    pub info: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub time: Vec<Series>,
    #[serde(default)]
    pub race: Vec<Series>,
    #[serde(default)]
    pub race_pie: Vec<PieSegment>,
    pub money: Vec<Series>,
    #[serde(default)]
    pub grid: Vec<GridCell>,
    /// Human-readable log of the actions applied so far.
    #[serde(default, deserialize_with = "action_log")]
    pub actions: String,
}

impl Snapshot {
    /// Decode an engine response body and check the shape the pipeline relies on.
    pub fn from_json(body: &str) -> ClientResult<Self> {
        let snapshot: Snapshot = serde_json::from_str(body)
            .map_err(|e| ClientError::MalformedSnapshot(e.to_string()))?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn validate(&self) -> ClientResult<()> {
        match self.time.first() {
            None => {
                return Err(ClientError::MalformedSnapshot(
                    "`time` has no series".to_string(),
                ));
            }
            Some(s) if s.values.is_empty() => {
                return Err(ClientError::MalformedSnapshot(
                    "`time[0]` has no points".to_string(),
                ));
            }
            Some(_) => {}
        }
        if self.money.len() != MONEY_SERIES {
            return Err(ClientError::MalformedSnapshot(format!(
                "`money` has {} series, expected {}",
                self.money.len(),
                MONEY_SERIES
            )));
        }
        if let Some((i, s)) = self
            .money
            .iter()
            .enumerate()
            .find(|(_, s)| s.values.len() < 2)
        {
            return Err(ClientError::MalformedSnapshot(format!(
                "`money[{}]` has {} points, expected at least 2",
                i,
                s.values.len()
            )));
        }
        Ok(())
    }

    /// Points in the first time series; the engine appends one per turn.
    pub fn turn_count(&self) -> usize {
        self.time.first().map(|s| s.values.len()).unwrap_or(0)
    }

    /// `money[0]`, first point.
    pub fn production(&self) -> f64 {
        money_y(&self.money, 0, 0)
    }

    /// Sum of the current (second) point of each cost series.
    pub fn current_cost(&self) -> f64 {
        (1..MONEY_SERIES).map(|i| money_y(&self.money, i, 1)).sum()
    }
}

fn money_y(money: &[Series], series: usize, point: usize) -> f64 {
    money
        .get(series)
        .and_then(|s| s.values.get(point))
        .map(|p| p.y)
        .unwrap_or(0.0)
}

fn action_log<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        List(Vec<String>),
    }
    Ok(match Option::<Raw>::deserialize(deserializer)? {
        None => String::new(),
        Some(Raw::Text(s)) => s,
        Some(Raw::List(items)) => items.join(", "),
    })
}


#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r##"{
        "time": [{"key": "employment", "values": [{"x": 0, "y": 61.5}, {"x": 1, "y": 62.0}]}],
        "race": [{"key": "black", "values": [{"x": 0, "y": 40.0}, {"x": 1, "y": 41.0}]}],
        "race_pie": [{"label": "black", "value": 30}, {"label": "white", "value": 70}],
        "money": [
            {"key": "production", "values": [{"x": 0, "y": 50}, {"x": 1, "y": 0}]},
            {"key": "hiring", "values": [{"x": 0, "y": 0}, {"x": 1, "y": 10}]},
            {"key": "salary", "values": [{"x": 0, "y": 0}, {"x": 1, "y": 20}]},
            {"key": "intervention", "values": [{"x": 0, "y": 0}, {"x": 1, "y": 5}]}
        ],
        "grid": [
            {"type": "employer", "x": 2, "y": 3, "color": "#888", "info": "<h1>Employer:</h1>"},
            {"type": "person", "x": 7, "y": 1, "color": "#ff7f7f", "info": "<h1>Person:</h1>"}
        ],
        "actions": ["Mobility(High)", "Retention(Low)"]
    }"##;

    #[test]
    fn decodes_engine_payload() {
        let s = Snapshot::from_json(BODY).unwrap();
        assert_eq!(s.turn_count(), 2);
        assert_eq!(s.race_pie.len(), 2);
        assert_eq!(s.grid[0].kind, CellKind::Other("employer".into()));
        assert_eq!(s.grid[1].kind, CellKind::Person);
        assert_eq!(s.actions, "Mobility(High), Retention(Low)");
        assert_eq!(s.production(), 50.0);
        assert_eq!(s.current_cost(), 35.0);
    }

    #[test]
    fn accepts_kind_alias_and_string_actions() {
        let body = BODY
            .replace("\"type\": \"person\"", "\"kind\": \"person\"")
            .replace(
                "[\"Mobility(High)\", \"Retention(Low)\"]",
                "\"Mobility(High)\"",
            );
        let s = Snapshot::from_json(&body).unwrap();
        assert_eq!(s.grid[1].kind, CellKind::Person);
        assert_eq!(s.actions, "Mobility(High)");
    }

    #[test]
    fn missing_point_x_defaults_to_zero() {
        let p: Point = serde_json::from_str(r#"{"y": 4.5}"#).unwrap();
        assert_eq!(p, Point { x: 0.0, y: 4.5 });
    }

    #[test]
    fn rejects_non_json_as_malformed() {
        let err = Snapshot::from_json("<html>502</html>").unwrap_err();
        assert!(matches!(err, ClientError::MalformedSnapshot(_)));
        assert!(!err.is_transport());
    }

    #[test]
    fn rejects_wrong_money_shape() {
        let mut s = fixtures::snapshot(&[10.0, 20.0]);
        s.money.pop();
        let body = serde_json::to_string(&s).unwrap();
        let err = Snapshot::from_json(&body).unwrap_err();
        assert!(err.to_string().contains("expected 4"));

        let mut s = fixtures::snapshot(&[10.0, 20.0]);
        s.money[2].values.truncate(1);
        assert!(s.validate().is_err());
    }

    #[test]
    fn rejects_empty_time_series() {
        let mut s = fixtures::snapshot(&[]);
        assert!(s.validate().is_err());
        s.time.clear();
        assert!(s.validate().is_err());
    }
}
