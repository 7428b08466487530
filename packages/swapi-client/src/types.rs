use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;

/// Identifier of a starship in the remote catalog.
///
/// Used both as the lookup key in the resource URL and as the sort key of
/// the catalog, so it renders as a bare number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShipId(pub u32);

impl fmt::Display for ShipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for ShipId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.trim().parse().map(ShipId)
    }
}

/// A fully decoded starship record.
///
/// The catalog schema is owned by the remote API, so fields are kept as
/// loosely typed JSON. Numeric fields frequently arrive as strings
/// (`"3500000"`) or as placeholders (`"unknown"`, `"n/a"`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Starship(Map<String, Value>);

impl Starship {
    /// Decode a starship from an arbitrary JSON value. Anything but an
    /// object is a decode error.
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Raw value of a field, `None` when the record does not carry it.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Display name, empty when absent or not a string.
    pub fn name(&self) -> &str {
        self.field("name").and_then(Value::as_str).unwrap_or_default()
    }

    pub fn summarize(&self, id: ShipId) -> StarshipSummary {
        StarshipSummary {
            id,
            name: self.name().to_string(),
        }
    }
}

/// Minimal projection of a starship used to populate selection lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarshipSummary {
    pub id: ShipId,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ship_id_parses_and_displays() {
        let id: ShipId = " 75 ".parse().unwrap();
        assert_eq!(id, ShipId(75));
        assert_eq!(id.to_string(), "75");
        assert!("x-wing".parse::<ShipId>().is_err());
    }

    #[test]
    fn test_starship_from_object() {
        let ship = Starship::from_value(json!({
            "name": "Death Star",
            "cost_in_credits": "1000000000000",
        }))
        .unwrap();

        assert_eq!(ship.name(), "Death Star");
        assert_eq!(ship.field("cost_in_credits"), Some(&json!("1000000000000")));
        assert_eq!(ship.field("passengers"), None);
    }

    #[test]
    fn test_starship_rejects_non_object() {
        let err = Starship::from_value(json!(["not", "a", "ship"])).unwrap_err();
        assert!(matches!(err, crate::SwapiError::Decode(_)));
    }

    #[test]
    fn test_summary_tolerates_missing_name() {
        let ship = Starship::from_value(json!({ "model": "T-65" })).unwrap();
        let summary = ship.summarize(ShipId(12));
        assert_eq!(summary.id, ShipId(12));
        assert_eq!(summary.name, "");
    }
}
