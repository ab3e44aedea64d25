//! Typed scenario input contract.
//!
//! The scenario text format is parsed by an external collaborator; this
//! module consumes its output schema as JSON. Section and field names on
//! the wire are PascalCase, matching the parser's output. A document
//! missing a required section or carrying an unusable value is fatal at
//! startup (`MalformedScenario`) — there is no safe default policy.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimulationError};
use crate::grid::PlantType;

/// Default scenario shipped with the engine, also used by the driver.
pub const DEFAULT_SCENARIO: &str = include_str!("../assets/default_scenario.json");

/// Full scenario document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(rename = "StartingConditions")]
    pub starting_conditions: StartingConditions,
    #[serde(rename = "VictoryConditions")]
    pub victory_conditions: VictoryConditions,
    #[serde(rename = "WeatherPolicy")]
    pub weather_policy: WeatherPolicy,
    /// Day number -> partial policy override. May be absent.
    #[serde(rename = "Events", default)]
    pub events: BTreeMap<u32, ScenarioEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartingConditions {
    #[serde(rename = "Day")]
    pub day: u32,
    #[serde(rename = "SunLevel")]
    pub sun_level: i32,
    #[serde(rename = "WaterLevel")]
    pub water_level: i32,
    #[serde(rename = "PlayerSeedChoice")]
    pub player_seed_choice: PlantType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VictoryConditions {
    #[serde(rename = "MaturePlantsRequired")]
    pub mature_plants_required: u32,
    #[serde(rename = "MaximumDays")]
    pub maximum_days: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherPolicy {
    #[serde(rename = "SunRange")]
    pub sun_range: [i32; 2],
    #[serde(rename = "WaterRange")]
    pub water_range: [i32; 2],
}

/// Partial override applied when the timeline reaches its day.
/// Absent fields leave the current policy untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScenarioEvent {
    #[serde(rename = "SunRange", skip_serializing_if = "Option::is_none")]
    pub sun_range: Option<[i32; 2]>,
    #[serde(rename = "WaterRange", skip_serializing_if = "Option::is_none")]
    pub water_range: Option<[i32; 2]>,
    #[serde(rename = "WaterMultiplier", skip_serializing_if = "Option::is_none")]
    pub water_multiplier: Option<f64>,
    #[serde(rename = "Message", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(rename = "MaturePlantsRequired", skip_serializing_if = "Option::is_none")]
    pub mature_plants_required: Option<u32>,
}

/// A scenario event bound to its day, sorted ascending at load.
#[derive(Debug, Clone)]
pub struct TimelineEvent {
    pub day: u32,
    pub event: ScenarioEvent,
}

impl Scenario {
    /// Parse and validate a scenario document.
    pub fn from_json(json: &str) -> Result<Self> {
        let scenario: Scenario = serde_json::from_str(json)
            .map_err(|e| SimulationError::MalformedScenario(e.to_string()))?;
        scenario.validate()?;
        Ok(scenario)
    }

    fn validate(&self) -> Result<()> {
        if self.starting_conditions.player_seed_choice == PlantType::None {
            return Err(SimulationError::MalformedScenario(
                "PlayerSeedChoice must name a plantable type".into(),
            ));
        }
        for (name, [min, max]) in [
            ("SunRange", self.weather_policy.sun_range),
            ("WaterRange", self.weather_policy.water_range),
        ] {
            if min > max {
                return Err(SimulationError::MalformedScenario(format!(
                    "{name} minimum {min} exceeds maximum {max}"
                )));
            }
        }
        if self.victory_conditions.maximum_days == 0 {
            return Err(SimulationError::MalformedScenario(
                "MaximumDays must be at least 1".into(),
            ));
        }
        // Event overrides are installed as-is during play, so a bad range
        // here would only surface as a failed weather sample days in.
        for (&day, event) in &self.events {
            for (name, range) in [
                ("SunRange", event.sun_range),
                ("WaterRange", event.water_range),
            ] {
                if let Some([min, max]) = range {
                    if min > max {
                        return Err(SimulationError::MalformedScenario(format!(
                            "event on day {day}: {name} minimum {min} exceeds maximum {max}"
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Events ascending by day (BTreeMap keys iterate in order).
    pub fn sorted_events(&self) -> Vec<TimelineEvent> {
        self.events
            .iter()
            .map(|(&day, event)| TimelineEvent {
                day,
                event: event.clone(),
            })
            .collect()
    }
}

/// Live weather policy, seeded from the scenario and mutated in place by
/// scripted events during play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherRanges {
    pub sun: [i32; 2],
    pub water: [i32; 2],
}

impl From<&WeatherPolicy> for WeatherRanges {
    fn from(policy: &WeatherPolicy) -> Self {
        Self {
            sun: policy.sun_range,
            water: policy.water_range,
        }
    }
}

/// Live victory thresholds, also event-mutable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VictoryPolicy {
    pub mature_plants_required: u32,
    pub maximum_days: u32,
}

impl From<&VictoryConditions> for VictoryPolicy {
    fn from(conditions: &VictoryConditions) -> Self {
        Self {
            mature_plants_required: conditions.mature_plants_required,
            maximum_days: conditions.maximum_days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scenario_parses() {
        let scenario = Scenario::from_json(DEFAULT_SCENARIO).expect("default scenario");
        assert_eq!(scenario.starting_conditions.day, 1);
        assert_eq!(
            scenario.starting_conditions.player_seed_choice,
            PlantType::Grass
        );
        assert!(scenario.victory_conditions.maximum_days > 0);
    }

    #[test]
    fn test_events_sorted_ascending_by_day() {
        let scenario = Scenario::from_json(DEFAULT_SCENARIO).unwrap();
        let events = scenario.sorted_events();
        assert!(!events.is_empty());
        assert!(events.windows(2).all(|w| w[0].day < w[1].day));
    }

    #[test]
    fn test_missing_section_is_malformed() {
        let json = r#"{
            "StartingConditions": {
                "Day": 1, "SunLevel": 5, "WaterLevel": 2, "PlayerSeedChoice": "grass"
            },
            "WeatherPolicy": { "SunRange": [1, 5], "WaterRange": [1, 5] }
        }"#;
        assert!(matches!(
            Scenario::from_json(json),
            Err(SimulationError::MalformedScenario(_))
        ));
    }

    #[test]
    fn test_inverted_range_is_malformed() {
        let json = r#"{
            "StartingConditions": {
                "Day": 1, "SunLevel": 5, "WaterLevel": 2, "PlayerSeedChoice": "flower"
            },
            "VictoryConditions": { "MaturePlantsRequired": 5, "MaximumDays": 30 },
            "WeatherPolicy": { "SunRange": [9, 3], "WaterRange": [1, 5] }
        }"#;
        assert!(matches!(
            Scenario::from_json(json),
            Err(SimulationError::MalformedScenario(_))
        ));
    }

    #[test]
    fn test_seed_choice_none_is_malformed() {
        let json = r#"{
            "StartingConditions": {
                "Day": 1, "SunLevel": 5, "WaterLevel": 2, "PlayerSeedChoice": "none"
            },
            "VictoryConditions": { "MaturePlantsRequired": 5, "MaximumDays": 30 },
            "WeatherPolicy": { "SunRange": [3, 9], "WaterRange": [1, 5] }
        }"#;
        assert!(matches!(
            Scenario::from_json(json),
            Err(SimulationError::MalformedScenario(_))
        ));
    }

    #[test]
    fn test_event_with_inverted_range_is_malformed() {
        let json = r#"{
            "StartingConditions": {
                "Day": 1, "SunLevel": 5, "WaterLevel": 2, "PlayerSeedChoice": "grass"
            },
            "VictoryConditions": { "MaturePlantsRequired": 5, "MaximumDays": 30 },
            "WeatherPolicy": { "SunRange": [3, 9], "WaterRange": [1, 5] },
            "Events": {
                "2": { "SunRange": [9, 3] }
            }
        }"#;
        assert!(matches!(
            Scenario::from_json(json),
            Err(SimulationError::MalformedScenario(_))
        ));
    }

    #[test]
    fn test_missing_events_section_defaults_to_empty() {
        let json = r#"{
            "StartingConditions": {
                "Day": 1, "SunLevel": 5, "WaterLevel": 2, "PlayerSeedChoice": "shrub"
            },
            "VictoryConditions": { "MaturePlantsRequired": 5, "MaximumDays": 30 },
            "WeatherPolicy": { "SunRange": [3, 9], "WaterRange": [1, 5] }
        }"#;
        let scenario = Scenario::from_json(json).unwrap();
        assert!(scenario.sorted_events().is_empty());
    }
}
