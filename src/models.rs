// Wire shapes of the habit service. Field names mirror what the service
// expects (camelCase, `type` discriminators, `TagIds` for associations).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier assigned by the service. The service itself hands out
/// strings, simple test servers hand out integers; either is sent back
/// unchanged.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum ResourceId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceId::Number(n) => write!(f, "{}", n),
            ResourceId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ResourceId {
    fn from(n: i64) -> Self {
        ResourceId::Number(n)
    }
}

impl From<&str> for ResourceId {
    fn from(s: &str) -> Self {
        ResourceId::Text(s.to_string())
    }
}

/// Payload for `POST tags`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CreateTag {
    pub name: String,
    pub description: String,
}

impl CreateTag {
    pub fn new(name: &str, description: &str) -> Self {
        CreateTag {
            name: name.to_string(),
            description: description.to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HabitKind {
    Binary,
    Measurable,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrequencyKind {
    Daily,
    Weekly,
    Monthly,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Frequency {
    pub times_per_period: u32,
    #[serde(rename = "type")]
    pub kind: FrequencyKind,
}

/// Unit vocabulary accepted by the service for habit targets.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum TargetUnit {
    Minutes,
    Hours,
    Steps,
    Km,
    Cal,
    Pages,
    Books,
    Tasks,
    Sessions,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Target {
    pub value: u32,
    pub unit: TargetUnit,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Milestone {
    pub target: u32,
    pub current: u32,
}

/// Payload for `POST habits`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CreateHabit {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: HabitKind,
    pub description: String,
    pub frequency: Frequency,
    pub target: Target,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub milestone: Option<Milestone>,
}

/// Payload for `PUT habits/{id}/tags`. Replaces the habit's full tag set.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UpsertHabitTags {
    #[serde(rename = "TagIds")]
    pub tag_ids: Vec<ResourceId>,
}

/// Any creation response; only the identifier matters here.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Created {
    pub id: Option<ResourceId>,
}

/// Envelope of list endpoints.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Collection<T> {
    #[serde(alias = "items")]
    pub data: Vec<T>,
}

/// A habit as listed by `GET habits?includeTags=true`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct HabitSummary {
    pub id: Option<ResourceId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<serde_json::Value>>,
}
