// Seeding pipeline
// ----------------
// A run is a fixed sequence of stages: availability probe, tags, habits,
// habit-tag associations, verification. Each stage takes the outputs of
// the stages before it and returns its own typed result. Any fatal error
// propagates straight out of `Seeder::run` so nothing after it starts.
//
// Soft failures (a creation response without an `id`, an association for
// an unknown habit) are reported and the item is skipped.

use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;
use std::time::Duration;

use crate::api::{ApiClient, Transport};
use crate::catalog::{self, Relationship};
use crate::error::{SeedError, SeedResult};
use crate::models::{Collection, CreateHabit, CreateTag, Created, HabitSummary, ResourceId, UpsertHabitTags};
use crate::output;

/// Name to identifier mapping, kept in creation order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdMap {
    entries: Vec<(String, ResourceId)>,
}

impl IdMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `name`, replacing an earlier entry with the same name.
    pub fn insert(&mut self, name: impl Into<String>, id: ResourceId) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = id,
            None => self.entries.push((name, id)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ResourceId> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, id)| id)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ResourceId)> {
        self.entries.iter().map(|(n, id)| (n.as_str(), id))
    }
}

/// One PUT issued by the association stage.
#[derive(Debug, Clone, PartialEq)]
pub struct Association {
    pub habit: String,
    pub habit_id: ResourceId,
    pub tag_ids: Vec<ResourceId>,
}

/// What the verification GETs found. `None` means the listing could not be
/// read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Verification {
    pub habits: Option<Vec<HabitSummary>>,
    pub tag_count: Option<usize>,
}

impl Verification {
    pub fn habit_count(&self) -> Option<usize> {
        self.habits.as_ref().map(Vec::len)
    }
}

/// Outcome of a complete run.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedReport {
    pub existing_tags: usize,
    pub tags: IdMap,
    pub habits: IdMap,
    pub associations: Vec<Association>,
    pub verification: Verification,
}

/// Drives the stages against one API client.
pub struct Seeder<'a, T: Transport> {
    api: &'a ApiClient<T>,
}

impl<'a, T: Transport> Seeder<'a, T> {
    pub fn new(api: &'a ApiClient<T>) -> Self {
        Seeder { api }
    }

    /// Run every stage with the built-in sample catalog.
    pub fn run(&self) -> SeedResult<SeedReport> {
        self.run_with(&catalog::sample_tags(), &catalog::sample_habits(), &catalog::sample_relationships())
    }

    pub fn run_with(
        &self,
        tags: &[CreateTag],
        habits: &[CreateHabit],
        relationships: &[Relationship],
    ) -> SeedResult<SeedReport> {
        output::info("Starting database seeding process...");

        let existing_tags = self.check_availability()?;
        let tag_ids = self.seed_tags(tags)?;
        let habit_ids = self.seed_habits(habits)?;
        let associations = self.seed_associations(&habit_ids, &tag_ids, relationships)?;
        let verification = self.verify()?;

        output::info("Database seeding completed successfully!");

        Ok(SeedReport {
            existing_tags,
            tags: tag_ids,
            habits: habit_ids,
            associations,
            verification,
        })
    }

    /// Probe `GET tags`. Returns how many tags already exist; an empty
    /// answer or a refused connection means the API is unreachable.
    pub fn check_availability(&self) -> SeedResult<usize> {
        output::info("Checking API availability...");

        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(format!("Contacting {}", self.api.base_url()));
        spinner.enable_steady_tick(Duration::from_millis(100));
        let probe = self.api.get("tags");
        spinner.finish_and_clear();

        let unreachable = || SeedError::Unreachable {
            base_url: self.api.base_url().to_string(),
        };
        let response = match probe {
            Ok(Some(response)) => response,
            Ok(None) => return Err(unreachable()),
            Err(err) if err.is_connect() => {
                tracing::debug!(error = %err, "availability probe could not connect");
                return Err(unreachable());
            }
            Err(err) => return Err(err),
        };

        output::success("API is accessible");

        let existing = serde_json::from_value::<Collection<Value>>(response)
            .map(|c| c.data.len())
            .unwrap_or(0);
        if existing > 0 {
            output::warning(format!(
                "{} tags already exist; tags with duplicate names will be rejected",
                existing
            ));
        }
        Ok(existing)
    }

    pub fn seed_tags(&self, tags: &[CreateTag]) -> SeedResult<IdMap> {
        output::info("Creating tags...");

        let mut ids = IdMap::new();
        for tag in tags {
            match created_id(self.api.post("tags", tag)?) {
                Some(id) => {
                    output::success(format!("Created tag: {} (ID: {})", tag.name, id));
                    ids.insert(tag.name.as_str(), id);
                }
                None => output::error(format!("Failed to create tag: {}", tag.name)),
            }
        }
        Ok(ids)
    }

    pub fn seed_habits(&self, habits: &[CreateHabit]) -> SeedResult<IdMap> {
        output::info("Creating habits...");

        let mut ids = IdMap::new();
        for habit in habits {
            match created_id(self.api.post("habits", habit)?) {
                Some(id) => {
                    output::success(format!("Created habit: {} (ID: {})", habit.name, id));
                    ids.insert(habit.name.as_str(), id);
                }
                None => output::error(format!("Failed to create habit: {}", habit.name)),
            }
        }
        Ok(ids)
    }

    /// One PUT per known habit, replacing its tag set with the resolved
    /// ids. Unknown tag names are dropped; unknown habits are skipped.
    pub fn seed_associations(
        &self,
        habit_ids: &IdMap,
        tag_ids: &IdMap,
        relationships: &[Relationship],
    ) -> SeedResult<Vec<Association>> {
        output::info("Creating habit-tag relationships...");

        let mut linked = Vec::with_capacity(relationships.len());
        for (habit, tag_names) in relationships {
            let Some(habit_id) = habit_ids.get(habit) else {
                output::error(format!("Habit not found: {}", habit));
                continue;
            };

            let payload = UpsertHabitTags {
                tag_ids: tag_names.iter().filter_map(|name| tag_ids.get(name).cloned()).collect(),
            };
            if payload.tag_ids.len() < tag_names.len() {
                let missing: Vec<_> = tag_names.iter().filter(|name| !tag_ids.contains(name)).collect();
                tracing::debug!(habit, ?missing, "dropping unknown tag names");
            }

            self.api.put(&format!("habits/{}/tags", habit_id), &payload)?;
            output::success(format!("Connected {} with tags {:?}", habit, tag_names));

            linked.push(Association {
                habit: habit.to_string(),
                habit_id: habit_id.clone(),
                tag_ids: payload.tag_ids,
            });
        }
        Ok(linked)
    }

    /// Re-read habits (with tags) and tags and report what the service holds.
    pub fn verify(&self) -> SeedResult<Verification> {
        output::info("Verifying created data...");

        let habits = self
            .api
            .get("habits?includeTags=true")?
            .and_then(|v| serde_json::from_value::<Collection<HabitSummary>>(v).ok())
            .map(|c| c.data);
        match &habits {
            Some(habits) => {
                output::success(format!("Found {} habits with their tags", habits.len()));
                for habit in habits {
                    let id = habit.id.as_ref().map_or_else(|| "?".to_string(), ToString::to_string);
                    let name = habit.name.as_deref().unwrap_or("None");
                    output::info(format!("Habit: {} (ID: {})", name, id));
                    for tag in habit.tags.iter().flatten() {
                        output::info(format!("  - Tag: {}", display_value(tag)));
                    }
                }
            }
            None => output::error("Failed to retrieve habits"),
        }

        let tag_count = self
            .api
            .get("tags")?
            .and_then(|v| serde_json::from_value::<Collection<Value>>(v).ok())
            .map(|c| c.data.len());
        match tag_count {
            Some(count) => output::success(format!("Found {} tags", count)),
            None => output::error("Failed to retrieve tags"),
        }

        Ok(Verification { habits, tag_count })
    }
}

fn created_id(response: Option<Value>) -> Option<ResourceId> {
    response
        .and_then(|v| serde_json::from_value::<Created>(v).ok())
        .and_then(|c| c.id)
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
