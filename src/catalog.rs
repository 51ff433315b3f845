// Sample data written by a seeding run. Order matters: tags and habits are
// created in the order listed here.

use crate::models::{
    CreateHabit, CreateTag, Frequency, FrequencyKind, HabitKind, Milestone, Target, TargetUnit,
};

/// Which tags each habit should carry, by name.
pub type Relationship = (&'static str, &'static [&'static str]);

const TAGS: [(&str, &str); 7] = [
    ("Health", "Habits related to physical and mental wellbeing"),
    ("Productivity", "Habits that improve efficiency and output"),
    ("Learning", "Habits focused on acquiring new knowledge and skills"),
    ("Personal", "Personal development and self-improvement habits"),
    ("Work", "Professional development habits"),
    ("Finance", "Money management and financial habits"),
    ("Social", "Habits related to relationships and social skills"),
];

const RELATIONSHIPS: [Relationship; 7] = [
    ("Daily Exercise", &["Health", "Personal"]),
    ("Read Books", &["Learning", "Personal"]),
    ("Meditation", &["Health", "Personal"]),
    ("Weekly Planning", &["Productivity", "Work"]),
    ("Coding Practice", &["Learning", "Work", "Productivity"]),
    ("Budget Review", &["Finance", "Personal"]),
    ("Call Family", &["Social", "Personal"]),
];

pub fn sample_tags() -> Vec<CreateTag> {
    TAGS.iter()
        .map(|(name, description)| CreateTag::new(name, description))
        .collect()
}

pub fn sample_habits() -> Vec<CreateHabit> {
    use FrequencyKind::{Daily, Monthly, Weekly};
    use HabitKind::{Binary, Measurable};

    vec![
        habit("Daily Exercise", Measurable, "Exercise for at least 30 minutes every day", Daily, 30, TargetUnit::Minutes, None),
        habit(
            "Read Books",
            Measurable,
            "Read at least 20 pages each day",
            Daily,
            20,
            TargetUnit::Pages,
            Some(Milestone { target: 100, current: 0 }),
        ),
        habit("Meditation", Measurable, "Meditate for 10 minutes in the morning", Daily, 10, TargetUnit::Minutes, None),
        habit("Weekly Planning", Binary, "Plan tasks and goals for the week ahead", Weekly, 1, TargetUnit::Sessions, None),
        habit("Coding Practice", Measurable, "Work on coding challenges or personal projects", Daily, 45, TargetUnit::Minutes, None),
        habit("Budget Review", Binary, "Review monthly budget and expenses", Monthly, 1, TargetUnit::Tasks, None),
        habit("Call Family", Binary, "Call parents or siblings to stay connected", Weekly, 1, TargetUnit::Tasks, None),
    ]
}

pub fn sample_relationships() -> Vec<Relationship> {
    RELATIONSHIPS.to_vec()
}

fn habit(
    name: &str,
    kind: HabitKind,
    description: &str,
    period: FrequencyKind,
    value: u32,
    unit: TargetUnit,
    milestone: Option<Milestone>,
) -> CreateHabit {
    CreateHabit {
        name: name.to_string(),
        kind,
        description: description.to_string(),
        frequency: Frequency {
            times_per_period: 1,
            kind: period,
        },
        target: Target { value, unit },
        milestone,
    }
}
