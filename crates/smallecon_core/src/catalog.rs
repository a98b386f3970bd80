//! Built-in task catalog used when no other catalog is supplied.

use crate::model::task::{Task, TaskCategory, TaskId};

struct SeedTask {
    id: &'static str,
    title: &'static str,
    category: TaskCategory,
    funding_amount: u64,
    time_estimate: &'static str,
    icon: &'static str,
}

const SEED_TASKS: &[SeedTask] = &[
    SeedTask {
        id: "personal-budget",
        title: "Build a personal budget",
        category: TaskCategory::Personal,
        funding_amount: 50,
        time_estimate: "30 min",
        icon: "wallet",
    },
    SeedTask {
        id: "mission-statement",
        title: "Write your mission statement",
        category: TaskCategory::Mission,
        funding_amount: 50,
        time_estimate: "20 min",
        icon: "target",
    },
    SeedTask {
        id: "community-map",
        title: "Map your community assets",
        category: TaskCategory::Community,
        funding_amount: 50,
        time_estimate: "45 min",
        icon: "map",
    },
    SeedTask {
        id: "cultural-story",
        title: "Record a cultural story",
        category: TaskCategory::Cultural,
        funding_amount: 50,
        time_estimate: "1 hour",
        icon: "feather",
    },
    SeedTask {
        id: "bookkeeping-basics",
        title: "Learn bookkeeping basics",
        category: TaskCategory::Finances,
        funding_amount: 50,
        time_estimate: "1 hour",
        icon: "calculator",
    },
    SeedTask {
        id: "customer-interviews",
        title: "Interview five customers",
        category: TaskCategory::Marketing,
        funding_amount: 50,
        time_estimate: "2 hours",
        icon: "megaphone",
    },
    SeedTask {
        id: "business-model",
        title: "Sketch your business model",
        category: TaskCategory::Business,
        funding_amount: 100,
        time_estimate: "1 hour",
        icon: "briefcase",
    },
    SeedTask {
        id: "project-plan",
        title: "Plan your first project",
        category: TaskCategory::Project,
        funding_amount: 100,
        time_estimate: "90 min",
        icon: "clipboard",
    },
    SeedTask {
        id: "operations-checklist",
        title: "Set up an operations checklist",
        category: TaskCategory::Operations,
        funding_amount: 100,
        time_estimate: "45 min",
        icon: "settings",
    },
    SeedTask {
        id: "launch-pitch",
        title: "Pitch your venture",
        category: TaskCategory::Business,
        funding_amount: 300,
        time_estimate: "3 hours",
        icon: "rocket",
    },
];

/// Returns the built-in catalog in display order.
///
/// # Panics
/// - When a seed id is not a valid slug; seeds are compile-time constants.
pub fn default_tasks() -> Vec<Task> {
    SEED_TASKS
        .iter()
        .map(|seed| {
            let id = TaskId::parse(seed.id).expect("seed task ids are valid slugs");
            Task::new(id, seed.title, seed.category, seed.funding_amount)
                .with_time_estimate(seed.time_estimate)
                .with_icon(seed.icon)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{default_tasks, SEED_TASKS};
    use crate::model::task::TaskId;
    use std::collections::HashSet;

    #[test]
    fn every_seed_id_parses_and_is_unique() {
        for seed in SEED_TASKS {
            assert!(TaskId::parse(seed.id).is_ok(), "bad seed id {}", seed.id);
        }
        let tasks = default_tasks();
        assert_eq!(tasks.len(), SEED_TASKS.len());
        let ids: HashSet<_> = tasks.iter().map(|t| t.id.clone()).collect();
        assert_eq!(ids.len(), tasks.len());
    }

    #[test]
    fn catalog_totals_nine_hundred_dollars() {
        let total: u64 = default_tasks().iter().map(|t| t.funding_amount).sum();
        assert_eq!(total, 900);
    }
}
