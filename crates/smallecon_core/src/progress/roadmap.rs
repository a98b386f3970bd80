//! Persona roadmap: task categories bucketed into five ordered phases.

use super::percent;
use super::tasks::TaskProgress;
use crate::model::task::{Task, TaskCategory};
use crate::model::ModelValidationError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Foundation,
    Skills,
    Community,
    Launch,
    Growth,
}

impl Phase {
    /// Phases in roadmap order.
    pub const ALL: [Phase; 5] = [
        Self::Foundation,
        Self::Skills,
        Self::Community,
        Self::Launch,
        Self::Growth,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Foundation => "foundation",
            Self::Skills => "skills",
            Self::Community => "community",
            Self::Launch => "launch",
            Self::Growth => "growth",
        }
    }
}

impl Display for Phase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Learner profile selecting which phase map applies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Persona {
    Individual,
    CommunityBuilder,
    #[default]
    Entrepreneur,
}

impl Persona {
    pub const ALL: [Persona; 3] = [
        Self::Individual,
        Self::CommunityBuilder,
        Self::Entrepreneur,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Individual => "individual",
            Self::CommunityBuilder => "community_builder",
            Self::Entrepreneur => "entrepreneur",
        }
    }
}

impl Display for Persona {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Persona {
    type Err = ModelValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|persona| persona.as_str() == normalized)
            .ok_or(ModelValidationError::UnknownVariant {
                kind: "persona",
                value: normalized,
            })
    }
}

/// Constant phase assignment for one category under one persona.
pub fn phase_for(persona: Persona, category: TaskCategory) -> Phase {
    use TaskCategory as C;

    match persona {
        Persona::Individual => match category {
            C::Personal | C::Finances => Phase::Foundation,
            C::Cultural | C::Mission => Phase::Skills,
            C::Community => Phase::Community,
            C::Project | C::Business => Phase::Launch,
            C::Operations | C::Marketing => Phase::Growth,
        },
        Persona::CommunityBuilder => match category {
            C::Mission | C::Cultural => Phase::Foundation,
            C::Personal | C::Finances => Phase::Skills,
            C::Community => Phase::Community,
            C::Project => Phase::Launch,
            C::Business | C::Operations | C::Marketing => Phase::Growth,
        },
        Persona::Entrepreneur => match category {
            C::Personal | C::Mission => Phase::Foundation,
            C::Finances | C::Business => Phase::Skills,
            C::Community | C::Cultural => Phase::Community,
            C::Project | C::Marketing => Phase::Launch,
            C::Operations => Phase::Growth,
        },
    }
}

/// Tasks assigned to one phase plus their completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseBucket<'a> {
    pub phase: Phase,
    pub tasks: Vec<&'a Task>,
    pub completed_count: usize,
    pub percent: u32,
}

impl PhaseBucket<'_> {
    pub fn is_complete(&self) -> bool {
        self.completed_count == self.tasks.len()
    }
}

/// Builds all five buckets in phase order; empty phases are kept.
pub fn roadmap<'a>(persona: Persona, progress: &TaskProgress<'a>) -> Vec<PhaseBucket<'a>> {
    let mut buckets: Vec<PhaseBucket<'a>> = Phase::ALL
        .into_iter()
        .map(|phase| PhaseBucket {
            phase,
            tasks: Vec::new(),
            completed_count: 0,
            percent: 0,
        })
        .collect();

    for task in progress.tasks() {
        let phase = phase_for(persona, task.category);
        let bucket = &mut buckets[phase as usize];
        bucket.tasks.push(task);
        if progress.is_completed(&task.id) {
            bucket.completed_count += 1;
        }
    }

    for bucket in &mut buckets {
        bucket.percent = percent(bucket.completed_count as u64, bucket.tasks.len() as u64);
    }
    buckets
}

/// First phase that still has pending tasks, or `None` when all are done.
pub fn current_phase(buckets: &[PhaseBucket<'_>]) -> Option<Phase> {
    buckets
        .iter()
        .find(|bucket| !bucket.is_complete())
        .map(|bucket| bucket.phase)
}
