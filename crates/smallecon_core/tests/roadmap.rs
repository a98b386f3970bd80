use smallecon_core::catalog::default_tasks;
use smallecon_core::{
    current_phase, phase_for, roadmap, Persona, Phase, TaskCategory, TaskId, TaskProgress,
};
use std::collections::BTreeSet;

fn ids(slugs: &[&str]) -> BTreeSet<TaskId> {
    slugs.iter().map(|slug| TaskId::parse(slug).unwrap()).collect()
}

#[test]
fn every_persona_yields_five_ordered_buckets_covering_the_catalog() {
    let tasks = default_tasks();
    let completed = BTreeSet::new();
    let progress = TaskProgress::new(&tasks, &completed);

    for persona in Persona::ALL {
        let buckets = roadmap(persona, &progress);
        let phases: Vec<Phase> = buckets.iter().map(|bucket| bucket.phase).collect();
        assert_eq!(phases, Phase::ALL.to_vec());

        let assigned: usize = buckets.iter().map(|bucket| bucket.tasks.len()).sum();
        assert_eq!(assigned, tasks.len(), "persona {persona}");
    }
}

#[test]
fn phase_assignment_differs_by_persona() {
    for persona in Persona::ALL {
        assert_eq!(
            phase_for(persona, TaskCategory::Community),
            Phase::Community
        );
    }
    assert_eq!(
        phase_for(Persona::Individual, TaskCategory::Business),
        Phase::Launch
    );
    assert_eq!(
        phase_for(Persona::Entrepreneur, TaskCategory::Business),
        Phase::Skills
    );
    assert_eq!(
        phase_for(Persona::CommunityBuilder, TaskCategory::Mission),
        Phase::Foundation
    );
    assert_eq!(
        phase_for(Persona::Individual, TaskCategory::Marketing),
        Phase::Growth
    );
}

#[test]
fn entrepreneur_buckets_and_current_phase_follow_completion() {
    let tasks = default_tasks();
    let completed = ids(&["personal-budget", "mission-statement", "bookkeeping-basics"]);
    let progress = TaskProgress::new(&tasks, &completed);

    let buckets = roadmap(Persona::Entrepreneur, &progress);
    let foundation = &buckets[0];
    assert_eq!(foundation.tasks.len(), 2);
    assert!(foundation.is_complete());
    assert_eq!(foundation.percent, 100);

    let skills = &buckets[1];
    assert_eq!(skills.tasks.len(), 3);
    assert_eq!(skills.completed_count, 1);
    assert_eq!(skills.percent, 33);

    assert_eq!(current_phase(&buckets), Some(Phase::Skills));
}

#[test]
fn current_phase_is_none_once_everything_is_done() {
    let tasks = default_tasks();
    let completed: BTreeSet<TaskId> = tasks.iter().map(|task| task.id.clone()).collect();
    let progress = TaskProgress::new(&tasks, &completed);

    let buckets = roadmap(Persona::Individual, &progress);
    assert!(buckets.iter().all(|bucket| bucket.is_complete()));
    assert_eq!(current_phase(&buckets), None);
}

#[test]
fn persona_parses_dashed_and_underscored_names() {
    assert_eq!(
        "community-builder".parse::<Persona>().unwrap(),
        Persona::CommunityBuilder
    );
    assert_eq!(
        "community_builder".parse::<Persona>().unwrap(),
        Persona::CommunityBuilder
    );
    assert!("mayor".parse::<Persona>().is_err());
}
