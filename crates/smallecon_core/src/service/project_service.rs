//! Project use-case service.

use crate::model::project::{Project, ProjectId, ProjectStatus};
use crate::model::task::TaskId;
use crate::progress::percent;
use crate::progress::tasks::saturating_total;
use crate::store::{Action, EntityKind, Store, StoreError, Transition};
use log::info;

/// Input collected by the project form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectRequest {
    pub name: String,
    pub description: String,
    pub task_ids: Vec<TaskId>,
    pub budget_cents: u64,
}

/// Project operations over a caller-owned store.
pub struct ProjectService<'s> {
    store: &'s mut Store,
}

impl<'s> ProjectService<'s> {
    pub fn new(store: &'s mut Store) -> Self {
        Self { store }
    }

    /// Creates a project in `planning` status. Duplicate task links are dropped.
    pub fn create_project(&mut self, request: CreateProjectRequest) -> Result<ProjectId, StoreError> {
        let mut project = Project::new(request.name.trim());
        project.description = request.description.trim().to_string();
        project.budget_cents = request.budget_cents;
        for task_id in request.task_ids {
            if !project.task_ids.contains(&task_id) {
                project.task_ids.push(task_id);
            }
        }

        let id = project.id;
        self.store.dispatch(Action::AddProject(project))?;
        info!("event=project_create module=service status=ok project_id={id}");
        Ok(id)
    }

    pub fn set_status(
        &mut self,
        id: ProjectId,
        status: ProjectStatus,
    ) -> Result<Transition, StoreError> {
        let mut project = self
            .store
            .project(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                kind: EntityKind::Project,
                id: id.to_string(),
            })?;
        project.status = status;
        self.store.dispatch(Action::UpdateProject(project))
    }

    pub fn remove_project(&mut self, id: ProjectId) -> Result<(), StoreError> {
        self.store.dispatch(Action::RemoveProject(id))?;
        Ok(())
    }

    pub fn get_project(&self, id: ProjectId) -> Option<&Project> {
        self.store.project(id)
    }

    /// Completed share of linked tasks; ids outside the catalog count as pending.
    /// `None` for an unknown project.
    pub fn progress_percent(&self, id: ProjectId) -> Option<u32> {
        let project = self.store.project(id)?;
        let progress = self.store.progress();
        let done = project
            .task_ids
            .iter()
            .filter(|task_id| {
                self.store.task(task_id).is_some() && progress.is_completed(task_id)
            })
            .count();
        Some(percent(done as u64, project.task_ids.len() as u64))
    }

    /// Dollars unlocked by the project's completed, known tasks; saturates at `u64::MAX`.
    pub fn unlocked_funding(&self, id: ProjectId) -> Option<u64> {
        let project = self.store.project(id)?;
        let progress = self.store.progress();
        Some(saturating_total(
            project
                .task_ids
                .iter()
                .filter(|task_id| progress.is_completed(task_id))
                .filter_map(|task_id| self.store.task(task_id)),
        ))
    }
}
