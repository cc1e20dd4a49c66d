use serde::{Deserialize, Serialize};

use super::project::{Project, ProjectStatus};

/// Which projects the table shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    pub fn all() -> &'static [Filter] {
        &[Filter::All, Filter::Active, Filter::Completed]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Active => "Active",
            Filter::Completed => "Completed",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::all().iter().copied().find(|f| f.label() == label)
    }

    pub fn matches(&self, project: &Project) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => project.status == ProjectStatus::InProgress.label(),
            Filter::Completed => project.status == ProjectStatus::Completed.label(),
        }
    }

    pub fn apply<'a>(&self, projects: &'a [Project]) -> Vec<&'a Project> {
        projects.iter().filter(|p| self.matches(p)).collect()
    }
}

/// Filter by label. An unrecognized label matches nothing.
pub fn filter_by_label<'a>(projects: &'a [Project], label: &str) -> Vec<&'a Project> {
    match Filter::from_label(label) {
        Some(filter) => filter.apply(projects),
        None => Vec::new(),
    }
}
