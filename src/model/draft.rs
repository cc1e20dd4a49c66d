use chrono::NaiveDate;

use super::project::{format_stored_date, Project, ProjectFields, ProjectStatus};

/// Whether submitting the draft creates a project or updates an existing one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DraftMode {
    #[default]
    New,
    Editing(String),
}

/// A form field that must be filled before the draft can be submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    Title,
    TechStack,
    DueDate,
    Status,
}

impl RequiredField {
    pub fn label(&self) -> &'static str {
        match self {
            RequiredField::Title => "Project Title",
            RequiredField::TechStack => "Technology Stack",
            RequiredField::DueDate => "Due Date",
            RequiredField::Status => "Status",
        }
    }
}

/// The form's in-progress project values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Draft {
    pub mode: DraftMode,
    pub title: String,
    pub description: String,
    pub tech_stack: String,
    pub due_date: Option<NaiveDate>,
    /// `None` is the "Select Status" placeholder.
    pub status: Option<ProjectStatus>,
}

impl Draft {
    /// Load a stored project into the form for editing.
    ///
    /// A status string outside the known set leaves the status unselected.
    pub fn editing(project: &Project) -> Self {
        Self {
            mode: DraftMode::Editing(project.id.clone()),
            title: project.title.clone(),
            description: project.description.clone(),
            tech_stack: project.tech_stack.clone(),
            due_date: project.due_date_value(),
            status: project.status_value(),
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, DraftMode::Editing(_))
    }

    pub fn heading(&self) -> &'static str {
        if self.is_editing() {
            "Edit Project"
        } else {
            "Add New Project"
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_editing() {
            "Update Project"
        } else {
            "Add Project"
        }
    }

    pub fn missing_fields(&self) -> Vec<RequiredField> {
        let mut missing = Vec::new();
        if self.title.is_empty() {
            missing.push(RequiredField::Title);
        }
        if self.tech_stack.is_empty() {
            missing.push(RequiredField::TechStack);
        }
        if self.due_date.is_none() {
            missing.push(RequiredField::DueDate);
        }
        if self.status.is_none() {
            missing.push(RequiredField::Status);
        }
        missing
    }

    /// The stored fields for this draft, everything except the id.
    pub fn to_fields(&self) -> Result<ProjectFields, Vec<RequiredField>> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(missing);
        }
        Ok(ProjectFields {
            title: self.title.clone(),
            description: self.description.clone(),
            tech_stack: self.tech_stack.clone(),
            due_date: self.due_date.map(format_stored_date),
            status: self
                .status
                .map(|s| s.label().to_string())
                .unwrap_or_default(),
        })
    }
}
