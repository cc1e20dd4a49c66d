use crate::model::Project;
use std::path::Path;

/// Export projects to a semicolon-delimited CSV file.
///
/// Columns: Title ; Tech Stack ; Status ; Due Date ; Description
/// Due dates are written as YYYY-MM-DD, or left empty when absent.
/// Returns the number of projects written.
pub fn export_csv<'a>(
    projects: impl IntoIterator<Item = &'a Project>,
    path: &Path,
) -> Result<usize, String> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .from_path(path)
        .map_err(|e| format!("Failed to create CSV file: {}", e))?;

    wtr.write_record(["Title", "Tech Stack", "Status", "Due Date", "Description"])
        .map_err(|e| format!("Failed to write header: {}", e))?;

    let mut count = 0;
    for project in projects {
        let due = project
            .due_date_value()
            .map(crate::model::project::format_stored_date)
            .unwrap_or_default();
        wtr.write_record([
            &project.title,
            &project.tech_stack,
            &project.status,
            &due,
            &project.description,
        ])
        .map_err(|e| format!("Failed to write project '{}': {}", project.title, e))?;
        count += 1;
    }

    wtr.flush().map_err(|e| format!("Failed to flush CSV: {}", e))?;
    Ok(count)
}
