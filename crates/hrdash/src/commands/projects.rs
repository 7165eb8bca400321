//! Project command handlers.

use tabled::Tabled;

use hrdash_core::{Dashboard, Project, ProjectForm};

use crate::cli::{GlobalOpts, ProjectFields, ProjectsArgs, ProjectsCommand};
use crate::error::CliError;

use super::resources::{self, Listing};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
pub struct ProjectRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Dept")]
    department: String,
    #[tabled(rename = "Staff")]
    staff: usize,
}

impl Listing for Project {
    type Row = ProjectRow;

    fn row(&self) -> ProjectRow {
        let location = match (self.location.as_deref(), self.city.as_deref()) {
            (Some(place), Some(city)) => format!("{place}, {city}"),
            (Some(only), None) | (None, Some(only)) => only.to_owned(),
            (None, None) => String::new(),
        };
        ProjectRow {
            id: self.project_id,
            name: self.project_name.clone(),
            location,
            department: self
                .department_number
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            staff: self.employees.len(),
        }
    }
}

impl From<&ProjectFields> for ProjectForm {
    fn from(f: &ProjectFields) -> Self {
        Self {
            project_id: f.id.clone().unwrap_or_default(),
            project_name: f.name.clone().unwrap_or_default(),
            location: f.location.clone(),
            city: f.city.clone(),
            department_number: f.department.clone().unwrap_or_default(),
            employees: f.employees.clone(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    dashboard: &Dashboard,
    args: ProjectsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let projects = dashboard.projects();
    match args.command {
        ProjectsCommand::List(page) => resources::list(&projects, &page, global).await,
        ProjectsCommand::Search(search) => resources::search(&projects, &search, global).await,
        ProjectsCommand::Create(fields) => {
            let project = ProjectForm::from(&fields).build()?;
            resources::create(&projects, &project, global).await
        }
        ProjectsCommand::Update { fields, from_file } => {
            let project = match from_file {
                Some(path) => resources::from_file::<Project>(&path)?,
                None => ProjectForm::from(&fields).build()?,
            };
            resources::update(&projects, &project, global).await
        }
        ProjectsCommand::Delete { id } => resources::delete(&projects, &id, global).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_joins_place_and_city() {
        let mut project = Project::new(3, "Apollo");
        project.location = Some("Building 4".into());
        project.city = Some("Houston".into());
        assert_eq!(project.row().location, "Building 4, Houston");

        project.location = None;
        assert_eq!(project.row().location, "Houston");
    }
}
