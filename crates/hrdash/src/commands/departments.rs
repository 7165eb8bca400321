//! Department command handlers.

use tabled::Tabled;

use hrdash_core::{Dashboard, Department, DepartmentForm};

use crate::cli::{DepartmentFields, DepartmentsArgs, DepartmentsCommand, GlobalOpts};
use crate::error::CliError;

use super::resources::{self, Listing};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
pub struct DepartmentRow {
    #[tabled(rename = "Number")]
    dnum: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Supervisor SSN")]
    supervisor: String,
    #[tabled(rename = "Since")]
    since: String,
}

impl Listing for Department {
    type Row = DepartmentRow;

    fn row(&self) -> DepartmentRow {
        DepartmentRow {
            dnum: self.dnum,
            name: self.dname.clone(),
            supervisor: self
                .supervisor_ssn
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            since: self
                .supervisor_start_date
                .as_deref()
                .map(date_only)
                .unwrap_or_default()
                .to_owned(),
        }
    }
}

/// `2022-01-01T00:00:00.000Z` -> `2022-01-01`.
pub(crate) fn date_only(timestamp: &str) -> &str {
    timestamp.split_once('T').map_or(timestamp, |(date, _)| date)
}

impl From<&DepartmentFields> for DepartmentForm {
    fn from(f: &DepartmentFields) -> Self {
        Self {
            dnum: f.dnum.clone().unwrap_or_default(),
            dname: f.name.clone().unwrap_or_default(),
            supervisor_ssn: f.supervisor_ssn.clone().unwrap_or_default(),
            supervisor_start_date: f.start_date.clone(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    dashboard: &Dashboard,
    args: DepartmentsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let departments = dashboard.departments();
    match args.command {
        DepartmentsCommand::List(page) => resources::list(&departments, &page, global).await,
        DepartmentsCommand::Search(search) => resources::search(&departments, &search, global).await,
        DepartmentsCommand::Create(fields) => {
            let department = DepartmentForm::from(&fields).build()?;
            resources::create(&departments, &department, global).await
        }
        DepartmentsCommand::Update { fields, from_file } => {
            let department = match from_file {
                Some(path) => resources::from_file::<Department>(&path)?,
                None => DepartmentForm::from(&fields).build()?,
            };
            resources::update(&departments, &department, global).await
        }
        DepartmentsCommand::Delete { dnum } => resources::delete(&departments, &dnum, global).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_are_trimmed_for_tables() {
        assert_eq!(date_only("2022-01-01T00:00:00.000Z"), "2022-01-01");
        assert_eq!(date_only("2022-01-01"), "2022-01-01");
    }

    #[test]
    fn row_from_department() {
        let mut department = Department::new(5, "Research");
        department.supervisor_ssn = Some(333_445_555);
        department.supervisor_start_date = Some("1988-05-22T00:00:00.000Z".into());

        let row = department.row();
        assert_eq!(row.dnum, 5);
        assert_eq!(row.supervisor, "333445555");
        assert_eq!(row.since, "1988-05-22");
        assert_eq!(department.id(), "5");
    }
}
