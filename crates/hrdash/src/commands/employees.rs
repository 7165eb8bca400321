//! Employee command handlers.

use tabled::Tabled;

use hrdash_core::{Dashboard, Employee, EmployeeForm};

use crate::cli::{EmployeeFields, EmployeesArgs, EmployeesCommand, GlobalOpts};
use crate::error::CliError;

use super::departments::date_only;
use super::resources::{self, Listing};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
pub struct EmployeeRow {
    #[tabled(rename = "SSN")]
    ssn: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Born")]
    birthdate: String,
    #[tabled(rename = "Sex")]
    sex: String,
    #[tabled(rename = "Salary")]
    salary: String,
    #[tabled(rename = "Dept")]
    department: String,
}

impl Listing for Employee {
    type Row = EmployeeRow;

    fn row(&self) -> EmployeeRow {
        EmployeeRow {
            ssn: self.ssn,
            name: self.full_name.clone(),
            birthdate: self.birthdate.as_deref().map(date_only).unwrap_or_default().to_owned(),
            sex: self.sex.clone().unwrap_or_default(),
            salary: self.salary.as_ref().map(ToString::to_string).unwrap_or_default(),
            department: self
                .department_number
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
        }
    }
}

impl From<&EmployeeFields> for EmployeeForm {
    fn from(f: &EmployeeFields) -> Self {
        Self {
            ssn: f.ssn.clone().unwrap_or_default(),
            full_name: f.full_name.clone().unwrap_or_default(),
            birthdate: f.birthdate.clone().unwrap_or_default(),
            address: f.address.clone(),
            sex: f.sex.clone(),
            salary: f.salary.clone().unwrap_or_default(),
            manager_ssn: f.manager_ssn.clone(),
            department_number: f.department.clone(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    dashboard: &Dashboard,
    args: EmployeesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let employees = dashboard.employees();
    match args.command {
        EmployeesCommand::List(page) => resources::list(&employees, &page, global).await,
        EmployeesCommand::Search(search) => resources::search(&employees, &search, global).await,
        EmployeesCommand::Create(fields) => {
            let employee = EmployeeForm::from(&fields).build()?;
            resources::create(&employees, &employee, global).await
        }
        EmployeesCommand::Update { fields, from_file } => {
            let employee = match from_file {
                Some(path) => resources::from_file::<Employee>(&path)?,
                None => EmployeeForm::from(&fields).build()?,
            };
            resources::update(&employees, &employee, global).await
        }
        EmployeesCommand::Delete { ssn } => resources::delete(&employees, &ssn, global).await,
    }
}
