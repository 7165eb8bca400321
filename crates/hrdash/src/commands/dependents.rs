//! Dependent command handlers.

use tabled::Tabled;

use hrdash_core::{Dashboard, Dependent, DependentForm, DependentKey};

use crate::cli::{DependentFields, DependentsArgs, DependentsCommand, GlobalOpts};
use crate::error::CliError;

use super::departments::date_only;
use super::resources::{self, Listing};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
pub struct DependentRow {
    #[tabled(rename = "Employee SSN")]
    employee_ssn: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Sex")]
    sex: String,
    #[tabled(rename = "Born")]
    bdate: String,
}

impl Listing for Dependent {
    type Row = DependentRow;

    fn row(&self) -> DependentRow {
        DependentRow {
            employee_ssn: self.employee_ssn,
            name: self.dependent_name.clone(),
            sex: self.sex.clone().unwrap_or_default(),
            bdate: self.bdate.as_deref().map(date_only).unwrap_or_default().to_owned(),
        }
    }
}

impl From<&DependentFields> for DependentForm {
    fn from(f: &DependentFields) -> Self {
        Self {
            employee_ssn: f.employee_ssn.clone().unwrap_or_default(),
            dependent_name: f.name.clone().unwrap_or_default(),
            sex: f.sex.clone(),
            bdate: f.birthdate.clone(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    dashboard: &Dashboard,
    args: DependentsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let dependents = dashboard.dependents();
    match args.command {
        DependentsCommand::List(page) => resources::list(&dependents, &page, global).await,
        DependentsCommand::Search(search) => resources::search(&dependents, &search, global).await,
        DependentsCommand::Create(fields) => {
            let dependent = DependentForm::from(&fields).build()?;
            resources::create(&dependents, &dependent, global).await
        }
        DependentsCommand::Update { fields, from_file } => {
            let dependent = match from_file {
                Some(path) => resources::from_file::<Dependent>(&path)?,
                None => DependentForm::from(&fields).build()?,
            };
            resources::update(&dependents, &dependent, global).await
        }
        DependentsCommand::Delete { employee_ssn, name } => {
            let key = DependentKey {
                employee_ssn,
                dependent_name: name,
            };
            resources::delete(&dependents, &key, global).await
        }
    }
}
