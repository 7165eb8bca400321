// ── Entity drafts ──
//
// Text-field drafts for the create/edit forms. `build()` checks the same
// rules the dashboard forms enforce and produces the wire entity; every
// problem found is reported at once.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Utc};
use hrdash_api::{Department, Dependent, Employee, Project, ProjectMember};
use regex::Regex;
use serde_json::Number;

use crate::error::CoreError;

static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+$").expect("digits regex"));
static SSN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{9}$").expect("ssn regex"));

/// Accumulates field errors for one form.
#[derive(Default)]
struct Problems(Vec<String>);

impl Problems {
    fn number(&mut self, value: &str, message: &str) -> Option<i64> {
        let value = value.trim();
        match DIGITS.is_match(value).then(|| value.parse::<i64>().ok()).flatten() {
            Some(n) => Some(n),
            None => {
                self.0.push(message.to_owned());
                None
            }
        }
    }

    fn optional_number(&mut self, value: Option<&str>, message: &str) -> Option<i64> {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(v) => self.number(v, message),
            None => None,
        }
    }

    fn required(&mut self, value: &str, message: &str) -> String {
        let value = value.trim();
        if value.is_empty() {
            self.0.push(message.to_owned());
        }
        value.to_owned()
    }

    fn date(&mut self, value: Option<&str>, message: &str) -> Option<String> {
        let value = value.map(str::trim).filter(|v| !v.is_empty())?;
        let parsed = iso_timestamp(value);
        if parsed.is_none() {
            self.0.push(message.to_owned());
        }
        parsed
    }

    fn finish<T>(self, value: T) -> Result<T, CoreError> {
        if self.0.is_empty() {
            Ok(value)
        } else {
            Err(CoreError::validation(self.0.join("; ")))
        }
    }
}

/// Render a date as an ISO-8601 UTC timestamp with milliseconds.
///
/// Accepts `YYYY-MM-DD` (taken as midnight UTC) or an RFC 3339 timestamp.
pub fn iso_timestamp(value: &str) -> Option<String> {
    let value = value.trim();
    let instant = if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        date.and_time(NaiveTime::MIN).and_utc()
    } else {
        DateTime::parse_from_rfc3339(value).ok()?.with_timezone(&Utc)
    };
    Some(instant.to_rfc3339_opts(SecondsFormat::Millis, true))
}

// ── Department ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepartmentForm {
    pub dnum: String,
    pub dname: String,
    pub supervisor_ssn: String,
    pub supervisor_start_date: Option<String>,
}

impl DepartmentForm {
    pub fn build(&self) -> Result<Department, CoreError> {
        let mut problems = Problems::default();
        let dnum = problems.number(&self.dnum, "Department Number must be a valid number");
        let supervisor_ssn =
            problems.number(&self.supervisor_ssn, "Supervisor SSN must be a valid number");
        let start = problems.date(
            self.supervisor_start_date.as_deref(),
            "Supervisor start date must be YYYY-MM-DD",
        );

        let mut department = Department::new(dnum.unwrap_or_default(), self.dname.trim());
        department.supervisor_ssn = supervisor_ssn;
        department.supervisor_start_date = start;
        problems.finish(department)
    }
}

// ── Employee ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeForm {
    pub ssn: String,
    pub full_name: String,
    pub birthdate: String,
    pub address: Option<String>,
    pub sex: Option<String>,
    pub salary: String,
    pub manager_ssn: Option<String>,
    pub department_number: Option<String>,
}

impl EmployeeForm {
    pub fn build(&self) -> Result<Employee, CoreError> {
        let mut problems = Problems::default();

        let ssn = if SSN.is_match(self.ssn.trim()) {
            self.ssn.trim().parse::<i64>().ok()
        } else {
            problems.0.push("SSN must be 9 digits".into());
            None
        };
        let full_name = problems.required(&self.full_name, "Full name is required");
        let birthdate = if self.birthdate.trim().is_empty() {
            problems.0.push("Valid birthdate is required".into());
            None
        } else {
            problems.date(Some(&self.birthdate), "Valid birthdate is required")
        };
        let salary = problems
            .number(&self.salary, "Valid salary is required")
            .map(Number::from);
        let manager_ssn =
            problems.optional_number(self.manager_ssn.as_deref(), "Manager SSN must be numeric");
        let department_number = problems.optional_number(
            self.department_number.as_deref(),
            "Department number must be numeric",
        );

        let mut employee = Employee::new(ssn.unwrap_or_default(), full_name);
        employee.birthdate = birthdate;
        employee.address = self.address.clone();
        employee.sex = self.sex.clone();
        employee.salary = salary;
        employee.manager_ssn = manager_ssn;
        employee.department_number = department_number;
        problems.finish(employee)
    }
}

// ── Project ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectForm {
    pub project_id: String,
    pub project_name: String,
    pub location: Option<String>,
    pub city: Option<String>,
    pub department_number: String,
    /// SSNs of assigned employees.
    pub employees: Vec<String>,
}

impl ProjectForm {
    pub fn build(&self) -> Result<Project, CoreError> {
        let mut problems = Problems::default();
        let project_id = problems.number(&self.project_id, "Valid Project ID is required");
        let project_name = problems.required(&self.project_name, "Project name is required");
        let department_number =
            problems.number(&self.department_number, "Valid Department number is required");
        let employees = self
            .employees
            .iter()
            .filter_map(|ssn| problems.number(ssn, &format!("Employee SSN {ssn:?} must be numeric")))
            .map(ProjectMember::from)
            .collect();

        let mut project = Project::new(project_id.unwrap_or_default(), project_name);
        project.location = self.location.clone();
        project.city = self.city.clone();
        project.department_number = department_number;
        project.employees = employees;
        problems.finish(project)
    }
}

// ── Dependent ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependentForm {
    pub employee_ssn: String,
    pub dependent_name: String,
    pub sex: Option<String>,
    pub bdate: Option<String>,
}

impl DependentForm {
    pub fn build(&self) -> Result<Dependent, CoreError> {
        let mut problems = Problems::default();
        let employee_ssn = problems.number(&self.employee_ssn, "Employee SSN must be numeric");
        let dependent_name = problems.required(&self.dependent_name, "Dependent name is required");
        let bdate = problems.date(self.bdate.as_deref(), "Birth date must be YYYY-MM-DD");

        let mut dependent = Dependent::new(employee_ssn.unwrap_or_default(), dependent_name);
        dependent.sex = self.sex.clone();
        dependent.bdate = bdate;
        problems.finish(dependent)
    }
}
