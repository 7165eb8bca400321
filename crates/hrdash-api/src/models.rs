// Wire models for the four entity families.
//
// Schemas are owned by the server. Each model names the fields the
// dashboard reads and keeps everything else in `extra`. A record the
// server sends in full (nulls included) serializes back unchanged; a
// named field the server left out comes back as `null`.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::resource::{Resource, ResourceKey, ResourceKind};

// ── Department ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub dnum: i64,
    #[serde(default)]
    pub dname: String,
    #[serde(default)]
    pub supervisor_ssn: Option<i64>,
    /// Date the current supervisor took over.
    #[serde(rename = "mgsStartDate", default)]
    pub supervisor_start_date: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub created_date: Option<String>,
    #[serde(default)]
    pub modified_by: Option<String>,
    #[serde(default)]
    pub modified_date: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Department {
    pub fn new(dnum: i64, dname: impl Into<String>) -> Self {
        Self {
            dnum,
            dname: dname.into(),
            supervisor_ssn: None,
            supervisor_start_date: None,
            created_by: None,
            created_date: None,
            modified_by: None,
            modified_date: None,
            extra: Map::new(),
        }
    }
}

impl Resource for Department {
    type Key = i64;

    const KIND: ResourceKind = ResourceKind::Department;
    const PATH: &'static str = "departments";
    const LIST_KEY: &'static str = "departments";
    const PAGE_PARAM: &'static str = "pageNumber";
    const SEARCH_FIELDS: &'static [&'static str] = &[
        "dnum",
        "dname",
        "supervisorSsn",
        "employeeName",
        "projectName",
        "supervisorName",
    ];

    fn key(&self) -> i64 {
        self.dnum
    }
}

// ── Employee ─────────────────────────────────────────────────────────

/// Employee records use snake_case on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub ssn: i64,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub birthdate: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub sex: Option<String>,
    /// Kept as a JSON number so the server's representation survives.
    #[serde(default)]
    pub salary: Option<Number>,
    #[serde(default)]
    pub manager_ssn: Option<i64>,
    #[serde(default)]
    pub department_number: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Employee {
    pub fn new(ssn: i64, full_name: impl Into<String>) -> Self {
        Self {
            ssn,
            full_name: full_name.into(),
            birthdate: None,
            address: None,
            sex: None,
            salary: None,
            manager_ssn: None,
            department_number: None,
            extra: Map::new(),
        }
    }
}

impl Resource for Employee {
    type Key = i64;

    const KIND: ResourceKind = ResourceKind::Employee;
    const PATH: &'static str = "employees";
    const LIST_KEY: &'static str = "employees";
    const PAGE_PARAM: &'static str = "pageNum";
    const SEARCH_FIELDS: &'static [&'static str] = &[
        "ssn",
        "full_name",
        "address",
        "sex",
        "salary",
        "department_number",
    ];

    fn key(&self) -> i64 {
        self.ssn
    }
}

// ── Project ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub project_id: i64,
    #[serde(default)]
    pub project_name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub department_number: Option<i64>,
    #[serde(default)]
    pub employees: Vec<ProjectMember>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An employee assigned to a project, referenced by SSN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectMember {
    pub ssn: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<i64> for ProjectMember {
    fn from(ssn: i64) -> Self {
        Self {
            ssn,
            extra: Map::new(),
        }
    }
}

impl Project {
    pub fn new(project_id: i64, project_name: impl Into<String>) -> Self {
        Self {
            project_id,
            project_name: project_name.into(),
            location: None,
            city: None,
            department_number: None,
            employees: Vec::new(),
            extra: Map::new(),
        }
    }
}

impl Resource for Project {
    type Key = i64;

    const KIND: ResourceKind = ResourceKind::Project;
    const PATH: &'static str = "projects";
    const LIST_KEY: &'static str = "projects";
    const PAGE_PARAM: &'static str = "pageNum";
    const SEARCH_FIELDS: &'static [&'static str] = &[
        "projectId",
        "projectName",
        "location",
        "city",
        "departmentNumber",
    ];

    fn key(&self) -> i64 {
        self.project_id
    }
}

// ── Dependent ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dependent {
    pub employee_ssn: i64,
    pub dependent_name: String,
    #[serde(default)]
    pub sex: Option<String>,
    #[serde(default)]
    pub bdate: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Dependent {
    pub fn new(employee_ssn: i64, dependent_name: impl Into<String>) -> Self {
        Self {
            employee_ssn,
            dependent_name: dependent_name.into(),
            sex: None,
            bdate: None,
            extra: Map::new(),
        }
    }
}

/// Dependents are identified by the owning employee plus their name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DependentKey {
    pub employee_ssn: i64,
    pub dependent_name: String,
}

impl fmt::Display for DependentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.employee_ssn, self.dependent_name)
    }
}

impl ResourceKey for DependentKey {
    fn path_segments(&self) -> Vec<String> {
        vec![self.employee_ssn.to_string(), self.dependent_name.clone()]
    }
}

impl Resource for Dependent {
    type Key = DependentKey;

    const KIND: ResourceKind = ResourceKind::Dependent;
    const PATH: &'static str = "dependents";
    const LIST_KEY: &'static str = "dependents";
    const PAGE_PARAM: &'static str = "pageNum";
    const SEARCH_FIELDS: &'static [&'static str] = &["employeeSsn", "dependentName"];

    fn key(&self) -> DependentKey {
        DependentKey {
            employee_ssn: self.employee_ssn,
            dependent_name: self.dependent_name.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn employee_uses_snake_case() {
        let raw = json!({
            "ssn": 123_456_789,
            "full_name": "Ada Lovelace",
            "birthdate": "1990-12-10T00:00:00.000Z",
            "address": "12 Analytical Way",
            "sex": "F",
            "salary": 50000,
            "manager_ssn": null,
            "department_number": 5,
            "departmentName": "Research"
        });
        let emp: Employee = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(emp.key(), 123_456_789);
        assert_eq!(emp.salary, Some(Number::from(50000)));
        assert_eq!(emp.extra.get("departmentName"), Some(&json!("Research")));
        assert_eq!(serde_json::to_value(&emp).unwrap(), raw);
    }

    #[test]
    fn project_members_are_ssn_refs() {
        let raw = json!({
            "projectId": 3,
            "projectName": "Apollo",
            "location": "HQ",
            "city": "Houston",
            "departmentNumber": 5,
            "employees": [{ "ssn": 1 }, { "ssn": 2 }]
        });
        let project: Project = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(project.employees, vec![ProjectMember::from(1), ProjectMember::from(2)]);
        assert_eq!(serde_json::to_value(&project).unwrap(), raw);
    }

    #[test]
    fn department_start_date_keeps_wire_name() {
        let mut dept = Department::new(4, "Admin");
        dept.supervisor_start_date = Some("2021-03-01".into());
        let value = serde_json::to_value(&dept).unwrap();
        assert_eq!(value["mgsStartDate"], json!("2021-03-01"));
        assert_eq!(value["dname"], json!("Admin"));
    }

    #[test]
    fn omitted_named_fields_serialize_as_null() {
        let dept: Department = serde_json::from_value(json!({ "dnum": 4, "dname": "Admin" })).unwrap();
        let value = serde_json::to_value(&dept).unwrap();
        assert_eq!(value["createdBy"], Value::Null);
        assert_eq!(value["mgsStartDate"], Value::Null);
        assert_eq!(value.as_object().map(Map::len), Some(8));
    }

    #[test]
    fn dependent_key_is_composite() {
        let dep = Dependent::new(123_456_789, "Alice");
        let key = dep.key();
        assert_eq!(key.to_string(), "123456789/Alice");
        assert_eq!(key.path_segments(), vec!["123456789".to_owned(), "Alice".to_owned()]);
    }
}
