// Employee Domain Model

use super::error::{DomainError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Employee ID (SQLite rowid)
pub type EmployeeId = i64;

/// Row id of a department, designation or project
pub type ReferenceId = i64;

/// Employee aggregate: scalar fields plus owned details and associated projects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    /// Business key used for lookups
    pub code: String,
    pub date_of_birth: NaiveDate,

    /// `None` when the employee has no details row
    pub details: Option<EmployeeDetails>,

    /// Never `None`; empty when the employee has no project links
    pub projects: Vec<Project>,
}

impl Employee {
    /// Scalar-only employee with no details and no projects
    pub fn new(
        id: EmployeeId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        code: impl Into<String>,
        date_of_birth: NaiveDate,
    ) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            code: code.into(),
            date_of_birth,
            details: None,
            projects: Vec::new(),
        }
    }

    pub fn department_name(&self) -> Option<&str> {
        self.details
            .as_ref()
            .and_then(|d| d.department.as_ref())
            .map(|d| d.name.as_str())
    }

    pub fn designation_name(&self) -> Option<&str> {
        self.details
            .as_ref()
            .and_then(|d| d.designation.as_ref())
            .map(|d| d.name.as_str())
    }

    pub fn project_names(&self) -> Vec<&str> {
        self.projects.iter().map(|p| p.name.as_str()).collect()
    }
}

/// 1:1 details row keyed by employee id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeDetails {
    pub employee_id: EmployeeId,
    pub department_id: ReferenceId,
    pub designation_id: ReferenceId,
    pub department: Option<Department>,
    pub designation: Option<Designation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: ReferenceId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Designation {
    pub id: ReferenceId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ReferenceId,
    pub name: String,
}

/// Reference tables resolved by name (get-or-create)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReferenceKind {
    Department,
    Designation,
    Project,
}

impl ReferenceKind {
    /// Backing table name
    pub fn table(&self) -> &'static str {
        match self {
            ReferenceKind::Department => "departments",
            ReferenceKind::Designation => "designations",
            ReferenceKind::Project => "projects",
        }
    }
}

impl std::fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReferenceKind::Department => write!(f, "DEPARTMENT"),
            ReferenceKind::Designation => write!(f, "DESIGNATION"),
            ReferenceKind::Project => write!(f, "PROJECT"),
        }
    }
}

/// Write model for add/update. References are carried by name; ids are
/// resolved inside the write transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeDraft {
    pub first_name: String,
    pub last_name: String,
    pub code: String,
    pub date_of_birth: NaiveDate,
    pub department: String,
    pub designation: String,

    #[serde(default)]
    pub projects: Vec<String>,
}

impl EmployeeDraft {
    /// Reject blank fields before any statement is issued
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("code", &self.code),
            ("department", &self.department),
            ("designation", &self.designation),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(DomainError::BlankField(field));
            }
        }

        if let Some(pos) = self.projects.iter().position(|p| p.trim().is_empty()) {
            return Err(DomainError::BlankProjectName(pos));
        }

        Ok(())
    }

    /// Test helper: draft with fixed names and date
    #[cfg(any(test, feature = "test-util"))]
    pub fn new_test(code: &str, projects: &[&str]) -> Self {
        Self {
            first_name: "Test".to_string(),
            last_name: "Employee".to_string(),
            code: code.to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap_or_default(),
            department: "Development".to_string(),
            designation: "Engineer".to_string(),
            projects: projects.iter().map(|p| p.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_complete_draft() {
        let draft = EmployeeDraft::new_test("E001", &["Apollo"]);
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_code() {
        let mut draft = EmployeeDraft::new_test("E001", &[]);
        draft.code = "   ".to_string();
        assert_eq!(draft.validate(), Err(DomainError::BlankField("code")));
    }

    #[test]
    fn test_validate_rejects_blank_department() {
        let mut draft = EmployeeDraft::new_test("E001", &[]);
        draft.department = String::new();
        assert_eq!(draft.validate(), Err(DomainError::BlankField("department")));
    }

    #[test]
    fn test_validate_rejects_blank_project() {
        let draft = EmployeeDraft::new_test("E001", &["Apollo", ""]);
        assert_eq!(draft.validate(), Err(DomainError::BlankProjectName(1)));
    }

    #[test]
    fn test_reference_kind_tables() {
        assert_eq!(ReferenceKind::Department.table(), "departments");
        assert_eq!(ReferenceKind::Designation.table(), "designations");
        assert_eq!(ReferenceKind::Project.table(), "projects");
    }

    #[test]
    fn test_accessors_without_details() {
        let date = NaiveDate::from_ymd_opt(1985, 6, 15).unwrap();
        let employee = Employee::new(1, "Ada", "Lovelace", "E001", date);
        assert_eq!(employee.department_name(), None);
        assert_eq!(employee.designation_name(), None);
        assert!(employee.project_names().is_empty());
    }
}
