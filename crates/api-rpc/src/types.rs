//! RPC Request/Response Types
//!
//! Wire DTOs are camelCase and carry names only; database ids never leave the
//! service.

use chrono::NaiveDate;
use roster_core::domain::{Employee, EmployeeDraft, EmployeeId};
use serde::{Deserialize, Serialize};

/// Employee as seen by clients (`employee.add.v1` / `employee.update.v1` params,
/// `employee.get.v1` / `employee.list.v1` results)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDto {
    pub first_name: String,
    pub last_name: String,
    pub code: String,
    #[serde(with = "date_of_birth")]
    pub date_of_birth: NaiveDate,
    #[serde(default)]
    pub details: Option<EmployeeDetailsDto>,
    #[serde(default)]
    pub projects: Vec<NamedDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeDetailsDto {
    pub department: NamedDto,
    pub designation: NamedDto,
}

/// `{ "name": ... }` wrapper used for departments, designations and projects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedDto {
    pub name: String,
}

impl NamedDto {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl From<Employee> for EmployeeDto {
    fn from(employee: Employee) -> Self {
        let details = match (employee.department_name(), employee.designation_name()) {
            (Some(department), Some(designation)) => Some(EmployeeDetailsDto {
                department: NamedDto::new(department),
                designation: NamedDto::new(designation),
            }),
            _ => None,
        };

        Self {
            first_name: employee.first_name,
            last_name: employee.last_name,
            code: employee.code,
            date_of_birth: employee.date_of_birth,
            details,
            projects: employee
                .projects
                .into_iter()
                .map(|p| NamedDto { name: p.name })
                .collect(),
        }
    }
}

/// Missing details become blank names, which draft validation rejects.
impl From<EmployeeDto> for EmployeeDraft {
    fn from(dto: EmployeeDto) -> Self {
        let (department, designation) = match dto.details {
            Some(details) => (details.department.name, details.designation.name),
            None => (String::new(), String::new()),
        };

        Self {
            first_name: dto.first_name,
            last_name: dto.last_name,
            code: dto.code,
            date_of_birth: dto.date_of_birth,
            department,
            designation,
            projects: dto.projects.into_iter().map(|p| p.name).collect(),
        }
    }
}

/// employee.get.v1 / employee.delete.v1
#[derive(Debug, Deserialize)]
pub struct CodeRequest {
    pub code: String,
}

/// employee.add.v1
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddEmployeeResponse {
    pub id: EmployeeId,
    pub code: String,
}

/// employee.update.v1
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateEmployeeResponse {
    pub code: String,
    pub updated: bool,
}

/// employee.delete.v1
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteEmployeeResponse {
    pub code: String,
    pub deleted: bool,
}

/// Written as `YYYY-MM-DD`. Read from `YYYY-MM-DD` or an RFC 3339 timestamp,
/// keeping only the calendar date.
mod date_of_birth {
    use chrono::{DateTime, NaiveDate};
    use serde::{de, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&raw, FORMAT)
            .or_else(|_| DateTime::parse_from_rfc3339(&raw).map(|dt| dt.date_naive()))
            .map_err(|_| de::Error::custom(format!("invalid dateOfBirth '{}'", raw)))
    }
}
