// Employee join query and row decoder

use chrono::NaiveDate;
use roster_core::domain::{
    Department, Designation, Employee, EmployeeDetails, EmployeeRow, Project,
};
use roster_core::port::EmployeeFilter;

/// Five-way left join; every column is aliased so the decoder reads by name.
const EMPLOYEES_SELECT: &str = r#"
    SELECT
        e.id AS employee_id,
        e.first_name AS first_name,
        e.last_name AS last_name,
        e.code AS code,
        e.date_of_birth AS date_of_birth,
        ed.employee_id AS details_employee_id,
        ed.department_id AS details_department_id,
        ed.designation_id AS details_designation_id,
        d.id AS department_id,
        d.name AS department_name,
        dsg.id AS designation_id,
        dsg.name AS designation_name,
        p.id AS project_id,
        p.name AS project_name
    FROM employees e
    LEFT JOIN employee_details ed ON e.id = ed.employee_id
    LEFT JOIN departments d ON d.id = ed.department_id
    LEFT JOIN designations dsg ON dsg.id = ed.designation_id
    LEFT JOIN employee_projects ep ON e.id = ep.employee_id
    LEFT JOIN projects p ON p.id = ep.project_id
"#;

/// Employees by id; projects in link insertion order
const EMPLOYEES_ORDER: &str = "ORDER BY e.id ASC, ep.rowid ASC";

/// Build the join SQL. `EmployeeFilter::Code` adds one `?` placeholder.
pub(crate) fn employees_sql(filter: &EmployeeFilter) -> String {
    match filter {
        EmployeeFilter::All => format!("{}{}", EMPLOYEES_SELECT, EMPLOYEES_ORDER),
        EmployeeFilter::Code(_) => {
            format!("{}WHERE e.code = ?\n{}", EMPLOYEES_SELECT, EMPLOYEES_ORDER)
        }
    }
}

/// SQLite row representation of one joined row
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct JoinedRow {
    // employees
    employee_id: i64,
    first_name: String,
    last_name: String,
    code: String,
    date_of_birth: NaiveDate,

    // employee_details (NULL on left-join miss)
    details_employee_id: Option<i64>,
    details_department_id: Option<i64>,
    details_designation_id: Option<i64>,

    // departments / designations / projects
    department_id: Option<i64>,
    department_name: Option<String>,
    designation_id: Option<i64>,
    designation_name: Option<String>,
    project_id: Option<i64>,
    project_name: Option<String>,
}

impl JoinedRow {
    /// Split the flat row into typed sub-records at the table boundaries
    pub(crate) fn into_parts(self) -> EmployeeRow {
        let employee = Employee::new(
            self.employee_id,
            self.first_name,
            self.last_name,
            self.code,
            self.date_of_birth,
        );

        let details = match (
            self.details_employee_id,
            self.details_department_id,
            self.details_designation_id,
        ) {
            (Some(employee_id), Some(department_id), Some(designation_id)) => {
                Some(EmployeeDetails {
                    employee_id,
                    department_id,
                    designation_id,
                    department: None,
                    designation: None,
                })
            }
            _ => None,
        };

        let department = self
            .department_id
            .zip(self.department_name)
            .map(|(id, name)| Department { id, name });
        let designation = self
            .designation_id
            .zip(self.designation_name)
            .map(|(id, name)| Designation { id, name });
        let project = self
            .project_id
            .zip(self.project_name)
            .map(|(id, name)| Project { id, name });

        EmployeeRow {
            employee,
            details,
            department,
            designation,
            project,
        }
    }
}
