//! Employee aggregate assembly from a denormalized join.
//!
//! The read query left-joins employees to details, department, designation and
//! projects, so one employee spans as many rows as it has project links (at
//! least one). `flatten` folds those rows back into one `Employee` per id.

use super::employee::{Department, Designation, Employee, EmployeeDetails, EmployeeId, Project};
use std::collections::HashMap;

/// One decoded row of the employee join.
///
/// `employee` carries only scalar fields; its `details` and `projects` are
/// ignored and rebuilt by `flatten`. Every other part is `None` on a left-join miss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeRow {
    pub employee: Employee,
    pub details: Option<EmployeeDetails>,
    pub department: Option<Department>,
    pub designation: Option<Designation>,
    pub project: Option<Project>,
}

/// Group rows by employee id in a single pass.
///
/// Output holds one aggregate per distinct employee id, in first-seen order.
/// Projects keep first-seen row order and are deduplicated by project id.
/// Details, department and designation come from the first row of each employee.
pub fn flatten<I>(rows: I) -> Vec<Employee>
where
    I: IntoIterator<Item = EmployeeRow>,
{
    let mut employees: Vec<Employee> = Vec::new();
    let mut index: HashMap<EmployeeId, usize> = HashMap::new();

    for row in rows {
        let slot = match index.get(&row.employee.id).copied() {
            Some(slot) => slot,
            None => {
                let mut employee = row.employee;
                employee.details = row.details.map(|mut details| {
                    details.department = row.department;
                    details.designation = row.designation;
                    details
                });
                employee.projects = Vec::new();

                index.insert(employee.id, employees.len());
                employees.push(employee);
                employees.len() - 1
            }
        };

        if let Some(project) = row.project {
            let projects = &mut employees[slot].projects;
            if projects.iter().all(|p| p.id != project.id) {
                projects.push(project);
            }
        }
    }

    employees
}
