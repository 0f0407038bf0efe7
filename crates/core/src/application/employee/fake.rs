//! In-memory repository used by the use-case tests.
//!
//! A transaction works on a cloned copy of the committed tables; commit swaps
//! the copy in, rollback drops it. Failure injection hooks let tests exercise
//! the rollback and conflict paths without a database.

use crate::domain::{
    Department, Designation, Employee, EmployeeDetails, EmployeeDraft, EmployeeId, EmployeeRow,
    Project, ReferenceId, ReferenceKind,
};
use crate::error::{AppError, Result};
use crate::port::{
    EmployeeFilter, EmployeeRepository, EmployeeTransaction, Transaction,
    TransactionalEmployeeRepository,
};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Default)]
struct Tables {
    references: HashMap<(ReferenceKind, String), ReferenceId>,
    employees: BTreeMap<EmployeeId, EmployeeDraft>,
    details: BTreeMap<EmployeeId, (ReferenceId, ReferenceId)>,
    links: Vec<(EmployeeId, ReferenceId)>,
    next_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn reference_name(&self, kind: ReferenceKind, id: ReferenceId) -> Option<String> {
        self.references
            .iter()
            .find(|((k, _), v)| *k == kind && **v == id)
            .map(|((_, name), _)| name.clone())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FakeStats {
    pub commits: usize,
    pub rollbacks: usize,
    pub reference_inserts: usize,
}

#[derive(Default)]
struct Hooks {
    /// Fail the n-th (1-based) join-table insert of a transaction
    fail_link_at: Option<usize>,
    /// Insert loses a race: the name appears with this id and the insert conflicts
    racing: HashMap<(ReferenceKind, String), ReferenceId>,
    /// Insert conflicts and the name never becomes visible
    rejected: Vec<(ReferenceKind, String)>,
}

#[derive(Default)]
struct Shared {
    tables: Mutex<Tables>,
    stats: Mutex<FakeStats>,
    hooks: Mutex<Hooks>,
}

pub struct FakeStore {
    shared: Arc<Shared>,
}

impl FakeStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            shared: Arc::new(Shared::default()),
        })
    }

    pub fn stats(&self) -> FakeStats {
        *self.shared.stats.lock().unwrap()
    }

    pub fn fail_link_at(&self, n: usize) {
        self.shared.hooks.lock().unwrap().fail_link_at = Some(n);
    }

    pub fn race_reference(&self, kind: ReferenceKind, name: &str, winner: ReferenceId) {
        self.shared
            .hooks
            .lock()
            .unwrap()
            .racing
            .insert((kind, name.to_string()), winner);
    }

    pub fn reject_reference(&self, kind: ReferenceKind, name: &str) {
        self.shared
            .hooks
            .lock()
            .unwrap()
            .rejected
            .push((kind, name.to_string()));
    }

    pub fn has_reference(&self, kind: ReferenceKind, name: &str) -> bool {
        self.shared
            .tables
            .lock()
            .unwrap()
            .references
            .contains_key(&(kind, name.to_string()))
    }

    pub fn employee_count(&self) -> usize {
        self.shared.tables.lock().unwrap().employees.len()
    }

    pub fn link_count(&self) -> usize {
        self.shared.tables.lock().unwrap().links.len()
    }
}

#[async_trait]
impl EmployeeRepository for FakeStore {
    async fn fetch_rows(&self, filter: &EmployeeFilter) -> Result<Vec<EmployeeRow>> {
        let tables = self.shared.tables.lock().unwrap().clone();
        let mut rows = Vec::new();

        for (id, draft) in &tables.employees {
            if let EmployeeFilter::Code(code) = filter {
                if &draft.code != code {
                    continue;
                }
            }

            let employee = Employee::new(
                *id,
                draft.first_name.clone(),
                draft.last_name.clone(),
                draft.code.clone(),
                draft.date_of_birth,
            );
            let details = tables.details.get(id).map(|(dep, des)| EmployeeDetails {
                employee_id: *id,
                department_id: *dep,
                designation_id: *des,
                department: None,
                designation: None,
            });
            let department = tables.details.get(id).and_then(|(dep, _)| {
                tables
                    .reference_name(ReferenceKind::Department, *dep)
                    .map(|name| Department { id: *dep, name })
            });
            let designation = tables.details.get(id).and_then(|(_, des)| {
                tables
                    .reference_name(ReferenceKind::Designation, *des)
                    .map(|name| Designation { id: *des, name })
            });

            let projects: Vec<Option<Project>> = tables
                .links
                .iter()
                .filter(|(employee_id, _)| employee_id == id)
                .map(|(_, pid)| {
                    tables
                        .reference_name(ReferenceKind::Project, *pid)
                        .map(|name| Project { id: *pid, name })
                })
                .collect();
            let projects = if projects.is_empty() {
                vec![None]
            } else {
                projects
            };

            for project in projects {
                rows.push(EmployeeRow {
                    employee: employee.clone(),
                    details: details.clone(),
                    department: department.clone(),
                    designation: designation.clone(),
                    project,
                });
            }
        }

        Ok(rows)
    }
}

#[async_trait]
impl TransactionalEmployeeRepository for FakeStore {
    async fn begin_transaction(&self) -> Result<Box<dyn EmployeeTransaction>> {
        let work = self.shared.tables.lock().unwrap().clone();
        Ok(Box::new(FakeTransaction {
            store: Arc::clone(&self.shared),
            work,
            links_inserted: 0,
        }))
    }
}

struct FakeTransaction {
    store: Arc<Shared>,
    work: Tables,
    links_inserted: usize,
}

#[async_trait]
impl Transaction for FakeTransaction {
    async fn commit(self: Box<Self>) -> Result<()> {
        let FakeTransaction { store, work, .. } = *self;
        *store.tables.lock().unwrap() = work;
        store.stats.lock().unwrap().commits += 1;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<()> {
        self.store.stats.lock().unwrap().rollbacks += 1;
        Ok(())
    }
}

#[async_trait]
impl EmployeeTransaction for FakeTransaction {
    async fn find_reference(
        &mut self,
        kind: ReferenceKind,
        name: &str,
    ) -> Result<Option<ReferenceId>> {
        Ok(self.work.references.get(&(kind, name.to_string())).copied())
    }

    async fn insert_reference(&mut self, kind: ReferenceKind, name: &str) -> Result<ReferenceId> {
        let key = (kind, name.to_string());
        {
            let hooks = self.store.hooks.lock().unwrap();
            if let Some(winner) = hooks.racing.get(&key) {
                self.work.references.insert(key, *winner);
                return Err(AppError::Conflict(format!(
                    "UNIQUE constraint failed: {}.name",
                    kind.table()
                )));
            }
            if hooks.rejected.contains(&key) {
                return Err(AppError::Conflict(format!(
                    "UNIQUE constraint failed: {}.name",
                    kind.table()
                )));
            }
        }

        let id = self.work.next_id();
        self.work.references.insert(key, id);
        self.store.stats.lock().unwrap().reference_inserts += 1;
        Ok(id)
    }

    async fn insert_employee(&mut self, draft: &EmployeeDraft) -> Result<EmployeeId> {
        if self.work.employees.values().any(|e| e.code == draft.code) {
            return Err(AppError::Conflict(
                "UNIQUE constraint failed: employees.code".to_string(),
            ));
        }
        let id = self.work.next_id();
        self.work.employees.insert(id, draft.clone());
        Ok(id)
    }

    async fn update_employee(&mut self, id: EmployeeId, draft: &EmployeeDraft) -> Result<u64> {
        match self.work.employees.get_mut(&id) {
            Some(existing) => {
                existing.first_name = draft.first_name.clone();
                existing.last_name = draft.last_name.clone();
                existing.date_of_birth = draft.date_of_birth;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_employee(&mut self, id: EmployeeId) -> Result<u64> {
        Ok(self.work.employees.remove(&id).map_or(0, |_| 1))
    }

    async fn insert_details(
        &mut self,
        employee_id: EmployeeId,
        department_id: ReferenceId,
        designation_id: ReferenceId,
    ) -> Result<()> {
        self.work
            .details
            .insert(employee_id, (department_id, designation_id));
        Ok(())
    }

    async fn update_details(
        &mut self,
        employee_id: EmployeeId,
        department_id: ReferenceId,
        designation_id: ReferenceId,
    ) -> Result<u64> {
        match self.work.details.get_mut(&employee_id) {
            Some(row) => {
                *row = (department_id, designation_id);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_details(&mut self, employee_id: EmployeeId) -> Result<u64> {
        Ok(self.work.details.remove(&employee_id).map_or(0, |_| 1))
    }

    async fn insert_employee_project(
        &mut self,
        employee_id: EmployeeId,
        project_id: ReferenceId,
    ) -> Result<()> {
        self.links_inserted += 1;
        if self.store.hooks.lock().unwrap().fail_link_at == Some(self.links_inserted) {
            return Err(AppError::Database("injected join-table failure".to_string()));
        }
        if self.work.links.contains(&(employee_id, project_id)) {
            return Err(AppError::Conflict(
                "UNIQUE constraint failed: employee_projects.employee_id, employee_projects.project_id"
                    .to_string(),
            ));
        }
        self.work.links.push((employee_id, project_id));
        Ok(())
    }

    async fn delete_employee_projects(&mut self, employee_id: EmployeeId) -> Result<u64> {
        let before = self.work.links.len();
        self.work.links.retain(|(e, _)| *e != employee_id);
        Ok((before - self.work.links.len()) as u64)
    }
}
