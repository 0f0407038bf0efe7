//! RPC Method Handlers
//!
//! Translate between wire DTOs and `EmployeeService` calls.

use crate::error::{not_found, to_rpc_error};
use crate::types::{
    AddEmployeeResponse, CodeRequest, DeleteEmployeeResponse, EmployeeDto,
    UpdateEmployeeResponse,
};
use jsonrpsee::types::ErrorObjectOwned;
use roster_core::application::EmployeeService;
use roster_core::domain::EmployeeDraft;
use std::sync::Arc;
use tracing::info;

/// RPC Handler with injected dependencies
pub struct RpcHandler {
    service: Arc<EmployeeService>,
}

impl RpcHandler {
    pub fn new(service: Arc<EmployeeService>) -> Self {
        Self { service }
    }

    /// employee.list.v1
    pub async fn list(&self) -> Result<Vec<EmployeeDto>, ErrorObjectOwned> {
        let employees = self.service.list().await.map_err(to_rpc_error)?;
        Ok(employees.into_iter().map(EmployeeDto::from).collect())
    }

    /// employee.get.v1
    pub async fn get(&self, params: CodeRequest) -> Result<EmployeeDto, ErrorObjectOwned> {
        let employee = self
            .service
            .find_by_code(&params.code)
            .await
            .map_err(to_rpc_error)?
            .ok_or_else(|| {
                not_found(format!("Employee with code '{}' doesn't exist", params.code))
            })?;

        Ok(EmployeeDto::from(employee))
    }

    /// employee.add.v1
    pub async fn add(&self, params: EmployeeDto) -> Result<AddEmployeeResponse, ErrorObjectOwned> {
        let draft = EmployeeDraft::from(params);
        let id = self.service.add(&draft).await.map_err(to_rpc_error)?;

        info!(id = id, code = %draft.code, "Employee added via RPC");
        Ok(AddEmployeeResponse {
            id,
            code: draft.code,
        })
    }

    /// employee.update.v1 (re-keyed by `code`)
    pub async fn update(
        &self,
        params: EmployeeDto,
    ) -> Result<UpdateEmployeeResponse, ErrorObjectOwned> {
        let draft = EmployeeDraft::from(params);
        let updated = self
            .service
            .update_by_code(&draft.code, &draft)
            .await
            .map_err(to_rpc_error)?;

        if !updated {
            return Err(not_found("Employee not found"));
        }

        Ok(UpdateEmployeeResponse {
            code: draft.code,
            updated,
        })
    }

    /// employee.delete.v1
    pub async fn delete(
        &self,
        params: CodeRequest,
    ) -> Result<DeleteEmployeeResponse, ErrorObjectOwned> {
        let deleted = self
            .service
            .delete_by_code(&params.code)
            .await
            .map_err(to_rpc_error)?;

        if !deleted {
            return Err(not_found("Employee not found"));
        }

        Ok(DeleteEmployeeResponse {
            code: params.code,
            deleted,
        })
    }
}
