//! HTTP-реализация шлюза заявок на отгрузку.

use async_trait::async_trait;
use contracts::domain::a003_export_request::aggregate::ExportRequest;

use super::workflow::ExportRequestGateway;
use crate::shared::api_client::ApiClient;
use crate::shared::operation_error::OperationError;

const LIST_PATH: &str = "/api/export-requests";

fn action_path(request_id: &str, action: &str) -> String {
    format!("{}/{}/{}", LIST_PATH, request_id, action)
}

#[async_trait(?Send)]
impl ExportRequestGateway for ApiClient {
    async fn list_requests(&self) -> Result<Vec<ExportRequest>, OperationError> {
        self.get_json(LIST_PATH).await
    }

    async fn process_request(&self, request_id: &str) -> Result<(), OperationError> {
        self.post_empty(&action_path(request_id, "process")).await
    }

    async fn approve_request(&self, request_id: &str) -> Result<(), OperationError> {
        self.post_empty(&action_path(request_id, "approve")).await
    }

    async fn cancel_request(&self, request_id: &str) -> Result<(), OperationError> {
        self.post_empty(&action_path(request_id, "cancel")).await
    }

    async fn create_receipt(&self, request_id: &str) -> Result<(), OperationError> {
        self.post_empty(&action_path(request_id, "receipt")).await
    }
}
