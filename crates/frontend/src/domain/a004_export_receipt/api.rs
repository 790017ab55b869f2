//! HTTP-реализация шлюза расходных документов.

use async_trait::async_trait;
use contracts::domain::a004_export_receipt::aggregate::{ApproveLineRequest, ExportReceipt};

use super::workflow::ReceiptGateway;
use crate::shared::api_client::ApiClient;
use crate::shared::operation_error::OperationError;

const LIST_PATH: &str = "/api/export-receipts";

/// В пути ID строки, а не документа
fn approve_line_path(line_id: &str) -> String {
    format!("{}/{}/approve", LIST_PATH, line_id)
}

#[async_trait(?Send)]
impl ReceiptGateway for ApiClient {
    async fn list_receipts(&self) -> Result<Vec<ExportReceipt>, OperationError> {
        self.get_json(LIST_PATH).await
    }

    async fn approve_line(
        &self,
        line_id: &str,
        request: &ApproveLineRequest,
    ) -> Result<(), OperationError> {
        self.put_discard(&approve_line_path(line_id), request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approve_line_path() {
        assert_eq!(
            approve_line_path("7f1c"),
            "/api/export-receipts/7f1c/approve"
        );
    }
}
