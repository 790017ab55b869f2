//! HTTP-реализация шлюза перемещений поверх клиента сессии.

use async_trait::async_trait;
use contracts::domain::a002_warehouse_transfer::aggregate::{
    PlanningRequest, TransferListQuery, WarehouseTransfer,
};

use super::workflow::TransferGateway;
use crate::shared::api_client::ApiClient;
use crate::shared::operation_error::OperationError;

pub fn list_path(query: &TransferListQuery) -> Result<String, OperationError> {
    let qs = serde_qs::to_string(query).map_err(|e| OperationError::Decode(e.to_string()))?;
    Ok(format!("/api/transfers?{}", qs))
}

fn action_path(transfer_id: &str, action: &str) -> String {
    format!("/api/transfers/{}/{}", transfer_id, action)
}

#[async_trait(?Send)]
impl TransferGateway for ApiClient {
    async fn list_transfers(
        &self,
        query: &TransferListQuery,
    ) -> Result<Vec<WarehouseTransfer>, OperationError> {
        self.get_json(&list_path(query)?).await
    }

    async fn plan_transfer(
        &self,
        transfer_id: &str,
        request: &PlanningRequest,
    ) -> Result<(), OperationError> {
        self.post_discard(&action_path(transfer_id, "plan"), request).await
    }

    async fn approve_transfer(&self, transfer_id: &str) -> Result<(), OperationError> {
        self.post_empty(&action_path(transfer_id, "approve")).await
    }

    async fn cancel_transfer(&self, transfer_id: &str) -> Result<(), OperationError> {
        self.post_empty(&action_path(transfer_id, "cancel")).await
    }

    async fn complete_transfer(&self, transfer_id: &str) -> Result<(), OperationError> {
        self.post_empty(&action_path(transfer_id, "complete")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a002_warehouse_transfer::status::TransferDirection;

    #[test]
    fn test_list_path() {
        let query = TransferListQuery {
            warehouse_id: 3,
            direction: TransferDirection::Incoming,
        };
        assert_eq!(
            list_path(&query).unwrap(),
            "/api/transfers?warehouseId=3&direction=incoming"
        );
    }

    #[test]
    fn test_action_path() {
        assert_eq!(action_path("abc", "plan"), "/api/transfers/abc/plan");
    }
}
