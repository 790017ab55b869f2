use contracts::domain::a001_warehouse::aggregate::Warehouse;

use crate::shared::api_client::ApiClient;
use crate::shared::operation_error::OperationError;

/// GET /api/warehouses
pub async fn fetch_warehouses(client: &ApiClient) -> Result<Vec<Warehouse>, OperationError> {
    client.get_json("/api/warehouses").await
}
