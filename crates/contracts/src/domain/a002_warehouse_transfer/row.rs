use super::aggregate::WarehouseTransfer;
use super::status::TransferDirection;
use crate::domain::a001_warehouse::lookup::WarehouseLookup;
use crate::shared::list_query::Searchable;
use serde::{Deserialize, Serialize};

/// Строка списка: перемещение вместе с наименованием склада на другой стороне.
///
/// Поиск идёт по уже разрешённому имени, поэтому строки собираются после
/// загрузки справочника складов.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRow {
    pub transfer: WarehouseTransfer,
    pub counterpart_name: String,
}

impl TransferRow {
    pub fn new(transfer: WarehouseTransfer, direction: TransferDirection, lookup: &WarehouseLookup) -> Self {
        let counterpart_name = lookup.name_for(transfer.counterpart_id(direction));
        Self {
            transfer,
            counterpart_name,
        }
    }

    pub fn build_all(
        transfers: Vec<WarehouseTransfer>,
        direction: TransferDirection,
        lookup: &WarehouseLookup,
    ) -> Vec<Self> {
        transfers
            .into_iter()
            .map(|t| Self::new(t, direction, lookup))
            .collect()
    }
}

impl Searchable for TransferRow {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![
            self.transfer.request_code.as_str(),
            self.counterpart_name.as_str(),
        ];
        if let Some(notes) = &self.transfer.notes {
            fields.push(notes.as_str());
        }
        fields
    }

    fn status(&self) -> &str {
        &self.transfer.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_warehouse::aggregate::Warehouse;
    use crate::domain::a002_warehouse_transfer::aggregate::CreateTransferDto;
    use crate::shared::list_query::{filter_and_paginate, ListFilter};

    fn lookup() -> WarehouseLookup {
        WarehouseLookup::new(&[
            Warehouse {
                id: 1,
                code: "HN".into(),
                name: "Kho Hà Nội".into(),
                address: None,
            },
            Warehouse {
                id: 2,
                code: "DN".into(),
                name: "Kho Đà Nẵng".into(),
                address: None,
            },
        ])
    }

    fn transfer(code: &str, src: i64, dst: i64) -> WarehouseTransfer {
        WarehouseTransfer::new_for_insert(CreateTransferDto {
            request_code: Some(code.into()),
            source_warehouse_id: src,
            destination_warehouse_id: dst,
            ..Default::default()
        })
    }

    #[test]
    fn test_counterpart_depends_on_direction() {
        let t = transfer("TR-1", 1, 2);
        let out = TransferRow::new(t.clone(), TransferDirection::Outgoing, &lookup());
        let inc = TransferRow::new(t, TransferDirection::Incoming, &lookup());
        assert_eq!(out.counterpart_name, "Kho Đà Nẵng");
        assert_eq!(inc.counterpart_name, "Kho Hà Nội");
    }

    #[test]
    fn test_search_by_counterpart_name() {
        let rows = TransferRow::build_all(
            vec![transfer("TR-1", 1, 2), transfer("TR-2", 1, 9)],
            TransferDirection::Outgoing,
            &lookup(),
        );
        let mut filter = ListFilter::default();
        filter.set_search_term("đà nẵng");
        let page = filter_and_paginate(&rows, &filter);
        assert_eq!(page.total_items, 1);
        assert_eq!(page.page_items[0].transfer.request_code, "TR-1");

        // неизвестный склад ищется по заглушке
        filter.set_search_term("kho 9");
        assert_eq!(filter_and_paginate(&rows, &filter).total_items, 1);
    }
}
