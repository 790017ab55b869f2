use super::aggregate::Warehouse;
use std::collections::HashMap;

/// Поиск наименования склада по ID.
///
/// Список складов загружается отдельно от перемещений; если склада в нём
/// нет, показываем заглушку `Kho {id}` вместо ошибки.
#[derive(Debug, Clone, Default)]
pub struct WarehouseLookup {
    names: HashMap<i64, String>,
}

impl WarehouseLookup {
    pub fn new(warehouses: &[Warehouse]) -> Self {
        Self {
            names: warehouses
                .iter()
                .map(|w| (w.id, w.name.clone()))
                .collect(),
        }
    }

    pub fn name_for(&self, id: i64) -> String {
        match self.names.get(&id) {
            Some(name) if !name.trim().is_empty() => name.clone(),
            _ => placeholder_name(id),
        }
    }

    pub fn contains(&self, id: i64) -> bool {
        self.names.contains_key(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

pub fn placeholder_name(id: i64) -> String {
    format!("Kho {}", id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warehouse(id: i64, name: &str) -> Warehouse {
        Warehouse {
            id,
            code: format!("K{:02}", id),
            name: name.into(),
            address: None,
        }
    }

    #[test]
    fn test_known_warehouse_name() {
        let lookup = WarehouseLookup::new(&[warehouse(1, "Kho Hà Nội"), warehouse(2, "Kho Đà Nẵng")]);
        assert_eq!(lookup.name_for(2), "Kho Đà Nẵng");
        assert!(lookup.contains(1));
    }

    #[test]
    fn test_unknown_warehouse_uses_placeholder() {
        let lookup = WarehouseLookup::new(&[warehouse(1, "Kho Hà Nội")]);
        assert_eq!(lookup.name_for(42), "Kho 42");
        assert_eq!(WarehouseLookup::default().name_for(7), "Kho 7");
    }

    #[test]
    fn test_blank_name_uses_placeholder() {
        let lookup = WarehouseLookup::new(&[warehouse(3, "  ")]);
        assert_eq!(lookup.name_for(3), "Kho 3");
    }
}
