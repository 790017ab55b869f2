//! Фильтрация и постраничный вывод списков на клиенте.
//!
//! Коллекция загружается целиком и режется на страницы в памяти. Доступ идёт
//! через [`ListSource`], чтобы позже можно было подставить серверную
//! пагинацию, не трогая страницы.

use serde::{Deserialize, Serialize};

/// Значение фильтра статуса «все»
pub const STATUS_ALL: &str = "all";

pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Trait для записей, поддерживающих поиск и фильтр по статусу
pub trait Searchable {
    /// Фиксированный набор текстовых полей для поиска (код, контрагент, примечание)
    fn search_fields(&self) -> Vec<&str>;

    /// Сырой статус записи
    fn status(&self) -> &str;
}

/// Критерии фильтра и текущая страница (нумерация с 1)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListFilter {
    pub search_term: String,
    pub status_filter: String,
    pub page: usize,
    pub page_size: usize,
}

impl Default for ListFilter {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            status_filter: STATUS_ALL.to_string(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ListFilter {
    /// Смена поиска всегда возвращает на первую страницу
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.page = 1;
    }

    /// Смена фильтра статуса всегда возвращает на первую страницу
    pub fn set_status_filter(&mut self, status: impl Into<String>) {
        self.status_filter = status.into();
        self.page = 1;
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Вернуть страницу в диапазон после перезагрузки коллекции
    pub fn clamp_page(&mut self, total_pages: usize) {
        self.page = self.page.clamp(1, total_pages.max(1));
    }

    pub fn is_active(&self) -> bool {
        !self.search_term.trim().is_empty() || !is_all(&self.status_filter)
    }

    fn effective_page_size(&self) -> usize {
        self.page_size.max(1)
    }

    pub fn matches<T: Searchable>(&self, item: &T) -> bool {
        matches_status(item.status(), &self.status_filter)
            && matches_search(&item.search_fields(), &self.search_term)
    }
}

fn is_all(status_filter: &str) -> bool {
    let s = status_filter.trim();
    s.is_empty() || s.eq_ignore_ascii_case(STATUS_ALL)
}

fn matches_status(status: &str, status_filter: &str) -> bool {
    is_all(status_filter) || status.trim().to_lowercase() == status_filter.trim().to_lowercase()
}

fn matches_search(fields: &[&str], term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }
    fields.iter().any(|f| f.to_lowercase().contains(&term))
}

/// `max(1, ceil(total_items / page_size))`
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    let size = page_size.max(1);
    total_items.div_ceil(size).max(1)
}

/// Одна страница отфильтрованной коллекции
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResult<T> {
    pub page_items: Vec<T>,
    pub total_pages: usize,
    pub total_items: usize,
    pub page: usize,
}

impl<T> PageResult<T> {
    pub fn is_empty(&self) -> bool {
        self.total_items == 0
    }
}

/// Отфильтровать коллекцию и вырезать страницу `filter.page`.
///
/// Страница за пределами диапазона даёт пустой список, счётчики при этом
/// отражают весь отфильтрованный набор.
pub fn filter_and_paginate<T: Searchable + Clone>(records: &[T], filter: &ListFilter) -> PageResult<T> {
    let filtered: Vec<&T> = records.iter().filter(|r| filter.matches(*r)).collect();
    let total_items = filtered.len();
    let page_size = filter.effective_page_size();
    let page = filter.page.max(1);
    let start = (page - 1).saturating_mul(page_size);

    let page_items = filtered
        .into_iter()
        .skip(start)
        .take(page_size)
        .cloned()
        .collect();

    PageResult {
        page_items,
        total_pages: total_pages(total_items, page_size),
        total_items,
        page,
    }
}

/// Источник страниц списка
pub trait ListSource<T> {
    fn page(&self, filter: &ListFilter) -> PageResult<T>;
}

/// Источник поверх полностью загруженной коллекции
#[derive(Debug, Clone, Default)]
pub struct InMemorySource<T> {
    records: Vec<T>,
}

impl<T> InMemorySource<T> {
    pub fn new(records: Vec<T>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }
}

impl<T: Searchable + Clone> ListSource<T> for InMemorySource<T> {
    fn page(&self, filter: &ListFilter) -> PageResult<T> {
        filter_and_paginate(&self.records, filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Rec {
        code: String,
        counterpart: String,
        notes: Option<String>,
        status: String,
    }

    impl Searchable for Rec {
        fn search_fields(&self) -> Vec<&str> {
            let mut fields = vec![self.code.as_str(), self.counterpart.as_str()];
            if let Some(n) = &self.notes {
                fields.push(n.as_str());
            }
            fields
        }

        fn status(&self) -> &str {
            &self.status
        }
    }

    fn rec(code: &str, status: &str) -> Rec {
        Rec {
            code: code.into(),
            counterpart: "Kho Hà Nội".into(),
            notes: None,
            status: status.into(),
        }
    }

    fn sample(n: usize) -> Vec<Rec> {
        (0..n)
            .map(|i| {
                let status = if i % 3 == 0 { "pending" } else { "APPROVED" };
                rec(&format!("TR-{:03}", i), status)
            })
            .collect()
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let records = vec![rec("ABC123", "pending"), rec("XYZ999", "pending")];
        let mut filter = ListFilter::default();
        filter.set_search_term("abc");
        let page = filter_and_paginate(&records, &filter);
        assert_eq!(page.total_items, 1);
        assert_eq!(page.page_items[0].code, "ABC123");
    }

    #[test]
    fn test_search_covers_counterpart_and_notes() {
        let mut with_notes = rec("TR-1", "pending");
        with_notes.notes = Some("Giao gấp trước Tết".into());
        let records = vec![with_notes, rec("TR-2", "pending")];
        let mut filter = ListFilter::default();

        filter.set_search_term("GẤP");
        assert_eq!(filter_and_paginate(&records, &filter).total_items, 1);

        filter.set_search_term("hà nội");
        assert_eq!(filter_and_paginate(&records, &filter).total_items, 2);
    }

    #[test]
    fn test_empty_search_matches_all() {
        let records = sample(7);
        let mut filter = ListFilter::default();
        filter.set_search_term("   ");
        assert_eq!(filter_and_paginate(&records, &filter).total_items, 7);
    }

    #[test]
    fn test_status_filter() {
        let records = sample(9);
        let mut filter = ListFilter::default();
        filter.set_status_filter("approved");
        let page = filter_and_paginate(&records, &filter);
        assert_eq!(page.total_items, 6);
        assert!(page.page_items.iter().all(|r| r.status == "APPROVED"));

        filter.set_status_filter("ALL");
        assert_eq!(filter_and_paginate(&records, &filter).total_items, 9);

        filter.set_status_filter("");
        assert_eq!(filter_and_paginate(&records, &filter).total_items, 9);

        // совпадение точное, не подстрока
        filter.set_status_filter("approve");
        assert_eq!(filter_and_paginate(&records, &filter).total_items, 0);
    }

    #[test]
    fn test_changing_filters_resets_page() {
        let mut filter = ListFilter {
            page_size: 5,
            ..ListFilter::default()
        };
        filter.set_page(4);
        assert_eq!(filter.page, 4);
        filter.set_search_term("tr");
        assert_eq!(filter.page, 1);

        filter.set_page(3);
        filter.set_status_filter("pending");
        assert_eq!(filter.page, 1);

        filter.set_page(2);
        filter.set_page_size(50);
        assert_eq!(filter.page, 1);
    }

    #[test]
    fn test_pagination_slices() {
        let records = sample(12);
        let mut filter = ListFilter {
            page_size: 5,
            ..ListFilter::default()
        };
        let first = filter_and_paginate(&records, &filter);
        assert_eq!(first.page_items.len(), 5);
        assert_eq!(first.total_pages, 3);

        filter.set_page(3);
        let last = filter_and_paginate(&records, &filter);
        assert_eq!(last.page_items.len(), 2);
        assert_eq!(last.page_items[0].code, "TR-010");

        filter.set_page(4);
        assert!(filter_and_paginate(&records, &filter).page_items.is_empty());
    }

    #[test]
    fn test_total_pages_is_at_least_one() {
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(3, 0), 3);
        let page = filter_and_paginate::<Rec>(&[], &ListFilter::default());
        assert_eq!(page.total_pages, 1);
        assert!(page.is_empty());
    }

    #[test]
    fn test_clamp_page() {
        let mut filter = ListFilter::default();
        filter.set_page(9);
        filter.clamp_page(3);
        assert_eq!(filter.page, 3);
        filter.clamp_page(0);
        assert_eq!(filter.page, 1);
    }

    #[test]
    fn test_in_memory_source() {
        let source = InMemorySource::new(sample(4));
        let page = source.page(&ListFilter {
            page_size: 3,
            ..ListFilter::default()
        });
        assert_eq!(page.page_items.len(), 3);
        assert_eq!(source.records().len(), 4);
    }

    proptest! {
        #[test]
        fn prop_pages_cover_all_items(n in 0usize..120, size in 1usize..25, pending_only in any::<bool>()) {
            let records = sample(n);
            let mut filter = ListFilter::default();
            filter.set_page_size(size);
            if pending_only {
                filter.set_status_filter("pending");
            }
            let first = filter_and_paginate(&records, &filter);
            let expected_pages = std::cmp::max(1, (first.total_items + size - 1) / size);
            prop_assert_eq!(first.total_pages, expected_pages);

            let mut sum = 0;
            for p in 1..=first.total_pages {
                filter.set_page(p);
                let page = filter_and_paginate(&records, &filter);
                prop_assert!(page.page_items.len() <= size);
                sum += page.page_items.len();
            }
            prop_assert_eq!(sum, first.total_items);
        }
    }
}
