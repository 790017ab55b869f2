//! Защита от устаревших ответов.
//!
//! Каждая загрузка берёт билет. Результат применяется, только если билет
//! всё ещё последний: медленный старый ответ не затирает новый, а ответ,
//! пришедший после ухода со страницы (`invalidate` в `on_cleanup`),
//! отбрасывается.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

#[derive(Debug, Clone, Default)]
pub struct RequestGeneration {
    current: Arc<AtomicU64>,
}

impl RequestGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Начать новый запрос; все выданные ранее билеты устаревают
    pub fn begin(&self) -> RequestTicket {
        RequestTicket(self.current.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.current.load(Ordering::SeqCst) == ticket.0
    }

    /// Отменить все выданные билеты (уход со страницы)
    pub fn invalidate(&self) {
        self.current.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_ticket_is_current() {
        let generation = RequestGeneration::new();
        let first = generation.begin();
        assert!(generation.is_current(first));

        let second = generation.begin();
        assert!(!generation.is_current(first));
        assert!(generation.is_current(second));
    }

    #[test]
    fn test_invalidate_drops_in_flight() {
        let generation = RequestGeneration::new();
        let ticket = generation.begin();
        generation.invalidate();
        assert!(!generation.is_current(ticket));
    }

    #[test]
    fn test_clones_share_generation() {
        let generation = RequestGeneration::new();
        let handle = generation.clone();
        let ticket = generation.begin();
        assert!(handle.is_current(ticket));
        handle.invalidate();
        assert!(!generation.is_current(ticket));
    }
}
