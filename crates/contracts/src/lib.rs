//! Общие типы и чистая логика, разделяемые backend и frontend.
//!
//! Здесь нет ввода-вывода: агрегаты, словари статусов, правила доступности
//! действий, фильтрация и пагинация списков.

pub mod domain;
pub mod shared;
pub mod system;
