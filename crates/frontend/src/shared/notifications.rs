//! Уведомления о результатах действий.
//!
//! Простой список внутри страницы: сообщение висит несколько секунд или до
//! закрытия пользователем.

use crate::shared::icons::icon;
use crate::shared::operation_error::OperationError;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

const AUTO_DISMISS_MS: u32 = 6000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Warning,
    Error,
}

impl NotificationKind {
    fn css_class(&self) -> &'static str {
        match self {
            Self::Success => "alert alert--success",
            Self::Warning => "alert alert--warning",
            Self::Error => "alert alert--error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationQueue {
    items: Vec<Notification>,
    next_id: u64,
}

impl NotificationQueue {
    pub fn push(&mut self, kind: NotificationKind, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        self.items.push(Notification {
            id: self.next_id,
            kind,
            message: message.into(),
        });
        self.next_id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|n| n.id != id);
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Clone, Copy)]
pub struct NotificationService {
    queue: RwSignal<NotificationQueue>,
}

impl NotificationService {
    pub fn new() -> Self {
        Self {
            queue: RwSignal::new(NotificationQueue::default()),
        }
    }

    pub fn push(&self, kind: NotificationKind, message: impl Into<String>) {
        let mut id = 0;
        let message = message.into();
        self.queue.update(|q| id = q.push(kind, message));

        let queue = self.queue;
        spawn_local(async move {
            TimeoutFuture::new(AUTO_DISMISS_MS).await;
            queue.try_update(|q| q.dismiss(id));
        });
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(NotificationKind::Success, message);
    }

    pub fn error(&self, context: &str, error: &OperationError) {
        self.push(NotificationKind::Error, format!("{}: {}", context, error));
    }

    pub fn dismiss(&self, id: u64) {
        self.queue.update(|q| q.dismiss(id));
    }
}

impl Default for NotificationService {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_notifications() -> NotificationService {
    use_context::<NotificationService>().expect("NotificationService not found in context")
}

#[component]
pub fn NotificationList() -> impl IntoView {
    let service = use_notifications();

    view! {
        <div class="notifications">
            <For
                each=move || service.queue.with(|q| q.items().to_vec())
                key=|n| n.id
                children=move |n| {
                    let id = n.id;
                    view! {
                        <div class=n.kind.css_class()>
                            <span class="alert__text">{n.message.clone()}</span>
                            <button class="button button--icon" on:click=move |_| service.dismiss(id)>
                                {icon("x")}
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_dismiss() {
        let mut queue = NotificationQueue::default();
        let a = queue.push(NotificationKind::Success, "Đã duyệt");
        let b = queue.push(NotificationKind::Error, "Lỗi");
        assert_ne!(a, b);
        assert_eq!(queue.items().len(), 2);

        queue.dismiss(a);
        assert_eq!(queue.items().len(), 1);
        assert_eq!(queue.items()[0].message, "Lỗi");

        queue.dismiss(999);
        assert_eq!(queue.items().len(), 1);
        queue.dismiss(b);
        assert!(queue.is_empty());
    }
}
