use gove_states::State;

use crate::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// A modal message. When `then` is set, closing it navigates there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub text: String,
    pub then: Option<Route>,
}

impl Notification {
    pub fn success(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: title.into(),
            text: text.into(),
            then: None,
        }
    }

    pub fn error(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            ..Self::success(title, text)
        }
    }

    pub fn then_navigate(mut self, route: Route) -> Self {
        self.then = Some(route);
        self
    }
}

/// The notification currently on screen, if any. A new one replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notifications {
    current: Option<Notification>,
}

impl Notifications {
    pub fn show(&mut self, notification: Notification) {
        log::info!("Notification: {}", notification.title);
        self.current = Some(notification);
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    pub fn dismiss(&mut self) -> Option<Notification> {
        self.current.take()
    }
}

impl State for Notifications {}
