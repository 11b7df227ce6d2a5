//! App-level state: navigable menu (`app/menu`) and notifications (`notify/queue`).

use std::collections::VecDeque;

use qrportal_flux::{Outcome, Slice};
use serde::Serialize;

use crate::notify::{Level, Notification};
use crate::route::{navigable_paths, RouteNode};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MenuSlice {
    pub routes: Vec<RouteNode>,
    /// Every path the router accepts for this session.
    pub paths: Vec<String>,
}

impl MenuSlice {
    pub fn allows(&self, path: &str) -> bool {
        self.paths.iter().any(|p| p == path)
    }
}

#[derive(Debug, Clone)]
pub enum MenuAction {
    Set(Vec<RouteNode>),
    Clear,
}

impl Slice for MenuSlice {
    const PATH: &'static str = "app/menu";
    type Action = MenuAction;

    fn reduce(&mut self, action: MenuAction) -> Outcome {
        match action {
            MenuAction::Set(routes) => {
                self.paths = navigable_paths(&routes);
                self.routes = routes;
            }
            MenuAction::Clear => {
                if self.routes.is_empty() {
                    return Outcome::Ignored;
                }
                *self = MenuSlice::default();
            }
        }
        Outcome::Applied
    }
}

/// Pending toasts, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NotificationQueue {
    pub items: VecDeque<Notification>,
    next_id: u64,
}

#[derive(Debug, Clone)]
pub enum NotifyAction {
    Push { level: Level, message: String },
    Dismiss(u64),
    Clear,
}

impl Slice for NotificationQueue {
    const PATH: &'static str = "notify/queue";
    type Action = NotifyAction;

    fn reduce(&mut self, action: NotifyAction) -> Outcome {
        match action {
            NotifyAction::Push { level, message } => {
                self.next_id += 1;
                self.items.push_back(Notification {
                    id: self.next_id,
                    level,
                    message,
                });
            }
            NotifyAction::Dismiss(id) => {
                let before = self.items.len();
                self.items.retain(|n| n.id != id);
                if self.items.len() == before {
                    return Outcome::Ignored;
                }
            }
            NotifyAction::Clear => {
                if self.items.is_empty() {
                    return Outcome::Ignored;
                }
                self.items.clear();
            }
        }
        Outcome::Applied
    }
}

impl NotificationQueue {
    /// Take every pending notification, leaving the queue empty.
    pub fn take(&mut self) -> (Outcome, Vec<Notification>) {
        if self.items.is_empty() {
            return (Outcome::Ignored, Vec::new());
        }
        (Outcome::Applied, self.items.drain(..).collect())
    }
}
