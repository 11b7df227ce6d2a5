//! Inactivity tracking for automatic sign-out.

use std::time::Duration;

use tokio::time::Instant;

use crate::config::ConsoleConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleStatus {
    Active,
    /// Inside the warning window before expiry.
    Warning { remaining: Duration },
    Expired,
}

/// What a poll of the tracker should trigger. Each fires once per idle period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleEvent {
    None,
    Warn { remaining: Duration },
    Expire,
}

#[derive(Debug)]
pub struct IdleTracker {
    timeout: Duration,
    warning: Duration,
    last_activity: Instant,
    warned: bool,
    expired: bool,
}

impl IdleTracker {
    pub fn new(timeout: Duration, warning: Duration) -> Self {
        Self {
            timeout,
            warning: warning.min(timeout),
            last_activity: Instant::now(),
            warned: false,
            expired: false,
        }
    }

    pub fn from_config(config: &ConsoleConfig) -> Self {
        Self::new(config.idle_timeout(), config.idle_warning())
    }

    pub fn record_activity(&mut self) {
        self.last_activity = Instant::now();
        self.warned = false;
        self.expired = false;
    }

    pub fn deadline(&self) -> Instant {
        self.last_activity + self.timeout
    }

    pub fn status(&self) -> IdleStatus {
        let idle = self.last_activity.elapsed();
        if idle >= self.timeout {
            return IdleStatus::Expired;
        }
        let remaining = self.timeout - idle;
        if remaining <= self.warning {
            IdleStatus::Warning { remaining }
        } else {
            IdleStatus::Active
        }
    }

    pub fn poll(&mut self) -> IdleEvent {
        match self.status() {
            IdleStatus::Active => IdleEvent::None,
            IdleStatus::Warning { remaining } if !self.warned => {
                self.warned = true;
                IdleEvent::Warn { remaining }
            }
            IdleStatus::Warning { .. } => IdleEvent::None,
            IdleStatus::Expired if !self.expired => {
                self.expired = true;
                IdleEvent::Expire
            }
            IdleStatus::Expired => IdleEvent::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn warns_then_expires_once() {
        let mut t = IdleTracker::new(Duration::from_secs(60), Duration::from_secs(4));
        assert_eq!(t.poll(), IdleEvent::None);

        tokio::time::advance(Duration::from_secs(57)).await;
        assert_eq!(
            t.poll(),
            IdleEvent::Warn {
                remaining: Duration::from_secs(3)
            }
        );
        assert_eq!(t.poll(), IdleEvent::None);

        tokio::time::advance(Duration::from_secs(3)).await;
        assert_eq!(t.status(), IdleStatus::Expired);
        assert_eq!(t.poll(), IdleEvent::Expire);
        assert_eq!(t.poll(), IdleEvent::None);
    }

    #[tokio::test(start_paused = true)]
    async fn activity_resets_the_clock() {
        let mut t = IdleTracker::new(Duration::from_secs(60), Duration::from_secs(4));
        tokio::time::advance(Duration::from_secs(58)).await;
        assert!(matches!(t.poll(), IdleEvent::Warn { .. }));

        t.record_activity();
        assert_eq!(t.status(), IdleStatus::Active);
        assert_eq!(t.deadline(), Instant::now() + Duration::from_secs(60));

        tokio::time::advance(Duration::from_secs(57)).await;
        assert!(matches!(t.poll(), IdleEvent::Warn { .. }));
    }
}
