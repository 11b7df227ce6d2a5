use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConsoleError;
use crate::page::PAGE_SIZES;

/// Console tunables. Loaded from the `[console]` table of the CLI config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Initial QR page size; one of 5, 10, 20, 50.
    pub page_size: usize,
    /// Inactivity before automatic sign-out.
    pub idle_timeout_secs: u64,
    /// How long before sign-out the warning is raised.
    pub idle_warning_secs: u64,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            idle_timeout_secs: 15 * 60,
            idle_warning_secs: 4,
        }
    }
}

impl ConsoleConfig {
    pub fn validate(&self) -> Result<(), ConsoleError> {
        if !PAGE_SIZES.contains(&self.page_size) {
            return Err(ConsoleError::Validation(format!(
                "page_size must be one of {:?}, got {}",
                PAGE_SIZES, self.page_size
            )));
        }
        if self.idle_timeout_secs == 0 {
            return Err(ConsoleError::Validation(
                "idle_timeout_secs must be positive".into(),
            ));
        }
        if self.idle_warning_secs >= self.idle_timeout_secs {
            return Err(ConsoleError::Validation(
                "idle_warning_secs must be shorter than idle_timeout_secs".into(),
            ));
        }
        Ok(())
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    pub fn idle_warning(&self) -> Duration {
        Duration::from_secs(self.idle_warning_secs)
    }
}
