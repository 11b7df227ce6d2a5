use serde::Serialize;

/// Lifecycle of one operation: `Idle → Loading → Success | Failed`.
/// Starting again from any phase goes back to `Loading`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Success,
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpStatus {
    pub phase: Phase,
    /// Progress text while loading, e.g. "Fetching QR codes...".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl OpStatus {
    pub fn start(&mut self, message: &str) {
        self.phase = Phase::Loading;
        self.message = Some(message.to_string());
        self.error = None;
    }

    pub fn succeed(&mut self) {
        self.phase = Phase::Success;
        self.message = None;
    }

    pub fn fail(&mut self, error: impl Into<String>) {
        self.phase = Phase::Failed;
        self.message = None;
        self.error = Some(error.into());
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transitions_are_reenterable() {
        let mut op = OpStatus::default();
        assert_eq!(op.phase, Phase::Idle);

        op.start("Fetching...");
        assert!(op.is_loading());
        op.fail("boom");
        assert_eq!(op.error.as_deref(), Some("boom"));

        op.start("Fetching...");
        assert!(op.is_loading());
        assert!(op.error.is_none());
        op.succeed();
        assert_eq!(op.phase, Phase::Success);
        assert!(op.message.is_none());
    }
}
