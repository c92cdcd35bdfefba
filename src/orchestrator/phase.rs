//! Phase machine for one startup notification pass.

use serde::{Deserialize, Serialize};

/// Phases of a notification pass.
///
/// `Start → WelcomeWait → WelcomeShown|WelcomeSkipped → UpdateWait →
/// UpdatePrompt → {UpdateApplying → Done|Failed} | {CatalogCheck →
/// CatalogPrompt|Idle}`. `Idle` parks the pass until the next eligible
/// auto-check transition re-enters `UpdateWait`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassPhase {
    /// Pass has not begun.
    Start,
    /// Waiting for the welcome condition to resolve.
    WelcomeWait,
    /// Welcome modal is up, waiting for dismissal.
    WelcomeShown,
    /// No welcome owed this process.
    WelcomeSkipped,
    /// Parked on the update condition.
    UpdateWait,
    /// Update confirm dialog is up.
    UpdatePrompt,
    /// Applying a confirmed system update.
    UpdateApplying,
    /// Probing the app catalog for new entries.
    CatalogCheck,
    /// Catalog notice is up.
    CatalogPrompt,
    /// Update applied; the pass is over.
    Done,
    /// Applying the update failed; the pass is over.
    Failed,
    /// Nothing further this cycle; awaiting the next auto-check transition.
    Idle,
}

impl PassPhase {
    /// Check if a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: PassPhase) -> bool {
        use PassPhase::*;
        matches!(
            (self, target),
            (Start, WelcomeWait)
                | (WelcomeWait, WelcomeShown)
                | (WelcomeWait, WelcomeSkipped)
                | (WelcomeShown, UpdateWait)
                | (WelcomeSkipped, UpdateWait)
                // A no-version emission skips straight to the catalog check.
                | (UpdateWait, UpdatePrompt)
                | (UpdateWait, CatalogCheck)
                | (UpdatePrompt, UpdateApplying)
                | (UpdatePrompt, CatalogCheck)
                | (UpdateApplying, Done)
                | (UpdateApplying, Failed)
                | (CatalogCheck, CatalogPrompt)
                | (CatalogCheck, Idle)
                | (CatalogPrompt, Idle)
                // The next eligible transition re-runs the update phase.
                | (Idle, UpdateWait)
        )
    }

    /// Whether this phase ends the pass.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    /// Whether the pass is parked awaiting another update-condition emission.
    pub fn is_parked(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

impl Default for PassPhase {
    fn default() -> Self {
        Self::Start
    }
}

impl std::fmt::Display for PassPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Start => "start",
            Self::WelcomeWait => "welcome_wait",
            Self::WelcomeShown => "welcome_shown",
            Self::WelcomeSkipped => "welcome_skipped",
            Self::UpdateWait => "update_wait",
            Self::UpdatePrompt => "update_prompt",
            Self::UpdateApplying => "update_applying",
            Self::CatalogCheck => "catalog_check",
            Self::CatalogPrompt => "catalog_prompt",
            Self::Done => "done",
            Self::Failed => "failed",
            Self::Idle => "idle",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_transitions() {
        use PassPhase::*;
        let transitions = [
            (Start, WelcomeWait),
            (WelcomeWait, WelcomeShown),
            (WelcomeWait, WelcomeSkipped),
            (WelcomeShown, UpdateWait),
            (WelcomeSkipped, UpdateWait),
            (UpdateWait, UpdatePrompt),
            (UpdateWait, CatalogCheck),
            (UpdatePrompt, UpdateApplying),
            (UpdatePrompt, CatalogCheck),
            (UpdateApplying, Done),
            (UpdateApplying, Failed),
            (CatalogCheck, CatalogPrompt),
            (CatalogCheck, Idle),
            (CatalogPrompt, Idle),
            (Idle, UpdateWait),
        ];
        for (from, to) in transitions {
            assert!(from.can_transition_to(to), "{from} should transition to {to}");
        }
    }

    #[test]
    fn invalid_transitions() {
        use PassPhase::*;
        // The welcome phase never re-runs.
        assert!(!Idle.can_transition_to(WelcomeWait));
        assert!(!UpdateWait.can_transition_to(WelcomeShown));
        // No update dialog before the welcome phase resolves.
        assert!(!WelcomeWait.can_transition_to(UpdatePrompt));
        assert!(!Start.can_transition_to(UpdateWait));
        // Terminal phases stay terminal.
        assert!(!Done.can_transition_to(UpdateWait));
        assert!(!Failed.can_transition_to(UpdateWait));
        // Applying requires a confirmed prompt.
        assert!(!UpdateWait.can_transition_to(UpdateApplying));
        // Self-transition.
        assert!(!Idle.can_transition_to(Idle));
    }

    #[test]
    fn terminal_phases() {
        assert!(PassPhase::Done.is_terminal());
        assert!(PassPhase::Failed.is_terminal());
        assert!(!PassPhase::Idle.is_terminal());
        assert!(PassPhase::Idle.is_parked());
        assert!(!PassPhase::UpdateWait.is_terminal());
    }

    #[test]
    fn display_matches_serde() {
        use PassPhase::*;
        let phases = [
            Start,
            WelcomeWait,
            WelcomeShown,
            WelcomeSkipped,
            UpdateWait,
            UpdatePrompt,
            UpdateApplying,
            CatalogCheck,
            CatalogPrompt,
            Done,
            Failed,
            Idle,
        ];
        for phase in phases {
            let display = format!("{phase}");
            let json = serde_json::to_string(&phase).unwrap();
            assert_eq!(format!("\"{display}\""), json);
        }
    }
}
