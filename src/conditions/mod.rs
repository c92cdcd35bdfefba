//! Signal derivers feeding the orchestrator.

pub mod update;
pub mod welcome;

pub use update::UpdateCondition;
pub use welcome::WelcomeCondition;
