//! Startup notifier — decides which startup dialogs the user is owed and
//! sequences them: a one-time welcome notice, then the software-update prompt.

pub mod api;
pub mod conditions;
pub mod config;
pub mod dialogs;
pub mod error;
pub mod orchestrator;
pub mod services;
pub mod state;
