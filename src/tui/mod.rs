//! TUI module: Terminal User Interface using Ratatui.
//!
//! Provides the Verolix screens:
//! - Landing page with sign-in, registration and BMI calculator
//! - Patient and doctor dashboards
//! - Record search and informational pages

mod app;
mod router;
mod styles;
mod ui;
mod worker;

pub use app::App;
pub use router::Route;
pub use styles::MedicalTheme;
pub use worker::{CancellationToken, DelayedTask, DelayedTaskHandle, TaskPoll};
