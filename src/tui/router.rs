//! Route table and role guards.

use std::fmt;

use crate::domain::{Role, User};

/// Every screen the app can show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    PatientDashboard,
    DoctorDashboard,
    MyRecords,
    About,
    Contact,
    Download,
    /// Catch-all for unknown paths; keeps the requested path for display.
    NotFound(String),
}

impl Route {
    /// Map a path to its route. Trailing slashes are ignored.
    #[must_use]
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim();
        let normalized = match trimmed.trim_end_matches('/') {
            "" => "/",
            p => p,
        };

        match normalized {
            "/" => Self::Home,
            "/patient-dashboard" => Self::PatientDashboard,
            "/doctor-dashboard" => Self::DoctorDashboard,
            "/my-records" => Self::MyRecords,
            "/about" => Self::About,
            "/contact" => Self::Contact,
            "/download" => Self::Download,
            _ => Self::NotFound(trimmed.to_string()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Home => "/",
            Self::PatientDashboard => "/patient-dashboard",
            Self::DoctorDashboard => "/doctor-dashboard",
            Self::MyRecords => "/my-records",
            Self::About => "/about",
            Self::Contact => "/contact",
            Self::Download => "/download",
            Self::NotFound(path) => path,
        }
    }

    /// Role a session needs to see this route, if any.
    #[must_use]
    pub fn required_role(&self) -> Option<Role> {
        match self {
            Self::PatientDashboard => Some(Role::Patient),
            Self::DoctorDashboard => Some(Role::Doctor),
            _ => None,
        }
    }

    /// Apply the role guard: dashboards without a matching session go home.
    #[must_use]
    pub fn guard(self, session: Option<&User>) -> Self {
        match self.required_role() {
            Some(role) if session.map(|u| u.role) != Some(role) => Self::Home,
            _ => self,
        }
    }

    /// Dashboard for a session's role.
    #[must_use]
    pub fn dashboard_for(role: Role) -> Self {
        Self::parse(role.dashboard_path())
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
