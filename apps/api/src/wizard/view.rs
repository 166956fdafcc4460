use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Every navigable view of the product flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Login,
    Register,
    Dashboard,
    Upload,
    Pricing,
    Processing,
    Templates,
    Preview,
    Success,
}

impl View {
    pub const ALL: [View; 9] = [
        View::Login,
        View::Register,
        View::Dashboard,
        View::Upload,
        View::Pricing,
        View::Processing,
        View::Templates,
        View::Preview,
        View::Success,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            View::Login => "login",
            View::Register => "register",
            View::Dashboard => "dashboard",
            View::Upload => "upload",
            View::Pricing => "pricing",
            View::Processing => "processing",
            View::Templates => "templates",
            View::Preview => "preview",
            View::Success => "success",
        }
    }

    /// Entry views reachable without a session user.
    pub const fn is_public(self) -> bool {
        matches!(self, View::Login | View::Register)
    }

    /// Route a client navigates to in order to enter this view.
    pub fn location(self) -> String {
        if self.is_public() {
            format!("/api/v1/auth/{}", self.as_str())
        } else {
            format!("/api/v1/views/{}", self.as_str())
        }
    }
}

impl FromStr for View {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        View::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| format!("unknown view '{s}'"))
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
