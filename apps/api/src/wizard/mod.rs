//! The resume-to-website wizard: step views, their guards and the actions
//! that advance from one step to the next.

use serde::Serialize;

pub mod catalog;
pub mod guard;
pub mod handlers;
pub mod site;
pub mod upload;
pub mod view;

pub use view::View;

/// Where the client should go after an action succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Navigation {
    pub next: View,
    pub location: String,
}

impl Navigation {
    pub fn to(view: View) -> Self {
        Self {
            next: view,
            location: view.location(),
        }
    }
}
