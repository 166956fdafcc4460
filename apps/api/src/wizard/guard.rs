//! Step guard table: the one place the wizard's step order is written down.
//!
//! Each guarded view names the session keys it needs and the view to fall
//! back to when any of them is absent or malformed. `resolve` follows
//! fallbacks until it reaches a view whose own guard passes, so a redirect
//! always lands on the earliest step that can rebuild the missing state.

use tracing::info;

use crate::errors::AppError;
use crate::session::{SessionKey, SessionState};
use crate::wizard::View;

#[derive(Debug, Clone, Copy)]
pub struct Guard {
    pub view: View,
    pub requires: &'static [SessionKey],
    pub fallback: View,
}

pub const GUARDS: &[Guard] = &[
    Guard {
        view: View::Upload,
        requires: &[],
        fallback: View::Upload,
    },
    Guard {
        view: View::Pricing,
        requires: &[SessionKey::UploadedFile],
        fallback: View::Upload,
    },
    Guard {
        view: View::Processing,
        requires: &[SessionKey::UploadedFile],
        fallback: View::Upload,
    },
    Guard {
        view: View::Templates,
        requires: &[SessionKey::ParsedData],
        fallback: View::Upload,
    },
    Guard {
        view: View::Preview,
        requires: &[SessionKey::SelectedTemplate, SessionKey::ParsedData],
        fallback: View::Templates,
    },
    Guard {
        view: View::Success,
        requires: &[SessionKey::Customizations, SessionKey::ParsedData],
        fallback: View::Dashboard,
    },
];

pub fn guard_for(view: View) -> Option<&'static Guard> {
    GUARDS.iter().find(|g| g.view == view)
}

/// Returns the first required key of `view` that is not present, if any.
async fn first_missing(view: View, session: &SessionState) -> Option<SessionKey> {
    let guard = guard_for(view)?;
    for key in guard.requires {
        if !session.present(*key).await {
            return Some(*key);
        }
    }
    None
}

/// Finds the view a request for `view` should actually land on.
pub async fn resolve(view: View, session: &SessionState) -> View {
    let mut current = view;
    // Fallback chains are acyclic and shorter than the table.
    for _ in 0..=GUARDS.len() {
        let Some(missing) = first_missing(current, session).await else {
            return current;
        };
        let Some(guard) = guard_for(current) else {
            return current;
        };
        info!(
            profile = %session.profile(),
            requested = %view,
            missing = %missing,
            "Guard failed for {current}, falling back to {}",
            guard.fallback
        );
        if guard.fallback == current {
            return current;
        }
        current = guard.fallback;
    }
    current
}

/// Admits `view` or fails with a redirect to the earliest reachable step.
pub async fn enforce(view: View, session: &SessionState) -> Result<(), AppError> {
    let landed = resolve(view, session).await;
    if landed == view {
        Ok(())
    } else {
        Err(AppError::MissingPrerequisite { redirect: landed })
    }
}
