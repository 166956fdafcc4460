//! Mock authentication: login, registration and logout against the
//! profile's own credential set, plus the middleware guarding every
//! protected route.

pub mod gate;
pub mod handlers;
pub mod middleware;
pub mod password;

pub use gate::{AuthGate, AuthState};
pub use middleware::{require_auth, CurrentUser};
