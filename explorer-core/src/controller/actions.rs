//! src/controller/actions.rs
//! ============================================================================
//! # Actions: signals the controller sends outward
//!
//! The controller never owns the router. When a navigator operation decides
//! where the user should be, it says so on the action channel and whoever
//! owns routing (the terminal front end here) follows.

/// A request from the controller to its host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Route to the given path.
    Navigate(String),
}
