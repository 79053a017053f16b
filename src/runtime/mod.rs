//! Per-session render state and the reducer that advances it.
//!
//! # Architecture
//!
//! ```text
//! ValidMessage ──→ RuntimeReducer ──→ RuntimeState ──→ renderer
//! ```
//!
//! - **State**: immutable snapshot of every surface
//! - **Intent**: one validated protocol message
//! - **Reducer**: pure function that produces the next snapshot

mod reducer;
mod state;

pub use reducer::RuntimeReducer;
pub use state::RuntimeState;

/// Reducer transforms state based on intents.
///
/// It must be a pure function: (State, Intent) -> State
pub trait Reducer {
    /// The state type this reducer operates on.
    type State: Clone + PartialEq + Default + Send + 'static;

    /// The intent type this reducer handles.
    type Intent: Send + 'static;

    /// Process an intent and return the new state.
    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
