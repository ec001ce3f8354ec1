use crate::domain::ActionContext;

/// The state-transition contract.
///
/// An executor evaluates an action against `context.previous_state` and
/// either returns an output carrying the successor state or an error. An error
/// means the whole transition is discarded: no partial state ever escapes.
pub trait StateTransition<A> {
    /// Successful result (successor state plus any action-specific data).
    type Output;
    /// Validation error.
    type Error: std::error::Error;

    /// Evaluates `action`.
    ///
    /// # Errors
    /// Any validation failure; the caller must drop the attempted transition.
    fn execute(&self, action: &A, context: &ActionContext) -> Result<Self::Output, Self::Error>;
}
