//! Provider dashboard engine.
//!
//! The engine owns the client-side state of the administration dashboard:
//!
//! - [`ProviderList`]: the cached provider collection, search and selection
//! - [`DraftEditor`]: the `Listing` / `Editing(Creating | Updating)` machine
//! - [`PaymentsPanel`]: billing history for the provider being edited
//! - [`Dashboard`]: ties the three together behind a message-driven `update`
//!
//! State changes are pure; network work is described as [`Effect`]s and run
//! by the caller, either on spawned tasks or through the sequential [`Driver`].

mod dashboard;
mod editor;
mod executor;
mod list;
mod message;
mod payments;
#[cfg(test)]
mod testing;

pub use dashboard::{Clock, Dashboard};
pub use editor::{DraftEditor, EditMode};
pub use executor::{Confirmer, Driver, execute};
pub use list::ProviderList;
pub use message::{Completion, Confirmation, Effect, Msg, PendingAction, Response, Ticket};
pub use payments::PaymentsPanel;
