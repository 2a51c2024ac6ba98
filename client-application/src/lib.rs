// Client Application Layer

pub mod commands;
pub mod controller;
pub mod error;
pub mod metrics;
pub mod notifications;
pub mod queries;
pub mod sources;
pub mod state;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

pub use controller::{ClientHandle, Command, EventStreamClient};
pub use error::AppError;
pub use metrics::ClientMetrics;
pub use state::AppState;
pub use view::{EventForm, EventList, FormField, Reconciled, ViewState};
