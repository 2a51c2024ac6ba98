// Local view state and its reconciliation rules

pub mod event_list;
pub mod form;
pub mod view_state;

pub use event_list::*;
pub use form::*;
pub use view_state::*;
