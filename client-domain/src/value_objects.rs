// Domain value objects
pub mod event_status;
pub mod event_type;
pub mod identifiers;
pub mod update_mode;

pub use event_status::*;
pub use event_type::*;
pub use identifiers::*;
pub use update_mode::*;
