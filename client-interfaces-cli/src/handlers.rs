pub mod command_handlers;
pub mod query_handlers;
pub mod watch_handlers;

pub use command_handlers::*;
pub use query_handlers::*;
pub use watch_handlers::*;
