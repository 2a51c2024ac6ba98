pub mod context;
pub mod lifecycle;

pub use context::{AppContext, Overrides};
pub use lifecycle::run;
