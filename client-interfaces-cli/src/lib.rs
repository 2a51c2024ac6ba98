pub mod error;
pub mod handlers;
pub mod input;
pub mod prompt;
pub mod render;
pub mod routes;

pub use error::*;
pub use handlers::*;
pub use prompt::*;
pub use routes::*;
