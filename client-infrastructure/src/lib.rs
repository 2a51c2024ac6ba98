pub mod config;
pub mod gateways;
pub mod streams;
pub mod utils;

pub use config::*;
pub use gateways::*;
pub use streams::*;
pub use utils::*;
