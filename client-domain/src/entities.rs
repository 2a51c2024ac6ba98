// Domain entities

pub mod client_config;
pub mod connection;
pub mod draft;
pub mod event;
pub mod notification;
pub mod stats;
pub mod stream_message;

pub use client_config::*;
pub use connection::*;
pub use draft::*;
pub use event::*;
pub use notification::*;
pub use stats::*;
pub use stream_message::*;
