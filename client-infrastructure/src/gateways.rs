pub mod http_event_gateway;

pub use http_event_gateway::*;
