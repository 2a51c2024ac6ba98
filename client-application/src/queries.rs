pub mod event_queries;
pub mod snapshot_queries;
