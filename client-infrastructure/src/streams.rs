pub mod sse_decoder;
pub mod sse_event_stream;

pub use sse_decoder::*;
pub use sse_event_stream::*;
