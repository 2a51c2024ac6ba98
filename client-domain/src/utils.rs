pub mod timestamps;

pub use timestamps::format_timestamp;
