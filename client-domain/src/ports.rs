// Gateway and Prompt Port Traits (Interfaces)
// Define what the client needs from the event service and the user

pub mod gateways;
pub mod prompts;

pub use gateways::*;
pub use prompts::*;
