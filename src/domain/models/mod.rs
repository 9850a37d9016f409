mod completion_settings;
mod exchange;
mod message;
mod session_state;

pub use completion_settings::*;
pub use exchange::*;
pub use message::*;
pub use session_state::*;
