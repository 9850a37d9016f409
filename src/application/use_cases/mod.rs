mod answer_question;
mod chat_session;
mod load_grounding;
mod render_history;

pub use answer_question::*;
pub use chat_session::*;
pub use load_grounding::*;
pub use render_history::*;
