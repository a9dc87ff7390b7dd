//! Rule-based chat assistant. Static keyword table, no learning, no I/O.

pub mod answers;
pub mod intents;

pub use answers::{answer, chat_tier, respond};
pub use intents::{classify_intent, ChatIntent};
