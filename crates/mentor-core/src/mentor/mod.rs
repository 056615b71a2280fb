mod generator;
mod intent;
mod simulate;
mod style;

pub use generator::{simulated_delay, MentorReplier, ReplyGenerator, ReplyRequest};
pub use intent::{classify, hash_code, pick_index, Intent};
pub use simulate::{simulate_reply, LocalReply};
pub use style::MentorStyle;
