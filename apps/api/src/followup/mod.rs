// Follow-up workflow: generate a draft from a transcript, hold it in a session,
// then live-send or mock-send it.

pub mod handlers;
pub mod session;
pub mod workflow;
