mod service;
mod timer;
mod view;

pub use service::GameService;
pub use timer::RoundTimer;
pub use view::{GameOverSummary, GameSnapshot, answer_message};
