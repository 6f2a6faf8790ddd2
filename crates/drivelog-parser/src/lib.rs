pub mod errors;
pub mod model;
pub mod schema;
mod common;
mod play_by_play;

pub use errors::ParserError;
pub use model::{ParseSummary, ParsedPlayByPlay};
pub use play_by_play::{parse_play_by_play, stack_play_by_play};
