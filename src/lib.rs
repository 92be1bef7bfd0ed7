pub mod aggregate;
pub mod config;
pub mod dedup;
pub mod engine;
pub mod error;
pub mod feed_fetch;
pub mod game_log;
pub mod head_to_head;
pub mod http_client;
pub mod normalize;
pub mod report_export;
pub mod select;
pub mod smart_bets;
pub mod team_insights;
pub mod team_names;

pub use engine::StatAggregator;
pub use error::StatError;
pub use game_log::{GameLogRow, Stat, StatLine};
pub use select::Selection;
