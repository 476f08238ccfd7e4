//! amz-color-counter - Tally Amazon product reviews per color variant
//!
//! Walks every reviews page of a product, reads the purchased variant from
//! each review's metadata line and reports how the reviews split by color.

pub mod amazon;
pub mod commands;
pub mod config;
pub mod error;
pub mod format;
pub mod tally;

pub use amazon::models::ReviewPage;
pub use config::Config;
pub use error::CounterError;
pub use tally::{ColorTally, TallyRow};
