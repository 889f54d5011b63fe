//! Multiple-choice practice tests: question selection, timed sessions,
//! scoring, and a bounded result history.

pub mod catalog;
pub mod clock;
pub mod error;
pub mod selector;
pub mod session;
pub mod store;
pub mod summary;
pub mod types;

pub use catalog::Catalog;
pub use clock::{Clock, SessionTick, Ticker, TokioClock};
pub use error::{QuizError, Result};
pub use session::{parse_position, EngineConfig, SessionEngine, SessionSnapshot, TickOutcome};
pub use store::{JsonFileResultStore, MemoryResultStore, ResultStore};
pub use types::*;
