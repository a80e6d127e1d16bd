#[macro_use]
extern crate log;

pub mod activity_log;

mod engine;
pub use engine::{BackfillReport, HasrEngine, RowSink, SessionSource};

mod db_impl;

pub use hasr_algos as algo;
pub use hasr_db::{DatabaseHandler, SearchHasrRows};
pub use hasr_types as types;
