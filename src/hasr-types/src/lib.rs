mod session;
pub use session::{Session, SessionError};

mod stratum;
pub use stratum::Stratum;

pub mod row;
pub use row::{
    BucketSummary, HasrRow, HasrScore, SessionClassification, WindowSummary, WithinRatios,
    column_names,
};
