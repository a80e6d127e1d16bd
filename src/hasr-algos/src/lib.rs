pub(crate) mod config;
pub use config::{ConfigError, HasrConfig, MAX_WINDOW_DAYS, StratumWeights};

pub(crate) mod decay;
pub use decay::WeightProfile;

pub(crate) mod series;
pub use series::LoadSeries;

pub mod stratifier;
pub use stratifier::{Bucket, Strata, Thresholds};

pub mod window;
pub use window::{BaselineWindow, RecentWindow, WeightedWindow, WindowAggregator, WindowRange};

pub(crate) mod hasr;
pub use hasr::HasrCalculator;

pub mod helpers;
