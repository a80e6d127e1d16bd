use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Intensity/duration stratum of a session, relative to its baseline window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
pub enum Stratum {
    Easy,
    Hard,
    Long,
}

impl Stratum {
    /// Bucket order of the persisted table: B1 = Easy, B2 = Hard, B3 = Long.
    pub const ALL: [Stratum; 3] = [Stratum::Easy, Stratum::Hard, Stratum::Long];

    pub fn bucket_label(self) -> &'static str {
        match self {
            Stratum::Easy => "B1",
            Stratum::Hard => "B2",
            Stratum::Long => "B3",
        }
    }
}
