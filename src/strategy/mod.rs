pub mod analysis;
pub mod ranking;
pub mod session;

pub use analysis::{score, AdmissionCriteria, ScoredPool};
pub use ranking::{rank, RankQuery};
pub use session::{PoolSession, SessionStatus};
