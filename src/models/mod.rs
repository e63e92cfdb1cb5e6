mod category;
pub mod pool;
mod weights;

pub use category::Category;
pub use pool::depth_score;
pub use pool::BinSource;
pub use pool::NormalizedPool;
pub use weights::WeightKey;
pub use weights::WeightVector;
