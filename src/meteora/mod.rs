pub mod bins;
pub mod client;
pub mod error;
pub mod extract;
pub mod fallback;
pub mod locate;
pub mod normalize;

pub use client::{FetchOutcome, HttpSource, PayloadSource, PoolFetcher, PoolOrigin, SoftFailure};
pub use error::FetchError;
pub use locate::locate;
pub use normalize::normalize;
