mod convert;
mod format;

pub use convert::epoch_to_datetime;
pub use convert::percent_to_ratio;
pub use format::format_address;
pub use format::format_percent;
pub use format::format_usd;
pub use format::pool_url;
