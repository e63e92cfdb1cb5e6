use chrono::{DateTime, TimeZone, Utc};

/// Epoch values above this are treated as milliseconds
const MILLIS_THRESHOLD: f64 = 1e11;

/// Convert a percentage (38.5) into a ratio (0.385)
pub fn percent_to_ratio(percent: f64) -> f64 {
    percent / 100.0
}

/// Convert an epoch timestamp in seconds or milliseconds to a UTC datetime
pub fn epoch_to_datetime(epoch: f64) -> Option<DateTime<Utc>> {
    if !epoch.is_finite() || epoch < 0.0 {
        return None;
    }

    let millis = if epoch > MILLIS_THRESHOLD { epoch } else { epoch * 1000.0 };
    Utc.timestamp_millis_opt(millis as i64).single()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_to_ratio() {
        assert!((percent_to_ratio(38.0) - 0.38).abs() < 1e-12);
        assert_eq!(percent_to_ratio(0.0), 0.0);
    }

    #[test]
    fn test_epoch_seconds_and_millis_agree() {
        let from_secs = epoch_to_datetime(1_700_000_000.0).unwrap();
        let from_millis = epoch_to_datetime(1_700_000_000_000.0).unwrap();
        assert_eq!(from_secs, from_millis);
        assert!(epoch_to_datetime(f64::NAN).is_none());
        assert!(epoch_to_datetime(-1.0).is_none());
    }
}
