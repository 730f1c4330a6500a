use chrono::DateTime;

pub struct TimeUtils;

impl TimeUtils {
    pub const STANDARD_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
}

/// Format an epoch-seconds timestamp for log output. An out-of-range value
/// falls back to the raw number rather than panicking.
pub fn epoch_sec_to_utc(epoch_sec: i64) -> String {
    match DateTime::from_timestamp(epoch_sec, 0) {
        Some(dt) => dt.format(TimeUtils::STANDARD_TIME_FORMAT).to_string(),
        None => epoch_sec.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_formatting() {
        assert_eq!(epoch_sec_to_utc(0), "1970-01-01 00:00:00");
        assert_eq!(epoch_sec_to_utc(1528968660), "2018-06-14 09:31:00");
    }

    #[test]
    fn test_out_of_range_falls_back() {
        assert_eq!(epoch_sec_to_utc(i64::MAX), i64::MAX.to_string());
    }
}
