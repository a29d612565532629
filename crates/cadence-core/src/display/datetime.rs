//! Timestamp formatting in the system timezone.

use std::fmt;

use jiff::{tz::TimeZone, Timestamp};

/// Displays a `Timestamp` as `YYYY-MM-DD HH:MM:SS TZ` in the system timezone.
///
/// Used by plan summaries; rendered plans never include timestamps so their
/// text depends on item state alone.
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let zoned = self.0.to_zoned(TimeZone::system());
        write!(f, "{}", zoned.strftime("%Y-%m-%d %H:%M:%S %Z"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_datetime_shape() {
        let ts = Timestamp::from_second(1640995200).unwrap();
        let output = LocalDateTime(&ts).to_string();
        // Date, time and a zone abbreviation, whatever the host timezone is.
        assert_eq!(output.split(' ').count(), 3);
        assert_eq!(output.len() - output.rsplit(' ').next().unwrap().len(), 20);
    }
}
