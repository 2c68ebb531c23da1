use jiff::civil::Time;

use crate::{error::DispatchError, problem::Minutes};

/// Parses `"HH:MM"` into minutes since midnight.
pub fn parse_clock_minutes(input: &str) -> Result<Minutes, DispatchError> {
    let time = Time::strptime("%H:%M", input.trim()).map_err(|error| {
        DispatchError::invalid_argument(format!("invalid time '{input}': {error}"))
    })?;

    Ok(Minutes::from(time.hour()) * 60 + Minutes::from(time.minute()))
}

pub fn format_clock_minutes(minutes: Minutes) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_clock_minutes() {
        assert_eq!(parse_clock_minutes("00:00").unwrap(), 0);
        assert_eq!(parse_clock_minutes("06:59").unwrap(), 419);
        assert_eq!(parse_clock_minutes("14:00").unwrap(), 840);
        assert_eq!(parse_clock_minutes(" 23:59 ").unwrap(), 1439);
    }

    #[test]
    fn test_parse_clock_minutes_rejects_malformed() {
        for input in ["", "8h00", "25:00", "12:60", "noon", "12:00:00"] {
            assert!(
                matches!(
                    parse_clock_minutes(input),
                    Err(DispatchError::InvalidArgument(_))
                ),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn test_format_clock_minutes() {
        assert_eq!(format_clock_minutes(0), "00:00");
        assert_eq!(format_clock_minutes(419), "06:59");
        assert_eq!(format_clock_minutes(1439), "23:59");
    }
}
