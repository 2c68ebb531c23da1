use jiff::{SignedDuration, Span, SpanRelativeTo};

fn parse_span(input: &str) -> Option<SignedDuration> {
    let span = input.parse::<Span>().ok()?;
    span.to_duration(SpanRelativeTo::days_are_24_hours()).ok()
}

/// Accepts "5s" or "1m 30s", ISO 8601 ("PT1M30S") or a whole number of seconds.
pub fn parse_duration(input: &str) -> Result<SignedDuration, String> {
    let input = input.trim();

    input
        .parse::<SignedDuration>()
        .ok()
        .or_else(|| parse_span(input))
        .or_else(|| {
            input
                .parse::<u32>()
                .ok()
                .map(|seconds| SignedDuration::from_secs(i64::from(seconds)))
        })
        .ok_or_else(|| format!("'{input}' is not a duration, try \"5s\", \"PT1M\" or \"30\""))
}

pub fn parse_positive_duration(input: &str) -> Result<SignedDuration, String> {
    match parse_duration(input)? {
        duration if !duration.is_zero() && !duration.is_negative() => Ok(duration),
        _ => Err(format!("budget '{input}' must be longer than zero")),
    }
}
