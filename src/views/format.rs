use chrono::{DateTime, Utc};

pub const EXCERPT_CHARS: usize = 200;

/// "Just now", "5h ago", optionally "Yesterday", then a plain date.
pub fn relative_date(at: DateTime<Utc>, now: DateTime<Utc>, with_yesterday: bool) -> String {
    let hours = (now - at).num_hours();

    if hours < 1 {
        "Just now".to_string()
    } else if hours < 24 {
        format!("{}h ago", hours)
    } else if with_yesterday && hours < 48 {
        "Yesterday".to_string()
    } else {
        at.format("%-m/%-d/%Y").to_string()
    }
}

pub fn long_date(at: DateTime<Utc>) -> String {
    at.format("%B %-d, %Y at %I:%M %p").to_string()
}

/// First [`EXCERPT_CHARS`] characters, with "..." when something was cut.
pub fn excerpt(text: &str) -> String {
    match text.char_indices().nth(EXCERPT_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

pub fn reply_label(count: usize) -> String {
    if count == 1 {
        "1 reply".to_string()
    } else {
        format!("{} replies", count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_relative_date() {
        let now = now();

        assert_eq!(relative_date(now - Duration::minutes(59), now, true), "Just now");
        assert_eq!(relative_date(now + Duration::minutes(5), now, true), "Just now");
        assert_eq!(relative_date(now - Duration::hours(5), now, true), "5h ago");
        assert_eq!(relative_date(now - Duration::hours(30), now, true), "Yesterday");
        assert_eq!(relative_date(now - Duration::hours(30), now, false), "3/9/2024");
        assert_eq!(relative_date(now - Duration::days(9), now, true), "3/1/2024");
    }

    #[test]
    fn test_long_date() {
        let at = Utc.with_ymd_and_hms(2024, 1, 2, 15, 4, 0).unwrap();
        assert_eq!(long_date(at), "January 2, 2024 at 03:04 PM");
    }

    #[test]
    fn test_excerpt() {
        assert_eq!(excerpt("short"), "short");

        let exact = "a".repeat(200);
        assert_eq!(excerpt(&exact), exact);

        let long = "é".repeat(201);
        assert_eq!(excerpt(&long), format!("{}...", "é".repeat(200)));
    }

    #[test]
    fn test_reply_label() {
        assert_eq!(reply_label(1), "1 reply");
        assert_eq!(reply_label(3), "3 replies");
    }
}
