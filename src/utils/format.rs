/// Seconds as zero-padded `mm:ss`; fractions are floored.
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// `mm:ss` back to seconds.
pub fn parse_duration(value: &str) -> Option<u32> {
    let (minutes, seconds) = value.trim().split_once(':')?;
    let minutes: u32 = minutes.parse().ok()?;
    let seconds: u32 = seconds.parse().ok()?;
    if seconds >= 60 {
        return None;
    }
    Some(minutes * 60 + seconds)
}

/// `film-&-video-production` -> `Film & Video Production`
pub fn format_category_name(category: &str) -> String {
    category
        .split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn time_is_padded() {
        assert_eq!(format_time(0.0), "00:00");
        assert_eq!(format_time(12.5), "00:12");
        assert_eq!(format_time(754.9), "12:34");
        assert_eq!(format_time(-3.0), "00:00");
        assert_eq!(format_time(f64::NAN), "00:00");
    }

    #[test]
    fn durations() {
        assert_eq!(parse_duration("12:35"), Some(755));
        assert_eq!(parse_duration("03:15"), Some(195));
        assert_eq!(parse_duration("3:75"), None);
        assert_eq!(parse_duration("abc"), None);
    }

    #[test]
    fn category_names() {
        assert_eq!(format_category_name("digital-marketing"), "Digital Marketing");
        assert_eq!(
            format_category_name("film-&-video-production"),
            "Film & Video Production"
        );
        assert_eq!(
            format_category_name("AI-research-&-innovation"),
            "AI Research & Innovation"
        );
        assert_eq!(format_category_name("all"), "All");
    }
}
