use serde::{Deserialize, Serialize};

/// A span of time within one day, in fractional hours (8.5 = 08:30).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeInterval {
    pub start: f32,
    pub end: f32,
}

impl TimeInterval {
    /// Build a well-formed interval: endpoints clamped to [0, 24] and ordered.
    pub fn new(start: f32, end: f32) -> Self {
        let a = start.clamp(0.0, 24.0);
        let b = end.clamp(0.0, 24.0);
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    pub fn width(&self) -> f32 {
        self.end - self.start
    }

    pub fn contains(&self, hour: f32) -> bool {
        hour >= self.start && hour < self.end
    }

    /// Format as "HH:MM – HH:MM" for labels and tooltips.
    pub fn display(&self) -> String {
        format!("{} – {}", format_hour(self.start), format_hour(self.end))
    }
}

/// Format a fractional hour as "HH:MM".
pub fn format_hour(hour: f32) -> String {
    let clamped = hour.clamp(0.0, 24.0);
    let h = clamped.floor() as u32;
    let m = ((clamped - h as f32) * 60.0).round() as u32;
    // 7.9999 rounds to 60 minutes; carry into the hour
    if m >= 60 {
        format!("{:02}:00", h + 1)
    } else {
        format!("{:02}:{:02}", h, m)
    }
}

/// Parse a clock time as fractional hours.
///
/// Accepts "HH:MM", a bare hour "8", or decimal hours "8.5".
pub fn parse_hour(s: &str) -> Option<f32> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Some((h, m)) = s.split_once(':') {
        return match (h.trim().parse::<u32>(), m.trim().parse::<u32>()) {
            (Ok(h), Ok(m)) if m < 60 => valid_hour(h as f32 + m as f32 / 60.0),
            _ => None,
        };
    }

    s.parse::<f32>().ok().and_then(valid_hour)
}

fn valid_hour(h: f32) -> Option<f32> {
    (0.0..=24.0).contains(&h).then_some(h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_orders_and_clamps() {
        let i = TimeInterval::new(17.0, 8.0);
        assert_eq!(i.start, 8.0);
        assert_eq!(i.end, 17.0);

        let i = TimeInterval::new(-2.0, 30.0);
        assert_eq!(i.start, 0.0);
        assert_eq!(i.end, 24.0);
    }

    #[test]
    fn width_and_contains() {
        let i = TimeInterval::new(8.0, 16.5);
        assert_eq!(i.width(), 8.5);
        assert!(i.contains(8.0));
        assert!(i.contains(16.0));
        assert!(!i.contains(16.5));
        assert!(!i.contains(7.99));
    }

    #[test]
    fn format_hour_rounds_minutes() {
        assert_eq!(format_hour(8.5), "08:30");
        assert_eq!(format_hour(0.0), "00:00");
        assert_eq!(format_hour(16.25), "16:15");
        assert_eq!(format_hour(7.9999), "08:00");
    }

    #[test]
    fn parse_clock_times() {
        assert_eq!(parse_hour("08:30"), Some(8.5));
        assert_eq!(parse_hour(" 16:15 "), Some(16.25));
        assert_eq!(parse_hour("8"), Some(8.0));
    }

    #[test]
    fn parse_decimal_hours() {
        assert_eq!(parse_hour("8.5"), Some(8.5));
        assert_eq!(parse_hour("17.75"), Some(17.75));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(parse_hour(""), None);
        assert_eq!(parse_hour("25:00"), None);
        assert_eq!(parse_hour("08:75"), None);
        assert_eq!(parse_hour("noon"), None);
        assert_eq!(parse_hour("-3"), None);
    }
}
