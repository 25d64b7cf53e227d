use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static ISO_DURATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^P(?:(?P<days>\d+)D)?(?:T(?:(?P<hours>\d+)H)?(?:(?P<minutes>\d+)M)?(?:(?P<seconds>\d+)S)?)?$")
        .unwrap()
});

static HUMAN_DURATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:(?P<days>\d+)\s*d(?:ays?)?\b)?\s*(?:(?P<hours>\d+)\s*h(?:ours?|rs?)?\b)?\s*(?:(?P<minutes>\d+)\s*m(?:in(?:s|utes)?)?\b)?")
        .unwrap()
});

const MINUTES_PER_DAY: u32 = 1440;
const MINUTES_PER_HOUR: u32 = 60;

/// Parse a recipe duration into whole minutes.
///
/// ISO-8601 (`P[n]DT[n]H[n]M[n]S`) is tried first, then loose text such as
/// `"1 hr 20 mins"`. Loose text only sums the first run of adjacent units, so
/// `"1 hr and 20 mins"` is 60. Returns `None` when nothing is recognised or the
/// total is zero.
pub fn parse_duration(text: &str) -> Option<u32> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let total = if let Some(caps) = ISO_DURATION.captures(text) {
        let seconds = component(&caps, "seconds");
        component(&caps, "days")
            .saturating_mul(MINUTES_PER_DAY)
            .saturating_add(component(&caps, "hours").saturating_mul(MINUTES_PER_HOUR))
            .saturating_add(component(&caps, "minutes"))
            .saturating_add(seconds / 60)
    } else {
        // The pattern matches the empty string everywhere; take the first
        // match that actually captured a number.
        let caps = HUMAN_DURATION.captures_iter(text).find(|caps| {
            ["days", "hours", "minutes"]
                .iter()
                .any(|name| caps.name(name).is_some())
        })?;
        component(&caps, "days")
            .saturating_mul(MINUTES_PER_DAY)
            .saturating_add(component(&caps, "hours").saturating_mul(MINUTES_PER_HOUR))
            .saturating_add(component(&caps, "minutes"))
    };

    (total > 0).then_some(total)
}

fn component(caps: &Captures<'_>, name: &str) -> u32 {
    caps.name(name)
        .map(|m| m.as_str().parse::<u32>().unwrap_or(u32::MAX))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso_durations() {
        assert_eq!(parse_duration("PT1H30M"), Some(90));
        assert_eq!(parse_duration("P1DT2H"), Some(1560));
        assert_eq!(parse_duration("PT15M"), Some(15));
        assert_eq!(parse_duration("PT90M"), Some(90));
        assert_eq!(parse_duration("PT5400S"), Some(90));
        assert_eq!(parse_duration("PT1H0M59S"), Some(60));
        assert_eq!(parse_duration("  PT20M  "), Some(20));
    }

    #[test]
    fn test_zero_is_absent() {
        assert_eq!(parse_duration("PT0M"), None);
        assert_eq!(parse_duration("P0D"), None);
        assert_eq!(parse_duration("PT30S"), None);
        assert_eq!(parse_duration("P"), None);
        assert_eq!(parse_duration("0 mins"), None);
    }

    #[test]
    fn test_human_durations() {
        assert_eq!(parse_duration("1 hour 20 minutes"), Some(80));
        assert_eq!(parse_duration("45 mins"), Some(45));
        assert_eq!(parse_duration("2 hrs"), Some(120));
        assert_eq!(parse_duration("1 day"), Some(1440));
        assert_eq!(parse_duration("1 Hour 5 Min"), Some(65));
        assert_eq!(parse_duration("Ready in 25 minutes"), Some(25));
    }

    #[test]
    fn test_human_duration_uses_first_run() {
        // Units must be adjacent; text between them ends the match
        assert_eq!(parse_duration("1 hr and 20 mins"), Some(60));
        assert_eq!(parse_duration("1 hr 20 mins"), Some(80));
    }

    #[test]
    fn test_unrecognised() {
        assert_eq!(parse_duration(""), None);
        assert_eq!(parse_duration("   "), None);
        assert_eq!(parse_duration("overnight"), None);
        assert_eq!(parse_duration("a few minutes"), None);
    }

    #[test]
    fn test_huge_values_saturate() {
        assert_eq!(parse_duration("P99999999999D"), Some(u32::MAX));
    }
}
