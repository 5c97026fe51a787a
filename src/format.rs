//! The pluggable string-format checker (`format` keyword).
use std::collections::HashMap;
use std::net::IpAddr;
use std::str::FromStr;

use regex::Regex;

lazy_static::lazy_static! {
    static ref HOSTNAME_RE: Regex =
        Regex::new(r"^[A-Za-z0-9][A-Za-z0-9.\-]{1,255}$").expect("valid regex");
    static ref DATE_RE: Regex = Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid regex");
    static ref TIME_RE: Regex = Regex::new(r"^[0-9]{2}:[0-9]{2}:[0-9]{2}$").expect("valid regex");
    static ref HEX_COLOR_RE: Regex = Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("valid regex");
}

const CSS21_COLOR_NAMES: &[&str] = &[
    "maroon", "red", "orange", "yellow", "olive", "purple", "fuchsia", "white", "lime", "green",
    "navy", "blue", "aqua", "teal", "black", "silver", "gray",
];

fn is_email(instance: &str) -> bool {
    instance.contains('@')
}

fn is_ipv4(instance: &str) -> bool {
    // A leading-zero octet (e.g. "010.0.0.1") is rejected outright: some
    // platforms' libc parse it as octal, which `std::net` does not, but the
    // ambiguity is exactly the kind of input this format should flag.
    if instance.split('.').any(|part| part.len() > 1 && part.starts_with('0')) {
        return false;
    }
    matches!(IpAddr::from_str(instance), Ok(IpAddr::V4(_)))
}

fn is_ipv6(instance: &str) -> bool {
    matches!(IpAddr::from_str(instance), Ok(IpAddr::V6(_)))
}

fn is_hostname(instance: &str) -> bool {
    if instance.is_empty() || instance.len() > 255 {
        return false;
    }
    if instance.starts_with('-') || instance.ends_with('-') {
        return false;
    }
    if !HOSTNAME_RE.is_match(instance) {
        return false;
    }
    instance.split('.').all(|label| !label.is_empty() && label.len() <= 63)
}

fn is_regex(instance: &str) -> bool {
    Regex::new(instance).is_ok()
}

fn is_date(instance: &str) -> bool {
    if !DATE_RE.is_match(instance) {
        return false;
    }
    chrono::NaiveDate::parse_from_str(instance, "%Y-%m-%d").is_ok()
}

fn is_time(instance: &str) -> bool {
    if !TIME_RE.is_match(instance) {
        return false;
    }
    chrono::NaiveTime::parse_from_str(instance, "%H:%M:%S").is_ok()
}

fn is_uri(instance: &str) -> bool {
    url::Url::parse(instance).is_ok()
}

fn is_date_time(instance: &str) -> bool {
    chrono::DateTime::parse_from_rfc3339(instance).is_ok()
}

fn is_css21_color(instance: &str) -> bool {
    let lower = instance.to_ascii_lowercase();
    CSS21_COLOR_NAMES.contains(&lower.as_str()) || HEX_COLOR_RE.is_match(instance)
}

type Predicate = Box<dyn Fn(&str) -> bool + Send + Sync>;

/// `FormatChecker(formats=None)`: a string-indexed collection of `(string ->
/// bool)` predicates. An unregistered format name is accepted trivially
/// (`conforms` returns `true`), matching the "format is advisory unless
/// recognized" contract of both drafts.
#[derive(Default)]
pub struct FormatChecker {
    formats: HashMap<String, Predicate>,
}

impl FormatChecker {
    pub fn new() -> Self {
        FormatChecker { formats: HashMap::new() }
    }

    /// Register or replace the predicate for `name`.
    pub fn register<F>(&mut self, name: impl Into<String>, predicate: F)
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.formats.insert(name.into(), Box::new(predicate));
    }

    /// `conforms(instance, name)`.
    pub fn conforms(&self, instance: &str, name: &str) -> bool {
        match self.formats.get(name) {
            Some(predicate) => predicate(instance),
            None => true,
        }
    }

    /// The format registry used by draft-03 schemas: legacy `ip-address`/
    /// `host-name` spellings, plus the draft-03-only `color` keyword.
    pub fn draft3() -> Self {
        let mut checker = FormatChecker::new();
        checker.register("email", is_email);
        checker.register("ip-address", is_ipv4);
        checker.register("ipv6", is_ipv6);
        checker.register("host-name", is_hostname);
        checker.register("regex", is_regex);
        checker.register("date", is_date);
        checker.register("time", is_time);
        checker.register("uri", is_uri);
        checker.register("date-time", is_date_time);
        checker.register("color", is_css21_color);
        checker
    }

    /// The format registry used by draft-04 schemas.
    pub fn draft4() -> Self {
        let mut checker = FormatChecker::new();
        checker.register("email", is_email);
        checker.register("ipv4", is_ipv4);
        checker.register("ipv6", is_ipv6);
        checker.register("hostname", is_hostname);
        checker.register("regex", is_regex);
        checker.register("date", is_date);
        checker.register("time", is_time);
        checker.register("uri", is_uri);
        checker.register("date-time", is_date_time);
        checker
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("user@example.com", true)]
    #[test_case("not-an-email", false)]
    fn email(instance: &str, expected: bool) {
        assert_eq!(is_email(instance), expected);
    }

    #[test_case("192.168.0.1", true)]
    #[test_case("999.999.999.999", false)]
    #[test_case("010.0.0.1", false)]
    #[test_case("not-an-ip", false)]
    fn ipv4(instance: &str, expected: bool) {
        assert_eq!(is_ipv4(instance), expected);
    }

    #[test_case("::1", true)]
    #[test_case("192.168.0.1", false)]
    fn ipv6(instance: &str, expected: bool) {
        assert_eq!(is_ipv6(instance), expected);
    }

    #[test_case("example.com", true)]
    #[test_case("-example.com", false)]
    #[test_case("example-.com", false)]
    fn hostname(instance: &str, expected: bool) {
        assert_eq!(is_hostname(instance), expected);
    }

    #[test_case("2020-01-02", true)]
    #[test_case("2020-1-2", false)]
    #[test_case("not-a-date", false)]
    fn date(instance: &str, expected: bool) {
        assert_eq!(is_date(instance), expected);
    }

    #[test_case("red", true)]
    #[test_case("RED", true)]
    #[test_case("#fff", true)]
    #[test_case("#ABCDEF", true)]
    #[test_case("plaid", false)]
    fn color(instance: &str, expected: bool) {
        assert_eq!(is_css21_color(instance), expected);
    }

    #[test]
    fn unregistered_format_conforms_trivially() {
        let checker = FormatChecker::new();
        assert!(checker.conforms("anything", "no-such-format"));
    }

    #[test]
    fn draft3_uses_legacy_names() {
        let checker = FormatChecker::draft3();
        assert!(checker.conforms("192.168.0.1", "ip-address"));
        assert!(checker.conforms("red", "color"));
    }

    #[test]
    fn draft4_has_no_color_format() {
        let checker = FormatChecker::draft4();
        // Unregistered in draft-04; conforms trivially, it is not rejected.
        assert!(checker.conforms("not-a-color-at-all!!", "color"));
    }
}
