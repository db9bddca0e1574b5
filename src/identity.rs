//! Author/committer/tagger identities. The KVLM codec treats these as
//! opaque header values; this module only exists to format the conventional
//! `Name <email> timestamp tz` shape the CLI writes, the way
//! `examples/gausk-git-rs/src/commit.rs` does.

use chrono::Local;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub email: String,
}

impl Identity {
    /// Parses `"Name <email>"`.
    pub fn parse(s: &str) -> Option<Identity> {
        let (name, rest) = s.split_once('<')?;
        let email = rest.strip_suffix('>')?;
        Some(Identity {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
        })
    }

    /// Renders `"Name <email> timestamp tz"`, the header-value shape used
    /// by `author`/`committer`/`tagger` lines.
    pub fn format_at(&self, timestamp: i64, timezone: &str) -> String {
        format!("{} <{}> {} {}", self.name, self.email, timestamp, timezone)
    }
}

/// The current time as a Unix timestamp plus a `+HHMM`/`-HHMM` offset
/// string, matching the teacher's `get_time_and_timezone`.
pub fn now_timestamp_and_offset() -> (i64, String) {
    let now = Local::now();
    let timestamp = now.timestamp();
    let offset_seconds = now.offset().local_minus_utc();
    let hours = offset_seconds / 3600;
    let minutes = offset_seconds.abs() % 3600 / 60;
    (timestamp, format!("{:+03}{:02}", hours, minutes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_name_and_email() {
        let identity = Identity::parse("Ada Lovelace <ada@example.com>").unwrap();
        assert_eq!(identity.name, "Ada Lovelace");
        assert_eq!(identity.email, "ada@example.com");
    }

    #[test]
    fn formats_with_timestamp_and_timezone() {
        let identity = Identity {
            name: "Ada".into(),
            email: "ada@example.com".into(),
        };
        assert_eq!(
            identity.format_at(1697750400, "+0530"),
            "Ada <ada@example.com> 1697750400 +0530"
        );
    }

    #[test]
    fn rejects_missing_brackets() {
        assert!(Identity::parse("Ada Lovelace").is_none());
    }
}
