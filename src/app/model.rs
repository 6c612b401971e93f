// Defines the core data structures for the application.

use std::fmt;

/// Run state of the monitored unit as reported by `systemctl is-active`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusValue {
    Active,
    Inactive,
    /// Non-zero exit with some other state text, e.g. "failed".
    Unknown(String),
    /// `systemctl` could not be run at all.
    Error(String),
}

impl fmt::Display for StatusValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusValue::Active => f.write_str("Active"),
            StatusValue::Inactive => f.write_str("Inactive"),
            StatusValue::Unknown(raw) => write!(f, "Unknown status ({raw})"),
            StatusValue::Error(msg) => write!(f, "Error checking status ({msg})"),
        }
    }
}

/// What the panel shows: the unit status and the listening services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub status: StatusValue,
    pub services: Vec<String>, // e.g. "FTP on Port 21"
}

impl Snapshot {
    pub fn new(status: StatusValue, services: Vec<String>) -> Self {
        Self { status, services }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_text_matches_panel_wording() {
        assert_eq!(StatusValue::Active.to_string(), "Active");
        assert_eq!(StatusValue::Inactive.to_string(), "Inactive");
        assert_eq!(
            StatusValue::Unknown("failed".into()).to_string(),
            "Unknown status (failed)"
        );
        assert_eq!(
            StatusValue::Error("No such file or directory (os error 2)".into()).to_string(),
            "Error checking status (No such file or directory (os error 2))"
        );
    }

    #[test]
    fn snapshots_compare_by_value() {
        let a = Snapshot::new(StatusValue::Active, vec!["FTP on Port 21".into()]);
        let b = Snapshot::new(StatusValue::Active, vec!["FTP on Port 21".into()]);
        assert_eq!(a, b);

        let c = Snapshot::new(StatusValue::Inactive, vec!["FTP on Port 21".into()]);
        assert_ne!(a, c);

        let d = Snapshot::new(StatusValue::Active, vec!["FTP on Port 2121".into()]);
        assert_ne!(a, d);
    }
}
