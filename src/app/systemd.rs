// Handles all interactions with the `systemctl` command.

use super::model::StatusValue;
use std::process::Command;
use tracing::debug;

/// Asks systemd whether `unit` is running.
///
/// Never fails: a `systemctl` that cannot be spawned is reported as
/// `StatusValue::Error` so the panel can show it.
pub fn check_status(unit: &str) -> StatusValue {
    let output = Command::new("systemctl")
        .arg("is-active")
        .arg(unit)
        .output();

    match output {
        Ok(output) => {
            let stdout = String::from_utf8_lossy(&output.stdout);
            debug!(unit, code = ?output.status.code(), state = %stdout.trim(), "is-active");
            classify(output.status.success(), &stdout)
        }
        Err(e) => StatusValue::Error(e.to_string()),
    }
}

/// Maps the exit status and stdout of `systemctl is-active` onto a status.
pub fn classify(success: bool, stdout: &str) -> StatusValue {
    let state = stdout.trim();
    if success {
        StatusValue::Active
    } else if state == "inactive" {
        StatusValue::Inactive
    } else {
        StatusValue::Unknown(state.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_is_active_whatever_the_output() {
        assert_eq!(classify(true, "active\n"), StatusValue::Active);
        assert_eq!(classify(true, ""), StatusValue::Active);
    }

    #[test]
    fn inactive_state_text() {
        assert_eq!(classify(false, "inactive\n"), StatusValue::Inactive);
    }

    #[test]
    fn other_failures_are_unknown() {
        let status = classify(false, "failed\n");
        assert_eq!(status, StatusValue::Unknown("failed".into()));
        assert!(status.to_string().starts_with("Unknown status ("));

        assert_eq!(
            classify(false, "").to_string(),
            "Unknown status ()"
        );
    }
}
