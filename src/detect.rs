//! Assistant detection
//!
//! An assistant counts as installed when its binary is on `PATH`, its
//! `.<id>` directory exists in the project, or both.

use regex::Regex;
use serde::Serialize;
use std::path::Path;
use std::process::Stdio;
use std::sync::LazyLock;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, info};

use crate::config::assistant_dir;
use crate::targets::{TargetId, TargetProfile, TargetRegistry};

/// How long `<binary> --version` may run
pub const VERSION_TIMEOUT: Duration = Duration::from_secs(5);

/// Detection result for one assistant
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssistantStatus {
    pub id: TargetId,
    pub name: &'static str,
    pub emoji: &'static str,
    pub binary_found: bool,
    pub config_exists: bool,
    pub version: Option<String>,
}

impl AssistantStatus {
    /// Binary and project directory both present
    pub fn is_active(&self) -> bool {
        self.binary_found && self.config_exists
    }

    /// Either signal present
    pub fn is_detected(&self) -> bool {
        self.binary_found || self.config_exists
    }

    pub fn status_text(&self) -> &'static str {
        match (self.binary_found, self.config_exists) {
            (true, true) => "Active",
            (true, false) => "Binary",
            (false, true) => "Config",
            (false, false) => "Not detected",
        }
    }

    pub fn status_icon(&self) -> &'static str {
        if self.is_active() {
            "🟢"
        } else if self.is_detected() {
            "🟡"
        } else {
            "🔴"
        }
    }
}

/// Detect one assistant for a project
pub async fn detect(profile: &TargetProfile, project_root: &Path) -> AssistantStatus {
    let binary_found = which::which(profile.binary).is_ok();
    let config_exists = assistant_dir(project_root, profile.id).is_dir();

    let version = if binary_found {
        binary_version(profile.binary, VERSION_TIMEOUT).await
    } else {
        None
    };

    let status = AssistantStatus {
        id: profile.id,
        name: profile.name,
        emoji: profile.emoji,
        binary_found,
        config_exists,
        version,
    };
    info!(
        "{}: binary={}, config={}, active={}",
        status.name,
        status.binary_found,
        status.config_exists,
        status.is_active()
    );
    status
}

/// Detect every registered assistant, in registry order
pub async fn detect_all(registry: &TargetRegistry, project_root: &Path) -> Vec<AssistantStatus> {
    let mut statuses = Vec::new();
    for profile in registry.iter() {
        statuses.push(detect(profile, project_root).await);
    }
    statuses
}

/// Run `<binary> --version` and pull out the first `x.y.z`
async fn binary_version(binary: &str, timeout: Duration) -> Option<String> {
    let mut command = Command::new(binary);
    command
        .arg("--version")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true);

    match tokio::time::timeout(timeout, command.output()).await {
        Ok(Ok(output)) if output.status.success() => {
            extract_version(&String::from_utf8_lossy(&output.stdout))
        }
        Ok(Ok(output)) => {
            debug!("{} --version exited with {}", binary, output.status);
            None
        }
        Ok(Err(e)) => {
            debug!("{} --version failed: {}", binary, e);
            None
        }
        Err(_) => {
            debug!("{} --version timed out after {:?}", binary, timeout);
            None
        }
    }
}

/// Matches the first `x.y.z` in `--version` output
static VERSION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+\.\d+\.\d+)").expect("Invalid regex"));

/// First run of three dot-separated numbers, e.g. `1.2.3` in `tool v1.2.3-beta`
pub fn extract_version(text: &str) -> Option<String> {
    VERSION_REGEX.captures(text).map(|caps| caps[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProjectConfig;

    fn status(binary_found: bool, config_exists: bool) -> AssistantStatus {
        AssistantStatus {
            id: TargetId::Cursor,
            name: "Cursor",
            emoji: "⚡",
            binary_found,
            config_exists,
            version: None,
        }
    }

    #[test]
    fn test_status_text_and_icon() {
        assert_eq!(status(true, true).status_text(), "Active");
        assert_eq!(status(true, true).status_icon(), "🟢");
        assert_eq!(status(true, false).status_text(), "Binary");
        assert_eq!(status(false, true).status_text(), "Config");
        assert_eq!(status(false, true).status_icon(), "🟡");
        assert_eq!(status(false, false).status_text(), "Not detected");
        assert!(!status(false, false).is_detected());
    }

    #[test]
    fn test_extract_version() {
        assert_eq!(extract_version("opencode 0.3.12\n"), Some("0.3.12".to_string()));
        assert_eq!(
            extract_version("Cursor v1.2.3-beta (build 45.6)"),
            Some("1.2.3".to_string())
        );
        assert_eq!(extract_version("2.0 then 10.20.30"), Some("10.20.30".to_string()));
        assert_eq!(extract_version("1.2.3.4"), Some("1.2.3".to_string()));
        assert_eq!(extract_version("1.2.x 3.4.5"), Some("3.4.5".to_string()));
        assert_eq!(extract_version("version 1.2."), None);
        assert_eq!(extract_version("no version"), None);
    }

    #[tokio::test]
    async fn test_config_dir_detected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(".claude")).unwrap();
        let registry = TargetRegistry::builtin(&ProjectConfig::default());

        let statuses = detect_all(&registry, dir.path()).await;

        assert_eq!(statuses.len(), 3);
        let claude = statuses.iter().find(|s| s.id == TargetId::Claude).unwrap();
        assert!(claude.config_exists);
        assert!(claude.is_detected());
        let cursor = statuses.iter().find(|s| s.id == TargetId::Cursor).unwrap();
        assert!(!cursor.config_exists);
    }

    #[tokio::test]
    async fn test_missing_binary_has_no_version() {
        let version = binary_version("skillport-no-such-binary", Duration::from_millis(200)).await;
        assert_eq!(version, None);
    }
}
