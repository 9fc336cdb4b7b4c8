use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Live run state of a service, as reported by the orchestration CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Running,
    Stopped,
    /// `ps` ran fine but does not know the service (not configured/created)
    Unconfigured,
    Unknown,
    Error,
    /// Status probe deferred; the caller refreshes it per service later
    Pending,
}

impl ServiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceStatus::Running => "running",
            ServiceStatus::Stopped => "stopped",
            ServiceStatus::Unconfigured => "unconfigured",
            ServiceStatus::Unknown => "unknown",
            ServiceStatus::Error => "error",
            ServiceStatus::Pending => "pending",
        }
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only view of one service entry in a compose file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceInfo {
    pub image: String,
    pub version: String,
    pub status: ServiceStatus,
}

/// A discovered deployment directory with its surviving services
#[derive(Debug, Clone, Serialize)]
pub struct ServiceDirectory {
    /// Absolute path to the compose file
    pub path: PathBuf,
    pub services: BTreeMap<String, ServiceInfo>,
}

/// The filtered, status-annotated view returned to callers
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    #[serde(rename = "services")]
    pub directories: BTreeMap<String, ServiceDirectory>,
    pub total_services: usize,
}

/// Search filters; every field is an optional case-insensitive substring
#[derive(Debug, Clone, Default)]
pub struct SearchCriteria {
    pub dir: Option<String>,
    pub name: Option<String>,
    pub image: Option<String>,
    pub version: Option<String>,
    pub status: Option<String>,
}

impl SearchCriteria {
    pub fn is_empty(&self) -> bool {
        self.dir.is_none()
            && self.name.is_none()
            && self.image.is_none()
            && self.version.is_none()
            && self.status.is_none()
    }

    /// Drops empty strings and unifies name search into dir search.
    ///
    /// Directory and name search share the directory-matching stage: a name
    /// search with no dir search must also narrow the directories scanned.
    pub fn normalized(&self) -> Self {
        let mut criteria = Self {
            dir: non_empty(self.dir.as_deref()),
            name: non_empty(self.name.as_deref()),
            image: non_empty(self.image.as_deref()),
            version: non_empty(self.version.as_deref()),
            status: non_empty(self.status.as_deref()),
        };

        if criteria.dir.is_none() {
            criteria.dir = criteria.name.clone();
        }

        criteria
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Case-insensitive substring match; an absent needle matches everything
pub fn matches_search(haystack: &str, needle: Option<&str>) -> bool {
    match needle {
        None => true,
        Some(n) => haystack.to_lowercase().contains(&n.to_lowercase()),
    }
}

/// Version is everything after the last `:` of the image reference
pub fn image_version(image: &str) -> &str {
    image.rsplit_once(':').map(|(_, tag)| tag).unwrap_or("")
}

/// Replaces (or appends) the tag of an image reference
pub fn retag_image(image: &str, new_version: &str) -> String {
    match image.rsplit_once(':') {
        Some((repository, _)) => format!("{repository}:{new_version}"),
        None => format!("{image}:{new_version}"),
    }
}

/// Classifies combined `docker-compose ps` output for one service.
///
/// Substring tests are case-sensitive and the first matching rule wins;
/// exited markers are checked before running ones.
pub fn classify_ps_output(output: &str, service: &str) -> ServiceStatus {
    if output.contains("Exit") || output.contains("exited") {
        ServiceStatus::Stopped
    } else if output.contains("Up") || output.contains("running") {
        ServiceStatus::Running
    } else if output.trim().is_empty() || !output.contains(service) {
        ServiceStatus::Unconfigured
    } else {
        ServiceStatus::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_from_tagged_image() {
        assert_eq!(image_version("nginx:1.25"), "1.25");
    }

    #[test]
    fn version_from_untagged_image() {
        assert_eq!(image_version("nginx"), "");
    }

    #[test]
    fn version_uses_last_colon() {
        assert_eq!(image_version("registry.local:5000/nginx:1.25"), "1.25");
    }

    #[test]
    fn retag_replaces_existing_tag() {
        assert_eq!(retag_image("nginx:1.25", "1.26"), "nginx:1.26");
    }

    #[test]
    fn retag_appends_when_untagged() {
        assert_eq!(retag_image("nginx", "1.26"), "nginx:1.26");
    }

    #[test]
    fn classify_up_output_is_running() {
        let status = classify_ps_output("web   nginx:1.25   Up 3 minutes", "web");
        assert_eq!(status, ServiceStatus::Running);
    }

    #[test]
    fn classify_exited_output_is_stopped() {
        let status = classify_ps_output("web   nginx:1.25   Exited (0)", "web");
        assert_eq!(status, ServiceStatus::Stopped);
    }

    #[test]
    fn classify_exit_beats_up() {
        // Both markers can appear in multi-line ps output; exited wins
        let output = "web   Up 2 hours\nworker   Exit 1";
        assert_eq!(classify_ps_output(output, "web"), ServiceStatus::Stopped);
    }

    #[test]
    fn classify_empty_output_is_unconfigured() {
        assert_eq!(classify_ps_output("", "web"), ServiceStatus::Unconfigured);
        assert_eq!(
            classify_ps_output("   \n", "web"),
            ServiceStatus::Unconfigured
        );
    }

    #[test]
    fn classify_output_without_service_name_is_unconfigured() {
        let status = classify_ps_output("NAME   IMAGE   STATUS", "web");
        assert_eq!(status, ServiceStatus::Unconfigured);
    }

    #[test]
    fn classify_unrecognized_output_is_unknown() {
        let status = classify_ps_output("web   restarting", "web");
        assert_eq!(status, ServiceStatus::Unknown);
    }

    #[test]
    fn normalized_unifies_name_into_dir() {
        let criteria = SearchCriteria {
            name: Some("web".into()),
            ..Default::default()
        };

        let normalized = criteria.normalized();
        assert_eq!(normalized.dir.as_deref(), Some("web"));
        assert_eq!(normalized.name.as_deref(), Some("web"));
    }

    #[test]
    fn normalized_keeps_explicit_dir() {
        let criteria = SearchCriteria {
            dir: Some("apps".into()),
            name: Some("web".into()),
            ..Default::default()
        };

        let normalized = criteria.normalized();
        assert_eq!(normalized.dir.as_deref(), Some("apps"));
    }

    #[test]
    fn normalized_drops_empty_strings() {
        let criteria = SearchCriteria {
            dir: Some("  ".into()),
            image: Some(String::new()),
            ..Default::default()
        };

        let normalized = criteria.normalized();
        assert!(normalized.is_empty());
    }

    #[test]
    fn matches_search_is_case_insensitive() {
        assert!(matches_search("apps/Nginx-Proxy", Some("nginx")));
        assert!(!matches_search("apps/redis", Some("nginx")));
        assert!(matches_search("anything", None));
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&ServiceStatus::Pending).unwrap();
        assert_eq!(json, "\"pending\"");
    }
}
