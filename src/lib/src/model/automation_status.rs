use serde::{Deserialize, Deserializer, Serialize};

/// Backend summary of the user's automation and the next scheduled commit
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AutomationStatus {
    #[serde(default)]
    pub active: bool,
    #[serde(default, rename = "hasRepository")]
    pub has_repository: bool,
    #[serde(default)]
    pub repo_name: Option<String>,
    #[serde(default)]
    pub scheduled_commits: u64,
    #[serde(default)]
    pub total_commits: u64,
    // Older backends omit next_commit entirely when nothing is scheduled
    #[serde(default, deserialize_with = "deserialize_next_commit")]
    pub next_commit: NextCommit,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct NextCommit {
    #[serde(default)]
    pub has_scheduled_commits: bool,
    #[serde(default)]
    pub formatted_time: Option<String>,
    #[serde(default)]
    pub formatted_countdown: Option<String>,
    #[serde(default, deserialize_with = "deserialize_seconds")]
    pub seconds_until_next: Option<u64>,
}

impl NextCommit {
    pub fn none() -> NextCommit {
        NextCommit::default()
    }

    /// Seconds until the next commit, only when a commit is actually scheduled.
    pub fn seconds_until_next(&self) -> Option<u64> {
        if self.has_scheduled_commits {
            self.seconds_until_next
        } else {
            None
        }
    }
}

impl AutomationStatus {
    pub fn inactive() -> AutomationStatus {
        AutomationStatus {
            active: false,
            has_repository: false,
            repo_name: None,
            scheduled_commits: 0,
            total_commits: 0,
            next_commit: NextCommit::none(),
        }
    }

    pub fn repo_name(&self) -> Option<&str> {
        if !self.has_repository {
            return None;
        }
        self.repo_name.as_deref().filter(|name| !name.is_empty())
    }
}

fn deserialize_next_commit<'de, D>(deserializer: D) -> Result<NextCommit, D::Error>
where
    D: Deserializer<'de>,
{
    let next_commit: Option<NextCommit> = Option::deserialize(deserializer)?;
    Ok(next_commit.unwrap_or_default())
}

// Accepts integers or floats, negative values clamp to zero
fn deserialize_seconds<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<f64> = Option::deserialize(deserializer)?;
    Ok(value.map(|secs| if secs.is_sign_negative() { 0 } else { secs as u64 }))
}

#[cfg(test)]
mod tests {
    use crate::model::{AutomationStatus, NextCommit};

    #[test]
    fn test_deserialize_scheduled_status() {
        let body = r#"{
            "active": true,
            "hasRepository": true,
            "repo_name": "daily-streak",
            "scheduled_commits": 4,
            "total_commits": 27,
            "next_commit": {
                "has_scheduled_commits": true,
                "formatted_time": "2026-10-17 14:05:00",
                "formatted_countdown": "00:01:30",
                "seconds_until_next": 90
            }
        }"#;
        let status: AutomationStatus = serde_json::from_str(body).unwrap();
        assert!(status.active);
        assert_eq!(status.repo_name(), Some("daily-streak"));
        assert_eq!(status.scheduled_commits, 4);
        assert_eq!(status.total_commits, 27);
        assert_eq!(status.next_commit.seconds_until_next(), Some(90));
    }

    #[test]
    fn test_missing_next_commit_is_normalized() {
        let body = r#"{
            "active": true,
            "hasRepository": true,
            "repo_name": "daily-streak",
            "scheduled_commits": 0,
            "total_commits": 3
        }"#;
        let status: AutomationStatus = serde_json::from_str(body).unwrap();
        assert_eq!(status.next_commit, NextCommit::none());

        let status: AutomationStatus =
            serde_json::from_str(r#"{"active": false, "next_commit": null}"#).unwrap();
        assert_eq!(status.next_commit, NextCommit::none());
    }

    #[test]
    fn test_seconds_suppressed_when_nothing_scheduled() {
        let next = NextCommit {
            has_scheduled_commits: false,
            formatted_time: None,
            formatted_countdown: None,
            seconds_until_next: Some(42),
        };
        assert_eq!(next.seconds_until_next(), None);
    }

    #[test]
    fn test_negative_and_fractional_seconds() {
        let next: NextCommit = serde_json::from_str(
            r#"{"has_scheduled_commits": true, "seconds_until_next": -3}"#,
        )
        .unwrap();
        assert_eq!(next.seconds_until_next, Some(0));

        let next: NextCommit = serde_json::from_str(
            r#"{"has_scheduled_commits": true, "seconds_until_next": 12.8}"#,
        )
        .unwrap();
        assert_eq!(next.seconds_until_next, Some(12));
    }
}
