use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A dependency whose declared range does not cover the registry's latest tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutdatedEntry {
    pub name: String,
    pub installed: String,
    pub latest: String,
}

/// A dependency matching an entry of the vulnerability table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VulnerabilityEntry {
    pub name: String,
    pub version: String,
    pub issue: String,
}

/// Results of the three checks, without a timestamp. Used for display only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanFindings {
    pub outdated: Vec<OutdatedEntry>,
    pub unused: Vec<String>,
    pub vulnerabilities: Vec<VulnerabilityEntry>,
}

impl ScanFindings {
    pub fn is_clean(&self) -> bool {
        self.outdated.is_empty() && self.unused.is_empty() && self.vulnerabilities.is_empty()
    }
}

/// The persisted audit artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub timestamp: DateTime<Utc>,
    pub outdated: Vec<OutdatedEntry>,
    pub unused: Vec<String>,
    pub vulnerabilities: Vec<VulnerabilityEntry>,
}

impl Report {
    pub fn new(findings: ScanFindings) -> Self {
        Self::at(Utc::now(), findings)
    }

    pub fn at(timestamp: DateTime<Utc>, findings: ScanFindings) -> Self {
        Self {
            timestamp,
            outdated: findings.outdated,
            unused: findings.unused,
            vulnerabilities: findings.vulnerabilities,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_findings() -> ScanFindings {
        ScanFindings {
            outdated: vec![OutdatedEntry {
                name: "left-pad".to_string(),
                installed: "1.0.0".to_string(),
                latest: "1.3.0".to_string(),
            }],
            unused: vec!["left-pad".to_string()],
            vulnerabilities: vec![VulnerabilityEntry {
                name: "lodash".to_string(),
                version: "4.17.20".to_string(),
                issue: "Prototype pollution".to_string(),
            }],
        }
    }

    #[test]
    fn test_report_json_shape() {
        let timestamp = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
        let report = Report::at(timestamp, sample_findings());

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["timestamp"], "2024-03-01T12:30:00Z");
        assert_eq!(value["outdated"][0]["name"], "left-pad");
        assert_eq!(value["outdated"][0]["installed"], "1.0.0");
        assert_eq!(value["outdated"][0]["latest"], "1.3.0");
        assert_eq!(value["unused"][0], "left-pad");
        assert_eq!(value["vulnerabilities"][0]["issue"], "Prototype pollution");
    }

    #[test]
    fn test_report_survives_serialization() {
        let report = Report::new(sample_findings());
        let json = serde_json::to_string_pretty(&report).unwrap();
        let parsed: Report = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
    }

    #[test]
    fn test_findings_is_clean() {
        assert!(ScanFindings::default().is_clean());
        assert!(!sample_findings().is_clean());
    }
}
