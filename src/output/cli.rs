use crate::checker::declared_version;
use crate::model::{OutdatedEntry, Report, ScanFindings, VulnerabilityEntry};
use std::fmt;
use std::io::IsTerminal;
use std::path::Path;
use tabled::{settings::Style, Table, Tabled};

const UNUSED_NOTE: &str =
    "Detected by searching source text for require/import references. Verify manually before removing.";

#[derive(Tabled)]
struct OutdatedRow {
    #[tabled(rename = "Package")]
    package: String,
    #[tabled(rename = "Declared")]
    declared: String,
    #[tabled(rename = "Latest")]
    latest: String,
    #[tabled(rename = "Type")]
    update_type: String,
}

#[derive(Tabled)]
struct VulnRow {
    #[tabled(rename = "Package")]
    package: String,
    #[tabled(rename = "Declared")]
    declared: String,
    #[tabled(rename = "Issue")]
    issue: String,
}

/// How far the latest release is from the version a range is written around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateType {
    Major,
    Minor,
    Patch,
    Unknown,
}

impl UpdateType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateType::Major => "MAJOR",
            UpdateType::Minor => "minor",
            UpdateType::Patch => "patch",
            UpdateType::Unknown => "-",
        }
    }

    /// The label, wrapped in an ANSI colour when `color` is set.
    fn styled(&self, color: bool) -> String {
        let code = match self {
            UpdateType::Major => "31",
            UpdateType::Minor => "33",
            UpdateType::Patch => "32",
            UpdateType::Unknown => return self.as_str().to_string(),
        };
        if color {
            format!("\x1b[{}m{}\x1b[0m", code, self.as_str())
        } else {
            self.as_str().to_string()
        }
    }
}

impl fmt::Display for UpdateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies the update from `declared` to `latest`.
///
/// `Unknown` when either side does not carry a plain version.
pub fn classify_update(declared: &str, latest: &str) -> UpdateType {
    let (Some(current), Some(latest)) = (declared_version(declared), declared_version(latest))
    else {
        return UpdateType::Unknown;
    };

    if latest.major != current.major {
        UpdateType::Major
    } else if latest.minor != current.minor {
        UpdateType::Minor
    } else {
        UpdateType::Patch
    }
}

pub fn print_outdated(outdated: &[OutdatedEntry]) {
    if outdated.is_empty() {
        println!("All dependencies are up to date.");
        return;
    }

    println!("Found {} outdated dependencies:", outdated.len());
    println!();

    let color = std::io::stdout().is_terminal();
    let rows: Vec<OutdatedRow> = outdated
        .iter()
        .map(|o| OutdatedRow {
            package: o.name.clone(),
            declared: o.installed.clone(),
            latest: o.latest.clone(),
            update_type: classify_update(&o.installed, &o.latest).styled(color),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{}", table);

    let names: Vec<&str> = outdated.iter().map(|o| o.name.as_str()).collect();
    println!();
    println!("Update with:");
    if names.len() <= 5 {
        let targets: Vec<String> = names.iter().map(|n| format!("{}@latest", n)).collect();
        println!("  npm install {}", targets.join(" "));
    } else {
        println!("  npm update  # {} packages", names.len());
    }
}

pub fn print_unused(unused: &[String]) {
    if unused.is_empty() {
        println!("No unused dependencies found.");
        return;
    }

    println!("Found {} potentially unused dependencies:", unused.len());
    println!();
    for name in unused {
        println!("  - {}", name);
    }
    println!();
    println!("Note: {}", UNUSED_NOTE);
}

fn print_vulnerabilities(vulnerabilities: &[VulnerabilityEntry]) {
    if vulnerabilities.is_empty() {
        println!("No known vulnerabilities found.");
        return;
    }

    println!("Found {} vulnerable dependencies:", vulnerabilities.len());
    println!();

    let rows: Vec<VulnRow> = vulnerabilities
        .iter()
        .map(|v| VulnRow {
            package: v.name.clone(),
            declared: v.version.clone(),
            issue: truncate(&v.issue, 60),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{}", table);
}

pub fn print_scan(project: Option<&str>, dependency_count: usize, findings: &ScanFindings) {
    println!();
    match project {
        Some(name) => println!("Audited {} dependencies of {}", dependency_count, name),
        None => println!("Audited {} dependencies", dependency_count),
    }

    println!();
    print_outdated(&findings.outdated);
    println!();
    print_unused(&findings.unused);
    println!();
    print_vulnerabilities(&findings.vulnerabilities);

    println!();
    if findings.is_clean() {
        println!("No issues found.");
        println!();
    }
    print_summary(
        findings.outdated.len(),
        findings.unused.len(),
        findings.vulnerabilities.len(),
    );
}

pub fn print_report_saved(report: &Report, path: &Path) {
    println!(
        "Report generated at {}",
        report.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!("Saved to: {}", path.display());
    println!();
    print_summary(
        report.outdated.len(),
        report.unused.len(),
        report.vulnerabilities.len(),
    );
}

fn print_summary(outdated: usize, unused: usize, vulnerabilities: usize) {
    println!("Summary:");
    println!("  Outdated: {}", outdated);
    println!("  Unused: {}", unused);
    println!("  Vulnerabilities: {}", vulnerabilities);
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}
