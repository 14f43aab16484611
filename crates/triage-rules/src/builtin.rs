//! Built-in rule table for CI failures and spam/scam alerts.
//!
//! Ordering is deliberate (higher-signal rules first within each family)
//! and is the tie-break for equal confidence downstream.

use triage_core::errors::TriageResult;
use triage_core::models::{ActionKind, IncidentType};

use crate::rule::Rule;
use crate::snapshot::RuleSnapshot;

const CI: &[IncidentType] = &[IncidentType::CiFailure];
const ABUSE: &[IncidentType] = &[IncidentType::Spam, IncidentType::Scam];

/// Build the built-in snapshot. Fails only on a bad pattern, which is a
/// table-authoring error surfaced at construction, not at match time.
pub fn builtin_snapshot() -> TriageResult<RuleSnapshot> {
    let rules = vec![
        // --- CI failure rules ---
        Rule::new(
            "build_error_001",
            "Compilation Error Detection",
            CI,
            r"compilation failed|syntax\s?error|cannot find (symbol|module)|undefined reference",
            "Fix Build Compilation Error",
            ActionKind::FixBuild,
            &["Check syntax", "Verify imports", "Fix error", "Rebuild"],
            0.98,
        )?,
        Rule::new(
            "test_failure_001",
            "Assertion Error Detection",
            CI,
            r"assertion(\s|_)?(error|failed)|assert.*failed|test.*failed",
            "Fix Assertion Error in Test Suite",
            ActionKind::FixAssertion,
            &[
                "Review test expectations",
                "Check assertion values",
                "Fix test logic",
                "Run tests locally",
            ],
            0.95,
        )?,
        Rule::new(
            "timeout_001",
            "Timeout Detection",
            CI,
            r"timeout|timed?\s?out|exceeded.*time|deadline",
            "Resolve Timeout",
            ActionKind::IncreaseTimeout,
            &[
                "Profile performance",
                "Optimize the slow path",
                "Increase the timeout",
                "Check for infinite loops",
            ],
            0.92,
        )?,
        Rule::new(
            "oom_001",
            "Out-of-Memory Detection",
            CI,
            r"out of memory|oom.?kill|memory exhausted|cannot allocate",
            "Free Runner Memory",
            ActionKind::FreeRunnerMemory,
            &[
                "Lower build parallelism",
                "Raise the runner memory limit",
                "Check for leaks in the job",
            ],
            0.9,
        )?,
        Rule::new(
            "dependency_001",
            "Dependency Version Conflict",
            CI,
            r"version conflict|dependency.*mismatch|incompatible.*version",
            "Resolve Dependency Version Conflict",
            ActionKind::PinDependencyVersions,
            &[
                "Check the lockfile diff",
                "Pin the conflicting versions",
                "Run the dependency check",
                "Test integration",
            ],
            0.88,
        )?,
        Rule::new(
            "network_flake_001",
            "Network Flake Detection",
            CI,
            r"connection (reset|refused)|dns.*fail|temporary failure|could not resolve",
            "Rerun Flaky Network-Bound Tests",
            ActionKind::RerunFlakyTests,
            &["Rerun the job", "Check registry/mirror health", "Add retry to the fetch step"],
            0.86,
        )?,
        // --- Spam / scam rules ---
        Rule::new(
            "security_malware_001",
            "Malware Detection",
            ABUSE,
            r"malware|trojan|ransomware|virus.*detected|quarantine|unsigned.*driver",
            "Quarantine Suspected Malware",
            ActionKind::QuarantineFile,
            &["Isolate file", "Run antivirus scan", "Report incident", "Review logs"],
            0.96,
        )?,
        Rule::new(
            "security_scam_001",
            "Scam Detection",
            ABUSE,
            r"financial.*offer|lottery.*winner|prize|wire.*transfer|urgent.*payment",
            "Block Likely Scam Sender",
            ActionKind::BlockSender,
            &["Report to authorities", "Block sender", "Delete message", "Notify team"],
            0.93,
        )?,
        Rule::new(
            "security_phishing_001",
            "Phishing Detection",
            ABUSE,
            r"phishing|suspicious.*email|verify.*account|confirm.*password|click.*here.*verify",
            "Report Potential Phishing",
            ActionKind::ReportPhishing,
            &[
                "Report to security team",
                "Do not click links",
                "Do not provide credentials",
                "Delete message",
            ],
            0.85,
        )?,
        Rule::new(
            "security_credential_001",
            "Credential Theft Detection",
            ABUSE,
            r"brute.?force|credential.*stuffing|password.*reset.*loop|login.*attempt.*spike",
            "Force Credential Reset",
            ActionKind::ForceCredentialReset,
            &["Force password reset", "Enable MFA", "Review access logs"],
            0.85,
        )?,
        Rule::new(
            "security_social_eng_001",
            "Social Engineering Detection",
            ABUSE,
            r"urgent action|verify identity|confirm details|claim.*reward|authority.*misrepresent",
            "Escalate Social Engineering Attempt",
            ActionKind::EscalateToSecurity,
            &["Verify independently", "Contact official support", "Report incident"],
            0.8,
        )?,
    ];

    Ok(RuleSnapshot::from_rules(rules))
}
