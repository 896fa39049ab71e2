//! Fixed enumerations the generator cycles through.
//!
//! Declared order matters: when a run's record count is not a multiple of
//! an enumeration's length, the surplus lands on the leading values.

use serde::Serialize;

// ── Employee master ───────────────────────────────────────────────

pub const SIMULATION_TYPES: &[&str] =
    &["Phishing Test", "Vishing Test", "Quishing Test", "Red Team Assessment"];

pub const GENDERS: &[&str] = &["M", "F"];

pub const BLOOD_GROUPS: &[&str] = &["A+", "A-", "B+", "B-", "AB+", "AB-", "O+", "O-"];

pub const MARITAL_STATUSES: &[&str] = &["Single", "Married", "Divorced", "Widowed"];

pub const STATES: &[&str] = &[
    "Maharashtra", "Karnataka", "Tamil Nadu", "Delhi",
    "Uttar Pradesh", "Gujarat", "West Bengal", "Rajasthan",
];

pub const DESIGNATIONS: &[&str] = &[
    "Analyst", "Manager", "Coordinator", "Specialist",
    "Executive", "Director", "Team Lead", "Senior Analyst",
];

pub const DEPARTMENTS: &[&str] = &[
    "IT Security", "Human Resources", "Finance", "Operations",
    "Marketing", "Sales", "Research", "Admin",
];

pub const MEDICAL_CONDITIONS: &[&str] = &["None", "Diabetes", "Hypertension", "Asthma"];

/// Employee-level security classification of the branch building.
pub const BRANCH_SECURITY_LEVELS: &[&str] = &["Low", "Medium", "High"];

pub const COUNTRY: &str = "India";

/// A physical branch: code and city always travel together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Branch {
    pub code: &'static str,
    pub location: &'static str,
}

pub const BRANCHES: &[Branch] = &[
    Branch { code: "MUM01", location: "Mumbai" },
    Branch { code: "DEL02", location: "Delhi" },
    Branch { code: "BLR03", location: "Bangalore" },
    Branch { code: "HYD04", location: "Hyderabad" },
    Branch { code: "CHN05", location: "Chennai" },
    Branch { code: "KOL06", location: "Kolkata" },
    Branch { code: "PUN07", location: "Pune" },
    Branch { code: "AHM08", location: "Ahmedabad" },
];

// ── Testing statuses ──────────────────────────────────────────────

pub const SIMULATION_STATUSES: &[&str] = &["Completed", "Pending", "Failed", "Passed"];

pub const RED_TEAM_STATUSES: &[&str] = &["Completed", "In Progress", "Scheduled", "Cancelled"];

// ── Simulation channels ───────────────────────────────────────────

pub const PHISH_SIMULATION_TYPES: &[&str] =
    &["Email Phishing", "SMS Phishing", "Social Media Phishing"];

pub const QR_CODE_TYPES: &[&str] = &[
    "Payment QR", "WiFi QR", "App Download QR",
    "Survey QR", "Menu QR", "Contact QR",
];

pub const QR_CODE_LINKS: &[&str] = &[
    "https://fake-payment.com/qr123",
    "https://fake-wifi.com/connect",
    "https://fake-survey.com/form456",
    "https://fake-menu.com/restaurant",
    "https://fake-download.com/app789",
];

pub const DEVICE_TYPES: &[&str] = &["Mobile Phone", "Tablet", "Laptop", "Desktop"];

pub const SCAN_LOCATIONS: &[&str] = &["Office", "Cafe", "Home", "Mall", "Restaurant"];

pub const RESPONSE_ACTIONS: &[&str] = &["Clicked", "Ignored", "Reported"];

/// The response action counted towards the quishing reporting rate.
pub const REPORTED_ACTION: &str = "Reported";

// ── Red-team assessment ───────────────────────────────────────────

pub const ASSESSMENT_SECURITY_LEVELS: &[&str] = &["Low", "Medium", "High", "Critical"];

pub const APPROVING_DESIGNATIONS: &[&str] = &["Manager", "Director", "VP", "Senior Manager"];

pub const VULNERABILITIES: &[&str] = &[
    "Weak access controls",
    "Inadequate visitor management",
    "Social engineering susceptibility",
    "Poor password practices",
    "Unsecured workstations",
    "None significant",
];

pub const RECOMMENDATIONS: &[&str] = &[
    "Implement two-factor authentication",
    "Enhanced security training",
    "Improve visitor access controls",
    "Regular security assessments",
    "Employee awareness programs",
    "Continue current practices",
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn enumerations_have_no_duplicates() {
        for values in [
            SIMULATION_TYPES, BLOOD_GROUPS, MARITAL_STATUSES, STATES, DESIGNATIONS,
            DEPARTMENTS, MEDICAL_CONDITIONS, SIMULATION_STATUSES, RED_TEAM_STATUSES,
            QR_CODE_TYPES, DEVICE_TYPES, RESPONSE_ACTIONS, VULNERABILITIES,
        ] {
            let unique: HashSet<_> = values.iter().collect();
            assert_eq!(unique.len(), values.len(), "duplicate in {values:?}");
        }
    }

    #[test]
    fn branch_codes_are_unique() {
        let codes: HashSet<_> = BRANCHES.iter().map(|b| b.code).collect();
        assert_eq!(codes.len(), BRANCHES.len());
    }

    #[test]
    fn reported_action_is_enumerated() {
        assert!(RESPONSE_ACTIONS.contains(&REPORTED_ACTION));
    }
}
