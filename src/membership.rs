//! Membership application checks and fee totals.
//!
//! Payment is handled elsewhere; this only decides whether an application
//! is complete and how much it costs.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::FieldError;

pub const CES_FEE: u32 = 20;
pub const ICSO_FEE: u32 = 20;
pub const SUB_ORG_FEE: u32 = 15;

/// Sub-organizations open for membership, as `(id, name)`
pub const SUB_ORGS: [(&str, &str); 8] = [
    ("ai-mentors", "AI Mentors"),
    ("algorithm-knights", "Algorithm Knights"),
    ("code-warriors", "Code Warriors"),
    ("cybernet-rangers", "Cybernet Rangers"),
    ("digital-expressionists", "Digital Expressionists"),
    ("ghz-builders", "GHZ Builders"),
    ("mobile-mnemonics", "Mobile Mnemonics"),
    ("web-arachnids", "Web Arachnids"),
];

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));
// 09xxxxxxxxx or +639xxxxxxxxx
static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(09|\+639)\d{9}$").expect("valid phone pattern"));
static SECTION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z0-9]+$").expect("valid section pattern"));
static STUDENT_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^UA\d{9}$").expect("valid student id pattern"));

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MembershipApplication {
    pub email: String,
    pub phone_number: String,
    pub section: String,
    pub student_id: String,
    pub ces_membership: bool,
    pub icso_membership: bool,
    pub sub_org_membership: bool,
    pub selected_sub_org: Option<String>,
}

/// An accepted application and what it costs in pesos
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipQuote {
    pub ces: bool,
    pub icso: bool,
    pub sub_org: Option<String>,
    pub total_amount: u32,
}

impl MembershipApplication {
    pub fn total_amount(&self) -> u32 {
        [
            (self.ces_membership, CES_FEE),
            (self.icso_membership, ICSO_FEE),
            (self.sub_org_membership, SUB_ORG_FEE),
        ]
        .iter()
        .filter(|(selected, _)| *selected)
        .map(|(_, fee)| fee)
        .sum()
    }

    /// Check every field, collecting all problems rather than stopping at the first
    pub fn validate(&self) -> Result<MembershipQuote, Vec<FieldError>> {
        let mut errors = Vec::new();

        if !EMAIL_PATTERN.is_match(&self.email) {
            errors.push(FieldError::new("email", "Please enter a valid email address."));
        }
        if !PHONE_PATTERN.is_match(&self.phone_number) {
            errors.push(FieldError::new(
                "phoneNumber",
                "Please enter a valid PH phone number (e.g., 09xxxxxxxxx or +639xxxxxxxxx).",
            ));
        }
        if self.section.is_empty() {
            errors.push(FieldError::new("section", "Please enter your section."));
        } else if !SECTION_PATTERN.is_match(&self.section) {
            errors.push(FieldError::new(
                "section",
                "Section format invalid (e.g., LFAU322A002).",
            ));
        }
        if !STUDENT_ID_PATTERN.is_match(&self.student_id) {
            errors.push(FieldError::new(
                "studentId",
                "Student ID must be in UA<YEAR><NUMBER> format (e.g., UA202301963).",
            ));
        }

        if !(self.ces_membership || self.icso_membership || self.sub_org_membership) {
            errors.push(FieldError::new(
                "cesMembership",
                "Please select at least one membership.",
            ));
        }

        let sub_org = self.selected_sub_org.as_deref().filter(|id| *id != "none");
        if self.sub_org_membership {
            match sub_org {
                None | Some("") => errors.push(FieldError::new(
                    "selectedSubOrg",
                    "Please select a sub-organization if joining one.",
                )),
                Some(id) if !SUB_ORGS.iter().any(|(known, _)| *known == id) => errors.push(
                    FieldError::new("selectedSubOrg", format!("Unknown sub-organization '{}'.", id)),
                ),
                Some(_) => {}
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(MembershipQuote {
            ces: self.ces_membership,
            icso: self.icso_membership,
            sub_org: sub_org
                .filter(|_| self.sub_org_membership)
                .map(str::to_string),
            total_amount: self.total_amount(),
        })
    }
}
