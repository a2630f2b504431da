//! Entity extraction from raw message text.
//!
//! Pulls out the concrete facts a loan conversation turns on: amounts,
//! dates, contact details, document mentions, lender names and locations.
//! Everything here is pattern- and keyword-based; candidates that fail to
//! parse are silently dropped rather than reported as errors.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::tokenize::{normalize, tokenize};

/// Document names users mention when asking about paperwork.
const DOCUMENT_KEYWORDS: &[&str] = &[
    "pan",
    "aadhaar",
    "aadhar",
    "bank statement",
    "salary slip",
    "passport",
    "form 16",
    "itr",
    "voter id",
    "driving licence",
];

/// Banks and NBFCs that come up in comparison questions.
const ORGANIZATION_KEYWORDS: &[&str] = &[
    "sbi",
    "hdfc",
    "icici",
    "axis bank",
    "kotak",
    "bajaj finserv",
    "canara bank",
    "punjab national bank",
];

/// Cities used for branch and serviceability questions.
const LOCATION_KEYWORDS: &[&str] = &[
    "mumbai",
    "delhi",
    "bangalore",
    "bengaluru",
    "hyderabad",
    "chennai",
    "kolkata",
    "pune",
    "ahmedabad",
    "jaipur",
];

static DATE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"\b\d{1,2}/\d{1,2}/\d{4}\b").expect("Invalid slash date regex"),
        Regex::new(r"\b\d{1,2}-\d{1,2}-\d{4}\b").expect("Invalid dash date regex"),
        Regex::new(r"\b\d{4}-\d{1,2}-\d{1,2}\b").expect("Invalid ISO date regex"),
    ]
});

static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    // Indian mobile numbers: optional +91/91/0 prefix, then ten digits
    // starting 7-9.
    Regex::new(r"(?:(?:\+91|91|0)[\s-]?)?[7-9]\d{9}").expect("Invalid phone regex")
});

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").expect("Invalid email regex")
});

/// The kind of contact detail found in a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactKind {
    Phone,
    Email,
}

/// A single contact detail extracted from a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub kind: ContactKind,
    pub value: String,
}

/// Everything extracted from one message. Empty containers mean
/// nothing of that kind was found; extraction itself never fails.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntitySet {
    pub amounts: Vec<f64>,
    pub dates: Vec<String>,
    pub contacts: Vec<Contact>,
    pub documents: Vec<String>,
    pub organizations: Vec<String>,
    pub locations: Vec<String>,
}

impl EntitySet {
    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
            && self.dates.is_empty()
            && self.contacts.is_empty()
            && self.documents.is_empty()
            && self.organizations.is_empty()
            && self.locations.is_empty()
    }
}

/// Extracts entities with fixed keyword tables and regex patterns.
pub struct EntityExtractor {
    document_keywords: Vec<String>,
    organization_keywords: Vec<String>,
    location_keywords: Vec<String>,
}

impl EntityExtractor {
    pub fn new() -> Self {
        Self::with_tables(DOCUMENT_KEYWORDS, ORGANIZATION_KEYWORDS, LOCATION_KEYWORDS)
    }

    /// Creates an extractor with custom keyword tables, used to retune
    /// the vocabulary without touching extraction logic.
    pub fn with_tables(documents: &[&str], organizations: &[&str], locations: &[&str]) -> Self {
        Self {
            document_keywords: documents.iter().map(|s| s.to_string()).collect(),
            organization_keywords: organizations.iter().map(|s| s.to_string()).collect(),
            location_keywords: locations.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Runs every extractor over the message and bundles the results.
    pub fn extract(&self, text: &str) -> EntitySet {
        if text.trim().is_empty() {
            return EntitySet::default();
        }
        let normalized = normalize(text);
        EntitySet {
            amounts: extract_amounts(text),
            dates: extract_dates(text),
            contacts: extract_contacts(text),
            documents: keyword_hits(&normalized, &self.document_keywords),
            organizations: keyword_hits(&normalized, &self.organization_keywords),
            locations: keyword_hits(&normalized, &self.location_keywords),
        }
    }
}

impl Default for EntityExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Any token that parses as a number after stripping currency markers and
/// separator commas counts as an amount.
fn extract_amounts(text: &str) -> Vec<f64> {
    tokenize(text)
        .iter()
        .filter_map(|token| {
            let stripped = token.trim_start_matches('₹');
            let stripped = stripped
                .strip_prefix("rs.")
                .or_else(|| stripped.strip_prefix("rs"))
                .unwrap_or(stripped);
            let cleaned = stripped.replace(',', "");
            if cleaned.is_empty() {
                return None;
            }
            cleaned.parse::<f64>().ok()
        })
        .collect()
}

/// Matches dd/mm/yyyy, dd-mm-yyyy and yyyy-mm-dd shapes. Structural only:
/// "99/99/9999" passes, calendar validation is out of scope here.
fn extract_dates(text: &str) -> Vec<String> {
    let mut dates = Vec::new();
    for pattern in DATE_PATTERNS.iter() {
        for found in pattern.find_iter(text) {
            dates.push(found.as_str().to_string());
        }
    }
    dates
}

fn extract_contacts(text: &str) -> Vec<Contact> {
    let mut contacts = Vec::new();
    for found in PHONE_PATTERN.find_iter(text) {
        // Reject matches embedded in longer digit runs (account numbers).
        let before = text[..found.start()].chars().next_back();
        let after = text[found.end()..].chars().next();
        let standalone = before.map_or(true, |c| !c.is_ascii_digit())
            && after.map_or(true, |c| !c.is_ascii_digit());
        if standalone {
            contacts.push(Contact {
                kind: ContactKind::Phone,
                value: found.as_str().to_string(),
            });
        }
    }
    for found in EMAIL_PATTERN.find_iter(text) {
        contacts.push(Contact {
            kind: ContactKind::Email,
            value: found.as_str().to_string(),
        });
    }
    contacts
}

fn keyword_hits(normalized: &str, keywords: &[String]) -> Vec<String> {
    keywords
        .iter()
        .filter(|keyword| normalized.contains(keyword.as_str()))
        .cloned()
        .collect()
}
