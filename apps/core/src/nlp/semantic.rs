//! Semantic category matching.
//!
//! Routes a message into one of the loan-domain topic areas by counting
//! keyword-set hits as case-insensitive substrings. Confidence is the hit
//! ratio against the category's whole keyword set, so broad categories need
//! proportionally more evidence to win.

use serde::{Deserialize, Serialize};

use super::tokenize::normalize;

/// Topic areas the assistant can route a message into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    LoanInquiry,
    ApplicationProcess,
    Eligibility,
    Documents,
    Repayment,
    InterestCharges,
    CompanyInfo,
    Support,
    TechnicalIssues,
    Status,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::LoanInquiry => "loan_inquiry",
            Category::ApplicationProcess => "application_process",
            Category::Eligibility => "eligibility",
            Category::Documents => "documents",
            Category::Repayment => "repayment",
            Category::InterestCharges => "interest_charges",
            Category::CompanyInfo => "company_info",
            Category::Support => "support",
            Category::TechnicalIssues => "technical_issues",
            Category::Status => "status",
        }
    }
}

/// Keyword sets per category. Declaration order doubles as the tie-break
/// order: on equal confidence the earlier category wins.
pub const CATEGORY_TABLE: &[(Category, &[&str])] = &[
    (
        Category::LoanInquiry,
        &[
            "loan", "borrow", "lend", "finance", "credit", "funds", "money", "advance",
        ],
    ),
    (
        Category::ApplicationProcess,
        &["apply", "application", "form", "submit", "process", "register"],
    ),
    (
        Category::Eligibility,
        &[
            "eligible",
            "eligibility",
            "criteria",
            "qualify",
            "minimum salary",
            "income",
            "credit score",
            "cibil",
        ],
    ),
    (
        Category::Documents,
        &[
            "document",
            "documents",
            "paperwork",
            "pan",
            "aadhaar",
            "kyc",
            "bank statement",
            "salary slip",
            "passport",
            "upload",
        ],
    ),
    (
        Category::Repayment,
        &[
            "repay",
            "repayment",
            "emi",
            "installment",
            "tenure",
            "prepay",
            "foreclosure",
            "monthly payment",
        ],
    ),
    (
        Category::InterestCharges,
        &[
            "interest",
            "rate",
            "charges",
            "fees",
            "processing fee",
            "apr",
            "penalty",
        ],
    ),
    (
        Category::CompanyInfo,
        &[
            "company", "about us", "who are you", "office", "branch", "contact", "address",
        ],
    ),
    (
        Category::Support,
        &[
            "help",
            "support",
            "assist",
            "customer care",
            "agent",
            "talk to someone",
            "callback",
        ],
    ),
    (
        Category::TechnicalIssues,
        &[
            "error",
            "not working",
            "issue",
            "crash",
            "login",
            "otp",
            "website",
            "failed",
        ],
    ),
    (
        Category::Status,
        &[
            "status",
            "track",
            "approved",
            "pending",
            "disbursed",
            "sanctioned",
            "reference number",
        ],
    ),
];

/// Topics a user commonly moves to next, used for follow-up suggestions.
const RELATED_TOPICS: &[(Category, &[Category])] = &[
    (
        Category::LoanInquiry,
        &[
            Category::ApplicationProcess,
            Category::Eligibility,
            Category::InterestCharges,
        ],
    ),
    (
        Category::ApplicationProcess,
        &[Category::Documents, Category::Eligibility, Category::Status],
    ),
    (
        Category::Eligibility,
        &[Category::Documents, Category::ApplicationProcess],
    ),
    (
        Category::Documents,
        &[Category::ApplicationProcess, Category::Eligibility],
    ),
    (
        Category::Repayment,
        &[Category::InterestCharges, Category::Support],
    ),
    (
        Category::InterestCharges,
        &[Category::Repayment, Category::LoanInquiry],
    ),
    (
        Category::CompanyInfo,
        &[Category::Support, Category::LoanInquiry],
    ),
    (
        Category::Support,
        &[Category::TechnicalIssues, Category::CompanyInfo],
    ),
    (Category::TechnicalIssues, &[Category::Support]),
    (
        Category::Status,
        &[Category::ApplicationProcess, Category::Support],
    ),
];

/// Result of matching one message against the category table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryOutcome {
    /// `None` when no keyword of any category was present.
    pub category: Option<Category>,
    /// Hits divided by the winning category's keyword-set size.
    pub confidence: f32,
    /// Neighboring topics of the winner, empty when no winner.
    pub related_topics: Vec<Category>,
    /// The winning category's keywords found in the message.
    pub matched_keywords: Vec<String>,
}

impl CategoryOutcome {
    fn no_match() -> Self {
        Self {
            category: None,
            confidence: 0.0,
            related_topics: Vec::new(),
            matched_keywords: Vec::new(),
        }
    }
}

struct CategoryEntry {
    category: Category,
    keywords: Vec<String>,
}

/// Matches messages against per-category keyword sets.
pub struct CategoryMatcher {
    entries: Vec<CategoryEntry>,
}

impl CategoryMatcher {
    pub fn new() -> Self {
        Self::with_table(CATEGORY_TABLE)
    }

    pub fn with_table(table: &[(Category, &[&str])]) -> Self {
        let entries = table
            .iter()
            .map(|(category, keywords)| CategoryEntry {
                category: *category,
                keywords: keywords.iter().map(|k| k.to_string()).collect(),
            })
            .collect();
        Self { entries }
    }

    /// Picks the category with the highest hit ratio, or none at all.
    pub fn match_category(&self, message: &str) -> CategoryOutcome {
        let normalized = normalize(message);
        let mut best: Option<(&CategoryEntry, Vec<String>, f32)> = None;

        for entry in &self.entries {
            let matched: Vec<String> = entry
                .keywords
                .iter()
                .filter(|keyword| normalized.contains(keyword.as_str()))
                .cloned()
                .collect();
            if matched.is_empty() {
                continue;
            }
            let confidence = matched.len() as f32 / entry.keywords.len() as f32;
            // Strict comparison keeps the earlier category on ties.
            let improved = match &best {
                Some((_, _, best_confidence)) => confidence > *best_confidence,
                None => true,
            };
            if improved {
                best = Some((entry, matched, confidence));
            }
        }

        match best {
            Some((entry, matched, confidence)) => CategoryOutcome {
                category: Some(entry.category),
                confidence,
                related_topics: related_topics(entry.category),
                matched_keywords: matched,
            },
            None => CategoryOutcome::no_match(),
        }
    }
}

impl Default for CategoryMatcher {
    fn default() -> Self {
        Self::new()
    }
}

fn related_topics(category: Category) -> Vec<Category> {
    RELATED_TOPICS
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, related)| related.to_vec())
        .unwrap_or_default()
}
