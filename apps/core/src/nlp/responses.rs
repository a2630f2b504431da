//! Canned response content.
//!
//! Two kinds of text live here: the ordered pattern table the scored tier
//! searches, and the longer playbook responses the contextual tier returns
//! directly. Patterns are lowercase because scoring runs on normalized text.
//! Editing this file is how the assistant's voice gets retuned.

/// One scored-tier entry: a trigger pattern and the reply it carries.
#[derive(Debug, Clone, Copy)]
pub struct ResponsePattern {
    pub pattern: &'static str,
    pub response: &'static str,
}

/// Returned when both selection tiers decline.
pub const FALLBACK_RESPONSE: &str = "I want to make sure I help you with the right thing. I can assist with loan options, eligibility, documents, EMI and repayment, or the status of an application. Could you tell me a bit more about what you need?";

pub const DOCUMENTS_CHECKLIST: &str = "For most loans you will need: (1) PAN card, (2) Aadhaar card, (3) last 3 months' salary slips or income proof, (4) last 6 months' bank statement, and (5) a passport-size photo. Self-employed applicants should also keep their latest ITR handy. You can upload clear photos or PDFs of each document.";

pub const APPLICATION_STEPS: &str = "Applying takes about 10 minutes: (1) pick a loan type and amount, (2) fill in your basic and income details, (3) upload your KYC documents, (4) review and submit. You will get a reference number immediately and a decision usually within 24 to 48 hours.";

pub const APPLICATION_NUDGE: &str = "Great, you can start your application right away. Tell me the loan type and the amount you have in mind, and I will guide you through each step. Keeping your PAN, Aadhaar and income proof nearby will make it quicker.";

pub const ELIGIBILITY_SUMMARY: &str = "Our baseline eligibility: age 21 to 60, resident of India, minimum monthly income of ₹20,000 (salaried) or 2 years of business vintage (self-employed), and a CIBIL score of 650 or above. Meeting the baseline does not guarantee approval; the final offer depends on your full profile.";

pub const RATES_SUMMARY: &str = "Current interest rates: personal loans from 10.5% p.a., home loans from 8.5% p.a., business loans from 14% p.a. and education loans from 9.5% p.a. A one-time processing fee of up to 2% applies. Your exact rate depends on your credit profile and tenure.";

pub const REPAYMENT_SUMMARY: &str = "Repayment is through monthly EMIs auto-debited from your bank account. Tenures run from 12 to 60 months on personal loans and up to 30 years on home loans. You can prepay in part or full after 6 EMIs; foreclosure charges are up to 3% on fixed-rate loans and nil on floating-rate loans.";

pub const STATUS_GUIDE: &str = "You can track your application anytime with the reference number you received on submission. Typical stages are: received, under verification, approved, and disbursed. If your application shows 'under verification' for more than 3 working days, I can arrange a callback from our team.";

pub const ESCALATION_RESPONSE: &str = "I am sorry you are stuck, and I am marking this as urgent. A senior support executive will call you within 2 working hours. If you prefer not to wait, our priority line 1800-203-4567 is open 9am to 9pm, all days.";

pub const EMPATHY_RESPONSE: &str = "I am really sorry about the trouble you have had. That is not the experience we want to give you. Tell me exactly what went wrong, and I will stay on this until it is resolved or escalate it to a specialist right away.";

pub const COMPANY_OVERVIEW: &str = "LoanMitra is an RBI-registered NBFC lending since 2016, with over 5 lakh customers across India. We offer personal, home, business, education and gold loans with fully digital applications and no branch visits required.";

/// The scored-tier pattern table. Order matters: on equal scores the
/// earlier entry wins, so greetings sit on top.
pub const RESPONSE_PATTERNS: &[ResponsePattern] = &[
    ResponsePattern {
        pattern: "hello",
        response: "Hello! Welcome to LoanMitra. I can help you explore loans, check eligibility, estimate your EMI or track an application. What would you like to do today?",
    },
    ResponsePattern {
        pattern: "hi there",
        response: "Hi! I am the LoanMitra assistant. Ask me about loan options, interest rates, documents or your application status.",
    },
    ResponsePattern {
        pattern: "good morning",
        response: "Good morning! How can I help you with your loan today?",
    },
    ResponsePattern {
        pattern: "good afternoon",
        response: "Good afternoon! How can I help you with your loan today?",
    },
    ResponsePattern {
        pattern: "good evening",
        response: "Good evening! How can I help you with your loan today?",
    },
    ResponsePattern {
        pattern: "namaste",
        response: "Namaste! Welcome to LoanMitra. Tell me what you need: a new loan, eligibility, documents or application status.",
    },
    ResponsePattern {
        pattern: "personal loan",
        response: "Our personal loans range from ₹50,000 to ₹25 lakh at rates starting 10.5% p.a., with tenures of 12 to 60 months and money in your account within 48 hours of approval. Want me to check your eligibility?",
    },
    ResponsePattern {
        pattern: "home loan",
        response: "Home loans start at 8.5% p.a. for amounts up to ₹5 crore with tenures up to 30 years. We fund resale, new purchase and self-construction. Shall I walk you through the eligibility and documents?",
    },
    ResponsePattern {
        pattern: "business loan",
        response: "Business loans go up to ₹75 lakh at rates from 14% p.a., against 2+ years of business vintage. Minimal collateral for loans under ₹25 lakh. Would you like the document checklist?",
    },
    ResponsePattern {
        pattern: "education loan",
        response: "Education loans start at 9.5% p.a. covering tuition, living costs and travel, with repayment starting 6 months after course completion. Co-applicant income proof is required.",
    },
    ResponsePattern {
        pattern: "gold loan",
        response: "Gold loans offer up to 75% of your gold's value at rates from 9% p.a., with same-day disbursal at our partner branches. Your gold stays insured in a bank-grade vault.",
    },
    ResponsePattern {
        pattern: "loan against property",
        response: "Loan against property gives you up to 60% of the property's market value at rates from 10% p.a., with tenures up to 15 years. Both residential and commercial property qualify.",
    },
    ResponsePattern {
        pattern: "apply for a loan",
        response: "You can apply right here: tell me the loan type and amount, and I will start your application. You will need your PAN, Aadhaar and income proof. Most applications take about 10 minutes.",
    },
    ResponsePattern {
        pattern: "how to apply",
        response: "Applying is simple: choose a loan type, fill in your details, upload KYC documents and submit. You get a reference number immediately and a decision within 24 to 48 hours. Want to start now?",
    },
    ResponsePattern {
        pattern: "loan application",
        response: "I can help you start, resume or track a loan application. Which one would you like to do?",
    },
    ResponsePattern {
        pattern: "interest rate",
        response: "Rates currently start at 10.5% p.a. on personal loans, 8.5% on home loans, 14% on business loans and 9.5% on education loans. Your exact rate depends on your credit profile and the tenure you choose.",
    },
    ResponsePattern {
        pattern: "processing fee",
        response: "A one-time processing fee of up to 2% of the loan amount (minimum ₹999) is deducted at disbursal. There are no other upfront charges, and no fee is collected before approval.",
    },
    ResponsePattern {
        pattern: "hidden charges",
        response: "No hidden charges: you pay the interest, a one-time processing fee up to 2%, and penal charges only if an EMI bounces. The full schedule of charges is in your sanction letter before you sign anything.",
    },
    ResponsePattern {
        pattern: "foreclosure charges",
        response: "Foreclosure is free on floating-rate loans. On fixed-rate loans a charge of up to 3% of the outstanding principal applies, and foreclosure is allowed after 6 paid EMIs.",
    },
    ResponsePattern {
        pattern: "late payment",
        response: "A missed EMI attracts penal charges of 2% per month on the overdue amount plus a bounce fee of ₹500, and it is reported to the credit bureaus. If you expect to miss a payment, talk to us early so we can help.",
    },
    ResponsePattern {
        pattern: "emi",
        response: "Your EMI depends on the amount, rate and tenure. As a rough guide, ₹1 lakh over 36 months at 12% p.a. is about ₹3,321 per month. Tell me your amount and tenure and I will estimate it for you.",
    },
    ResponsePattern {
        pattern: "emi calculator",
        response: "Tell me the loan amount, tenure in months, and I will estimate your EMI right here. You can also use the calculator on our app to compare tenures side by side.",
    },
    ResponsePattern {
        pattern: "prepayment",
        response: "You can prepay part of your loan after 6 paid EMIs. Part-prepayment reduces either your EMI or your tenure, your choice. Floating-rate loans have no prepayment charge.",
    },
    ResponsePattern {
        pattern: "repayment options",
        response: "Repayment is via monthly auto-debit EMIs. You can change your EMI date once, part-prepay after 6 EMIs, or foreclose the loan entirely. Which would you like to know more about?",
    },
    ResponsePattern {
        pattern: "tenure",
        response: "Tenures run from 12 to 60 months on personal loans, up to 84 months on business loans and up to 30 years on home loans. Longer tenures mean smaller EMIs but more total interest.",
    },
    ResponsePattern {
        pattern: "eligibility",
        response: "To be eligible you need to be 21 to 60 years old, an Indian resident, with a monthly income of ₹20,000 or more and a CIBIL score of 650+. Want me to run a quick eligibility check?",
    },
    ResponsePattern {
        pattern: "minimum salary",
        response: "The minimum net monthly income is ₹20,000 for salaried applicants in metros and ₹15,000 elsewhere. For self-employed applicants we look at 2 years of business income instead.",
    },
    ResponsePattern {
        pattern: "credit score",
        response: "We generally need a CIBIL score of 650 or above. A higher score gets you better rates. Checking your eligibility with us is a soft inquiry and does not affect your score.",
    },
    ResponsePattern {
        pattern: "cibil score",
        response: "A CIBIL score of 650+ is our baseline, and 750+ unlocks our best rates. If your score is lower, a co-applicant or collateral can still get you approved.",
    },
    ResponsePattern {
        pattern: "self employed",
        response: "Self-employed applicants need 2 years of business vintage, the latest ITR, and 6 months' bank statements. GST registration helps but is not mandatory below ₹10 lakh.",
    },
    ResponsePattern {
        pattern: "documents required",
        response: "You will need your PAN card, Aadhaar card, income proof (salary slips or ITR), and a 6-month bank statement. Photos or PDFs are both fine. Self-employed applicants should add their business proof.",
    },
    ResponsePattern {
        pattern: "pan card",
        response: "Yes, a PAN card is mandatory for any loan. If your PAN details do not match your Aadhaar, update them first; mismatches are the most common reason verification gets delayed.",
    },
    ResponsePattern {
        pattern: "aadhaar",
        response: "Aadhaar is our primary KYC document, used for instant verification via OTP. Make sure your mobile number is linked to your Aadhaar before applying.",
    },
    ResponsePattern {
        pattern: "bank statement",
        response: "We need your last 6 months' bank statement for the account your salary or business income comes into. You can upload a PDF from netbanking or verify instantly through our secure account aggregator.",
    },
    ResponsePattern {
        pattern: "salary slip",
        response: "Please upload your last 3 months' salary slips. If your employer does not issue slips, a salary certificate or bank statement showing salary credits works too.",
    },
    ResponsePattern {
        pattern: "loan status",
        response: "I can check that for you. Please share your application reference number (it starts with LM). Typical stages are received, under verification, approved and disbursed.",
    },
    ResponsePattern {
        pattern: "track my application",
        response: "Share your reference number (starting with LM) and I will look up your application status right away.",
    },
    ResponsePattern {
        pattern: "disbursal",
        response: "Once approved, the amount is credited to your registered bank account within 48 hours. You will get an SMS and email with the disbursal details and your EMI schedule.",
    },
    ResponsePattern {
        pattern: "application rejected",
        response: "I am sorry your application was not approved this time. Common reasons are a low credit score, income below the threshold, or document mismatches. You can reapply after 90 days, and I can tell you what to improve.",
    },
    ResponsePattern {
        pattern: "cancel my application",
        response: "You can cancel anytime before disbursal with no charge. Share your reference number and I will raise the cancellation; it takes effect within 24 hours.",
    },
    ResponsePattern {
        pattern: "customer care",
        response: "You can reach our customer care at 1800-203-4567 (toll-free, 9am to 9pm all days) or write to care@loanmitra.in. I can also arrange a callback if you prefer.",
    },
    ResponsePattern {
        pattern: "branch near me",
        response: "We are a digital-first lender, so everything can be done right here. For gold loans we have partner branches in Mumbai, Delhi, Bangalore, Hyderabad, Chennai, Kolkata and Pune; tell me your city and I will share the nearest one.",
    },
    ResponsePattern {
        pattern: "working hours",
        response: "Our support team is available 9am to 9pm, all seven days. Loan applications and status checks work here 24x7.",
    },
    ResponsePattern {
        pattern: "about loanmitra",
        response: "LoanMitra is an RBI-registered NBFC lending since 2016, serving over 5 lakh customers across India with fully digital personal, home, business, education and gold loans.",
    },
    ResponsePattern {
        pattern: "update mobile number",
        response: "To update your registered mobile number, go to Profile, then Contact Details in the app, or call 1800-203-4567 with your loan account number. The change takes effect after OTP verification on both numbers.",
    },
    ResponsePattern {
        pattern: "login problem",
        response: "Sorry about the login trouble. Try resetting your password from the login screen first. If the OTP does not arrive, check that your registered mobile number is active, or I can escalate this to our technical team.",
    },
    ResponsePattern {
        pattern: "otp not received",
        response: "OTP delays are usually network-related. Wait 60 seconds and tap resend; also check that your number is not on DND for transactional SMS. Still stuck? I will have our technical team call you.",
    },
    ResponsePattern {
        pattern: "website not working",
        response: "Sorry about that. Please try refreshing, or use our app which works offline-first. If it is still failing, tell me what you were trying to do and I will either do it for you here or report the issue.",
    },
    ResponsePattern {
        pattern: "complaint",
        response: "I am sorry to hear that, and I want to set it right. Please describe what happened; I will register a formal complaint with a tracking ID, and our grievance team will respond within 2 working days.",
    },
    ResponsePattern {
        pattern: "insurance",
        response: "Loan protection insurance is optional and covers your EMIs in case of job loss, disability or death. It costs about 0.5% of the loan amount per year and can be bundled into your EMI.",
    },
    ResponsePattern {
        pattern: "balance transfer",
        response: "You can transfer an existing loan to us and save if your current rate is higher than ours. We take over the outstanding amount and you repay at the new rate; processing fee is waived on transfers above ₹5 lakh.",
    },
    ResponsePattern {
        pattern: "top up loan",
        response: "Existing customers with 12+ months of clean repayment can take a top-up of up to 50% of the original amount at the same rate, with no fresh documentation in most cases.",
    },
    ResponsePattern {
        pattern: "thank you",
        response: "You are most welcome! Is there anything else I can help you with today?",
    },
    ResponsePattern {
        pattern: "thanks",
        response: "Happy to help! Anything else you would like to know?",
    },
    ResponsePattern {
        pattern: "bye",
        response: "Goodbye! Come back anytime you have a question about your loan. Have a great day!",
    },
    ResponsePattern {
        pattern: "goodbye",
        response: "Goodbye! Thanks for talking to LoanMitra. We are here 24x7 whenever you need us.",
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_patterns_are_unique() {
        let mut seen = HashSet::new();
        for entry in RESPONSE_PATTERNS {
            assert!(seen.insert(entry.pattern), "duplicate pattern: {}", entry.pattern);
        }
    }

    #[test]
    fn test_patterns_are_normalized() {
        for entry in RESPONSE_PATTERNS {
            assert_eq!(
                entry.pattern,
                entry.pattern.to_lowercase(),
                "pattern not lowercase: {}",
                entry.pattern
            );
            assert_eq!(entry.pattern, entry.pattern.trim());
        }
    }

    #[test]
    fn test_every_pattern_has_a_nonempty_response() {
        for entry in RESPONSE_PATTERNS {
            assert!(!entry.response.trim().is_empty());
        }
    }
}
