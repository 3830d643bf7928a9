//! Canned reply suggestions.
//!
//! The reply group is picked by keyword; the reply within the group is
//! picked at random from a caller-supplied source, so tests can pin it.

use crate::keywords::{KeywordRules, STANDARD_RULES};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Candidate groups, in match order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReplyGroup {
    Troubleshooting,
    AccessRecovery,
    Billing,
    Greeting,
}

const TROUBLESHOOTING: [&str; 3] = [
    "I understand you're experiencing technical issues. Let's troubleshoot this together.",
    "I apologize for the technical difficulties. Our team is looking into this urgently.",
    "Thank you for reporting this issue. Can you tell me what device you're using?",
];

const ACCESS_RECOVERY: [&str; 3] = [
    "I can help you reset your password. Please check your email for a reset link.",
    "Let's get you back into your account. I'll send password reset instructions.",
    "For security, I'll help you regain access to your account securely.",
];

const BILLING: [&str; 3] = [
    "I'll check your payment status and help with any billing concerns.",
    "Let me review your account and assist with the payment issue.",
    "I understand your billing concern. Let me look into this for you.",
];

const GREETING: [&str; 3] = [
    "Thank you for reaching out. How can I assist you today?",
    "I'm here to help! Could you provide more details about your concern?",
    "Thanks for contacting support. Let me know how I can help you.",
];

impl ReplyGroup {
    pub fn candidates(self) -> &'static [&'static str] {
        match self {
            Self::Troubleshooting => &TROUBLESHOOTING,
            Self::AccessRecovery => &ACCESS_RECOVERY,
            Self::Billing => &BILLING,
            Self::Greeting => &GREETING,
        }
    }
}

/// Picks canned replies for ticket text
#[derive(Debug, Clone, Copy)]
pub struct ResponseSuggester<'a> {
    rules: &'a KeywordRules,
}

impl Default for ResponseSuggester<'static> {
    fn default() -> Self {
        Self::new(&STANDARD_RULES)
    }
}

impl<'a> ResponseSuggester<'a> {
    pub fn new(rules: &'a KeywordRules) -> Self {
        Self { rules }
    }

    /// Group whose candidates apply to `text`
    pub fn group_for(&self, text: &str) -> ReplyGroup {
        let lowered = text.to_lowercase();

        if self.rules.reply_troubleshooting.matches(&lowered) {
            ReplyGroup::Troubleshooting
        } else if self.rules.reply_access.matches(&lowered) {
            ReplyGroup::AccessRecovery
        } else if self.rules.reply_billing.matches(&lowered) {
            ReplyGroup::Billing
        } else {
            ReplyGroup::Greeting
        }
    }

    /// Uniformly pick one candidate of the matched group
    pub fn suggest<R: Rng + ?Sized>(&self, text: &str, rng: &mut R) -> &'static str {
        let candidates = self.group_for(text).candidates();
        // Every group is a non-empty constant array.
        candidates.choose(rng).copied().unwrap_or(GREETING[0])
    }
}

/// Suggest a reply with the standard keyword rules
pub fn suggest_response<R: Rng + ?Sized>(text: &str, rng: &mut R) -> &'static str {
    ResponseSuggester::default().suggest(text, rng)
}
