//! Keyword groups shared by every classifier.
//!
//! Matching is case-insensitive substring containment: callers lowercase the
//! text once, and a keyword counts even inside a longer word ("crash" hits
//! "crashed").

/// A named set of lowercase keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordGroup {
    pub name: &'static str,
    pub words: &'static [&'static str],
}

impl KeywordGroup {
    pub const fn new(name: &'static str, words: &'static [&'static str]) -> Self {
        Self { name, words }
    }

    /// True if any keyword occurs in `lowered`
    pub fn matches(&self, lowered: &str) -> bool {
        self.words.iter().any(|w| lowered.contains(w))
    }

    /// Number of distinct keywords that occur in `lowered` (repeats ignored)
    pub fn count_matches(&self, lowered: &str) -> usize {
        self.words.iter().filter(|w| lowered.contains(*w)).count()
    }

    /// First keyword that occurs in `lowered`, for logging
    pub fn first_match(&self, lowered: &str) -> Option<&'static str> {
        self.words.iter().copied().find(|w| lowered.contains(w))
    }
}

/// The full keyword configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordRules {
    pub priority_high: KeywordGroup,
    pub priority_medium: KeywordGroup,
    pub category_access: KeywordGroup,
    pub category_bug: KeywordGroup,
    pub category_billing: KeywordGroup,
    pub category_feature: KeywordGroup,
    pub urgency: KeywordGroup,
    pub anger: KeywordGroup,
    pub help_request: KeywordGroup,
    pub reply_troubleshooting: KeywordGroup,
    pub reply_access: KeywordGroup,
    pub reply_billing: KeywordGroup,
}

/// Keyword configuration used by the desk
pub const STANDARD_RULES: KeywordRules = KeywordRules {
    priority_high: KeywordGroup::new(
        "priority-high",
        &["angry", "urgent", "emergency", "broken", "not working"],
    ),
    priority_medium: KeywordGroup::new("priority-medium", &["help", "issue", "problem"]),
    category_access: KeywordGroup::new("category-access", &["password", "login", "access"]),
    category_bug: KeywordGroup::new("category-bug", &["bug", "crash", "broken", "not working"]),
    category_billing: KeywordGroup::new("category-billing", &["refund", "payment", "billing"]),
    category_feature: KeywordGroup::new("category-feature", &["feature", "suggestion"]),
    urgency: KeywordGroup::new("urgency", &["urgent", "emergency", "immediately", "asap"]),
    anger: KeywordGroup::new("anger", &["angry", "furious", "frustrated", "disappointed"]),
    help_request: KeywordGroup::new("help-request", &["help", "issue"]),
    reply_troubleshooting: KeywordGroup::new(
        "reply-troubleshooting",
        &["crash", "broken", "not working"],
    ),
    reply_access: KeywordGroup::new("reply-access", &["password", "login", "access"]),
    reply_billing: KeywordGroup::new("reply-billing", &["refund", "payment", "billing"]),
};

impl Default for KeywordRules {
    fn default() -> Self {
        STANDARD_RULES
    }
}
