//! Rule profiles: named priority rule sets over the shared keyword groups.
//!
//! Ticket creation and the standalone priority analysis deliberately
//! disagree (different vocabulary, different thresholds). Each is a
//! `RuleProfile` so both can live side by side without duplicating the
//! matching code.

use crate::keywords::KeywordRules;
use crate::ticket::Priority;

/// Priority decision with a human-readable reason
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityAssessment {
    pub priority: Priority,
    pub reason: &'static str,
}

/// A named configuration driving one priority decision
pub trait RuleProfile {
    /// Profile name, used in logs
    fn name(&self) -> &'static str;

    /// Assess already-lowercased text
    fn assess(&self, lowered: &str) -> PriorityAssessment;
}

/// Priority rules applied when a ticket is created
#[derive(Debug, Clone, Copy)]
pub struct CreationProfile<'a> {
    rules: &'a KeywordRules,
}

impl<'a> CreationProfile<'a> {
    pub const NAME: &'static str = "creation";

    pub fn new(rules: &'a KeywordRules) -> Self {
        Self { rules }
    }
}

impl RuleProfile for CreationProfile<'_> {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn assess(&self, lowered: &str) -> PriorityAssessment {
        if self.rules.priority_high.matches(lowered) {
            PriorityAssessment {
                priority: Priority::High,
                reason: "Contains high-priority keyword",
            }
        } else if self.rules.priority_medium.matches(lowered) {
            PriorityAssessment {
                priority: Priority::Medium,
                reason: "Mentions a problem",
            }
        } else {
            PriorityAssessment {
                priority: Priority::Low,
                reason: "No priority keywords",
            }
        }
    }
}

/// Reason reported for urgent or repeatedly angry text
pub const REASON_URGENT: &str = "Contains urgent/anger language";
/// Reason reported for plain help requests
pub const REASON_HELP: &str = "General help request";
/// Reason reported when nothing matched
pub const REASON_STANDARD: &str = "Standard inquiry";

/// Priority rules behind the standalone analysis endpoint
#[derive(Debug, Clone, Copy)]
pub struct StandaloneAnalysisProfile<'a> {
    rules: &'a KeywordRules,
}

impl<'a> StandaloneAnalysisProfile<'a> {
    pub const NAME: &'static str = "standalone-analysis";

    pub fn new(rules: &'a KeywordRules) -> Self {
        Self { rules }
    }
}

impl RuleProfile for StandaloneAnalysisProfile<'_> {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn assess(&self, lowered: &str) -> PriorityAssessment {
        let urgency_count = self.rules.urgency.count_matches(lowered);
        let anger_count = self.rules.anger.count_matches(lowered);

        // One urgency word is enough; anger needs two distinct words.
        if urgency_count > 0 || anger_count > 1 {
            PriorityAssessment {
                priority: Priority::High,
                reason: REASON_URGENT,
            }
        } else if self.rules.help_request.matches(lowered) {
            PriorityAssessment {
                priority: Priority::Medium,
                reason: REASON_HELP,
            }
        } else {
            PriorityAssessment {
                priority: Priority::Low,
                reason: REASON_STANDARD,
            }
        }
    }
}
