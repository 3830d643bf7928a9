//! Ticket triage: keyword classification of submitted text.
//!
//! Two entry points with deliberately different rules:
//! - `classify` assigns priority and category when a ticket is created
//! - `estimate_priority` backs the standalone priority analysis

use crate::keywords::{KeywordRules, STANDARD_RULES};
use crate::profile::{CreationProfile, RuleProfile, StandaloneAnalysisProfile};
use crate::ticket::{Category, Priority};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Result of classifying new ticket text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub priority: Priority,
    pub category: Category,
}

/// Result of the standalone priority analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityEstimate {
    pub priority: Priority,
    pub reason: String,
}

/// Classifier used at ticket creation
#[derive(Debug, Clone, Copy)]
pub struct TicketClassifier<'a> {
    rules: &'a KeywordRules,
}

impl Default for TicketClassifier<'static> {
    fn default() -> Self {
        Self::new(&STANDARD_RULES)
    }
}

impl<'a> TicketClassifier<'a> {
    pub fn new(rules: &'a KeywordRules) -> Self {
        Self { rules }
    }

    pub fn classify(&self, text: &str) -> Classification {
        let lowered = text.to_lowercase();
        let assessment = CreationProfile::new(self.rules).assess(&lowered);
        let category = self.category_of(&lowered);

        debug!(
            "Classified ticket: priority={} ({}), category={}",
            assessment.priority, assessment.reason, category
        );

        Classification {
            priority: assessment.priority,
            category,
        }
    }

    /// Keyword sets overlap ("broken" is both Bug and high priority), so the
    /// check order is fixed: access, bug, billing, feature.
    fn category_of(&self, lowered: &str) -> Category {
        let ordered = [
            (&self.rules.category_access, Category::AccessIssue),
            (&self.rules.category_bug, Category::Bug),
            (&self.rules.category_billing, Category::Billing),
            (&self.rules.category_feature, Category::FeatureRequest),
        ];

        ordered
            .iter()
            .find(|(group, _)| group.matches(lowered))
            .map(|(_, category)| *category)
            .unwrap_or(Category::General)
    }
}

/// Priority estimator for the standalone analysis call
#[derive(Debug, Clone, Copy)]
pub struct PriorityHeuristic<'a> {
    rules: &'a KeywordRules,
}

impl Default for PriorityHeuristic<'static> {
    fn default() -> Self {
        Self::new(&STANDARD_RULES)
    }
}

impl<'a> PriorityHeuristic<'a> {
    pub fn new(rules: &'a KeywordRules) -> Self {
        Self { rules }
    }

    pub fn estimate(&self, text: &str) -> PriorityEstimate {
        let lowered = text.to_lowercase();
        let profile = StandaloneAnalysisProfile::new(self.rules);
        let assessment = profile.assess(&lowered);

        debug!(
            "Priority analysis ({}): {} - {}",
            profile.name(),
            assessment.priority,
            assessment.reason
        );

        PriorityEstimate {
            priority: assessment.priority,
            reason: assessment.reason.to_string(),
        }
    }
}

/// Classify with the standard keyword rules
pub fn classify(text: &str) -> Classification {
    TicketClassifier::default().classify(text)
}

/// Estimate priority with the standard keyword rules
pub fn estimate_priority(text: &str) -> PriorityEstimate {
    PriorityHeuristic::default().estimate(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{REASON_HELP, REASON_STANDARD, REASON_URGENT};

    #[test]
    fn test_angry_login_broken() {
        let c = classify("I'm really angry about login access broken");
        assert_eq!(c.priority, Priority::High);
        assert_eq!(c.category, Category::AccessIssue);
    }

    #[test]
    fn test_feature_suggestion() {
        let c = classify("This is a great feature suggestion");
        assert_eq!(c.priority, Priority::Low);
        assert_eq!(c.category, Category::FeatureRequest);
    }

    #[test]
    fn test_empty_text() {
        let c = classify("");
        assert_eq!(c.priority, Priority::Low);
        assert_eq!(c.category, Category::General);
    }

    #[test]
    fn test_case_insensitive() {
        let c = classify("REFUND PLEASE, URGENT");
        assert_eq!(c.priority, Priority::High);
        assert_eq!(c.category, Category::Billing);
    }

    #[test]
    fn test_medium_priority_words() {
        assert_eq!(classify("I have a problem").priority, Priority::Medium);
        assert_eq!(classify("need help").priority, Priority::Medium);
        assert_eq!(classify("small issue with invoices").priority, Priority::Medium);
    }

    #[test]
    fn test_bug_before_billing() {
        let c = classify("the payment page is not working");
        assert_eq!(c.category, Category::Bug);
        assert_eq!(c.priority, Priority::High);
    }

    #[test]
    fn test_estimate_urgent() {
        let e = estimate_priority("I am angry and furious, urgent!!");
        assert_eq!(e.priority, Priority::High);
        assert_eq!(e.reason, REASON_URGENT);
    }

    #[test]
    fn test_estimate_two_anger_words() {
        let e = estimate_priority("Frustrated and disappointed with the service");
        assert_eq!(e.priority, Priority::High);
    }

    #[test]
    fn test_estimate_help_and_standard() {
        let help = estimate_priority("Can you help me?");
        assert_eq!(help.priority, Priority::Medium);
        assert_eq!(help.reason, REASON_HELP);

        let standard = estimate_priority("What are your opening hours?");
        assert_eq!(standard.priority, Priority::Low);
        assert_eq!(standard.reason, REASON_STANDARD);
    }

    #[test]
    fn test_custom_rules() {
        use crate::keywords::KeywordGroup;

        let mut rules = STANDARD_RULES;
        rules.category_feature = KeywordGroup::new("category-feature", &["wish"]);
        let classifier = TicketClassifier::new(&rules);
        assert_eq!(
            classifier.classify("I wish it had tabs").category,
            Category::FeatureRequest
        );
        assert_eq!(
            classifier.classify("feature idea").category,
            Category::General
        );
    }
}
