//! Ticket types for the support desk.
//!
//! A Ticket is created once from submitted text, classified at creation,
//! and afterwards only its status, assignee and rating change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Origin tag used when a submission does not name one
pub const DEFAULT_SOURCE: &str = "web";

/// Status every new ticket starts in
pub const DEFAULT_STATUS: &str = "new";

/// Ordinal urgency label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    #[default]
    Low,
}

impl Priority {
    /// Listing rank: lower ranks are shown first
    pub fn rank(self) -> u8 {
        match self {
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Parse the stored (lowercase) form
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Topical label for a ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Category {
    #[serde(rename = "Access Issue")]
    AccessIssue,
    #[serde(rename = "Bug")]
    Bug,
    #[serde(rename = "Billing")]
    Billing,
    #[serde(rename = "Feature Request")]
    FeatureRequest,
    #[default]
    #[serde(rename = "General")]
    General,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Self::AccessIssue,
        Self::Bug,
        Self::Billing,
        Self::FeatureRequest,
        Self::General,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::AccessIssue => "Access Issue",
            Self::Bug => "Bug",
            Self::Billing => "Billing",
            Self::FeatureRequest => "Feature Request",
            Self::General => "General",
        }
    }

    /// Parse the display form. Unknown labels yield None.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s.trim())
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A persisted support ticket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    /// Store-assigned identifier
    pub id: i64,
    /// Original submitted message
    pub text: String,
    /// Origin tag (web, email, ...)
    pub source: String,
    /// Set at creation, never re-derived
    pub priority: Priority,
    /// Set at creation, never re-derived
    pub category: Category,
    /// Free-form workflow status
    pub status: String,
    /// Agent name, empty when unassigned
    pub assigned_to: String,
    /// Customer satisfaction score, unbounded
    pub customer_rating: i64,
    /// Creation time, ranking tie-break
    pub created_at: DateTime<Utc>,
}

/// Fields handed to the store when a ticket is ingested
#[derive(Debug, Clone, PartialEq)]
pub struct NewTicket {
    pub text: String,
    pub source: String,
    pub priority: Priority,
    pub category: Category,
}

/// Response body for ticket creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedTicket {
    pub id: i64,
    pub priority: Priority,
    pub category: Category,
    pub status: String,
}

impl From<&Ticket> for CreatedTicket {
    fn from(ticket: &Ticket) -> Self {
        Self {
            id: ticket.id,
            priority: ticket.priority,
            category: ticket.category,
            status: ticket.status.clone(),
        }
    }
}

/// Partial update of the mutable ticket fields.
///
/// A `None` field is absent and left untouched. No value is validated:
/// any status string and any rating are accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_rating: Option<i64>,
}

/// One present field of a patch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldChange {
    Status(String),
    AssignedTo(String),
    CustomerRating(i64),
}

impl FieldChange {
    /// Storage column the change writes
    pub fn column(&self) -> &'static str {
        match self {
            Self::Status(_) => "status",
            Self::AssignedTo(_) => "assigned_to",
            Self::CustomerRating(_) => "customer_rating",
        }
    }
}

impl TicketPatch {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.assigned_to.is_none() && self.customer_rating.is_none()
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assigned_to = Some(assignee.into());
        self
    }

    pub fn with_rating(mut self, rating: i64) -> Self {
        self.customer_rating = Some(rating);
        self
    }

    /// Present fields, in column order
    pub fn changes(&self) -> Vec<FieldChange> {
        let mut changes = Vec::new();
        if let Some(status) = &self.status {
            changes.push(FieldChange::Status(status.clone()));
        }
        if let Some(assignee) = &self.assigned_to {
            changes.push(FieldChange::AssignedTo(assignee.clone()));
        }
        if let Some(rating) = self.customer_rating {
            changes.push(FieldChange::CustomerRating(rating));
        }
        changes
    }

    /// Write present fields into `ticket`. Identity, text, classification
    /// and creation time are never touched.
    pub fn apply_to(&self, ticket: &mut Ticket) {
        for change in self.changes() {
            match change {
                FieldChange::Status(status) => ticket.status = status,
                FieldChange::AssignedTo(assignee) => ticket.assigned_to = assignee,
                FieldChange::CustomerRating(rating) => ticket.customer_rating = rating,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Ticket {
        Ticket {
            id: 7,
            text: "my login is broken".to_string(),
            source: DEFAULT_SOURCE.to_string(),
            priority: Priority::High,
            category: Category::AccessIssue,
            status: DEFAULT_STATUS.to_string(),
            assigned_to: String::new(),
            customer_rating: 0,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_priority_rank_order() {
        assert!(Priority::High.rank() < Priority::Medium.rank());
        assert!(Priority::Medium.rank() < Priority::Low.rank());
    }

    #[test]
    fn test_wire_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["priority"], "high");
        assert_eq!(json["category"], "Access Issue");
        assert_eq!(
            serde_json::to_value(Category::FeatureRequest).unwrap(),
            "Feature Request"
        );
    }

    #[test]
    fn test_category_parse() {
        assert_eq!(Category::parse("Billing"), Some(Category::Billing));
        assert_eq!(Category::parse("Feedback"), None);
        assert_eq!(Priority::parse("MEDIUM"), Some(Priority::Medium));
    }

    #[test]
    fn test_patch_applies_only_present_fields() {
        let mut ticket = sample();
        ticket.status = "in-progress".to_string();
        ticket.assigned_to = "Sarah".to_string();

        TicketPatch::default().with_rating(-3).apply_to(&mut ticket);

        assert_eq!(ticket.customer_rating, -3);
        assert_eq!(ticket.status, "in-progress");
        assert_eq!(ticket.assigned_to, "Sarah");
        assert_eq!(ticket.priority, Priority::High);
    }

    #[test]
    fn test_patch_missing_fields_deserialize_as_absent() {
        let patch: TicketPatch = serde_json::from_str(r#"{"status":"resolved"}"#).unwrap();
        assert_eq!(patch.status.as_deref(), Some("resolved"));
        assert!(patch.assigned_to.is_none());
        assert!(patch.customer_rating.is_none());
        assert_eq!(patch.changes().len(), 1);

        let empty: TicketPatch = serde_json::from_str("{}").unwrap();
        assert!(empty.is_empty());
    }
}
