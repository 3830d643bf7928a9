//! Sample tickets loaded into an empty store.
//!
//! Classification is fixed here rather than derived, so the samples show a
//! realistic spread of status, assignee and rating values.

use chrono::{DateTime, Duration, Utc};
use sense_shared::{Category, Priority, Ticket};

pub struct SampleTicket {
    pub text: &'static str,
    pub source: &'static str,
    pub priority: Priority,
    pub category: Category,
    pub status: &'static str,
    pub assigned_to: &'static str,
    pub customer_rating: i64,
}

pub const SAMPLE_TICKETS: [SampleTicket; 4] = [
    SampleTicket {
        text: "I'm really angry! The app keeps crashing every time I try to login.",
        source: "email",
        priority: Priority::High,
        category: Category::Bug,
        status: "new",
        assigned_to: "",
        customer_rating: 0,
    },
    SampleTicket {
        text: "How do I reset my password? I can't access my account.",
        source: "web",
        priority: Priority::Medium,
        category: Category::AccessIssue,
        status: "new",
        assigned_to: "",
        customer_rating: 0,
    },
    // Filed as "Feedback" in the sample data, which is not a ticket category.
    SampleTicket {
        text: "I love the new update! The dark mode is amazing.",
        source: "twitter",
        priority: Priority::Low,
        category: Category::General,
        status: "resolved",
        assigned_to: "",
        customer_rating: 5,
    },
    SampleTicket {
        text: "Need urgent help - payment was deducted but service not activated",
        source: "email",
        priority: Priority::High,
        category: Category::Billing,
        status: "in-progress",
        assigned_to: "Sarah",
        customer_rating: 0,
    },
];

impl SampleTicket {
    pub fn to_ticket(&self, id: i64, created_at: DateTime<Utc>) -> Ticket {
        Ticket {
            id,
            text: self.text.to_string(),
            source: self.source.to_string(),
            priority: self.priority,
            category: self.category,
            status: self.status.to_string(),
            assigned_to: self.assigned_to.to_string(),
            customer_rating: self.customer_rating,
            created_at,
        }
    }
}

/// Samples as tickets with ids 1..=4, one second apart, oldest first
pub fn sample_tickets(now: DateTime<Utc>) -> Vec<Ticket> {
    let count = SAMPLE_TICKETS.len() as i64;
    SAMPLE_TICKETS
        .iter()
        .enumerate()
        .map(|(i, sample)| {
            let i = i as i64;
            sample.to_ticket(i + 1, now - Duration::seconds(count - i))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_ids_and_order() {
        let now = Utc::now();
        let tickets = sample_tickets(now);
        assert_eq!(tickets.len(), 4);
        assert_eq!(tickets[0].id, 1);
        assert!(tickets[0].created_at < tickets[3].created_at);
        assert!(tickets.iter().all(|t| t.created_at < now));
    }

    #[test]
    fn test_sample_assignee() {
        let tickets = sample_tickets(Utc::now());
        assert_eq!(tickets[3].assigned_to, "Sarah");
        assert_eq!(tickets[3].status, "in-progress");
    }
}
