//! Listing order for tickets.

use crate::ticket::Ticket;
use std::cmp::Ordering;

/// High before medium before low; within a priority, newest first.
pub fn compare(a: &Ticket, b: &Ticket) -> Ordering {
    a.priority
        .rank()
        .cmp(&b.priority.rank())
        .then_with(|| b.created_at.cmp(&a.created_at))
}

/// Sort in listing order. The sort is stable, so tickets equal on both
/// keys keep their incoming order.
pub fn rank(tickets: &mut [Ticket]) {
    tickets.sort_by(compare);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ticket::{Category, Priority};
    use chrono::{Duration, TimeZone, Utc};

    fn ticket(id: i64, priority: Priority, minute: i64) -> Ticket {
        let base = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
        Ticket {
            id,
            text: format!("ticket {}", id),
            source: "web".to_string(),
            priority,
            category: Category::General,
            status: "new".to_string(),
            assigned_to: String::new(),
            customer_rating: 0,
            created_at: base + Duration::minutes(minute),
        }
    }

    #[test]
    fn test_priority_then_recency() {
        let mut tickets = vec![
            ticket(1, Priority::Low, 1),
            ticket(2, Priority::High, 2),
            ticket(3, Priority::Medium, 3),
        ];
        rank(&mut tickets);
        let ids: Vec<i64> = tickets.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_newest_first_within_priority() {
        let mut tickets = vec![
            ticket(1, Priority::High, 1),
            ticket(2, Priority::High, 5),
            ticket(3, Priority::Medium, 9),
            ticket(4, Priority::High, 3),
        ];
        rank(&mut tickets);
        let ids: Vec<i64> = tickets.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_full_ties_keep_input_order() {
        let mut tickets = vec![
            ticket(9, Priority::Low, 0),
            ticket(4, Priority::Low, 0),
            ticket(6, Priority::Low, 0),
        ];
        rank(&mut tickets);
        let ids: Vec<i64> = tickets.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![9, 4, 6]);
    }

    #[test]
    fn test_other_fields_ignored() {
        let a = ticket(1, Priority::Medium, 0);
        let mut b = ticket(2, Priority::Medium, 0);
        b.status = "resolved".to_string();
        b.customer_rating = 5;
        assert_eq!(compare(&a, &b), Ordering::Equal);
    }
}
