//! Ticket store abstraction.
//!
//! The triage core only needs create/list/get/update. The daemon provides a
//! SQLite implementation; `MemoryStore` backs tests and `sensed --memory`.

use crate::error::{Result, SenseError};
use crate::ticket::{NewTicket, Ticket, TicketPatch, DEFAULT_STATUS};
use chrono::Utc;
use std::sync::RwLock;

/// Persistence operations required by the lifecycle
pub trait TicketStore: Send + Sync {
    /// Persist a new ticket; the store assigns `id` and `created_at`
    fn create(&self, new: NewTicket) -> Result<Ticket>;

    /// All tickets, in no particular order
    fn list(&self) -> Result<Vec<Ticket>>;

    fn get(&self, id: i64) -> Result<Option<Ticket>>;

    /// Apply the present fields of `patch` and return the stored ticket.
    /// Unknown ids fail with `NotFound` without changing anything.
    fn update(&self, id: i64, patch: &TicketPatch) -> Result<Ticket>;
}

/// In-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<MemoryInner>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    next_id: i64,
    tickets: Vec<Ticket>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert fully-formed tickets (seed data, fixtures). Ids are kept and
    /// later creates continue after the largest one.
    pub fn with_tickets(tickets: Vec<Ticket>) -> Self {
        let next_id = tickets.iter().map(|t| t.id).max().unwrap_or(0);
        Self {
            inner: RwLock::new(MemoryInner { next_id, tickets }),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|i| i.tickets.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(_: T) -> SenseError {
    SenseError::Storage("memory store lock poisoned".to_string())
}

impl TicketStore for MemoryStore {
    fn create(&self, new: NewTicket) -> Result<Ticket> {
        let mut inner = self.inner.write().map_err(poisoned)?;
        inner.next_id += 1;

        let ticket = Ticket {
            id: inner.next_id,
            text: new.text,
            source: new.source,
            priority: new.priority,
            category: new.category,
            status: DEFAULT_STATUS.to_string(),
            assigned_to: String::new(),
            customer_rating: 0,
            created_at: Utc::now(),
        };
        inner.tickets.push(ticket.clone());
        Ok(ticket)
    }

    fn list(&self) -> Result<Vec<Ticket>> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner.tickets.clone())
    }

    fn get(&self, id: i64) -> Result<Option<Ticket>> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner.tickets.iter().find(|t| t.id == id).cloned())
    }

    fn update(&self, id: i64, patch: &TicketPatch) -> Result<Ticket> {
        let mut inner = self.inner.write().map_err(poisoned)?;
        let ticket = inner
            .tickets
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(SenseError::NotFound(id))?;

        patch.apply_to(ticket);
        Ok(ticket.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ticket::{Category, Priority};

    fn new_ticket(text: &str) -> NewTicket {
        NewTicket {
            text: text.to_string(),
            source: "web".to_string(),
            priority: Priority::Low,
            category: Category::General,
        }
    }

    #[test]
    fn test_ids_are_sequential() {
        let store = MemoryStore::new();
        assert_eq!(store.create(new_ticket("a")).unwrap().id, 1);
        assert_eq!(store.create(new_ticket("b")).unwrap().id, 2);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_create_defaults() {
        let store = MemoryStore::new();
        let t = store.create(new_ticket("hello")).unwrap();
        assert_eq!(t.status, "new");
        assert_eq!(t.assigned_to, "");
        assert_eq!(t.customer_rating, 0);
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let store = MemoryStore::new();
        store.create(new_ticket("a")).unwrap();
        let err = store
            .update(99, &TicketPatch::default().with_status("resolved"))
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(store.get(1).unwrap().unwrap().status, "new");
    }

    #[test]
    fn test_with_tickets_continues_ids() {
        let store = MemoryStore::new();
        let seeded = store.create(new_ticket("seed")).unwrap();
        let mut later = seeded.clone();
        later.id = 10;

        let store = MemoryStore::with_tickets(vec![seeded, later]);
        assert_eq!(store.create(new_ticket("next")).unwrap().id, 11);
    }
}
