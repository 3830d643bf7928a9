//! Ticket lifecycle: ingestion, partial updates and ranked listing.
//!
//! Priority and category are decided once, here, at ingestion. Updates only
//! ever touch status, assignee and rating, and are not validated.

use crate::error::{Result, SenseError};
use crate::ranking;
use crate::store::TicketStore;
use crate::ticket::{CreatedTicket, NewTicket, Ticket, TicketPatch, DEFAULT_SOURCE};
use crate::triage::TicketClassifier;
use tracing::{debug, info, warn};

/// Classify `text` and persist it as a new ticket.
///
/// Empty text is accepted and classifies as low/General.
pub fn ingest<S: TicketStore + ?Sized>(
    store: &S,
    classifier: &TicketClassifier<'_>,
    text: &str,
    source: Option<&str>,
) -> Result<CreatedTicket> {
    let classification = classifier.classify(text);
    let source = source.unwrap_or(DEFAULT_SOURCE);

    let ticket = store.create(NewTicket {
        text: text.to_string(),
        source: source.to_string(),
        priority: classification.priority,
        category: classification.category,
    })?;

    info!(
        "Created ticket #{} from {}: priority={}, category={}",
        ticket.id, ticket.source, ticket.priority, ticket.category
    );

    Ok(CreatedTicket::from(&ticket))
}

/// Apply a partial update and return the freshly read ticket.
///
/// An empty patch is a no-op that still returns the current ticket.
pub fn update<S: TicketStore + ?Sized>(store: &S, id: i64, patch: &TicketPatch) -> Result<Ticket> {
    if patch.is_empty() {
        debug!("Empty update for ticket #{}, returning current state", id);
        return store.get(id)?.ok_or(SenseError::NotFound(id));
    }

    let columns: Vec<&str> = patch.changes().iter().map(|c| c.column()).collect();
    debug!("Updating ticket #{}: {}", id, columns.join(", "));

    match store.update(id, patch) {
        Ok(ticket) => {
            info!(
                "Updated ticket #{}: status={}, assigned_to={:?}, rating={}",
                ticket.id, ticket.status, ticket.assigned_to, ticket.customer_rating
            );
            Ok(ticket)
        }
        Err(e) => {
            if e.is_not_found() {
                warn!("Update rejected, ticket #{} not found", id);
            }
            Err(e)
        }
    }
}

/// All tickets in listing order
pub fn list_ranked<S: TicketStore + ?Sized>(store: &S) -> Result<Vec<Ticket>> {
    let mut tickets = store.list()?;
    ranking::rank(&mut tickets);
    Ok(tickets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::ticket::{Category, Priority};

    #[test]
    fn test_ingest_defaults_source() {
        let store = MemoryStore::new();
        let created = ingest(&store, &TicketClassifier::default(), "help me", None).unwrap();
        assert_eq!(created.status, "new");
        assert_eq!(created.priority, Priority::Medium);

        let stored = store.get(created.id).unwrap().unwrap();
        assert_eq!(stored.source, "web");
    }

    #[test]
    fn test_update_status_only() {
        let store = MemoryStore::new();
        let created = ingest(
            &store,
            &TicketClassifier::default(),
            "billing refund",
            Some("email"),
        )
        .unwrap();

        let before = store.get(created.id).unwrap().unwrap();
        let after = update(
            &store,
            created.id,
            &TicketPatch::default().with_status("resolved"),
        )
        .unwrap();

        assert_eq!(after.status, "resolved");
        assert_eq!(after.category, Category::Billing);
        assert_eq!(after.created_at, before.created_at);
        assert_eq!(after.source, "email");
    }

    #[test]
    fn test_empty_patch_unknown_id() {
        let store = MemoryStore::new();
        let err = update(&store, 3, &TicketPatch::default()).unwrap_err();
        assert!(err.is_not_found());
    }
}
