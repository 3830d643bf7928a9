//! Shared types and the triage engine for SupportSense components.
//!
//! The engine is pure: classification, reply selection and ranking take
//! their inputs explicitly. Persistence goes through `store::TicketStore`.

pub mod api;
pub mod error;
pub mod keywords;
pub mod lifecycle;
pub mod profile;
pub mod ranking;
pub mod replies;
pub mod store;
pub mod ticket;
pub mod triage;

pub use error::SenseError;
pub use keywords::{KeywordGroup, KeywordRules, STANDARD_RULES};
pub use profile::{CreationProfile, PriorityAssessment, RuleProfile, StandaloneAnalysisProfile};
pub use replies::{suggest_response, ReplyGroup, ResponseSuggester};
pub use store::{MemoryStore, TicketStore};
pub use ticket::{
    Category, CreatedTicket, FieldChange, NewTicket, Priority, Ticket, TicketPatch,
    DEFAULT_SOURCE, DEFAULT_STATUS,
};
pub use triage::{
    classify, estimate_priority, Classification, PriorityEstimate, PriorityHeuristic,
    TicketClassifier,
};

/// Crate version, shared by daemon and CLI
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Short git commit hash at build time
pub const GIT_SHA: &str = env!("SENSE_GIT_SHA");

/// UTC build date
pub const BUILD_DATE: &str = env!("SENSE_BUILD_DATE");

/// Default daemon address
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8001";

/// State directory for SupportSense
pub const STATE_DIR: &str = "/var/lib/supportsense";
