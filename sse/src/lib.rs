//! Server-Sent Events (SSE) infrastructure for real-time updates.
//!
//! This crate keeps every browser tab or device a staff member has open
//! synchronized as reservations change.
//!
//! # Architecture
//!
//! - **Multiple channels per user**: a person may have several tabs/devices;
//!   each open tab is one registered connection.
//! - **Dual-index registry**: O(1) lookups for both connection cleanup and
//!   user-scoped routing via separate DashMap indices.
//! - **User and Broadcast scopes**: messages go to one user's channels or to
//!   every connection.
//! - **Ephemeral messages**: delivery is at-most-once and best-effort; an
//!   offline channel misses the event and converges on the next fetch.
//! - **Typed events**: wire event names and payload shapes are fixed in
//!   [`message::Event`], matching the frontend contract.
//!
//! # Message Flow
//!
//! 1. Frontend opens a channel via the `/sse` endpoint, announcing its user
//! 2. Connection registered in ConnectionRegistry with dual indices
//! 3. A reservation mutation persists, then publishes a `DomainEvent`
//! 4. [`SseDomainEventHandler`] converts it to an SSE message scoped to the
//!    affected user and the manager fans it out to that user's channels
//! 5. A second `paymentMethodTotalsUpdated` message follows with the
//!    recomputed monthly totals
//!
//! # Modules
//!
//! - `connection`: ConnectionRegistry with dual-index architecture
//! - `manager`: High-level message routing (delegates to ConnectionRegistry)
//! - `message`: Typed event and scope definitions
//! - `domain_event_handler`: DomainEvent -> SSE translation

pub mod connection;
pub mod domain_event_handler;
pub mod manager;
pub mod message;

pub use domain_event_handler::SseDomainEventHandler;
pub use manager::Manager;
