//! Core domain types for SendCloud integration.
//!
//! Provides the credential store, outbound message variants, delivery
//! event types, and the shared error taxonomy. Both the outbound client
//! and the inbound webhook receiver build on these primitives.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod credentials;
pub mod error;
pub mod events;
pub mod message;

pub use credentials::{Credential, CredentialStore};
pub use error::{CoreError, Result};
pub use events::{DeliveryEvent, EventHandler, NoOpEventHandler};
pub use message::{sending_domain, DirectMail, OutboundMessage, Substitution, TemplateInvocation};
