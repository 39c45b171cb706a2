//! Outbound message variants and From-address handling.
//!
//! A send request is either a direct mail with a full HTML body or an
//! invocation of a server-side template with per-recipient placeholder
//! substitutions. The sending domain that selects the authenticating
//! credentials is derived from the From address here.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// A send request, polymorphic over the two API call shapes.
#[derive(Debug, Clone)]
pub enum OutboundMessage {
    /// A fully specified mail with its own HTML body (`mail.send`).
    Direct(DirectMail),
    /// A server-side template invocation (`mail.send_template`).
    Template(TemplateInvocation),
}

impl OutboundMessage {
    /// Returns the From address of either variant.
    pub fn from_address(&self) -> &str {
        match self {
            Self::Direct(mail) => &mail.from,
            Self::Template(invocation) => &invocation.from,
        }
    }
}

/// A direct mail with an explicit HTML body.
#[derive(Debug, Clone, Default)]
pub struct DirectMail {
    /// From address, either `user@domain` or `Name <user@domain>`.
    pub from: String,
    /// Optional display name for the sender.
    pub from_name: String,
    /// Primary recipients.
    pub to: Vec<String>,
    /// Carbon-copy recipients.
    pub cc: Vec<String>,
    /// Blind-carbon-copy recipients.
    pub bcc: Vec<String>,
    /// Optional Reply-To address.
    pub reply_to: String,
    /// Subject line.
    pub subject: String,
    /// HTML mail body.
    pub html: String,
    /// Extra mail headers, sent as a JSON object when non-empty.
    pub headers: HashMap<String, String>,
}

/// An invocation of a pre-registered remote template.
#[derive(Debug, Clone)]
pub struct TemplateInvocation {
    /// Remote template identifier (`template_invoke_name`).
    pub template_name: String,
    /// Subject line.
    pub subject: String,
    /// From address, same forms as [`DirectMail::from`].
    pub from: String,
    /// Display name for the sender.
    pub from_name: String,
    /// Per-recipient placeholder substitutions.
    pub substitution: Substitution,
}

/// Placeholder substitutions for a template send.
///
/// Each value list in `sub` must have the same length as `to`: the
/// value at position `i` is substituted for recipient `i`. The wire
/// call does not enforce this, the caller must keep them aligned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substitution {
    /// Recipient addresses, in substitution order.
    pub to: Vec<String>,
    /// Placeholder to per-recipient values, parallel to `to`.
    pub sub: HashMap<String, Vec<String>>,
}

impl Substitution {
    /// Creates an empty substitution set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a recipient.
    pub fn add_to(&mut self, to: impl Into<String>) {
        self.to.push(to.into());
    }

    /// Appends one value for a placeholder, in recipient order.
    pub fn add_sub(&mut self, placeholder: impl Into<String>, value: impl Into<String>) {
        self.sub.entry(placeholder.into()).or_default().push(value.into());
    }
}

/// Extracts the sending domain from a From address.
///
/// Handles both bare addresses (`user@corp.example`) and display-name
/// forms (`Name <user@corp.example>`): the domain is everything after
/// the last `@`, trimmed of a closing angle bracket.
///
/// # Errors
///
/// Returns `CoreError::InvalidFromAddress` if the address has no `@`,
/// no local part, or an empty domain.
pub fn sending_domain(from: &str) -> Result<&str> {
    let invalid = || CoreError::InvalidFromAddress { address: from.to_string() };

    let (local, rest) = from.rsplit_once('@').ok_or_else(invalid)?;
    if local.is_empty() {
        return Err(invalid());
    }
    let domain = match rest.find('>') {
        Some(end) => &rest[..end],
        None => rest,
    };
    if domain.is_empty() {
        return Err(invalid());
    }
    Ok(domain)
}
