//! Form-field encoding for outbound API calls.
//!
//! The API is picky about its form fields: optional fields must be
//! omitted entirely when empty, recipient lists are semicolon-joined,
//! and structured values (extra headers, template substitutions) ride
//! inside JSON-encoded string fields. This module turns an
//! [`OutboundMessage`] into the exact ordered field set the wire
//! expects, plus the sending domain for credential selection.

use sendcloud_core::{sending_domain, DirectMail, OutboundMessage, TemplateInvocation};

use crate::error::{ClientError, Result};

/// API endpoint name for direct sends.
pub const ENDPOINT_SEND: &str = "mail.send";
/// API endpoint name for template sends.
pub const ENDPOINT_SEND_TEMPLATE: &str = "mail.send_template";

/// An encoded request: endpoint, sending domain, and ordered fields.
#[derive(Debug, Clone)]
pub struct EncodedRequest {
    /// Endpoint name, appended to the API base as `<endpoint>.json`.
    pub endpoint: &'static str,
    /// Sending domain extracted from the From address.
    pub domain: String,
    /// Form fields in wire order, before credentials are appended.
    pub fields: Vec<(&'static str, String)>,
}

/// Encodes a message into its form-field representation.
///
/// # Errors
///
/// Returns `InvalidFromAddress` if no sending domain can be extracted,
/// or an encoding error if a JSON-valued field fails to serialize.
pub fn encode(message: &OutboundMessage) -> Result<EncodedRequest> {
    match message {
        OutboundMessage::Direct(mail) => encode_direct(mail),
        OutboundMessage::Template(invocation) => encode_template(invocation),
    }
}

fn encode_direct(mail: &DirectMail) -> Result<EncodedRequest> {
    let domain = sending_domain(&mail.from)?.to_string();

    let mut fields: Vec<(&'static str, String)> = Vec::with_capacity(10);
    // always ask the API to echo back the assigned message id
    fields.push(("resp_email_id", "true".to_string()));
    fields.push(("from", mail.from.clone()));
    if !mail.from_name.is_empty() {
        fields.push(("fromname", mail.from_name.clone()));
    }
    if !mail.to.is_empty() {
        fields.push(("to", mail.to.join(";")));
    }
    if !mail.cc.is_empty() {
        fields.push(("cc", mail.cc.join(";")));
    }
    if !mail.bcc.is_empty() {
        fields.push(("bcc", mail.bcc.join(";")));
    }
    if !mail.reply_to.is_empty() {
        fields.push(("replyto", mail.reply_to.clone()));
    }
    fields.push(("subject", mail.subject.clone()));
    fields.push(("html", mail.html.clone()));
    if !mail.headers.is_empty() {
        let headers =
            serde_json::to_string(&mail.headers).map_err(ClientError::HeaderEncoding)?;
        fields.push(("headers", headers));
    }

    Ok(EncodedRequest { endpoint: ENDPOINT_SEND, domain, fields })
}

fn encode_template(invocation: &TemplateInvocation) -> Result<EncodedRequest> {
    let domain = sending_domain(&invocation.from)?.to_string();

    let substitution_vars = serde_json::to_string(&invocation.substitution)
        .map_err(ClientError::SubstitutionEncoding)?;

    let fields = vec![
        ("template_invoke_name", invocation.template_name.clone()),
        ("subject", invocation.subject.clone()),
        ("from", invocation.from.clone()),
        ("fromname", invocation.from_name.clone()),
        ("substitution_vars", substitution_vars),
    ];

    Ok(EncodedRequest { endpoint: ENDPOINT_SEND_TEMPLATE, domain, fields })
}
