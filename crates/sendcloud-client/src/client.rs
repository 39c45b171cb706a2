//! Client facade tying encoder, transport, and decoder together.

use sendcloud_core::{CredentialStore, DirectMail, OutboundMessage, TemplateInvocation};

use crate::{
    encode,
    error::Result,
    response::ApiResponse,
    transport::{ApiTransport, TransportConfig},
};

/// Multi-domain SendCloud API client.
///
/// Cheap to clone; clones share the credential store and the HTTP
/// connection pool, and calls from concurrent tasks are independent.
///
/// # Example
///
/// ```no_run
/// use sendcloud_client::Client;
/// use sendcloud_core::DirectMail;
///
/// # async fn demo() -> sendcloud_client::Result<()> {
/// let client = Client::new()?;
/// client.register_domain("corp.example", "postmaster@corp.example", "api-key");
///
/// let mail = DirectMail {
///     from: "noreply@corp.example".to_string(),
///     to: vec!["user@example.com".to_string()],
///     subject: "Welcome".to_string(),
///     html: "<p>Hello!</p>".to_string(),
///     ..Default::default()
/// };
/// let email_id = client.send(&mail).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    transport: ApiTransport,
    store: CredentialStore,
}

impl Client {
    /// Creates a client against the production API.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Transport` if the HTTP client cannot be
    /// built.
    pub fn new() -> Result<Self> {
        Self::with_config(TransportConfig::default())
    }

    /// Creates a client with explicit transport configuration.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Transport` if the HTTP client cannot be
    /// built.
    pub fn with_config(config: TransportConfig) -> Result<Self> {
        let store = CredentialStore::new();
        let transport = ApiTransport::new(store.clone(), config)?;
        Ok(Self { transport, store })
    }

    /// Registers the credential pair for a sending domain.
    pub fn register_domain(
        &self,
        domain: impl Into<String>,
        api_user: impl Into<String>,
        api_key: impl Into<String>,
    ) {
        self.store.register(domain, api_user, api_key);
    }

    /// Sends a direct mail and returns the remote-assigned message id.
    ///
    /// The id may be empty if the API omits `email_id_list` from a
    /// successful response.
    ///
    /// # Errors
    ///
    /// Any [`crate::ClientError`]: invalid From address, unknown
    /// domain, encoding failure, transport or HTTP failure, or an
    /// API-reported error.
    pub async fn send(&self, mail: &DirectMail) -> Result<String> {
        let response = self.call(&OutboundMessage::Direct(mail.clone())).await?;
        Ok(response.first_email_id())
    }

    /// Sends a template invocation.
    ///
    /// Template calls return no message id.
    ///
    /// # Errors
    ///
    /// Same classes as [`Client::send`].
    pub async fn send_template(&self, invocation: &TemplateInvocation) -> Result<()> {
        self.call(&OutboundMessage::Template(invocation.clone())).await?;
        Ok(())
    }

    /// Sends either message variant and returns the decoded response.
    ///
    /// # Errors
    ///
    /// Same classes as [`Client::send`].
    pub async fn call(&self, message: &OutboundMessage) -> Result<ApiResponse> {
        let request = encode::encode(message)?;
        let body = self.transport.invoke(request.endpoint, &request.domain, request.fields).await?;
        ApiResponse::decode(&body).into_result()
    }
}
