//! Tang connectivity records.
//!
//! ```text
//! ConnectivityResult
//! ├── is_success
//! └── tang_server_response: [ServerResponse | null]
//!     ├── payload
//!     ├── tang_url
//!     └── signatures: [SignatureBlock | null]
//!         ├── protected
//!         └── signature
//! ```
//!
//! Every field is optional and absence is kept distinct from an empty value:
//! an absent list is omitted on the wire, a present empty list encodes as `[]`.

use serde::{Deserialize, Serialize};

use crate::codec::JsonModel;
use crate::error::ValidationError;
use crate::formats::FormatRegistry;
use crate::validate::{collect, validate_each, Validate, ValidationContext};

/// Result of checking connectivity to a set of Tang servers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectivityResult {
    /// Tang check result.
    #[serde(
        rename = "is_success",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub succeeded: Option<bool>,

    /// One entry per queried server, in query order.
    #[serde(
        rename = "tang_server_response",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub server_responses: Option<Vec<Option<ServerResponse>>>,
}

impl ConnectivityResult {
    pub const FIELD_SERVER_RESPONSES: &'static str = "tang_server_response";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_succeeded(mut self, succeeded: bool) -> Self {
        self.succeeded = Some(succeeded);
        self
    }

    pub fn with_server_responses(mut self, responses: Vec<Option<ServerResponse>>) -> Self {
        self.server_responses = Some(responses);
        self
    }

    /// Append a response, creating the list if absent.
    pub fn push_response(&mut self, response: ServerResponse) {
        self.server_responses
            .get_or_insert_with(Vec::new)
            .push(Some(response));
    }

    /// `is_success`, with absence read as `false`.
    pub fn is_success(&self) -> bool {
        self.succeeded.unwrap_or(false)
    }

    /// Non-null server responses in order.
    pub fn responses(&self) -> impl Iterator<Item = &ServerResponse> {
        self.server_responses
            .iter()
            .flatten()
            .filter_map(Option::as_ref)
    }
}

impl Validate for ConnectivityResult {
    fn validate_in(
        &self,
        ctx: Option<&ValidationContext>,
        formats: &dyn FormatRegistry,
    ) -> Result<(), ValidationError> {
        collect(vec![validate_each(
            Self::FIELD_SERVER_RESPONSES,
            self.server_responses.as_deref(),
            |r| r.validate_in(ctx, formats),
        )])
    }
}

impl JsonModel for ConnectivityResult {
    const MODEL_NAME: &'static str = "tang_connectivity_response";
}

/// Answer from a single Tang server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerResponse {
    /// Tang response payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signatures: Option<Vec<Option<SignatureBlock>>>,

    /// Tang URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tang_url: Option<String>,
}

impl ServerResponse {
    pub const FIELD_SIGNATURES: &'static str = "signatures";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_payload(mut self, payload: impl Into<String>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    pub fn with_tang_url(mut self, url: impl Into<String>) -> Self {
        self.tang_url = Some(url.into());
        self
    }

    pub fn with_signatures(mut self, signatures: Vec<Option<SignatureBlock>>) -> Self {
        self.signatures = Some(signatures);
        self
    }

    pub fn push_signature(&mut self, signature: SignatureBlock) {
        self.signatures
            .get_or_insert_with(Vec::new)
            .push(Some(signature));
    }

    /// Non-null signature blocks in order.
    pub fn signature_blocks(&self) -> impl Iterator<Item = &SignatureBlock> {
        self.signatures.iter().flatten().filter_map(Option::as_ref)
    }
}

impl Validate for ServerResponse {
    fn validate_in(
        &self,
        ctx: Option<&ValidationContext>,
        formats: &dyn FormatRegistry,
    ) -> Result<(), ValidationError> {
        collect(vec![validate_each(
            Self::FIELD_SIGNATURES,
            self.signatures.as_deref(),
            |s| s.validate_in(ctx, formats),
        )])
    }
}

impl JsonModel for ServerResponse {
    const MODEL_NAME: &'static str = "TangServerResponse";
}

/// Detached JWS-style signature: protected header plus signature value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protected: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

impl SignatureBlock {
    pub fn new(protected: impl Into<String>, signature: impl Into<String>) -> Self {
        Self {
            protected: Some(protected.into()),
            signature: Some(signature.into()),
        }
    }
}

impl Validate for SignatureBlock {
    // Opaque leaf: nothing to check.
    fn validate_in(
        &self,
        _ctx: Option<&ValidationContext>,
        _formats: &dyn FormatRegistry,
    ) -> Result<(), ValidationError> {
        Ok(())
    }
}

impl JsonModel for SignatureBlock {
    const MODEL_NAME: &'static str = "TangServerSignatures";
}
