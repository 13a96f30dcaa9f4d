//! Tang connectivity response model.
//!
//! Records describing whether a set of Tang key-escrow servers answered,
//! together with each server's payload and JWS-style signature blocks.
//!
//! - [`types`]: the three nested records
//! - [`validate`]: recursive, path-labeled, aggregating validation
//! - [`formats`]: named-format registry passed into validation
//! - [`codec`]: JSON byte encoding with atomic in-place decode
//!
//! # Example
//!
//! ```
//! use tang_model::{ConnectivityResult, JsonModel, StandardFormats, Validate};
//!
//! let doc = br#"{"is_success": true, "tang_server_response": [{"tang_url": "http://tang1"}]}"#;
//! let result = ConnectivityResult::from_json_bytes(doc).unwrap();
//!
//! assert!(result.is_success());
//! assert!(result.validate(&StandardFormats::new()).is_ok());
//! ```

pub mod codec;
pub mod error;
pub mod formats;
pub mod types;
pub mod validate;

pub use codec::{encode_optional, JsonModel};
pub use error::{
    CodecError, CodecResult, CompositeError, DecodeErrorKind, ErrorCode, FieldError,
    ValidationError,
};
pub use formats::{validate_format, FormatRegistry, StandardFormats};
pub use types::{ConnectivityResult, ServerResponse, SignatureBlock};
pub use validate::{validate_each, OperationKind, Validate, ValidationContext};
