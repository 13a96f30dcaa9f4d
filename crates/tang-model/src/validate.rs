//! Recursive validation of nested records.
//!
//! Every record implements [`Validate`]. Both entry points funnel into
//! [`Validate::validate_in`], which receives the optional ambient context, so
//! there is a single traversal for the context-free and context-aware cases.
//!
//! List fields are walked by [`validate_each`]:
//!
//! ```text
//! absent / []        -> Ok
//! [a, null, b, c]    -> validate a, skip null, validate b, validate c
//! b fails, c fails   -> Composite[ b.prefixed("field.2"), c.prefixed("field.3") ]
//! ```

use crate::error::{CompositeError, ValidationError};
use crate::formats::FormatRegistry;

/// Direction of the API operation a record is validated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OperationKind {
    Request,
    #[default]
    Response,
}

impl std::str::FromStr for OperationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "request" => Ok(Self::Request),
            "response" => Ok(Self::Response),
            other => Err(format!(
                "unknown operation kind '{other}' (expected request or response)"
            )),
        }
    }
}

/// Ambient information about the API surface a record belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationContext {
    /// Operation that requested or produced the record (e.g. `v2GetClusterTangConnectivity`).
    pub operation: Option<String>,
    pub kind: OperationKind,
}

impl ValidationContext {
    pub fn new(kind: OperationKind) -> Self {
        Self {
            operation: None,
            kind,
        }
    }

    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }
}

/// Records that can be validated against a format registry.
pub trait Validate {
    /// Shared traversal. `ctx` is `Some` for context-aware validation.
    fn validate_in(
        &self,
        ctx: Option<&ValidationContext>,
        formats: &dyn FormatRegistry,
    ) -> Result<(), ValidationError>;

    /// Validate locally declared constraints.
    fn validate(&self, formats: &dyn FormatRegistry) -> Result<(), ValidationError> {
        self.validate_in(None, formats)
    }

    /// Validate constraints that depend on the operation context.
    fn context_validate(
        &self,
        ctx: &ValidationContext,
        formats: &dyn FormatRegistry,
    ) -> Result<(), ValidationError> {
        self.validate_in(Some(ctx), formats)
    }
}

/// Validate every present element of an optional list field.
///
/// Null elements are skipped. A failing element's error is re-labeled with
/// `"<field>.<index>"` and traversal continues, so the returned composite
/// holds one entry per failing element.
pub fn validate_each<T, F>(
    field: &str,
    items: Option<&[Option<T>]>,
    mut validate_element: F,
) -> Result<(), CompositeError>
where
    F: FnMut(&T) -> Result<(), ValidationError>,
{
    let Some(items) = items else {
        return Ok(());
    };

    let errors: Vec<ValidationError> = items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| item.as_ref().map(|item| (i, item)))
        .filter_map(|(i, item)| {
            validate_element(item)
                .err()
                .map(|e| e.prefixed(&format!("{field}.{i}")))
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(CompositeError::new(errors))
    }
}

/// Fold per-field results of one record into its overall result.
pub(crate) fn collect(results: Vec<Result<(), CompositeError>>) -> Result<(), ValidationError> {
    let errors: Vec<ValidationError> = results
        .into_iter()
        .filter_map(Result::err)
        .map(ValidationError::Composite)
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(CompositeError::new(errors).into())
    }
}
