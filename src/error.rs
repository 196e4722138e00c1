//! # Error module
//!
//! ## Description
//! This module defines [`ErrorKind`], the taxonomy of failures the rest of the crate can
//! raise, and [`HypergraphError`]/[`HypergraphResult`], the crate's single error type and
//! its result alias.
use std::{error::Error, fmt::Display};





// * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * *
// * LIBRARY-SPECIFIC INSTANCE OF RESULT                                               *
// * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * *



pub type HypergraphResult<OkType> = Result<OkType, HypergraphError>;





// * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * *
// * ERROR KIND                                                                        *
// * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * *



/// # Error kind
///
/// ## Description
/// The taxonomy of failures raised by this crate's mutating operations and iterators.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorKind {
    /// A required argument is absent, e.g. a null/empty collection where an element was
    /// expected, or a forbidden null element offered to a set that disallows it.
    InvalidInput,
    /// The target of an operation is not a member of the expected graph.
    NotInGraph,
    /// A subclass/policy constraint (no hyper-arcs, no half-arcs, acyclicity, ...) would
    /// be violated by the requested operation.
    PolicyViolated,
    /// An iterator or backed view detected a structural mutation since its construction.
    ConcurrentlyModified,
    /// An operation intentionally left unimplemented because it cannot be legally
    /// provided given the current configuration.
    NotSupported,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ErrorKind::InvalidInput => "InvalidInput",
            ErrorKind::NotInGraph => "NotInGraph",
            ErrorKind::PolicyViolated => "PolicyViolated",
            ErrorKind::ConcurrentlyModified => "ConcurrentlyModified",
            ErrorKind::NotSupported => "NotSupported",
        })
    }
}





// * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * *
// * ERROR                                                                             *
// * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * *



#[derive(Debug)]
pub struct HypergraphError {
    kind: ErrorKind,
    message: String,
}

// HypergraphError::HypergraphError
impl HypergraphError {
    pub fn new<StringType>(function_path: &str, kind: ErrorKind, message: StringType) -> Self
    where
        StringType: Into<String>,
    {
        HypergraphError { kind, message: format!("{}. {}", function_path, message.into()) }
    }

    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

// Implementation of Display
impl Display for HypergraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(format!("HypergraphError[{}]: {}", self.kind, self.message).as_str())
    }
}

// Implementation of Error
impl Error for HypergraphError {}
