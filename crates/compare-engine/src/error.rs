//! Error types for the validation engine.
//!
//! Everything in here is fatal for a run: the comparison itself could not be
//! completed. A check that completes and finds a difference is not an error,
//! it is a failed [`CheckResult`](crate::CheckResult).

use bson::Bson;
use thiserror::Error;

/// Errors that abort a validation run.
#[derive(Error, Debug)]
pub enum CompareError {
    /// MongoDB connection or query error.
    #[error("MongoDB error: {0}")]
    MongoDb(#[from] mongodb::error::Error),

    /// An index descriptor did not have the shape `listIndexes` guarantees.
    #[error("Malformed index descriptor on {namespace}: {reason}")]
    MalformedIndex { namespace: String, reason: String },

    /// A sampled source document had no counterpart in the target.
    #[error("Target collection {namespace} has no document with _id {id}")]
    MissingDocument { namespace: String, id: Bson },

    /// A document returned by the server had no `_id` field.
    #[error("Document without _id returned from {0}")]
    MissingId(String),
}

pub type Result<T> = std::result::Result<T, CompareError>;
