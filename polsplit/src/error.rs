//! Top-level error type for the polsplit library
//!

/// Errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input policy document was not valid JSON.
    #[error("could not parse the policy document as JSON: {0}")]
    ParsePolicyJson(#[source] serde_json::Error),
    /// The policy document was missing the Version envelope field.
    #[error("the policy document must have a Version field")]
    MissingPolicyVersion,
    /// The policy document had no statements.
    #[error("the policy document must have at least one statement")]
    EmptyStatementList,
    /// The configured per-policy character limit was not positive.
    #[error("max_chars must be greater than 0, got {0}")]
    InvalidMaxChars(i64),
    /// A single statement exceeded the character limit on its own. There
    /// is no finer unit to split, so the document cannot be packed under
    /// this limit at all.
    #[error(
        "statement {index} ({size} characters) exceeds the maximum character \
         limit ({limit}); individual statements cannot be split further"
    )]
    StatementTooLarge {
        /// The position of the statement in the input document.
        index: usize,
        /// The serialized size of the envelope plus this statement alone.
        size: usize,
        /// The configured character limit.
        limit: usize,
    },
    /// Failed to serialize a statement while measuring its size.
    #[error("could not serialize statement {1}: {0}")]
    SerializeStatement(#[source] serde_json::Error, usize),
    /// Failed to serialize an output policy back to its wire format.
    #[error("could not serialize split policy {1}: {0}")]
    SerializePolicy(#[source] serde_json::Error, usize),
}
