//! IAM policy document model and structural validation
//!

use serde::Deserialize;
use serde::Serialize;

use crate::error::Error;

/// An IAM policy document: the shared envelope fields plus the ordered
/// sequence of statements.
///
/// The field order here matches the wire format of the documents AWS
/// emits, so re-serializing a parsed policy produces `Version` first,
/// then `Statement`, then `Id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    /// The policy language version, e.g. "2012-10-17". An absent field
    /// deserializes to the empty string so that structural validation
    /// can report it.
    #[serde(rename = "Version", default)]
    pub version: String,
    /// The ordered sequence of statements carried by this document.
    #[serde(rename = "Statement", default)]
    pub statements: Vec<Statement>,
    /// Optional policy identifier, copied into every split policy and
    /// omitted from the output when absent.
    #[serde(rename = "Id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// A single policy statement.
///
/// Statements are opaque to this library: they are carried as raw JSON
/// values and never inspected beyond their serialized length. Keeping
/// the raw value means unknown statement keys survive a round trip
/// untouched, which a typed statement struct could not guarantee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Statement(
    /// The raw JSON value of the statement.
    pub serde_json::Value,
);

impl Policy {
    /// Parse a policy document from its JSON wire format and check its
    /// structure.
    ///
    /// This function checks the following
    /// * That the document is well-formed JSON.
    /// * That the Version envelope field is present and non-empty.
    /// * That the document carries at least one statement.
    pub fn from_json(policy_json: &str) -> Result<Self, Error> {
        let policy: Policy = serde_json::from_str(policy_json).map_err(Error::ParsePolicyJson)?;

        if policy.version.is_empty() {
            return Err(Error::MissingPolicyVersion);
        }
        if policy.statements.is_empty() {
            return Err(Error::EmptyStatementList);
        }

        Ok(policy)
    }

    /// Serialize the policy to its compact JSON wire format.
    ///
    /// The caller is expected to add context to the error, since this
    /// type does not know which output policy it is.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
