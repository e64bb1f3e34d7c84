//! Splitting IAM policy documents into limit-sized pieces.
//!
//! The packing strategy is first-fit decreasing over serialized cost:
//! statements are sorted by the size of a policy holding each statement
//! alone, largest first, and each statement goes into the first group
//! that can still take it, opening a new group only when none fits.
//!
//! Serialized policy size is not the sum of statement sizes. The JSON
//! encoding adds separators between statements, and the envelope fields
//! cost their bytes once per document rather than once per statement. A
//! fit check therefore serializes the whole candidate group and measures
//! the result; nothing in this module estimates a size from cached
//! per-statement numbers.

use serde::Serialize;

use crate::error::Error;
use crate::policy::Policy;
use crate::policy::Statement;


/// The default per-policy character limit, matching the AWS quota for
/// managed policies. Inline policies have a lower quota of 2048
/// characters; pass that explicitly when splitting for inline use.
pub const DEFAULT_MAX_CHARS: usize = 6144;

/// The result of splitting a policy document.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitOutcome {
    /// The split policies in group-creation order, each serialized to
    /// the same wire format as the input document.
    pub policies: Vec<String>,
    /// An identifier derived from the input, of the form
    /// `split-<statement_count>-<limit>`.
    pub id: String,
}

/// A statement paired with its solo cost: the serialized size of a
/// policy holding the shared envelope fields and only this statement.
///
/// The solo cost is the sort key for packing and also serves as the
/// oversize pre-check, since a statement whose solo cost exceeds the
/// limit can never be placed anywhere.
#[derive(Debug)]
struct WeightedStatement<'a> {
    statement: &'a Statement,
    size: usize,
    /// The statement's position in the input document, for error
    /// reporting after the sort has reordered everything.
    index: usize,
}

/// An accumulating group of statements destined to become one output
/// policy, along with its measured serialized size. Groups are only
/// appended to while packing runs and are never reopened afterwards.
#[derive(Debug)]
struct PolicyGroup<'a> {
    statements: Vec<&'a Statement>,
    current_size: usize,
}

/// Serialize-only view of a policy over borrowed statements.
///
/// Field names and order mirror [`Policy`], so a size measured through
/// this view is byte-identical to the serialized form of the assembled
/// output policy.
#[derive(Serialize)]
struct PolicyView<'a> {
    #[serde(rename = "Version")]
    version: &'a str,
    #[serde(rename = "Statement")]
    statements: &'a [&'a Statement],
    #[serde(rename = "Id", skip_serializing_if = "Option::is_none")]
    id: Option<&'a String>,
}

/// Measure the serialized size of a policy holding the given envelope
/// fields and statements.
fn serialized_len(
    version: &str,
    id: Option<&String>,
    statements: &[&Statement],
) -> Result<usize, serde_json::Error> {
    let view = PolicyView { version, statements, id };
    serde_json::to_string(&view).map(|policy_json| policy_json.len())
}

/// Compute the solo cost of every statement in the policy, failing if
/// any statement cannot fit within the limit even on its own.
///
/// The returned list is in input order; the index reported in a
/// [`Error::StatementTooLarge`] is the statement's position in the
/// input document.
fn weigh_statements<'a>(
    policy: &'a Policy,
    max_chars: usize,
) -> Result<Vec<WeightedStatement<'a>>, Error> {
    let mut weighted = Vec::with_capacity(policy.statements.len());

    for (index, statement) in policy.statements.iter().enumerate() {
        let size = serialized_len(&policy.version, policy.id.as_ref(), &[statement])
            .map_err(|error| Error::SerializeStatement(error, index))?;
        tracing::debug!(index, size, "measured statement solo cost");

        if size > max_chars {
            return Err(Error::StatementTooLarge { index, size, limit: max_chars });
        }

        weighted.push(WeightedStatement { statement, size, index });
    }

    Ok(weighted)
}

/// Split a parsed policy into the minimum practical number of policies
/// whose serialized forms each stay within `max_chars` characters.
///
/// Statements are packed with a first-fit decreasing strategy over
/// their solo serialized cost; whether a statement fits an existing
/// group is decided by serializing the candidate group in full. The
/// returned policies are in group-creation order, each carrying the
/// input's envelope fields verbatim and its statements in the order the
/// packing placed them.
///
/// The packing is deterministic: the sort is stable, so equal-cost
/// statements keep their input order, and groups are always scanned in
/// creation order.
pub fn split_policy(policy: &Policy, max_chars: usize) -> Result<Vec<Policy>, Error> {
    if policy.statements.is_empty() {
        return Err(Error::EmptyStatementList);
    }

    let mut weighted = weigh_statements(policy, max_chars)?;
    weighted.sort_by(|a, b| b.size.cmp(&a.size));

    let version = policy.version.as_str();
    let id = policy.id.as_ref();
    let mut groups: Vec<PolicyGroup> = Vec::new();

    for weighted_statement in weighted {
        let mut placed = false;

        for group in groups.iter_mut() {
            // Serialize the candidate group to check the size; cached
            // sizes cannot answer this because the cost of a group is
            // not the sum of its statements' costs.
            let mut candidate = group.statements.clone();
            candidate.push(weighted_statement.statement);

            let probe_size = serialized_len(version, id, &candidate)
                .map_err(|error| Error::SerializeStatement(error, weighted_statement.index))?;

            if probe_size <= max_chars {
                group.statements = candidate;
                group.current_size = probe_size;
                placed = true;
                break;
            }
        }

        if !placed {
            groups.push(PolicyGroup {
                statements: vec![weighted_statement.statement],
                current_size: weighted_statement.size,
            });
        }
    }

    let policies = groups
        .into_iter()
        .enumerate()
        .map(|(index, group)| {
            tracing::debug!(
                policy = index + 1,
                statements = group.statements.len(),
                chars = group.current_size,
                "packed policy group",
            );
            Policy {
                version: policy.version.clone(),
                statements: group.statements.into_iter().cloned().collect(),
                id: policy.id.clone(),
            }
        })
        .collect();

    Ok(policies)
}

/// Split a policy document given in its JSON wire format.
///
/// `max_chars` defaults to [`DEFAULT_MAX_CHARS`] when unset and must be
/// positive. The input document must be well-formed: it needs a
/// `Version` field and at least one statement. The returned outcome
/// carries each split policy serialized back to the same wire format,
/// in group-creation order, together with an identifier derived from
/// the input.
pub fn split_policy_json(
    policy_json: &str,
    max_chars: Option<i64>,
) -> Result<SplitOutcome, Error> {
    let max_chars = max_chars.unwrap_or(DEFAULT_MAX_CHARS as i64);
    if max_chars <= 0 {
        return Err(Error::InvalidMaxChars(max_chars));
    }
    let max_chars = max_chars as usize;

    let policy = Policy::from_json(policy_json)?;
    tracing::info!(
        statements = policy.statements.len(),
        max_chars,
        "splitting policy",
    );

    let split = split_policy(&policy, max_chars)?;

    let mut policies = Vec::with_capacity(split.len());
    for (index, piece) in split.iter().enumerate() {
        let json = piece
            .to_json()
            .map_err(|error| Error::SerializePolicy(error, index))?;
        policies.push(json);
    }

    tracing::info!(policies = policies.len(), "split policy into pieces");

    Ok(SplitOutcome {
        policies,
        id: format!("split-{}-{}", policy.statements.len(), max_chars),
    })
}
