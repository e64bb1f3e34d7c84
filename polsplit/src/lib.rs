#![deny(missing_docs)]

//! # Polsplit
//!
//! This library splits AWS IAM policy documents that exceed a size quota
//! into multiple equivalent policies. The envelope fields of the input
//! document (the `Version` marker and the optional `Id`) are copied
//! verbatim into every output policy; the statements are partitioned so
//! that each output policy's serialized JSON stays within the configured
//! character limit. Statements are atomic and are never split across
//! output policies.

pub mod error;
pub mod policy;
pub mod split;
