//! Document matching predicate.
//!
//! The generated API document is rebuilt periodically by an independent
//! server-side process, so at any probe it is either fully updated or not yet
//! updated. The matcher therefore treats the document as an opaque text blob
//! and answers one question: are both of the descriptor's expected tokens
//! visible? Malformed or truncated input simply fails to match; it is never
//! an error.

use crate::registry::descriptor::TypeDescriptor;

/// Check whether a descriptor is visible in a document blob.
///
/// Returns true iff both the schema token (`{group}.{version}.{kind}`) and
/// the route token (`/apis/{group}/{version}/{plural}`) appear as substrings
/// of the document interpreted as UTF-8 text. Invalid UTF-8 sequences are
/// replaced, not rejected.
pub fn matches(document: &[u8], descriptor: &TypeDescriptor) -> bool {
    let text = String::from_utf8_lossy(document);
    text.contains(&descriptor.definition_token()) && text.contains(&descriptor.route_token())
}
