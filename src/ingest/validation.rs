//! Acceptance rules for submissions.
//!
//! Checks run in a fixed order and stop at the first failure: required fields
//! first, then the per-field length bound.

use serde::Serialize;

use crate::ingest::rejection::Rejection;
use crate::ingest::submission::Submission;

/// Validate a decoded submission against the configured length bound.
pub fn validate(submission: &Submission, max_field_length: usize) -> Result<(), Rejection> {
    check_required(submission)?;
    check_lengths(submission, max_field_length)
}

/// `level` must be non-empty and `minimal` must carry at least one non-null field.
pub fn check_required(submission: &Submission) -> Result<(), Rejection> {
    if submission.level.is_empty() || submission.minimal.is_empty() {
        return Err(Rejection::MissingFields);
    }
    Ok(())
}

/// Each of `level`, `minimal` and `full` must fit within `max` characters as text.
///
/// Lengths are Unicode scalar counts, not bytes. `minimal` and `full` are
/// measured on their compact JSON rendering, so absent fields add nothing.
pub fn check_lengths(submission: &Submission, max: usize) -> Result<(), Rejection> {
    let fields = [
        ("level", submission.level.chars().count()),
        ("minimal", serialized_length(&submission.minimal)?),
        ("full", serialized_length(&submission.full)?),
    ];

    for (field, length) in fields {
        if length > max {
            return Err(Rejection::TooLong { field, length, max });
        }
    }
    Ok(())
}

/// Character count of the compact JSON rendering of `value`.
pub fn serialized_length<T: Serialize>(value: &T) -> Result<usize, Rejection> {
    serde_json::to_string(value)
        .map(|text| text.chars().count())
        .map_err(Rejection::Encode)
}
