//! Shared data structures for the feedback code engine
//!
//! This module defines the domain vocabulary the rest of the crate works in:
//! - Catalog entries: FeedbackCode, RawFeedbackCode, CodeCategory, RequiredFieldSet
//! - Access control: Role and its per-category visibility rules
//! - Form state: FeedbackSelection and the field-value map
//! - Rendering metadata: FieldKind classification, ResolutionOption
//! - Submission wire types: FeedbackSubmission, FieldErrors, ack/error bodies

mod code;
mod fields;
mod role;
mod selection;
mod submission;

pub use code::*;
pub use fields::*;
pub use role::*;
pub use selection::*;
pub use submission::*;
