//! Applicant discovery, pagination, contact extraction and the traversal loop

pub mod contact;
pub mod discovery;
pub mod pagination;
pub mod record;
pub mod traversal;

pub use record::{ApplicantRecord, ContactInfo, NOT_PROVIDED, ProcessedNameSet, normalize_name};
pub use traversal::{Finished, RetryPolicy, StopReason, Timings, Traversal, TraversalState};
