//! Order drafts built by an operator in the admin console.
//!
//! An [`OrderDraft`] holds the pricing inputs of one order form and keeps the
//! derived discount, total due and balance consistent after every edit. A
//! [`FormSession`] owns one draft exclusively, exposes field mutators and
//! notifies subscribers once per completed edit.

pub mod draft;
pub mod session;
pub mod submission;

pub use draft::{DraftCommand, DraftEvent, DraftStatus, OrderDraft};
pub use session::{DraftUpdate, FieldChange, FormSession, SessionError};
pub use submission::{OrderSubmission, OrderSubmitter, SubmitError};
