//! Service layer: the materialization engine proper.

pub mod assignee_resolver;
pub mod exception_resolver;
pub mod materializer;
pub mod notifier;

pub use assignee_resolver::AssigneeResolver;
pub use exception_resolver::{ExceptionOutcome, ExceptionResolver};
pub use materializer::{Materializer, MaterializerConfig};
pub use notifier::DispatchNotifier;
