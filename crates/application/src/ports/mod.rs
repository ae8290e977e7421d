//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod dispatcher;
mod evaluator;

pub use dispatcher::{DispatchError, Dispatcher};
pub use evaluator::Evaluator;
