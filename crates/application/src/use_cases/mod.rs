//! Use case orchestration

mod execute_check;

pub use execute_check::{CheckExecution, CheckExecutionExt, CustomCheck, ExecuteCheck};
