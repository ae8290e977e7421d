//! Port adapters

mod reqwest_dispatcher;

pub use reqwest_dispatcher::ReqwestDispatcher;
