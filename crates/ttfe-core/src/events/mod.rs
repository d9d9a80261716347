//! Run lifecycle events: handler trait, payloads, dispatcher.

pub mod dispatcher;
pub mod handler;
pub mod types;

pub use dispatcher::EventDispatcher;
pub use handler::MiningEventHandler;
