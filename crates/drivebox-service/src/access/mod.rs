//! Permission-mediated retrieval URLs.

pub mod mediator;

pub use mediator::AccessMediator;
