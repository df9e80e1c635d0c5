//! The JSON request handlers, one module per resource.
//!
//! Handlers are thin glue: they validate payloads, call the stores, and pass
//! plain collections to the [aggregation](crate::aggregation) engine. See
//! [build_router](crate::build_router) for how they are wired up.

pub mod auth;
pub mod budgets;
pub mod categories;
pub mod goals;
pub mod reports;
pub mod transactions;
