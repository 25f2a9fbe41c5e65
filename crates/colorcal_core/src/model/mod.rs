//! Calendar domain model.
//!
//! # Responsibility
//! - Define value types shared by grid generation, navigation and events.
//! - Keep rendering concerns out of core data structures.
//!
//! # Invariants
//! - Dates are validated at construction and never hold impossible triples.
//! - Event payloads are shared by `Arc`, never copied by core.

pub mod cell;
pub mod date;
pub mod event;
