//! Domain logic for the Domus apartment-management backend.
//!
//! Everything in this crate is pure: no I/O, no database handles, no
//! ambient caller state. The API layer computes the facts (who the actor
//! is, what they manage) and feeds them into the functions here.

pub mod error;
pub mod pagination;
pub mod request;
pub mod roles;
pub mod room;
pub mod types;
pub mod workflow;
