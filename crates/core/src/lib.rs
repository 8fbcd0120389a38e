//! Domain types and pure logic for the Courtbook booking service.
//!
//! Nothing in this crate touches the network or the database. The
//! availability projector and the authorization policy live here so they
//! can be tested without any I/O.

pub mod availability;
pub mod errors;
pub mod models;
pub mod policy;
