//! Types shared between the server crates and clients.
//!
//! [`journal`] is a client-side model: the server never stores or serves
//! journal entries. It lives here so clients written against this crate get
//! the same-day overwrite rule and the seven-day view without reimplementing
//! them.

pub mod api;
pub mod journal;
pub mod models;
