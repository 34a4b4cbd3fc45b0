//! Request middleware.
//!
//! Purpose: cross-cutting request lifecycle concerns. [`Trace`] correlates
//! logs and error envelopes; [`Cors`] answers preflights and decorates every
//! response for browser callers.

pub mod cors;
pub mod trace;

pub use cors::Cors;
pub use trace::Trace;
