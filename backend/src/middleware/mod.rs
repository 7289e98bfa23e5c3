//! Request middleware.
//!
//! Authentication is not middleware here: the session extractor in
//! `inbound::http::session` runs per handler so public routes stay public.

pub mod trace;

pub use trace::Trace;
