//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- user from a `Bearer` access token.
//! - [`auth::MaybeAuthUser`] -- the same, but optional (anonymous donations).
//! - [`rbac::RequireAdmin`] / [`rbac::RequireAuth`] -- role gates.

pub mod auth;
pub mod rbac;
