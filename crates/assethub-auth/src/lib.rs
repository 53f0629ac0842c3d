//! # assethub-auth
//!
//! Who is calling, and what they may change.
//!
//! ## Modules
//!
//! - `jwt`: HS256 bearer token verification into a [`Caller`]
//! - `policy`: the [`MutationPolicy`] capability object consulted by every
//!   mutating service entry point

pub mod jwt;
pub mod policy;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use policy::{Caller, Mutation, MutationPolicy};
