//! Bearer-token verification.
//!
//! Tokens are issued by an external identity service that shares
//! `JWT_SECRET`; this service only validates them.

pub mod jwt;
