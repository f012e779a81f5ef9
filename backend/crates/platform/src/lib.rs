//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id, NIST SP 800-63B compliant)
//! - Secret hashing for opaque credentials (refresh tokens)
//! - Cookie management

pub mod cookie;
pub mod password;
