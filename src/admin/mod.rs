//! Admin Module
//!
//! Everything behind the admin credential.
//!
//! ## Submodules
//! - **`auth`**: The Admin Gate middleware (HTTP Basic).
//! - **`handlers`**: Key listing and provenance lookup.
//! - **`pages`**: HTML renderings shared with the upload response.

pub mod auth;
pub mod handlers;
pub mod pages;

#[cfg(test)]
mod tests;
