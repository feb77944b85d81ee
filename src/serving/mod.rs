//! Serving Module
//!
//! The public read path. `GET /:key` streams a stored blob back with a 30-day public
//! cache directive so that browsers and intermediaries can serve repeats on their own;
//! `cache` provides the edge cache the route is fronted by.

pub mod cache;
pub mod handlers;
