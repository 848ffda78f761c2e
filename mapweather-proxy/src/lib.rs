//! Library portion of the proxy, exposing the router for integration
//! tests.

pub mod app;
