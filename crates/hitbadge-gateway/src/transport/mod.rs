//! HTTP transport for the badge endpoint.

pub mod http;
