//! OpenCollection document types and their mapping to the domain request.
//!
//! These types mirror the on-disk layout: one collection root document per
//! collection and one request document per request file. They are produced
//! by parsing and consumed by serialization only; everything else works on
//! [`RequestSpec`](crate::request::RequestSpec).

mod auth;
mod body;
mod collection;
mod common;
mod mapper;
mod request;

pub use auth::*;
pub use body::*;
pub use collection::*;
pub use common::*;
pub use mapper::*;
pub use request::*;
