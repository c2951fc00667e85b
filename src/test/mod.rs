//! Test Support

mod server;

pub(crate) use server::{RecordedRequest, TestServer};
