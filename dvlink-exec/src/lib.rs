#![forbid(unsafe_code)]

//! Execution runtime for the dvlink connector, from token acquisition
//! through classified HTTP execution against the entity endpoint.
//!
//! The data model lives in `dvlink-core`, along with validation and the
//! error taxonomy.

pub mod config;
pub mod dispatch;
pub mod executor;
pub mod http;
pub mod request;
pub mod token;

pub use crate::config::ExecutorConfig;
pub use crate::dispatch::Dispatcher;
pub use crate::executor::{HttpExecutor, ResponseBody};
pub use crate::http::{
    HttpClient, HttpError, HttpRequestParts, HttpResponseParts, ReqwestHttpClient,
};
pub use crate::request::{build_request, BuiltRequest, Method};
pub use crate::token::fetch_token;
