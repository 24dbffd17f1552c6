//! Failure-to-response mapping for errgate
//!
//! An [`ErrorHandler`] owns an ordered chain of [`ApiErrorMapper`]s. Each
//! failure is given to the first mapper that recognizes it; codes come from
//! [`CodeResolver`], localized messages from [`MessageResolver`], and extra
//! response properties from [`PropertyExtractor`].

#![allow(clippy::must_use_candidate)]

mod code;
pub mod defaults;
mod extract;
mod handler;
pub mod mapper;
mod message;

pub use code::{CodeResolver, all_caps};
pub use extract::PropertyExtractor;
pub use handler::{ErrorHandler, ErrorHandlerBuilder, HandlerBuildError};
pub use mapper::{ApiErrorMapper, FallbackMapper, MappingContext};
pub use message::{MessageArg, MessageResolver, Resolvable, field_message_codes, message_codes};
