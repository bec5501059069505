//! # Coverdeck AI
//!
//! AI-assisted layout generation: given a natural-language prompt and the
//! canvas size, propose a starting set of elements for the editor to merge
//! through its ordinary batch-add path.
//!
//! Two paths serve a request:
//!
//! - **Remote**: with a configured API key, a chat-completion endpoint is
//!   asked for a strict-JSON design document. Failures surface as typed
//!   errors; the caller's scene is never touched on failure.
//! - **Local**: without a key, a deterministic keyword-template generator
//!   produces the proposal. Same prompt and size, same output.
//!
//! A single busy flag guards against concurrent requests; there is no
//! queue and no cancellation primitive.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod error;
pub mod proposal;
pub mod template;

pub use client::{CoverGenerator, DEFAULT_API_URL};
pub use error::{GenerateError, GenerateResult};
pub use proposal::{GeneratedElement, GeneratedGradient, GenerationResult};

/// Generation crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
