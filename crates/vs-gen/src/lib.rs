//! Contract with the generative backend that produces the design brief and
//! the first vector document of a session.
//!
//! The backend itself is an external collaborator behind
//! [`GenerativeBackend`]; this crate owns what the studio relies on: the
//! brief schema, the failure taxonomy, retry with exponential backoff,
//! and validation of the returned markup.

pub mod brief;
pub mod error;
pub mod generator;
pub mod prompt;
pub mod retry;

pub use brief::{Brief, BriefRequest, EngineChoice, ReferenceImage, VisualStyle};
pub use error::{GenerationError, Result, classify};
pub use generator::{GenerativeBackend, Generator, extract_svg};
pub use prompt::{DEFAULT_IMAGE_SIZE, brief_prompt, vector_prompt};
pub use retry::{RetryPolicy, retry_with_backoff};
