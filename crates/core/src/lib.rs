//! Mentor Kai Core
//!
//! Personalizes tutoring content for a single student profile. The crate
//! builds prompts from the profile, sends them to remote text and speech
//! capabilities, and shapes the replies into a stable JSON contract.

pub mod error;
pub mod llm_client;
pub mod profile;
pub mod prompt;
pub mod shaper;
pub mod speech;
pub mod tutor;

pub use error::{ErrorKind, TutorError};
pub use shaper::{TutorReply, TutorResponse};
pub use tutor::Tutor;
