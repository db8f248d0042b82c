pub mod document;

pub use document::{DecisionStatus, DocumentImage, VerificationDocument};
