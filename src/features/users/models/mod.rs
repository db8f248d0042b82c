pub mod profile;

pub use profile::{Profile, UserRole, VerificationStatus};
