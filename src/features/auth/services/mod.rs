pub mod auth_service;
pub mod gate_service;

pub use auth_service::AuthService;
pub use gate_service::AdminGate;
