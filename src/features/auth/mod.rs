mod jwt;

pub mod clients;
pub mod dtos;
pub mod guards;
pub mod handlers;
pub mod model;
pub mod provider;
pub mod routes;
pub mod services;
pub mod session;

pub use jwt::JwtValidator;
pub use provider::AuthProvider;
pub use services::{AdminGate, AuthService};
pub use session::SessionContext;
