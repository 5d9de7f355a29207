pub mod entities;
pub mod ports;
pub mod services;

pub use entities::SessionContext;
pub use ports::{SessionRepository, SessionService};
