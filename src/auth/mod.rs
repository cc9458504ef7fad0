//! Authentication: sessions, stored credentials, login and registration.

pub mod authenticator;
pub mod session;
pub mod validation;

pub use authenticator::Authenticator;
pub use session::{Credential, Session, SessionManager};
pub use validation::RegistrationParams;
