pub mod auth;
pub mod session;

pub use auth::RequireSession;
pub use session::Session;
