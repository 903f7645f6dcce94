pub mod identity;

pub use identity::{AuthError, IdentityProvider, RemoteIdentityProvider, VerifiedUser};
