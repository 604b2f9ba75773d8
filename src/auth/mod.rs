//! Authentication and authorization
//!
//! JWT session tokens plus the middleware gates applied to the router.

pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_admin, require_auth};
