pub mod error;
pub mod jwt;
pub mod middleware;
pub mod permissions;
pub mod policy;
pub mod types;

pub use error::AuthError;
pub use jwt::{SessionClaims, create_jwt, verify_jwt};
pub use middleware::{AuthState, AuthUser};
pub use permissions::{
    CAPABILITIES, Capability, GrantTable, has_all_permissions, has_any_permission, has_permission,
    role_name,
};
pub use policy::SharedGrants;
pub use types::*;
