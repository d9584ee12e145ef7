use crate::{error::LeaveError, model::role::Role, models::Claims};
use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload, error::ErrorUnauthorized};
use futures::future::{Ready, ready};

#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Also the employee id used on leave records
    pub user_id: String,
    pub role: Role,
}

impl AuthUser {
    pub fn from_claims(claims: Claims) -> Self {
        AuthUser {
            role: Role::from_profile(Some(&claims.role)),
            user_id: claims.sub,
        }
    }

    pub fn require_hr_or_admin(&self) -> Result<(), LeaveError> {
        if self.role.can_review_leave() {
            Ok(())
        } else {
            Err(LeaveError::Forbidden("HR/Admin only".into()))
        }
    }
}

/// Reads the user attached by [`crate::auth::middleware::auth_middleware`].
impl FromRequest for AuthUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<AuthUser>()
                .cloned()
                .ok_or_else(|| ErrorUnauthorized("Missing token")),
        )
    }
}
