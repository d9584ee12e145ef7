use serde::{Deserialize, Serialize};

/// Claims of a bearer token issued by the identity backend.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Authenticated user id; doubles as the employee id on leave records
    pub sub: String,
    /// Profile role text, e.g. "admin" or "employee"
    pub role: String,
    pub exp: usize,
}
