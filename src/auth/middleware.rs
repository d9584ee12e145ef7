use crate::auth::auth::AuthUser;
use crate::auth::jwt::verify_token;
use crate::config::Config;
use actix_web::middleware::Next;
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::BoxBody,
    dev::{ServiceRequest, ServiceResponse},
    http::header::AUTHORIZATION,
    web::Data,
};
use serde_json::json;

/// Pulls the token out of `Authorization: Bearer <token>`.
fn bearer_token(req: &ServiceRequest) -> Result<&str, &'static str> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or("Missing Authorization header")?
        .to_str()
        .map_err(|_| "Invalid Authorization header encoding")?;

    header
        .strip_prefix("Bearer ")
        .ok_or("Authorization header must start with Bearer")
}

fn reject(req: ServiceRequest, message: &str) -> ServiceResponse<BoxBody> {
    let resp = HttpResponse::Unauthorized().json(json!({
        "error": "Unauthorized",
        "message": message,
    }));
    req.into_response(resp.map_into_boxed_body())
}

/// Verifies the bearer token and attaches the caller as an [`AuthUser`].
pub async fn auth_middleware(
    req: ServiceRequest,
    next: Next<BoxBody>,
) -> Result<ServiceResponse<BoxBody>, Error> {
    let config = req
        .app_data::<Data<Config>>()
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("App config missing"))?;

    let verified = bearer_token(&req).and_then(|token| {
        verify_token(token, &config.jwt_secret).map_err(|e| {
            // Decoder detail stays in the log.
            tracing::debug!(error = %e, "Rejected bearer token");
            "Invalid or expired token"
        })
    });

    match verified {
        Ok(claims) => {
            req.extensions_mut().insert(AuthUser::from_claims(claims));
            next.call(req).await
        }
        Err(message) => Ok(reject(req, message)),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use actix_web::{App, HttpResponse, http::StatusCode, middleware::from_fn, test, web};
    use serde_json::Value;

    use super::*;
    use crate::auth::jwt::issue_token;

    const SECRET: &str = "middleware-secret";

    fn config() -> Config {
        Config {
            database_url: String::new(),
            jwt_secret: SECRET.into(),
            server_addr: "127.0.0.1:0".into(),
            rate_protected_per_min: 1000,
            api_prefix: "/api".into(),
            name_cache_capacity: 10,
            name_cache_ttl: Duration::from_secs(60),
            log_dir: "logs".into(),
        }
    }

    async fn whoami(user: AuthUser) -> HttpResponse {
        HttpResponse::Ok().body(user.user_id)
    }

    macro_rules! app {
        () => {
            test::init_service(
                App::new().app_data(Data::new(config())).service(
                    web::scope("/api")
                        .wrap(from_fn(auth_middleware))
                        .route("/whoami", web::get().to(whoami)),
                ),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn valid_token_reaches_handler() {
        let app = app!();
        let token = issue_token("emp-7", "employee", SECRET, 600);

        let req = test::TestRequest::get()
            .uri("/api/whoami")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        assert_eq!(body, "emp-7");
    }

    #[actix_web::test]
    async fn bad_token_hides_decoder_error() {
        let app = app!();
        let token = issue_token("emp-7", "employee", "some-other-secret", 600);

        let req = test::TestRequest::get()
            .uri("/api/whoami")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Invalid or expired token");
        assert!(body.get("details").is_none());
    }

    #[actix_web::test]
    async fn non_bearer_scheme_is_rejected() {
        let app = app!();

        let req = test::TestRequest::get()
            .uri("/api/whoami")
            .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Authorization header must start with Bearer");
    }
}
