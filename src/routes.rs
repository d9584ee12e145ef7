use crate::{api::leave_request, auth::middleware::auth_middleware, config::Config, store::LeaveStore};
use actix_governor::{
    Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware,
};
use actix_web::{Scope, middleware::from_fn, web};
use anyhow::{Context, Result};

pub type RateLimit = GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware>;

/// Per-IP quota for the protected scope. Workers built from the same
/// config share one limiter state.
pub fn build_limiter(requests_per_min: u32) -> Result<RateLimit> {
    let per_ms = if requests_per_min == 0 {
        1
    } else {
        (60_000 / requests_per_min as u64).max(1)
    };
    let cfg = GovernorConfigBuilder::default()
        .milliseconds_per_request(per_ms)
        .burst_size(requests_per_min.max(1))
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .context("invalid rate limit configuration")?;
    Ok(cfg)
}

/// `/leave` routes. Fixed segments are registered ahead of `/{id}`.
pub fn leave_scope<S: LeaveStore + 'static>() -> Scope {
    web::scope("/leave")
        // /leave
        .service(
            web::resource("")
                .route(web::get().to(leave_request::leave_list::<S>))
                .route(web::post().to(leave_request::create_leave::<S>)),
        )
        // /leave/stats
        .service(web::resource("/stats").route(web::get().to(leave_request::leave_stats::<S>)))
        // /leave/calendar?year=&month=
        .service(
            web::resource("/calendar").route(web::get().to(leave_request::leave_calendar::<S>)),
        )
        // /leave/me
        .service(web::resource("/me").route(web::get().to(leave_request::my_leave::<S>)))
        // /leave/{id}
        .service(web::resource("/{id}").route(web::get().to(leave_request::get_leave::<S>)))
        // /leave/{id}/approve
        .service(
            web::resource("/{id}/approve")
                .route(web::put().to(leave_request::approve_leave::<S>)),
        )
        // /leave/{id}/reject
        .service(
            web::resource("/{id}/reject").route(web::put().to(leave_request::reject_leave::<S>)),
        )
}

pub fn configure<S: LeaveStore + 'static>(
    cfg: &mut web::ServiceConfig,
    config: &Config,
    rate_limit: &RateLimit,
) {
    // Protected routes
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(from_fn(auth_middleware)) // authentication
            .wrap(Governor::new(rate_limit)) // rate limiting
            .service(leave_scope::<S>()),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limiter_accepts_any_rate() {
        assert!(build_limiter(0).is_ok());
        assert!(build_limiter(1000).is_ok());
        assert!(build_limiter(120_000).is_ok());
    }
}
