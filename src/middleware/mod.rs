pub mod jwt_middleware;
pub mod rate_limiter;
