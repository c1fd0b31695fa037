use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use uuid::Uuid;

use crate::config::Config;
use crate::models::auth_model::Claims;

pub struct JwtUtils;

impl JwtUtils {
    /// Mint an access token for an admin. Returns the token together with
    /// its expiry timestamp so callers can echo it to the client.
    pub fn generate_token(
        cfg: &Config,
        admin_id: Uuid,
        username: &str,
    ) -> Result<(String, usize), jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let expire = now + Duration::minutes(cfg.jwt_expires_in);
        let claims = Claims {
            sub: admin_id,
            username: username.to_string(),
            exp: expire.timestamp() as usize,
            iat: now.timestamp() as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(cfg.jwt_secret.as_bytes()),
        )?;
        Ok((token, claims.exp))
    }

    pub fn validate_token(
        cfg: &Config,
        token: &str,
    ) -> Result<TokenData<Claims>, jsonwebtoken::errors::Error> {
        let decoding_key = DecodingKey::from_secret(cfg.jwt_secret.as_bytes());
        let mut validation = Validation::default();
        validation.validate_exp = true;
        decode::<Claims>(token, &decoding_key, &validation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::errors::ErrorKind;

    fn test_config(expires_in: i64) -> Config {
        Config {
            server_host: "127.0.0.1".to_string(),
            server_port: 0,
            database_url: String::new(),
            jwt_secret: "test-secret".to_string(),
            jwt_expires_in: expires_in,
            s3_endpoint: String::new(),
            s3_region: String::new(),
            s3_access_key: String::new(),
            s3_secret_key: String::new(),
            s3_bucket_name: String::new(),
            site_base_url: "https://news.example".to_string(),
        }
    }

    #[test]
    fn token_round_trip_preserves_claims() {
        let cfg = test_config(15);
        let admin_id = Uuid::from_u128(42);
        let (token, exp) = JwtUtils::generate_token(&cfg, admin_id, "editor").unwrap();

        let data = JwtUtils::validate_token(&cfg, &token).unwrap();
        assert_eq!(data.claims.sub, admin_id);
        assert_eq!(data.claims.username, "editor");
        assert_eq!(data.claims.exp, exp);
    }

    #[test]
    fn expired_token_is_rejected() {
        let cfg = test_config(-10);
        let (token, _) = JwtUtils::generate_token(&cfg, Uuid::from_u128(1), "editor").unwrap();
        let err = JwtUtils::validate_token(&cfg, &token).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::ExpiredSignature));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let cfg = test_config(15);
        let mut other = test_config(15);
        other.jwt_secret = "different".to_string();
        let (token, _) = JwtUtils::generate_token(&other, Uuid::from_u128(1), "editor").unwrap();
        assert!(JwtUtils::validate_token(&cfg, &token).is_err());
    }
}
