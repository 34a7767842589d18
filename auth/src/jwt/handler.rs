use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;

/// Issues and verifies identity assertions.
///
/// Both keys are derived from one secret at construction; the handler never
/// sees the secret again. Uses HS256 (HMAC with SHA-256).
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    header: Header,
    validation: Validation,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Load it from configuration at startup, never from code
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // `exp` is optional; when present it is checked to the second
        validation.required_spec_claims.clear();
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            header: Header::new(Algorithm::HS256),
            validation,
        }
    }

    /// Sign claims into a compact JWT.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        encode(&self.header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify a token's signature and expiry and return its claims.
    ///
    /// # Errors
    /// * `TokenExpired` - `exp` lies in the past
    /// * `InvalidToken` - Bad signature, wrong algorithm or malformed token
    pub fn decode(&self, token: &str) -> Result<Claims, JwtError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                _ => JwtError::InvalidToken(e.to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    const SECRET: &[u8] = b"my_secret_key_at_least_32_bytes_long!";

    #[test]
    fn test_encode_and_decode() {
        let handler = JwtHandler::new(SECRET);
        let claims = Claims::for_user("user123", Some(1));

        let token = handler.encode(&claims).expect("Failed to encode token");
        assert!(!token.is_empty());

        let decoded = handler.decode(&token).expect("Failed to decode token");
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_decode_is_repeatable() {
        let handler = JwtHandler::new(SECRET);
        let token = handler.encode(&Claims::new("user123")).unwrap();

        let first = handler.decode(&token).unwrap();
        let second = handler.decode(&token).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_decode_invalid_token() {
        let handler = JwtHandler::new(SECRET);

        let result = handler.decode("invalid.token.here");
        assert!(matches!(result, Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn test_decode_with_wrong_secret() {
        let handler1 = JwtHandler::new(b"secret1_at_least_32_bytes_long_key!");
        let handler2 = JwtHandler::new(b"secret2_at_least_32_bytes_long_key!");

        let token = handler1.encode(&Claims::new("user123")).unwrap();

        let result = handler2.decode(&token);
        assert!(matches!(result, Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn test_decode_tampered_signature() {
        let handler = JwtHandler::new(SECRET);
        let token = handler.encode(&Claims::new("user123")).unwrap();

        let mut tampered = token.into_bytes();
        let last = tampered.len() - 2;
        tampered[last] = if tampered[last] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(tampered).unwrap();

        assert!(handler.decode(&tampered).is_err());
    }

    #[test]
    fn test_decode_expired_token() {
        let handler = JwtHandler::new(SECRET);
        let issued = Utc::now().timestamp() - 7200;
        let claims = Claims::new("user123")
            .with_issued_at(issued)
            .with_expiration(issued + 3600);

        let token = handler.encode(&claims).unwrap();

        assert_eq!(handler.decode(&token), Err(JwtError::TokenExpired));
    }

    #[test]
    fn test_decode_just_expired_token() {
        let handler = JwtHandler::new(SECRET);
        let now = Utc::now().timestamp();
        let claims = Claims::new("user123")
            .with_issued_at(now - 100)
            .with_expiration(now - 5);

        let token = handler.encode(&claims).unwrap();

        assert_eq!(handler.decode(&token), Err(JwtError::TokenExpired));
    }

    #[test]
    fn test_decode_unexpired_token() {
        let handler = JwtHandler::new(SECRET);
        let now = Utc::now().timestamp();
        let claims = Claims::new("user123")
            .with_issued_at(now)
            .with_expiration(now + 30);

        let token = handler.encode(&claims).unwrap();

        assert_eq!(handler.decode(&token), Ok(claims));
    }

    #[test]
    fn test_decode_without_exp_is_accepted() {
        let handler = JwtHandler::new(SECRET);
        let claims = Claims::new("user123");

        let token = handler.encode(&claims).unwrap();
        let decoded = handler.decode(&token).unwrap();

        assert!(decoded.exp.is_none());
    }
}
