//! # Token Manager
//!
//! RS256 서명 JWT를 발급하고 검증합니다.
//!
//! 키 쌍은 생성 시점에 한 번 로딩되고 이후에는 읽기만 하므로,
//! `Arc<TokenManager>` 하나를 여러 요청에서 동시에 사용해도 안전합니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! let manager = TokenManager::new(public_key, private_key)?;
//!
//! let token = manager.generate(&identity)?;
//! let restored = manager.extract(&token)?;
//! assert_eq!(restored.id, identity.id);
//!
//! // 미들웨어가 서명을 검증한 뒤 저장한 토큰에서 ID만 꺼낼 때
//! let verified = manager.verify(&token)?;
//! let id = manager.locate(Some(&verified))?;
//! ```

use std::collections::HashSet;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rsa::pkcs1::{EncodeRsaPrivateKey, EncodeRsaPublicKey};
use rsa::{RsaPrivateKey, RsaPublicKey};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::domain::entities::identity::Identity;
use crate::domain::models::token::{TokenClaims, VerifiedToken, UUID_CLAIM};
use crate::services::token::TokenError;

const DEFAULT_KEY_ID: &str = "identity-auth-key-1";

/// JWT 발급/검증 서비스
pub struct TokenManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    key_id: String,
    /// `None`이면 `exp` 클레임을 넣지 않습니다.
    lifetime: Option<Duration>,
}

impl TokenManager {
    /// 키 쌍으로 TokenManager를 생성합니다.
    ///
    /// # Errors
    ///
    /// * `TokenError::KeyMaterialInvalid` - 공개키가 개인키와 짝이 아니거나 DER 인코딩 실패
    pub fn new(public_key: RsaPublicKey, private_key: RsaPrivateKey) -> Result<Self, TokenError> {
        if private_key.to_public_key() != public_key {
            return Err(TokenError::KeyMaterialInvalid(
                "public key does not match private key".to_string(),
            ));
        }

        let private_der = private_key
            .to_pkcs1_der()
            .map_err(|e| TokenError::KeyMaterialInvalid(e.to_string()))?;
        let public_der = public_key
            .to_pkcs1_der()
            .map_err(|e| TokenError::KeyMaterialInvalid(e.to_string()))?;

        Ok(Self {
            encoding_key: EncodingKey::from_rsa_der(private_der.as_bytes()),
            decoding_key: DecodingKey::from_rsa_der(public_der.as_bytes()),
            key_id: DEFAULT_KEY_ID.to_string(),
            lifetime: None,
        })
    }

    pub fn with_key_id(mut self, key_id: impl Into<String>) -> Self {
        self.key_id = key_id.into();
        self
    }

    /// 토큰 수명을 설정합니다. 설정하면 `exp` 클레임이 필수가 됩니다.
    pub fn with_lifetime(mut self, lifetime: Duration) -> Self {
        self.lifetime = Some(lifetime);
        self
    }

    /// Identity로부터 서명된 토큰을 생성합니다.
    ///
    /// 올바른 키 쌍으로 생성된 매니저에서는 실패하지 않습니다.
    ///
    /// # Errors
    ///
    /// * `TokenError::Signing` - 서명 라이브러리 오류
    pub fn generate(&self, identity: &Identity) -> Result<String, TokenError> {
        let now = Utc::now();

        let claims = TokenClaims {
            uuid: identity.id.to_string(),
            full_name: identity.full_name.clone(),
            image_url: identity.image_url.clone(),
            iat: now.timestamp(),
            exp: self.lifetime.map(|lifetime| (now + lifetime).timestamp()),
        };

        let mut header = Header::new(Algorithm::RS256);
        header.kid = Some(self.key_id.clone());

        encode(&header, &claims, &self.encoding_key).map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// 토큰을 검증하고 Identity를 복원합니다.
    ///
    /// 복원되는 필드는 `id`, `full_name`, `image_url`이며 `emails`는 비어 있습니다.
    ///
    /// # Errors
    ///
    /// * `TokenError::InvalidToken` - 서명 불일치(다른 키로 서명된 토큰 포함), 잘못된 구조,
    ///   만료, `uuid` 클레임 누락 또는 UUID가 아닌 값
    pub fn extract(&self, token: &str) -> Result<Identity, TokenError> {
        let claims = decode::<TokenClaims>(token, &self.decoding_key, &self.validation())
            .map_err(|e| TokenError::InvalidToken(e.to_string()))?
            .claims;

        let id = Uuid::parse_str(&claims.uuid)
            .map_err(|e| TokenError::InvalidToken(format!("uuid claim: {}", e)))?;

        Ok(Identity {
            id,
            full_name: claims.full_name,
            image_url: claims.image_url,
            emails: Vec::new(),
            external: None,
        })
    }

    /// 서명을 검증하고 클레임 집합을 반환합니다.
    ///
    /// 인증 미들웨어에서 사용하며, 결과는 [`locate`](Self::locate)에 전달됩니다.
    ///
    /// # Errors
    ///
    /// * `TokenError::InvalidToken` - 서명 불일치, 잘못된 구조, 만료
    pub fn verify(&self, token: &str) -> Result<VerifiedToken, TokenError> {
        decode::<Map<String, Value>>(token, &self.decoding_key, &self.validation())
            .map(|data| VerifiedToken::new(data.claims))
            .map_err(|e| TokenError::InvalidToken(e.to_string()))
    }

    /// 이미 검증된 토큰에서 Identity ID를 꺼냅니다.
    ///
    /// 서명을 다시 검증하지 않습니다. 검증은 업스트림 미들웨어의 책임입니다.
    ///
    /// # Errors
    ///
    /// * `TokenError::TokenNotFound` - 토큰이 없음
    /// * `TokenError::ClaimMissing` - `uuid` 클레임이 없음
    /// * `TokenError::ClaimMalformed` - `uuid`가 문자열이 아니거나 UUID 형식이 아님
    pub fn locate(&self, token: Option<&VerifiedToken>) -> Result<Uuid, TokenError> {
        let token = token.ok_or(TokenError::TokenNotFound)?;

        let value = token
            .claim(UUID_CLAIM)
            .ok_or(TokenError::ClaimMissing(UUID_CLAIM))?;

        let raw = value.as_str().ok_or_else(|| TokenError::ClaimMalformed {
            claim: UUID_CLAIM,
            reason: format!("expected a string, got {}", value),
        })?;

        Uuid::parse_str(raw).map_err(|e| TokenError::ClaimMalformed {
            claim: UUID_CLAIM,
            reason: e.to_string(),
        })
    }

    /// `Authorization` 헤더 값에서 Bearer 토큰을 추출합니다.
    pub fn extract_bearer_token<'a>(&self, auth_header: &'a str) -> Result<&'a str, TokenError> {
        let (scheme, token) = auth_header
            .trim()
            .split_once(' ')
            .ok_or_else(|| TokenError::InvalidToken("malformed authorization header".to_string()))?;

        if !scheme.eq_ignore_ascii_case("bearer") {
            return Err(TokenError::InvalidToken(format!(
                "unsupported authorization scheme '{}'",
                scheme
            )));
        }

        let token = token.trim();
        if token.is_empty() {
            return Err(TokenError::TokenNotFound);
        }

        Ok(token)
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.validate_aud = false;
        validation.validate_exp = true;
        validation.required_spec_claims = if self.lifetime.is_some() {
            HashSet::from(["exp".to_string()])
        } else {
            HashSet::new()
        };
        validation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthProvider;
    use crate::domain::entities::identity::Email;
    use crate::services::token::key_loader::test_keys::*;
    use crate::services::token::{parse_private_key, parse_public_key};
    use serde_json::json;

    fn create_manager() -> TokenManager {
        let public_key = parse_public_key(PUBLIC_KEY.as_bytes()).expect("Could not parse public key");
        let private_key = parse_private_key(PRIVATE_KEY.as_bytes()).expect("Could not parse private key");

        TokenManager::new(public_key, private_key).unwrap()
    }

    fn create_other_manager() -> TokenManager {
        let public_key = parse_public_key(OTHER_PUBLIC_KEY.as_bytes()).unwrap();
        let private_key = parse_private_key(OTHER_PRIVATE_KEY.as_bytes()).unwrap();

        TokenManager::new(public_key, private_key).unwrap()
    }

    fn sample_identity(full_name: &str) -> Identity {
        Identity::new_external(
            full_name.to_string(),
            "http://some.com/image".to_string(),
            vec![Email {
                address: "mr@test.com".to_string(),
                verified: true,
                primary: true,
            }],
            AuthProvider::GitHub,
            "1234".to_string(),
        )
    }

    fn sign_raw(claims: &Value) -> String {
        let key = EncodingKey::from_rsa_pem(PRIVATE_KEY.as_bytes()).unwrap();
        encode(&Header::new(Algorithm::RS256), claims, &key).unwrap()
    }

    #[test]
    fn test_generate_and_extract_round_trip() {
        let manager = create_manager();
        let identity = sample_identity("Mr Test Case");

        let token = manager.generate(&identity).unwrap();
        let extracted = manager.extract(&token).expect("Could not extract Identity from generated token");

        assert_eq!(extracted.id, identity.id);
        assert_eq!(extracted.full_name, "Mr Test Case");
        assert_eq!(extracted.image_url, "http://some.com/image");
        assert!(extracted.emails.is_empty());
    }

    #[test]
    fn test_generated_token_header() {
        let manager = create_manager().with_key_id("kid-under-test");
        let token = manager.generate(&sample_identity("Header Check")).unwrap();

        let header = jsonwebtoken::decode_header(&token).unwrap();
        assert_eq!(header.alg, Algorithm::RS256);
        assert_eq!(header.kid.as_deref(), Some("kid-under-test"));
    }

    #[test]
    fn test_extract_rejects_token_from_other_key_pair() {
        let token = create_other_manager().generate(&sample_identity("Mallory")).unwrap();

        let err = create_manager().extract(&token).unwrap_err();
        assert!(matches!(err, TokenError::InvalidToken(_)));
    }

    #[test]
    fn test_extract_rejects_garbage() {
        let manager = create_manager();

        for token in ["", "not-a-token", "a.b.c", "eyJhbGciOiJSUzI1NiJ9.e30."] {
            let err = manager.extract(token).unwrap_err();
            assert!(matches!(err, TokenError::InvalidToken(_)), "accepted {:?}", token);
        }
    }

    #[test]
    fn test_extract_rejects_spliced_payload() {
        let manager = create_manager();
        let honest = manager.generate(&sample_identity("Alice")).unwrap();
        let other = manager.generate(&sample_identity("Eve")).unwrap();

        let honest_parts: Vec<&str> = honest.split('.').collect();
        let other_parts: Vec<&str> = other.split('.').collect();
        let forged = format!("{}.{}.{}", honest_parts[0], other_parts[1], honest_parts[2]);

        assert!(matches!(manager.extract(&forged), Err(TokenError::InvalidToken(_))));
    }

    #[test]
    fn test_extract_rejects_missing_or_malformed_uuid() {
        let manager = create_manager();

        let missing = sign_raw(&json!({ "fullName": "No Id", "iat": 0 }));
        assert!(matches!(manager.extract(&missing), Err(TokenError::InvalidToken(_))));

        let malformed = sign_raw(&json!({ "uuid": "131", "fullName": "Bad Id", "iat": 0 }));
        assert!(matches!(manager.extract(&malformed), Err(TokenError::InvalidToken(_))));
    }

    #[test]
    fn test_lifetime_adds_and_enforces_exp() {
        let manager = create_manager().with_lifetime(Duration::hours(1));
        let identity = sample_identity("Expiring");

        let token = manager.generate(&identity).unwrap();
        let verified = manager.verify(&token).unwrap();
        assert!(verified.claim("exp").is_some());

        let expired = sign_raw(&json!({
            "uuid": identity.id.to_string(),
            "fullName": "Expiring",
            "iat": Utc::now().timestamp() - 7200,
            "exp": Utc::now().timestamp() - 3600,
        }));
        assert!(matches!(manager.extract(&expired), Err(TokenError::InvalidToken(_))));

        let no_exp = sign_raw(&json!({ "uuid": identity.id.to_string(), "iat": 0 }));
        assert!(matches!(manager.extract(&no_exp), Err(TokenError::InvalidToken(_))));
    }

    #[test]
    fn test_new_rejects_mismatched_key_pair() {
        let public_key = parse_public_key(OTHER_PUBLIC_KEY.as_bytes()).unwrap();
        let private_key = parse_private_key(PRIVATE_KEY.as_bytes()).unwrap();

        let result = TokenManager::new(public_key, private_key);
        assert!(matches!(result, Err(TokenError::KeyMaterialInvalid(_))));
    }

    #[test]
    fn test_locate_token_in_context() {
        let manager = create_manager();
        let id = Uuid::new_v4();

        let verified = manager.verify(&manager.generate(&Identity {
            id,
            full_name: "Located".to_string(),
            image_url: String::new(),
            emails: Vec::new(),
            external: None,
        }).unwrap()).unwrap();

        assert_eq!(manager.locate(Some(&verified)).unwrap(), id);
    }

    #[test]
    fn test_locate_missing_token() {
        let manager = create_manager();
        assert_eq!(manager.locate(None), Err(TokenError::TokenNotFound));
    }

    #[test]
    fn test_locate_missing_uuid_claim() {
        let manager = create_manager();
        let verified = VerifiedToken::default();

        assert_eq!(manager.locate(Some(&verified)), Err(TokenError::ClaimMissing(UUID_CLAIM)));
    }

    #[test]
    fn test_locate_invalid_uuid_claim() {
        let manager = create_manager();

        let mut claims = Map::new();
        claims.insert(UUID_CLAIM.to_string(), json!("131"));
        let result = manager.locate(Some(&VerifiedToken::new(claims)));
        assert!(matches!(result, Err(TokenError::ClaimMalformed { claim: "uuid", .. })));

        let mut claims = Map::new();
        claims.insert(UUID_CLAIM.to_string(), json!(131));
        let result = manager.locate(Some(&VerifiedToken::new(claims)));
        assert!(matches!(result, Err(TokenError::ClaimMalformed { .. })));
    }

    #[test]
    fn test_extract_bearer_token() {
        let manager = create_manager();

        assert_eq!(manager.extract_bearer_token("Bearer abc.def.ghi").unwrap(), "abc.def.ghi");
        assert_eq!(manager.extract_bearer_token("bearer  abc").unwrap(), "abc");
        assert!(manager.extract_bearer_token("Basic dXNlcjpwYXNz").is_err());
        assert!(manager.extract_bearer_token("abc").is_err());
        assert_eq!(manager.extract_bearer_token("Bearer  "), Err(TokenError::InvalidToken("malformed authorization header".to_string())));
    }
}
