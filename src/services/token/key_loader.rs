//! RSA 키 로더
//!
//! PEM 형식의 RSA 키 쌍을 파싱하고, 설정된 경로에서 키 파일을 로딩합니다.
//!
//! # 지원 형식
//!
//! - 개인키: PKCS#1 (`BEGIN RSA PRIVATE KEY`), PKCS#8 (`BEGIN PRIVATE KEY`)
//! - 공개키: SPKI (`BEGIN PUBLIC KEY`), PKCS#1 (`BEGIN RSA PUBLIC KEY`)
//!
//! # RSA 키 생성
//!
//! ```bash
//! openssl genrsa -traditional -out jwt_private_key.pem 2048
//! openssl rsa -in jwt_private_key.pem -pubout -out jwt_public_key.pem
//! ```
//!
//! 키 파싱 실패는 요청 단위 오류가 아니라 시작 시점의 치명적 오류입니다.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey, EncodeRsaPrivateKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePublicKey};
use rsa::{RsaPrivateKey, RsaPublicKey};

use crate::config::{Environment, TokenKeyConfig};
use crate::services::token::TokenError;

/// PEM 바이트에서 RSA 개인키를 파싱합니다.
///
/// PKCS#1을 먼저 시도하고, 실패하면 PKCS#8로 다시 시도합니다.
///
/// # Errors
///
/// * `TokenError::KeyMaterialInvalid` - UTF-8이 아니거나 두 형식 모두 파싱 실패
pub fn parse_private_key(pem: &[u8]) -> Result<RsaPrivateKey, TokenError> {
    let pem = pem_str(pem)?;

    RsaPrivateKey::from_pkcs1_pem(pem)
        .or_else(|_| RsaPrivateKey::from_pkcs8_pem(pem))
        .map_err(|e| TokenError::KeyMaterialInvalid(format!("private key: {}", e)))
}

/// PEM 바이트에서 RSA 공개키를 파싱합니다.
///
/// SPKI(`PUBLIC KEY`)를 먼저 시도하고, 실패하면 PKCS#1로 다시 시도합니다.
///
/// # Errors
///
/// * `TokenError::KeyMaterialInvalid` - UTF-8이 아니거나 두 형식 모두 파싱 실패
pub fn parse_public_key(pem: &[u8]) -> Result<RsaPublicKey, TokenError> {
    let pem = pem_str(pem)?;

    RsaPublicKey::from_public_key_pem(pem)
        .or_else(|_| RsaPublicKey::from_pkcs1_pem(pem))
        .map_err(|e| TokenError::KeyMaterialInvalid(format!("public key: {}", e)))
}

fn pem_str(pem: &[u8]) -> Result<&str, TokenError> {
    let pem = std::str::from_utf8(pem)
        .map_err(|e| TokenError::KeyMaterialInvalid(format!("PEM is not UTF-8: {}", e)))?;
    Ok(pem.trim())
}

/// 설정된 경로에서 키 쌍을 로딩합니다.
///
/// 키 파일이 없고 개발 환경이면 새 2048비트 키 쌍을 생성하여 저장합니다.
/// 그 외 환경에서 키 파일이 없으면 에러를 반환합니다.
///
/// # Returns
///
/// * `(RsaPublicKey, RsaPrivateKey)` - 로딩된 키 쌍
///
/// # Errors
///
/// * `TokenError::KeyMaterialInvalid` - 파일 읽기/쓰기 실패, PEM 파싱 실패
pub fn load_key_pair(
    config: &TokenKeyConfig,
    environment: &Environment,
) -> Result<(RsaPublicKey, RsaPrivateKey), TokenError> {
    let private_path = Path::new(&config.private_key_path);
    let public_path = Path::new(&config.public_key_path);

    if !private_path.exists() || !public_path.exists() {
        if *environment != Environment::Development {
            return Err(TokenError::KeyMaterialInvalid(format!(
                "key files not found: '{}', '{}'",
                config.private_key_path, config.public_key_path
            )));
        }

        log::info!("🔑 JWT keys not found. Generating new RSA key pair...");
        generate_rsa_keys(private_path, public_path)?;
        log::info!("✅ JWT RSA keys generated successfully");
    } else {
        log::info!("🔑 Loading existing JWT RSA keys");
    }

    let private_pem = std::fs::read(private_path).map_err(|e| {
        TokenError::KeyMaterialInvalid(format!(
            "failed to read private key file '{}': {}",
            private_path.display(),
            e
        ))
    })?;
    let public_pem = std::fs::read(public_path).map_err(|e| {
        TokenError::KeyMaterialInvalid(format!(
            "failed to read public key file '{}': {}",
            public_path.display(),
            e
        ))
    })?;

    Ok((parse_public_key(&public_pem)?, parse_private_key(&private_pem)?))
}

/// RSA 키 쌍을 생성하여 PEM 파일로 저장합니다.
fn generate_rsa_keys(private_path: &Path, public_path: &Path) -> Result<(), TokenError> {
    let io_err = |e: std::io::Error| TokenError::KeyMaterialInvalid(e.to_string());

    for path in [private_path, public_path] {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
    }

    let private_key = RsaPrivateKey::new(&mut rsa::rand_core::OsRng, 2048)
        .map_err(|e| TokenError::KeyMaterialInvalid(e.to_string()))?;
    let public_key = private_key.to_public_key();

    // 개인키: PKCS#1, 공개키: SPKI
    let private_pem = private_key
        .to_pkcs1_pem(rsa::pkcs1::LineEnding::LF)
        .map_err(|e| TokenError::KeyMaterialInvalid(e.to_string()))?;
    write_key_file(private_path, &private_pem, 0o600).map_err(io_err)?;

    let public_pem = public_key
        .to_public_key_pem(rsa::pkcs8::LineEnding::LF)
        .map_err(|e| TokenError::KeyMaterialInvalid(e.to_string()))?;
    write_key_file(public_path, &public_pem, 0o644).map_err(io_err)?;

    log::info!("📁 Private key saved: {}", private_path.display());
    log::info!("📁 Public key saved: {}", public_path.display());

    Ok(())
}

/// 권한을 먼저 적용한 뒤 PEM 내용을 기록합니다.
///
/// 새 파일은 `mode`로 생성되고, 이미 있던 파일은 쓰기 전에 권한이 조정됩니다.
fn write_key_file(path: &Path, pem: &str, mode: u32) -> std::io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

        options.mode(mode);
        let file = options.open(path)?;
        file.set_permissions(std::fs::Permissions::from_mode(mode))?;
        flush_pem(file, pem)
    }

    #[cfg(not(unix))]
    {
        let _ = mode;
        flush_pem(options.open(path)?, pem)
    }
}

fn flush_pem(mut file: std::fs::File, pem: &str) -> std::io::Result<()> {
    file.write_all(pem.as_bytes())?;
    file.sync_all()
}
