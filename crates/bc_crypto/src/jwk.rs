//! Canonical exported public-key record (JWK-style).
//!
//! This is the only shape in which public keys cross a trust boundary:
//! registration uploads one, lookup resolves one, and sealing imports
//! one. Field types parse rather than validate — `kty`, `alg` and `use`
//! are single-variant enums, so any unrecognized value fails to
//! deserialize and the record never exists in memory. That gives
//! client-side rejection independent of whatever the server checks.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::{Deserialize, Serialize};

use crate::error::CryptoError;
use crate::provider::ExportedJwk;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKeyRecord {
    /// Key type — must be "RSA".
    pub kty: KeyType,

    /// Modulus, base64url without padding.
    pub n: Modulus,

    /// Public exponent — must encode 65537.
    pub e: PublicExponent,

    /// Algorithm — must be "RSA-OAEP-256".
    pub alg: Algorithm,

    /// Key use — must be "enc". Absent on the wire means "enc".
    #[serde(default, rename = "use")]
    pub key_use: KeyUse,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyType {
    #[serde(rename = "RSA")]
    #[default]
    Rsa,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Algorithm {
    #[serde(rename = "RSA-OAEP-256")]
    #[default]
    RsaOaep256,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyUse {
    #[serde(rename = "enc")]
    #[default]
    Enc,
}

const PUBLIC_EXPONENT: u32 = 65537;
const PUBLIC_EXPONENT_B64: &str = "AQAB";
// Some exporters emit the exponent zero-padded to four bytes.
const PUBLIC_EXPONENT_B64_PADDED: &str = "AQABAA==";

/// The standard RSA public exponent, 65537.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PublicExponent;

impl PublicExponent {
    pub fn parse(s: &str) -> Result<Self, String> {
        if s == PUBLIC_EXPONENT_B64 || s == PUBLIC_EXPONENT_B64_PADDED {
            Ok(Self)
        } else {
            Err(format!("public exponent must be {PUBLIC_EXPONENT}"))
        }
    }
}

impl Serialize for PublicExponent {
    fn serialize<S: serde::ser::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        PUBLIC_EXPONENT_B64.serialize(s)
    }
}

impl<'de> Deserialize<'de> for PublicExponent {
    fn deserialize<D: serde::de::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let e = String::deserialize(d)?;
        Self::parse(&e).map_err(serde::de::Error::custom)
    }
}

/// RSA modulus, kept in its base64url (no padding) wire form. Decoding
/// to bytes happens inside the provider on import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Modulus(String);

impl Modulus {
    pub fn parse(s: String) -> Result<Self, String> {
        if s.is_empty() {
            return Err("modulus is missing".into());
        }
        URL_SAFE_NO_PAD
            .decode(&s)
            .map_err(|e| format!("modulus is not base64url: {e}"))?;
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Modulus {
    type Error = String;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Modulus> for String {
    fn from(value: Modulus) -> Self {
        value.0
    }
}

impl std::fmt::Display for Modulus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl PublicKeyRecord {
    /// Validate a raw provider export into the canonical record.
    ///
    /// Every check failure is fatal; the single permitted correction is
    /// defaulting an absent `use` to `"enc"`.
    pub fn from_export(export: ExportedJwk) -> Result<Self, CryptoError> {
        let kty = match export.kty.as_str() {
            "RSA" => KeyType::Rsa,
            other => return Err(malformed(format!("unsupported key type `{other}`"))),
        };
        let alg = match export.alg.as_str() {
            "RSA-OAEP-256" => Algorithm::RsaOaep256,
            other => return Err(malformed(format!("unsupported algorithm `{other}`"))),
        };
        let e = PublicExponent::parse(&export.e).map_err(CryptoError::MalformedKeyRecord)?;
        let n = Modulus::parse(export.n).map_err(CryptoError::MalformedKeyRecord)?;
        let key_use = match export.key_use.as_deref() {
            None | Some("enc") => KeyUse::Enc,
            Some(other) => return Err(malformed(format!("unsupported key use `{other}`"))),
        };
        Ok(Self { kty, n, e, alg, key_use })
    }
}

fn malformed(msg: String) -> CryptoError {
    CryptoError::MalformedKeyRecord(msg)
}
