//! Wallet key generation and address derivation
//!
//! Keys are ed25519; the printable private key is `ed25519:` followed by the
//! base58 encoding of the 64-byte secret+public concatenation, and the
//! wallet address is the implicit account form: lowercase hex of the 32-byte
//! public key. Transaction signing itself happens in the settlement
//! collaborator; this module only creates and identifies keys.

use ed25519_dalek::SigningKey;
use rand::rngs::OsRng;

use intents_types::{Error, Result};

const KEY_PREFIX: &str = "ed25519:";

/// A freshly generated wallet key pair.
pub struct GeneratedWallet {
	pub private_key: String,
	pub wallet_address: String,
}

/// Generate a new random ed25519 key pair.
pub fn generate_wallet() -> GeneratedWallet {
	let signing = SigningKey::generate(&mut OsRng);
	let verifying = signing.verifying_key();

	let mut keypair_bytes = Vec::with_capacity(64);
	keypair_bytes.extend_from_slice(&signing.to_bytes());
	keypair_bytes.extend_from_slice(&verifying.to_bytes());

	GeneratedWallet {
		private_key: format!("{}{}", KEY_PREFIX, bs58::encode(keypair_bytes).into_string()),
		wallet_address: hex::encode(verifying.to_bytes()),
	}
}

/// Reconstruct the signing key from a printable private key.
///
/// Accepts both the 64-byte secret+public form and a bare 32-byte secret.
pub fn signing_key_from_private_key(private_key: &str) -> Result<SigningKey> {
	let encoded = private_key.strip_prefix(KEY_PREFIX).ok_or_else(|| {
		Error::InvalidConfigValue {
			key: "private-key".to_string(),
			reason: "missing ed25519: prefix".to_string(),
		}
	})?;

	let bytes = bs58::decode(encoded)
		.into_vec()
		.map_err(|e| Error::InvalidConfigValue {
			key: "private-key".to_string(),
			reason: format!("invalid base58: {}", e),
		})?;

	let mut secret = [0u8; 32];
	match bytes.len() {
		64 | 32 => secret.copy_from_slice(&bytes[..32]),
		other => {
			return Err(Error::InvalidConfigValue {
				key: "private-key".to_string(),
				reason: format!("expected 32 or 64 key bytes, got {}", other),
			})
		},
	}

	Ok(SigningKey::from_bytes(&secret))
}

/// Derive the implicit wallet address from a printable private key.
pub fn address_from_private_key(private_key: &str) -> Result<String> {
	let signing = signing_key_from_private_key(private_key)?;
	Ok(hex::encode(signing.verifying_key().to_bytes()))
}

/// The curve prefix of a printable private key, for masked display.
pub fn key_prefix(private_key: &str) -> &str {
	private_key.split(':').next().unwrap_or("")
}
