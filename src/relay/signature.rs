//! Signature verification (§4.5): all signed messages carry `publicKey`
//! and `signature`; the signature covers the canonical JSON of the
//! message with those two fields removed and keys sorted.

use ecdsa::signature::Verifier;
use p256::ecdsa::{Signature, VerifyingKey};
use serde_json::Value;

use crate::error::{Error, InternalCause, Result};

/// Recompute the canonical signing input for `message` (a JSON object)
/// by dropping `signature`/`publicKey` and re-serializing. `serde_json`'s
/// default `Map` is a `BTreeMap`, so key order is already the sorted
/// order the signer used.
fn canonical_signing_input(message: &Value) -> Result<Vec<u8>> {
    let mut object = message
        .as_object()
        .cloned()
        .ok_or_else(|| Error::SignatureInvalid)?;
    object.remove("signature");
    object.remove("publicKey");
    serde_json::to_vec(&object).map_err(Into::into)
}

/// Verify that `signature_hex`/`public_key_hex` (both hex-encoded) sign
/// the canonical form of `message`. Returns `Ok(())` on success,
/// [`Error::SignatureInvalid`] on any malformed or mismatched input.
pub fn verify_signature(message: &Value, public_key_hex: &str, signature_hex: &str) -> Result<()> {
    let public_key_bytes = hex::decode(public_key_hex).map_err(|_| Error::SignatureInvalid)?;
    let signature_bytes = hex::decode(signature_hex).map_err(|_| Error::SignatureInvalid)?;

    let verifying_key = VerifyingKey::from_sec1_bytes(&public_key_bytes)
        .map_err(|e| Error::Internal(InternalCause::Signature(e)))?;
    let signature = Signature::from_der(&signature_bytes)
        .or_else(|_| Signature::from_slice(&signature_bytes))
        .map_err(|e| Error::Internal(InternalCause::Signature(e)))?;

    let signing_input = canonical_signing_input(message)?;

    verifying_key
        .verify(&signing_input, &signature)
        .map_err(|_| Error::SignatureInvalid)
}
