//! Signed session cookie values.
//!
//! The browser only ever holds `<session-id>.<hex hmac-sha256(session-id)>`.
//! All session content stays server-side.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::domain::foundation::SessionId;

/// Signs and verifies session cookie values.
#[derive(Clone)]
pub struct SessionCookieSigner {
    key: SecretString,
}

impl SessionCookieSigner {
    /// Creates a signer keyed by the application secret.
    pub fn new(key: SecretString) -> Self {
        Self { key }
    }

    /// Produces the cookie value for a session id.
    pub fn sign(&self, id: &SessionId) -> String {
        let id = id.to_string();
        let signature = hex::encode(self.compute_signature(&id));
        format!("{}.{}", id, signature)
    }

    /// Returns the session id of a correctly signed cookie value.
    ///
    /// Malformed values and bad signatures yield `None`.
    pub fn verify(&self, value: &str) -> Option<SessionId> {
        let (id, signature) = value.split_once('.')?;
        let provided = hex::decode(signature).ok()?;
        let expected = self.compute_signature(id);

        if !constant_time_compare(&expected, &provided) {
            return None;
        }

        id.parse().ok()
    }

    fn compute_signature(&self, payload: &str) -> Vec<u8> {
        let mut mac = Hmac::<Sha256>::new_from_slice(self.key.expose_secret().as_bytes())
            .expect("HMAC accepts any key");
        mac.update(payload.as_bytes());
        mac.finalize().into_bytes().to_vec()
    }
}

impl std::fmt::Debug for SessionCookieSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionCookieSigner").finish_non_exhaustive()
    }
}

fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
