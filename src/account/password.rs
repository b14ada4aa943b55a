use std::fmt::{Debug, Formatter};

use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

const SALT_LENGTH: usize = 16;

/// Salted SHA-256 of a password. Both parts are stored hex encoded.
#[derive(Clone, Deserialize, Serialize)]
pub struct PasswordHash {
    salt: String,
    hash: String,
}

impl PasswordHash {
    pub fn new(password: &str) -> PasswordHash {
        let mut salt = [0u8; SALT_LENGTH];
        rand::thread_rng().fill_bytes(&mut salt);

        PasswordHash {
            salt: hex::encode(salt),
            hash: hex::encode(digest(&salt, password)),
        }
    }

    pub fn verify(&self, password: &str) -> bool {
        let (salt, expected) = match (hex::decode(&self.salt), hex::decode(&self.hash)) {
            (Ok(salt), Ok(expected)) => (salt, expected),
            _ => return false,
        };

        constant_time_eq(&digest(&salt, password), &expected)
    }
}

impl Debug for PasswordHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        f.write_str("PasswordHash(..)")
    }
}

fn digest(salt: &[u8], password: &str) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hasher.finalize().to_vec()
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
