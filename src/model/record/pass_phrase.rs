use std::fmt::{Debug, Formatter};

use argon2::Config;
use rand::Rng;

use crate::error::Result;

/// An election pass-phrase, as held by the store. The plaintext is never
/// kept; only the encoded argon2 hash.
#[derive(Clone, PartialEq, Eq)]
pub struct PassPhrase {
    hash: String,
}

impl PassPhrase {
    /// Hash the given plaintext pass-phrase with a fresh random salt.
    ///
    /// This is slow; on an async runtime, run it on a blocking thread.
    pub fn hash(plain: &str) -> Result<Self> {
        // 16 bytes is recommended for password hashing:
        //  https://en.wikipedia.org/wiki/Argon2
        let mut salt = [0_u8; 16];
        rand::thread_rng().fill(&mut salt);
        let hash = argon2::hash_encoded(plain.as_bytes(), &salt, &Config::default())?;
        Ok(Self { hash })
    }

    /// Check whether the given plaintext matches.
    pub fn verify(&self, plain: &str) -> Result<bool> {
        Ok(argon2::verify_encoded(&self.hash, plain.as_bytes())?)
    }
}

impl Debug for PassPhrase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("PassPhrase(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_matches_only_the_original() {
        let phrase = PassPhrase::hash("p").unwrap();
        assert!(phrase.verify("p").unwrap());
        assert!(!phrase.verify("wrong").unwrap());
        assert!(!phrase.verify("P").unwrap());
        assert!(!phrase.verify("").unwrap());
    }

    #[test]
    fn salts_differ() {
        let a = PassPhrase::hash("p").unwrap();
        let b = PassPhrase::hash("p").unwrap();
        assert_ne!(a, b);
        assert_eq!(format!("{a:?}"), "PassPhrase(<redacted>)");
    }
}
