//! Secure string type for the signing key.
//!
//! The pipeline treats key material as opaque: it is held behind
//! [`SecretString`], which zeroes its memory on drop and redacts itself
//! in Debug, Display and serialized output, so a stray log line or config
//! dump can never leak the key.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use zeroize::Zeroizing;

/// A string whose contents are zeroed on drop and never printed.
///
/// Used for the wallet's private signing key; access goes through
/// [`SecretString::with_exposed`] so the exposure scope stays narrow.
#[derive(Clone)]
pub struct SecretString(Zeroizing<String>);

impl SecretString {
	/// Wraps an owned string as secret material.
	pub fn new(s: String) -> Self {
		Self(Zeroizing::new(s))
	}

	/// Exposes the secret to a closure and returns its result.
	///
	/// Callers must not let the exposed value escape the closure into
	/// logs or long-lived storage.
	pub fn with_exposed<F, R>(&self, f: F) -> R
	where
		F: FnOnce(&str) -> R,
	{
		f(&self.0)
	}
}

impl fmt::Debug for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "SecretString(***REDACTED***)")
	}
}

impl fmt::Display for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "***REDACTED***")
	}
}

impl From<String> for SecretString {
	fn from(s: String) -> Self {
		Self::new(s)
	}
}

impl From<&str> for SecretString {
	fn from(s: &str) -> Self {
		Self::new(s.to_string())
	}
}

// Serialization always redacts; secrets flow into the process, never out.
impl Serialize for SecretString {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str("***REDACTED***")
	}
}

impl<'de> Deserialize<'de> for SecretString {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let s = String::deserialize(deserializer)?;
		Ok(SecretString::new(s))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_debug_and_display_redact() {
		let secret = SecretString::from("0xdeadbeef");
		assert_eq!(format!("{:?}", secret), "SecretString(***REDACTED***)");
		assert_eq!(format!("{}", secret), "***REDACTED***");
	}

	#[test]
	fn test_serialization_redacts() {
		#[derive(serde::Serialize)]
		struct Wrapper {
			private_key: SecretString,
		}
		let out = toml::to_string(&Wrapper {
			private_key: SecretString::from("0xdeadbeef"),
		})
		.unwrap();
		assert!(out.contains("REDACTED"));
		assert!(!out.contains("deadbeef"));
	}

	#[test]
	fn test_with_exposed_sees_the_value() {
		let secret = SecretString::from("0xdeadbeef");
		let len = secret.with_exposed(|s| {
			assert_eq!(s, "0xdeadbeef");
			s.len()
		});
		assert_eq!(len, 10);
	}
}
