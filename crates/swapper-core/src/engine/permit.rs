//! Permit construction and the mandatory sign-then-verify stage.
//!
//! [`build_permit`] is pure: it performs no I/O and maps the same inputs
//! to the same permit (modulo the clock read for the deadlines). Signing
//! happens once per permit, and verification is not optional — the
//! signer stage recovers the address from the fresh signature without
//! touching the key and refuses to hand out a [`SignedPermit`] unless it
//! matches the configured owner. Since [`SignedPermit`] has private
//! fields and this module is its only producer, later stages requiring
//! one cannot be reached with an unverified signature.

use alloy_primitives::{Address, PrimitiveSignature as Signature, U256};
use swapper_account::{recover_signer, AccountService};
use swapper_types::{
	current_timestamp, Config, Permit, PermitDetails, PermitKind, PermitSingle,
	PermitTransferFrom, Token, TokenPermissions,
};

use crate::SwapError;

/// Builds the typed authorization for one swap attempt.
///
/// Both the expiration and the signature deadline are `now + expiry_secs`
/// (the same horizon), so with a non-zero `expiry_secs` both are strictly
/// future at construction. The `amount` must be the exact integer later
/// passed to the route resolver; the engine guarantees this by reading
/// both from the same request field.
pub fn build_permit(
	kind: PermitKind,
	token: &Token,
	amount: U256,
	spender: Address,
	nonce: u64,
	expiry_secs: u64,
) -> Result<Permit, SwapError> {
	if expiry_secs == 0 {
		return Err(SwapError::InvalidRequest(
			"permit expiry horizon must be positive".into(),
		));
	}
	let deadline = current_timestamp() + expiry_secs;

	Ok(match kind {
		PermitKind::Allowance => Permit::Allowance(PermitSingle {
			details: PermitDetails {
				token: token.address,
				amount,
				expiration: deadline,
				nonce,
			},
			spender,
			sig_deadline: deadline,
		}),
		PermitKind::Signature => Permit::Signature(PermitTransferFrom {
			permitted: TokenPermissions {
				token: token.address,
				amount,
			},
			spender,
			nonce,
			deadline,
		}),
	})
}

/// A permit together with a signature that has been verified to recover
/// to the configured owner.
///
/// Only [`PermitSigner::sign`] can construct one; holding a
/// `SignedPermit` is proof the verification stage ran.
pub struct SignedPermit {
	permit: Permit,
	signature: Signature,
}

impl SignedPermit {
	/// The verified permit.
	pub fn permit(&self) -> &Permit {
		&self.permit
	}

	/// The signature over the permit's EIP-712 digest.
	pub fn signature(&self) -> &Signature {
		&self.signature
	}
}

/// Signs permits and verifies the resulting signatures by recovery.
pub struct PermitSigner<'a> {
	config: &'a Config,
	account: &'a AccountService,
}

impl<'a> PermitSigner<'a> {
	pub fn new(config: &'a Config, account: &'a AccountService) -> Self {
		Self { config, account }
	}

	/// Signs the permit's EIP-712 digest and verifies the signature by
	/// recovering the signer address without the key.
	///
	/// A mismatch against the configured owner is fatal: it means key
	/// misuse or a domain/schema mismatch, and the permit must never
	/// reach the routing or assembly stages.
	pub async fn sign(&self, permit: Permit) -> Result<SignedPermit, SwapError> {
		let digest = permit.signing_hash(self.config.permit2_address, self.config.chain_id);
		let signature = self.account.sign_digest(&digest).await?;

		let recovered = recover_signer(&digest, &signature)?;
		let expected = self.config.wallet_address;
		if recovered != expected {
			return Err(SwapError::SignatureVerificationFailed {
				recovered,
				expected,
			});
		}
		tracing::debug!(signer = %recovered, "permit signature verified");

		Ok(SignedPermit { permit, signature })
	}
}
