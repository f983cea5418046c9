//! Seam for the external identity provider.
//!
//! The analysis flow consumes nothing from the provider beyond a
//! signed-in/signed-out gate and an account label to display; no tokens are
//! attached to API requests.

/// Credential handling is delegated entirely to the implementation; the
/// shell only learns whether a session exists and what to call it.
pub trait IdentityProvider {
    /// Runs the provider's sign-in flow. Returns the account label on
    /// success, `None` when sign-in is refused or unavailable.
    fn sign_in(&self) -> Option<String>;
}

/// Stand-in provider backed by deployment configuration. A real identity
/// widget would replace this; the rest of the shell only sees the trait.
pub struct ConfiguredIdentityProvider {
    account: Option<String>,
}

impl ConfiguredIdentityProvider {
    pub fn new(account: Option<String>) -> Self {
        Self { account }
    }
}

impl IdentityProvider for ConfiguredIdentityProvider {
    fn sign_in(&self) -> Option<String> {
        self.account.clone()
    }
}
