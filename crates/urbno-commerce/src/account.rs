//! Mock accounts kept on the device.
//!
//! There is no password and no server: signing up records an email with a
//! referral code, signing in just marks an existing email as current.

use crate::error::CommerceError;
use crate::money::{Currency, Money};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;

/// Store key holding the users map.
pub const USERS_KEY: &str = "urbno_users";
/// Store key holding the signed-in email.
pub const CURRENT_KEY: &str = "urbno_current";

const REFERRAL_PREFIX: &str = "URB";
const REFERRAL_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const REFERRAL_LEN: usize = 6;

/// A locally registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    pub referral_code: String,
    /// Referral credit.
    pub balance: Money,
}

impl User {
    fn new(email: String) -> Self {
        Self {
            email,
            referral_code: generate_referral_code(),
            balance: Money::zero(Currency::INR),
        }
    }
}

/// Result of a sign-up attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignUp {
    /// New account created and signed in.
    Created(User),
    /// Email already registered; signed in instead.
    WelcomeBack(User),
}

impl SignUp {
    pub fn user(&self) -> &User {
        match self {
            SignUp::Created(user) | SignUp::WelcomeBack(user) => user,
        }
    }

    /// Toast shown after the attempt.
    pub fn message(&self) -> &'static str {
        match self {
            SignUp::Created(_) => "Welcome to URBNO!",
            SignUp::WelcomeBack(_) => "Welcome back!",
        }
    }
}

/// Registered users and the current session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Accounts {
    users: BTreeMap<String, User>,
    current: Option<String>,
}

impl Accounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `email`, or sign in if it is already known.
    pub fn sign_up(&mut self, email: &str) -> Result<SignUp, CommerceError> {
        let email = normalize_email(email)?;

        if let Some(user) = self.users.get(&email) {
            let user = user.clone();
            self.current = Some(email);
            info!(email = %user.email, "existing user signed in via sign-up");
            return Ok(SignUp::WelcomeBack(user));
        }

        let user = User::new(email.clone());
        self.users.insert(email.clone(), user.clone());
        self.current = Some(email);
        info!(email = %user.email, referral_code = %user.referral_code, "user signed up");
        Ok(SignUp::Created(user))
    }

    /// Mark a registered email as the current user.
    pub fn sign_in(&mut self, email: &str) -> Result<&User, CommerceError> {
        let email = normalize_email(email)?;
        if !self.users.contains_key(&email) {
            return Err(CommerceError::UserNotFound(email));
        }
        info!(email = %email, "user signed in");
        self.current = Some(email.clone());
        self.users.get(&email).ok_or(CommerceError::UserNotFound(email))
    }

    /// Clear the session. Returns the email that was signed in.
    pub fn sign_out(&mut self) -> Option<String> {
        let previous = self.current.take();
        if let Some(email) = &previous {
            info!(email = %email, "user signed out");
        }
        previous
    }

    /// The signed-in user, if the stored email is still registered.
    pub fn current_user(&self) -> Option<&User> {
        self.current.as_ref().and_then(|email| self.users.get(email))
    }

    /// Like [`current_user`](Self::current_user), but an error when
    /// nobody is signed in.
    pub fn require_user(&self) -> Result<&User, CommerceError> {
        self.current_user().ok_or(CommerceError::NotSignedIn)
    }

    pub fn user(&self, email: &str) -> Option<&User> {
        self.users.get(&email.trim().to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[cfg(feature = "storage")]
impl Accounts {
    /// Load users and session from the store.
    pub fn load<B: urbno_store::Backend>(
        store: &urbno_store::Store<B>,
    ) -> Result<Self, CommerceError> {
        Ok(Self {
            users: store.get_or_default(USERS_KEY)?,
            current: store.get(CURRENT_KEY)?,
        })
    }

    /// Write users and session back to the store.
    pub fn save<B: urbno_store::Backend>(
        &self,
        store: &urbno_store::Store<B>,
    ) -> Result<(), CommerceError> {
        store.set(USERS_KEY, &self.users)?;
        match &self.current {
            Some(email) => store.set(CURRENT_KEY, email)?,
            None => store.delete(CURRENT_KEY)?,
        }
        Ok(())
    }
}

/// Trimmed, lower-cased email. Empty input is an error.
fn normalize_email(email: &str) -> Result<String, CommerceError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(CommerceError::EmptyEmail);
    }
    Ok(email.to_lowercase())
}

/// `URB` followed by six upper-case letters or digits.
pub fn generate_referral_code() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..REFERRAL_LEN)
        .map(|_| char::from(REFERRAL_ALPHABET[rng.gen_range(0..REFERRAL_ALPHABET.len())]))
        .collect();
    format!("{REFERRAL_PREFIX}{suffix}")
}
