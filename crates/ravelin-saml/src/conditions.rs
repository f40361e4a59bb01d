#![forbid(unsafe_code)]

//! Assertion conditions: the validity window and the condition list.
//!
//! Evaluation runs the temporal check first, then each condition in
//! document order. The first failure is returned unchanged.

use crate::context::Context;
use chrono::{DateTime, Utc};
use ravelin_core::{Error, Result};

/// A check an assertion places on the party consuming it.
pub trait Condition: Send + Sync + std::fmt::Debug {
    fn validate(&self, ctx: &Context) -> Result<()>;
}

/// `<saml:AudienceRestriction>`: the assertion is only for the listed
/// audiences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudienceRestriction {
    pub audiences: Vec<String>,
}

impl AudienceRestriction {
    pub fn new(audience: impl Into<String>) -> Self {
        Self {
            audiences: vec![audience.into()],
        }
    }
}

impl Condition for AudienceRestriction {
    /// Succeeds when any listed audience equals the context audience once
    /// surrounding whitespace is trimmed from both.
    fn validate(&self, ctx: &Context) -> Result<()> {
        let expected = ctx.audience.trim();
        if self.audiences.iter().any(|a| a.trim() == expected) {
            Ok(())
        } else {
            Err(Error::AudienceMismatch)
        }
    }
}

/// `<saml:Conditions>` of an assertion.
#[derive(Debug, Default)]
pub struct Conditions {
    /// Inclusive lower bound.
    pub not_before: Option<DateTime<Utc>>,
    /// Exclusive upper bound.
    pub not_on_or_after: Option<DateTime<Utc>>,
    pub list: Vec<Box<dyn Condition>>,
}

/// Evaluate `conditions` at the current time.
pub fn evaluate(conditions: &Conditions, ctx: &Context) -> Result<()> {
    evaluate_at(conditions, ctx, Utc::now())
}

/// Evaluate `conditions` as of `now`.
///
/// Valid when `NotBefore - skew <= now < NotOnOrAfter + skew`. A missing
/// `NotOnOrAfter` is treated as already expired.
pub fn evaluate_at(conditions: &Conditions, ctx: &Context, now: DateTime<Utc>) -> Result<()> {
    // A window bound pushed out of range by the skew fails closed.
    if let Some(not_before) = conditions.not_before {
        match not_before.checked_sub_signed(ctx.clock_skew) {
            Some(earliest) if now >= earliest => {}
            _ => return Err(Error::TooSoon),
        }
    }
    match conditions
        .not_on_or_after
        .and_then(|t| t.checked_add_signed(ctx.clock_skew))
    {
        Some(expiry) if now < expiry => {}
        _ => return Err(Error::TooLate),
    }

    for condition in &conditions.list {
        condition.validate(ctx)?;
    }
    Ok(())
}
