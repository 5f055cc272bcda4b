// Copyright 2025 Cowboy AI, LLC.

//! Repair of invalid values by an outside party
//!
//! Validators never fix data themselves. When a value breaks an invariant
//! they hand the value and a complaint to a [`Corrector`] and re-check
//! whatever comes back. Values cross this boundary as JSON, so a corrector
//! sees the same shape the document stores and must answer in that shape.
//!
//! Retries are bounded by [`CorrectionPolicy`]: a session fails with
//! [`CatGraphError::CorrectionExhausted`] after `max_attempts` corrections,
//! and with [`CatGraphError::CorrectionStalled`] as soon as a corrector
//! hands back the value it was given.

use std::collections::VecDeque;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::warn;

use crate::config::CorrectionPolicy;
use crate::errors::{CatGraphError, CatGraphResult};

/// Supplies a replacement for an invalid value
pub trait Corrector {
    /// Return a value of the same shape as `current` that addresses `complaint`
    fn correct(&mut self, current: Value, complaint: &str) -> CatGraphResult<Value>;
}

impl<F> Corrector for F
where
    F: FnMut(Value, &str) -> CatGraphResult<Value>,
{
    fn correct(&mut self, current: Value, complaint: &str) -> CatGraphResult<Value> {
        self(current, complaint)
    }
}

/// Refuses every request; any violation becomes a hard error
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCorrector;

impl Corrector for NoCorrector {
    fn correct(&mut self, _current: Value, complaint: &str) -> CatGraphResult<Value> {
        Err(CatGraphError::CorrectorUnavailable(complaint.to_string()))
    }
}

/// Answers requests from a fixed queue of replies
#[derive(Debug, Clone, Default)]
pub struct ScriptedCorrector {
    replies: VecDeque<Value>,
    complaints: Vec<String>,
}

impl ScriptedCorrector {
    /// Queue replies in the order they will be handed out
    pub fn new(replies: impl IntoIterator<Item = Value>) -> Self {
        Self {
            replies: replies.into_iter().collect(),
            complaints: Vec::new(),
        }
    }

    /// Load replies from a JSON array
    pub fn from_json(text: &str) -> CatGraphResult<Self> {
        let replies: Vec<Value> = serde_json::from_str(text)?;
        Ok(Self::new(replies))
    }

    /// Complaints received so far
    pub fn complaints(&self) -> &[String] {
        &self.complaints
    }

    /// Replies not yet handed out
    pub fn remaining(&self) -> usize {
        self.replies.len()
    }
}

impl Corrector for ScriptedCorrector {
    fn correct(&mut self, _current: Value, complaint: &str) -> CatGraphResult<Value> {
        self.complaints.push(complaint.to_string());
        self.replies.pop_front().ok_or_else(|| {
            CatGraphError::CorrectorUnavailable(format!("no scripted reply left for: {complaint}"))
        })
    }
}

/// A corrector bound to a retry policy
pub struct CorrectionSession<'c> {
    corrector: &'c mut dyn Corrector,
    policy: CorrectionPolicy,
}

impl<'c> CorrectionSession<'c> {
    /// Wrap a corrector
    pub fn new(corrector: &'c mut dyn Corrector, policy: CorrectionPolicy) -> Self {
        Self { corrector, policy }
    }

    /// Replace `value` until `check` stops complaining
    ///
    /// `check` returns `None` for a valid value and the complaint otherwise.
    /// A reply that does not deserialize as `T` counts as a failed attempt.
    pub fn repair<T, C>(&mut self, subject: &str, mut value: T, mut check: C) -> CatGraphResult<T>
    where
        T: Serialize + DeserializeOwned + PartialEq,
        C: FnMut(&T) -> Option<String>,
    {
        let mut attempts = 0;
        loop {
            let Some(complaint) = check(&value) else {
                return Ok(value);
            };
            if attempts >= self.policy.max_attempts {
                return Err(CatGraphError::CorrectionExhausted {
                    subject: subject.to_string(),
                    complaint,
                    attempts,
                });
            }
            attempts += 1;
            warn!(subject, %complaint, attempt = attempts, "requesting correction");

            let reply = self
                .corrector
                .correct(serde_json::to_value(&value)?, &complaint)?;
            match serde_json::from_value::<T>(reply) {
                Ok(next) if next == value => {
                    return Err(CatGraphError::CorrectionStalled {
                        subject: subject.to_string(),
                        complaint,
                    });
                }
                Ok(next) => value = next,
                Err(e) => warn!(subject, error = %e, "correction has the wrong shape"),
            }
        }
    }

    /// Ask which of two conflicting labels to keep
    pub fn choose(&mut self, subject: &str, stored: &str, proposed: &str) -> CatGraphResult<String> {
        let complaint = format!("{subject}: keep {stored:?} or {proposed:?}");
        let mut attempts = 0;
        while attempts < self.policy.max_attempts {
            attempts += 1;
            warn!(subject, %complaint, attempt = attempts, "requesting choice");
            let reply = self.corrector.correct(json!([stored, proposed]), &complaint)?;
            match reply.as_str() {
                Some(choice) if choice == stored || choice == proposed => {
                    return Ok(choice.to_string())
                }
                _ => warn!(subject, %reply, "choice is not one of the candidates"),
            }
        }
        Err(CatGraphError::CorrectionExhausted {
            subject: subject.to_string(),
            complaint,
            attempts,
        })
    }
}
