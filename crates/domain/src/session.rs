//! Caller-side session: which domain is being worked on, the DKIM value the
//! user supplied, and how far the check → generate flow has progressed.
//!
//! Transitions are pure: each takes `&self` and returns the next session, so
//! a caller can keep the previous one around (or drop a stale one) freely.

use crate::auth::{DkimValue, DomainReport, GeneratedRecordSet, RecordGenerator, RecordTokenizer};
use crate::config::GeneratePolicy;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Idle,
    Checked,
    Generated,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Check a domain before generating records")]
    NotChecked,

    #[error("Lookup or paste a DKIM value to generate the records")]
    MissingDkimValue,

    #[error("Records were already generated; reset or check another domain")]
    AlreadyGenerated,

    #[error("SPF already authorizes the mail service; nothing to generate")]
    GenerationSuppressed,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    report: Option<DomainReport>,
    dkim: Option<DkimValue>,
    records: Option<GeneratedRecordSet>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SessionPhase {
        match (&self.report, &self.records) {
            (None, _) => SessionPhase::Idle,
            (Some(_), None) => SessionPhase::Checked,
            (Some(_), Some(_)) => SessionPhase::Generated,
        }
    }

    pub fn domain(&self) -> Option<&str> {
        self.report.as_ref().map(|r| r.domain.as_str())
    }

    pub fn report(&self) -> Option<&DomainReport> {
        self.report.as_ref()
    }

    pub fn dkim(&self) -> Option<&DkimValue> {
        self.dkim.as_ref()
    }

    pub fn records(&self) -> Option<&GeneratedRecordSet> {
        self.records.as_ref()
    }

    /// A fresh check replaces everything, whatever phase the session was in;
    /// the DKIM value belonged to the previous domain.
    pub fn check(&self, report: DomainReport) -> Session {
        Session {
            report: Some(report),
            dkim: None,
            records: None,
        }
    }

    pub fn set_dkim(&self, dkim: DkimValue) -> Result<Session, SessionError> {
        match self.phase() {
            SessionPhase::Idle => Err(SessionError::NotChecked),
            SessionPhase::Generated => Err(SessionError::AlreadyGenerated),
            SessionPhase::Checked => Ok(Session {
                dkim: Some(dkim),
                ..self.clone()
            }),
        }
    }

    /// Whether the generate step should be offered at all.
    pub fn can_generate(&self, policy: GeneratePolicy) -> bool {
        let Some(report) = &self.report else {
            return false;
        };
        if self.records.is_some() {
            return false;
        }
        match policy {
            GeneratePolicy::Always => true,
            GeneratePolicy::SuppressWhenAuthorized => !report.status.spf.is_authorized(),
        }
    }

    pub fn generate<T: RecordTokenizer>(
        &self,
        generator: &RecordGenerator<T>,
        policy: GeneratePolicy,
    ) -> Result<Session, SessionError> {
        let report = match self.phase() {
            SessionPhase::Idle => return Err(SessionError::NotChecked),
            SessionPhase::Generated => return Err(SessionError::AlreadyGenerated),
            SessionPhase::Checked => self.report.as_ref().ok_or(SessionError::NotChecked)?,
        };

        if !self.can_generate(policy) {
            return Err(SessionError::GenerationSuppressed);
        }

        let dkim = self
            .dkim
            .as_ref()
            .filter(|d| !d.is_blank())
            .ok_or(SessionError::MissingDkimValue)?;

        let records = generator.generate(
            &report.domain,
            report.spf_record.as_deref(),
            report.status.dmarc_present,
            dkim,
        );

        Ok(Session {
            records: Some(records),
            ..self.clone()
        })
    }

    pub fn reset(&self) -> Session {
        Session::new()
    }
}
