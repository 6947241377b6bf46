//! Pass/fail policies for redirect chains.

use clap::ValueEnum;
use strum_macros::EnumIter as EnumIterMacro;
use url::Url;

use crate::models::ChainResult;

/// Named pass policy, selected with `--mode`.
///
/// Unknown names are rejected while parsing arguments; once a `Policy` exists
/// evaluation cannot fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, EnumIterMacro)]
pub enum Policy {
    /// Legacy URL answers 301 and lands on the canonical host within two hops
    Migration,
    /// URL already answers 200 directly on the canonical host (pre-migration check)
    Baseline,
}

/// The facts about a chain that the policies look at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainFacts {
    /// Status of hop 0, `None` if no request got a response
    pub first_status: Option<u16>,
    /// Final status is exactly 200
    pub final_ok: bool,
    /// Number of hops recorded
    pub hop_count: usize,
    /// Host of the final URL, `None` if it does not parse
    pub final_host: Option<String>,
    /// Final host equals the expected canonical host
    pub final_host_matches: bool,
}

impl ChainFacts {
    pub fn from_result(result: &ChainResult, expected_host: &str) -> Self {
        Self {
            first_status: result.first_status(),
            final_ok: result.final_status.code() == Some(200),
            hop_count: result.hop_count(),
            final_host: Url::parse(&result.final_url)
                .ok()
                .and_then(|u| u.host_str().map(str::to_string)),
            final_host_matches: result.final_host_matches(expected_host),
        }
    }
}

/// Outcome of evaluating one chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub pass: bool,
    /// Why the chain passed, or every requirement it missed joined with `; `
    pub reason: String,
}

type Check = fn(&ChainFacts, &ChainResult, &str) -> Result<String, Vec<String>>;

impl Policy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Policy::Migration => "migration",
            Policy::Baseline => "baseline",
        }
    }

    fn check(&self) -> Check {
        match self {
            Policy::Migration => check_migration,
            Policy::Baseline => check_baseline,
        }
    }

    /// Classifies a chain under this policy.
    pub fn evaluate(&self, result: &ChainResult, expected_host: &str) -> Verdict {
        let facts = ChainFacts::from_result(result, expected_host);
        match (self.check())(&facts, result, expected_host) {
            Ok(reason) => Verdict { pass: true, reason },
            Err(missed) => Verdict {
                pass: false,
                reason: missed.join("; "),
            },
        }
    }
}

impl std::fmt::Display for Policy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn check_migration(
    facts: &ChainFacts,
    result: &ChainResult,
    expected_host: &str,
) -> Result<String, Vec<String>> {
    let mut missed = Vec::new();
    if facts.first_status != Some(301) {
        missed.push(first_status_miss(facts, 301));
    }
    if !facts.final_ok {
        missed.push(final_status_miss(result));
    }
    if facts.hop_count > 2 {
        missed.push(format!("{} hops (max 2)", facts.hop_count));
    }
    if !facts.final_host_matches {
        missed.push(host_miss(facts, expected_host));
    }
    if missed.is_empty() {
        Ok(format!(
            "301 to {expected_host} in {} hop{}",
            facts.hop_count,
            if facts.hop_count == 1 { "" } else { "s" }
        ))
    } else {
        Err(missed)
    }
}

fn check_baseline(
    facts: &ChainFacts,
    result: &ChainResult,
    expected_host: &str,
) -> Result<String, Vec<String>> {
    let mut missed = Vec::new();
    if facts.first_status != Some(200) {
        missed.push(first_status_miss(facts, 200));
    }
    if !facts.final_ok {
        missed.push(final_status_miss(result));
    }
    if facts.hop_count != 1 {
        missed.push(format!("{} hops (expected 1)", facts.hop_count));
    }
    if !facts.final_host_matches {
        missed.push(host_miss(facts, expected_host));
    }
    if missed.is_empty() {
        Ok(format!("200 directly on {expected_host}"))
    } else {
        Err(missed)
    }
}

fn first_status_miss(facts: &ChainFacts, expected: u16) -> String {
    match facts.first_status {
        Some(status) => format!("first status {status} (expected {expected})"),
        None => format!("no response on first hop (expected {expected})"),
    }
}

fn final_status_miss(result: &ChainResult) -> String {
    format!("final status {} (expected 200)", result.final_status)
}

fn host_miss(facts: &ChainFacts, expected_host: &str) -> String {
    match &facts.final_host {
        Some(host) => format!("final host {host} (expected {expected_host})"),
        None => format!("final URL has no host (expected {expected_host})"),
    }
}
