//! Aggregation of analyzed variants into the stable shape the writers
//! consume.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::variant::{TrustLevel, Variant};

/// Counts by outcome; always well-defined, even for an all-failed run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub registered: usize,
    pub critical: usize,
    pub high_risk: usize,
    pub suspicious: usize,
    pub low_trust: usize,
    pub moderate: usize,
    pub established: usize,
    pub unknown: usize,
    pub unregistered: usize,
}

impl Summary {
    fn of(variants: &[Variant]) -> Summary {
        let mut summary = Summary {
            total: variants.len(),
            ..Default::default()
        };
        for variant in variants {
            if variant.registered {
                summary.registered += 1;
            }
            match variant.trust_level {
                TrustLevel::Critical => summary.critical += 1,
                TrustLevel::HighRisk => summary.high_risk += 1,
                TrustLevel::Suspicious => summary.suspicious += 1,
                TrustLevel::LowTrust => summary.low_trust += 1,
                TrustLevel::Moderate => summary.moderate += 1,
                TrustLevel::Established => summary.established += 1,
                TrustLevel::Unknown => summary.unknown += 1,
                TrustLevel::Unregistered => summary.unregistered += 1,
            }
        }
        summary
    }
}

/// The analyzer's output, re-sorted into a deterministic risk order.
///
/// Sorting is by `risk_score` descending with ties broken by candidate
/// string ascending, so identical per-variant outcomes always render
/// identically. This is the only shape handed to report writers.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub target: String,
    pub started_at: DateTime<Utc>,
    pub summary: Summary,
    pub variants: Vec<Variant>,
}

impl Report {
    pub fn new(target: String, started_at: DateTime<Utc>, mut variants: Vec<Variant>) -> Report {
        variants.sort_by(|a, b| {
            b.risk_score
                .cmp(&a.risk_score)
                .then_with(|| a.candidate.cmp(&b.candidate))
        });
        let summary = Summary::of(&variants);

        Report {
            target,
            started_at,
            summary,
            variants,
        }
    }

    /// Only the candidates that actually resolve, for consumers that do not
    /// care about the unregistered long tail.
    pub fn registered_only(&self) -> Vec<&Variant> {
        self.variants.iter().filter(|v| v.registered).collect()
    }

    /// Whether any registered candidate sits in an actionable trust bucket.
    pub fn has_suspicious(&self) -> bool {
        self.variants
            .iter()
            .any(|v| v.registered && v.trust_level.is_suspicious())
    }
}

#[cfg(test)]
mod tests {
    use spectral::prelude::*;

    use crate::variant::Technique;

    use super::*;

    fn variant(candidate: &str, trust_level: TrustLevel) -> Variant {
        let mut variant = Variant::new("example.com", candidate, Technique::TldSwap, "tld 'com' -> 'net'");
        variant.registered = trust_level != TrustLevel::Unregistered;
        variant.trust_level = trust_level;
        variant.risk_score = trust_level.risk_score();
        variant
    }

    fn report(variants: Vec<Variant>) -> Report {
        Report::new("example.com".to_string(), Utc::now(), variants)
    }

    #[test]
    fn sorts_by_risk_descending() {
        let report = report(vec![
            variant("established.com", TrustLevel::Established),
            variant("critical.com", TrustLevel::Critical),
            variant("unregistered.com", TrustLevel::Unregistered),
            variant("suspicious.com", TrustLevel::Suspicious),
            variant("unknown.com", TrustLevel::Unknown),
        ]);

        let scores: Vec<u8> = report.variants.iter().map(|v| v.risk_score).collect();
        assert_that(&scores).is_equal_to(vec![95, 70, 50, 15, 0]);
    }

    #[test]
    fn ties_break_by_candidate_ascending() {
        let report = report(vec![
            variant("zeta.com", TrustLevel::Critical),
            variant("alpha.com", TrustLevel::Critical),
            variant("mu.com", TrustLevel::Critical),
        ]);

        let candidates: Vec<&str> = report.variants.iter().map(|v| v.candidate.as_str()).collect();
        assert_that(&candidates).is_equal_to(vec!["alpha.com", "mu.com", "zeta.com"]);
    }

    #[test]
    fn summary_counts_levels() {
        let report = report(vec![
            variant("a.com", TrustLevel::Critical),
            variant("b.com", TrustLevel::Critical),
            variant("c.com", TrustLevel::Moderate),
            variant("d.com", TrustLevel::Unregistered),
        ]);

        assert_that(&report.summary.total).is_equal_to(4);
        assert_that(&report.summary.registered).is_equal_to(3);
        assert_that(&report.summary.critical).is_equal_to(2);
        assert_that(&report.summary.moderate).is_equal_to(1);
        assert_that(&report.summary.unregistered).is_equal_to(1);
    }

    #[test]
    fn registered_only_filters() {
        let report = report(vec![
            variant("a.com", TrustLevel::Critical),
            variant("b.com", TrustLevel::Unregistered),
        ]);

        let hits = report.registered_only();
        assert_that(&hits).has_length(1);
        assert_that(&hits[0].candidate).is_equal_to("a.com".to_string());
    }

    #[test]
    fn suspicious_detection_covers_the_three_actionable_levels() {
        for level in [TrustLevel::Critical, TrustLevel::HighRisk, TrustLevel::Suspicious] {
            let report = report(vec![variant("a.com", level)]);
            asserting(&format!("{} is actionable", level))
                .that(&report.has_suspicious())
                .is_true();
        }

        let calm = report(vec![
            variant("a.com", TrustLevel::Moderate),
            variant("b.com", TrustLevel::Established),
            variant("c.com", TrustLevel::Unknown),
            variant("d.com", TrustLevel::Unregistered),
        ]);
        assert_that(&calm.has_suspicious()).is_false();
    }
}
