use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;

use crate::Error;

/// The transformation technique that produced a candidate domain.
///
/// The order of [`Technique::ALL`] is the order the generator runs them in;
/// it is part of the output contract because the first technique to emit a
/// candidate wins the provenance tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Technique {
    Homograph,
    Leetspeak,
    Typo,
    Phonetic,
    Repetition,
    Omission,
    Insertion,
    Transposition,
    Hyphenation,
    TldSwap,
    Prefix,
    Suffix,
    VowelSwap,
    DoubleChar,
    Bitsquatting,
    Subdomain,
}

impl Technique {
    pub const ALL: [Technique; 16] = [
        Technique::Homograph,
        Technique::Leetspeak,
        Technique::Typo,
        Technique::Phonetic,
        Technique::Repetition,
        Technique::Omission,
        Technique::Insertion,
        Technique::Transposition,
        Technique::Hyphenation,
        Technique::TldSwap,
        Technique::Prefix,
        Technique::Suffix,
        Technique::VowelSwap,
        Technique::DoubleChar,
        Technique::Bitsquatting,
        Technique::Subdomain,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Technique::Homograph => "homograph",
            Technique::Leetspeak => "leetspeak",
            Technique::Typo => "typo",
            Technique::Phonetic => "phonetic",
            Technique::Repetition => "repetition",
            Technique::Omission => "omission",
            Technique::Insertion => "insertion",
            Technique::Transposition => "transposition",
            Technique::Hyphenation => "hyphenation",
            Technique::TldSwap => "tld_swap",
            Technique::Prefix => "prefix",
            Technique::Suffix => "suffix",
            Technique::VowelSwap => "vowel_swap",
            Technique::DoubleChar => "double_char",
            Technique::Bitsquatting => "bitsquatting",
            Technique::Subdomain => "subdomain",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Technique::Homograph => "replace letters with visually confusable Unicode characters",
            Technique::Leetspeak => "replace letters with look-alike digits and symbols",
            Technique::Typo => "replace letters with their QWERTY keyboard neighbours",
            Technique::Phonetic => "swap sound-alike letter groups (ph/f, ck/k, ...)",
            Technique::Repetition => "double a single letter",
            Technique::Omission => "drop a single letter",
            Technique::Insertion => "insert a common letter between two others",
            Technique::Transposition => "swap two adjacent letters",
            Technique::Hyphenation => "insert a hyphen, or drop existing hyphens",
            Technique::TldSwap => "keep the name, swap the top-level domain",
            Technique::Prefix => "prepend a phishing-flavoured word",
            Technique::Suffix => "append a phishing-flavoured word",
            Technique::VowelSwap => "replace a vowel with each other vowel",
            Technique::DoubleChar => "collapse a doubled letter into one",
            Technique::Bitsquatting => "flip a single bit in one character",
            Technique::Subdomain => "re-package the name as a subdomain of a generic host",
        }
    }
}

impl fmt::Display for Technique {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Technique {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let technique = match s.trim().to_lowercase().as_str() {
            "homograph" => Technique::Homograph,
            "leetspeak" => Technique::Leetspeak,
            "typo" => Technique::Typo,
            "phonetic" => Technique::Phonetic,
            "repetition" => Technique::Repetition,
            "omission" => Technique::Omission,
            "insertion" => Technique::Insertion,
            "transposition" => Technique::Transposition,
            "hyphenation" => Technique::Hyphenation,
            "tld" | "tld_swap" => Technique::TldSwap,
            "prefix" => Technique::Prefix,
            "suffix" => Technique::Suffix,
            "vowel_swap" => Technique::VowelSwap,
            "double_char" => Technique::DoubleChar,
            "bitsquatting" => Technique::Bitsquatting,
            "subdomain" => Technique::Subdomain,
            _ => {
                return Err(Error::ParserError {
                    what: s.to_string(),
                    to: "Technique",
                    why: "unknown technique tag".to_string(),
                })
            }
        };
        Ok(technique)
    }
}

/// DNS record kinds the analyzer queries, in query order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordKind {
    A,
    Aaaa,
    Mx,
    Ns,
}

impl RecordKind {
    pub const ALL: [RecordKind; 4] = [RecordKind::A, RecordKind::Aaaa, RecordKind::Mx, RecordKind::Ns];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::A => "A",
            RecordKind::Aaaa => "AAAA",
            RecordKind::Mx => "MX",
            RecordKind::Ns => "NS",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The qualitative age bucket of a registered candidate.
///
/// [`TrustLevel::bucket`] is a pure function of registration state and age;
/// everything else in the pipeline derives from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrustLevel {
    Unregistered,
    Unknown,
    Established,
    Moderate,
    LowTrust,
    Suspicious,
    HighRisk,
    Critical,
}

impl TrustLevel {
    /// Buckets a candidate by registration age.
    ///
    /// Only the oldest boundary is configurable; the younger boundaries are
    /// fixed because they encode how fast phishing campaigns burn domains.
    pub fn bucket(registered: bool, age_days: Option<i64>, threshold_days: i64) -> TrustLevel {
        if !registered {
            return TrustLevel::Unregistered;
        }
        match age_days {
            None => TrustLevel::Unknown,
            Some(age) if age < 30 => TrustLevel::Critical,
            Some(age) if age < 90 => TrustLevel::HighRisk,
            Some(age) if age < 180 => TrustLevel::Suspicious,
            Some(age) if age < 365 => TrustLevel::LowTrust,
            Some(age) if age < threshold_days => TrustLevel::Moderate,
            Some(_) => TrustLevel::Established,
        }
    }

    pub fn risk_score(&self) -> u8 {
        match self {
            TrustLevel::Critical => 95,
            TrustLevel::HighRisk => 85,
            TrustLevel::Suspicious => 70,
            TrustLevel::LowTrust => 55,
            TrustLevel::Unknown => 50,
            TrustLevel::Moderate => 35,
            TrustLevel::Established => 15,
            TrustLevel::Unregistered => 0,
        }
    }

    /// Levels that count as an actionable finding for the process exit code.
    pub fn is_suspicious(&self) -> bool {
        matches!(
            self,
            TrustLevel::Critical | TrustLevel::HighRisk | TrustLevel::Suspicious
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrustLevel::Unregistered => "unregistered",
            TrustLevel::Unknown => "unknown",
            TrustLevel::Established => "established",
            TrustLevel::Moderate => "moderate",
            TrustLevel::LowTrust => "low_trust",
            TrustLevel::Suspicious => "suspicious",
            TrustLevel::HighRisk => "high_risk",
            TrustLevel::Critical => "critical",
        }
    }
}

impl fmt::Display for TrustLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The fixed WHOIS key set carried on every variant. Keys are always present
/// in serialized output; consumers tolerate empty values, not missing keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WhoisSummary {
    pub domain_name: Option<String>,
    pub registrar: Option<String>,
    pub creation_date: Option<String>,
    pub expiration_date: Option<String>,
    pub name_servers: Option<String>,
    pub org: Option<String>,
    pub country: Option<String>,
}

impl WhoisSummary {
    pub fn is_empty(&self) -> bool {
        self == &WhoisSummary::default()
    }
}

/// A candidate domain flowing through the pipeline.
///
/// Created by the generator, mutated only by the analyzer worker that owns
/// it, and frozen once handed to the aggregator.
#[derive(Debug, Clone, Serialize)]
pub struct Variant {
    pub original: String,
    pub candidate: String,
    pub technique: Technique,
    pub detail: String,
    pub registered: bool,
    pub dns_records: IndexMap<RecordKind, Vec<String>>,
    pub whois: WhoisSummary,
    pub creation_date: Option<DateTime<Utc>>,
    pub registrar: Option<String>,
    pub age_days: Option<i64>,
    pub trust_level: TrustLevel,
    pub risk_score: u8,
    pub error: Option<String>,
}

impl Variant {
    pub fn new<O: Into<String>, C: Into<String>, D: Into<String>>(
        original: O,
        candidate: C,
        technique: Technique,
        detail: D,
    ) -> Variant {
        Variant {
            original: original.into(),
            candidate: candidate.into(),
            technique,
            detail: detail.into(),
            registered: false,
            dns_records: IndexMap::new(),
            whois: WhoisSummary::default(),
            creation_date: None,
            registrar: None,
            age_days: None,
            trust_level: TrustLevel::Unregistered,
            risk_score: 0,
            error: None,
        }
    }

    /// Derives age, trust level, and risk score from the analysis state.
    ///
    /// Also enforces the unregistered invariant: a candidate DNS could not
    /// find carries no DNS or WHOIS payload, whatever a flaky lookup left
    /// behind.
    pub fn classify(&mut self, now: DateTime<Utc>, threshold_days: i64) {
        if !self.registered {
            self.dns_records.clear();
            self.whois = WhoisSummary::default();
            self.creation_date = None;
            self.registrar = None;
            self.age_days = None;
        } else {
            self.age_days = self
                .creation_date
                .map(|created| (now - created).num_days().max(0));
        }

        self.trust_level = TrustLevel::bucket(self.registered, self.age_days, threshold_days);
        self.risk_score = self.trust_level.risk_score();
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use spectral::prelude::*;

    use super::*;

    #[test]
    fn technique_tags_are_stable() {
        let tags: Vec<_> = Technique::ALL.iter().map(|t| t.name()).collect();

        assert_that(&tags).has_length(16);
        assert_that(&tags).contains("homograph");
        assert_that(&tags).contains("tld_swap");
        assert_that(&tags).contains("bitsquatting");
    }

    #[test]
    fn technique_round_trips_through_from_str() {
        for technique in Technique::ALL {
            let parsed: Technique = technique.name().parse().unwrap();
            assert_that(&parsed).is_equal_to(technique);
        }
    }

    #[test]
    fn tld_alias_is_accepted() {
        let parsed: Technique = "tld".parse().unwrap();

        assert_that(&parsed).is_equal_to(Technique::TldSwap);
    }

    #[test]
    fn unknown_technique_is_rejected() {
        let parsed = "soundex".parse::<Technique>();

        assert_that(&parsed).is_err();
    }

    #[test]
    fn bucket_boundaries() {
        let cases = [
            (29, TrustLevel::Critical),
            (30, TrustLevel::HighRisk),
            (89, TrustLevel::HighRisk),
            (90, TrustLevel::Suspicious),
            (179, TrustLevel::Suspicious),
            (180, TrustLevel::LowTrust),
            (364, TrustLevel::LowTrust),
            (365, TrustLevel::Moderate),
            (729, TrustLevel::Moderate),
            (730, TrustLevel::Established),
        ];

        for (age, expected) in cases {
            let level = TrustLevel::bucket(true, Some(age), 730);
            asserting(&format!("age {}", age)).that(&level).is_equal_to(expected);
        }
    }

    #[test]
    fn bucket_honors_configured_threshold() {
        assert_that(&TrustLevel::bucket(true, Some(999), 1000)).is_equal_to(TrustLevel::Moderate);
        assert_that(&TrustLevel::bucket(true, Some(1000), 1000)).is_equal_to(TrustLevel::Established);
    }

    #[test]
    fn bucket_without_age_is_unknown() {
        let level = TrustLevel::bucket(true, None, 730);

        assert_that(&level).is_equal_to(TrustLevel::Unknown);
        assert_that(&level.risk_score()).is_equal_to(50);
    }

    #[test]
    fn bucket_unregistered_wins_over_age() {
        let level = TrustLevel::bucket(false, Some(10), 730);

        assert_that(&level).is_equal_to(TrustLevel::Unregistered);
        assert_that(&level.risk_score()).is_equal_to(0);
    }

    #[test]
    fn bucket_is_pure() {
        let first = TrustLevel::bucket(true, Some(45), 730);
        let second = TrustLevel::bucket(true, Some(45), 730);

        assert_that(&first).is_equal_to(second);
    }

    #[test]
    fn risk_scores_follow_levels() {
        let scores: Vec<u8> = [
            TrustLevel::Critical,
            TrustLevel::HighRisk,
            TrustLevel::Suspicious,
            TrustLevel::LowTrust,
            TrustLevel::Unknown,
            TrustLevel::Moderate,
            TrustLevel::Established,
            TrustLevel::Unregistered,
        ]
        .iter()
        .map(|l| l.risk_score())
        .collect();

        assert_that(&scores).is_equal_to(vec![95, 85, 70, 55, 50, 35, 15, 0]);
    }

    #[test]
    fn classify_young_registration() {
        let now = Utc::now();
        let mut variant = Variant::new("example.com", "examp1e.com", Technique::Leetspeak, "l -> 1");
        variant.registered = true;
        variant.creation_date = Some(now - Duration::days(45));

        variant.classify(now, 730);

        assert_that(&variant.age_days).is_some().is_equal_to(45);
        assert_that(&variant.trust_level).is_equal_to(TrustLevel::HighRisk);
        assert_that(&variant.risk_score).is_equal_to(85);
    }

    #[test]
    fn classify_scrubs_unregistered_state() {
        let now = Utc::now();
        let mut variant = Variant::new("example.com", "examp1e.com", Technique::Leetspeak, "l -> 1");
        variant
            .dns_records
            .insert(RecordKind::A, vec!["192.0.2.1".to_string()]);
        variant.creation_date = Some(now - Duration::days(45));

        variant.classify(now, 730);

        assert_that(&variant.registered).is_false();
        assert_that(&variant.dns_records.is_empty()).is_true();
        assert_that(&variant.whois.is_empty()).is_true();
        assert_that(&variant.age_days).is_none();
        assert_that(&variant.trust_level).is_equal_to(TrustLevel::Unregistered);
        assert_that(&variant.risk_score).is_equal_to(0);
    }

    #[test]
    fn classify_registered_without_creation_date_is_unknown() {
        let now = Utc::now();
        let mut variant = Variant::new("example.com", "examp1e.com", Technique::Leetspeak, "l -> 1");
        variant.registered = true;
        variant.error = Some("whois: connection reset".to_string());

        variant.classify(now, 730);

        assert_that(&variant.trust_level).is_equal_to(TrustLevel::Unknown);
        assert_that(&variant.risk_score).is_equal_to(50);
        assert_that(&variant.error).is_some();
    }

    #[test]
    fn classify_clamps_future_creation_dates() {
        let now = Utc::now();
        let mut variant = Variant::new("example.com", "examp1e.com", Technique::Leetspeak, "l -> 1");
        variant.registered = true;
        variant.creation_date = Some(now + Duration::days(3));

        variant.classify(now, 730);

        assert_that(&variant.age_days).is_some().is_equal_to(0);
        assert_that(&variant.trust_level).is_equal_to(TrustLevel::Critical);
    }
}
