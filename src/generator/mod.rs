//! Deterministic expansion of a target domain into candidate variants.
//!
//! A [`VariantGenerator`] is built per target and runs the enabled
//! techniques in their canonical order. Candidates are deduplicated across
//! techniques through an emitted-set, so the first technique to produce a
//! string owns its provenance tag, and a configurable cap hard-stops
//! emission. Given the same target, technique set, and cap, two runs yield
//! the identical ordered sequence.

use std::collections::HashSet;

use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::config::AnalysisConfig;
use crate::target::Target;
use crate::variant::{Technique, Variant};

pub mod tables;
mod techniques;

#[derive(Debug, Error)]
#[error("{reason}")]
pub struct TechniqueError {
    reason: String,
}

/// Collects candidates, enforcing non-identity, uniqueness, and the cap.
pub(crate) struct Emitter {
    original: String,
    max_variants: usize,
    seen: HashSet<String>,
    variants: Vec<Variant>,
}

impl Emitter {
    fn new(original: String, max_variants: usize) -> Emitter {
        Emitter {
            original,
            max_variants,
            seen: HashSet::new(),
            variants: Vec::new(),
        }
    }

    fn cap_reached(&self) -> bool {
        self.variants.len() >= self.max_variants
    }

    fn len(&self) -> usize {
        self.variants.len()
    }

    /// Emits `name.tld` unless it equals the original or was emitted before.
    ///
    /// Returns `false` once the cap is reached; callers stop producing.
    pub(crate) fn emit(&mut self, name: &str, tld: &str, technique: Technique, detail: String) -> bool {
        if self.cap_reached() {
            return false;
        }
        let candidate = format!("{}.{}", name, tld);
        if candidate == self.original {
            return true;
        }
        if !self.seen.insert(candidate.clone()) {
            trace!("dropping duplicate candidate {}", candidate);
            return true;
        }
        self.variants
            .push(Variant::new(self.original.clone(), candidate, technique, detail));
        true
    }

    fn into_variants(self) -> Vec<Variant> {
        self.variants
    }
}

/// Expands one parsed target into its candidate variants.
///
/// Holds the emitted-set and cap as its only state; create a fresh instance
/// per target and do not share one across threads.
pub struct VariantGenerator {
    name: String,
    tld: String,
    original: String,
    techniques: Vec<Technique>,
    max_variants: usize,
}

impl VariantGenerator {
    pub fn new(config: &AnalysisConfig, target: &Target) -> VariantGenerator {
        VariantGenerator {
            name: target.name().to_string(),
            tld: target.tld().to_string(),
            original: target.fqdn(),
            techniques: config.techniques().to_vec(),
            max_variants: config.max_variants(),
        }
    }

    /// Runs the enabled techniques in canonical order and returns the
    /// ordered candidate sequence, at most `max_variants` long.
    pub fn generate(&self) -> Vec<Variant> {
        let mut emitter = Emitter::new(self.original.clone(), self.max_variants);

        for technique in Technique::ALL {
            if !self.techniques.contains(&technique) {
                continue;
            }
            if emitter.cap_reached() {
                debug!("variant cap of {} reached, stopping", self.max_variants);
                break;
            }
            let before = emitter.len();
            match techniques::run(technique, &self.name, &self.tld, &mut emitter) {
                Ok(()) => debug!("technique {} emitted {} candidates", technique, emitter.len() - before),
                Err(err) => warn!("technique {} failed and was skipped: {}", technique, err),
            }
        }

        let variants = emitter.into_variants();
        debug!("generated {} candidates for {}", variants.len(), self.original);
        variants
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use spectral::prelude::*;

    use super::*;

    fn generator(target: &str, techniques: Vec<Technique>, cap: usize) -> VariantGenerator {
        let config = AnalysisConfig::new(target)
            .with_techniques(techniques)
            .with_max_variants(cap);
        let target = Target::parse(config.target()).unwrap();
        VariantGenerator::new(&config, &target)
    }

    fn all(target: &str) -> Vec<Variant> {
        generator(target, Technique::ALL.to_vec(), 1000).generate()
    }

    #[test]
    fn generation_is_deterministic() {
        let first: Vec<String> = all("example.com").into_iter().map(|v| v.candidate).collect();
        let second: Vec<String> = all("example.com").into_iter().map(|v| v.candidate).collect();

        assert_that(&first).is_equal_to(&second);
    }

    #[test]
    fn candidates_are_unique() {
        let variants = all("example.com");
        let unique: HashSet<&str> = variants.iter().map(|v| v.candidate.as_str()).collect();

        assert_that(&unique.len()).is_equal_to(variants.len());
    }

    #[test]
    fn no_candidate_equals_the_original() {
        for variant in all("example.com") {
            assert_that(&variant.candidate).is_not_equal_to("example.com".to_string());
        }
    }

    #[test]
    fn cap_is_a_hard_stop() {
        let variants = generator("example.com", Technique::ALL.to_vec(), 25).generate();

        assert_that(&variants).has_length(25);
    }

    #[test]
    fn homograph_cap_yields_exact_count() {
        let variants = generator("paypal.com", vec![Technique::Homograph], 10).generate();

        assert_that(&variants).has_length(10);
        for variant in &variants {
            let original: Vec<char> = "paypal.com".chars().collect();
            let candidate: Vec<char> = variant.candidate.chars().collect();
            assert_that(&candidate.len()).is_equal_to(original.len());

            let diffs: Vec<usize> = original
                .iter()
                .zip(candidate.iter())
                .enumerate()
                .filter(|(_, (a, b))| a != b)
                .map(|(i, _)| i)
                .collect();
            assert_that(&diffs).has_length(1);

            let position = diffs[0];
            let substitutes = tables::homoglyphs_for(original[position]).unwrap();
            assert_that(&substitutes.contains(&candidate[position])).is_true();
        }
    }

    #[test]
    fn tld_swap_produces_expected_alternatives() {
        let variants = generator("example.com", vec![Technique::TldSwap], 1000).generate();
        let candidates: HashSet<&str> = variants.iter().map(|v| v.candidate.as_str()).collect();

        assert_that(&candidates.contains("example.net")).is_true();
        assert_that(&candidates.contains("example.org")).is_true();
        assert_that(&candidates.contains("example.co.uk")).is_true();
        assert_that(&candidates.contains("example.com")).is_false();
        for variant in &variants {
            assert_that(&variant.technique.name()).is_equal_to("tld_swap");
        }
    }

    #[test]
    fn omission_needs_at_least_two_characters() {
        let variants = generator("a.com", vec![Technique::Omission], 1000).generate();

        assert_that(&variants).is_empty();
    }

    #[test]
    fn bitsquatting_differs_in_exactly_one_lowercase_letter() {
        let variants = generator("example.com", vec![Technique::Bitsquatting], 1000).generate();

        assert_that(&variants.is_empty()).is_false();
        for variant in variants {
            let original: Vec<char> = "example".chars().collect();
            let label = variant.candidate.strip_suffix(".com").unwrap();
            let candidate: Vec<char> = label.chars().collect();
            assert_that(&candidate.len()).is_equal_to(original.len());

            let diffs: Vec<(char, char)> = original
                .iter()
                .zip(candidate.iter())
                .filter(|(a, b)| a != b)
                .map(|(a, b)| (*a, *b))
                .collect();
            assert_that(&diffs).has_length(1);
            assert_that(&diffs[0].1.is_ascii_lowercase()).is_true();
        }
    }

    #[test]
    fn subdomain_variants_land_under_com() {
        let variants = generator("paypal.com", vec![Technique::Subdomain], 1000).generate();
        let candidates: Vec<&str> = variants.iter().map(|v| v.candidate.as_str()).collect();

        assert_that(&candidates.contains(&"paypal.login.com")).is_true();
        assert_that(&candidates.contains(&"paypal.secure.com")).is_true();
        assert_that(&variants).has_length(tables::SUBDOMAIN_LABELS.len());
    }

    #[test]
    fn hyphenated_target_also_loses_its_hyphens() {
        let variants = generator("my-bank.com", vec![Technique::Hyphenation], 1000).generate();
        let candidates: Vec<&str> = variants.iter().map(|v| v.candidate.as_str()).collect();

        assert_that(&candidates.contains(&"mybank.com")).is_true();
    }

    #[test]
    fn overlapping_techniques_keep_first_emitters_tag() {
        // Omission of one 'o' and collapsing the 'oo' run both reach
        // "fo.com"; omission runs earlier in canonical order and owns the
        // provenance tag.
        let variants = generator(
            "foo.com",
            vec![Technique::Omission, Technique::DoubleChar],
            1000,
        )
        .generate();

        let collapsed: Vec<_> = variants.iter().filter(|v| v.candidate == "fo.com").collect();
        assert_that(&collapsed).has_length(1);
        assert_that(&collapsed[0].technique).is_equal_to(Technique::Omission);
    }

    #[test]
    fn provenance_details_are_populated() {
        for variant in all("example.com") {
            assert_that(&variant.detail.is_empty()).is_false();
            assert_that(&Technique::ALL.contains(&variant.technique)).is_true();
        }
    }

    #[test]
    fn disabled_techniques_emit_nothing() {
        let variants = generator("example.com", vec![Technique::TldSwap], 1000).generate();

        for variant in variants {
            assert_that(&variant.technique).is_equal_to(Technique::TldSwap);
        }
    }

    #[test]
    fn prefix_and_suffix_entries_are_stripped() {
        let variants = generator(
            "example.com",
            vec![Technique::Prefix, Technique::Suffix],
            1000,
        )
        .generate();
        let candidates: Vec<&str> = variants.iter().map(|v| v.candidate.as_str()).collect();

        assert_that(&candidates.contains(&"secureexample.com")).is_true();
        assert_that(&candidates.contains(&"examplelogin.com")).is_true();
    }
}
