use std::time::Duration;

use crate::variant::Technique;

pub const DEFAULT_TRUST_THRESHOLD_DAYS: i64 = 730;
pub const DEFAULT_MAX_VARIANTS: usize = 1000;
pub const DEFAULT_WORKERS: usize = 10;
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_WHOIS_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_THROTTLE: Duration = Duration::from_millis(100);

/// Immutable configuration for one analysis run.
///
/// Constructed once, then shared read-only between the generator and the
/// analyzer workers. The builder methods consume and return `self` so a
/// config reads as one expression at the call site.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    target: String,
    trust_threshold_days: i64,
    max_variants: usize,
    techniques: Vec<Technique>,
    check_dns: bool,
    check_whois: bool,
    workers: usize,
    query_timeout: Duration,
    whois_timeout: Duration,
    throttle: Duration,
}

impl AnalysisConfig {
    pub fn new<T: Into<String>>(target: T) -> AnalysisConfig {
        AnalysisConfig {
            target: target.into(),
            trust_threshold_days: DEFAULT_TRUST_THRESHOLD_DAYS,
            max_variants: DEFAULT_MAX_VARIANTS,
            techniques: Technique::ALL.to_vec(),
            check_dns: true,
            check_whois: true,
            workers: DEFAULT_WORKERS,
            query_timeout: DEFAULT_QUERY_TIMEOUT,
            whois_timeout: DEFAULT_WHOIS_TIMEOUT,
            throttle: DEFAULT_THROTTLE,
        }
    }

    pub fn with_trust_threshold_days(mut self, days: i64) -> Self {
        self.trust_threshold_days = days;
        self
    }

    pub fn with_max_variants(mut self, max: usize) -> Self {
        self.max_variants = max;
        self
    }

    /// Restricts generation to the given techniques. The generator still
    /// runs them in their canonical order, not in the order given here.
    pub fn with_techniques(mut self, techniques: Vec<Technique>) -> Self {
        self.techniques = techniques;
        self
    }

    pub fn with_dns(mut self, check_dns: bool) -> Self {
        self.check_dns = check_dns;
        self
    }

    pub fn with_whois(mut self, check_whois: bool) -> Self {
        self.check_whois = check_whois;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn with_query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = timeout;
        self
    }

    pub fn with_whois_timeout(mut self, timeout: Duration) -> Self {
        self.whois_timeout = timeout.max(self.query_timeout);
        self
    }

    pub fn with_throttle(mut self, throttle: Duration) -> Self {
        self.throttle = throttle;
        self
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn trust_threshold_days(&self) -> i64 {
        self.trust_threshold_days
    }

    pub fn max_variants(&self) -> usize {
        self.max_variants
    }

    pub fn techniques(&self) -> &[Technique] {
        &self.techniques
    }

    pub fn technique_enabled(&self, technique: Technique) -> bool {
        self.techniques.contains(&technique)
    }

    pub fn check_dns(&self) -> bool {
        self.check_dns
    }

    pub fn check_whois(&self) -> bool {
        self.check_whois
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn query_timeout(&self) -> Duration {
        self.query_timeout
    }

    pub fn whois_timeout(&self) -> Duration {
        self.whois_timeout
    }

    pub fn throttle(&self) -> Duration {
        self.throttle
    }
}

#[cfg(test)]
mod tests {
    use spectral::prelude::*;

    use super::*;

    #[test]
    fn defaults() {
        let config = AnalysisConfig::new("example.com");

        assert_that(&config.trust_threshold_days()).is_equal_to(730);
        assert_that(&config.max_variants()).is_equal_to(1000);
        assert_that(&config.techniques().len()).is_equal_to(16);
        assert_that(&config.check_dns()).is_true();
        assert_that(&config.check_whois()).is_true();
        assert_that(&config.workers()).is_equal_to(10);
        assert_that(&config.throttle()).is_equal_to(Duration::from_millis(100));
    }

    #[test]
    fn worker_count_never_drops_to_zero() {
        let config = AnalysisConfig::new("example.com").with_workers(0);

        assert_that(&config.workers()).is_equal_to(1);
    }

    #[test]
    fn whois_timeout_is_at_least_the_query_timeout() {
        let config = AnalysisConfig::new("example.com")
            .with_query_timeout(Duration::from_secs(7))
            .with_whois_timeout(Duration::from_secs(2));

        assert_that(&config.whois_timeout()).is_equal_to(Duration::from_secs(7));
    }

    #[test]
    fn technique_selection() {
        let config =
            AnalysisConfig::new("example.com").with_techniques(vec![Technique::TldSwap, Technique::Homograph]);

        assert_that(&config.technique_enabled(Technique::TldSwap)).is_true();
        assert_that(&config.technique_enabled(Technique::Omission)).is_false();
    }
}
