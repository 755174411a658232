//! Concurrent triage of candidate variants.
//!
//! [`Analyzer::analyze_all`] drives a bounded pool of workers over the
//! candidate list. Each worker owns its variant for the duration: DNS
//! decides whether the candidate is registered, WHOIS (when enabled and the
//! candidate resolved) supplies the registration age, and the trust bucket
//! is derived at the end. Workers sleep briefly after every completion to
//! stay under registry rate limits, and a failure in one variant is stored
//! on that variant instead of aborting the batch. Completion order is
//! nondeterministic; the aggregator re-sorts.

use std::sync::Arc;

use chrono::Utc;
use futures::stream::{self, StreamExt};
use tokio::time;
use tracing::{debug, info, warn};

use crate::config::AnalysisConfig;
use crate::resolver::{DnsClient, DnsClientOpts};
use crate::services::whois::{WhoisClient, WhoisClientOpts, WhoisRecord};
use crate::resolver;
use crate::utils::buffer_unordered_cancellable::{
    CancellationFlag, StreamExtBufferUnorderedCancellable,
};
use crate::variant::Variant;

pub struct Analyzer {
    config: Arc<AnalysisConfig>,
    dns: DnsClient,
    whois: WhoisClient,
    cancellation: CancellationFlag,
}

impl Analyzer {
    pub fn new(config: Arc<AnalysisConfig>) -> Analyzer {
        let dns = DnsClient::new(DnsClientOpts {
            query_timeout: config.query_timeout(),
        });
        let whois = WhoisClient::new(WhoisClientOpts::new(config.whois_timeout()));

        Analyzer {
            config,
            dns,
            whois,
            cancellation: CancellationFlag::new(),
        }
    }

    /// A handle callers keep to stop the pool early. Raising it prevents
    /// workers from pulling further variants; in-flight queries finish
    /// within their timeouts and their results are still returned.
    pub fn cancellation(&self) -> CancellationFlag {
        self.cancellation.clone()
    }

    /// Analyzes the whole candidate list on a bounded worker pool.
    ///
    /// The returned order is completion order, not input order.
    pub async fn analyze_all(&self, variants: Vec<Variant>) -> Vec<Variant> {
        let total = variants.len();
        info!(
            "analyzing {} candidates with {} workers",
            total,
            self.config.workers()
        );

        let futures: Vec<_> = variants
            .into_iter()
            .map(|variant| self.analyze_throttled(variant))
            .collect();

        let analyzed: Vec<Variant> = stream::iter(futures)
            .buffered_unordered_cancellable(self.config.workers(), self.cancellation.clone())
            .collect()
            .await;

        if analyzed.len() < total {
            info!(
                "analysis cancelled after {} of {} candidates",
                analyzed.len(),
                total
            );
        }
        analyzed
    }

    async fn analyze_throttled(&self, variant: Variant) -> Variant {
        let variant = self.analyze(variant).await;
        // Spread completions out; registries notice bursts long before they
        // notice volume.
        if !self.config.throttle().is_zero() {
            time::sleep(self.config.throttle()).await;
        }
        variant
    }

    /// Analyzes one variant: DNS, then WHOIS, then classification.
    ///
    /// Never fails; lookup errors end up in the variant's `error` field and
    /// the variant keeps whatever state was established before the failure.
    pub async fn analyze(&self, mut variant: Variant) -> Variant {
        if self.cancellation.is_cancelled() {
            return variant;
        }

        if self.config.check_dns() {
            self.dns_step(&mut variant).await;
        }
        if variant.registered && self.config.check_whois() {
            self.whois_step(&mut variant).await;
        }

        variant.classify(Utc::now(), self.config.trust_threshold_days());
        debug!(
            "{}: registered={} trust={}",
            variant.candidate, variant.registered, variant.trust_level
        );
        variant
    }

    async fn dns_step(&self, variant: &mut Variant) {
        match self.dns.query(&variant.candidate).await {
            Ok(answers) => {
                variant.registered = answers.is_registered();
                variant.dns_records = answers.records;
                if let Some(err) = answers.error {
                    variant.error = Some(err.to_string());
                }
            }
            Err(err) => {
                warn!("DNS analysis of {} failed: {}", variant.candidate, err);
                variant.error = Some(err.to_string());
            }
        }
    }

    async fn whois_step(&self, variant: &mut Variant) {
        let ascii = match resolver::to_ascii(&variant.candidate) {
            Ok(ascii) => ascii,
            Err(err) => {
                variant.error = Some(err.to_string());
                return;
            }
        };

        match self.whois.lookup(&ascii).await {
            Ok(record) => apply_whois(variant, &record),
            Err(err) => {
                warn!("WHOIS lookup for {} failed: {}", variant.candidate, err);
                variant.error = Some(err.to_string());
            }
        }
    }
}

fn apply_whois(variant: &mut Variant, record: &WhoisRecord) {
    variant.whois = record.summary();
    variant.creation_date = record.creation_date();
    variant.registrar = record.registrar();
}
