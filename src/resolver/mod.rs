//! DNS existence checks for candidate domains.
//!
//! Uses the system resolver configuration when it is readable and falls
//! back to plain host lookups (A records only) when it is not. Candidates
//! may contain raw Unicode; they are IDNA-encoded right before the query
//! and the stored candidate string is never altered.

use std::time::Duration;

use indexmap::IndexMap;
use tokio::time;
use tracing::{debug, trace, warn};
use trust_dns_resolver::error::ResolveErrorKind;
use trust_dns_resolver::proto::rr::RecordType;
use trust_dns_resolver::TokioAsyncResolver;

use crate::variant::RecordKind;

pub mod error;

pub use error::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Encodes a domain to its IDNA/Punycode ASCII form for the wire.
pub fn to_ascii(domain: &str) -> Result<String> {
    idna::domain_to_ascii(domain).map_err(|err| Error::InvalidName {
        name: domain.to_string(),
        reason: err.to_string(),
    })
}

fn record_type(kind: RecordKind) -> RecordType {
    match kind {
        RecordKind::A => RecordType::A,
        RecordKind::Aaaa => RecordType::AAAA,
        RecordKind::Mx => RecordType::MX,
        RecordKind::Ns => RecordType::NS,
    }
}

#[derive(Debug, Clone)]
pub struct DnsClientOpts {
    pub query_timeout: Duration,
}

impl Default for DnsClientOpts {
    fn default() -> Self {
        DnsClientOpts {
            query_timeout: Duration::from_secs(5),
        }
    }
}

#[derive(Debug)]
enum Backend {
    Resolver(TokioAsyncResolver),
    HostLookup,
}

/// The answers DNS produced for one candidate, plus the first hard error
/// met along the way. Soft misses -- NXDOMAIN, empty answers, timeouts --
/// are not errors, they just leave the map empty.
#[derive(Debug, Default)]
pub struct DnsAnswers {
    pub records: IndexMap<RecordKind, Vec<String>>,
    pub error: Option<Error>,
}

impl DnsAnswers {
    pub fn is_registered(&self) -> bool {
        !self.records.is_empty()
    }
}

#[derive(Debug)]
pub struct DnsClient {
    backend: Backend,
    opts: DnsClientOpts,
}

impl DnsClient {
    /// Builds a client on the system resolver configuration; without one,
    /// queries degrade to A-only host lookups.
    pub fn new(opts: DnsClientOpts) -> DnsClient {
        let backend = match TokioAsyncResolver::tokio_from_system_conf() {
            Ok(resolver) => Backend::Resolver(resolver),
            Err(err) => {
                warn!(
                    "system resolver configuration unusable, degrading to host lookups: {}",
                    err
                );
                Backend::HostLookup
            }
        };
        DnsClient { backend, opts }
    }

    /// Queries A, AAAA, MX, and NS for the candidate.
    ///
    /// Fails only on an unencodable name; per-kind resolution errors are
    /// collected into [`DnsAnswers::error`] so partial answers survive.
    pub async fn query(&self, domain: &str) -> Result<DnsAnswers> {
        let ascii = to_ascii(domain)?;
        if ascii != domain {
            trace!("querying {} as {}", domain, ascii);
        }

        let mut answers = DnsAnswers::default();
        match &self.backend {
            Backend::Resolver(resolver) => {
                for kind in RecordKind::ALL {
                    match self.lookup_kind(resolver, &ascii, kind).await {
                        Ok(Some(values)) => {
                            answers.records.insert(kind, values);
                        }
                        Ok(None) => {}
                        Err(err) => {
                            warn!("{} lookup for {} failed: {}", kind, ascii, err);
                            if answers.error.is_none() {
                                answers.error = Some(err);
                            }
                        }
                    }
                }
            }
            Backend::HostLookup => {
                if let Some(values) = self.host_lookup(&ascii).await {
                    answers.records.insert(RecordKind::A, values);
                }
            }
        }

        debug!(
            "{}: {} record kinds present",
            domain,
            answers.records.len()
        );
        Ok(answers)
    }

    async fn lookup_kind(
        &self,
        resolver: &TokioAsyncResolver,
        name: &str,
        kind: RecordKind,
    ) -> Result<Option<Vec<String>>> {
        let lookup = time::timeout(self.opts.query_timeout, resolver.lookup(name, record_type(kind))).await;
        match lookup {
            Err(_elapsed) => {
                trace!("{} lookup for {} timed out", kind, name);
                Ok(None)
            }
            Ok(Ok(lookup)) => {
                let values: Vec<String> = lookup
                    .record_iter()
                    .filter_map(|record| record.data().map(|data| data.to_string()))
                    .collect();
                Ok(if values.is_empty() { None } else { Some(values) })
            }
            Ok(Err(err)) => match err.kind() {
                ResolveErrorKind::NoRecordsFound { .. } | ResolveErrorKind::Timeout => Ok(None),
                // The resolver reports "no nameservers to ask" as a plain
                // message; for us that is another flavor of "not present".
                _ if err.to_string().contains("no connections available") => Ok(None),
                _ => Err(Error::from(err)),
            },
        }
    }

    async fn host_lookup(&self, name: &str) -> Option<Vec<String>> {
        let lookup = time::timeout(self.opts.query_timeout, tokio::net::lookup_host((name, 0u16))).await;
        match lookup {
            Err(_elapsed) => {
                trace!("host lookup for {} timed out", name);
                None
            }
            Ok(Err(err)) => {
                trace!("host lookup for {} failed: {}", name, err);
                None
            }
            Ok(Ok(addrs)) => {
                let mut values: Vec<String> = Vec::new();
                for addr in addrs {
                    if addr.is_ipv4() {
                        let ip = addr.ip().to_string();
                        if !values.contains(&ip) {
                            values.push(ip);
                        }
                    }
                }
                if values.is_empty() {
                    None
                } else {
                    Some(values)
                }
            }
        }
    }
}
