//! Minimal RFC 3912 WHOIS client and response parsing.
//!
//! WHOIS is the flakiest dependency of the whole pipeline: registries run
//! different servers, different formats, and aggressive rate limits. The
//! client keeps one strategy -- pick the registry server by TLD, send the
//! bare domain, read one response -- and the parser extracts just the fixed
//! key set the rest of the pipeline cares about. Anything it cannot make
//! sense of degrades to absent fields, never to a crash.

use std::time::Duration;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use indexmap::IndexMap;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time;
use tracing::{debug, trace};

use crate::services::{Error, Result};
use crate::variant::WhoisSummary;

const WHOIS_PORT: u16 = 43;
const MAX_RESPONSE_BYTES: u64 = 64 * 1024;

/// Registry WHOIS servers by TLD. Unknown TLDs go to IANA, which answers
/// for everything, just with less detail.
static WHOIS_SERVERS: &[(&str, &str)] = &[
    ("com", "whois.verisign-grs.com"),
    ("net", "whois.verisign-grs.com"),
    ("org", "whois.pir.org"),
    ("info", "whois.afilias.net"),
    ("biz", "whois.nic.biz"),
    ("us", "whois.nic.us"),
    ("co", "whois.nic.co"),
    ("io", "whois.nic.io"),
    ("me", "whois.nic.me"),
    ("app", "whois.nic.google"),
    ("dev", "whois.nic.google"),
    ("tech", "whois.nic.tech"),
    ("online", "whois.nic.online"),
    ("site", "whois.nic.site"),
    ("store", "whois.nic.store"),
    ("shop", "whois.nic.shop"),
    ("xyz", "whois.nic.xyz"),
    ("cloud", "whois.nic.cloud"),
    ("uk", "whois.nic.uk"),
    ("ca", "whois.cira.ca"),
    ("de", "whois.denic.de"),
    ("fr", "whois.afnic.fr"),
    ("es", "whois.nic.es"),
    ("it", "whois.nic.it"),
    ("nl", "whois.domain-registry.nl"),
    ("pl", "whois.dns.pl"),
    ("ru", "whois.tcinet.ru"),
    ("cn", "whois.cnnic.net.cn"),
    ("jp", "whois.jprs.jp"),
    ("au", "whois.auda.org.au"),
    ("br", "whois.registro.br"),
    ("in", "whois.registry.in"),
    ("nz", "whois.irs.net.nz"),
];

const FALLBACK_WHOIS_SERVER: &str = "whois.iana.org";

pub fn server_for_tld(tld: &str) -> &'static str {
    WHOIS_SERVERS
        .iter()
        .find(|(t, _)| *t == tld)
        .map(|(_, server)| *server)
        .unwrap_or(FALLBACK_WHOIS_SERVER)
}

static CREATION_DATE_KEYS: &[&str] = &[
    "creation date",
    "created",
    "created on",
    "registered on",
    "registration time",
];

static EXPIRATION_DATE_KEYS: &[&str] = &[
    "registry expiry date",
    "expiration date",
    "expiry date",
    "expires",
    "paid-till",
];

#[derive(Debug, Clone)]
pub struct WhoisClientOpts {
    timeout: Duration,
}

impl WhoisClientOpts {
    pub fn new(timeout: Duration) -> WhoisClientOpts {
        WhoisClientOpts { timeout }
    }
}

impl Default for WhoisClientOpts {
    fn default() -> Self {
        WhoisClientOpts::new(Duration::from_secs(10))
    }
}

#[derive(Debug, Clone)]
pub struct WhoisClient {
    opts: WhoisClientOpts,
}

impl WhoisClient {
    pub fn new(opts: WhoisClientOpts) -> WhoisClient {
        WhoisClient { opts }
    }

    /// Queries the registry for `domain` and parses whatever comes back.
    ///
    /// The domain must already be in its ASCII/Punycode form; registries do
    /// not answer for raw Unicode labels.
    pub async fn lookup(&self, domain: &str) -> Result<WhoisRecord> {
        let tld = domain.rsplit('.').next().unwrap_or_default();
        let server = server_for_tld(tld);
        debug!("querying WHOIS server {} for {}", server, domain);

        let raw = self.query_server(server, domain).await?;
        trace!("WHOIS response for {}: {} bytes", domain, raw.len());
        Ok(WhoisRecord::parse(domain, &raw))
    }

    async fn query_server(&self, server: &str, domain: &str) -> Result<String> {
        let io_error = |why: &'static str| {
            let server = server.to_string();
            move |source: std::io::Error| Error::WhoisIoError { server, why, source }
        };
        let timeout_error = |during: &'static str| Error::WhoisTimeout {
            server: server.to_string(),
            during,
        };

        let mut stream = time::timeout(self.opts.timeout, TcpStream::connect((server, WHOIS_PORT)))
            .await
            .map_err(|_| timeout_error("connecting"))?
            .map_err(io_error("connect failed"))?;

        let query = format!("{}\r\n", domain);
        time::timeout(self.opts.timeout, stream.write_all(query.as_bytes()))
            .await
            .map_err(|_| timeout_error("sending the query"))?
            .map_err(io_error("send failed"))?;

        let mut buf = Vec::new();
        let mut limited = stream.take(MAX_RESPONSE_BYTES);
        time::timeout(self.opts.timeout, limited.read_to_end(&mut buf))
            .await
            .map_err(|_| timeout_error("reading the response"))?
            .map_err(io_error("receive failed"))?;

        Ok(decode_response(&buf))
    }
}

/// Registries answer in UTF-8 these days, but a few legacy ones still emit
/// Latin-1; decode those byte-for-byte instead of failing.
fn decode_response(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

/// A parsed WHOIS response: a case-folded key to value-list multimap, with
/// accessors for the fields the pipeline consumes.
#[derive(Debug, Clone, Default)]
pub struct WhoisRecord {
    domain: String,
    fields: IndexMap<String, Vec<String>>,
}

impl WhoisRecord {
    pub fn parse(domain: &str, raw: &str) -> WhoisRecord {
        let mut fields: IndexMap<String, Vec<String>> = IndexMap::new();
        for line in raw.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('%') || line.starts_with('#') || line.starts_with(">>>") {
                continue;
            }
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim().to_lowercase();
            let value = value.trim();
            if key.is_empty() || value.is_empty() {
                continue;
            }
            fields.entry(key).or_default().push(value.to_string());
        }

        WhoisRecord {
            domain: domain.to_string(),
            fields,
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// First value of the first key that is present.
    pub fn first(&self, keys: &[&str]) -> Option<&str> {
        keys.iter()
            .filter_map(|key| self.fields.get(*key))
            .flat_map(|values| values.iter())
            .map(|value| value.as_str())
            .next()
    }

    /// All values across the given keys, in response order.
    pub fn all(&self, keys: &[&str]) -> Vec<&str> {
        keys.iter()
            .filter_map(|key| self.fields.get(*key))
            .flat_map(|values| values.iter())
            .map(|value| value.as_str())
            .collect()
    }

    /// The registration instant, if the registry provided a usable one.
    ///
    /// Registries disagree on the shape: some repeat the key (a list; the
    /// first entry wins), some send a full timestamp, some only a
    /// `YYYY-MM-DD` date. An unparsable value yields `None`.
    pub fn creation_date(&self) -> Option<DateTime<Utc>> {
        self.first(CREATION_DATE_KEYS).and_then(parse_timestamp)
    }

    pub fn registrar(&self) -> Option<String> {
        self.first(&["registrar"]).map(|value| value.to_string())
    }

    /// Projects the response onto the fixed key set carried by variants.
    pub fn summary(&self) -> WhoisSummary {
        let name_servers = self.all(&["name server", "nserver"]);
        WhoisSummary {
            domain_name: self.first(&["domain name", "domain"]).map(str::to_string),
            registrar: self.registrar(),
            creation_date: self.first(CREATION_DATE_KEYS).map(str::to_string),
            expiration_date: self.first(EXPIRATION_DATE_KEYS).map(str::to_string),
            name_servers: if name_servers.is_empty() {
                None
            } else {
                Some(name_servers.join(", "))
            },
            org: self
                .first(&["registrant organization", "organization", "org"])
                .map(str::to_string),
            country: self.first(&["registrant country", "country"]).map(str::to_string),
        }
    }
}

/// Parses the timestamp shapes seen in the wild, most common first.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Some(instant.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }
    for format in ["%Y-%m-%d", "%d-%b-%Y", "%Y.%m.%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
        }
    }

    None
}
