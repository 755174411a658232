use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("WHOIS query to {server} failed: {why}")]
    WhoisIoError {
        server: String,
        why: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("WHOIS query to {server} timed out while {during}")]
    WhoisTimeout { server: String, during: &'static str },
}
