use serde::Serialize;

use crate::{Error, Result};

/// Registrable suffixes that span more than one label. Splitting on the last
/// dot alone would cut `example.co.uk` into `(example.co, uk)`.
static MULTI_LABEL_SUFFIXES: &[&str] = &[
    "co.uk", "org.uk", "me.uk", "ac.uk", "gov.uk", "com.au", "net.au", "org.au", "co.nz", "co.jp",
    "ne.jp", "or.jp", "co.in", "net.in", "org.in", "com.br", "net.br", "org.br", "co.za", "com.mx",
    "com.cn", "com.tw", "com.sg", "com.hk",
];

/// A target domain reduced to the label under scrutiny and its public suffix.
///
/// Parsing is forgiving on purpose: users paste URLs, hostnames with a
/// `www.` label, or bare names without a TLD.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Target {
    name: String,
    tld: String,
}

impl Target {
    /// Parses a raw target string into `(name, tld)`.
    ///
    /// Strips a leading scheme and anything from the first slash onward,
    /// drops a single leading `www.` label, and lowercases the rest. The
    /// suffix is recognized with the multi-label table above, falling back
    /// to a last-dot split; a dotless input defaults to `com`.
    pub fn parse(input: &str) -> Result<Target> {
        let mut rest = input.trim();

        if let Some(idx) = rest.find("://") {
            rest = &rest[idx + 3..];
        }
        if let Some(idx) = rest.find('/') {
            rest = &rest[..idx];
        }

        let lowered = rest.to_lowercase();
        let mut host = lowered.as_str();
        if let Some(stripped) = host.strip_prefix("www.") {
            host = stripped;
        }

        if host.is_empty() {
            return Err(Error::InvalidTarget {
                target: input.to_string(),
                reason: "no domain name left after stripping scheme and path",
            });
        }

        let (name, tld) = split_suffix(host);
        if name.is_empty() {
            return Err(Error::InvalidTarget {
                target: input.to_string(),
                reason: "domain has an empty label",
            });
        }

        Ok(Target {
            name: name.to_string(),
            tld: tld.to_string(),
        })
    }

    /// The label part the generator mutates, e.g. `example` for `example.com`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The public suffix, e.g. `com` or `co.uk`.
    pub fn tld(&self) -> &str {
        &self.tld
    }

    /// The canonical `name.tld` form.
    pub fn fqdn(&self) -> String {
        format!("{}.{}", self.name, self.tld)
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.name, self.tld)
    }
}

fn split_suffix(host: &str) -> (&str, &str) {
    for suffix in MULTI_LABEL_SUFFIXES {
        if let Some(name) = host.strip_suffix(suffix) {
            if let Some(name) = name.strip_suffix('.') {
                if !name.is_empty() {
                    return (name, suffix);
                }
            }
        }
    }
    match host.rfind('.') {
        Some(idx) => (&host[..idx], &host[idx + 1..]),
        None => (host, "com"),
    }
}

#[cfg(test)]
mod tests {
    use spectral::prelude::*;

    use super::*;

    fn parsed(input: &str) -> Target {
        Target::parse(input).expect("target must parse")
    }

    #[test]
    fn plain_domain() {
        let target = parsed("example.com");

        assert_that(&target.name()).is_equal_to("example");
        assert_that(&target.tld()).is_equal_to("com");
        assert_that(&target.fqdn()).is_equal_to("example.com".to_string());
    }

    #[test]
    fn strips_scheme_path_and_www() {
        let target = parsed("https://www.example.com/login?next=/home");

        assert_that(&target.name()).is_equal_to("example");
        assert_that(&target.tld()).is_equal_to("com");
    }

    #[test]
    fn lowercases() {
        let target = parsed("ExAmPlE.CoM");

        assert_that(&target.fqdn()).is_equal_to("example.com".to_string());
    }

    #[test]
    fn multi_label_suffix_stays_together() {
        let target = parsed("example.co.uk");

        assert_that(&target.name()).is_equal_to("example");
        assert_that(&target.tld()).is_equal_to("co.uk");
    }

    #[test]
    fn subdomain_splits_on_last_dot() {
        let target = parsed("login.example.com");

        assert_that(&target.name()).is_equal_to("login.example");
        assert_that(&target.tld()).is_equal_to("com");
    }

    #[test]
    fn dotless_input_defaults_to_com() {
        let target = parsed("example");

        assert_that(&target.name()).is_equal_to("example");
        assert_that(&target.tld()).is_equal_to("com");
    }

    #[test]
    fn empty_input_is_rejected() {
        let res = Target::parse("   ");

        assert_that(&res).is_err();
    }

    #[test]
    fn scheme_only_input_is_rejected() {
        let res = Target::parse("https://");

        assert_that(&res).is_err();
    }
}
