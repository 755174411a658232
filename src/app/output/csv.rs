use crate::report::Report;
use crate::variant::Variant;

use super::*;

static HEADER: &[&str] = &[
    "candidate",
    "original",
    "technique",
    "detail",
    "registered",
    "trust_level",
    "risk_score",
    "age_days",
    "creation_date",
    "registrar",
    "error",
];

#[derive(Debug, Default)]
pub struct CsvOptions {
    /// Also emit rows for candidates that did not resolve.
    pub include_unregistered: bool,
}

#[derive(Debug, Default)]
pub struct CsvFormat {
    opts: CsvOptions,
}

impl CsvFormat {
    pub fn new(opts: CsvOptions) -> CsvFormat {
        CsvFormat { opts }
    }

    fn row(variant: &Variant) -> Vec<String> {
        vec![
            variant.candidate.clone(),
            variant.original.clone(),
            variant.technique.name().to_string(),
            variant.detail.clone(),
            variant.registered.to_string(),
            variant.trust_level.to_string(),
            variant.risk_score.to_string(),
            variant.age_days.map(|age| age.to_string()).unwrap_or_default(),
            variant
                .creation_date
                .map(|instant| instant.to_rfc3339())
                .unwrap_or_default(),
            variant.registrar.clone().unwrap_or_default(),
            variant.error.clone().unwrap_or_default(),
        ]
    }
}

impl OutputFormat<Report> for CsvFormat {
    fn output<W: Write>(&self, writer: &mut W, report: &Report) -> Result<()> {
        writeln!(writer, "{}", HEADER.join(","))?;
        for variant in &report.variants {
            if !variant.registered && !self.opts.include_unregistered {
                continue;
            }
            let fields: Vec<String> = CsvFormat::row(variant).iter().map(|f| escape(f)).collect();
            writeln!(writer, "{}", fields.join(","))?;
        }
        Ok(())
    }
}

/// RFC 4180 quoting; only fields that need it are wrapped.
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use spectral::prelude::*;

    use crate::variant::Technique;

    use super::*;

    fn report() -> Report {
        let mut registered = Variant::new("example.com", "example.net", Technique::TldSwap, "tld 'com' -> 'net'");
        registered.registered = true;
        registered.registrar = Some("Registrar, with comma".to_string());
        registered.classify(Utc::now(), 730);

        let mut missing = Variant::new("example.com", "examqle.com", Technique::Typo, "'p' -> 'q' at position 4");
        missing.classify(Utc::now(), 730);

        Report::new("example.com".to_string(), Utc::now(), vec![registered, missing])
    }

    #[test]
    fn header_and_registered_rows() {
        let mut buf = Vec::new();
        CsvFormat::new(CsvOptions::default()).output(&mut buf, &report()).unwrap();
        let rendered = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_that(&lines[0].starts_with("candidate,original,technique")).is_true();
        assert_that(&lines).has_length(2);
        assert_that(&lines[1].contains("example.net")).is_true();
    }

    #[test]
    fn unregistered_rows_are_opt_in() {
        let mut buf = Vec::new();
        let opts = CsvOptions {
            include_unregistered: true,
        };
        CsvFormat::new(opts).output(&mut buf, &report()).unwrap();
        let rendered = String::from_utf8(buf).unwrap();

        assert_that(&rendered.lines().count()).is_equal_to(3);
        assert_that(&rendered.contains("examqle.com")).is_true();
    }

    #[test]
    fn fields_with_commas_are_quoted() {
        let mut buf = Vec::new();
        CsvFormat::new(CsvOptions::default()).output(&mut buf, &report()).unwrap();
        let rendered = String::from_utf8(buf).unwrap();

        assert_that(&rendered.contains("\"Registrar, with comma\"")).is_true();
    }

    #[test]
    fn escape_doubles_quotes() {
        assert_that(&escape("plain")).is_equal_to("plain".to_string());
        assert_that(&escape("a,b")).is_equal_to("\"a,b\"".to_string());
        assert_that(&escape("say \"hi\"")).is_equal_to("\"say \"\"hi\"\"\"".to_string());
    }
}
