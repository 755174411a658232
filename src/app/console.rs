use std::fmt;
use std::io::Write;

use tabwriter::TabWriter;
use yansi::Paint;

use crate::app::output::styles::{
    self, ATTENTION_PREFIX, CAPTION_PREFIX, ERROR_PREFIX, FINISHED_PREFIX, INFO_PREFIX,
    ITEMAZATION_PREFIX,
};
use crate::app::AppConfig;
use crate::config::AnalysisConfig;
use crate::report::Report;
use crate::target::Target;
use crate::variant::{Technique, Variant};
use crate::{Error, Result};

#[derive(Debug, Default)]
pub struct ConsoleOpts {
    quiet: bool,
    include_unregistered: bool,
}

impl From<&AppConfig> for ConsoleOpts {
    fn from(app_config: &AppConfig) -> Self {
        ConsoleOpts {
            quiet: app_config.quiet,
            include_unregistered: app_config.include_unregistered,
        }
    }
}

#[derive(Debug)]
pub struct Console {
    opts: ConsoleOpts,
}

impl Console {
    pub fn new(opts: ConsoleOpts) -> Console {
        Console { opts }
    }

    pub fn not_quiet(&self) -> bool {
        !self.opts.quiet
    }

    pub fn caption<T: fmt::Display>(&self, msg: T) {
        if self.not_quiet() {
            eprintln!("{} {}", &*CAPTION_PREFIX, msg);
        }
    }

    pub fn info<T: fmt::Display>(&self, msg: T) {
        if self.not_quiet() {
            eprintln!("{} {}", &*INFO_PREFIX, msg);
        }
    }

    pub fn attention<T: fmt::Display>(&self, msg: T) {
        if self.not_quiet() {
            eprintln!("{} {}", &*ATTENTION_PREFIX, msg.paint(styles::ATTENTION));
        }
    }

    pub fn error<T: fmt::Display>(&self, msg: T) {
        eprintln!("{} {}", &*ERROR_PREFIX, msg.paint(styles::ERROR));
    }

    pub fn finished(&self) {
        if self.not_quiet() {
            eprintln!("{} {}", &*FINISHED_PREFIX, "Finished.".paint(styles::OK));
        }
    }

    pub fn print_run_header(&self, target: &Target, config: &AnalysisConfig) {
        self.caption(format!(
            "{}: target={}, threshold={}d, max candidates={}, techniques={}, workers={}, timeout={}s{}{}",
            "Options".paint(styles::EMPH),
            target,
            config.trust_threshold_days(),
            config.max_variants(),
            if config.techniques().len() == Technique::ALL.len() {
                "all".to_string()
            } else {
                config.techniques().len().to_string()
            },
            config.workers(),
            config.query_timeout().as_secs(),
            if config.check_dns() { "" } else { ", dns off" },
            if config.check_whois() { "" } else { ", whois off" },
        ));
    }

    pub fn print_techniques(&self) {
        for technique in Technique::ALL {
            println!(
                " {} {}\t{}",
                &*ITEMAZATION_PREFIX,
                technique.name().paint(styles::EMPH),
                technique.description()
            );
        }
    }

    /// The human-facing result table, highest risk first.
    pub fn print_report(&self, report: &Report) -> Result<()> {
        let shown: Vec<&Variant> = if self.opts.include_unregistered {
            report.variants.iter().collect()
        } else {
            report.registered_only()
        };

        if shown.is_empty() {
            self.info("No registered look-alike domains found.");
        } else {
            let mut tw = TabWriter::new(vec![]);
            writeln!(tw, "RISK\tTRUST\tCANDIDATE\tTECHNIQUE\tAGE\tCREATED\tREGISTRAR")?;
            for variant in shown {
                writeln!(tw, "{}", render_row(variant))?;
            }

            let text_buffer = tw.into_inner().map_err(|_| Error::InternalError {
                msg: "finish TabWriter buffer",
            })?;
            let out = String::from_utf8(text_buffer).map_err(|_| Error::InternalError {
                msg: "convert TabWriter buffer to output",
            })?;
            print!("{}", out);
        }

        self.print_summary(report);
        Ok(())
    }

    fn print_summary(&self, report: &Report) {
        if !self.not_quiet() {
            return;
        }
        let summary = &report.summary;
        self.info(format!(
            "{} candidates checked: {} registered, {} critical, {} high risk, {} suspicious, {} unknown",
            summary.total,
            summary.registered,
            summary.critical.paint(styles::ERROR),
            summary.high_risk.paint(styles::ERROR),
            summary.suspicious.paint(styles::ATTENTION),
            summary.unknown,
        ));
        if report.has_suspicious() {
            self.attention("young look-alike registrations found; inspect them before someone else does");
        }
    }
}

fn render_row(variant: &Variant) -> String {
    let style = styles::trust_style(variant.trust_level);
    let age = variant
        .age_days
        .map(|age| format!("{}d", age))
        .unwrap_or_else(|| "-".to_string());
    let created = variant
        .creation_date
        .map(|instant| instant.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string());
    let registrar = variant.registrar.as_deref().unwrap_or("-");

    format!(
        "{}\t{}\t{}\t{}\t{}\t{}\t{}",
        variant.risk_score,
        variant.trust_level.paint(style),
        variant.candidate,
        variant.technique,
        age,
        created,
        registrar,
    )
}

#[cfg(test)]
mod tests {
    use spectral::prelude::*;

    use crate::variant::TrustLevel;

    use super::*;

    #[test]
    fn rows_render_placeholders_for_absent_fields() {
        let variant = Variant::new("example.com", "example.net", Technique::TldSwap, "tld 'com' -> 'net'");

        let row = render_row(&variant);

        assert_that(&row.contains("example.net")).is_true();
        assert_that(&row.contains("tld_swap")).is_true();
        assert_that(&row.matches("\t-").count()).is_equal_to(3);
    }

    #[test]
    fn rows_show_age_and_creation() {
        let mut variant = Variant::new("example.com", "example.net", Technique::TldSwap, "tld 'com' -> 'net'");
        variant.registered = true;
        variant.creation_date = Some(chrono::Utc::now() - chrono::Duration::days(45));
        variant.classify(chrono::Utc::now(), 730);

        let row = render_row(&variant);

        assert_that(&row.contains("45d")).is_true();
        assert_that(&variant.trust_level).is_equal_to(TrustLevel::HighRisk);
    }
}
