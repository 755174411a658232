use std::convert::TryFrom;
use std::path::PathBuf;
use std::time::Duration;

use clap::ArgMatches;

use crate::app::output::OutputType;
use crate::config::AnalysisConfig;
use crate::variant::Technique;
use crate::Error;

/// Everything the CLI surface decided; the core pipeline only ever sees the
/// [`AnalysisConfig`] carved out of this.
#[derive(Debug)]
pub struct AppConfig {
    pub target: Option<String>,
    pub trust_threshold_days: i64,
    pub max_variants: usize,
    pub workers: usize,
    pub query_timeout: Duration,
    pub whois_timeout: Duration,
    pub techniques: Vec<Technique>,
    pub check_dns: bool,
    pub check_whois: bool,
    pub output: OutputType,
    pub output_file: Option<PathBuf>,
    pub include_unregistered: bool,
    pub list_techniques: bool,
    pub quiet: bool,
    pub no_color: bool,
    pub verbosity: u8,
}

impl AppConfig {
    pub fn analysis_config(&self) -> AnalysisConfig {
        AnalysisConfig::new(self.target.clone().unwrap_or_default())
            .with_trust_threshold_days(self.trust_threshold_days)
            .with_max_variants(self.max_variants)
            .with_workers(self.workers)
            .with_query_timeout(self.query_timeout)
            .with_whois_timeout(self.whois_timeout)
            .with_techniques(self.techniques.clone())
            .with_dns(self.check_dns)
            .with_whois(self.check_whois)
    }
}

fn parse_techniques(values: Vec<&str>) -> Result<Vec<Technique>, Error> {
    if values.iter().any(|value| value.trim().eq_ignore_ascii_case("all")) {
        return Ok(Technique::ALL.to_vec());
    }
    let mut techniques = Vec::new();
    for value in values {
        let technique: Technique = value.parse()?;
        if !techniques.contains(&technique) {
            techniques.push(technique);
        }
    }
    Ok(techniques)
}

impl TryFrom<&ArgMatches> for AppConfig {
    type Error = Error;

    fn try_from(args: &ArgMatches) -> Result<Self, Self::Error> {
        let techniques = parse_techniques(
            args.get_many::<String>("techniques")
                .map(|values| values.map(String::as_str).collect())
                .unwrap_or_default(),
        )?;
        let output = OutputType::try_from(
            args.get_one::<String>("output")
                .map(String::as_str)
                .unwrap_or("summary"),
        )?;

        Ok(AppConfig {
            target: args.get_one::<String>("domain").cloned(),
            // Safe unwraps, because of Clap's default values
            trust_threshold_days: *args.get_one::<i64>("threshold").unwrap(),
            max_variants: *args.get_one::<usize>("max-variants").unwrap(),
            workers: *args.get_one::<usize>("threads").unwrap(),
            query_timeout: Duration::from_secs(*args.get_one::<u64>("timeout").unwrap()),
            whois_timeout: Duration::from_secs(*args.get_one::<u64>("whois-timeout").unwrap()),
            techniques,
            check_dns: !args.get_flag("no-dns"),
            check_whois: !args.get_flag("no-whois"),
            output,
            output_file: args.get_one::<String>("output-file").map(PathBuf::from),
            include_unregistered: args.get_flag("include-unregistered"),
            list_techniques: args.get_flag("list-techniques"),
            quiet: args.get_flag("quiet"),
            no_color: args.get_flag("no-color"),
            verbosity: args.get_count("verbosity"),
        })
    }
}
