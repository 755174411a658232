use clap::{Arg, ArgAction, Command};

pub static SUPPORTED_OUTPUT_FORMATS: &[&str] = &["summary", "json", "csv"];

pub fn create_parser() -> Command {
    Command::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .arg(
            Arg::new("domain")
                .value_name("DOMAIN")
                .index(1)
                .required_unless_present("list-techniques")
                .help("Target domain to check for look-alikes; URLs and www. prefixes are tolerated"),
        )
        .arg(
            Arg::new("threshold")
                .long("threshold")
                .value_name("DAYS")
                .default_value("730")
                .value_parser(clap::value_parser!(i64))
                .help("Registration age in days above which a domain counts as established"),
        )
        .arg(
            Arg::new("max-variants")
                .long("max-variants")
                .short('m')
                .value_name("NUMBER")
                .default_value("1000")
                .value_parser(clap::value_parser!(usize))
                .help("Hard cap on the number of generated candidates"),
        )
        .arg(
            Arg::new("threads")
                .long("threads")
                .value_name("NUMBER")
                .default_value("10")
                .value_parser(clap::value_parser!(usize))
                .help("Concurrent analysis workers"),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .value_name("SECONDS")
                .default_value("5")
                .value_parser(clap::value_parser!(u64))
                .help("Timeout per DNS query"),
        )
        .arg(
            Arg::new("whois-timeout")
                .long("whois-timeout")
                .value_name("SECONDS")
                .default_value("10")
                .value_parser(clap::value_parser!(u64))
                .help("Timeout per WHOIS query"),
        )
        .arg(
            Arg::new("techniques")
                .long("techniques")
                .short('t')
                .value_name("TECHNIQUE")
                .value_delimiter(',')
                .default_value("all")
                .help("Comma-separated technique tags to run, or 'all'; see --list-techniques"),
        )
        .arg(
            Arg::new("no-dns")
                .long("no-dns")
                .action(ArgAction::SetTrue)
                .help("Skip DNS resolution; candidates are only enumerated"),
        )
        .arg(
            Arg::new("no-whois")
                .long("no-whois")
                .action(ArgAction::SetTrue)
                .help("Skip WHOIS lookups; registered candidates get an unknown trust level"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .value_name("FORMAT")
                .value_parser(SUPPORTED_OUTPUT_FORMATS.to_vec())
                .default_value("summary")
                .help("Output format"),
        )
        .arg(
            Arg::new("output-file")
                .long("output-file")
                .value_name("FILE")
                .help("Write the report to a file instead of stdout"),
        )
        .arg(
            Arg::new("include-unregistered")
                .long("include-unregistered")
                .action(ArgAction::SetTrue)
                .help("Also list candidates that did not resolve"),
        )
        .arg(
            Arg::new("list-techniques")
                .long("list-techniques")
                .action(ArgAction::SetTrue)
                .help("List the available techniques and exit"),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .short('q')
                .action(ArgAction::SetTrue)
                .help("Suppress the run narration on stderr"),
        )
        .arg(
            Arg::new("no-color")
                .long("no-color")
                .action(ArgAction::SetTrue)
                .help("Disable colored output"),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .action(ArgAction::Count)
                .help("Increase log verbosity; repeat for more"),
        )
}
