use std::io::Write;

use serde::Serialize;

use crate::{Error, Result};

pub mod csv;
pub mod json;
pub mod styles;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputType {
    Json,
    Csv,
    Summary,
}

impl TryFrom<&str> for OutputType {
    type Error = Error;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        match value {
            "json" => Ok(OutputType::Json),
            "csv" => Ok(OutputType::Csv),
            "summary" => Ok(OutputType::Summary),
            _ => Err(Error::ParserError {
                what: value.to_string(),
                to: "OutputType",
                why: "invalid output type".to_string(),
            }),
        }
    }
}

pub trait OutputFormat<T> {
    fn output<W: Write>(&self, writer: &mut W, data: &T) -> Result<()>;
}

#[derive(Debug)]
pub enum OutputConfig {
    Json { format: json::JsonFormat },
    Csv { format: csv::CsvFormat },
}

impl OutputConfig {
    pub fn json(opts: json::JsonOptions) -> Self {
        OutputConfig::Json {
            format: json::JsonFormat::new(opts),
        }
    }

    pub fn csv(opts: csv::CsvOptions) -> Self {
        OutputConfig::Csv {
            format: csv::CsvFormat::new(opts),
        }
    }
}

pub fn output<W: Write>(config: &OutputConfig, writer: &mut W, report: &crate::report::Report) -> Result<()> {
    match config {
        OutputConfig::Json { format } => format.output(writer, report),
        OutputConfig::Csv { format } => format.output(writer, report),
    }
}
