//! Command-line configuration for `xrd-convert`.
//!
//! Every option can be given as a flag or through the environment.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `XRD_DIRECTION` | auto | `auto`, `json-to-xml` or `xml-to-json` |
//! | `XRD_INPUT` | stdin | Input file |
//! | `XRD_LOG_LEVEL` | warn | Log level |
//! | `XRD_KEEP_STRINGS` | false | Do not coerce decoded text |
//! | `XRD_ALLOW_NESTED_ARRAY_KEY` | false | Accept `array` below the root |
//! | `XRD_XML_DECLARATION` | false | Prefix XML output with a declaration |
//! | `XRD_PRETTY` | false | Pretty-print JSON output |
//! | `XRD_MAX_DEPTH` | 128 | Maximum nesting depth |
//! | `XRD_LEGACY_PAYLOAD` | false | Print legacy payloads instead of failing |

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use xrd_codec::config::DEFAULT_MAX_DEPTH;
use xrd_codec::{CodecOptions, Direction};

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Conversion direction as given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DirectionArg {
    /// Detect from the first non-whitespace character of the input.
    Auto,
    /// JSON in, XML out.
    JsonToXml,
    /// XML in, JSON out.
    XmlToJson,
}

impl DirectionArg {
    /// The fixed direction, or `None` for `auto`.
    pub fn fixed(self) -> Option<Direction> {
        match self {
            DirectionArg::Auto => None,
            DirectionArg::JsonToXml => Some(Direction::JsonToXml),
            DirectionArg::XmlToJson => Some(Direction::XmlToJson),
        }
    }
}

/// Configuration of the `xrd-convert` binary.
#[derive(Debug, Clone, Parser)]
#[command(name = "xrd-convert")]
#[command(about = "Convert REST/JSON payloads to SOAP/XML payloads and back")]
pub struct CliConfig {
    /// Conversion direction.
    #[arg(short, long, env = "XRD_DIRECTION", value_enum, default_value = "auto")]
    pub direction: DirectionArg,

    /// Input file; standard input when omitted.
    #[arg(short, long, env = "XRD_INPUT")]
    pub input: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "XRD_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Keep decoded element text as strings.
    #[arg(long, env = "XRD_KEEP_STRINGS")]
    pub keep_strings: bool,

    /// Accept the reserved `array` key below the document root.
    #[arg(long, env = "XRD_ALLOW_NESTED_ARRAY_KEY")]
    pub allow_nested_array_key: bool,

    /// Prefix XML output with an XML declaration.
    #[arg(long, env = "XRD_XML_DECLARATION")]
    pub xml_declaration: bool,

    /// Pretty-print JSON output.
    #[arg(long, env = "XRD_PRETTY")]
    pub pretty: bool,

    /// Maximum nesting depth accepted in either direction.
    #[arg(long, env = "XRD_MAX_DEPTH", default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// On failure print the legacy payload (`<error>Invalid key "array"</error>`
    /// or an empty line) and exit successfully.
    #[arg(long, env = "XRD_LEGACY_PAYLOAD")]
    pub legacy_payload: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            direction: DirectionArg::Auto,
            input: None,
            log_level: "warn".to_string(),
            keep_strings: false,
            allow_nested_array_key: false,
            xml_declaration: false,
            pretty: false,
            max_depth: DEFAULT_MAX_DEPTH,
            legacy_payload: false,
        }
    }
}

impl CliConfig {
    /// Builds the codec options from the flags.
    pub fn codec_options(&self) -> CodecOptions {
        CodecOptions {
            keep_strings: self.keep_strings,
            allow_nested_array_key: self.allow_nested_array_key,
            xml_declaration: self.xml_declaration,
            pretty_json: self.pretty,
            max_depth: self.max_depth,
        }
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.max_depth == 0 {
            errors.push("Max depth cannot be 0".to_string());
        }

        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            errors.push(format!(
                "Unknown log level '{}', expected one of: {}",
                self.log_level,
                LOG_LEVELS.join(", ")
            ));
        }

        if let Some(input) = &self.input {
            if !input.is_file() {
                errors.push(format!("Input file {} does not exist", input.display()));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
