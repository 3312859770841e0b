//! Command-line interface for cisto
//! Parses a cisto template and renders it in one of the supported output formats.
//!
//! Usage:
//!   cisto `<path>` [--format `<format>`] [--config `<file>`] [--data `<file>`] [--set key=value]...
//!
//! Use `-` as the path to read the template from stdin. Settings are layered in this
//! order: built-in defaults, `--config` file, `--set` overrides, `--format`. Values from
//! `--data` (a JSON object) are merged over the configured `[context]` table.
//!
//! Parse errors are reported on stderr with a caret diagnostic and exit code 1.

use cisto::cisto::config::{CistoConfig, Loader, OutputFormat};
use cisto::cisto::error::ParseError;
use cisto::cisto::formats::{
    to_treeviz_str, CompileError, Compiler, Context, DomCompiler, HtmlCompiler, SerializeCompiler,
};
use cisto::cisto::parsing::Parser;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::fmt;
use std::io::Read;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum CliError {
    Io { path: String, source: std::io::Error },
    Config(config::ConfigError),
    InvalidOverride(String),
    Data { path: String, message: String },
    Parse(ParseError),
    Compile(CompileError),
    Output(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io { path, source } => write!(f, "Error reading {}: {}", path, source),
            CliError::Config(err) => write!(f, "Configuration error: {}", err),
            CliError::InvalidOverride(value) => {
                write!(f, "Invalid --set value '{}' (expected key=value)", value)
            }
            CliError::Data { path, message } => write!(f, "Invalid data file {}: {}", path, message),
            CliError::Parse(err) => write!(f, "{}", err.to_pretty_string()),
            CliError::Compile(err) => write!(f, "Compile error: {}", err),
            CliError::Output(message) => write!(f, "Output error: {}", message),
        }
    }
}

impl std::error::Error for CliError {}

impl From<config::ConfigError> for CliError {
    fn from(err: config::ConfigError) -> Self {
        CliError::Config(err)
    }
}

impl From<CompileError> for CliError {
    fn from(err: CompileError) -> Self {
        match err {
            CompileError::Parse(parse_error) => CliError::Parse(parse_error),
            other => CliError::Compile(other),
        }
    }
}

fn build_cli() -> Command {
    Command::new("cisto")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Parse cisto templates and render them as HTML, data or debug views")
        .arg(
            Arg::new("path")
                .help("Path to the cisto template ('-' reads stdin)")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format (overrides render.format)")
                .value_parser(["html", "dom", "json", "yaml", "treeviz", "tokens"]),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML configuration file layered over the defaults"),
        )
        .arg(
            Arg::new("data")
                .long("data")
                .short('d')
                .help("JSON object with values for identifiers and {placeholders}"),
        )
        .arg(
            Arg::new("set")
                .long("set")
                .help("Override a configuration key, e.g. --set html.indent=\"\\t\"")
                .action(ArgAction::Append),
        )
}

fn main() {
    let matches = build_cli().get_matches();

    match run(&matches) {
        Ok(output) => print!("{}", output),
        Err(err) => {
            eprint!("{}", err);
            if !matches!(err, CliError::Parse(_)) {
                eprintln!();
            }
            std::process::exit(1);
        }
    }
}

fn run(matches: &ArgMatches) -> Result<String, CliError> {
    let config = load_config(matches)?;
    init_logging(&config.log.level);

    let mut context = config.context.clone();
    if let Some(path) = matches.get_one::<String>("data") {
        merge_data(&mut context, path)?;
    }

    let path = matches
        .get_one::<String>("path")
        .map(String::as_str)
        .unwrap_or("-");
    let source = read_source(path)?;
    tracing::info!(path, format = %config.render.format, "rendering template");

    render(&source, &config, context)
}

fn load_config(matches: &ArgMatches) -> Result<CistoConfig, CliError> {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if let Some(overrides) = matches.get_many::<String>("set") {
        for entry in overrides {
            let (key, value) = entry
                .split_once('=')
                .ok_or_else(|| CliError::InvalidOverride(entry.clone()))?;
            loader = loader.set_override(key.trim(), value.to_string())?;
        }
    }
    if let Some(format) = matches.get_one::<String>("format") {
        loader = loader.set_override("render.format", format.as_str())?;
    }
    Ok(loader.build()?)
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn read_source(path: &str) -> Result<String, CliError> {
    let io_error = |source| CliError::Io {
        path: path.to_string(),
        source,
    };
    if path == "-" {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .map_err(io_error)?;
        Ok(source)
    } else {
        std::fs::read_to_string(path).map_err(io_error)
    }
}

fn merge_data(context: &mut Context, path: &str) -> Result<(), CliError> {
    let text = read_source(path)?;
    let data_error = |message: String| CliError::Data {
        path: path.to_string(),
        message,
    };
    let value: serde_json::Value =
        serde_json::from_str(&text).map_err(|err| data_error(err.to_string()))?;
    match value {
        serde_json::Value::Object(map) => {
            context.extend(map);
            Ok(())
        }
        _ => Err(data_error("expected a JSON object".to_string())),
    }
}

fn render(source: &str, config: &CistoConfig, context: Context) -> Result<String, CliError> {
    let output = match config.render.format {
        OutputFormat::Html => HtmlCompiler::with_context(context)
            .indent_with(config.html.indent.clone())
            .process(source)?,
        OutputFormat::Dom => {
            let node = DomCompiler::with_context(context).process(source)?;
            to_json(&node)?
        }
        OutputFormat::Json => {
            let data = SerializeCompiler::new().process(source)?;
            to_json(&data)?
        }
        OutputFormat::Yaml => {
            let data = SerializeCompiler::new().process(source)?;
            serde_yaml::to_string(&data).map_err(|err| CliError::Output(err.to_string()))?
        }
        OutputFormat::Treeviz => {
            let root = Parser::new().parse(source).map_err(CliError::Parse)?;
            to_treeviz_str(&root)
        }
        OutputFormat::Tokens => {
            let (_, tokens) = Parser::new()
                .parse_with_tokens(source)
                .map_err(CliError::Parse)?;
            tokens
                .iter()
                .map(|token| format!("{}\n", token))
                .collect::<String>()
        }
    };
    Ok(output)
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, CliError> {
    let mut json =
        serde_json::to_string_pretty(value).map_err(|err| CliError::Output(err.to_string()))?;
    json.push('\n');
    Ok(json)
}
