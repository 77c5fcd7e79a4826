//! Obsidian Events CLI
//!
//! Entry point for the `obsidian-events` command-line tool.

use clap::{Parser, Subcommand};
use obsidian_events::config::{default_user_config_path, EffectiveConfig};
use obsidian_events::events::{GetEventsOk, GetEventsReader, GetEventsResponse, ReadError};
use obsidian_events::{JsonConsumer, RawResponse, ResponseReader, Settings};
use serde_json::{json, Value};
use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;
use tuple_codec::ValidationErrors;

const EXIT_INVALID: i32 = 1;
const EXIT_DECODE: i32 = 2;
const EXIT_UNEXPECTED_RESPONSE: i32 = 3;
const EXIT_CONFIG: i32 = 4;

#[derive(Parser)]
#[command(name = "obsidian-events")]
#[command(about = "Decode and validate events API responses", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a GET /events/{network_id}/{stream_name} response body
    Decode {
        /// Response body file ("-" for stdin)
        #[arg(default_value = "-")]
        input: String,

        /// HTTP status code the body came with
        #[arg(long, short = 's', default_value_t = 200)]
        status: u16,

        /// Path to config file (default: ~/.config/obsidian/events.toml)
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Content-Type header the body came with
        #[arg(long)]
        content_type: Option<String>,

        /// Reject tuple elements past the declared arity
        #[arg(long)]
        strict_arity: bool,

        /// Skip payload validation
        #[arg(long)]
        no_validate: bool,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,

        /// Print a JSON report instead of the decoded payload
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration
    Config {
        /// Path to config file (default: ~/.config/obsidian/events.toml)
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,
    },
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Decode {
            input,
            status,
            content_type,
            config,
            strict_arity,
            no_validate,
            pretty,
            json,
        } => {
            let overrides = cli_overrides(strict_arity, no_validate, pretty);
            let effective = load_config(config, overrides);
            run_decode(&input, status, content_type, effective.settings(), json);
        }
        Commands::Config { config } => {
            let effective = load_config(config, None);
            match serde_json::to_string_pretty(&effective) {
                Ok(text) => println!("{}", text),
                Err(e) => {
                    eprintln!("Error serializing config: {}", e);
                    process::exit(EXIT_CONFIG);
                }
            }
        }
    }
}

fn init_logging() {
    let mut builder = env_logger::Builder::new();
    if std::env::var_os("RUST_LOG").is_none() {
        builder.filter_level(log::LevelFilter::Warn);
    }
    builder.parse_env("RUST_LOG");
    builder.init();
}

/// Only flags the user actually set become a layer.
fn cli_overrides(strict_arity: bool, no_validate: bool, pretty: bool) -> Option<Value> {
    let mut layer = serde_json::Map::new();
    if strict_arity {
        layer.insert("decode".to_string(), json!({"strict_arity": true}));
    }
    if no_validate {
        layer.insert("validate".to_string(), json!({"enabled": false}));
    }
    if pretty {
        layer.insert("output".to_string(), json!({"pretty": true}));
    }
    if layer.is_empty() {
        None
    } else {
        Some(Value::Object(layer))
    }
}

fn load_config(explicit: Option<PathBuf>, overrides: Option<Value>) -> EffectiveConfig {
    if let Some(path) = &explicit {
        if !path.exists() {
            eprintln!("Config file not found: {}", path.display());
            process::exit(EXIT_CONFIG);
        }
    }
    let path = explicit.or_else(default_user_config_path);

    match EffectiveConfig::build(path.as_deref(), overrides) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            process::exit(EXIT_CONFIG);
        }
    }
}

/// Input errors
#[derive(Debug, thiserror::Error)]
enum InputError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("body exceeds decode.max_body_bytes ({0} bytes)")]
    TooLarge(u64),
}

impl InputError {
    fn exit_code(&self) -> i32 {
        match self {
            InputError::Io(_) => EXIT_CONFIG,
            InputError::TooLarge(_) => EXIT_DECODE,
        }
    }
}

fn read_body(input: &str, limit: u64) -> Result<Vec<u8>, InputError> {
    let reader: Box<dyn Read> = if input == "-" {
        Box::new(io::stdin())
    } else {
        Box::new(File::open(input)?)
    };

    let mut body = Vec::new();
    reader.take(limit + 1).read_to_end(&mut body)?;
    if body.len() as u64 > limit {
        return Err(InputError::TooLarge(limit));
    }
    Ok(body)
}

fn run_decode(
    input: &str,
    status: u16,
    content_type: Option<String>,
    settings: &Settings,
    json_report: bool,
) {
    let body = match read_body(input, settings.decode.max_body_bytes) {
        Ok(body) => body,
        Err(e) => {
            eprintln!("Error reading {}: {}", input, e);
            process::exit(e.exit_code());
        }
    };

    let mut response = RawResponse::new(status, body);
    if let Some(content_type) = content_type {
        response = response.with_header("Content-Type", content_type);
    }
    let consumer = JsonConsumer::with_options(settings.decode_options());

    match GetEventsReader.read_response(&response, &consumer) {
        Ok(GetEventsResponse::Ok(ok)) => report_ok(&ok, settings, json_report),
        Ok(GetEventsResponse::Default(default)) => {
            if json_report {
                emit(
                    &json!({
                        "status": default.code(),
                        "outcome": "default",
                        "message": default.payload.message,
                    }),
                    settings,
                );
            } else {
                println!("{}", default);
            }
        }
        Err(ReadError::Unexpected(default)) => {
            if json_report {
                emit(
                    &json!({
                        "status": default.code(),
                        "outcome": "unexpected",
                        "message": default.payload.message,
                    }),
                    settings,
                );
            } else {
                eprintln!("{}", default);
            }
            process::exit(EXIT_UNEXPECTED_RESPONSE);
        }
        Err(e @ (ReadError::Consume(_) | ReadError::UnsupportedMediaType(_))) => {
            eprintln!("Error: {}", e);
            process::exit(EXIT_DECODE);
        }
    }
}

fn report_ok(ok: &GetEventsOk, settings: &Settings, json_report: bool) {
    let payload = match serde_json::to_value(&ok.payload) {
        Ok(payload) => payload,
        Err(e) => {
            eprintln!("Error encoding payload: {}", e);
            process::exit(EXIT_DECODE);
        }
    };

    let validation = if settings.validate.enabled {
        ok.validate().err()
    } else {
        None
    };

    if json_report {
        emit(
            &json!({
                "status": 200,
                "outcome": "ok",
                "payload": payload,
                "validated": settings.validate.enabled,
                "errors": validation.as_ref().map(errors_to_json).unwrap_or_default(),
            }),
            settings,
        );
    } else {
        emit(&payload, settings);
        if let Some(errors) = &validation {
            for error in errors {
                match error.position() {
                    Some(position) => eprintln!("  [{}] {}", position, error),
                    None => eprintln!("  {}", error),
                }
            }
        }
    }

    if validation.is_some() {
        process::exit(EXIT_INVALID);
    }
}

fn errors_to_json(errors: &ValidationErrors) -> Vec<Value> {
    errors
        .iter()
        .map(|error| {
            json!({
                "path": error.dotted_path(),
                "position": error.position(),
                "kind": error.kind.code(),
                "message": error.to_string(),
            })
        })
        .collect()
}

fn emit(value: &Value, settings: &Settings) {
    let text = if settings.output.pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    match text {
        Ok(text) => println!("{}", text),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            process::exit(EXIT_DECODE);
        }
    }
}
