use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use serde::Serialize;
use serde_json::Value as SerdeValue;
use std::io::{self, Write};
use std::path::PathBuf;

use jsonpick::config::Config;
use jsonpick::file::loader::{load_json_file, load_json_from_stdin};
use jsonpick::{decode_str, get, get_bool, get_number, get_string, JsonPath, JsonValue, Match};

/// Expected type of the located value.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum ValueType {
    Any,
    #[value(name = "string")]
    Text,
    Number,
    Bool,
}

/// jsonpick - extract a value from a JSON document by path
#[derive(Parser)]
#[command(name = "jsonpick")]
#[command(version)]
#[command(about = "Extract a value from a JSON document by path", long_about = None)]
struct Cli {
    /// Path segments: integers are indices, START:STOP is a slice, anything else is a key.
    /// Negative indices work as-is; other segments starting with '-' (a slice like
    /// -1:3) must follow `--`
    #[arg(allow_negative_numbers = true)]
    segments: Vec<String>,

    /// JSON file to read (omit to read stdin); gzipped input is detected
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Path as a JSON array, e.g. '["items", 0, {"start": 1, "stop": 3}]'
    #[arg(long, conflicts_with = "segments")]
    path: Option<String>,

    /// Required type of the located value
    #[arg(short = 't', long = "type", value_enum, default_value_t = ValueType::Any)]
    value_type: ValueType,

    /// JSON value to print instead of failing when the input is not valid JSON or
    /// the lookup fails (unreadable files are still errors)
    #[arg(short, long)]
    default: Option<String>,

    /// Print string results without quotes
    #[arg(short, long)]
    raw: bool,

    /// Print JSON on a single line
    #[arg(short, long)]
    compact: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let mut config = Config::load();
    apply_overrides(&mut config, &cli);

    let path = match &cli.path {
        Some(text) => {
            let encoded: SerdeValue =
                serde_json::from_str(text).context("--path must be a JSON array")?;
            JsonPath::from_json(&encoded)
        }
        None => JsonPath::from_args(&cli.segments),
    };

    let default = cli
        .default
        .as_deref()
        .map(decode_str)
        .transpose()
        .context("--default must be valid JSON")?;

    let loaded = match &cli.file {
        Some(file) => load_json_file(file),
        None => load_json_from_stdin(),
    };
    let output = pick(loaded, &path, cli.value_type, default)?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", render(&output, &config)?)?;
    Ok(())
}

/// CLI flags override config values.
fn apply_overrides(config: &mut Config, cli: &Cli) {
    config.raw_strings |= cli.raw;
    if cli.compact {
        config.pretty = false;
    }
}

/// Resolves the value to print, substituting `default` for undecodable input
/// or a failed lookup.
fn pick(
    loaded: Result<JsonValue>,
    path: &JsonPath,
    value_type: ValueType,
    default: Option<JsonValue>,
) -> Result<SerdeValue> {
    let root = match loaded {
        Ok(root) => root,
        Err(err) if err.downcast_ref::<serde_json::Error>().is_some() => {
            return match default {
                Some(default) => {
                    log::warn!("input is not valid JSON, printing default: {:#}", err);
                    Ok(default.to_serde())
                }
                None => Err(err),
            };
        }
        Err(err) => return Err(err),
    };

    log::debug!("looking up {}", path);
    match lookup(&root, path, value_type) {
        Ok(found) => Ok(found),
        Err(err) => match default {
            Some(default) => {
                log::warn!("lookup of {} failed: {}", path, err);
                Ok(default.to_serde())
            }
            None => Err(err).with_context(|| format!("lookup of {} failed", path)),
        },
    }
}

fn lookup(
    root: &JsonValue,
    path: &JsonPath,
    value_type: ValueType,
) -> Result<SerdeValue, jsonpick::JsonPathError> {
    match value_type {
        ValueType::Any => get(root, path, Match::null())
            .into_result()
            .map(|found| found.to_json()),
        ValueType::Text => get_string(root, path, "")
            .into_result()
            .map(SerdeValue::String),
        ValueType::Number => get_number(root, path, 0.0)
            .into_result()
            .map(|n| JsonValue::Number(n).to_serde()),
        ValueType::Bool => get_bool(root, path, false)
            .into_result()
            .map(SerdeValue::Bool),
    }
}

fn render(value: &SerdeValue, config: &Config) -> Result<String> {
    if let (true, SerdeValue::String(s)) = (config.raw_strings, value) {
        return Ok(s.clone());
    }
    if !config.pretty {
        return Ok(serde_json::to_string(value)?);
    }

    let indent = " ".repeat(config.indent_size);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8(buf)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonpick::{path, JsonPathError};
    use serde_json::json;

    fn sample() -> Result<JsonValue> {
        Ok(decode_str(r#"{"name": "Alice", "age": 30, "tags": ["a", "b"]}"#)?)
    }

    fn undecodable() -> Result<JsonValue> {
        let err = decode_str(r#"{"name": "#).unwrap_err();
        Err(anyhow::Error::from(err).context("Failed to parse JSON"))
    }

    #[test]
    fn test_render_raw_string() {
        let config = Config {
            raw_strings: true,
            ..Config::default()
        };
        assert_eq!(render(&json!("x"), &config).unwrap(), "x");
        // raw only affects strings
        assert_eq!(render(&json!([1]), &config).unwrap(), "[\n  1\n]");
    }

    #[test]
    fn test_render_quoted_string_by_default() {
        assert_eq!(render(&json!("x"), &Config::default()).unwrap(), "\"x\"");
    }

    #[test]
    fn test_render_compact() {
        let config = Config {
            pretty: false,
            ..Config::default()
        };
        assert_eq!(render(&json!({"a": [1, 2]}), &config).unwrap(), r#"{"a":[1,2]}"#);
    }

    #[test]
    fn test_render_pretty_uses_indent_size() {
        let config = Config {
            indent_size: 4,
            ..Config::default()
        };
        assert_eq!(
            render(&json!({"a": [1]}), &config).unwrap(),
            "{\n    \"a\": [\n        1\n    ]\n}"
        );
    }

    #[test]
    fn test_lookup_type_dispatch() {
        let root = sample().unwrap();
        assert_eq!(
            lookup(&root, &path!["name"], ValueType::Text).unwrap(),
            json!("Alice")
        );
        assert_eq!(
            lookup(&root, &path!["age"], ValueType::Number).unwrap(),
            json!(30)
        );
        assert_eq!(
            lookup(&root, &path!["tags", 0..2], ValueType::Any).unwrap(),
            json!(["a", "b"])
        );
    }

    #[test]
    fn test_lookup_type_mismatch() {
        let root = sample().unwrap();
        let err = lookup(&root, &path!["name"], ValueType::Number).unwrap_err();
        assert!(matches!(
            err,
            JsonPathError::UnexpectedType {
                expected: "number",
                found: "string"
            }
        ));
        let err = lookup(&root, &path!["age"], ValueType::Bool).unwrap_err();
        assert!(matches!(err, JsonPathError::UnexpectedType { .. }));
    }

    #[test]
    fn test_pick_default_on_failed_lookup() {
        let output = pick(sample(), &path!["missing"], ValueType::Any, Some(JsonValue::from("none")));
        assert_eq!(output.unwrap(), json!("none"));
    }

    #[test]
    fn test_pick_without_default_fails() {
        let err = pick(sample(), &path!["missing"], ValueType::Any, None).unwrap_err();
        assert!(err.to_string().contains("lookup of"));
        assert!(matches!(
            err.downcast_ref::<JsonPathError>(),
            Some(JsonPathError::NotFound)
        ));
    }

    #[test]
    fn test_pick_default_on_undecodable_input() {
        let output = pick(undecodable(), &path!["name"], ValueType::Text, Some(JsonValue::from("x")));
        assert_eq!(output.unwrap(), json!("x"));

        let err = pick(undecodable(), &path!["name"], ValueType::Text, None).unwrap_err();
        assert!(err.to_string().contains("Failed to parse JSON"));
    }

    #[test]
    fn test_pick_read_errors_stay_fatal() {
        let loaded = Err(anyhow::anyhow!("Failed to read file"));
        let result = pick(loaded, &path!["name"], ValueType::Any, Some(JsonValue::Null));
        assert!(result.is_err());
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from(["jsonpick", "-r", "-c", "name"]).unwrap();
        let mut config = Config {
            indent_size: 4,
            ..Config::default()
        };
        apply_overrides(&mut config, &cli);
        assert!(config.raw_strings);
        assert!(!config.pretty);
        assert_eq!(config.indent_size, 4);

        let cli = Cli::try_parse_from(["jsonpick", "name"]).unwrap();
        let mut config = Config {
            raw_strings: true,
            ..Config::default()
        };
        apply_overrides(&mut config, &cli);
        assert!(config.raw_strings);
        assert!(config.pretty);
    }

    #[test]
    fn test_segment_parsing() {
        let cli = Cli::try_parse_from(["jsonpick", "items", "-1", "-t", "string"]).unwrap();
        assert_eq!(cli.segments, ["items", "-1"]);
        assert!(matches!(cli.value_type, ValueType::Text));

        let cli = Cli::try_parse_from(["jsonpick", "items", "--", "-1:3"]).unwrap();
        assert_eq!(cli.segments, ["items", "-1:3"]);

        assert!(Cli::try_parse_from(["jsonpick", "--path", "[0]", "items"]).is_err());
    }
}
