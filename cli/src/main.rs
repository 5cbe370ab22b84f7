use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use clap::Parser;
use condcfg::{Config, Pattern, PatternError, Value, render_error};
use miette::{IntoDiagnostic, Result, miette};

mod repl;

/// condcfg - check values against N-conditions and regular expressions
#[derive(Parser, Debug)]
#[command(name = "condcfg")]
#[command(about = "Check values against an N-condition or regex pattern", long_about = None)]
struct Args {
    /// Print the compiled RPN instructions
    #[arg(long)]
    rpn: bool,

    /// Treat the pattern as a regular expression and values as strings
    #[arg(long)]
    string: bool,

    /// Config file (.json, .yaml or .yml) holding the value to check
    #[arg(long, value_name = "FILE", requires = "key")]
    config: Option<PathBuf>,

    /// Config key to check, used with --config
    #[arg(long, value_name = "KEY", requires = "config")]
    key: Option<String>,

    /// Flag overlay applied to the config, highest priority
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_flag)]
    flags: Vec<(String, Value)>,

    /// Pattern, e.g. "N>=30&&N<=80"
    pattern: String,

    /// Values to check (if not provided, reads from stdin)
    values: Vec<String>,
}

/// Parses `KEY=VALUE`; the value becomes an int, float or bool when it
/// reads as one, a string otherwise.
fn parse_flag(s: &str) -> Result<(String, Value), String> {
    let (key, raw) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{s}'"))?;
    if key.is_empty() {
        return Err(format!("empty key in '{s}'"));
    }
    let value = if let Ok(i) = raw.parse::<i64>() {
        Value::Int(i)
    } else if let Ok(f) = raw.parse::<f64>() {
        Value::Float(f)
    } else if let Ok(b) = raw.parse::<bool>() {
        Value::Bool(b)
    } else {
        Value::from(raw)
    };
    Ok((key.to_string(), value))
}

/// Checks one input and prints `label: verdict` on stdout. Errors go to
/// stderr and count as `false`.
fn check_input(pattern: &Pattern, label: &str, input: &str, as_string: bool) -> bool {
    let result = if as_string {
        Some(pattern.check_string(input))
    } else {
        match input.trim().parse::<f64>() {
            Ok(n) => Some(pattern.check_float(n)),
            Err(_) => {
                eprintln!("{input}: not a number");
                None
            }
        }
    };
    let valid = match result {
        Some(Ok(valid)) => valid,
        Some(Err(e)) => {
            render_error(pattern.source(), &e);
            false
        }
        None => false,
    };
    println!("{label}: {valid}");
    valid
}

fn load_config(path: &Path, flags: &[(String, Value)]) -> Result<Config> {
    Ok(Config::from_file(path)
        .into_diagnostic()?
        .with_flags(flags.iter().cloned()))
}

/// Checks the value at `key`. An entry of the wrong shape is an error
/// rather than a default.
fn check_config(pattern: &Pattern, config: &Config, key: &str, as_string: bool) -> Result<bool> {
    config.must(key).into_diagnostic()?;

    let input = if as_string {
        config
            .string_opt(key)
            .ok_or_else(|| miette!("'{key}' is not a string"))?
    } else {
        config
            .float_opt(key)
            .ok_or_else(|| miette!("'{key}' is not a number"))?
            .to_string()
    };
    tracing::debug!(key, input = %input, "checking config value");
    Ok(check_input(pattern, &format!("{key}={input}"), &input, as_string))
}

/// Compiles the pattern up front so a bad pattern fails before any input.
fn compile_pattern(pattern: &Pattern, args: &Args) -> Result<()> {
    let error = if args.string {
        pattern.regex().err().map(|e| PatternError::Regex(e.clone()))
    } else {
        match pattern.instructions() {
            Ok(code) => {
                if args.rpn {
                    println!("{code}");
                }
                None
            }
            Err(e) => Some(PatternError::Syntax(e.clone())),
        }
    };
    match error {
        Some(e) => {
            render_error(pattern.source(), &e);
            Err(miette!("invalid pattern '{}'", pattern.source()))
        }
        None => Ok(()),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging subscriber
    use tracing_subscriber::{EnvFilter, fmt};

    // Use RUST_LOG to control log level, default to WARN if not set
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn"))
        .into_diagnostic()?;

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let pattern = Pattern::new(args.pattern.as_str());
    compile_pattern(&pattern, &args)?;

    if let (Some(path), Some(key)) = (&args.config, &args.key) {
        let config = load_config(path, &args.flags)?;
        check_config(&pattern, &config, key, args.string)?;
        return Ok(());
    }

    if !args.values.is_empty() {
        for value in &args.values {
            check_input(&pattern, value, value, args.string);
        }
        return Ok(());
    }

    if atty::is(atty::Stream::Stdin) {
        repl::run(&pattern, args.string)
    } else {
        // Pipe/stdin mode, one value per line
        let stdin = std::io::stdin();
        let reader = BufReader::new(stdin.lock());

        for line in reader.lines() {
            let line = line.into_diagnostic()?;
            if line.trim().is_empty() {
                continue;
            }
            check_input(&pattern, &line, &line, args.string);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use condcfg::MapEnvironment;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("port=80"), Ok(("port".to_string(), Value::Int(80))));
        assert_eq!(parse_flag("ratio=0.5"), Ok(("ratio".to_string(), Value::Float(0.5))));
        assert_eq!(parse_flag("debug=true"), Ok(("debug".to_string(), Value::Bool(true))));
        assert_eq!(
            parse_flag("url=http://x?a=b"),
            Ok(("url".to_string(), Value::from("http://x?a=b")))
        );
        assert_eq!(parse_flag("empty="), Ok(("empty".to_string(), Value::from(""))));
        assert!(parse_flag("novalue").is_err());
        assert!(parse_flag("=1").is_err());
    }

    #[test]
    fn test_args() {
        let args = Args::try_parse_from(["condcfg", "--rpn", "N>1", "2", "3"]).unwrap();
        assert!(args.rpn);
        assert_eq!(args.pattern, "N>1");
        assert_eq!(args.values, vec!["2", "3"]);

        let args = Args::try_parse_from([
            "condcfg", "--config", "a.yaml", "--key", "port", "--set", "port=1", "N>0",
        ])
        .unwrap();
        assert_eq!(args.key.as_deref(), Some("port"));
        assert_eq!(args.flags, vec![("port".to_string(), Value::Int(1))]);

        assert!(Args::try_parse_from(["condcfg", "--key", "port", "N>0"]).is_err());
    }

    #[test]
    fn test_check_input() {
        let pattern = Pattern::new("N>=30&&N<=80");
        assert!(check_input(&pattern, "30", "30", false));
        assert!(!check_input(&pattern, "81", "81", false));
        assert!(!check_input(&pattern, "abc", "abc", false));

        let pattern = Pattern::new("^a+$");
        assert!(check_input(&pattern, "aaa", "aaa", true));
        assert!(!check_input(&pattern, "ab", "ab", true));
    }

    fn fixture_config(flags: &[(String, Value)]) -> Config {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../tests/fixtures/example.yaml");
        load_config(&path, flags)
            .unwrap()
            .with_environment(MapEnvironment::new())
    }

    #[test]
    fn test_check_config_number() {
        let config = fixture_config(&[]);
        assert!(check_config(&Pattern::new("N>=1&&N<=16"), &config, "workers", false).unwrap());
        assert!(!check_config(&Pattern::new("N>8"), &config, "workers", false).unwrap());
        assert!(check_config(&Pattern::new("N<1"), &config, "ratio", false).unwrap());
    }

    #[test]
    fn test_check_config_rejects_non_numbers() {
        let config = fixture_config(&[]);
        let pattern = Pattern::new("N>=0");
        for key in ["name", "debug", "map"] {
            let err = check_config(&pattern, &config, key, false).unwrap_err();
            assert_eq!(err.to_string(), format!("'{key}' is not a number"));
        }
        assert!(check_config(&pattern, &config, "missing", false).is_err());
    }

    #[test]
    fn test_check_config_string() {
        let config = fixture_config(&[]);
        assert!(check_config(&Pattern::new("^ex"), &config, "name", true).unwrap());
        let err = check_config(&Pattern::new("^ex"), &config, "workers", true).unwrap_err();
        assert_eq!(err.to_string(), "'workers' is not a string");
    }

    #[test]
    fn test_check_config_flag_override() {
        let flags = [parse_flag("workers=32").unwrap(), parse_flag("name=other").unwrap()];
        let config = fixture_config(&flags);
        assert!(check_config(&Pattern::new("N>16"), &config, "workers", false).unwrap());
        assert!(check_config(&Pattern::new("^other$"), &config, "name", true).unwrap());
    }
}
