//! x2l CLI - Spreadsheet formula to LaTeX converter

#[cfg(feature = "cli")]
use clap::{ArgAction, Parser, ValueEnum};
#[cfg(feature = "cli")]
use serde::Serialize;
#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::io::{self, Read, Write};
#[cfg(feature = "cli")]
use xl2tex::{convert_with_report, ConversionReport, ConversionResult, LossKind, X2LOptions};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "x2l")]
#[command(version)]
#[command(about = "xl2tex - Spreadsheet formula to LaTeX converter", long_about = None)]
struct Cli {
    /// Formulas to convert (reads one formula per line from stdin if none are given)
    formulas: Vec<String>,

    /// Output file path (writes to stdout if not provided)
    #[arg(short, long)]
    output: Option<String>,

    /// JSON file with conversion options
    #[arg(long)]
    config: Option<String>,

    /// Text emitted for formulas that call unsupported functions
    #[arg(long)]
    unsupported_message: Option<String>,

    /// Do not translate German function names
    #[arg(long)]
    no_german: bool,

    /// Leave parentheses at their natural size
    #[arg(long)]
    no_bracket_sizing: bool,

    /// Math delimiters around each result
    #[arg(short, long, value_enum, default_value_t = Wrap::Bare)]
    wrap: Wrap,

    /// Trim the spaces left around converted fragments
    #[arg(long)]
    trim: bool,

    /// Exit with an error if any formula uses an unsupported function
    #[arg(long)]
    strict: bool,

    /// Write a loss report JSON to this path
    #[arg(long)]
    report: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

#[cfg(feature = "cli")]
#[derive(Clone, Copy, ValueEnum)]
enum Wrap {
    /// No delimiters
    #[value(name = "none")]
    Bare,
    /// `$...$`
    Inline,
    /// `\[...\]`
    Display,
}

#[cfg(feature = "cli")]
#[derive(Serialize)]
struct FormulaReport<'a> {
    formula: &'a str,
    #[serde(flatten)]
    converted: ConversionReport,
}

#[cfg(feature = "cli")]
fn log_level(verbose: u8, quiet: bool) -> log::LevelFilter {
    match (quiet, verbose) {
        (true, _) => log::LevelFilter::Error,
        (false, 0) => log::LevelFilter::Warn,
        (false, 1) => log::LevelFilter::Debug,
        (false, _) => log::LevelFilter::Trace,
    }
}

#[cfg(feature = "cli")]
fn main() -> io::Result<()> {
    let cli = Cli::parse();
    // Logging setup stays in the binary; the library only uses the facade
    env_logger::Builder::new()
        .filter_level(log_level(cli.verbose, cli.quiet))
        .format_target(false)
        .init();

    let options = load_options(&cli)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;

    // Read input
    let formulas: Vec<String> = if cli.formulas.is_empty() {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect()
    } else {
        cli.formulas.clone()
    };

    let mut rendered = Vec::with_capacity(formulas.len());
    let mut reports = Vec::with_capacity(formulas.len());
    let mut unsupported = 0usize;

    for formula in &formulas {
        let converted = convert_with_report(formula, &options);
        if converted.report.has(LossKind::UnsupportedFunction) {
            unsupported += 1;
            if cli.strict {
                eprintln!("✗ Unsupported formula: {}", formula);
            }
        }
        rendered.push(wrap(&converted.content, cli.wrap, cli.trim));
        reports.push(FormulaReport {
            formula: formula.as_str(),
            converted,
        });
    }

    if let Some(path) = cli.report.as_ref() {
        let serialized = serde_json::to_string_pretty(&reports)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
        fs::write(path, serialized)?;
    }

    // Output
    let result = rendered.join("\n");
    match cli.output {
        Some(ref path) => {
            let mut file = fs::File::create(path)?;
            writeln!(file, "{}", result)?;
            eprintln!("✓ Output written to: {}", path);
        }
        None => {
            println!("{}", result);
        }
    }

    if cli.strict && unsupported > 0 {
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn load_options(cli: &Cli) -> ConversionResult<X2LOptions> {
    let mut options = match cli.config {
        Some(ref path) => X2LOptions::from_json(&fs::read_to_string(path)?)?,
        None => X2LOptions::default(),
    };
    if let Some(ref message) = cli.unsupported_message {
        options.unsupported_message = message.clone();
    }
    if cli.no_german {
        options.german_aliases = false;
    }
    if cli.no_bracket_sizing {
        options.size_brackets = false;
    }
    Ok(options)
}

#[cfg(feature = "cli")]
fn wrap(latex: &str, wrap: Wrap, trim: bool) -> String {
    let body = if trim { latex.trim() } else { latex };
    match wrap {
        Wrap::Bare => body.to_string(),
        Wrap::Inline => format!("${}$", body),
        Wrap::Display => format!("\\[{}\\]", body),
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("x2l").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_wrap_modes() {
        assert_eq!(wrap(" \\pi ", Wrap::Bare, false), " \\pi ");
        assert_eq!(wrap(" \\pi ", Wrap::Bare, true), "\\pi");
        assert_eq!(wrap(" \\pi ", Wrap::Inline, true), "$\\pi$");
        assert_eq!(wrap(" \\pi ", Wrap::Display, false), "\\[ \\pi \\]");
    }

    #[test]
    fn test_wrap_flag_names() {
        assert!(matches!(parse(&["-w", "none", "A"]).wrap, Wrap::Bare));
        assert!(matches!(parse(&["--wrap", "display", "A"]).wrap, Wrap::Display));
        assert!(matches!(parse(&["A"]).wrap, Wrap::Bare));
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = parse(&[
            "--no-german",
            "--no-bracket-sizing",
            "--unsupported-message",
            "n/a",
            "A/B",
        ]);
        let options = load_options(&cli).unwrap();
        assert!(!options.german_aliases);
        assert!(!options.size_brackets);
        assert_eq!(options.unsupported_message, "n/a");
    }

    #[test]
    fn test_config_file_then_flags() {
        let path = std::env::temp_dir().join(format!("x2l-config-{}.json", std::process::id()));
        fs::write(&path, r#"{"german_aliases": false, "unsupported_message": "cfg"}"#).unwrap();
        let config = path.to_string_lossy().to_string();

        let options = load_options(&parse(&["--config", &config, "A"])).unwrap();
        assert!(!options.german_aliases);
        assert!(options.size_brackets);
        assert_eq!(options.unsupported_message, "cfg");

        let options =
            load_options(&parse(&["--config", &config, "--unsupported-message", "flag", "A"]))
                .unwrap();
        assert_eq!(options.unsupported_message, "flag");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_config_is_an_error() {
        let cli = parse(&["--config", "/nonexistent/x2l-options.json", "A"]);
        assert!(load_options(&cli).is_err());
    }

    #[test]
    fn test_log_levels() {
        assert_eq!(log_level(0, false), log::LevelFilter::Warn);
        assert_eq!(log_level(1, false), log::LevelFilter::Debug);
        assert_eq!(log_level(3, false), log::LevelFilter::Trace);
        assert_eq!(log_level(2, true), log::LevelFilter::Error);
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  cargo install xl2tex --features cli");
    eprintln!("  x2l [OPTIONS] [FORMULAS]...");
}
