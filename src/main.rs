mod debug_report;

use deflex::{
    LexiconTagger, LineSegmenter, Options, RuleSegmenter, SentenceSegmenter, get_definitions_explicit_verbose_with,
};
use std::io::{self, IsTerminal, Read};

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.log_level)).init();

    let segmenter: &dyn SentenceSegmenter = if config.lines { &LineSegmenter } else { &RuleSegmenter };
    let report = match get_definitions_explicit_verbose_with(&config.input, &config.options, segmenter, &LexiconTagger)
    {
        Ok(report) => report,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    if config.json {
        match serde_json::to_string_pretty(&report.definitions) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("error: failed to serialize definitions: {err}");
                std::process::exit(1);
            }
        }
    } else {
        debug_report::print_run(&config.input, &report, config.color);
    }
}

struct CliConfig {
    input: String,
    options: Options,
    lines: bool,
    json: bool,
    color: bool,
    log_level: &'static str,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut input: Option<String> = None;
    let mut options = Options::default();
    let mut lines = false;
    let mut json = false;
    let mut color = io::stdout().is_terminal();
    let mut verbosity = 0;
    let mut args = std::env::args().skip(1).peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("deflex {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "-v" | "--verbose" => verbosity += 1,
            "-vv" => verbosity += 2,
            "--color" => color = true,
            "--no-color" => color = false,
            "--lines" => lines = true,
            "--json" => json = true,
            "--max-term-tokens" => {
                let value = args.next().ok_or_else(|| "error: --max-term-tokens expects a value".to_string())?;
                options.max_term_tokens = parse_count("--max-term-tokens", &value)?;
            }
            "--coordinated-max-tokens" => {
                let value =
                    args.next().ok_or_else(|| "error: --coordinated-max-tokens expects a value".to_string())?;
                options.coordinated_term_max_tokens = parse_count("--coordinated-max-tokens", &value)?;
            }
            "--stoplist" => {
                let value = args.next().ok_or_else(|| "error: --stoplist expects a value".to_string())?;
                options.generic_noun_stoplist = parse_stoplist(&value);
            }
            "--input" | "-i" => {
                let value = args.next().ok_or_else(|| "error: --input expects a value".to_string())?;
                set_input(&mut input, value)?;
            }
            "--" => {
                let rest = args.collect::<Vec<_>>().join(" ");
                if !rest.trim().is_empty() {
                    set_input(&mut input, rest)?;
                }
                break;
            }
            _ if arg.starts_with("--max-term-tokens=") => {
                let value = arg.trim_start_matches("--max-term-tokens=");
                options.max_term_tokens = parse_count("--max-term-tokens", value)?;
            }
            _ if arg.starts_with("--coordinated-max-tokens=") => {
                let value = arg.trim_start_matches("--coordinated-max-tokens=");
                options.coordinated_term_max_tokens = parse_count("--coordinated-max-tokens", value)?;
            }
            _ if arg.starts_with("--stoplist=") => {
                options.generic_noun_stoplist = parse_stoplist(arg.trim_start_matches("--stoplist="));
            }
            _ if arg.starts_with("--input=") => {
                set_input(&mut input, arg.trim_start_matches("--input=").to_string())?;
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                let rest = std::iter::once(arg).chain(args).collect::<Vec<_>>().join(" ");
                set_input(&mut input, rest)?;
                break;
            }
        }
    }

    let input = match input {
        Some(value) => value,
        None => read_stdin_input()?,
    };

    if input.trim().is_empty() {
        return Err(format!("error: no input provided\n\n{}", help_text()));
    }

    let log_level = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    Ok(CliConfig { input, options, lines, json, color, log_level })
}

fn set_input(input: &mut Option<String>, value: String) -> Result<(), String> {
    if input.is_some() {
        return Err("error: input provided multiple times".to_string());
    }
    *input = Some(value);
    Ok(())
}

fn parse_count(flag: &str, value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("error: invalid {flag} '{value}' (expected a positive integer)")),
    }
}

fn parse_stoplist(value: &str) -> std::collections::BTreeSet<String> {
    value.split(',').map(str::trim).filter(|w| !w.is_empty()).map(str::to_string).collect()
}

fn read_stdin_input() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    Ok(buffer)
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    let defaults = Options::default();
    format!(
        "deflex {version}

Explicit definition extraction for legal and financial prose.

Usage:
  deflex [OPTIONS] [--] <input...>
  deflex [OPTIONS] --input <text>
  cat contract.txt | deflex [OPTIONS]

Options:
  -i, --input <text>                 Input text. If omitted, reads remaining args
                                     or stdin when no args are provided.
  --max-term-tokens <n>              Longest single term, in tokens. Default: {max_term}
  --coordinated-max-tokens <n>       Longest parenthetical defining several terms.
                                     Default: {coordinated}
  --stoplist <a,b,c>                 Generic nouns rejected unless quoted or
                                     introduced by \"means\". Default: {stoplist}
  --lines                            Treat every line as one sentence.
  --json                             Print definitions as JSON.
  --color                            Force ANSI color output.
  --no-color                         Disable ANSI color output.
  -v, -vv                            Log at debug / trace level (RUST_LOG overrides).
  -h, --help                         Show this help message.
  -V, --version                      Print version information.

Exit codes:
  0  Success.
  1  Malformed segmenter or tagger output.
  2  Invalid arguments or missing input.
",
        version = env!("CARGO_PKG_VERSION"),
        max_term = defaults.max_term_tokens,
        coordinated = defaults.coordinated_term_max_tokens,
        stoplist = defaults.generic_noun_stoplist.iter().cloned().collect::<Vec<_>>().join(","),
    )
}
