use std::ffi::OsString;
use std::process;

use clap::{value_t, App, AppSettings, Arg};
use dynamic_interval::{with_stack_size, Cache, Strategy};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const EXAMPLES: [(i64, i64); 2] = [(21, 3), (13, 9)];

fn validate_i64_arg(arg: String) -> Result<(), String> {
    match arg.parse::<i64>() {
        Ok(_) => Ok(()),
        Err(_) => Err(String::from("expected integer")),
    }
}

fn validate_usize_arg(arg: String) -> Result<(), String> {
    match arg.parse::<usize>() {
        Ok(_) => Ok(()),
        Err(_) => Err(String::from("expected number of bytes")),
    }
}

/// Filter used when `RUST_LOG` is unset: the library and this binary.
fn default_directives(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "warn" };
    format!("dynamic_interval={0},{1}={0}", level, module_path!())
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn evaluate(strategy: Strategy, queries: Vec<(i64, i64)>) -> dynamic_interval::Result<Vec<f64>> {
    // Each query is its own call tree with its own cache.
    queries
        .into_iter()
        .map(|(n, k)| strategy.eval(n, k, &mut Cache::new()))
        .collect()
}

/// What one run of the program evaluates.
#[derive(Debug, PartialEq)]
struct Options {
    strategy: Strategy,
    stack_size: Option<usize>,
    verbose: bool,
    queries: Vec<(i64, i64)>,
}

fn parse_options<I, T>(args: I) -> clap::Result<Options>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let names: Vec<&str> = Strategy::ALL.iter().map(|s| s.name()).collect();
    let matches = App::new("Dynamic interval")
        .version("0.0.1")
        .about("Evaluates the interval probability F(n, k)")
        .setting(AppSettings::AllowNegativeNumbers)
        .arg(
            Arg::with_name("IMPL")
                .long("impl")
                .takes_value(true)
                .help("implementation to use")
                .possible_values(&names)
                .default_value(Strategy::default().name()),
        )
        .arg(
            Arg::with_name("STACK_SIZE")
                .long("stack-size")
                .takes_value(true)
                .help("evaluate on a thread with this many bytes of stack")
                .validator(validate_usize_arg),
        )
        .arg(
            Arg::with_name("VERBOSE")
                .short("v")
                .long("verbose")
                .help("log evaluations and cache statistics to stderr"),
        )
        .arg(
            Arg::with_name("N")
                .help("degree; prints the built-in examples when omitted")
                .requires("K")
                .validator(validate_i64_arg),
        )
        .arg(
            Arg::with_name("K")
                .help("index")
                .validator(validate_i64_arg),
        )
        .get_matches_from_safe(args)?;

    let strategy = matches
        .value_of("IMPL")
        .and_then(Strategy::from_name)
        .unwrap_or_default();
    let stack_size = if matches.is_present("STACK_SIZE") {
        Some(value_t!(matches.value_of("STACK_SIZE"), usize)?)
    } else {
        None
    };
    let queries = if matches.is_present("N") {
        let n = value_t!(matches.value_of("N"), i64)?;
        let k = value_t!(matches.value_of("K"), i64)?;
        vec![(n, k)]
    } else {
        EXAMPLES.to_vec()
    };

    Ok(Options {
        strategy,
        stack_size,
        verbose: matches.is_present("VERBOSE"),
        queries,
    })
}

fn main() {
    let options = parse_options(std::env::args_os()).unwrap_or_else(|e| e.exit());

    init_logging(options.verbose);
    tracing::debug!(strategy = %options.strategy, queries = ?options.queries, "starting");

    let Options {
        strategy,
        stack_size,
        queries,
        ..
    } = options;
    let result = match stack_size {
        Some(size) => {
            with_stack_size(size, move || evaluate(strategy, queries)).and_then(|res| res)
        }
        None => evaluate(strategy, queries),
    };

    match result {
        Ok(values) => {
            for value in values {
                println!("{}", value);
            }
        }
        Err(err) => {
            eprintln!("error: {}", err);
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dynamic_interval::Error;

    #[test]
    fn no_arguments_runs_the_examples() {
        let options = parse_options(["interval"]).unwrap();
        assert_eq!(
            options,
            Options {
                strategy: Strategy::StackSafe,
                stack_size: None,
                verbose: false,
                queries: vec![(21, 3), (13, 9)],
            }
        );
        let values = evaluate(options.strategy, options.queries).unwrap();
        assert_eq!(values[0].to_string(), "0.061313197162577215");
        assert_eq!(values[1].to_string(), "0.0000009397108566079095");
    }

    #[test]
    fn negative_index_is_a_value() {
        let options = parse_options(["interval", "3", "-1"]).unwrap();
        assert_eq!(options.queries, vec![(3, -1)]);
        assert_eq!(evaluate(options.strategy, options.queries).unwrap(), vec![0.0]);
    }

    #[test]
    fn negative_index_after_options() {
        let options = parse_options(["interval", "--impl", "recursive", "-v", "3", "-1"]).unwrap();
        assert_eq!(options.strategy, Strategy::Recursive);
        assert!(options.verbose);
        assert_eq!(options.queries, vec![(3, -1)]);
    }

    #[test]
    fn negative_degree_reaches_the_evaluator() {
        let options = parse_options(["interval", "-3", "1"]).unwrap();
        assert_eq!(options.queries, vec![(-3, 1)]);
        assert!(matches!(
            evaluate(options.strategy, options.queries),
            Err(Error::NonPositiveDegree { n: -3 })
        ));
    }

    #[test]
    fn stack_size_is_parsed() {
        let options = parse_options(["interval", "--stack-size", "65536", "5", "10"]).unwrap();
        assert_eq!(options.stack_size, Some(65536));
        assert_eq!(options.queries, vec![(5, 10)]);
    }

    #[test]
    fn verbose_logs_this_binary_too() {
        assert_eq!(default_directives(true), "dynamic_interval=debug,interval=debug");
        assert_eq!(default_directives(false), "dynamic_interval=warn,interval=warn");
    }

    #[test]
    fn index_is_required_with_degree() {
        assert!(parse_options(["interval", "3"]).is_err());
        assert!(parse_options(["interval", "3", "x"]).is_err());
    }
}
