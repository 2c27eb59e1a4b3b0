use clap::Parser;
use clap::error::{ContextKind, ContextValue, ErrorKind};
use log::LevelFilter;
use objstage::Loader;
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

/// Validate compiled object files before staging them for injection.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Object files to load, in order.
    #[arg(required = true, value_name = "OBJECT")]
    objects: Vec<PathBuf>,

    /// Print per-file diagnostics (entry point, header counts).
    #[arg(short, long)]
    verbose: bool,
}

/// Parses the command line, dropping unrecognized flags instead of
/// aborting the run. Each dropped flag is returned so the caller can warn
/// about it; every other parse error (missing paths, bad values) is
/// surfaced as usual.
fn parse_lenient(mut args: Vec<OsString>) -> Result<(Cli, Vec<String>), clap::Error> {
    let mut ignored = Vec::new();
    loop {
        match Cli::try_parse_from(&args) {
            Ok(cli) => return Ok((cli, ignored)),
            Err(err) if err.kind() == ErrorKind::UnknownArgument => {
                let Some(ContextValue::String(bad)) = err.get(ContextKind::InvalidArg) else {
                    return Err(err);
                };
                let bad = bad.clone();
                let before = args.len();
                args.retain(|arg| arg.as_os_str() != OsStr::new(&bad));
                if args.len() == before {
                    // The reported flag is not a whole argument (e.g. part
                    // of a combined short group); give up rather than loop.
                    return Err(err);
                }
                ignored.push(bad);
            }
            Err(err) => return Err(err),
        }
    }
}

fn main() {
    let (cli, ignored) = match parse_lenient(std::env::args_os().collect()) {
        Ok(parsed) => parsed,
        Err(err) => err.exit(),
    };
    for flag in &ignored {
        eprintln!("objstage: bad argument: {flag}");
    }

    // Warnings and errors always reach stderr; debug diagnostics only
    // with --verbose.
    let filter = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new().filter_level(filter).init();

    let mut loader = Loader::new();
    for path in &cli.objects {
        // One bad input skips that file only; the batch keeps going and
        // the process still exits zero.
        if let Err(err) = loader.load(path) {
            eprintln!("objstage: {}: {err}", path.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<OsString> {
        list.iter().map(OsString::from).collect()
    }

    #[test]
    fn known_flags_parse() {
        let (cli, ignored) = parse_lenient(args(&["objstage", "-v", "a.o", "b.o"])).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.objects, [PathBuf::from("a.o"), PathBuf::from("b.o")]);
        assert!(ignored.is_empty());
    }

    #[test]
    fn unknown_short_flag_is_dropped_with_a_warning() {
        let (cli, ignored) = parse_lenient(args(&["objstage", "-x", "a.o"])).unwrap();
        assert_eq!(ignored, ["-x"]);
        assert_eq!(cli.objects, [PathBuf::from("a.o")]);
        assert!(!cli.verbose);
    }

    #[test]
    fn unknown_long_flag_is_dropped_and_the_rest_still_parses() {
        let (cli, ignored) =
            parse_lenient(args(&["objstage", "--frob", "-v", "a.o"])).unwrap();
        assert_eq!(ignored, ["--frob"]);
        assert!(cli.verbose);
        assert_eq!(cli.objects, [PathBuf::from("a.o")]);
    }

    #[test]
    fn multiple_unknown_flags_are_all_dropped() {
        let (cli, ignored) = parse_lenient(args(&["objstage", "-x", "-y", "a.o"])).unwrap();
        assert_eq!(ignored.len(), 2);
        assert_eq!(cli.objects, [PathBuf::from("a.o")]);
    }

    #[test]
    fn missing_paths_still_error() {
        assert!(parse_lenient(args(&["objstage"])).is_err());
    }
}
