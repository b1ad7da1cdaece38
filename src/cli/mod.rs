pub mod predict;
pub mod replay;

use std::io::Read;
use std::path::Path;
use std::process;

use seqvm::{Error, SearchConfig};

/// Print an error (with its diagnostic, if any) and exit with status 1.
pub fn exit_with(err: &Error, source: Option<(&str, &str)>) -> ! {
    match (err.diagnostic(), source) {
        (Some(diag), Some((filename, text))) => diag.render(filename, text),
        _ => eprintln!("error: {}", err),
    }
    process::exit(1);
}

/// Read the target from positional values, or from stdin when there are
/// none or `force_stdin` is set. Exits on malformed input.
pub fn read_target(values: &[String], force_stdin: bool) -> Vec<u16> {
    if !values.is_empty() && !force_stdin {
        let source = seqvm::target::join_args(values);
        return match seqvm::target::parse_target(&source) {
            Ok(target) => target,
            Err(e) => exit_with(&e, Some(("<args>", source.as_str()))),
        };
    }

    let mut source = String::new();
    if let Err(e) = std::io::stdin().read_to_string(&mut source) {
        eprintln!("error: cannot read stdin: {}", e);
        process::exit(1);
    }
    match seqvm::target::parse_target(&source) {
        Ok(target) => target,
        Err(e) => exit_with(&e, Some(("<stdin>", source.as_str()))),
    }
}

/// Load the config file if one was given, else the defaults. Exits on error.
pub fn load_config(path: Option<&Path>) -> SearchConfig {
    match path {
        Some(path) => SearchConfig::load(path).unwrap_or_else(|e| exit_with(&e, None)),
        None => SearchConfig::default(),
    }
}
