use std::{ffi::OsString, path::PathBuf};

use clap::Parser;

use crate::{
    client::DEFAULT_BASE_URL,
    run::{DEFAULT_MAILBOX, DEFAULT_QUERY},
};

/// Long flags that may also be spelled with a single dash (`-dir`).
const SINGLE_DASH_LONG_FLAGS: &[&str] =
    &["dir", "list", "url", "mailbox", "query", "timeout"];

#[derive(Debug, Parser)]
#[command(
    name = "indexcheck",
    about = "Index files into a search service and verify result counts never shrink"
)]
pub struct Cli {
    /// Directory to traverse and parse files
    #[arg(long, default_value = "./")]
    pub dir: PathBuf,

    /// File containing list of files to parse (overrides --dir)
    #[arg(long)]
    pub list: Option<PathBuf>,

    /// Base URL of the index/search service
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub url: String,

    /// Mailbox every document is indexed into and searched in
    #[arg(long, default_value = DEFAULT_MAILBOX)]
    pub mailbox: String,

    /// Query issued after every index request
    #[arg(long, default_value = DEFAULT_QUERY)]
    pub query: String,

    /// Per-request timeout in seconds (unbounded when omitted)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Increase log verbosity (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Rewrite single-dash long flags (`-dir x`, `-list=y`) to their
/// double-dash form so both spellings parse.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut args = args.into_iter().map(Into::into);
    let mut out: Vec<OsString> = args.next().into_iter().collect();
    let mut passthrough = false;

    for arg in args {
        if passthrough {
            out.push(arg);
            continue;
        }
        if arg == "--" {
            passthrough = true;
            out.push(arg);
            continue;
        }

        let rewritten = arg.to_str().and_then(|s| {
            let rest = s.strip_prefix('-')?;
            if rest.starts_with('-') {
                return None;
            }
            let name = rest.split_once('=').map_or(rest, |(name, _)| name);
            SINGLE_DASH_LONG_FLAGS
                .contains(&name)
                .then(|| OsString::from(format!("-{s}")))
        });
        out.push(rewritten.unwrap_or(arg));
    }

    out
}
