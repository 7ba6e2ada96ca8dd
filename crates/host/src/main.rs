mod app;

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use app::bootstrap::{init_tracing, HostOptions};

fn main() -> ExitCode {
    let options = match parse_args(env::args().skip(1).collect()) {
        Ok(Some(options)) => options,
        Ok(None) => {
            println!("{}", usage_text());
            return ExitCode::SUCCESS;
        }
        Err(message) => {
            eprintln!("{message}\n\n{}", usage_text());
            return ExitCode::from(2);
        }
    };

    init_tracing();
    app::runner::run(options)
}

/// `Ok(None)` means help was requested.
fn parse_args(args: Vec<String>) -> Result<Option<HostOptions>, String> {
    let mut options = HostOptions::default();
    let mut index = 0usize;
    while index < args.len() {
        let flag = args[index].as_str();
        let slot = match flag {
            "-h" | "--help" => return Ok(None),
            "--floor-plan" => &mut options.floor_plan,
            "--entities" => &mut options.entities,
            "--script" => &mut options.script,
            other => return Err(format!("unknown argument '{other}'")),
        };
        let value = args
            .get(index + 1)
            .ok_or_else(|| format!("missing value for {flag}"))?;
        *slot = Some(PathBuf::from(value));
        index += 2;
    }
    Ok(Some(options))
}

fn usage_text() -> String {
    [
        "mallscape - headless virtual mall session replayer",
        "",
        "Usage:",
        "  mallscape [--floor-plan <path>] [--entities <path>] [--script <path>]",
        "",
        "Without --script the script is read from stdin.",
        "Frames are printed to stdout as JSON lines; logs go to stderr (RUST_LOG).",
        "",
        "Environment:",
        "  MALLSCAPE_FLOOR_PLAN        floor plan used when --floor-plan is absent",
        "  MALLSCAPE_WALK_SPEED        multiplier on the key step",
        "  MALLSCAPE_GESTURE_CONTROL   on|off",
        "  MALLSCAPE_PROXIMITY_POLICY  first-match|nearest",
    ]
    .join("\n")
}
