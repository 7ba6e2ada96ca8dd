use std::fmt;

use mallscape_engine::{InputAction, TaskId};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ScriptCommand {
    Select,
    Deselect,
    Enter,
    Exit,
    Unmount,
    Press(InputAction),
    Release(InputAction),
    Wait { ms: u64 },
    Container { width: f32, height: f32 },
    PointerDown { x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    PointerUp,
    ClearEntities,
    RestoreEntities,
    Task(TaskId),
    Feature(Option<usize>),
    ResetTour,
    Frame,
    Transition,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ScriptLine {
    pub(crate) line: usize,
    pub(crate) command: ScriptCommand,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ScriptParseError {
    line: usize,
    reason: String,
    usage: &'static str,
}

impl fmt::Display for ScriptParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "script line {}: {} (usage: {})",
            self.line, self.reason, self.usage
        )
    }
}

/// Blank lines and `#` comments are skipped; line numbers stay 1-based.
pub(crate) fn parse_script(content: &str) -> Result<Vec<ScriptLine>, ScriptParseError> {
    let mut lines = Vec::new();
    for (index, raw) in content.lines().enumerate() {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let line = index + 1;
        let tokens = trimmed.split_whitespace().collect::<Vec<_>>();
        let command = parse_command(&tokens).map_err(|(reason, usage)| ScriptParseError {
            line,
            reason,
            usage,
        })?;
        lines.push(ScriptLine { line, command });
    }
    Ok(lines)
}

type ParseResult = Result<ScriptCommand, (String, &'static str)>;

fn parse_command(tokens: &[&str]) -> ParseResult {
    let Some((name, args)) = tokens.split_first() else {
        return Err(("empty command".to_string(), "<command> [args]"));
    };
    match name.to_ascii_lowercase().as_str() {
        "select" => no_args(args, ScriptCommand::Select, "select"),
        "deselect" => no_args(args, ScriptCommand::Deselect, "deselect"),
        "enter" => no_args(args, ScriptCommand::Enter, "enter"),
        "exit" => no_args(args, ScriptCommand::Exit, "exit"),
        "unmount" => no_args(args, ScriptCommand::Unmount, "unmount"),
        "press" => parse_action(args, "press <up|down|left|right>").map(ScriptCommand::Press),
        "release" => {
            parse_action(args, "release <up|down|left|right>").map(ScriptCommand::Release)
        }
        "wait" => parse_wait(args),
        "container" => {
            let (width, height) = parse_pair(args, "container <width> <height>")?;
            Ok(ScriptCommand::Container { width, height })
        }
        "pointer" => parse_pointer(args),
        "entities" => parse_entities(args),
        "task" => parse_task(args),
        "feature" => parse_feature(args),
        "reset-tour" => no_args(args, ScriptCommand::ResetTour, "reset-tour"),
        "frame" => no_args(args, ScriptCommand::Frame, "frame"),
        "transition" => no_args(args, ScriptCommand::Transition, "transition"),
        other => Err((format!("unknown command '{other}'"), "<command> [args]")),
    }
}

fn no_args(args: &[&str], command: ScriptCommand, usage: &'static str) -> ParseResult {
    if args.is_empty() {
        Ok(command)
    } else {
        Err(("unexpected extra arguments".to_string(), usage))
    }
}

fn parse_action(args: &[&str], usage: &'static str) -> Result<InputAction, (String, &'static str)> {
    match args {
        [direction] => direction
            .to_ascii_lowercase()
            .parse::<InputAction>()
            .map_err(|reason| (reason, usage)),
        _ => Err(("expected exactly one direction".to_string(), usage)),
    }
}

fn parse_wait(args: &[&str]) -> ParseResult {
    const USAGE: &str = "wait <ms:u64>";
    match args {
        [ms] => ms
            .parse::<u64>()
            .map(|ms| ScriptCommand::Wait { ms })
            .map_err(|_| (format!("invalid duration '{ms}' (expected u64)"), USAGE)),
        _ => Err(("expected exactly one argument <ms>".to_string(), USAGE)),
    }
}

fn parse_pair(args: &[&str], usage: &'static str) -> Result<(f32, f32), (String, &'static str)> {
    let [a, b] = args else {
        return Err(("expected two numbers".to_string(), usage));
    };
    let parse = |raw: &str| {
        raw.parse::<f32>()
            .map_err(|_| (format!("invalid number '{raw}' (expected f32)"), usage))
    };
    Ok((parse(a)?, parse(b)?))
}

fn parse_pointer(args: &[&str]) -> ParseResult {
    const USAGE: &str = "pointer <down|move> <x> <y> | pointer up";
    let Some((phase, rest)) = args.split_first() else {
        return Err(("missing pointer phase".to_string(), USAGE));
    };
    match *phase {
        "down" => {
            let (x, y) = parse_pair(rest, USAGE)?;
            Ok(ScriptCommand::PointerDown { x, y })
        }
        "move" => {
            let (x, y) = parse_pair(rest, USAGE)?;
            Ok(ScriptCommand::PointerMove { x, y })
        }
        "up" => no_args(rest, ScriptCommand::PointerUp, USAGE),
        other => Err((format!("unknown pointer phase '{other}'"), USAGE)),
    }
}

fn parse_entities(args: &[&str]) -> ParseResult {
    const USAGE: &str = "entities <clear|restore>";
    match args {
        ["clear"] => Ok(ScriptCommand::ClearEntities),
        ["restore"] => Ok(ScriptCommand::RestoreEntities),
        _ => Err(("expected clear or restore".to_string(), USAGE)),
    }
}

fn parse_task(args: &[&str]) -> ParseResult {
    const USAGE: &str = "task <tryOn|addToCart|visitStore|...>";
    match args {
        [name] => name
            .parse::<TaskId>()
            .map(ScriptCommand::Task)
            .map_err(|reason| (reason, USAGE)),
        _ => Err(("expected exactly one task id".to_string(), USAGE)),
    }
}

fn parse_feature(args: &[&str]) -> ParseResult {
    const USAGE: &str = "feature <index:usize|none>";
    match args {
        ["none"] => Ok(ScriptCommand::Feature(None)),
        [index] => index
            .parse::<usize>()
            .map(|index| ScriptCommand::Feature(Some(index)))
            .map_err(|_| (format!("invalid feature index '{index}'"), USAGE)),
        _ => Err(("expected exactly one argument".to_string(), USAGE)),
    }
}
