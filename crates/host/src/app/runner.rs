use std::fs;
use std::io::{self, Read, Write};
use std::process::ExitCode;

use mallscape_engine::{ContainerSize, EntityRecord, PixelPoint, Session, SessionEvent};
use serde_json::json;
use tracing::{error, info, trace};

use super::bootstrap::{build_host, HostOptions, HostWiring};
use super::script::{parse_script, ScriptCommand, ScriptLine};

const DEFAULT_CONTAINER: ContainerSize = ContainerSize {
    width: 800.0,
    height: 600.0,
};

pub(crate) fn run(options: HostOptions) -> ExitCode {
    let wiring = match build_host(&options) {
        Ok(wiring) => wiring,
        Err(err) => {
            error!(error = %err, "startup_failed");
            return ExitCode::FAILURE;
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match read_script(&options).and_then(|content| replay(wiring, &content, &mut out)) {
        Ok(summary) => {
            info!(
                commands = summary.commands,
                frames = summary.frames,
                elapsed_ms = summary.clock_ms,
                "script_finished"
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "script_failed");
            ExitCode::FAILURE
        }
    }
}

fn read_script(options: &HostOptions) -> Result<String, String> {
    match &options.script {
        Some(path) => fs::read_to_string(path)
            .map_err(|err| format!("read script '{}': {err}", path.display())),
        None => {
            let mut content = String::new();
            io::stdin()
                .read_to_string(&mut content)
                .map_err(|err| format!("read script from stdin: {err}"))?;
            Ok(content)
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ReplaySummary {
    pub(crate) commands: usize,
    pub(crate) frames: usize,
    pub(crate) clock_ms: u64,
}

/// Drives one session with a virtual clock that only `wait` advances.
struct ScriptRunner<'a, W: Write> {
    session: Session,
    entities: Vec<EntityRecord>,
    clock_ms: u64,
    container: ContainerSize,
    out: &'a mut W,
    summary: ReplaySummary,
}

pub(crate) fn replay<W: Write>(
    wiring: HostWiring,
    content: &str,
    out: &mut W,
) -> Result<ReplaySummary, String> {
    let lines = parse_script(content).map_err(|err| err.to_string())?;
    let mut runner = ScriptRunner {
        session: wiring.session,
        entities: wiring.entities,
        clock_ms: 0,
        container: DEFAULT_CONTAINER,
        out,
        summary: ReplaySummary::default(),
    };
    runner
        .session
        .dispatch(SessionEvent::ReplaceEntities(runner.entities.clone()));
    for line in &lines {
        runner.execute(line)?;
    }
    runner.session.shutdown();
    runner.summary.clock_ms = runner.clock_ms;
    Ok(runner.summary)
}

impl<W: Write> ScriptRunner<'_, W> {
    fn execute(&mut self, line: &ScriptLine) -> Result<(), String> {
        trace!(line = line.line, command = ?line.command, "script_command");
        self.summary.commands += 1;
        let event = match &line.command {
            ScriptCommand::Select => SessionEvent::SelectAvatar,
            ScriptCommand::Deselect => SessionEvent::DeselectAvatar,
            ScriptCommand::Enter => SessionEvent::EnterEnvironment,
            ScriptCommand::Exit => SessionEvent::ExitEnvironment,
            ScriptCommand::Unmount => SessionEvent::Unmount,
            ScriptCommand::Press(action) => SessionEvent::KeyDown { action: *action },
            ScriptCommand::Release(action) => SessionEvent::KeyUp {
                action: *action,
                now_ms: self.clock_ms,
            },
            ScriptCommand::Wait { ms } => {
                self.clock_ms = self.clock_ms.saturating_add(*ms);
                SessionEvent::Tick {
                    now_ms: self.clock_ms,
                }
            }
            ScriptCommand::Container { width, height } => {
                self.container = ContainerSize::new(*width, *height);
                return Ok(());
            }
            ScriptCommand::PointerDown { x, y } => SessionEvent::PointerDown {
                pointer: PixelPoint::new(*x, *y),
                container: self.container,
            },
            ScriptCommand::PointerMove { x, y } => SessionEvent::PointerMove {
                pointer: PixelPoint::new(*x, *y),
                container: self.container,
            },
            ScriptCommand::PointerUp => SessionEvent::PointerUp,
            ScriptCommand::ClearEntities => SessionEvent::ReplaceEntities(Vec::new()),
            ScriptCommand::RestoreEntities => SessionEvent::ReplaceEntities(self.entities.clone()),
            ScriptCommand::Task(task) => SessionEvent::ReportTask(*task),
            ScriptCommand::Feature(index) => SessionEvent::SelectFeature(*index),
            ScriptCommand::ResetTour => SessionEvent::ResetTour,
            ScriptCommand::Frame => return self.emit_frame(line.line),
            ScriptCommand::Transition => {
                let style = self.session.take_transition();
                return self.emit(&json!({
                    "line": line.line,
                    "transition": style,
                }));
            }
        };
        self.session.dispatch(event);
        Ok(())
    }

    fn emit_frame(&mut self, line: usize) -> Result<(), String> {
        let frame = serde_json::to_value(self.session.frame())
            .map_err(|err| format!("serialize frame: {err}"))?;
        self.summary.frames += 1;
        self.emit(&json!({
            "line": line,
            "clockMs": self.clock_ms,
            "frame": frame,
        }))
    }

    fn emit(&mut self, value: &serde_json::Value) -> Result<(), String> {
        writeln!(self.out, "{value}").map_err(|err| format!("write output: {err}"))
    }
}
