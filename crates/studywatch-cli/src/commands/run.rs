//! The interactive widget: Studywatch's display driver.
//!
//! Polls the engine at the configured tick cadence, renders the
//! two-digit minute display colored by state, and interprets engine
//! events and rejections at this boundary: bell, notice line, break-log
//! record, diagnostic log entry. The engine itself stays side-effect
//! free.
//!
//! Keys: space = study/pause, b = break, f/r = fast-forward/rewind,
//! 0 = reset, q/Esc/Ctrl-C = quit.

use std::io::{self, Write};
use std::time::Instant;

use chrono::{Duration, Utc};
use colored::{Color, Colorize};
use crossterm::cursor::MoveToColumn;
use crossterm::event::{self, Event as InputEvent, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::execute;
use tracing::{error, info, warn};

use studywatch_core::{
    minutes, BreakLog, BreakRecord, Config, CoreError, Event, SessionEngine, SessionState,
};

const NOTICE_SECS: u64 = 2;

struct Notice {
    text: String,
    shown_at: Instant,
}

impl Notice {
    fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            shown_at: Instant::now(),
        }
    }
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let break_log = BreakLog::open_default()?;
    let mut engine = SessionEngine::new(config.break_policy(), Utc::now());

    terminal::enable_raw_mode()?;
    let outcome = drive(&mut engine, &break_log, &config);
    terminal::disable_raw_mode()?;

    // Final report for the session that just ended.
    let studied = engine.studied(Utc::now());
    println!("\nstudied {} min", studied.num_minutes().max(0));
    outcome
}

fn drive(
    engine: &mut SessionEngine,
    break_log: &BreakLog,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let tick = std::time::Duration::from_millis(config.display.tick_interval_ms);
    let step = Duration::seconds(config.controls.adjust_step_secs);
    let mut notice: Option<Notice> = None;

    loop {
        if event::poll(tick)? {
            if let InputEvent::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    && key.code == KeyCode::Char('c')
                {
                    return Ok(());
                }
                let now = Utc::now();
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Char(' ') => {
                        handle(engine.toggle_run(now), break_log, &mut notice);
                    }
                    KeyCode::Char('b') => {
                        handle(engine.toggle_break(now), break_log, &mut notice);
                    }
                    KeyCode::Char('f') => engine.fast_forward(now, step),
                    KeyCode::Char('r') => engine.rewind(now, step),
                    KeyCode::Char('0') => {
                        engine.reset(now);
                    }
                    KeyCode::Char('?') => {
                        notice = Some(Notice::new(
                            "space:study/pause | b:break | f/r:adjust | 0:reset | q:quit",
                        ));
                    }
                    _ => {}
                }
            }
        }

        let poll = engine.tick(Utc::now());
        if let Some(Event::BreakCompleted { .. }) = poll.event {
            info!("break complete");
            alert(&mut notice, "break over -- session stopped");
        }
        notice = notice.filter(|n| n.shown_at.elapsed().as_secs() < NOTICE_SECS);
        render(engine.state(), poll.display, notice.as_ref())?;
    }
}

/// Interpret a transition result at the driver boundary.
fn handle(result: Result<Event, CoreError>, break_log: &BreakLog, notice: &mut Option<Notice>) {
    match result {
        Ok(Event::BreakStarted {
            studied_secs,
            break_secs,
            at,
        }) => {
            info!(studied_secs, break_secs, "break started");
            // Fire-and-forget: a failed record never stalls the widget.
            if let Err(e) = break_log.record(&BreakRecord {
                started_at: at,
                break_secs,
            }) {
                warn!("break log write failed: {e}");
            }
        }
        Ok(_) => {}
        Err(CoreError::InvalidOperation(op)) => {
            warn!("rejected: {op}");
            alert(notice, &op.to_string());
        }
        Err(e) => {
            // Internal faults are loud but must not kill the widget loop.
            error!("internal fault: {e}");
            alert(notice, &format!("internal fault: {e}"));
        }
    }
}

fn alert(notice: &mut Option<Notice>, text: &str) {
    // BEL is the whole audio subsystem here.
    print!("\x07");
    let _ = io::stdout().flush();
    *notice = Some(Notice::new(text));
}

fn state_color(state: SessionState) -> Color {
    match state {
        SessionState::Paused => Color::Yellow,
        SessionState::Running => Color::Green,
        SessionState::Breaking => Color::Cyan,
        SessionState::Stopped => Color::Red,
    }
}

fn render(
    state: SessionState,
    display: Duration,
    notice: Option<&Notice>,
) -> io::Result<()> {
    let time = minutes(display).color(state_color(state)).bold();
    let line = match notice {
        Some(n) => format!(" {time}  {}", n.text.as_str().dimmed()),
        None => format!(" {time}"),
    };
    execute!(
        io::stdout(),
        MoveToColumn(0),
        Clear(ClearType::CurrentLine),
        Print(line)
    )
}
