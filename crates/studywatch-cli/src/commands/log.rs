use clap::Subcommand;
use studywatch_core::BreakLog;

#[derive(Subcommand)]
pub enum LogAction {
    /// Show the most recent break record
    Show,
    /// Print the break log path
    Path,
}

pub fn run(action: LogAction) -> Result<(), Box<dyn std::error::Error>> {
    let log = BreakLog::open_default()?;
    match action {
        LogAction::Show => match log.last()? {
            Some(record) => println!(
                "{}  {}s",
                record.started_at.to_rfc3339(),
                record.break_secs
            ),
            None => println!("no break recorded"),
        },
        LogAction::Path => println!("{}", log.path().display()),
    }
    Ok(())
}
