use super::Context;
use chrono::Utc;
use eyre::Result;
use voyager_common::{io::style, shell};

/// `voyager streak`
pub fn run(ctx: &Context) -> Result<()> {
    let streak = ctx.store.state().streak;
    let days = if streak.count == 1 { "day" } else { "days" };
    sh_println!("{}", shell::styled(style::STREAK, format_args!("{} {days} streak", streak.count)))?;

    match streak.last_greet_at {
        Some(last) if streak.counted_today(Utc::now()) => {
            sh_println!("Today's GM is in (last at {}).", last.format("%H:%M UTC"))?
        }
        Some(last) => sh_println!(
            "Last GM on {}. Send one today to keep the streak going.",
            last.format("%Y-%m-%d")
        )?,
        None => sh_println!("No GM yet. Run `voyager gm` to start a streak.")?,
    }
    Ok(())
}
