use super::Context;
use clap::{Parser, ValueEnum};
use eyre::Result;
use voyager_state::{Event, Theme};

/// CLI arguments for `voyager theme`.
#[derive(Clone, Debug, Parser)]
pub struct ThemeArgs {
    /// The theme to use. Prints the current theme if omitted.
    #[arg(value_enum)]
    pub theme: Option<ThemeChoice>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ThemeChoice {
    Dark,
    Light,
    Toggle,
}

impl ThemeChoice {
    fn apply(self, current: Theme) -> Theme {
        match self {
            Self::Dark => Theme::Dark,
            Self::Light => Theme::Light,
            Self::Toggle => current.toggled(),
        }
    }
}

impl ThemeArgs {
    pub fn run(self, ctx: &mut Context) -> Result<()> {
        let current = ctx.theme();
        let Some(choice) = self.theme else {
            sh_println!("{current}")?;
            return Ok(());
        };

        let theme = choice.apply(current);
        ctx.store.dispatch(Event::ThemeSet(theme))?;
        sh_println!("{}", ctx.heading(format_args!("Theme set to {theme}")))?;
        Ok(())
    }
}
