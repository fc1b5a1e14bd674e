use clap::{Parser, ValueEnum};
use voyager_common::shell;

/// When to colour output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Colour if stdout is a terminal and the environment allows it.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    fn enabled(self) -> Option<bool> {
        match self {
            Self::Auto => None,
            Self::Always => Some(true),
            Self::Never => Some(false),
        }
    }
}

/// Global shell options.
#[derive(Clone, Copy, Debug, Default, Parser)]
pub struct ShellOptions {
    /// Do not print regular output. Warnings and errors are still shown.
    #[arg(long, short, global = true, alias = "silent")]
    pub quiet: bool,

    /// Output coloring.
    #[arg(long, global = true, value_enum, value_name = "WHEN")]
    pub color: Option<ColorChoice>,
}

impl ShellOptions {
    /// Applies the options to the global shell.
    pub fn set_global_shell(self) {
        shell::set_quiet(self.quiet);
        shell::set_colors(self.color.unwrap_or_default().enabled());
    }
}
