//! Output helpers shared by the voyager binaries.
//!
//! All user-facing output goes through the `sh_*` macros so that `--quiet` and colour
//! settings are honoured in one place.

use crate::io::style::{ERROR, WARN};
use anstyle::Style;
use std::{
    fmt,
    io::{self, Write},
    sync::atomic::{AtomicBool, Ordering},
};

static QUIET: AtomicBool = AtomicBool::new(false);

/// Silences regular output. Warnings and errors are still printed.
pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

/// Returns whether regular output is silenced.
pub fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

/// Forces colours on or off. `None` keeps the tty/env detection of [`yansi`].
pub fn set_colors(enabled: Option<bool>) {
    match enabled {
        Some(true) => yansi::enable(),
        Some(false) => yansi::disable(),
        None => yansi::whenever(yansi::Condition::TTY_AND_COLOR),
    }
}

/// Renders `text` with `style` if colours are enabled.
pub fn styled(style: Style, text: impl fmt::Display) -> String {
    if yansi::is_enabled() { format!("{style}{text}{style:#}") } else { text.to_string() }
}

#[doc(hidden)]
pub fn __print(args: fmt::Arguments<'_>) -> io::Result<()> {
    if is_quiet() {
        return Ok(());
    }
    let mut out = io::stdout().lock();
    out.write_fmt(args)?;
    out.flush()
}

#[doc(hidden)]
pub fn __eprint(args: fmt::Arguments<'_>) -> io::Result<()> {
    let mut err = io::stderr().lock();
    err.write_fmt(args)?;
    err.flush()
}

#[doc(hidden)]
pub fn __warn(args: fmt::Arguments<'_>) -> io::Result<()> {
    __eprint(format_args!("{} {args}\n", styled(WARN, "Warning:")))
}

#[doc(hidden)]
pub fn __error(args: fmt::Arguments<'_>) -> io::Result<()> {
    __eprint(format_args!("{} {args}\n", styled(ERROR, "Error:")))
}

/// Prints to stdout unless quiet. Evaluates to `std::io::Result<()>`.
#[macro_export]
macro_rules! sh_print {
    ($($t:tt)*) => {
        $crate::shell::__print(format_args!($($t)*))
    };
}

/// Prints a line to stdout unless quiet. Evaluates to `std::io::Result<()>`.
#[macro_export]
macro_rules! sh_println {
    () => {
        $crate::shell::__print(format_args!("\n"))
    };
    ($($t:tt)*) => {
        $crate::shell::__print(format_args!("{}\n", format_args!($($t)*)))
    };
}

/// Prints a line to stderr. Evaluates to `std::io::Result<()>`.
#[macro_export]
macro_rules! sh_eprintln {
    () => {
        $crate::shell::__eprint(format_args!("\n"))
    };
    ($($t:tt)*) => {
        $crate::shell::__eprint(format_args!("{}\n", format_args!($($t)*)))
    };
}

/// Prints a warning to stderr. Evaluates to `std::io::Result<()>`.
#[macro_export]
macro_rules! sh_warn {
    ($($t:tt)*) => {
        $crate::shell::__warn(format_args!($($t)*))
    };
}

/// Prints an error to stderr. Evaluates to `std::io::Result<()>`.
#[macro_export]
macro_rules! sh_err {
    ($($t:tt)*) => {
        $crate::shell::__error(format_args!($($t)*))
    };
}
