// Copyright 2023 System76 <info@system76.com>
// SPDX-License-Identifier: MPL-2.0

use std::process::{Command, Output, Stdio};

use crate::Error;

pub const PROGRAM: &str = "xrandr";

/// The command line as it would be typed into a shell, for echoing before
/// execution and for dry runs.
#[must_use]
pub fn command_line(args: &[String]) -> String {
    format!("{PROGRAM} {}", args.join(" "))
}

/// Runs `xrandr` to completion with the given arguments, capturing both
/// output streams. No timeout is applied; the caller relays the captured
/// output and exit status verbatim.
///
/// # Errors
///
/// Returns error if `xrandr` could not be spawned at all.
pub fn run(args: &[String]) -> Result<Output, Error> {
    tracing::debug!(?args, "running {PROGRAM}");

    Command::new(PROGRAM)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .map_err(Error::Spawn)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_is_shell_like() {
        let args = ["--output", "DP-1", "--primary"].map(str::to_owned);
        assert_eq!(command_line(&args), "xrandr --output DP-1 --primary");
    }
}
