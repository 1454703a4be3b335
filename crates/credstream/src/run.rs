// SPDX-FileCopyrightText: 2026 Credstream Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Run a child command with resolved values injected and output masked.
//!
//! The analog of a build wrapper: the child gets `{prefix}USERNAME` /
//! `{prefix}PASSWORD` in its environment, and everything it prints flows
//! through a [`MaskingWriter`] fed by the run's registry before reaching the
//! parent's stdout/stderr.

use std::io::{Read, Write};
use std::process::{Command, Stdio};
use std::thread;

use credstream_mask::{MaskRegistry, MaskingWriter};

/// Spawn `command`, pump its output through masking writers, and return its
/// exit code.
pub fn run_masked(
    command: &[String],
    envs: Vec<(String, String)>,
    registry: &MaskRegistry,
) -> std::io::Result<i32> {
    let (status, _, _) = run_masked_with(
        command,
        envs,
        registry,
        std::io::stdout(),
        std::io::stderr(),
    )?;
    Ok(status)
}

/// As [`run_masked`], but with explicit sinks; returns the exit code and the
/// sinks after the masked output has been flushed into them.
pub fn run_masked_with<O, E>(
    command: &[String],
    envs: Vec<(String, String)>,
    registry: &MaskRegistry,
    out_sink: O,
    err_sink: E,
) -> std::io::Result<(i32, O, E)>
where
    O: Write + Send + 'static,
    E: Write + Send + 'static,
{
    let (program, args) = command
        .split_first()
        .ok_or_else(|| std::io::Error::other("no command given"))?;

    let mut child = Command::new(program)
        .args(args)
        .envs(envs)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    // Stdio::piped() guarantees both handles exist.
    let stdout = child.stdout.take().expect("child stdout is piped");
    let stderr = child.stderr.take().expect("child stderr is piped");

    let out_pump = pump(stdout, out_sink, registry.clone());
    let err_pump = pump(stderr, err_sink, registry.clone());

    let status = child.wait()?;
    let out_sink = out_pump.join().map_err(|_| pump_panic())??;
    let err_sink = err_pump.join().map_err(|_| pump_panic())??;

    Ok((status.code().unwrap_or(1), out_sink, err_sink))
}

/// Copy reader to a masking writer on its own thread; a single flush at end
/// of stream drains the look-back tail without breaking cross-chunk masking.
fn pump<R, W>(
    reader: R,
    sink: W,
    registry: MaskRegistry,
) -> thread::JoinHandle<std::io::Result<W>>
where
    R: Read + Send + 'static,
    W: Write + Send + 'static,
{
    thread::spawn(move || {
        let mut reader = reader;
        let mut writer = MaskingWriter::new(sink, registry);
        std::io::copy(&mut reader, &mut writer)?;
        writer.finish()
    })
}

fn pump_panic() -> std::io::Error {
    std::io::Error::other("output pump thread panicked")
}
