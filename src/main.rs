// SPDX-FileCopyrightText: 2026 Flowsketch Authors
// SPDX-License-Identifier: MIT

//! Flowsketch CLI entrypoint.
//!
//! Runs the interactive TUI. The generation service endpoint, the export
//! directory, and the rendering-engine command are the only knobs.

use std::error::Error;
use std::path::PathBuf;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--endpoint <url>] [--export-dir <dir>] [--render-cmd <command>]\n\n--endpoint is the diagram generation service (default {default_endpoint}).\n--export-dir receives diagram.svg/diagram.png/diagram.pdf (default: current directory).\n--render-cmd is the Mermaid CLI used to render markup (default {default_render}).",
        default_endpoint = flowsketch::generate::DEFAULT_ENDPOINT,
        default_render = flowsketch::render::DEFAULT_RENDER_COMMAND,
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    endpoint: Option<String>,
    export_dir: Option<String>,
    render_cmd: Option<String>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--endpoint" => {
                if options.endpoint.is_some() {
                    return Err(());
                }
                options.endpoint = Some(args.next().ok_or(())?);
            }
            "--export-dir" => {
                if options.export_dir.is_some() {
                    return Err(());
                }
                options.export_dir = Some(args.next().ok_or(())?);
            }
            "--render-cmd" => {
                if options.render_cmd.is_some() {
                    return Err(());
                }
                options.render_cmd = Some(args.next().ok_or(())?);
            }
            _ => return Err(()),
        }
    }

    Ok(options)
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "flowsketch".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        flowsketch::tui::run(flowsketch::tui::RunOptions {
            endpoint: options
                .endpoint
                .unwrap_or_else(|| flowsketch::generate::DEFAULT_ENDPOINT.to_owned()),
            export_dir: PathBuf::from(options.export_dir.unwrap_or_else(|| ".".to_owned())),
            render_command: options
                .render_cmd
                .unwrap_or_else(|| flowsketch::render::DEFAULT_RENDER_COMMAND.to_owned()),
        })
    })();

    if let Err(err) = result {
        eprintln!("flowsketch: {err}");
        std::process::exit(1);
    }
}
