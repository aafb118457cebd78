use crate::cli::ProbeArgs;
use crate::commands::CommandError;
use crate::config::Settings;
use crate::core::display::render_probe_report;
use crate::services::ConnectivityProbe;
use std::io::Write;

/// Run the connectivity checks and print the report
///
/// Individual check failures are part of the report, not errors.
pub async fn run<W: Write>(
    settings: &Settings,
    args: ProbeArgs,
    out: &mut W,
) -> Result<(), CommandError> {
    let probe = ConnectivityProbe::from_settings(&settings.api, &settings.http)?;
    let report = probe.run().await;

    if args.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        writeln!(out, "{}", render_probe_report(&report))?;
    }
    Ok(())
}
