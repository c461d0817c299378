use anyhow::Result;
use std::path::PathBuf;

use strainview::catalog::ChannelKind;
use strainview::config::SessionConfig;
use strainview::session::Session;

use super::open_session;

/// Display channels and sensor groups of a .dat file
pub fn run(config: SessionConfig, file: PathBuf) -> Result<()> {
    let session = open_session(config, &file, &[])?;

    #[cfg(feature = "colorized_output")]
    {
        print!("{}", format_colored(&session, &file));
    }

    #[cfg(not(feature = "colorized_output"))]
    {
        print!("{}", format_plain(&session, &file));
    }

    Ok(())
}

/// Plain text report, one section per line group
#[cfg_attr(feature = "colorized_output", allow(dead_code))]
fn format_plain(session: &Session, file: &std::path::Path) -> String {
    let mut output = String::new();
    let (Some(dataset), Some(catalog), Some(groups)) =
        (session.dataset(), session.catalog(), session.sensor_groups())
    else {
        return output;
    };

    output.push_str("strainview File Information\n");
    output.push_str("===========================\n");
    output.push_str(&format!("File: {}\n\n", file.display()));

    output.push_str(&format!("Rows: {}\n", dataset.row_count()));
    output.push_str(&format!("Columns: {}\n", dataset.column_count()));
    output.push_str(&format!("Load column: {}\n\n", catalog.load_column()));

    output.push_str("Strain channels:\n");
    for channel in catalog.channels().iter().filter(|c| c.kind == ChannelKind::Strain) {
        output.push_str(&format!(
            "  {} ({})\n",
            channel.name,
            channel.unit.as_deref().unwrap_or("-")
        ));
    }
    output.push('\n');

    output.push_str(&format!("Shear rosettes ({}):\n", groups.shear_rosettes().len()));
    for group in groups.shear_rosettes() {
        output.push_str(&format!("  {}\n", group));
    }
    output.push_str(&format!("Average pairs ({}):\n", groups.average_pairs().len()));
    for group in groups.average_pairs() {
        output.push_str(&format!("  {}\n", group));
    }

    for group in groups.mixed_suffix_groups() {
        output.push_str(&format!("WARNING: mixed monitor suffixes in group {}\n", group));
    }
    output
}

#[cfg(feature = "colorized_output")]
fn format_colored(session: &Session, file: &std::path::Path) -> String {
    use console::{style, Emoji};

    static WARN: Emoji<'_, '_> = Emoji("⚠", "[WARN]");

    let mut output = String::new();
    let (Some(dataset), Some(catalog), Some(groups)) =
        (session.dataset(), session.catalog(), session.sensor_groups())
    else {
        return output;
    };

    output.push_str(&format!("{}\n", style("strainview File Information").bold().cyan()));
    output.push_str(&format!("{}\n", style("===========================").cyan()));
    output.push_str(&format!("{}: {}\n\n", style("File").bold(), file.display()));

    output.push_str(&format!("{}: {}\n", style("Rows").bold(), dataset.row_count()));
    output.push_str(&format!("{}: {}\n", style("Columns").bold(), dataset.column_count()));
    output.push_str(&format!(
        "{}: {}\n\n",
        style("Load column").bold(),
        style(catalog.load_column()).green()
    ));

    output.push_str(&format!("{}\n", style("Strain channels:").bold()));
    for channel in catalog.channels().iter().filter(|c| c.kind == ChannelKind::Strain) {
        output.push_str(&format!(
            "  {} ({})\n",
            channel.name,
            style(channel.unit.as_deref().unwrap_or("-")).dim()
        ));
    }
    output.push('\n');

    let sections = [
        ("Shear rosettes", groups.shear_rosettes()),
        ("Average pairs", groups.average_pairs()),
    ];
    for (title, members) in sections {
        output.push_str(&format!(
            "{} ({}):\n",
            style(title).bold(),
            style(members.len()).green()
        ));
        for group in members {
            output.push_str(&format!("  {}\n", group));
        }
    }

    for group in groups.mixed_suffix_groups() {
        output.push_str(&format!(
            "[{}] {}: mixed monitor suffixes in group {}\n",
            WARN,
            style("WARNING").yellow().bold(),
            group
        ));
    }
    output
}
