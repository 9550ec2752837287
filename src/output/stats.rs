//! Statistics reporting.

use console::style;
use indicatif::HumanBytes;

use crate::config::OutputMode;
use crate::download::DownloadState;

/// Print the end-of-run statistics for a download.
pub fn print_run_stats(state: &DownloadState, mode: OutputMode) {
    println!();
    println!(
        "{}",
        style(format!("Statistics for {}:", state.course_title)).bold()
    );
    println!("  Matched:    {}", state.matched);
    println!(
        "  Downloaded: {} ({})",
        state.saved,
        HumanBytes(state.bytes_downloaded)
    );
    if state.failed > 0 {
        println!("  Failed:     {}", style(state.failed).red());
    }
    if state.skipped > 0 {
        println!("  Skipped:    {} (not PDF)", style(state.skipped).yellow());
    }
    if mode == OutputMode::SinglePdf {
        println!("  Units merged:  {}", state.units_merged);
        if state.units_skipped > 0 {
            println!("  Units skipped: {}", style(state.units_skipped).yellow());
        }
    }
    if let Some(root) = &state.output_root {
        println!("  Saved to:   {}", root.display());
    }
}
