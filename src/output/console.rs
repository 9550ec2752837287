//! Console output utilities.

use std::path::Path;

use console::style;

use crate::config::OutputMode;
use crate::portal::MaterialKind;

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("INFO").cyan().bold(), message);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("OK").green().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("WARN").yellow().bold(), message);
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("ERROR").red().bold(), message);
}

/// Print the application banner.
pub fn print_banner() {
    let banner = r#"
╔═══════════════════════════════════════════════════════╗
║     PESU Downloader                                   ║
║     Course material downloader for PESU Academy       ║
╚═══════════════════════════════════════════════════════╝
"#;
    println!("{}", style(banner).cyan());
}

/// Print configuration summary.
pub fn print_config_summary(
    course: &str,
    semester: u8,
    mode: OutputMode,
    kind: MaterialKind,
    output: Option<&Path>,
) {
    println!();
    println!("{}", style("Configuration:").bold());
    println!("  Course:    {}", course);
    println!("  Semester:  {}", semester);
    println!("  Mode:      {}", mode);
    println!("  Materials: {}", kind);
    match output {
        Some(path) => println!("  Output:    {}", path.display()),
        None => println!("  Output:    (named after the course)"),
    }
    println!();
}
