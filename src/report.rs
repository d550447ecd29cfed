//! Plain-text listing of the collected applicants

use crate::applicants::ApplicantRecord;
use crate::error::Result;
use std::fmt::Write as _;
use std::path::Path;

/// Numbered listing followed by the total count
pub fn render(records: &[ApplicantRecord]) -> String {
    let mut out = String::new();

    for (i, record) in records.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, record.name);
        let _ = writeln!(out, "   Email: {}", record.email);
        let _ = writeln!(out, "   Phone: {}", record.phone);
        out.push('\n');
    }

    let _ = writeln!(out, "Total applicants: {}", records.len());
    out
}

/// Write the listing to `path`, replacing any existing file
pub fn write(path: &Path, records: &[ApplicantRecord]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    std::fs::write(path, render(records))?;
    log::info!("Wrote {} applicants to {}", records.len(), path.display());
    Ok(())
}
