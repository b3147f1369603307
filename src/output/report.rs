//! End-of-run report

/// Totals for one crawl run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlReport {
    /// Pages fetched by the loop
    pub pages_fetched: u32,

    /// Records extracted across all fetched pages
    pub records_extracted: usize,

    /// Data rows written to the CSV file
    pub csv_rows: usize,

    /// Rows newly inserted into the database
    pub saved: u64,

    /// Records skipped because their text was already stored
    pub duplicates: u64,

    pub csv_path: String,
    pub database_path: String,
}

/// Formats a report for the console
pub fn format_report(report: &CrawlReport) -> String {
    let rule = "-".repeat(50);
    let mut out = String::new();

    out.push_str(&format!("{}\n", rule));
    out.push_str(&format!("Pages fetched: {}\n", report.pages_fetched));
    out.push_str(&format!(
        "CSV file: {} ({} rows)\n",
        report.csv_path, report.csv_rows
    ));
    out.push_str(&format!(
        "Database file: {} ({} saved, {} skipped as duplicates)\n",
        report.database_path, report.saved, report.duplicates
    ));
    out.push_str(&format!("{}\n", rule));
    out.push_str(&format!(
        "Total quotes scraped: {}\n",
        report.records_extracted
    ));
    out.push_str("Done!\n");

    out
}

/// Prints a report to stdout
pub fn print_report(report: &CrawlReport) {
    print!("{}", format_report(report));
}
