// Library module for testable functions

pub mod altos;

/// Local file name for the weekly snapshot published on `date` (`YYYY-MM-DD`)
pub fn snapshot_file_name(date: &str) -> String {
    format!("altos-rental-{}.csv.gz", date)
}
