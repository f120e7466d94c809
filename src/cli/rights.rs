//! Rights command: print the allow-list

use serde::Serialize;
use tabled::Tabled;

use crate::cli::args::GlobalOptions;
use crate::error::Result;
use crate::output::Formattable;
use crate::resource::TeamRight;

#[derive(Debug, Tabled, Serialize)]
struct AllowedRight {
    #[tabled(rename = "RIGHT")]
    right: &'static str,
}

/// Print every right a team role may carry
pub fn run(opts: &GlobalOptions) -> Result<()> {
    let rows: Vec<AllowedRight> = TeamRight::ALL
        .iter()
        .map(|r| AllowedRight { right: r.as_str() })
        .collect();
    rows.print(opts.format)
}
