//! Export CLI commands
//!
//! Writes ledger CSV to a file or stdout.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::Args;

use crate::error::SpendlogResult;
use crate::export::export_transactions_csv;
use crate::session::Session;
use crate::storage::Storage;

use super::transaction::ListArgs;

/// Arguments for exporting the ledger
#[derive(Args)]
pub struct ExportArgs {
    /// Output file (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub filter: ListArgs,
}

/// Handle the export command
pub fn handle_export(storage: &Storage, session: &Session, args: ExportArgs) -> SpendlogResult<()> {
    let filter = args.filter.into_filter()?;

    let count = match args.output {
        Some(path) => {
            let file = File::create(&path)?;
            let mut writer = BufWriter::new(file);
            let count = export_transactions_csv(storage, session, filter, &mut writer)?;
            writer.flush()?;
            eprintln!("Exported {} transactions to {}", count, path.display());
            count
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            export_transactions_csv(storage, session, filter, &mut writer)?
        }
    };

    if count == 0 {
        eprintln!("Note: no transactions matched the filter");
    }
    Ok(())
}
