//! CSV export of the whole ledger.

use std::{io, path::Path};

use csv::Writer;
use serde::Serialize;

use crate::{Engine, EngineError, LedgerEntry, ResultEngine};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Serialize)]
struct ExportRow<'a> {
    id: i64,
    timestamp: String,
    entry_type: &'static str,
    category: &'a str,
    amount: String,
    note: &'a str,
}

/// Writes `entries` as CSV (with header) into `writer` and hands it back.
pub fn write_csv<W: io::Write>(entries: &[LedgerEntry], writer: W) -> ResultEngine<W> {
    let mut writer = Writer::from_writer(writer);
    for entry in entries {
        writer.serialize(ExportRow {
            id: entry.id,
            timestamp: entry.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            entry_type: entry.entry_type.as_str(),
            category: &entry.category,
            amount: entry.amount.to_plain_string(),
            note: &entry.note,
        })?;
    }
    writer
        .into_inner()
        .map_err(|err| EngineError::Io(err.into_error()))
}

impl Engine {
    /// The whole ledger as CSV bytes, oldest entry first.
    pub async fn export_csv(&self) -> ResultEngine<Vec<u8>> {
        let entries = self.all_entries().await?;
        write_csv(&entries, Vec::new())
    }

    /// Rewrites `path` with the current CSV export.
    ///
    /// The file is replaced through a rename so readers never see a partial
    /// export.
    pub async fn mirror_csv(&self, path: &Path) -> ResultEngine<()> {
        let data = self.export_csv().await?;
        let tmp = path.with_extension("csv.tmp");
        std::fs::write(&tmp, data)?;
        std::fs::rename(&tmp, path)?;
        tracing::debug!("csv mirror refreshed at {}", path.display());
        Ok(())
    }
}
