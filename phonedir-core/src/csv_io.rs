//! CSV bridge: export the contact set, import contacts row by row.

use std::io::Read;

use crate::error::StoreError;
use crate::store::{Contact, ContactStore, NewContact};

/// Export header. Import matches the Name/Phone/Address columns against
/// these labels case-insensitively.
const HEADER: [&str; 5] = ["ID", "Name", "Phone", "Address", "Created At"];

const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Outcome of a CSV import. Partial success is still success.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: usize,
}

/// Render contacts as UTF-8 CSV bytes, one row per contact in the order
/// given (callers pass `list_all()` output). Standard quoting rules apply.
pub fn render_csv(contacts: &[Contact]) -> Result<Vec<u8>, csv::Error> {
    let mut buf = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut buf);
        writer.write_record(HEADER)?;
        for contact in contacts {
            let id = contact.id.to_string();
            let created_at = contact.created_at.format(CREATED_AT_FORMAT).to_string();
            writer.write_record([
                id.as_str(),
                contact.name.as_str(),
                contact.phone.as_str(),
                contact.address.as_str(),
                created_at.as_str(),
            ])?;
        }
        writer.flush()?;
    }
    Ok(buf)
}

/// Import contacts from CSV, one `add` per data row.
///
/// Rows without a usable name or phone are dropped silently and counted in
/// neither tally. Every other per-row failure (duplicate phone, malformed
/// record, store error) counts as skipped and the batch keeps going.
/// Fails outright only when the header row itself cannot be read.
pub async fn import_csv<R: Read>(
    store: &ContactStore<'_>,
    source: R,
) -> Result<ImportReport, csv::Error> {
    let mut reader = csv::Reader::from_reader(source);
    let columns = Columns::from_headers(reader.headers()?);

    let mut report = ImportReport::default();
    for record in reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(err) => {
                tracing::debug!("skipping malformed CSV record: {err}");
                report.skipped += 1;
                continue;
            }
        };

        let Some(contact) = columns.extract(&record) else {
            continue;
        };

        match store.add(&contact).await {
            Ok(_) => report.imported += 1,
            Err(StoreError::DuplicatePhone { phone }) => {
                tracing::debug!("skipping duplicate phone '{phone}'");
                report.skipped += 1;
            }
            Err(err) => {
                tracing::debug!("skipping row for '{}': {err}", contact.name);
                report.skipped += 1;
            }
        }
    }

    Ok(report)
}

/// Column positions resolved from the header row, case-insensitively.
#[derive(Debug, Clone, Copy)]
struct Columns {
    name: Option<usize>,
    phone: Option<usize>,
    address: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Self {
        let find = |wanted: &str| {
            headers
                .iter()
                .position(|header| header.trim().eq_ignore_ascii_case(wanted))
        };
        Self {
            name: find("name"),
            phone: find("phone"),
            address: find("address"),
        }
    }

    /// Pull a draft contact out of a record. None when name or phone is
    /// missing or empty; a missing address column defaults to empty.
    fn extract(&self, record: &csv::StringRecord) -> Option<NewContact> {
        let field = |index: Option<usize>| {
            index
                .and_then(|i| record.get(i))
                .map(str::trim)
                .unwrap_or("")
        };

        let name = field(self.name);
        let phone = field(self.phone);
        if name.is_empty() || phone.is_empty() {
            return None;
        }

        Some(NewContact::new(name, phone, field(self.address)))
    }
}
