//! In-memory worksheet backend used by the storage tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use sparksync_core::errors::Result;
use sparksync_core::storage::{WorksheetBackend, WorksheetRow};

#[derive(Default)]
struct Worksheet {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

#[derive(Default)]
pub struct InMemoryWorksheets {
    sheets: Mutex<HashMap<String, Worksheet>>,
    ensure_calls: Mutex<usize>,
    read_calls: Mutex<usize>,
    append_calls: Mutex<usize>,
}

impl InMemoryWorksheets {
    /// Pre-populate a worksheet. Cells missing from a row are left empty.
    pub fn seed(&self, title: &str, headers: &[&str], rows: Vec<WorksheetRow>) {
        let rows = rows
            .into_iter()
            .map(|row| {
                headers
                    .iter()
                    .map(|h| row.get(*h).cloned().unwrap_or_default())
                    .collect()
            })
            .collect();
        self.sheets.lock().unwrap().insert(
            title.to_string(),
            Worksheet {
                headers: headers.iter().map(|h| h.to_string()).collect(),
                rows,
            },
        );
    }

    pub fn headers(&self, title: &str) -> Option<Vec<String>> {
        self.sheets.lock().unwrap().get(title).map(|s| s.headers.clone())
    }

    pub fn rows(&self, title: &str) -> Vec<Vec<String>> {
        self.sheets
            .lock()
            .unwrap()
            .get(title)
            .map(|s| s.rows.clone())
            .unwrap_or_default()
    }

    pub fn ensure_calls(&self) -> usize {
        *self.ensure_calls.lock().unwrap()
    }

    pub fn read_calls(&self) -> usize {
        *self.read_calls.lock().unwrap()
    }

    pub fn append_calls(&self) -> usize {
        *self.append_calls.lock().unwrap()
    }
}

#[async_trait]
impl WorksheetBackend for InMemoryWorksheets {
    async fn ensure_worksheet(&self, title: &str, headers: &[&str]) -> Result<()> {
        *self.ensure_calls.lock().unwrap() += 1;
        self.sheets
            .lock()
            .unwrap()
            .entry(title.to_string())
            .or_insert_with(|| Worksheet {
                headers: headers.iter().map(|h| h.to_string()).collect(),
                rows: Vec::new(),
            });
        Ok(())
    }

    async fn get_rows(&self, title: &str) -> Result<Vec<WorksheetRow>> {
        *self.read_calls.lock().unwrap() += 1;
        let sheets = self.sheets.lock().unwrap();
        let Some(sheet) = sheets.get(title) else {
            return Ok(Vec::new());
        };
        Ok(sheet
            .rows
            .iter()
            .map(|row| {
                sheet
                    .headers
                    .iter()
                    .cloned()
                    .zip(row.iter().cloned())
                    .collect()
            })
            .collect())
    }

    async fn add_rows(&self, title: &str, rows: Vec<Vec<String>>) -> Result<()> {
        *self.append_calls.lock().unwrap() += 1;
        self.sheets
            .lock()
            .unwrap()
            .entry(title.to_string())
            .or_default()
            .rows
            .extend(rows);
        Ok(())
    }
}
