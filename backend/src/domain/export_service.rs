//! CSV export of the transaction history.

use anyhow::{anyhow, Result};
use tracing::info;

use crate::domain::budget_statistics::round_2dp;
use crate::domain::transaction_service::TransactionService;
use crate::storage::Connection;

pub const EXPORT_FILENAME: &str = "transactions.csv";

const CSV_HEADER: [&str; 6] = ["id", "date", "label", "kind", "category", "amount"];

/// Rendered export ready to be sent as a download
#[derive(Debug, Clone, PartialEq)]
pub struct CsvExport {
    pub csv_content: String,
    pub filename: String,
    pub transaction_count: usize,
}

/// Export service that renders transactions as CSV
#[derive(Clone, Default)]
pub struct ExportService {}

impl ExportService {
    pub fn new() -> Self {
        Self {}
    }

    /// Every transaction, oldest first, one row each
    pub async fn export_transactions_csv<C: Connection>(
        &self,
        transaction_service: &TransactionService<C>,
    ) -> Result<CsvExport> {
        let transactions = transaction_service.list_all_chronological().await?;

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(CSV_HEADER)?;

        for transaction in &transactions {
            writer.write_record([
                transaction.id.to_string(),
                transaction.date.format("%Y-%m-%d").to_string(),
                transaction.label.clone(),
                transaction.kind.as_str().to_string(),
                transaction.category.clone(),
                format!("{:.2}", round_2dp(transaction.amount)),
            ])?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| anyhow!("Failed to flush CSV writer: {}", e.error()))?;
        let csv_content = String::from_utf8(bytes)?;

        info!(
            "Exported {} transactions ({} bytes) as CSV",
            transactions.len(),
            csv_content.len()
        );

        Ok(CsvExport {
            csv_content,
            filename: EXPORT_FILENAME.to_string(),
            transaction_count: transactions.len(),
        })
    }
}
