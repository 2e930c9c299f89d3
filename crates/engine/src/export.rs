//! CSV export of a transaction listing.

use std::collections::HashMap;

use chrono::NaiveDate;
use csv::WriterBuilder;
use serde::Serialize;

use crate::{EngineError, MoneyCents, ResultEngine, Transaction};

pub const EXPORT_FILE_NAME: &str = "transactions.csv";
pub const EXPORT_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

const HEADER: [&str; 7] = ["id", "date", "kind", "amount", "account", "category", "note"];

#[derive(Serialize)]
struct ExportRow<'a> {
    id: i64,
    date: NaiveDate,
    kind: &'static str,
    amount: MoneyCents,
    account: &'a str,
    category: &'a str,
    note: &'a str,
}

/// Render `transactions` in the given order as a CSV table.
///
/// The header is written even for an empty listing. Account and category
/// columns hold display names, empty when the name is unknown or the
/// transaction is uncategorised. Fields are quoted only when they contain a
/// delimiter, a quote or a line break.
pub fn transactions_csv(
    transactions: &[Transaction],
    account_names: &HashMap<i64, String>,
    category_names: &HashMap<i64, String>,
) -> ResultEngine<String> {
    let export_err = |err: csv::Error| EngineError::Export(err.to_string());

    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(vec![]);
    writer.write_record(HEADER).map_err(export_err)?;
    for tx in transactions {
        writer
            .serialize(ExportRow {
                id: tx.id,
                date: tx.date,
                kind: tx.kind.as_str(),
                amount: tx.amount,
                account: account_names
                    .get(&tx.account_id)
                    .map(String::as_str)
                    .unwrap_or_default(),
                category: tx
                    .category_id
                    .and_then(|id| category_names.get(&id))
                    .map(String::as_str)
                    .unwrap_or_default(),
                note: &tx.note,
            })
            .map_err(export_err)?;
    }

    let data = writer
        .into_inner()
        .map_err(|err| EngineError::Export(err.to_string()))?;
    String::from_utf8(data).map_err(|err| EngineError::Export(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TransactionKind;

    fn tx(id: i64, category_id: Option<i64>, note: &str) -> Transaction {
        Transaction {
            id,
            user_id: "alice".to_string(),
            account_id: 1,
            category_id,
            kind: TransactionKind::Expense,
            amount: MoneyCents::new(1_050),
            date: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
            note: note.to_string(),
            is_recurring: false,
        }
    }

    fn names() -> (HashMap<i64, String>, HashMap<i64, String>) {
        (
            HashMap::from([(1, "Wallet".to_string())]),
            HashMap::from([(4, "Food".to_string())]),
        )
    }

    #[test]
    fn empty_listing_still_has_header() {
        let (accounts, categories) = names();
        let out = transactions_csv(&[], &accounts, &categories).unwrap();
        assert_eq!(out, "id,date,kind,amount,account,category,note\n");
    }

    #[test]
    fn rows_follow_input_order() {
        let (accounts, categories) = names();
        let out = transactions_csv(
            &[tx(9, Some(4), "lunch"), tx(3, None, "")],
            &accounts,
            &categories,
        )
        .unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "9,2024-03-09,EXPENSE,10.50,Wallet,Food,lunch");
        assert_eq!(lines[2], "3,2024-03-09,EXPENSE,10.50,Wallet,,");
    }

    #[test]
    fn notes_with_separators_are_quoted() {
        let (accounts, categories) = names();
        let out = transactions_csv(
            &[tx(1, Some(4), "pizza, \"large\"\nand soda")],
            &accounts,
            &categories,
        )
        .unwrap();
        assert!(out.ends_with(",Food,\"pizza, \"\"large\"\"\nand soda\"\n"));

        let mut reader = csv::Reader::from_reader(out.as_bytes());
        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(&record[6], "pizza, \"large\"\nand soda");
    }
}
