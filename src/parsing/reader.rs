/* Copyright © 2024-2025 Adam Train <adam@trainrelay.net>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 */
use crate::config::config_file::Columns;
use crate::gl::journal::JournalRow;
use crate::util::amount::parse_amount;
use crate::util::date::Date;
use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, warn};
use rust_decimal::Decimal;
use std::io::Read;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReadError {
	#[error("missing required column '{column}'")]
	MissingColumn { column: String },

	#[error("CSV error: {0}")]
	Csv(#[from] csv::Error),

	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),
}

/// Positions of the six journal columns within the header row
struct Layout {
	date: usize,
	description: usize,
	debit_account: usize,
	debit_amount: usize,
	credit_account: usize,
	credit_amount: usize,
}

impl Layout {
	fn locate(headers: &StringRecord, columns: &Columns) -> Result<Self, ReadError> {
		let find = |name: &str| {
			headers
				.iter()
				.position(|h| h.trim() == name)
				.ok_or_else(|| ReadError::MissingColumn {
					column: name.to_string(),
				})
		};

		Ok(Self {
			date: find(&columns.date)?,
			description: find(&columns.description)?,
			debit_account: find(&columns.debit_account)?,
			debit_amount: find(&columns.debit_amount)?,
			credit_account: find(&columns.credit_account)?,
			credit_amount: find(&columns.credit_amount)?,
		})
	}
}

/// Reads a journal laid out as a CSV table with a header row. Columns are
/// found by the configured header names; any others are ignored.
pub fn read_journal<R: Read>(
	source: R,
	columns: &Columns,
) -> Result<Vec<JournalRow>, ReadError> {
	let mut reader = ReaderBuilder::new()
		.flexible(true)
		.trim(Trim::All)
		.from_reader(source);

	let layout = Layout::locate(reader.headers()?, columns)?;
	let mut rows = Vec::new();

	for (i, record) in reader.records().enumerate() {
		let record = record?;
		// header is line 1
		let line = i + 2;
		let cell = |idx: usize| record.get(idx).unwrap_or("");

		let row = JournalRow {
			date: date_cell(cell(layout.date), line),
			desc: text_cell(cell(layout.description)),
			debit_account: text_cell(cell(layout.debit_account)),
			debit_amount: amount_cell(cell(layout.debit_amount), line),
			credit_account: text_cell(cell(layout.credit_account)),
			credit_amount: amount_cell(cell(layout.credit_amount), line),
		};

		if row == JournalRow::default() {
			continue;
		}
		rows.push(row);
	}

	debug!("read {} journal rows", rows.len());
	Ok(rows)
}

fn text_cell(cell: &str) -> Option<String> {
	let trimmed = cell.trim();
	(!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn date_cell(cell: &str, line: usize) -> Option<Date> {
	if cell.trim().is_empty() {
		return None;
	}
	let date = Date::from_cell(cell);
	if date.is_none() {
		warn!("line {}: unrecognized date '{}', treating as blank", line, cell);
	}
	date
}

fn amount_cell(cell: &str, line: usize) -> Option<Decimal> {
	if cell.trim().is_empty() {
		return None;
	}
	let amount = parse_amount(cell);
	if amount.is_none() {
		warn!(
			"line {}: unrecognized or negative amount '{}', treating as blank",
			line, cell
		);
	}
	amount
}

#[cfg(test)]
mod tests {
	use super::*;

	fn read(csv: &str) -> Result<Vec<JournalRow>, ReadError> {
		read_journal(csv.as_bytes(), &Columns::default())
	}

	const HEADER: &str =
		"date,description,debit_account,debit_amount,credit_account,credit_amount";

	#[test]
	fn test_reads_serial_and_iso_dates() {
		let rows = read(&format!(
			"{}\n45292,Sale,Cash,\"1,000\",Sales Revenue,1000\n2024-01-02,Rent,Rent,300,Cash,300\n",
			HEADER
		))
		.unwrap();

		assert_eq!(rows.len(), 2);
		assert_eq!(rows[0].date.unwrap().to_string(), "2024-01-01");
		assert_eq!(rows[0].debit_amount, Some(Decimal::from(1000)));
		assert_eq!(rows[1].date.unwrap().to_string(), "2024-01-02");
		assert_eq!(rows[1].credit_account.as_deref(), Some("Cash"));
	}

	#[test]
	fn test_continuation_rows_keep_blanks() {
		let rows = read(&format!(
			"{}\n2024-01-05,Bills,Rent,300,Cash,500\n,,Utilities,200,,\n",
			HEADER
		))
		.unwrap();

		assert_eq!(rows.len(), 2);
		assert_eq!(rows[1].date, None);
		assert_eq!(rows[1].desc, None);
		assert_eq!(rows[1].debit_account.as_deref(), Some("Utilities"));
		assert_eq!(rows[1].credit_account, None);
		assert_eq!(rows[1].credit_amount, None);
	}

	#[test]
	fn test_bad_cells_become_blank() {
		let rows = read(&format!(
			"{}\nsoon,Sale,Cash,lots,Sales Revenue,100\n",
			HEADER
		))
		.unwrap();

		assert_eq!(rows[0].date, None);
		assert_eq!(rows[0].debit_amount, None);
		assert_eq!(rows[0].credit_amount, Some(Decimal::from(100)));
	}

	#[test]
	fn test_negative_amounts_become_blank() {
		let rows = read(&format!(
			"{}
2024-01-01,Refund,Cash,-500,Sales Revenue,-500
",
			HEADER
		))
		.unwrap();

		assert_eq!(rows.len(), 1);
		assert_eq!(rows[0].debit_amount, None);
		assert_eq!(rows[0].credit_amount, None);
		assert_eq!(rows[0].debit_account.as_deref(), Some("Cash"));
	}

	#[test]
	fn test_extra_columns_and_order() {
		let csv = "memo,credit_amount,credit_account,debit_amount,debit_account,description,date\n\
			x,50,Cash,50,Rent,Rent,2024-03-01\n";
		let rows = read(csv).unwrap();
		assert_eq!(rows[0].debit_account.as_deref(), Some("Rent"));
		assert_eq!(rows[0].credit_amount, Some(Decimal::from(50)));
	}

	#[test]
	fn test_missing_column() {
		let err = read("date,description,debit_account,debit_amount,credit_account\n")
			.unwrap_err();
		assert!(matches!(err, ReadError::MissingColumn { ref column } if column == "credit_amount"));
		assert_eq!(err.to_string(), "missing required column 'credit_amount'");
	}

	#[test]
	fn test_configured_headers() {
		let columns = Columns {
			date: "日付".to_string(),
			description: "摘要".to_string(),
			debit_account: "借方科目".to_string(),
			debit_amount: "借方金額".to_string(),
			credit_account: "貸方科目".to_string(),
			credit_amount: "貸方金額".to_string(),
		};
		let csv = "日付,摘要,借方科目,借方金額,貸方科目,貸方金額\n2024-04-01,売上,現金,500,売上高,500\n";
		let rows = read_journal(csv.as_bytes(), &columns).unwrap();
		assert_eq!(rows[0].debit_account.as_deref(), Some("現金"));
	}

	#[test]
	fn test_skips_fully_blank_rows() {
		let rows = read(&format!("{}\n,,,,,\n2024-01-01,Sale,Cash,1,Sales Revenue,1\n", HEADER))
			.unwrap();
		assert_eq!(rows.len(), 1);
	}
}
