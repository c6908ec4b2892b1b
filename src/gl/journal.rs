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
use crate::util::date::{Date, Period};
use log::{debug, warn};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeSet;

/// One line of the journal sheet as it was typed. A line may carry a debit
/// leg, a credit leg, or both. Continuation lines of a compound entry leave
/// the date and description blank.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct JournalRow {
	pub date: Option<Date>,
	pub desc: Option<String>,
	pub debit_account: Option<String>,
	pub debit_amount: Option<Decimal>,
	pub credit_account: Option<String>,
	pub credit_amount: Option<Decimal>,
}

impl JournalRow {
	/// A line with a date or a description opens a new transaction.
	pub fn starts_transaction(&self) -> bool {
		self.date.is_some() || self.desc.is_some()
	}
}

/// A journal line tagged with the transaction it belongs to.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NumberedRow {
	pub txn_id: usize,
	#[serde(flatten)]
	pub row: JournalRow,
}

/// The journal in file order with transaction ids assigned. Dates and
/// descriptions remain exactly as entered; use filled() for a view where
/// continuation lines inherit them.
#[derive(Clone, Debug, Default)]
pub struct Journal {
	rows: Vec<NumberedRow>,
}

impl Journal {
	/// Numbers transactions from 1 in file order. Lines before the first
	/// transaction start belong to no transaction and get id 0.
	pub fn new(rows: Vec<JournalRow>) -> Self {
		let mut txn_id = 0;
		let mut orphans = 0;

		let rows: Vec<NumberedRow> = rows
			.into_iter()
			.map(|row| {
				if row.starts_transaction() {
					txn_id += 1;
				} else if txn_id == 0 {
					orphans += 1;
				}
				NumberedRow { txn_id, row }
			})
			.collect();

		if orphans > 0 {
			warn!(
				"{} line(s) precede the first dated or described line and \
				belong to no transaction",
				orphans
			);
		}
		debug!("journal: {} lines, {} transactions", rows.len(), txn_id);

		Self { rows }
	}

	pub fn rows(&self) -> &[NumberedRow] {
		&self.rows
	}

	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}

	/// The one place continuation lines are filled in. The date carries
	/// over from the most recent dated line, since an undated entry is
	/// written on the same day as the one above it. The description only
	/// carries within a transaction, so an entry typed without one never
	/// borrows the text of an unrelated entry.
	pub fn filled(&self) -> FilledJournal {
		let mut last_date: Option<Date> = None;
		let mut last_desc: Option<(usize, String)> = None;

		let rows = self
			.rows
			.iter()
			.map(|numbered| {
				let row = &numbered.row;

				if row.date.is_some() {
					last_date = row.date;
				}
				if let Some(desc) = &row.desc {
					last_desc = Some((numbered.txn_id, desc.clone()));
				}

				let desc = match &last_desc {
					Some((id, desc)) if *id == numbered.txn_id => desc.clone(),
					_ => String::new(),
				};

				FilledRow {
					txn_id: numbered.txn_id,
					date: last_date,
					desc,
					debit_account: row.debit_account.clone(),
					debit_amount: row.debit_amount.unwrap_or_default(),
					credit_account: row.credit_account.clone(),
					credit_amount: row.credit_amount.unwrap_or_default(),
				}
			})
			.collect();

		FilledJournal { rows }
	}

	/// Every line of every transaction that has at least one line dated
	/// inside the period. Transactions are never split: undated
	/// continuation lines come along with their first line, unchanged.
	pub fn extract(&self, period: &Period) -> Journal {
		let filled = self.filled();

		let in_period: BTreeSet<usize> = filled
			.rows()
			.iter()
			.filter(|r| r.date.is_some_and(|d| period.contains(&d)))
			.map(|r| r.txn_id)
			.collect();

		let rows: Vec<NumberedRow> = self
			.rows
			.iter()
			.filter(|r| in_period.contains(&r.txn_id))
			.cloned()
			.collect();

		debug!(
			"period {}: {} transactions, {} lines",
			period,
			in_period.len(),
			rows.len()
		);

		Journal { rows }
	}

	/// First and last dates entered anywhere in the journal, i.e. the
	/// "all periods" reporting window.
	pub fn full_period(&self) -> Option<Period> {
		let mut dates = self.rows.iter().filter_map(|r| r.row.date);
		let first = dates.next()?;
		let (begin, end) =
			dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
		Some(Period { begin, end })
	}

	/// Distinct calendar years with at least one dated line, ascending.
	pub fn years(&self) -> Vec<i32> {
		self.rows
			.iter()
			.filter_map(|r| r.row.date.map(|d| d.year()))
			.collect::<BTreeSet<i32>>()
			.into_iter()
			.collect()
	}
}

/// A journal line with its date and description filled in and blank
/// amounts read as zero.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FilledRow {
	pub txn_id: usize,
	pub date: Option<Date>,
	pub desc: String,
	pub debit_account: Option<String>,
	pub debit_amount: Decimal,
	pub credit_account: Option<String>,
	pub credit_amount: Decimal,
}

/// Immutable forward-filled view of a Journal. Only Journal::filled() and
/// the filters in this crate construct one, which keeps the fill rules
/// identical for every consumer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilledJournal {
	rows: Vec<FilledRow>,
}

impl FilledJournal {
	pub(crate) fn from_rows(rows: Vec<FilledRow>) -> Self {
		Self { rows }
	}

	pub fn rows(&self) -> &[FilledRow] {
		&self.rows
	}

	pub fn len(&self) -> usize {
		self.rows.len()
	}

	pub fn min_date(&self) -> Option<Date> {
		self.rows.iter().filter_map(|r| r.date).min()
	}
}
