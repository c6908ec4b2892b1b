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
use crate::gl::journal::Journal;
use crate::reports::ledger_reporter::fmt_date;
use crate::reports::table::Table;
use crate::util::amount::fmt_amount;
use rust_decimal::Decimal;

/// Prints the journal as entered, with the transaction each line belongs
/// to. Blank cells stay blank.
pub struct JournalReporter<'a> {
	journal: &'a Journal,
}

impl<'a> JournalReporter<'a> {
	pub fn new(journal: &'a Journal) -> Self {
		Self { journal }
	}

	pub fn table(&self) -> Table {
		let mut table = Table::new(7);
		table.right_align(vec![0, 4, 6]);
		table.add_header(vec![
			"Txn",
			"Date",
			"Description",
			"Debit account",
			"Debit",
			"Credit account",
			"Credit",
		]);
		table.add_separator();

		for numbered in self.journal.rows() {
			let row = &numbered.row;
			let amount =
				|a: &Option<Decimal>| a.as_ref().map(fmt_amount).unwrap_or_default();
			table.add_row(vec![
				numbered.txn_id.to_string(),
				fmt_date(&row.date),
				row.desc.clone().unwrap_or_default(),
				row.debit_account.clone().unwrap_or_default(),
				amount(&row.debit_amount),
				row.credit_account.clone().unwrap_or_default(),
				amount(&row.credit_amount),
			]);
		}
		table
	}

	pub fn print(&self) {
		if self.journal.is_empty() {
			println!("No data");
			return;
		}
		self.table().print();
	}
}
