/* Copyright © 2024-2025 Adam Train <adam@adamtrain.net>
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
use crate::gl::ledger::{AccountLine, LedgerEntry};
use crate::reports::table::Table;
use crate::util::amount::fmt_amount;
use crate::util::date::Date;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

pub struct LedgerReporter<'a> {
	entries: &'a [LedgerEntry],
}

impl<'a> LedgerReporter<'a> {
	pub fn new(entries: &'a [LedgerEntry]) -> Self {
		Self { entries }
	}

	/// Every leg in journal order, one per line.
	pub fn general_ledger_table(&self) -> Table {
		let mut table = Table::new(7);
		table.right_align(vec![0, 5]);
		table.add_header(vec![
			"Txn",
			"Date",
			"Description",
			"Account",
			"Side",
			"Amount",
			"Counterparty",
		]);
		table.add_separator();

		for entry in self.entries {
			let leg = &entry.leg;
			table.add_row(vec![
				leg.txn_id.to_string(),
				fmt_date(&leg.date),
				leg.desc.clone(),
				leg.account.clone(),
				leg.side.to_string(),
				fmt_amount(&leg.amount),
				entry.counterparty.clone(),
			]);
		}
		table
	}

	/// Reports one account's lines with a running balance.
	///
	/// Has three sections: individual lines, net movement by counterparty,
	/// and the closing balance.
	pub fn account_summary_table(lines: &[AccountLine]) -> Table {
		let mut table = Table::new(7);
		table.right_align(vec![3, 4, 5]);
		table.add_header(vec![
			"Date",
			"Description",
			"Counterparty",
			"Debit",
			"Credit",
			"Balance",
			"Side",
		]);
		table.add_separator();

		// counterparty -> net movement (debits minus credits)
		let mut totals_by_counterparty: BTreeMap<&str, Decimal> = BTreeMap::new();
		let mut debits = Decimal::ZERO;
		let mut credits = Decimal::ZERO;

		for line in lines {
			*totals_by_counterparty
				.entry(line.counterparty.as_str())
				.or_default() += line.debit - line.credit;
			debits += line.debit;
			credits += line.credit;

			table.add_row(vec![
				fmt_date(&line.date),
				line.desc.clone(),
				line.counterparty.clone(),
				fmt_nonzero(&line.debit),
				fmt_nonzero(&line.credit),
				fmt_amount(&line.amount),
				line.side.to_string(),
			]);
		}

		table.add_partial_separator(vec![2, 5]);

		for (counterparty, net) in &totals_by_counterparty {
			table.add_row(vec![
				String::new(),
				String::new(),
				counterparty.to_string(),
				String::new(),
				String::new(),
				fmt_amount(net),
				String::new(),
			]);
		}

		table.add_partial_separator(vec![3, 4, 5]);

		if let Some(last) = lines.last() {
			table.add_row(vec![
				String::new(),
				"Total".to_string(),
				String::new(),
				fmt_amount(&debits),
				fmt_amount(&credits),
				fmt_amount(&last.amount),
				last.side.to_string(),
			]);
		}
		table
	}

	pub fn print_general_ledger(&self) {
		if self.entries.is_empty() {
			println!("No data");
			return;
		}
		self.general_ledger_table().print();
	}

	pub fn print_account_summary(lines: &[AccountLine]) {
		if lines.is_empty() {
			println!("No data");
			return;
		}
		LedgerReporter::account_summary_table(lines).print();
	}
}

pub(crate) fn fmt_date(date: &Option<Date>) -> String {
	date.map(|d| d.to_string()).unwrap_or_default()
}

fn fmt_nonzero(amount: &Decimal) -> String {
	if amount.is_zero() {
		String::new()
	} else {
		fmt_amount(amount)
	}
}
