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
use crate::gl::carry_forward::CarryForwardFilter;
use crate::gl::classification::{AccountClass, Chart};
use crate::gl::journal::FilledJournal;
use crate::gl::ledger::{legs, BalanceSide, Leg, Side};
use log::debug;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// One account's line on the trial balance.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TrialBalanceRow {
	pub account: String,
	pub debit: Decimal,
	pub credit: Decimal,
	pub class: AccountClass,

	/// Debits minus credits
	pub balance: Decimal,
	pub side: BalanceSide,

	/// Absolute value of the balance, for display on its side
	pub amount: Decimal,
	pub sort_key: u32,
}

impl TrialBalanceRow {
	/// Builds a row from an account's totals. The class passed in is the
	/// account's base class; dynamic accounts are resolved here, once the
	/// balance that decides them is known.
	pub fn new(
		account: &str,
		debit: Decimal,
		credit: Decimal,
		base: AccountClass,
		chart: &Chart,
	) -> Self {
		let balance = debit - credit;
		let class = chart.resolve(account, base, balance);

		Self {
			account: account.to_string(),
			debit,
			credit,
			class,
			balance,
			side: BalanceSide::of(balance),
			amount: balance.abs(),
			sort_key: chart.sort_key(class),
		}
	}
}

/// Per-account debit and credit totals over a journal, ordered by class
/// priority and then account name.
#[derive(Clone, Debug, Default)]
pub struct TrialBalance {
	rows: Vec<TrialBalanceRow>,
}

impl TrialBalance {
	/// The trial balance of a journal that may span several periods. The
	/// carry-forward entries of later periods are removed first so that
	/// the books read as one continuous period.
	pub fn from_journal(
		journal: &FilledJournal,
		chart: &Chart,
		carry_forward: &CarryForwardFilter,
	) -> Self {
		let continuous = carry_forward.apply(journal);
		TrialBalance::from_legs(&legs(&continuous), chart)
	}

	pub fn from_legs(legs: &[Leg], chart: &Chart) -> Self {
		// account -> (debits, credits)
		let mut sums: BTreeMap<&str, (Decimal, Decimal)> = BTreeMap::new();
		for leg in legs {
			let (debit, credit) = sums.entry(&leg.account).or_default();
			match leg.side {
				Side::Debit => *debit += leg.amount,
				Side::Credit => *credit += leg.amount,
			}
		}

		let mut rows: Vec<TrialBalanceRow> = sums
			.into_iter()
			.map(|(account, (debit, credit))| {
				let base = chart.classify_noisy(account);
				TrialBalanceRow::new(account, debit, credit, base, chart)
			})
			.collect();

		sort_rows(&mut rows);
		debug!("trial balance: {} accounts", rows.len());

		Self { rows }
	}

	pub fn rows(&self) -> &[TrialBalanceRow] {
		&self.rows
	}

	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}

	pub fn total_debits(&self) -> Decimal {
		self.rows.iter().map(|r| r.debit).sum()
	}

	pub fn total_credits(&self) -> Decimal {
		self.rows.iter().map(|r| r.credit).sum()
	}

	pub fn is_balanced(&self) -> bool {
		self.total_debits() == self.total_credits()
	}

	/// Sum of the absolute balances of every account in a class.
	pub fn total_for(&self, class: AccountClass) -> Decimal {
		self.rows
			.iter()
			.filter(|r| r.class == class)
			.map(|r| r.amount)
			.sum()
	}
}

/// Class priority first, then account name by codepoint.
fn sort_rows(rows: &mut [TrialBalanceRow]) {
	rows.sort_by(|a, b| {
		a.sort_key
			.cmp(&b.sort_key)
			.then_with(|| a.account.cmp(&b.account))
	});
}
