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
use crate::config::config_file::Labels;
use crate::gl::journal::FilledJournal;
use crate::util::date::Date;
use log::debug;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
	Debit,
	Credit,
}

impl Side {
	pub fn opposite(&self) -> Side {
		match self {
			Side::Debit => Side::Credit,
			Side::Credit => Side::Debit,
		}
	}
}

impl fmt::Display for Side {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Side::Debit => write!(f, "Debit"),
			Side::Credit => write!(f, "Credit"),
		}
	}
}

/// Which side a balance sits on. Zero balances sit on neither.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BalanceSide {
	Debit,
	Credit,
	None,
}

impl BalanceSide {
	/// Balances are debits minus credits.
	pub fn of(balance: Decimal) -> Self {
		if balance > Decimal::ZERO {
			BalanceSide::Debit
		} else if balance < Decimal::ZERO {
			BalanceSide::Credit
		} else {
			BalanceSide::None
		}
	}
}

impl fmt::Display for BalanceSide {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			BalanceSide::Debit => write!(f, "Dr"),
			BalanceSide::Credit => write!(f, "Cr"),
			BalanceSide::None => write!(f, "-"),
		}
	}
}

/// One side of one journal line: an account, the side it was posted to,
/// and a non-negative amount.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Leg {
	pub txn_id: usize,
	pub date: Option<Date>,
	pub desc: String,
	pub account: String,
	pub side: Side,
	pub amount: Decimal,
}

/// Splits each journal line into its debit leg and then its credit leg.
/// Sides without an account produce nothing; sides with an account but no
/// amount produce a zero leg.
pub fn legs(journal: &FilledJournal) -> Vec<Leg> {
	let mut out = Vec::with_capacity(journal.len() * 2);

	for row in journal.rows() {
		let sides = [
			(Side::Debit, &row.debit_account, row.debit_amount),
			(Side::Credit, &row.credit_account, row.credit_amount),
		];

		for (side, account, amount) in sides {
			if let Some(account) = account {
				out.push(Leg {
					txn_id: row.txn_id,
					date: row.date,
					desc: row.desc.clone(),
					account: account.clone(),
					side,
					amount,
				});
			}
		}
	}

	out
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LedgerEntry {
	#[serde(flatten)]
	pub leg: Leg,

	/// The account on the other side of the transaction, or a label when
	/// there is more than one or none at all.
	pub counterparty: String,
}

/// The general ledger: every leg of the journal with its counterparty.
#[derive(Debug, Default)]
pub struct Ledger {
	entries: Vec<LedgerEntry>,
}

impl Ledger {
	pub fn new(journal: &FilledJournal, labels: &Labels) -> Self {
		let legs = legs(journal);

		// (transaction, side) -> distinct accounts in order of appearance
		let mut accounts_by_side: BTreeMap<(usize, Side), Vec<&str>> =
			BTreeMap::new();
		for leg in &legs {
			let accounts =
				accounts_by_side.entry((leg.txn_id, leg.side)).or_default();
			if !accounts.contains(&leg.account.as_str()) {
				accounts.push(&leg.account);
			}
		}

		let entries: Vec<LedgerEntry> = legs
			.iter()
			.map(|leg| {
				let partners = accounts_by_side
					.get(&(leg.txn_id, leg.side.opposite()))
					.map(|v| v.as_slice())
					.unwrap_or_default();

				let counterparty = match partners {
					[] => labels.no_counterparty.clone(),
					[only] => only.to_string(),
					_ => labels.various.clone(),
				};

				LedgerEntry {
					leg: leg.clone(),
					counterparty,
				}
			})
			.collect();

		debug!("ledger: {} legs", entries.len());

		Self { entries }
	}

	pub fn entries(&self) -> &[LedgerEntry] {
		&self.entries
	}

	/// Every account that appears in the ledger, sorted by name.
	pub fn accounts(&self) -> Vec<String> {
		let mut names: Vec<String> =
			self.entries.iter().map(|e| e.leg.account.clone()).collect();
		names.sort();
		names.dedup();
		names
	}

	/// The history of a single account in date order, with a running
	/// balance (debits minus credits) after each line.
	pub fn account_history(&self, account: &str) -> Vec<AccountLine> {
		let mut entries: Vec<&LedgerEntry> = self
			.entries
			.iter()
			.filter(|e| e.leg.account == account)
			.collect();
		entries.sort_by_key(|e| (e.leg.date, e.leg.txn_id));

		let mut running = Decimal::ZERO;
		entries
			.into_iter()
			.map(|e| {
				let (debit, credit) = match e.leg.side {
					Side::Debit => (e.leg.amount, Decimal::ZERO),
					Side::Credit => (Decimal::ZERO, e.leg.amount),
				};
				running += debit - credit;

				AccountLine {
					date: e.leg.date,
					txn_id: e.leg.txn_id,
					desc: e.leg.desc.clone(),
					counterparty: e.counterparty.clone(),
					debit,
					credit,
					balance: running,
					side: BalanceSide::of(running),
					amount: running.abs(),
				}
			})
			.collect()
	}
}

/// One line of a single account's history.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AccountLine {
	pub date: Option<Date>,
	pub txn_id: usize,
	pub desc: String,
	pub counterparty: String,
	pub debit: Decimal,
	pub credit: Decimal,

	/// Running debits minus credits
	pub balance: Decimal,
	pub side: BalanceSide,
	pub amount: Decimal,
}
