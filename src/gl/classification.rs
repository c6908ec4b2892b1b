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
use crate::config::config_file::{Config, Priority};
use log::warn;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// The five classes of the accounting equation, plus Unknown for accounts
/// the chart does not mention. Unknown accounts are never dropped; they
/// travel through every report so that typos in the journal stay visible.
#[derive(
	Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum AccountClass {
	Asset,
	Liability,
	Equity,
	Revenue,
	Expense,
	Unknown,
}

impl AccountClass {
	pub fn is_balance_sheet(&self) -> bool {
		matches!(
			self,
			AccountClass::Asset | AccountClass::Liability | AccountClass::Equity
		)
	}

	pub fn is_income_statement(&self) -> bool {
		matches!(self, AccountClass::Revenue | AccountClass::Expense)
	}
}

impl fmt::Display for AccountClass {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let s = match self {
			AccountClass::Asset => "Asset",
			AccountClass::Liability => "Liability",
			AccountClass::Equity => "Equity",
			AccountClass::Revenue => "Revenue",
			AccountClass::Expense => "Expense",
			AccountClass::Unknown => "Unknown",
		};
		write!(f, "{}", s)
	}
}

/// Lookup tables consulted by every stage that needs to know what kind of
/// account a name refers to. Built once from the config and handed to the
/// pipeline explicitly.
#[derive(Debug, Clone)]
pub struct Chart {
	accounts: BTreeMap<String, AccountClass>,
	priority: Priority,

	/// Suspense accounts whose class follows the sign of their balance
	dynamic: BTreeSet<String>,
}

impl Chart {
	pub fn new(
		accounts: BTreeMap<String, AccountClass>,
		priority: Priority,
		dynamic: BTreeSet<String>,
	) -> Self {
		Self {
			accounts,
			priority,
			dynamic,
		}
	}

	pub fn from_config(config: &Config) -> Self {
		Chart::new(
			config.accounts.clone(),
			config.priority.clone(),
			config.dynamic_accounts.iter().cloned().collect(),
		)
	}

	/// The fixed class of an account, or Unknown if the chart lacks it.
	/// Dynamic accounts are normally absent from the map and so start out
	/// Unknown until their balance is known.
	pub fn classify(&self, account: &str) -> AccountClass {
		self.accounts
			.get(account)
			.copied()
			.unwrap_or(AccountClass::Unknown)
	}

	/// Same as classify(), but complains about accounts the chart lacks.
	/// Used by the stages that produce a per-account table, so each
	/// stray name is reported once per table.
	pub fn classify_noisy(&self, account: &str) -> AccountClass {
		let class = self.classify(account);
		if class == AccountClass::Unknown && !self.is_dynamic(account) {
			warn!("account '{}' is not in the chart of accounts", account);
		}
		class
	}

	pub fn is_dynamic(&self, account: &str) -> bool {
		self.dynamic.contains(account)
	}

	/// Final class of an account once its net balance (debits - credits)
	/// is known. Only dynamic accounts are affected: debit-heavy ones are
	/// losses, credit-heavy ones are gains, and a zero balance gives no
	/// evidence either way, so the base class stands.
	pub fn resolve(
		&self,
		account: &str,
		base: AccountClass,
		balance: Decimal,
	) -> AccountClass {
		if !self.is_dynamic(account) {
			return base;
		}

		if balance > Decimal::ZERO {
			AccountClass::Expense
		} else if balance < Decimal::ZERO {
			AccountClass::Revenue
		} else {
			base
		}
	}

	pub fn sort_key(&self, class: AccountClass) -> u32 {
		self.priority.of(class)
	}
}
