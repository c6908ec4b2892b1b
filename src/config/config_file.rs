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
use crate::gl::classification::AccountClass;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Everything the pipeline needs to know about a particular set of books.
/// Each section is optional in the file; omitted sections fall back to the
/// defaults below. A section that is present replaces its default wholly,
/// so a custom chart of accounts is never mixed with the built-in one.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
	pub columns: Columns,
	pub labels: Labels,

	/// account name -> class
	pub accounts: BTreeMap<String, AccountClass>,
	pub priority: Priority,

	/// Suspense accounts classified by the sign of their balance.
	pub dynamic_accounts: Vec<String>,

	/// Descriptions containing any of these mark an opening-balance entry.
	pub carry_forward_keywords: Vec<String>,
}

/// Header names of the six required journal columns.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Columns {
	pub date: String,
	pub description: String,
	pub debit_account: String,
	pub debit_amount: String,
	pub credit_account: String,
	pub credit_amount: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Labels {
	/// Counterparty shown when the other side has several accounts
	pub various: String,
	/// Counterparty shown when the other side is empty
	pub no_counterparty: String,
	/// Equity account that absorbs net income on the balance sheet
	pub retained_earnings: String,
}

/// Sort position of each class on the trial balance and balance sheet.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Priority {
	pub asset: u32,
	pub liability: u32,
	pub equity: u32,
	pub revenue: u32,
	pub expense: u32,
	pub unknown: u32,
}

impl Priority {
	pub fn of(&self, class: AccountClass) -> u32 {
		match class {
			AccountClass::Asset => self.asset,
			AccountClass::Liability => self.liability,
			AccountClass::Equity => self.equity,
			AccountClass::Revenue => self.revenue,
			AccountClass::Expense => self.expense,
			AccountClass::Unknown => self.unknown,
		}
	}
}

impl Default for Config {
	fn default() -> Self {
		Self {
			columns: Columns::default(),
			labels: Labels::default(),
			accounts: default_accounts(),
			priority: Priority::default(),
			dynamic_accounts: vec![
				"Cash Over/Short".to_string(),
				"現金過不足".to_string(),
			],
			carry_forward_keywords: [
				"opening balance",
				"brought forward",
				"carried forward",
				"開始残高",
				"前年繰越",
				"前月繰越",
				"前期繰越",
				"繰越",
			]
			.iter()
			.map(|s| s.to_string())
			.collect(),
		}
	}
}

impl Default for Columns {
	fn default() -> Self {
		Self {
			date: "date".to_string(),
			description: "description".to_string(),
			debit_account: "debit_account".to_string(),
			debit_amount: "debit_amount".to_string(),
			credit_account: "credit_account".to_string(),
			credit_amount: "credit_amount".to_string(),
		}
	}
}

impl Default for Labels {
	fn default() -> Self {
		Self {
			various: "Various".to_string(),
			no_counterparty: "-".to_string(),
			retained_earnings: "Retained Earnings".to_string(),
		}
	}
}

impl Default for Priority {
	fn default() -> Self {
		Self {
			asset: 1,
			liability: 2,
			equity: 3,
			revenue: 4,
			expense: 5,
			unknown: 99,
		}
	}
}

/// A small household / sole-proprietor chart in English and Japanese.
fn default_accounts() -> BTreeMap<String, AccountClass> {
	use AccountClass::*;

	let chart: [(&str, AccountClass); 50] = [
		("Cash", Asset),
		("Checking", Asset),
		("Savings", Asset),
		("Accounts Receivable", Asset),
		("Prepaid Expenses", Asset),
		("Inventory", Asset),
		("Equipment", Asset),
		("Investments", Asset),
		("Accounts Payable", Liability),
		("Credit Card", Liability),
		("Loans Payable", Liability),
		("Accrued Expenses", Liability),
		("Owner's Equity", Equity),
		("Capital", Equity),
		("Retained Earnings", Equity),
		("Sales Revenue", Revenue),
		("Salary", Revenue),
		("Interest Income", Revenue),
		("Other Income", Revenue),
		("Rent", Expense),
		("Utilities", Expense),
		("Groceries", Expense),
		("Transportation", Expense),
		("Communication", Expense),
		("Supplies", Expense),
		("Insurance", Expense),
		("Interest Expense", Expense),
		("Miscellaneous", Expense),
		("現金", Asset),
		("普通預金", Asset),
		("定期預金", Asset),
		("売掛金", Asset),
		("立替金", Asset),
		("未払金", Liability),
		("クレジットカード", Liability),
		("借入金", Liability),
		("元入金", Equity),
		("資本金", Equity),
		("繰越利益剰余金", Equity),
		("売上高", Revenue),
		("給料", Revenue),
		("受取利息", Revenue),
		("雑収入", Revenue),
		("食費", Expense),
		("水道光熱費", Expense),
		("通信費", Expense),
		("旅費交通費", Expense),
		("地代家賃", Expense),
		("消耗品費", Expense),
		("雑費", Expense),
	];

	chart
		.into_iter()
		.map(|(name, class)| (name.to_string(), class))
		.collect()
}
