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
use crate::gl::carry_forward::CarryForwardFilter;
use crate::gl::classification::Chart;
use crate::gl::journal::{FilledJournal, Journal};
use crate::gl::ledger::Ledger;
use crate::gl::statements::{FinancialStatements, Summary};
use crate::gl::trial_balance::TrialBalance;
use crate::parsing::filesystem::Filesystem;
use crate::reports::journal_reporter::JournalReporter;
use crate::reports::ledger_reporter::LedgerReporter;
use crate::reports::statement_reporter::StatementReporter;
use crate::reports::trend_reporter;
use crate::trend::cash_flow::{daily_expenses, monthly_cash_flow};
use crate::trend::net_worth::daily_balances;
use crate::util::date::{Date, Period};
use anyhow::Error;
use clap::{Parser, ValueEnum};
use env_logger::Env;
use log::{debug, warn};
use serde::Serialize;

mod config;
mod gl;
mod parsing;
mod reports;
mod trend;
mod util;

#[derive(Parser)]
#[command(
	name = "tallyr",
	version = "0.1.0",
	about = "Trial balances, statements and trends from a spreadsheet journal"
)]
struct Cli {
	// ----------------
	// -- POSITIONAL --
	// ----------------
	/// The command to execute
	command: Directive,

	/// The account for the GL command
	#[arg(required = false)]
	term: Option<String>,

	// -----------
	// -- FLAGS --
	// -----------
	/// Specifies the input file (CSV with a header row)
	#[arg(short)]
	file: String,

	/// Ignore transactions prior to this date (YYYY-MM-DD)
	#[arg(short, long)]
	begin: Option<String>,

	/// Ignore transactions after this date (YYYY-MM-DD)
	#[arg(short, long)]
	end: Option<String>,

	/// Report a single calendar year
	#[arg(short, long, conflicts_with_all = ["begin", "end"])]
	year: Option<i32>,

	/// Custom config file location (default: ~/.config/tallyr/config.toml)
	#[arg(long)]
	config: Option<String>,

	/// Print the report as JSON instead of a table
	#[arg(long)]
	json: bool,

	/// Log pipeline details to stderr
	#[arg(short, long)]
	verbose: bool,
}

#[derive(ValueEnum, Clone, PartialEq)]
enum Directive {
	Journal, // normalized journal

	Gl, // general ledger, or one account's history
	Tb, // trial balance
	Is, // income statement
	Bs, // balance sheet
	Fs, // both statements

	Kpi, // summary metrics

	Nw,  // daily net worth
	Cf,  // monthly cash flow
	Exp, // daily expenses

	Years, // fiscal years present
}

fn main() -> Result<(), Error> {
	let args = Cli::parse();

	let level = if args.verbose { "debug" } else { "warn" };
	env_logger::Builder::from_env(Env::default().default_filter_or(level))
		.init();

	let fs = Filesystem::new();
	let config = fs.get_config(args.config.as_ref())?;
	let chart = Chart::from_config(&config);
	let carry_forward = CarryForwardFilter::new(&config.carry_forward_keywords)?;

	let journal = fs.load_journal(&args.file, &config)?;

	if args.command == Directive::Years {
		let years = journal.years();
		return emit(args.json, &years, || {
			trend_reporter::years_table(&years).print_or_empty()
		});
	}

	let journal = match get_range(&args, &journal)? {
		Some(period) => {
			debug!("reporting period {}", period);
			journal.extract(&period)
		},
		None => journal,
	};
	let filled = journal.filled();

	match args.command {
		Directive::Journal => emit(args.json, journal.rows(), || {
			JournalReporter::new(&journal).print()
		})?,
		Directive::Gl => {
			let ledger = Ledger::new(&filled, &config.labels);
			match &args.term {
				Some(account) => {
					if !ledger.accounts().contains(account) {
						warn!("no entries for account '{}'", account);
					}
					let history = ledger.account_history(account);
					emit(args.json, &history, || {
						LedgerReporter::print_account_summary(&history)
					})?
				},
				None => emit(args.json, ledger.entries(), || {
					LedgerReporter::new(ledger.entries()).print_general_ledger()
				})?,
			}
		},
		Directive::Tb
		| Directive::Is
		| Directive::Bs
		| Directive::Fs
		| Directive::Kpi => financial_statement(
			&args,
			&filled,
			&chart,
			&carry_forward,
			&config.labels.retained_earnings,
		)?,
		Directive::Nw => {
			let days = daily_balances(&filled, &chart, &carry_forward);
			emit(args.json, &days, || {
				trend_reporter::net_worth_table(&days).print_or_empty()
			})?
		},
		Directive::Cf => {
			let months = monthly_cash_flow(&filled, &chart, &carry_forward);
			emit(args.json, &months, || {
				trend_reporter::cash_flow_table(&months).print_or_empty()
			})?
		},
		Directive::Exp => {
			let expenses = daily_expenses(&filled, &chart);
			emit(args.json, &expenses, || {
				trend_reporter::expense_table(&expenses).print_or_empty()
			})?
		},
		Directive::Years => {},
	}

	Ok(())
}

fn financial_statement(
	args: &Cli,
	filled: &FilledJournal,
	chart: &Chart,
	carry_forward: &CarryForwardFilter,
	retained_earnings: &str,
) -> Result<(), Error> {
	let tb = TrialBalance::from_journal(filled, chart, carry_forward);
	let fs = FinancialStatements::compose(&tb, chart, retained_earnings);
	let reporter = StatementReporter::new(&tb);

	match args.command {
		Directive::Tb => {
			emit(args.json, tb.rows(), || reporter.print_trial_balance())
		},
		Directive::Is => emit(args.json, &fs.income_statement, || {
			reporter.print_income_statement(&fs)
		}),
		Directive::Bs => emit(args.json, &fs.balance_sheet, || {
			reporter.print_balance_sheet(&fs)
		}),
		Directive::Kpi => {
			let summary = Summary::from_trial_balance(&tb);
			emit(args.json, &summary, || reporter.print_summary())
		},
		_ => emit(args.json, &fs, || reporter.print_statements(&fs)),
	}
}

/// Prints the value as JSON, or runs the text printer.
fn emit<T: Serialize + ?Sized>(
	json: bool,
	value: &T,
	print_text: impl FnOnce(),
) -> Result<(), Error> {
	if json {
		print_json(value)
	} else {
		print_text();
		Ok(())
	}
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), Error> {
	println!("{}", serde_json::to_string_pretty(value)?);
	Ok(())
}

/// The reporting period, if one was asked for. Without --begin, --end or
/// --year every transaction is reported, including any that carry no
/// date at all. A missing bound is taken from the journal's own dates.
fn get_range(args: &Cli, journal: &Journal) -> Result<Option<Period>, Error> {
	if let Some(year) = args.year {
		return Ok(Some(Period::year(year)?));
	}
	if args.begin.is_none() && args.end.is_none() {
		return Ok(None);
	}

	let full = journal.full_period();
	let begin = match &args.begin {
		Some(b) => Date::from_str(b)?,
		None => full.map(|p| p.begin).unwrap_or_else(Date::min),
	};
	let end = match &args.end {
		Some(e) => Date::from_str(e)?,
		None => full.map(|p| p.end).unwrap_or_else(Date::max),
	};

	Ok(Some(Period::new(begin, end)?))
}
