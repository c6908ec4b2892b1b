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
use serde_json::{json, Value};
use std::fs;
use std::process::{Command, Output};

const CONFIG: &str = "tests/test_data/config.toml";

/// Dynamically collects test cases from a given directory. Each input
/// `<name>_in.csv` is paired with an expected `<name>_out.<ext>`.
fn collect_test_cases(subfolder: &str, ext: &str) -> Vec<(String, String)> {
	let dir_path = format!("tests/test_data/{}", subfolder);

	let mut test_cases = vec![];

	if let Ok(entries) = fs::read_dir(&dir_path) {
		let mut inputs = vec![];
		let mut outputs = vec![];

		for entry in entries.flatten() {
			let file_name =
				entry.file_name().into_string().unwrap_or_default();
			if file_name.ends_with("_in.csv") {
				inputs.push(file_name);
			} else if file_name.ends_with(&format!("_out.{}", ext)) {
				outputs.push(file_name);
			}
		}

		inputs.sort();
		outputs.sort();

		// Pair inputs with corresponding outputs
		for input_file in inputs {
			let output_file =
				input_file.replace("_in.csv", &format!("_out.{}", ext));
			if outputs.contains(&output_file) {
				test_cases.push((input_file, output_file));
			}
		}
	}

	assert!(!test_cases.is_empty(), "no test cases in {}", dir_path);
	test_cases
}

fn run(file: &str, cmd: &str, args: &[&str]) -> Output {
	Command::new(env!("CARGO_BIN_EXE_tallyr"))
		.args(["-f", file, "--config", CONFIG, cmd])
		.args(args)
		.output()
		.expect("Failed to execute process")
}

/// Runs a command with --json and parses what it printed.
fn run_json(file: &str, cmd: &str, args: &[&str]) -> Value {
	let mut all_args = args.to_vec();
	all_args.push("--json");
	let output = run(file, cmd, &all_args);
	assert!(
		output.status.success(),
		"{} {} failed: {}",
		cmd,
		file,
		String::from_utf8_lossy(&output.stderr)
	);
	serde_json::from_slice(&output.stdout).expect("Output is not JSON")
}

fn execute(subfolder: &str, cmd: &str, args: Vec<&str>) {
	for (input_file, expected_output_file) in
		collect_test_cases(subfolder, "json")
	{
		println!("running for {}...", input_file);

		let loc = format!("tests/test_data/{}/{}", subfolder, input_file);
		let got = run_json(&loc, cmd, &args);

		let expected: Value = serde_json::from_str(
			&fs::read_to_string(format!(
				"tests/test_data/{}/{}",
				subfolder, expected_output_file
			))
			.expect("Failed to read expected output file"),
		)
		.expect("Expected output is not JSON");

		assert_eq!(
			got,
			expected,
			"Output did not match for {}; expected:\n{:#}\ngot:\n{:#}",
			input_file,
			expected,
			got
		);
	}
}

#[test]
fn test_integration_trial_balance() {
	execute("tb", "tb", vec![]);
}

#[test]
fn test_integration_income_statement() {
	execute("is", "is", vec![]);
}

#[test]
fn test_integration_cash_flow() {
	execute("cf", "cf", vec![]);
}

#[test]
fn test_integration_should_fail() {
	for (input_file, expected_error) in collect_test_cases("failures", "txt") {
		let loc = format!("tests/test_data/failures/{}", input_file);
		let output = run(&loc, "tb", &[]);

		assert!(
			!output.status.success(),
			"{} unexpectedly succeeded!",
			input_file
		);

		let expected = fs::read_to_string(format!(
			"tests/test_data/failures/{}",
			expected_error
		))
		.expect("Failed to read expected output file");
		let stderr = String::from_utf8_lossy(&output.stderr);
		assert!(
			stderr.contains(expected.trim()),
			"{}: expected error '{}', got:\n{}",
			input_file,
			expected.trim(),
			stderr
		);
	}
}

#[test]
fn test_integration_balance_sheet_for_year() {
	let bs = run_json("tests/test_data/two_years.csv", "bs", &["-y", "2024"]);

	assert_eq!(bs["total_assets"], "1250");
	assert_eq!(bs["total_liabilities"], "100");
	assert_eq!(bs["total_equity"], "1150");

	let retained = bs["rows"]
		.as_array()
		.unwrap()
		.iter()
		.find(|r| r["account"] == "Retained Earnings")
		.expect("retained earnings row");
	assert_eq!(retained["balance"], "-150");
}

#[test]
fn test_integration_unclassified_accounts() {
	let file = "tests/test_data/typo.csv";
	let bs = run_json(file, "bs", &[]);

	assert_eq!(bs["total_assets"], "300");
	assert_eq!(bs["total_liabilities"], "0");
	assert_eq!(bs["total_equity"], "700");

	let unclassified = bs["unclassified"].as_array().unwrap();
	assert_eq!(unclassified.len(), 1);
	assert_eq!(unclassified[0]["account"], "Csah");
	assert_eq!(unclassified[0]["class"], "unknown");
	assert_eq!(unclassified[0]["balance"], "400");

	let fs = run_json(file, "fs", &[]);
	assert_eq!(fs["income_statement"]["unclassified"][0]["account"], "Csah");

	let output = run(file, "bs", &[]);
	assert!(output.status.success());
	let stdout = String::from_utf8_lossy(&output.stdout);
	assert!(stdout.contains("Unclassified"));
	assert!(stdout.contains("Csah"));
}

#[test]
fn test_integration_account_ledger() {
	let lines = run_json(
		"tests/test_data/two_years.csv",
		"gl",
		&["Cash", "-y", "2023"],
	);
	let lines = lines.as_array().unwrap();

	assert_eq!(lines.len(), 3);
	assert_eq!(lines[2]["counterparty"], "Various");
	assert_eq!(lines[2]["credit"], "500");
	assert_eq!(lines[2]["balance"], "1100");
	assert_eq!(lines[2]["side"], "debit");
}

#[test]
fn test_integration_bounded_journal() {
	let rows = run_json(
		"tests/test_data/two_years.csv",
		"journal",
		&["-b", "2023-03-20", "-e", "2023-03-20"],
	);
	let rows = rows.as_array().unwrap();

	// the continuation line comes along, still blank
	assert_eq!(rows.len(), 2);
	assert_eq!(rows[0]["txn_id"], json!(3));
	assert_eq!(rows[1]["txn_id"], json!(3));
	assert_eq!(rows[1]["date"], Value::Null);
	assert_eq!(rows[1]["debit_account"], "Utilities");
}

#[test]
fn test_integration_net_worth() {
	let days = run_json("tests/test_data/two_years.csv", "nw", &[]);
	let days = days.as_array().unwrap();

	assert_eq!(days.len(), 5);
	let last = &days[4];
	assert_eq!(last["date"], "2024-02-11");
	assert_eq!(last["assets"], "1350");
	assert_eq!(last["liabilities"], "100");
	assert_eq!(last["equity"], "1250");
}

#[test]
fn test_integration_kpi_and_years() {
	let kpi = run_json("tests/test_data/two_years.csv", "kpi", &[]);
	assert_eq!(kpi["balanced"], true);
	assert_eq!(kpi["net_income"], "250");
	assert_eq!(kpi["net_assets"], "1250");

	let years = run_json("tests/test_data/two_years.csv", "years", &[]);
	assert_eq!(years, json!([2023, 2024]));
}

#[test]
fn test_integration_empty_period() {
	let file = "tests/test_data/two_years.csv";
	let period = ["-b", "2030-01-01", "-e", "2030-12-31"];
	let tb = run_json(file, "tb", &period);
	assert_eq!(tb, json!([]));

	let output = run(file, "tb", &period);
	assert!(output.status.success());
	assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "No data");
}

#[test]
fn test_integration_leading_orphan_lines() {
	let file = "tests/test_data/orphans.csv";
	let rows = run_json(file, "journal", &[]);
	assert_eq!(rows[0]["txn_id"], json!(0));
	assert_eq!(rows[1]["txn_id"], json!(1));

	let tb = run_json(file, "tb", &[]);
	let cash = tb
		.as_array()
		.unwrap()
		.iter()
		.find(|r| r["account"] == "Cash")
		.unwrap();
	assert_eq!(cash["debit"], "105");
}

#[test]
fn test_integration_year_conflicts_with_range() {
	let output = run(
		"tests/test_data/two_years.csv",
		"tb",
		&["-y", "2024", "-b", "2024-01-01"],
	);
	assert!(!output.status.success());
}

#[test]
fn test_integration_text_reports() {
	let file = "tests/test_data/two_years.csv";
	for cmd in ["journal", "gl", "tb", "is", "bs", "fs", "kpi", "nw", "cf", "exp"]
	{
		let output = run(file, cmd, &[]);
		assert!(
			output.status.success(),
			"{} failed: {}",
			cmd,
			String::from_utf8_lossy(&output.stderr)
		);
		assert!(!output.stdout.is_empty(), "{} printed nothing", cmd);
	}
}
