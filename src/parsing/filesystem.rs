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
use crate::config::config_file::Config;
use crate::gl::journal::Journal;
use crate::parsing::reader::read_journal;
use anyhow::{anyhow, Error};
use dirs::home_dir;
use log::debug;
use std::fs;
use std::fs::File;
use std::path::{Path, PathBuf};

pub struct Filesystem {
	/// Where the config lives when no --config is given, relative to home
	default_config: PathBuf,
}

impl Filesystem {
	pub fn new() -> Self {
		Self {
			default_config: PathBuf::from(".config/tallyr/config.toml"),
		}
	}

	pub fn open(&self, file_path: &str) -> Result<File, Error> {
		let path = Path::new(file_path);
		let file = File::open(path)
			.map_err(|e| anyhow!("cannot open {}: {}", file_path, e))?;
		Ok(file)
	}

	/// Reads the journal sheet at the given path and numbers its
	/// transactions.
	pub fn load_journal(
		&self,
		file_path: &str,
		config: &Config,
	) -> Result<Journal, Error> {
		let file = self.open(file_path)?;
		let rows = read_journal(file, &config.columns)?;
		Ok(Journal::new(rows))
	}

	/// Fetches the config from the given path, or default path if none.
	pub fn get_config(
		&self,
		custom_config_path: Option<&String>,
	) -> Result<Config, Error> {
		let config_path = match &custom_config_path {
			None => {
				let home_dir = home_dir()
					.ok_or_else(|| anyhow!("Unable to determine home directory"))?;
				home_dir.join(&self.default_config)
			},
			Some(p) => PathBuf::from(p),
		};

		// create empty config file if it doesn't exist
		if !config_path.exists() && custom_config_path.is_none() {
			if let Some(parent) = config_path.parent() {
				fs::create_dir_all(parent)?;
			}
			File::create(config_path.clone())?;
		}

		debug!("reading config from {}", config_path.display());
		let content = fs::read_to_string(&config_path).map_err(|e| {
			anyhow!("cannot read config {}: {}", config_path.display(), e)
		})?;
		let config: Config = toml::from_str(&content)
			.map_err(|e| anyhow!("failed to parse config: {}", e))?;

		Ok(config)
	}
}
