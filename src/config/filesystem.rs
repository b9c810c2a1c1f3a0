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
use crate::config::config_file::Config;
use anyhow::{anyhow, Error};
use dirs::home_dir;
use std::fs;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;

const DEFAULT_CONFIG_PATH: &str = ".config/pedalr/config.toml";

/// Fetches the config from the given path, or the default path under the
/// home directory if none. The default file is created empty the first time
/// so users have an obvious place to put settings.
pub fn get_config(custom_config_path: Option<&str>) -> Result<Config, Error> {
	let config_path = match custom_config_path {
		None => home_dir()
			.ok_or_else(|| anyhow!("Unable to determine home directory"))?
			.join(DEFAULT_CONFIG_PATH),
		Some(p) => PathBuf::from(p),
	};

	if !config_path.exists() && custom_config_path.is_none() {
		create_empty(&config_path)?;
	}

	debug!(path = %config_path.display(), "loading config");
	read_config(&config_path)
}

pub fn read_config(path: &Path) -> Result<Config, Error> {
	let content = fs::read_to_string(path)
		.map_err(|e| anyhow!("failed to read config {}: {}", path.display(), e))?;
	Config::from_toml(&content)
}

fn create_empty(path: &Path) -> Result<(), Error> {
	if let Some(parent) = path.parent() {
		fs::create_dir_all(parent)?;
	}
	File::create(path)?;
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	#[test]
	fn test_read_custom_config() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "[fleet]\ntotal_bikes = 12").unwrap();

		let config = get_config(file.path().to_str()).unwrap();
		assert_eq!(config.fleet.unwrap().total_bikes, Some(12));
	}

	#[test]
	fn test_missing_custom_config_is_an_error() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("nope.toml");
		assert!(get_config(path.to_str()).is_err());
		assert!(!path.exists());
	}

	#[test]
	fn test_create_empty() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("nested/dir/config.toml");
		create_empty(&path).unwrap();
		let config = read_config(&path).unwrap();
		assert!(config.fleet.is_none());
	}
}
