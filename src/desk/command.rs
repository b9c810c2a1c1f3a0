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
use crate::fleet::fleet_config::FleetConfig;
use anyhow::Error;
use regex::Regex;

/// One line typed at the desk. Rent and return carry the renter's raw text
/// untouched; validating it is the ledger's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeskCommand {
	Rent {
		bike_id: String,
		hours: String,
		location: String,
	},
	Return {
		bike_id: String,
		hours_held: String,
	},
	Status,
	Bikes,
	Locations,
	Tariff,
	Help,
	Quit,
	Unknown(String),
}

pub const HELP: &str = "\
Commands:
  rent <bike id> <hours> <location>   check a bike out
  return <bike id> <hours held>       check a bike in and show the fee
  status                              how many bikes are out
  bikes                               every bike and whether it is rented
  locations                           numbered pickup locations
  tariff                              what renting costs
  help                                this list
  quit                                leave the desk
Locations may be quoted, typed as-is, or given as #N from the list.";

pub struct CommandParser {
	/// A double-quoted token, or a run of non-space characters
	token_regex: Regex,
}

impl CommandParser {
	pub fn new() -> Result<Self, Error> {
		Ok(Self {
			token_regex: Regex::new(r#""([^"]*)"|(\S+)"#)?,
		})
	}

	/// Returns None for blank lines.
	pub fn parse(&self, line: &str) -> Option<DeskCommand> {
		let tokens = self.tokenize(line);
		let (word, args) = tokens.split_first()?;

		// missing arguments become empty strings so the ledger reports them
		let arg = |i: usize| args.get(i).cloned().unwrap_or_default();

		let command = match word.to_lowercase().as_str() {
			"rent" => DeskCommand::Rent {
				bike_id: arg(0),
				hours: arg(1),
				location: args.get(2..).unwrap_or_default().join(" "),
			},
			"return" => DeskCommand::Return {
				bike_id: arg(0),
				hours_held: arg(1),
			},
			"status" => DeskCommand::Status,
			"bikes" => DeskCommand::Bikes,
			"locations" => DeskCommand::Locations,
			"tariff" => DeskCommand::Tariff,
			"help" | "?" => DeskCommand::Help,
			"quit" | "exit" => DeskCommand::Quit,
			_ => DeskCommand::Unknown(word.clone()),
		};

		Some(command)
	}

	fn tokenize(&self, line: &str) -> Vec<String> {
		self.token_regex
			.captures_iter(line)
			.filter_map(|cap| cap.get(1).or_else(|| cap.get(2)))
			.map(|m| m.as_str().to_string())
			.collect()
	}
}

/// Resolves a `#N` shortcut to the N-th pickup location. Anything else,
/// including an out-of-range shortcut, is returned unchanged.
pub fn resolve_location<'a>(location: &'a str, config: &'a FleetConfig) -> &'a str {
	location
		.strip_prefix('#')
		.and_then(|n| n.parse::<usize>().ok())
		.and_then(|n| config.location_at(n))
		.unwrap_or(location)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::fleet::tariff::Tariff;

	fn parse(line: &str) -> Option<DeskCommand> {
		CommandParser::new().unwrap().parse(line)
	}

	fn rent(bike_id: &str, hours: &str, location: &str) -> DeskCommand {
		DeskCommand::Rent {
			bike_id: bike_id.to_string(),
			hours: hours.to_string(),
			location: location.to_string(),
		}
	}

	#[test]
	fn test_blank_lines() {
		assert_eq!(parse(""), None);
		assert_eq!(parse("   \t "), None);
	}

	#[test]
	fn test_rent_with_quoted_location() {
		assert_eq!(
			parse(r#"rent 3 2 "Regent's Park""#),
			Some(rent("3", "2", "Regent's Park"))
		);
	}

	#[test]
	fn test_rent_with_bare_multiword_location() {
		assert_eq!(
			parse("RENT 3 1.5 King's   Cross Station"),
			Some(rent("3", "1.5", "King's Cross Station"))
		);
	}

	#[test]
	fn test_rent_missing_arguments() {
		assert_eq!(parse("rent"), Some(rent("", "", "")));
		assert_eq!(parse("rent 4"), Some(rent("4", "", "")));
	}

	#[test]
	fn test_quoted_empty_argument() {
		assert_eq!(parse(r#"rent "" 2 X"#), Some(rent("", "2", "X")));
	}

	#[test]
	fn test_return() {
		assert_eq!(
			parse("return 3 5"),
			Some(DeskCommand::Return {
				bike_id: "3".into(),
				hours_held: "5".into()
			})
		);
		assert_eq!(
			parse("return"),
			Some(DeskCommand::Return {
				bike_id: "".into(),
				hours_held: "".into()
			})
		);
	}

	#[test]
	fn test_simple_commands() {
		assert_eq!(parse("status"), Some(DeskCommand::Status));
		assert_eq!(parse("bikes"), Some(DeskCommand::Bikes));
		assert_eq!(parse("Locations"), Some(DeskCommand::Locations));
		assert_eq!(parse("tariff"), Some(DeskCommand::Tariff));
		assert_eq!(parse("?"), Some(DeskCommand::Help));
		assert_eq!(parse("exit"), Some(DeskCommand::Quit));
		assert_eq!(parse("fly away"), Some(DeskCommand::Unknown("fly".into())));
	}

	#[test]
	fn test_resolve_location() {
		let config = FleetConfig::new(
			5,
			vec!["A".to_string(), "B".to_string()],
			Tariff::default(),
		)
		.unwrap();
		assert_eq!(resolve_location("#1", &config), "A");
		assert_eq!(resolve_location("#2", &config), "B");
		assert_eq!(resolve_location("#0", &config), "#0");
		assert_eq!(resolve_location("#3", &config), "#3");
		assert_eq!(resolve_location("#x", &config), "#x");
		assert_eq!(resolve_location("B", &config), "B");
	}
}
