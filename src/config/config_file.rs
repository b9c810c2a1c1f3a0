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
use crate::fleet::tariff::Tariff;
use crate::util::decimal::Decimal;
use anyhow::{anyhow, Error};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
	pub fleet: Option<Fleet>,
	pub display: Option<Display>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Fleet {
	pub total_bikes: Option<u32>,
	/// Charged per hour held beyond the reservation
	pub late_fee_per_hour: Option<f64>,
	/// Display only; fees are plain numbers
	pub currency: Option<String>,
	pub pickup_locations: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Display {
	pub color: Option<bool>,
}

/// Values given on the command line, which win over the config file.
#[derive(Debug, Default)]
pub struct Overrides {
	pub total_bikes: Option<u32>,
	pub late_fee_per_hour: Option<f64>,
}

impl Config {
	pub fn from_toml(content: &str) -> Result<Self, Error> {
		toml::from_str(content).map_err(|e| anyhow!("failed to parse config: {}", e))
	}

	/// Resolves the fleet from overrides, then file values, then defaults.
	pub fn fleet_config(&self, overrides: &Overrides) -> Result<FleetConfig, Error> {
		let fleet = self.fleet.as_ref();
		let defaults = FleetConfig::default();

		let total_bikes = overrides
			.total_bikes
			.or(fleet.and_then(|f| f.total_bikes))
			.unwrap_or(defaults.total_bikes());

		let late_fee = match overrides
			.late_fee_per_hour
			.or(fleet.and_then(|f| f.late_fee_per_hour))
		{
			Some(rate) => Decimal::from_f64(rate)
				.map_err(|e| anyhow!("invalid late fee: {}", e))?,
			None => defaults.tariff().late_fee_multiplier(),
		};

		let currency = fleet
			.and_then(|f| f.currency.as_deref())
			.unwrap_or(defaults.tariff().currency());

		let locations = match fleet.and_then(|f| f.pickup_locations.clone()) {
			Some(locations) => locations,
			None => defaults.pickup_locations().to_vec(),
		};

		FleetConfig::new(total_bikes, locations, Tariff::new(late_fee, currency)?)
	}

	pub fn color(&self) -> bool {
		self.display.as_ref().and_then(|d| d.color).unwrap_or(true)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_empty_file_gives_defaults() {
		let config = Config::from_toml("").unwrap();
		let fleet = config.fleet_config(&Overrides::default()).unwrap();
		assert_eq!(fleet.total_bikes(), 100);
		assert_eq!(fleet.pickup_locations().len(), 10);
		assert_eq!(fleet.tariff().late_fee_multiplier(), Decimal::from_u32(5));
		assert_eq!(fleet.tariff().currency(), "£");
		assert!(config.color());
	}

	#[test]
	fn test_file_values() {
		let config = Config::from_toml(
			r#"
			[fleet]
			total_bikes = 50
			late_fee_per_hour = 2.5
			currency = "$"
			pickup_locations = ["Covent Garden", "Camden Market"]

			[display]
			color = false
			"#,
		)
		.unwrap();
		let fleet = config.fleet_config(&Overrides::default()).unwrap();
		assert_eq!(fleet.total_bikes(), 50);
		assert_eq!(fleet.tariff().late_fee_multiplier(), Decimal::new(25, 1));
		assert_eq!(fleet.tariff().currency(), "$");
		assert_eq!(
			fleet.pickup_locations(),
			&["Covent Garden".to_string(), "Camden Market".to_string()]
		);
		assert!(!config.color());
	}

	#[test]
	fn test_integer_late_fee() {
		let config = Config::from_toml("[fleet]\nlate_fee_per_hour = 3").unwrap();
		let fleet = config.fleet_config(&Overrides::default()).unwrap();
		assert_eq!(fleet.tariff().late_fee_multiplier(), Decimal::from_u32(3));
	}

	#[test]
	fn test_overrides_win() {
		let config = Config::from_toml("[fleet]\ntotal_bikes = 50").unwrap();
		let overrides = Overrides {
			total_bikes: Some(7),
			late_fee_per_hour: Some(1.5),
		};
		let fleet = config.fleet_config(&overrides).unwrap();
		assert_eq!(fleet.total_bikes(), 7);
		assert_eq!(fleet.tariff().late_fee_multiplier(), Decimal::new(15, 1));
	}

	#[test]
	fn test_invalid_values_rejected() {
		let bad = [
			"[fleet]\ntotal_bikes = 0",
			"[fleet]\nlate_fee_per_hour = 0",
			"[fleet]\nlate_fee_per_hour = -1",
			"[fleet]\npickup_locations = []",
			"[fleet]\npickup_locations = [\"A\", \"A\"]",
		];
		for content in bad {
			let config = Config::from_toml(content).unwrap();
			assert!(
				config.fleet_config(&Overrides::default()).is_err(),
				"{} should be rejected",
				content
			);
		}
	}

	#[test]
	fn test_malformed_toml() {
		assert!(Config::from_toml("[fleet\ntotal_bikes = ").is_err());
		assert!(Config::from_toml("[fleet]\ntotal_bikes = \"many\"").is_err());
	}
}
