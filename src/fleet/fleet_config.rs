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
use crate::fleet::tariff::Tariff;
use anyhow::{bail, Error};
use std::collections::HashSet;

pub const DEFAULT_TOTAL_BIKES: u32 = 100;
pub const DEFAULT_PICKUP_LOCATIONS: [&str; 10] = [
	"South Bank Riverside",
	"Regent's Park",
	"Greenwich Park",
	"King's Cross Station",
	"Covent Garden Market",
	"Shoreditch High Street",
	"Borough Market",
	"Kensington Gardens",
	"Canary Wharf",
	"Notting Hill",
];

/// The fixed shape of the fleet: how many bikes exist, where they can be
/// collected, and what they cost. Built once at startup and never mutated.
#[derive(Clone, Debug)]
pub struct FleetConfig {
	total_bikes: u32,
	pickup_locations: Vec<String>,
	tariff: Tariff,
}

impl FleetConfig {
	pub fn new(
		total_bikes: u32,
		pickup_locations: Vec<String>,
		tariff: Tariff,
	) -> Result<Self, Error> {
		if total_bikes == 0 {
			bail!("Fleet must contain at least one bike");
		}

		if pickup_locations.is_empty() {
			bail!("At least one pickup location is required");
		}

		let mut seen = HashSet::new();
		for location in &pickup_locations {
			if location.trim().is_empty() {
				bail!("Pickup location names cannot be blank");
			}
			if location.trim() != location {
				bail!("Pickup location {:?} has surrounding whitespace", location);
			}
			if !seen.insert(location.as_str()) {
				bail!("Pickup location {} listed twice", location);
			}
		}

		Ok(Self {
			total_bikes,
			pickup_locations,
			tariff,
		})
	}

	pub fn total_bikes(&self) -> u32 {
		self.total_bikes
	}

	pub fn pickup_locations(&self) -> &[String] {
		&self.pickup_locations
	}

	pub fn tariff(&self) -> &Tariff {
		&self.tariff
	}

	pub fn has_location(&self, name: &str) -> bool {
		self.pickup_locations.iter().any(|l| l == name)
	}

	/// Looks up a location by its 1-based position in the listing.
	pub fn location_at(&self, position: usize) -> Option<&str> {
		position
			.checked_sub(1)
			.and_then(|i| self.pickup_locations.get(i))
			.map(|s| s.as_str())
	}
}

impl Default for FleetConfig {
	fn default() -> Self {
		Self {
			total_bikes: DEFAULT_TOTAL_BIKES,
			pickup_locations: DEFAULT_PICKUP_LOCATIONS
				.iter()
				.map(|s| s.to_string())
				.collect(),
			tariff: Tariff::default(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::util::decimal::Decimal;

	fn locations(names: &[&str]) -> Vec<String> {
		names.iter().map(|s| s.to_string()).collect()
	}

	#[test]
	fn test_default_fleet() {
		let config = FleetConfig::default();
		assert_eq!(config.total_bikes(), 100);
		assert_eq!(config.pickup_locations().len(), 10);
		assert_eq!(config.tariff().late_fee_multiplier(), Decimal::from_u32(5));
		assert!(config.has_location("Canary Wharf"));
	}

	#[test]
	fn test_rejects_empty_fleet() {
		let result = FleetConfig::new(0, locations(&["X"]), Tariff::default());
		assert!(result.is_err());
	}

	#[test]
	fn test_rejects_missing_locations() {
		let result = FleetConfig::new(5, vec![], Tariff::default());
		assert!(result.is_err());
	}

	#[test]
	fn test_rejects_duplicate_locations() {
		let result =
			FleetConfig::new(5, locations(&["X", "Y", "X"]), Tariff::default());
		assert!(result.is_err());
	}

	#[test]
	fn test_rejects_blank_or_padded_locations() {
		assert!(FleetConfig::new(5, locations(&["  "]), Tariff::default()).is_err());
		assert!(FleetConfig::new(5, locations(&[" X"]), Tariff::default()).is_err());
	}

	#[test]
	fn test_location_lookup() {
		let config =
			FleetConfig::new(5, locations(&["X", "Y"]), Tariff::default()).unwrap();
		assert!(config.has_location("Y"));
		assert!(!config.has_location("y"));
		assert_eq!(config.location_at(1), Some("X"));
		assert_eq!(config.location_at(2), Some("Y"));
		assert_eq!(config.location_at(0), None);
		assert_eq!(config.location_at(3), None);
	}
}
