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
use crate::fleet::outcome::{RentalError, RentalOutcome};
use crate::fleet::record::{BikeId, RentalRecord};
use crate::util::decimal::Decimal;
use chrono::Local;
use serde::Serialize;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, info};

/// The record of which bikes are currently checked out.
///
/// The ledger owns all checkout state. Callers hand it the raw text a renter
/// typed and get back a [`RentalOutcome`]; they never touch the records
/// directly. Every request either applies completely or leaves the ledger
/// untouched.
#[derive(Debug)]
pub struct RentalLedger {
	config: FleetConfig,
	/// bike -> its active checkout; absent means available
	active_rentals: BTreeMap<BikeId, RentalRecord>,
}

impl RentalLedger {
	pub fn new(config: FleetConfig) -> Self {
		Self {
			config,
			active_rentals: BTreeMap::new(),
		}
	}

	// ----------------
	// -- OPERATIONS --
	// ----------------

	/// Checks a bike out for the given number of hours from the given
	/// pickup location.
	///
	/// Validation runs in a fixed order so that a request with several
	/// problems always reports the same one: field presence, then numeric
	/// validity, then range, then availability.
	pub fn rent(
		&mut self,
		bike_id: &str,
		hours: &str,
		location: &str,
	) -> RentalOutcome {
		match self.try_rent(bike_id.trim(), hours.trim(), location.trim()) {
			Ok(record) => {
				info!(
					bike = %record.bike_id(),
					hours = %record.reserved_hours(),
					location = record.pickup_location(),
					"bike rented"
				);
				RentalOutcome::rented(format!(
					"rented {} for {} hour(s)",
					record.bike_id(),
					record.reserved_hours()
				))
			},
			Err(err) => {
				debug!(bike_id, hours, location, %err, "rent refused");
				RentalOutcome::failure(err)
			},
		}
	}

	/// Checks a bike back in after it was held for `hours_held` hours and
	/// reports the fee owed.
	pub fn return_bike(&mut self, bike_id: &str, hours_held: &str) -> RentalOutcome {
		match self.try_return(bike_id.trim(), hours_held.trim()) {
			Ok((record, fee)) => {
				info!(
					bike = %record.bike_id(),
					reserved = %record.reserved_hours(),
					%fee,
					"bike returned"
				);
				RentalOutcome::returned(
					format!("returned {}, pay {}", record.bike_id(), fee),
					fee,
				)
			},
			Err(err) => {
				debug!(bike_id, hours_held, %err, "return refused");
				RentalOutcome::failure(err)
			},
		}
	}

	fn try_rent(
		&mut self,
		bike_id: &str,
		hours: &str,
		location: &str,
	) -> Result<&RentalRecord, RentalError> {
		if bike_id.is_empty()
			|| hours.is_empty()
			|| location.is_empty()
			|| !self.config.has_location(location)
		{
			return Err(RentalError::MissingField);
		}

		let raw_id = parse_bike_id(bike_id)?;
		let hours = parse_hours(hours)?;

		let id = BikeId::within(raw_id, self.config.total_bikes())
			.ok_or(RentalError::OutOfRange)?;

		match self.active_rentals.entry(id) {
			Entry::Occupied(_) => Err(RentalError::AlreadyRented),
			Entry::Vacant(slot) => Ok(slot.insert(RentalRecord::new(
				id,
				hours,
				location.to_string(),
				Local::now(),
			))),
		}
	}

	fn try_return(
		&mut self,
		bike_id: &str,
		hours_held: &str,
	) -> Result<(RentalRecord, Decimal), RentalError> {
		let raw_id = parse_bike_id(bike_id)?;
		let held = parse_hours(hours_held)?;

		// ids outside the fleet can never have been rented
		let id = BikeId::within(raw_id, self.config.total_bikes())
			.ok_or(RentalError::NotRented)?;
		let reserved = self
			.active_rentals
			.get(&id)
			.map(|r| r.reserved_hours())
			.ok_or(RentalError::NotRented)?;

		// compute before removing, so an overflow keeps the rental open
		let fee = self
			.config
			.tariff()
			.fee(reserved, held)
			.ok_or(RentalError::InvalidNumber)?;

		let record = self
			.active_rentals
			.remove(&id)
			.ok_or(RentalError::NotRented)?;

		Ok((record, fee))
	}

	// -------------
	// -- QUERIES --
	// -------------

	pub fn config(&self) -> &FleetConfig {
		&self.config
	}

	pub fn total_bikes(&self) -> u32 {
		self.config.total_bikes()
	}

	pub fn active_count(&self) -> usize {
		self.active_rentals.len()
	}

	pub fn available_count(&self) -> usize {
		self.config.total_bikes() as usize - self.active_rentals.len()
	}

	pub fn record(&self, id: BikeId) -> Option<&RentalRecord> {
		self.active_rentals.get(&id)
	}

	/// Active records in bike id order.
	pub fn records(&self) -> impl Iterator<Item = &RentalRecord> {
		self.active_rentals.values()
	}

	pub fn status(&self) -> FleetStatus {
		FleetStatus {
			active: self.active_count(),
			total: self.total_bikes(),
		}
	}
}

/// Snapshot of how much of the fleet is out, shown after every request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct FleetStatus {
	pub active: usize,
	pub total: u32,
}

impl fmt::Display for FleetStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} rented out of {}", self.active, self.total)
	}
}

/// Integers too large for an `i64` still count as numbers; they saturate so
/// that the range check rejects them.
fn parse_bike_id(input: &str) -> Result<i64, RentalError> {
	if let Ok(id) = input.parse::<i64>() {
		return Ok(id);
	}
	let (negative, digits) = match input.strip_prefix('-') {
		Some(rest) => (true, rest),
		None => (false, input.strip_prefix('+').unwrap_or(input)),
	};
	if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
		return Err(RentalError::InvalidNumber);
	}
	Ok(if negative { i64::MIN } else { i64::MAX })
}

/// Durations must be strictly positive.
fn parse_hours(input: &str) -> Result<Decimal, RentalError> {
	input
		.parse::<Decimal>()
		.ok()
		.filter(|h| *h > Decimal::zero())
		.ok_or(RentalError::InvalidNumber)
}
