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
use crate::util::decimal::Decimal;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::fmt;

/// Identifier of a bike within the fleet. Only produced by checking a raw
/// number against the fleet size, so holding one means it is in range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct BikeId(u32);

impl BikeId {
	/// Returns the id if `raw` lies in `[0, total_bikes)`.
	pub fn within(raw: i64, total_bikes: u32) -> Option<Self> {
		u32::try_from(raw)
			.ok()
			.filter(|id| *id < total_bikes)
			.map(Self)
	}

	/// Every id of a fleet of the given size, in order.
	pub fn all(total_bikes: u32) -> impl Iterator<Item = Self> {
		(0..total_bikes).map(Self)
	}

	pub fn value(&self) -> u32 {
		self.0
	}
}

impl fmt::Display for BikeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// One active checkout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RentalRecord {
	bike_id: BikeId,
	reserved_hours: Decimal,
	pickup_location: String,
	rented_at: DateTime<Local>,
}

impl RentalRecord {
	pub fn new(
		bike_id: BikeId,
		reserved_hours: Decimal,
		pickup_location: String,
		rented_at: DateTime<Local>,
	) -> Self {
		Self {
			bike_id,
			reserved_hours,
			pickup_location,
			rented_at,
		}
	}

	pub fn bike_id(&self) -> BikeId {
		self.bike_id
	}

	pub fn reserved_hours(&self) -> Decimal {
		self.reserved_hours
	}

	pub fn pickup_location(&self) -> &str {
		&self.pickup_location
	}

	pub fn rented_at(&self) -> DateTime<Local> {
		self.rented_at
	}
}
