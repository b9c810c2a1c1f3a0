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
use anyhow::{anyhow, bail, Error};
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Decimal places kept when parsing user input; further digits are rounded
/// half up. Two parsed fractions multiplied together stay within MAX_SCALE.
pub const MAX_INPUT_SCALE: u32 = 18;

/// Largest scale any value may carry; 10^38 is the biggest power of ten that
/// fits in a u128.
const MAX_SCALE: u32 = 38;

/// A non-negative fixed-point decimal, used for rental durations and fees.
///
/// The value is `units / 10^scale`. Trailing zeros are always stripped from
/// the fraction, so two equal values share one representation and the derived
/// equality and hashing are exact. All arithmetic is checked; callers get
/// `None` instead of a wrapped or panicking result.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Decimal {
	units: u128,
	scale: u32,
}

impl Decimal {
	pub fn zero() -> Self {
		Self { units: 0, scale: 0 }
	}

	/// Creates a value of `units` shifted `scale` places right of the
	/// decimal point, i.e. `Decimal::new(25, 1)` is 2.5.
	pub fn new(units: u128, scale: u32) -> Self {
		let mut out = Self { units, scale };
		out.normalize();
		out
	}

	pub fn from_u32(value: u32) -> Self {
		Self {
			units: u128::from(value),
			scale: 0,
		}
	}

	/// Converts a config value through its shortest decimal rendering, so
	/// that `2.5` becomes exactly 2.5 rather than its binary approximation.
	pub fn from_f64(value: f64) -> Result<Self, Error> {
		if !value.is_finite() || value < 0.0 {
			bail!("Expected a finite, non-negative number, got {}", value);
		}
		format!("{}", value).parse()
	}

	pub fn is_zero(&self) -> bool {
		self.units == 0
	}

	pub fn checked_add(self, rhs: Self) -> Option<Self> {
		let (a, b, scale) = self.aligned(rhs)?;
		Some(Self::new(a.checked_add(b)?, scale))
	}

	pub fn checked_sub(self, rhs: Self) -> Option<Self> {
		let (a, b, scale) = self.aligned(rhs)?;
		Some(Self::new(a.checked_sub(b)?, scale))
	}

	pub fn checked_mul(self, rhs: Self) -> Option<Self> {
		let scale = self.scale + rhs.scale;
		if scale > MAX_SCALE {
			return None;
		}
		Some(Self::new(self.units.checked_mul(rhs.units)?, scale))
	}

	/// Brings both values to the larger of the two scales.
	fn aligned(self, rhs: Self) -> Option<(u128, u128, u32)> {
		let scale = self.scale.max(rhs.scale);
		let a = self.units.checked_mul(pow10(scale - self.scale)?)?;
		let b = rhs.units.checked_mul(pow10(scale - rhs.scale)?)?;
		Some((a, b, scale))
	}

	fn normalize(&mut self) {
		if self.units == 0 {
			self.scale = 0;
			return;
		}
		while self.scale > 0 && self.units % 10 == 0 {
			self.units /= 10;
			self.scale -= 1;
		}
	}

	/// Integer part and fractional remainder at the current scale.
	fn split(&self) -> (u128, u128) {
		// scale never exceeds MAX_SCALE, so the power always exists
		let divisor = pow10(self.scale).unwrap_or(1);
		(self.units / divisor, self.units % divisor)
	}
}

fn pow10(exp: u32) -> Option<u128> {
	10u128.checked_pow(exp)
}

impl FromStr for Decimal {
	type Err = Error;

	/// Accepts plain decimal notation only: digits, at most one point and
	/// an optional leading plus sign. Anything that could denote a negative,
	/// infinite or exponent-scaled value is refused. Fractions longer than
	/// MAX_INPUT_SCALE digits are rounded, so a tiny enough value becomes 0.
	fn from_str(input: &str) -> Result<Self, Self::Err> {
		let trimmed = input.trim();
		let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);

		let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

		let is_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
		if (whole.is_empty() && fraction.is_empty())
			|| !is_digits(whole)
			|| !is_digits(fraction)
		{
			bail!("Invalid decimal format: {:?}", input);
		}

		let (fraction, dropped) =
			fraction.split_at(fraction.len().min(MAX_INPUT_SCALE as usize));
		let round_up = dropped.starts_with(|c: char| c >= '5');
		let scale = fraction.len() as u32;

		let too_large = || anyhow!("Number too large: {}", trimmed);

		let whole_units = match whole {
			"" => 0,
			w => w.parse::<u128>().map_err(|_| too_large())?,
		};
		let fraction_units = match fraction {
			"" => 0,
			f => f.parse::<u128>()?,
		};

		let units = pow10(scale)
			.and_then(|p| whole_units.checked_mul(p))
			.and_then(|u| u.checked_add(fraction_units))
			.and_then(|u| u.checked_add(u128::from(round_up)))
			.ok_or_else(too_large)?;

		Ok(Self::new(units, scale))
	}
}

impl fmt::Display for Decimal {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let (whole, fraction) = self.split();
		if self.scale == 0 {
			return write!(f, "{}", whole);
		}
		write!(
			f,
			"{}.{:0>width$}",
			whole,
			fraction,
			width = self.scale as usize
		)
	}
}

impl PartialOrd for Decimal {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for Decimal {
	fn cmp(&self, other: &Self) -> Ordering {
		let (self_whole, self_fraction) = self.split();
		let (other_whole, other_fraction) = other.split();

		// remainders are below 10^scale, so aligning them cannot overflow
		let scale = self.scale.max(other.scale);
		let left = self_fraction * pow10(scale - self.scale).unwrap_or(1);
		let right = other_fraction * pow10(scale - other.scale).unwrap_or(1);

		self_whole.cmp(&other_whole).then(left.cmp(&right))
	}
}

impl Serialize for Decimal {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_str(self)
	}
}
