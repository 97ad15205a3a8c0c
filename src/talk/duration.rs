use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unit {
	Second,
	Minute,
	Hour,
	Day,
	Month,
	Year,
}

impl Unit {
	fn label(self, count: u64) -> &'static str {
		let (one, many) = match self {
			Unit::Second => ("second", "seconds"),
			Unit::Minute => ("minute", "minutes"),
			Unit::Hour => ("hour", "hours"),
			Unit::Day => ("day", "days"),
			Unit::Month => ("month", "months"),
			Unit::Year => ("year", "years"),
		};
		if count == 1 { one } else { many }
	}
}

/// Distance between two instants in the largest unit that keeps the value
/// under the next unit's threshold, rounded to a whole number.
///
/// The order of the arguments does not matter.
pub fn format_distance_strict(from: DateTime<Utc>, to: DateTime<Utc>) -> String {
	let seconds = (to - from).num_milliseconds().unsigned_abs() as f64 / 1000.0;
	let minutes = seconds / 60.0;
	let hours = minutes / 60.0;
	let days = hours / 24.0;

	let (value, unit) = if seconds < 60.0 {
		(seconds, Unit::Second)
	} else if minutes < 60.0 {
		(minutes, Unit::Minute)
	} else if hours < 24.0 {
		(hours, Unit::Hour)
	} else if days < 30.0 {
		(days, Unit::Day)
	} else if days < 365.0 {
		(days / 30.0, Unit::Month)
	} else {
		(days / 365.0, Unit::Year)
	};

	let count = value.round() as u64;
	format!("{count} {}", unit.label(count))
}

#[cfg(test)]
mod tests {
	use chrono::{Duration, TimeZone};

	use super::*;

	fn distance(seconds: i64) -> String {
		let start = Utc.with_ymd_and_hms(2020, 2, 2, 10, 0, 0).unwrap();
		format_distance_strict(start, start + Duration::seconds(seconds))
	}

	#[test]
	fn picks_the_largest_fitting_unit() {
		assert_eq!(distance(0), "0 seconds");
		assert_eq!(distance(1), "1 second");
		assert_eq!(distance(30), "30 seconds");
		assert_eq!(distance(25 * 60), "25 minutes");
		assert_eq!(distance(60 * 60), "1 hour");
		assert_eq!(distance(2 * 86_400), "2 days");
	}

	#[test]
	fn rounds_half_up() {
		assert_eq!(distance(90 * 60), "2 hours");
		assert_eq!(distance(89), "1 minute");
	}

	#[test]
	fn argument_order_is_irrelevant() {
		assert_eq!(distance(-50 * 60), "50 minutes");
	}
}
