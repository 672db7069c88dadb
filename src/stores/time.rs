use chrono::{Datelike, Months, NaiveDate};

/// Current position on the timeline and its playback flag. The revision
/// counts changes of the date or the bounds; playback does not touch it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TimeStore {
	current: Option<NaiveDate>,
	min: Option<NaiveDate>,
	max: Option<NaiveDate>,
	playing: bool,
	revision: u64,
}

impl TimeStore {
	/// `None` until the dataset has dates.
	pub fn current_date(&self) -> Option<NaiveDate> {
		self.current
	}

	/// Earliest and latest publication dates.
	pub fn bounds(&self) -> (Option<NaiveDate>, Option<NaiveDate>) {
		(self.min, self.max)
	}

	pub fn is_playing(&self) -> bool {
		self.playing
	}

	/// Changes of the date or the bounds.
	pub fn revision(&self) -> u64 {
		self.revision
	}

	/// New dataset extent; the current date snaps to the start.
	pub fn set_bounds(&mut self, min: Option<NaiveDate>, max: Option<NaiveDate>) {
		self.min = min;
		self.max = max;
		self.current = min;
		self.playing = false;
		self.revision += 1;
	}

	/// Move to `date`, clamped into the bounds.
	pub fn set_current_date(&mut self, date: NaiveDate) {
		let date = self.clamp(date);
		if self.current != Some(date) {
			self.current = Some(date);
			self.revision += 1;
		}
	}

	/// Move by `months` (negative goes back). Returns whether the date changed.
	pub fn step_months(&mut self, months: i32) -> bool {
		let Some(current) = self.current else {
			return false;
		};
		let span = Months::new(months.unsigned_abs());
		let next = if months >= 0 {
			current.checked_add_months(span)
		} else {
			current.checked_sub_months(span)
		};
		let before = self.current;
		if let Some(next) = next {
			self.set_current_date(next);
		}
		self.current != before
	}

	/// Start or stop playback. Leaves the revision alone.
	pub fn set_playing(&mut self, playing: bool) {
		self.playing = playing;
	}

	/// Flip playback.
	pub fn toggle_playing(&mut self) {
		self.set_playing(!self.playing);
	}

	/// One playback tick. Playback stops once the end is reached.
	pub fn advance(&mut self) {
		if !self.playing {
			return;
		}
		if !self.step_months(1) || self.current == self.max {
			self.set_playing(false);
		}
	}

	/// Whole months from the start to the current date, and to the end.
	pub fn month_position(&self) -> Option<(u32, u32)> {
		let (min, max, current) = (self.min?, self.max?, self.current?);
		Some((months_between(min, current), months_between(min, max)))
	}

	/// Jump to `offset` months after the start.
	pub fn seek_month(&mut self, offset: u32) {
		if let Some(date) = self.min.and_then(|min| min.checked_add_months(Months::new(offset))) {
			self.set_current_date(date);
		}
	}

	fn clamp(&self, date: NaiveDate) -> NaiveDate {
		let date = self.min.map_or(date, |min| date.max(min));
		self.max.map_or(date, |max| date.min(max))
	}
}

fn months_between(from: NaiveDate, to: NaiveDate) -> u32 {
	let months = (to.year() - from.year()) * 12 + to.month() as i32 - from.month() as i32;
	months.max(0) as u32
}
