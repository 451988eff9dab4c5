//! Schedule anchors consumed by external DAG-generation tooling.

use chrono::{Duration, Local, NaiveDateTime, NaiveTime, Offset, Timelike};

/// Schedule used when a workflow does not declare one.
pub const DEFAULT_SCHEDULE_INTERVAL: &str = "@daily";

/// Computes the schedule anchor for a workflow from a reference timestamp.
pub type StartTimeFactory = fn(NaiveDateTime) -> NaiveDateTime;

fn local_utc_offset() -> Duration {
  Duration::seconds(i64::from(Local::now().offset().fix().local_minus_utc()))
}

/// Anchor for hourly schedules: sub-second precision dropped, shifted back
/// by the local UTC offset.
pub fn hourly_start_time(start_time: NaiveDateTime) -> NaiveDateTime {
  let truncated = start_time.with_nanosecond(0).unwrap_or(start_time);
  truncated - local_utc_offset()
}

/// Anchor for daily schedules: local midnight, one day back.
pub fn daily_start_time(start_time: NaiveDateTime) -> NaiveDateTime {
  start_time.date().and_time(NaiveTime::MIN) - Duration::hours(24)
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;

  fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
      .unwrap()
      .and_hms_opt(h, min, s)
      .unwrap()
  }

  #[test]
  fn daily_anchor_is_previous_local_midnight() {
    let anchor = daily_start_time(at(2020, 6, 27, 15, 42, 10));
    assert_eq!(anchor, at(2020, 6, 26, 0, 0, 0));
  }

  #[test]
  fn daily_anchor_of_midnight_backs_up_a_full_day() {
    let anchor = daily_start_time(at(2020, 6, 27, 0, 0, 0));
    assert_eq!(anchor, at(2020, 6, 26, 0, 0, 0));
  }

  #[test]
  fn hourly_anchor_drops_subsecond_precision_only() {
    let with_nanos = at(2020, 6, 27, 15, 42, 10).with_nanosecond(123_456_789).unwrap();
    assert_eq!(hourly_start_time(with_nanos), hourly_start_time(at(2020, 6, 27, 15, 42, 10)));
    assert_eq!(hourly_start_time(with_nanos).nanosecond(), 0);
  }
}
