use chrono::{NaiveTime, TimeDelta};
use contracts::dashboards::d402_hourly_sales::StaffingProjection;

use super::error::{DashboardError, DashboardResult};
use crate::shared::format::format_money;

pub const CLOSING_BEFORE_CURRENT_MESSAGE: &str = "closing time must be after current time";

/// Inputs of the remaining-time projection. Both times are on the same day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaffingInput {
    pub current_time: NaiveTime,
    pub closing_time: NaiveTime,
    pub staff_count: u32,
    pub grand_total_target: f64,
    pub grand_total_sales: f64,
}

/// Accepts "HH:MM" or "HH:MM:SS" (fractional seconds allowed).
pub fn parse_time_of_day(raw: &str) -> DashboardResult<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M:%S%.f")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .map_err(|_| {
            DashboardError::configuration(format!(
                "invalid time of day '{raw}', expected HH:MM or HH:MM:SS"
            ))
        })
}

/// Sales still needed per remaining hour and per staff member.
pub fn project(input: &StaffingInput, currency: &str) -> DashboardResult<StaffingProjection> {
    if input.staff_count == 0 {
        return Err(DashboardError::configuration("staff count must be at least 1"));
    }

    let remaining = input.closing_time.signed_duration_since(input.current_time);
    if remaining <= TimeDelta::zero() {
        return Err(DashboardError::configuration(CLOSING_BEFORE_CURRENT_MESSAGE));
    }
    let remaining_minutes = remaining
        .num_nanoseconds()
        .map(|ns| ns as f64 / 60_000_000_000.0)
        .unwrap_or_else(|| remaining.num_seconds() as f64 / 60.0);

    let remaining_hours = remaining_minutes / 60.0;
    let remaining_target = (input.grand_total_target - input.grand_total_sales).max(0.0);
    let required_per_hour = remaining_target / remaining_hours;
    let required_per_staff = required_per_hour / input.staff_count as f64;

    Ok(StaffingProjection {
        current_time: input.current_time.format("%H:%M:%S").to_string(),
        closing_time: input.closing_time.format("%H:%M:%S").to_string(),
        staff_count: input.staff_count,
        remaining_minutes,
        remaining_hours,
        remaining_target,
        required_per_hour,
        required_per_staff,
        required_per_hour_display: display_money(required_per_hour, currency),
        required_per_staff_display: display_money(required_per_staff, currency),
    })
}

/// Non-finite amounts render as "-".
fn display_money(value: f64, currency: &str) -> String {
    if value.is_finite() {
        format_money(value, currency)
    } else {
        tracing::warn!("D402 Staffing: non-finite projection value {}", value);
        "-".to_string()
    }
}
