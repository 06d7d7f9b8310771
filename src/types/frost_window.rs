//! Per-station freeze dates derived from the daily minimum-temperature normals.

use chrono::Month;

/// Temperatures strictly above this value (°F) count as frost-free days.
pub const FREEZING_POINT_F: f64 = 32.0;

/// Label used for both freeze dates of a station that never freezes.
pub const NO_FROST_LABEL: &str = "no frost / very infrequent";

/// A single day bounding the frost-free season.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FreezeEvent {
    pub month: u32,
    pub day: u32,
    /// Normal minimum temperature on that day, in °F.
    pub min_temp_f: f64,
}

impl FreezeEvent {
    /// Renders the day as `"<Month name> <day>"`, e.g. `"March 5"`.
    pub fn label(&self) -> Option<String> {
        let month = u8::try_from(self.month)
            .ok()
            .and_then(|m| Month::try_from(m).ok())?;
        Some(format!("{} {}", month.name(), self.day))
    }

    fn is_on(&self, month: u32, day: u32) -> bool {
        self.month == month && self.day == day
    }
}

/// The frost window of one station.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrostWindow {
    /// The first and last days of the year with a minimum above freezing.
    Seasonal {
        last_spring: FreezeEvent,
        first_fall: FreezeEvent,
    },
    /// The warm season spans January 1 through December 31.
    FrostFree,
    /// No day of the year has a minimum above freezing.
    Undefined,
}

impl FrostWindow {
    /// Builds the window from the first and last warm days of the year.
    pub fn from_events(last_spring: FreezeEvent, first_fall: FreezeEvent) -> Self {
        if last_spring.is_on(1, 1) && first_fall.is_on(12, 31) {
            FrostWindow::FrostFree
        } else {
            FrostWindow::Seasonal {
                last_spring,
                first_fall,
            }
        }
    }

    pub fn is_frost_free(&self) -> bool {
        matches!(self, FrostWindow::FrostFree)
    }

    pub fn last_freeze_label(&self) -> Option<String> {
        match self {
            FrostWindow::Seasonal { last_spring, .. } => last_spring.label(),
            FrostWindow::FrostFree => Some(NO_FROST_LABEL.to_string()),
            FrostWindow::Undefined => None,
        }
    }

    pub fn first_freeze_label(&self) -> Option<String> {
        match self {
            FrostWindow::Seasonal { first_fall, .. } => first_fall.label(),
            FrostWindow::FrostFree => Some(NO_FROST_LABEL.to_string()),
            FrostWindow::Undefined => None,
        }
    }

    /// Minimum temperature on the last spring freeze day. Not applicable for
    /// frost-free and undefined windows.
    pub fn last_freeze_temp_f(&self) -> Option<f64> {
        match self {
            FrostWindow::Seasonal { last_spring, .. } => Some(last_spring.min_temp_f),
            _ => None,
        }
    }

    pub fn first_freeze_temp_f(&self) -> Option<f64> {
        match self {
            FrostWindow::Seasonal { first_fall, .. } => Some(first_fall.min_temp_f),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(month: u32, day: u32) -> FreezeEvent {
        FreezeEvent {
            month,
            day,
            min_temp_f: 33.1,
        }
    }

    #[test]
    fn test_event_label() {
        assert_eq!(event(3, 5).label().as_deref(), Some("March 5"));
        assert_eq!(event(12, 31).label().as_deref(), Some("December 31"));
        assert_eq!(event(13, 1).label(), None);
    }

    #[test]
    fn test_full_year_is_frost_free() {
        let window = FrostWindow::from_events(event(1, 1), event(12, 31));
        assert!(window.is_frost_free());
        assert_eq!(window.last_freeze_label().as_deref(), Some(NO_FROST_LABEL));
        assert_eq!(window.first_freeze_label().as_deref(), Some(NO_FROST_LABEL));
        assert_eq!(window.last_freeze_temp_f(), None);
        assert_eq!(window.first_freeze_temp_f(), None);
    }

    #[test]
    fn test_partial_year_is_seasonal() {
        let window = FrostWindow::from_events(event(1, 1), event(12, 30));
        assert!(!window.is_frost_free());
        assert_eq!(window.last_freeze_label().as_deref(), Some("January 1"));
        assert_eq!(window.first_freeze_label().as_deref(), Some("December 30"));
        assert_eq!(window.first_freeze_temp_f(), Some(33.1));
    }
}
