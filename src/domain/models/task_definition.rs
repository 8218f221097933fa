//! Recurring task definition domain model.
//!
//! A TaskDefinition is the template an operator configures once. The daily
//! materialization run expands due definitions into concrete, per-assignee
//! task instances. Definitions are read-only to the engine.

use std::collections::BTreeSet;

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::personnel::PersonnelRole;

/// The recurrence rule deciding which calendar dates a definition is due.
///
/// Weekday numbering follows the stored convention: 0 = Sunday .. 6 =
/// Saturday. A `Monthly` rule whose `day_of_month` exceeds the length of a
/// given month never fires in that month (no last-day fallback).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Recurrence {
    /// Due every calendar day.
    Daily,
    /// Due on the given weekdays (0 = Sunday .. 6 = Saturday).
    Weekly { weekdays: BTreeSet<u8> },
    /// Due on the given day of the month (1..=31).
    Monthly { day_of_month: u32 },
}

impl Recurrence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly { .. } => "weekly",
            Self::Monthly { .. } => "monthly",
        }
    }

    /// Whether this rule fires on the given date. Pure, no I/O.
    pub fn fires_on(&self, date: NaiveDate) -> bool {
        match self {
            Self::Daily => true,
            Self::Weekly { weekdays } => {
                let weekday = date.weekday().num_days_from_sunday() as u8;
                weekdays.contains(&weekday)
            }
            Self::Monthly { day_of_month } => date.day() == *day_of_month,
        }
    }

    /// Human-readable description of the rule.
    pub fn description(&self) -> String {
        match self {
            Self::Daily => "every day".to_string(),
            Self::Weekly { weekdays } => {
                let names: Vec<&str> = weekdays.iter().filter_map(|d| weekday_name(*d)).collect();
                format!("weekly on {}", names.join(", "))
            }
            Self::Monthly { day_of_month } => format!("monthly on day {}", day_of_month),
        }
    }

    /// Validate the rule's payload.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            Self::Daily => Ok(()),
            Self::Weekly { weekdays } => {
                if weekdays.is_empty() {
                    return Err("Weekly recurrence requires at least one weekday".to_string());
                }
                if let Some(bad) = weekdays.iter().find(|d| **d > 6) {
                    return Err(format!("Invalid weekday {}: must be 0..=6", bad));
                }
                Ok(())
            }
            Self::Monthly { day_of_month } => {
                if !(1..=31).contains(day_of_month) {
                    return Err(format!("Invalid day of month {}: must be 1..=31", day_of_month));
                }
                Ok(())
            }
        }
    }
}

fn weekday_name(day: u8) -> Option<&'static str> {
    match day {
        0 => Some("Sun"),
        1 => Some("Mon"),
        2 => Some("Tue"),
        3 => Some("Wed"),
        4 => Some("Thu"),
        5 => Some("Fri"),
        6 => Some("Sat"),
        _ => None,
    }
}

/// The assignment rule deciding which personnel receive generated instances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Assignment {
    /// An explicit set of personnel.
    Specific { personnel_ids: Vec<Uuid> },
    /// All personnel currently holding the given role, resolved at run time.
    ByRole { role: PersonnelRole },
}

impl Assignment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Specific { .. } => "specific",
            Self::ByRole { .. } => "by_role",
        }
    }

    /// Human-readable description of the rule.
    pub fn description(&self) -> String {
        match self {
            Self::Specific { personnel_ids } => {
                format!("{} specific assignee(s)", personnel_ids.len())
            }
            Self::ByRole { role } => format!("everyone with role '{}'", role.as_str()),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        match self {
            Self::Specific { personnel_ids } => {
                if personnel_ids.is_empty() {
                    return Err("Specific assignment requires at least one assignee".to_string());
                }
                Ok(())
            }
            Self::ByRole { .. } => Ok(()),
        }
    }
}

/// A recurring task template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDefinition {
    pub id: Uuid,
    /// Owning organization.
    pub organization_id: Uuid,
    /// Creator; copied into each instance as the author.
    pub created_by: Uuid,
    /// Human-readable name.
    pub name: String,
    /// Free-text description, copied verbatim into each instance.
    pub description: String,
    /// When the definition is due.
    pub recurrence: Recurrence,
    /// Time-of-day for each instance's deadline.
    pub scheduled_time: NaiveTime,
    /// Who receives generated instances.
    pub assignment: Assignment,
    /// Inactive definitions are never evaluated.
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TaskDefinition {
    /// Create a new active definition.
    pub fn new(
        organization_id: Uuid,
        created_by: Uuid,
        name: impl Into<String>,
        recurrence: Recurrence,
        scheduled_time: NaiveTime,
        assignment: Assignment,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            organization_id,
            created_by,
            name: name.into(),
            description: String::new(),
            recurrence,
            scheduled_time,
            assignment,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Validate the definition's content and rules.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Definition name cannot be empty".to_string());
        }
        self.recurrence.validate()?;
        self.assignment.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn daily_fires_every_day() {
        assert!(Recurrence::Daily.fires_on(date(2025, 1, 1)));
        assert!(Recurrence::Daily.fires_on(date(2025, 6, 15)));
        assert!(Recurrence::Daily.fires_on(date(2024, 2, 29)));
    }

    #[test]
    fn weekly_fires_only_on_listed_weekdays() {
        // Mon/Wed/Fri
        let rule = Recurrence::Weekly { weekdays: [1, 3, 5].into() };

        // 2025-06-04 is a Wednesday
        assert!(rule.fires_on(date(2025, 6, 4)));
        // 2025-06-02 is a Monday
        assert!(rule.fires_on(date(2025, 6, 2)));
        // 2025-06-03 is a Tuesday
        assert!(!rule.fires_on(date(2025, 6, 3)));
        // 2025-06-08 is a Sunday
        assert!(!rule.fires_on(date(2025, 6, 8)));
    }

    #[test]
    fn weekly_sunday_is_zero() {
        let rule = Recurrence::Weekly { weekdays: [0].into() };
        // 2025-06-08 is a Sunday
        assert!(rule.fires_on(date(2025, 6, 8)));
        assert!(!rule.fires_on(date(2025, 6, 9)));
    }

    #[test]
    fn monthly_fires_on_matching_day() {
        let rule = Recurrence::Monthly { day_of_month: 15 };
        assert!(rule.fires_on(date(2025, 3, 15)));
        assert!(!rule.fires_on(date(2025, 3, 14)));
        assert!(!rule.fires_on(date(2025, 3, 16)));
    }

    #[test]
    fn monthly_never_fires_in_short_months() {
        let rule = Recurrence::Monthly { day_of_month: 31 };
        // April has 30 days: the rule never fires that month.
        for day in 1..=30 {
            assert!(!rule.fires_on(date(2025, 4, day)));
        }
        assert!(rule.fires_on(date(2025, 5, 31)));

        let feb_rule = Recurrence::Monthly { day_of_month: 30 };
        for day in 1..=28 {
            assert!(!feb_rule.fires_on(date(2025, 2, day)));
        }
    }

    #[test]
    fn recurrence_validation() {
        assert!(Recurrence::Daily.validate().is_ok());
        assert!(Recurrence::Weekly { weekdays: BTreeSet::new() }.validate().is_err());
        assert!(Recurrence::Weekly { weekdays: [7].into() }.validate().is_err());
        assert!(Recurrence::Monthly { day_of_month: 0 }.validate().is_err());
        assert!(Recurrence::Monthly { day_of_month: 32 }.validate().is_err());
        assert!(Recurrence::Monthly { day_of_month: 31 }.validate().is_ok());
    }

    #[test]
    fn recurrence_round_trips_through_json() {
        let rule = Recurrence::Weekly { weekdays: [1, 3, 5].into() };
        let json = serde_json::to_string(&rule).unwrap();
        let parsed: Recurrence = serde_json::from_str(&json).unwrap();
        assert_eq!(rule, parsed);
    }

    #[test]
    fn unrecognized_recurrence_tag_is_a_decode_error() {
        let result: Result<Recurrence, _> =
            serde_json::from_str(r#"{"type":"fortnightly"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn definition_validation() {
        let def = TaskDefinition::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "Morning checklist",
            Recurrence::Daily,
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            Assignment::ByRole { role: PersonnelRole::Personnel },
        );
        assert!(def.validate().is_ok());

        let unnamed = TaskDefinition::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "  ",
            Recurrence::Daily,
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            Assignment::ByRole { role: PersonnelRole::Personnel },
        );
        assert!(unnamed.validate().is_err());

        let empty_assignees = TaskDefinition::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "Weekly report",
            Recurrence::Daily,
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            Assignment::Specific { personnel_ids: vec![] },
        );
        assert!(empty_assignees.validate().is_err());
    }
}
