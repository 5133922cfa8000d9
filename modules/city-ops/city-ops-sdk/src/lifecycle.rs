//! Closed vocabularies used by city-ops entities.
//!
//! Every enum round-trips through its snake_case wire name (`as_str` / `FromStr`)
//! and rejects anything else with [`CityOpsError::UnknownVariant`].

use serde::{Deserialize, Serialize};

use crate::error::CityOpsError;

macro_rules! closed_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident as $field:literal, $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// All members in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = CityOpsError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    other => Err(CityOpsError::UnknownVariant {
                        field: $field,
                        kind: $kind,
                        value: other.to_owned(),
                    }),
                }
            }
        }
    };
}

closed_enum! {
    #[derive(Default)]
    pub enum AssetStatus as "status", "asset status" {
        #[default]
        Active => "active",
        Inactive => "inactive",
        Maintenance => "maintenance",
        Error => "error",
    }
}

closed_enum! {
    pub enum IncidentType as "type", "incident type" {
        TrafficAccident => "traffic_accident",
        PowerOutage => "power_outage",
        WaterMainBreak => "water_main_break",
        AirQualityAlert => "air_quality_alert",
        Flooding => "flooding",
        Fire => "fire",
        MedicalEmergency => "medical_emergency",
        SecurityBreach => "security_breach",
        InfrastructureFailure => "infrastructure_failure",
        WeatherEvent => "weather_event",
    }
}

closed_enum! {
    pub enum IncidentSeverity as "severity", "incident severity" {
        Low => "low",
        Medium => "medium",
        High => "high",
        Critical => "critical",
    }
}

closed_enum! {
    /// Incident lifecycle: reported, acknowledged, in progress, then resolved or closed.
    #[derive(Default)]
    pub enum IncidentStatus as "status", "incident status" {
        #[default]
        Reported => "reported",
        Acknowledged => "acknowledged",
        InProgress => "in_progress",
        Resolved => "resolved",
        Closed => "closed",
    }
}

impl IncidentStatus {
    /// `true` for statuses that end the response work (`resolved`, `closed`).
    #[must_use]
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Resolved | Self::Closed)
    }

    /// Statuses reachable from `self` in one step when transitions are enforced.
    ///
    /// A resolved incident may be reopened (`in_progress`) or closed; a closed one is final.
    #[must_use]
    pub const fn next_statuses(self) -> &'static [Self] {
        match self {
            Self::Reported => &[Self::Acknowledged],
            Self::Acknowledged => &[Self::InProgress],
            Self::InProgress => &[Self::Resolved, Self::Closed],
            Self::Resolved => &[Self::InProgress, Self::Closed],
            Self::Closed => &[],
        }
    }

    /// Re-applying the current status is always allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self == next || self.next_statuses().contains(&next)
    }
}

closed_enum! {
    pub enum AlertSeverity as "severity", "alert severity" {
        Info => "info",
        Warning => "warning",
        Error => "error",
        Critical => "critical",
    }
}

closed_enum! {
    #[derive(Default)]
    pub enum RecommendationStatus as "status", "recommendation status" {
        #[default]
        Pending => "pending",
        Approved => "approved",
        Rejected => "rejected",
        Implemented => "implemented",
    }
}

closed_enum! {
    pub enum UserRole as "role", "user role" {
        Admin => "admin",
        Operator => "operator",
        Viewer => "viewer",
        Citizen => "citizen",
    }
}

closed_enum! {
    pub enum ActionPriority as "priority", "action priority" {
        Low => "low",
        Medium => "medium",
        High => "high",
        Critical => "critical",
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn parses_every_wire_name() {
        for status in AssetStatus::ALL {
            assert_eq!(status.as_str().parse::<AssetStatus>().unwrap(), *status);
        }
        for kind in IncidentType::ALL {
            assert_eq!(kind.to_string().parse::<IncidentType>().unwrap(), *kind);
        }
        assert_eq!(IncidentType::ALL.len(), 10);
    }

    #[test]
    fn unknown_value_names_field_and_kind() {
        let err = "bogus".parse::<AssetStatus>().unwrap_err();
        assert_eq!(err.field(), Some("status"));
        assert_eq!(err.to_string(), "unknown asset status 'bogus'");
        assert!("maintenance".parse::<AssetStatus>().is_ok());
    }

    #[test]
    fn parsing_is_case_sensitive() {
        assert!("Critical".parse::<AlertSeverity>().is_err());
        assert!("in-progress".parse::<IncidentStatus>().is_err());
    }

    #[test]
    fn defaults_match_creation_rules() {
        assert_eq!(AssetStatus::default(), AssetStatus::Active);
        assert_eq!(IncidentStatus::default(), IncidentStatus::Reported);
        assert_eq!(RecommendationStatus::default(), RecommendationStatus::Pending);
    }

    #[test]
    fn serde_uses_wire_names() {
        let json = serde_json::to_string(&IncidentStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
        let back: IncidentType = serde_json::from_str("\"water_main_break\"").unwrap();
        assert_eq!(back, IncidentType::WaterMainBreak);
    }

    #[test]
    fn transition_table_follows_lifecycle() {
        use IncidentStatus::{Acknowledged, Closed, InProgress, Reported, Resolved};

        assert!(Reported.can_transition_to(Acknowledged));
        assert!(!Reported.can_transition_to(Resolved));
        assert!(Acknowledged.can_transition_to(InProgress));
        assert!(InProgress.can_transition_to(Resolved));
        assert!(InProgress.can_transition_to(Closed));
        assert!(Resolved.can_transition_to(InProgress));
        assert!(!Closed.can_transition_to(Reported));
        for status in IncidentStatus::ALL {
            assert!(status.can_transition_to(*status));
        }
    }

    #[test]
    fn finished_statuses() {
        assert!(IncidentStatus::Resolved.is_finished());
        assert!(IncidentStatus::Closed.is_finished());
        assert!(!IncidentStatus::InProgress.is_finished());
    }
}
