use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Unrecognized value for a string-backed enum.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid value for {kind}: {value}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

/// Folds case and treats `_` as a space, so `UNDER_REVIEW` matches `Under Review`.
fn normalize(s: &str) -> String {
    s.trim().replace('_', " ").to_ascii_lowercase()
}

/// Macro to generate enum with as_str + std::str::FromStr + string serde pattern
macro_rules! str_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$(Self::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = normalize(s);
                $(
                    if wanted == normalize($s) {
                        return Ok(Self::$variant);
                    }
                )+
                Err(ParseEnumError {
                    kind: stringify!($name),
                    value: s.into(),
                })
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

str_enum!(
    /// Where an application sits in the admissions workflow.
    ApplicationStatus {
        Draft => "Draft",
        Submitted => "Submitted",
        UnderReview => "Under Review",
        Approved => "Approved",
        Rejected => "Rejected",
    }
);

str_enum!(
    /// Top-level portal screens.
    View {
        Home => "HOME",
        Apply => "APPLY",
        Courses => "COURSES",
        Status => "STATUS",
        Admin => "ADMIN",
        AdminLogin => "ADMIN_LOGIN",
    }
);

impl Default for View {
    fn default() -> Self {
        Self::Home
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_display_string() {
        for status in ApplicationStatus::ALL {
            let parsed: ApplicationStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, *status);
        }
    }

    #[test]
    fn status_parse_accepts_screaming_snake_case() {
        assert_eq!(
            "UNDER_REVIEW".parse::<ApplicationStatus>().unwrap(),
            ApplicationStatus::UnderReview
        );
        assert_eq!(
            "approved".parse::<ApplicationStatus>().unwrap(),
            ApplicationStatus::Approved
        );
    }

    #[test]
    fn status_parse_rejects_unknown() {
        let err = "Waitlisted".parse::<ApplicationStatus>().unwrap_err();
        assert_eq!(err.kind, "ApplicationStatus");
        assert_eq!(err.value, "Waitlisted");
    }

    #[test]
    fn status_serializes_as_display_string() {
        let json = serde_json::to_string(&ApplicationStatus::UnderReview).unwrap();
        assert_eq!(json, "\"Under Review\"");
        let back: ApplicationStatus = serde_json::from_str("\"Rejected\"").unwrap();
        assert_eq!(back, ApplicationStatus::Rejected);
    }

    #[test]
    fn view_parses_admin_login() {
        assert_eq!("ADMIN_LOGIN".parse::<View>().unwrap(), View::AdminLogin);
        assert_eq!("courses".parse::<View>().unwrap(), View::Courses);
        assert_eq!(View::default(), View::Home);
    }
}
