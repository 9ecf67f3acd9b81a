//! Trip request types: the structured record the renderer consumes and the
//! free-text preferences that only the prompt builder sees.
//!
//! The enumerated fields mirror the fixed choice lists of the planner form.
//! Each enum renders through [`fmt::Display`] exactly as it is printed in the
//! PDF summary table and in the prompt (e.g. `TravelStyle::FastPaced` →
//! `"Fast-Paced"`).

use crate::error::ItineraryError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Defines a closed choice list with its display labels.
macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($(#[$vmeta:meta])* $variant:ident => $label:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
        #[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
        pub enum $name {
            $($(#[$vmeta])* #[serde(rename = $label)] $variant),+
        }

        impl $name {
            /// Every choice, in form order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Label as shown to the user.
            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl std::str::FromStr for $name {
            type Err = ItineraryError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|c| c.label().eq_ignore_ascii_case(s))
                    .ok_or_else(|| ItineraryError::InvalidTripDetails {
                        field: stringify!($name),
                        reason: format!("'{}' is not one of the supported choices", s),
                    })
            }
        }
    };
}

choice_enum! {
    /// Currency the budget is expressed in.
    Currency {
        #[default]
        Usd => "USD",
        Eur => "EUR",
        Inr => "INR",
        Gbp => "GBP",
        Aud => "AUD",
        Jpy => "JPY",
    }
}

choice_enum! {
    /// Language the itinerary should be written in.
    Language {
        #[default]
        English => "English",
        Spanish => "Spanish",
        French => "French",
        German => "German",
        Japanese => "Japanese",
        Chinese => "Chinese",
        Portuguese => "Portuguese",
        Arabic => "Arabic",
        Hindi => "Hindi",
        Bengali => "Bengali",
        Tamil => "Tamil",
        Telugu => "Telugu",
        Korean => "Korean",
        Italian => "Italian",
        Russian => "Russian",
        Dutch => "Dutch",
    }
}

choice_enum! {
    /// Preferred kind of lodging.
    Accommodation {
        #[default]
        Hotel => "Hotel",
        Hostel => "Hostel",
        Apartment => "Apartment",
    }
}

choice_enum! {
    /// Pace of the trip.
    TravelStyle {
        #[default]
        Relaxed => "Relaxed",
        FastPaced => "Fast-Paced",
        Adventurous => "Adventurous",
    }
}

choice_enum! {
    /// How physically demanding the activities may be.
    ActivityLevel {
        #[default]
        Low => "Low",
        Moderate => "Moderate",
        High => "High",
    }
}

/// Shortest trip the planner accepts, in days.
pub const MIN_DURATION_DAYS: u32 = 1;
/// Longest trip the planner accepts, in days.
pub const MAX_DURATION_DAYS: u32 = 60;
/// Smallest budget the planner accepts.
pub const MIN_BUDGET: u64 = 100;

/// Structured trip parameters shared by the prompt builder and the renderer.
///
/// `date` is kept as the ISO string it was collected as; the renderer prints
/// every field verbatim and performs no validation of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripDetails {
    pub source: String,
    pub destination: String,
    /// Start date, `YYYY-MM-DD`.
    pub date: String,
    /// Trip length in days.
    pub duration: u32,
    pub budget: u64,
    pub currency: Currency,
    pub language: Language,
    pub accommodation_preference: Accommodation,
    pub travel_style: TravelStyle,
}

impl TripDetails {
    /// `"<currency> <amount>"`, as printed on the cover and in the summary.
    pub fn budget_label(&self) -> String {
        format!("{} {}", self.currency, self.budget)
    }

    /// `"<n> days"`.
    pub fn duration_label(&self) -> String {
        format!("{} days", self.duration)
    }

    /// Collector-side check that every field is present and in range.
    ///
    /// The renderer never calls this; [`crate::plan_trip`] does, before the
    /// remote call.
    pub fn validate(&self) -> Result<(), ItineraryError> {
        for (field, value) in [
            ("source", &self.source),
            ("destination", &self.destination),
            ("date", &self.date),
        ] {
            if value.trim().is_empty() {
                return Err(ItineraryError::InvalidTripDetails {
                    field,
                    reason: "must not be empty".into(),
                });
            }
        }
        if parse_start_date(&self.date).is_none() {
            return Err(ItineraryError::InvalidTripDetails {
                field: "date",
                reason: format!("'{}' is not a valid YYYY-MM-DD date", self.date),
            });
        }
        if !(MIN_DURATION_DAYS..=MAX_DURATION_DAYS).contains(&self.duration) {
            return Err(ItineraryError::InvalidTripDetails {
                field: "duration",
                reason: format!(
                    "must be {}–{} days, got {}",
                    MIN_DURATION_DAYS, MAX_DURATION_DAYS, self.duration
                ),
            });
        }
        if self.budget < MIN_BUDGET {
            return Err(ItineraryError::InvalidTripDetails {
                field: "budget",
                reason: format!("must be at least {}, got {}", MIN_BUDGET, self.budget),
            });
        }
        Ok(())
    }
}

/// A real calendar date written exactly as `YYYY-MM-DD`.
fn parse_start_date(s: &str) -> Option<NaiveDate> {
    if s.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .filter(|d| d.year() >= 1)
}

/// Free-text preferences consumed only by the prompt builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub interests: String,
    pub dietary_restrictions: String,
    pub activity_level: ActivityLevel,
    pub must_visit_landmarks: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            interests: "nature, historical sites".into(),
            dietary_restrictions: "None".into(),
            activity_level: ActivityLevel::default(),
            must_visit_landmarks: "Eiffel Tower, Grand Canyon".into(),
        }
    }
}

/// An image forwarded unmodified to the model alongside the prompt.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    pub bytes: Vec<u8>,
    /// `image/png` or `image/jpeg`.
    pub mime_type: &'static str,
}

impl fmt::Debug for ImageAttachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageAttachment")
            .field("bytes", &format_args!("<{} bytes>", self.bytes.len()))
            .field("mime_type", &self.mime_type)
            .finish()
    }
}

/// One planner submission: built once, passed by value through the pipeline.
#[derive(Debug, Clone)]
pub struct TripRequest {
    pub details: TripDetails,
    pub preferences: Preferences,
    pub image: Option<ImageAttachment>,
}

impl TripRequest {
    pub fn new(details: TripDetails) -> Self {
        Self {
            details,
            preferences: Preferences::default(),
            image: None,
        }
    }

    pub fn with_preferences(mut self, preferences: Preferences) -> Self {
        self.preferences = preferences;
        self
    }

    pub fn with_image(mut self, image: ImageAttachment) -> Self {
        self.image = Some(image);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> TripDetails {
        TripDetails {
            source: "New York".into(),
            destination: "Los Angeles".into(),
            date: "2026-10-16".into(),
            duration: 7,
            budget: 1000,
            currency: Currency::Usd,
            language: Language::English,
            accommodation_preference: Accommodation::Hotel,
            travel_style: TravelStyle::Relaxed,
        }
    }

    #[test]
    fn labels_match_form_choices() {
        assert_eq!(TravelStyle::FastPaced.to_string(), "Fast-Paced");
        assert_eq!(Currency::Jpy.to_string(), "JPY");
        assert_eq!(Language::ALL.len(), 16);
        assert_eq!(Currency::ALL.len(), 6);
    }

    #[test]
    fn from_str_is_case_insensitive() {
        assert_eq!("fast-paced".parse::<TravelStyle>().unwrap(), TravelStyle::FastPaced);
        assert_eq!(" eur ".parse::<Currency>().unwrap(), Currency::Eur);
        assert!("Yen".parse::<Currency>().is_err());
    }

    #[test]
    fn serde_uses_labels() {
        let json = serde_json::to_string(&TravelStyle::FastPaced).unwrap();
        assert_eq!(json, "\"Fast-Paced\"");
        let back: Accommodation = serde_json::from_str("\"Apartment\"").unwrap();
        assert_eq!(back, Accommodation::Apartment);
    }

    #[test]
    fn budget_and_duration_labels() {
        let d = details();
        assert_eq!(d.budget_label(), "USD 1000");
        assert_eq!(d.duration_label(), "7 days");
    }

    #[test]
    fn validate_accepts_defaults_and_extremes() {
        let mut d = details();
        assert!(d.validate().is_ok());
        d.duration = 1;
        d.budget = 100;
        assert!(d.validate().is_ok());
        d.duration = 60;
        assert!(d.validate().is_ok());
    }

    #[test]
    fn validate_rejects_out_of_range() {
        let mut d = details();
        d.duration = 0;
        assert!(matches!(
            d.validate(),
            Err(ItineraryError::InvalidTripDetails { field: "duration", .. })
        ));

        let mut d = details();
        d.budget = 99;
        assert!(matches!(
            d.validate(),
            Err(ItineraryError::InvalidTripDetails { field: "budget", .. })
        ));
    }

    #[test]
    fn validate_rejects_blank_fields_and_bad_dates() {
        let mut d = details();
        d.destination = "   ".into();
        assert!(matches!(
            d.validate(),
            Err(ItineraryError::InvalidTripDetails { field: "destination", .. })
        ));

        let mut d = details();
        d.date = "16/10/2026".into();
        assert!(matches!(
            d.validate(),
            Err(ItineraryError::InvalidTripDetails { field: "date", .. })
        ));

        d.date = "2026-13-01".into();
        assert!(d.validate().is_err());
    }

    #[test]
    fn validate_rejects_dates_missing_from_the_calendar() {
        for date in ["2026-02-31", "2026-04-31", "2025-02-29", "0000-01-01", "2026-1-05"] {
            let mut d = details();
            d.date = date.into();
            assert!(
                matches!(
                    d.validate(),
                    Err(ItineraryError::InvalidTripDetails { field: "date", .. })
                ),
                "{date} should be rejected"
            );
        }

        let mut d = details();
        d.date = "2028-02-29".into();
        assert!(d.validate().is_ok());
    }

    #[test]
    fn image_debug_hides_bytes() {
        let img = ImageAttachment {
            bytes: vec![0u8; 2048],
            mime_type: "image/png",
        };
        let dbg = format!("{img:?}");
        assert!(dbg.contains("<2048 bytes>"));
    }
}
