//! The itinerary prompt.
//!
//! One template, filled from the whole [`TripRequest`]. The "Format" block
//! asks for day-by-day sections separated by blank lines, which is what the
//! renderer splits paragraphs on. Keep the two in step.

use crate::trip::TripRequest;

/// Build the generation prompt for a request.
///
/// The image, if any, travels separately as an inline attachment; it is not
/// mentioned in the text.
pub fn build_prompt(request: &TripRequest) -> String {
    let d = &request.details;
    let p = &request.preferences;
    format!(
        r#"
Create a detailed travel itinerary in {language} for a trip from {source} to {destination} starting on {date}.
Trip duration: {duration} days.
Budget: {budget}.

Interests: {interests}
Dietary restrictions: {dietary}
Activity level: {activity}
Accommodation preference: {accommodation}
Travel style: {style}
Must-visit landmarks: {landmarks}

Format:
- Day-by-day itinerary
- Morning, afternoon, evening schedule
- Food recommendations
- Transport tips
- Final: "Travel Checklist"
"#,
        language = d.language,
        source = d.source,
        destination = d.destination,
        date = d.date,
        duration = d.duration,
        budget = d.budget_label(),
        interests = p.interests,
        dietary = p.dietary_restrictions,
        activity = p.activity_level,
        accommodation = d.accommodation_preference,
        style = d.travel_style,
        landmarks = p.must_visit_landmarks,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trip::{
        Accommodation, ActivityLevel, Currency, Language, Preferences, TravelStyle, TripDetails,
    };

    fn request() -> TripRequest {
        TripRequest::new(TripDetails {
            source: "Mumbai".into(),
            destination: "Paris".into(),
            date: "2026-05-01".into(),
            duration: 5,
            budget: 2500,
            currency: Currency::Eur,
            language: Language::French,
            accommodation_preference: Accommodation::Hostel,
            travel_style: TravelStyle::Adventurous,
        })
        .with_preferences(Preferences {
            interests: "art, food".into(),
            dietary_restrictions: "Vegetarian".into(),
            activity_level: ActivityLevel::High,
            must_visit_landmarks: "Louvre".into(),
        })
    }

    #[test]
    fn every_field_is_interpolated() {
        let prompt = build_prompt(&request());
        for needle in [
            "itinerary in French for a trip from Mumbai to Paris starting on 2026-05-01.",
            "Trip duration: 5 days.",
            "Budget: EUR 2500.",
            "Interests: art, food",
            "Dietary restrictions: Vegetarian",
            "Activity level: High",
            "Accommodation preference: Hostel",
            "Travel style: Adventurous",
            "Must-visit landmarks: Louvre",
        ] {
            assert!(prompt.contains(needle), "missing {needle:?} in:\n{prompt}");
        }
    }

    #[test]
    fn format_block_ends_with_checklist() {
        let prompt = build_prompt(&request());
        assert!(prompt.starts_with('\n'));
        assert!(prompt.ends_with("- Final: \"Travel Checklist\"\n"));
        let format_at = prompt.find("Format:").unwrap();
        assert!(prompt[format_at..].contains("- Day-by-day itinerary"));
        assert!(prompt[format_at..].contains("- Transport tips"));
    }

    #[test]
    fn default_preferences_appear() {
        let mut req = request();
        req.preferences = Preferences::default();
        let prompt = build_prompt(&req);
        assert!(prompt.contains("Interests: nature, historical sites"));
        assert!(prompt.contains("Dietary restrictions: None"));
        assert!(prompt.contains("Activity level: Low"));
        assert!(prompt.contains("Must-visit landmarks: Eiffel Tower, Grand Canyon"));
    }
}
