//! Canned-reply traffic assistant.
//!
//! Utterances are classified by case-insensitive keyword containment, checked
//! in a fixed priority order. Within a category the reply is drawn uniformly
//! at random, so two identical questions can get different answers.

mod replies;
mod transcript;

pub use transcript::{ChatMessage, Sender, Transcript, WELCOME};

use rand::seq::IndexedRandom;

const GREETING_KEYWORDS: &[&str] = &["hello", "hi", "hey", "greetings"];
const HELP_KEYWORDS: &[&str] = &["help", "what can you do", "what questions", "examples"];
const FAREWELL_KEYWORDS: &[&str] = &["thank", "thanks", "bye", "goodbye"];
const WEATHER_KEYWORDS: &[&str] = &["weather", "rain", "snow", "storm"];
const PARKING_KEYWORDS: &[&str] = &["parking", "park", "garage"];
const SPEED_KEYWORDS: &[&str] = &["speed", "limit", "fast"];
const INCIDENT_KEYWORDS: &[&str] = &["accident", "incident"];
const CONSTRUCTION_KEYWORDS: &[&str] = &["construction"];
const ROUTE_KEYWORDS: &[&str] = &["route", "directions", "fastest", "quickest"];
const CONDITION_KEYWORDS: &[&str] = &["status", "condition", "how is"];

const TRAFFIC_KEYWORDS: &[&str] = &[
    "traffic", "road", "highway", "interstate", "congestion", "accident", "incident", "closure",
    "detour", "construction", "jam", "route", "directions", "path", "fastest", "quickest",
    "alternative", "way", "commute", "travel time", "delay", "status", "eta", "arrival",
    "distance", "miles", "kilometers", "parking", "toll", "speed limit", "weather", "roadwork",
    "emergency", "police", "crash", "backup",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyCategory {
    Greeting,
    Help,
    Farewell,
    Weather,
    Parking,
    SpeedLimit,
    Incident,
    Construction,
    Route,
    Conditions,
    GeneralTraffic,
    Fallback,
}

impl ReplyCategory {
    pub fn replies(&self) -> &'static [&'static str] {
        match self {
            ReplyCategory::Greeting => replies::GREETING,
            ReplyCategory::Help => replies::HELP,
            ReplyCategory::Farewell => replies::FAREWELL,
            ReplyCategory::Weather => replies::WEATHER,
            ReplyCategory::Parking => replies::PARKING,
            ReplyCategory::SpeedLimit => replies::SPEED_LIMIT,
            ReplyCategory::Incident => replies::INCIDENT,
            ReplyCategory::Construction => replies::CONSTRUCTION,
            ReplyCategory::Route => replies::ROUTE,
            ReplyCategory::Conditions => replies::CONDITIONS,
            ReplyCategory::GeneralTraffic => replies::GENERAL_TRAFFIC,
            ReplyCategory::Fallback => replies::FALLBACK,
        }
    }
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|word| text.contains(word))
}

/// Pick the reply category for an utterance.
pub fn classify(utterance: &str) -> ReplyCategory {
    let input = utterance.to_lowercase();

    if contains_any(&input, GREETING_KEYWORDS) {
        return ReplyCategory::Greeting;
    }
    if contains_any(&input, HELP_KEYWORDS) {
        return ReplyCategory::Help;
    }
    if contains_any(&input, FAREWELL_KEYWORDS) {
        return ReplyCategory::Farewell;
    }
    if contains_any(&input, WEATHER_KEYWORDS) {
        return ReplyCategory::Weather;
    }
    if contains_any(&input, PARKING_KEYWORDS) {
        return ReplyCategory::Parking;
    }
    if contains_any(&input, SPEED_KEYWORDS) {
        return ReplyCategory::SpeedLimit;
    }

    if contains_any(&input, TRAFFIC_KEYWORDS) {
        if contains_any(&input, INCIDENT_KEYWORDS) {
            return ReplyCategory::Incident;
        }
        if contains_any(&input, CONSTRUCTION_KEYWORDS) {
            return ReplyCategory::Construction;
        }
        if contains_any(&input, ROUTE_KEYWORDS) {
            return ReplyCategory::Route;
        }
        if contains_any(&input, CONDITION_KEYWORDS) {
            return ReplyCategory::Conditions;
        }
        return ReplyCategory::GeneralTraffic;
    }

    ReplyCategory::Fallback
}

/// Answer an utterance with one of the canned replies for its category.
pub fn respond(utterance: &str) -> String {
    let category = classify(utterance);
    let reply = category
        .replies()
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or(replies::FALLBACK[0]);
    tracing::trace!(?category, "chat reply selected");
    reply.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_reply_in(utterance: &str, category: ReplyCategory) {
        for _ in 0..20 {
            let reply = respond(utterance);
            assert!(
                category.replies().contains(&reply.as_str()),
                "reply to {:?} not in {:?}: {}",
                utterance,
                category,
                reply
            );
        }
    }

    #[test]
    fn test_greeting() {
        assert_eq!(classify("hello"), ReplyCategory::Greeting);
        assert_reply_in("hello", ReplyCategory::Greeting);
    }

    #[test]
    fn test_incident_regardless_of_case() {
        assert_reply_in("is there an accident on I-95", ReplyCategory::Incident);
        assert_reply_in("IS THERE AN ACCIDENT ON I-95", ReplyCategory::Incident);
        assert_eq!(classify("Any INCIDENT reported?"), ReplyCategory::Incident);
    }

    #[test]
    fn test_priority_order() {
        // Greeting beats help.
        assert_eq!(classify("hey, help me"), ReplyCategory::Greeting);
        // Help beats farewell.
        assert_eq!(classify("examples please, thanks"), ReplyCategory::Help);
        // Weather beats traffic.
        assert_eq!(classify("is rain causing traffic"), ReplyCategory::Weather);
        // Parking beats speed.
        assert_eq!(classify("garage speed bumps"), ReplyCategory::Parking);
        // Speed beats the route sub-dispatch ("fastest" contains "fast").
        assert_eq!(classify("fastest route downtown"), ReplyCategory::SpeedLimit);
    }

    #[test]
    fn test_traffic_sub_dispatch() {
        assert_eq!(classify("construction on main street road"), ReplyCategory::Construction);
        assert_eq!(classify("best route to the airport"), ReplyCategory::Route);
        assert_eq!(classify("directions to the mall"), ReplyCategory::Route);
        assert_eq!(classify("traffic status downtown"), ReplyCategory::Conditions);
        assert_eq!(classify("any congestion"), ReplyCategory::GeneralTraffic);
    }

    #[test]
    fn test_substring_matching() {
        // "this" contains "hi", as the keyword rules are plain containment.
        assert_eq!(classify("this"), ReplyCategory::Greeting);
        assert_eq!(classify("goodbye"), ReplyCategory::Farewell);
    }

    #[test]
    fn test_fallback() {
        assert_eq!(classify("xyz"), ReplyCategory::Fallback);
        assert_eq!(classify(""), ReplyCategory::Fallback);
        assert_reply_in("qwerty", ReplyCategory::Fallback);
    }

    #[test]
    fn test_every_category_has_replies() {
        for category in [
            ReplyCategory::Greeting,
            ReplyCategory::Help,
            ReplyCategory::Farewell,
            ReplyCategory::Weather,
            ReplyCategory::Parking,
            ReplyCategory::SpeedLimit,
            ReplyCategory::Incident,
            ReplyCategory::Construction,
            ReplyCategory::Route,
            ReplyCategory::Conditions,
            ReplyCategory::GeneralTraffic,
            ReplyCategory::Fallback,
        ] {
            assert!(!category.replies().is_empty(), "{:?}", category);
        }
    }
}
