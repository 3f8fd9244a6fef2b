//! Turns a raw wire response into a fully-populated [`AdResponse`].
//!
//! The generation service is an LLM behind an HTTP endpoint and sometimes
//! drops optional insight fields or whole sections. A response missing any
//! top-level section is rejected; the three optional insight fields get
//! fixed fallbacks.

use crate::models::{AdResponse, AudienceInsight, RawAdResponse, RawAudienceInsight};

pub const FALLBACK_DEMOGRAPHICS: &str = "Not specified";

pub const FALLBACK_INTERESTS: &[&str] = &["Online shopping", "Fashion", "Lifestyle"];

pub const FALLBACK_BEHAVIORS: &[&str] =
    &["Frequent online shoppers", "Engages with brand content"];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NormalizeError {
    #[error("Invalid response format from server: missing `{0}` section")]
    MissingSection(&'static str),
}

pub fn normalize(raw: RawAdResponse) -> Result<AdResponse, NormalizeError> {
    let insights = raw
        .insights
        .ok_or(NormalizeError::MissingSection("insights"))?;
    let variations = raw
        .variations
        .ok_or(NormalizeError::MissingSection("variations"))?;
    let compliance = raw
        .compliance
        .ok_or(NormalizeError::MissingSection("compliance"))?;
    let channel_opt = raw
        .channel_opt
        .ok_or(NormalizeError::MissingSection("channel_opt"))?;

    Ok(AdResponse {
        insights: fill_insight_defaults(insights),
        variations,
        compliance,
        channel_opt,
    })
}

fn fill_insight_defaults(raw: RawAudienceInsight) -> AudienceInsight {
    let demographics = match raw.demographics {
        Some(d) if !d.trim().is_empty() => d,
        _ => FALLBACK_DEMOGRAPHICS.to_string(),
    };

    let targeting_interests = if raw.targeting_interests.is_empty() {
        owned(FALLBACK_INTERESTS)
    } else {
        raw.targeting_interests
    };

    let behaviors = if raw.behaviors.is_empty() {
        owned(FALLBACK_BEHAVIORS)
    } else {
        raw.behaviors
    };

    AudienceInsight {
        pain_points: raw.pain_points,
        emotional_triggers: raw.emotional_triggers,
        objections: raw.objections,
        competitive_angle: raw.competitive_angle,
        key_selling_points: raw.key_selling_points,
        recommended_keywords: raw.recommended_keywords,
        demographics,
        targeting_interests,
        behaviors,
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_raw() -> RawAdResponse {
        serde_json::from_value(serde_json::json!({
            "insights": {
                "pain_points": ["Dry skin in winter"],
                "emotional_triggers": ["Comfort"],
                "objections": ["Price"],
                "competitive_angle": "Only mist with real lavender oil",
                "key_selling_points": ["Calms instantly"],
                "recommended_keywords": ["lavender mist"],
                "demographics": "25-45, Female, Urban areas",
                "targeting_interests": ["Aromatherapy"],
                "behaviors": ["Buys wellness products"]
            },
            "variations": [
                {"headline": "H1", "primary_text": "B1", "cta": "C1", "angle": "Emotional"},
                {"headline": "H2", "primary_text": "B2", "cta": "C2", "angle": "Logical"},
                {"headline": "H3", "primary_text": "B3", "cta": "C3", "angle": "Scarcity"}
            ],
            "compliance": {"risk_level": "Low", "issues": [], "suggestions": ["Keep claims modest"]},
            "channel_opt": {"whatsapp": "Hey! ✨", "sms": "Try Lavender Mist today."}
        }))
        .unwrap()
    }

    #[test]
    fn complete_response_passes_through() {
        let result = normalize(sample_raw()).unwrap();
        assert_eq!(result.variations.len(), 3);
        assert_eq!(result.insights.demographics, "25-45, Female, Urban areas");
        assert_eq!(result.insights.targeting_interests, vec!["Aromatherapy"]);
        assert_eq!(result.compliance.risk_level, "Low");
    }

    #[test]
    fn each_missing_section_is_rejected() {
        for section in ["insights", "variations", "compliance", "channel_opt"] {
            let mut value = serde_json::json!({
                "insights": {"pain_points": []},
                "variations": [],
                "compliance": {"risk_level": "Low"},
                "channel_opt": {"whatsapp": "", "sms": ""}
            });
            value.as_object_mut().unwrap().remove(section);

            let raw: RawAdResponse = serde_json::from_value(value).unwrap();
            assert_eq!(
                normalize(raw),
                Err(NormalizeError::MissingSection(section)),
            );
        }
    }

    #[test]
    fn absent_demographics_gets_fallback() {
        let mut raw = sample_raw();
        raw.insights.as_mut().unwrap().demographics = None;
        let result = normalize(raw).unwrap();
        assert_eq!(result.insights.demographics, FALLBACK_DEMOGRAPHICS);
    }

    #[test]
    fn blank_demographics_gets_fallback() {
        let mut raw = sample_raw();
        raw.insights.as_mut().unwrap().demographics = Some("  ".to_string());
        let result = normalize(raw).unwrap();
        assert_eq!(result.insights.demographics, FALLBACK_DEMOGRAPHICS);
    }

    #[test]
    fn empty_targeting_interests_gets_fallback() {
        let mut raw = sample_raw();
        raw.insights.as_mut().unwrap().targeting_interests.clear();
        let result = normalize(raw).unwrap();
        assert_eq!(result.insights.targeting_interests, FALLBACK_INTERESTS);
        assert!(!result.insights.targeting_interests.is_empty());
    }

    #[test]
    fn empty_behaviors_gets_fallback() {
        let mut raw = sample_raw();
        raw.insights.as_mut().unwrap().behaviors.clear();
        let result = normalize(raw).unwrap();
        assert_eq!(result.insights.behaviors, FALLBACK_BEHAVIORS);
    }

    #[test]
    fn populated_optional_fields_are_untouched() {
        let result = normalize(sample_raw()).unwrap();
        assert_eq!(result.insights.behaviors, vec!["Buys wellness products"]);
    }
}
