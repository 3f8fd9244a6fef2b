use serde::{Deserialize, Serialize};

/// Campaign parameters collected by the form and sent to the generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdRequest {
    pub product_name: String,
    pub description: String,
    pub target_audience: String,
    pub platform: Platform,
    pub campaign_goal: String,
    pub tone: Tone,
    pub framework: Framework,
}

impl Default for AdRequest {
    fn default() -> Self {
        Self {
            product_name: String::new(),
            description: String::new(),
            target_audience: String::new(),
            platform: Platform::Instagram,
            campaign_goal: "Sales".to_string(),
            tone: Tone::Professional,
            framework: Framework::Aida,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Platform {
    Instagram,
    Facebook,
    LinkedIn,
    WhatsApp,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Instagram => "Instagram",
            Platform::Facebook => "Facebook",
            Platform::LinkedIn => "LinkedIn",
            Platform::WhatsApp => "WhatsApp",
        }
    }

    pub fn all() -> &'static [Platform] {
        &[
            Platform::Instagram,
            Platform::Facebook,
            Platform::LinkedIn,
            Platform::WhatsApp,
        ]
    }

    pub fn cycled(self, step: isize) -> Self {
        cycle(Self::all(), self, step)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    Professional,
    Emotional,
    Casual,
    Urgent,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Professional => "Professional",
            Tone::Emotional => "Emotional",
            Tone::Casual => "Casual",
            Tone::Urgent => "Urgent",
        }
    }

    pub fn all() -> &'static [Tone] {
        &[Tone::Professional, Tone::Emotional, Tone::Casual, Tone::Urgent]
    }

    pub fn cycled(self, step: isize) -> Self {
        cycle(Self::all(), self, step)
    }
}

/// Copywriting framework the service structures the ad copy with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Framework {
    #[serde(rename = "AIDA")]
    Aida,
    #[serde(rename = "PAS")]
    Pas,
    #[serde(rename = "Problem-Solution")]
    ProblemSolution,
    #[serde(rename = "Urgency-Scarcity")]
    UrgencyScarcity,
}

impl Framework {
    pub fn as_str(&self) -> &'static str {
        match self {
            Framework::Aida => "AIDA",
            Framework::Pas => "PAS",
            Framework::ProblemSolution => "Problem-Solution",
            Framework::UrgencyScarcity => "Urgency-Scarcity",
        }
    }

    pub fn all() -> &'static [Framework] {
        &[
            Framework::Aida,
            Framework::Pas,
            Framework::ProblemSolution,
            Framework::UrgencyScarcity,
        ]
    }

    pub fn cycled(self, step: isize) -> Self {
        cycle(Self::all(), self, step)
    }
}

fn cycle<T: Copy + PartialEq>(all: &[T], current: T, step: isize) -> T {
    let len = all.len() as isize;
    let i = all.iter().position(|v| *v == current).unwrap_or(0) as isize;
    all[(i + step).rem_euclid(len) as usize]
}

/// Audience analysis as stored after normalization; every field is populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudienceInsight {
    pub pain_points: Vec<String>,
    pub emotional_triggers: Vec<String>,
    pub objections: Vec<String>,
    pub competitive_angle: String,
    pub key_selling_points: Vec<String>,
    pub recommended_keywords: Vec<String>,
    pub demographics: String,
    pub targeting_interests: Vec<String>,
    pub behaviors: Vec<String>,
}

/// One A/B test variant. `angle` is open-ended (Emotional, Logical,
/// Scarcity, or whatever else the service labels it).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdVariation {
    #[serde(default)]
    pub headline: String,
    #[serde(default)]
    pub primary_text: String,
    #[serde(default)]
    pub cta: String,
    #[serde(default)]
    pub angle: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceCheck {
    #[serde(default)]
    pub risk_level: String,
    #[serde(default)]
    pub issues: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

/// Pre-rendered copy for messaging channels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelOptimization {
    #[serde(default)]
    pub whatsapp: String,
    #[serde(default)]
    pub sms: String,
}

/// Fully-populated generation result as held by the app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdResponse {
    pub insights: AudienceInsight,
    pub variations: Vec<AdVariation>,
    pub compliance: ComplianceCheck,
    pub channel_opt: ChannelOptimization,
}

/// Response exactly as it comes off the wire. The service occasionally omits
/// sections or insight fields; normalization turns this into an `AdResponse`
/// or rejects it.
#[derive(Debug, Clone, Deserialize)]
pub struct RawAdResponse {
    #[serde(default)]
    pub insights: Option<RawAudienceInsight>,
    #[serde(default)]
    pub variations: Option<Vec<AdVariation>>,
    #[serde(default)]
    pub compliance: Option<ComplianceCheck>,
    #[serde(default)]
    pub channel_opt: Option<ChannelOptimization>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAudienceInsight {
    #[serde(default)]
    pub pain_points: Vec<String>,
    #[serde(default)]
    pub emotional_triggers: Vec<String>,
    #[serde(default)]
    pub objections: Vec<String>,
    #[serde(default)]
    pub competitive_angle: String,
    #[serde(default)]
    pub key_selling_points: Vec<String>,
    #[serde(default)]
    pub recommended_keywords: Vec<String>,
    #[serde(default)]
    pub demographics: Option<String>,
    #[serde(default)]
    pub targeting_interests: Vec<String>,
    #[serde(default)]
    pub behaviors: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_with_wire_names() {
        let request = AdRequest {
            product_name: "Silk Aura".to_string(),
            description: "Hand-woven silk sarees".to_string(),
            target_audience: "Wedding shoppers".to_string(),
            platform: Platform::LinkedIn,
            campaign_goal: "Sales".to_string(),
            tone: Tone::Emotional,
            framework: Framework::UrgencyScarcity,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["product_name"], "Silk Aura");
        assert_eq!(value["platform"], "LinkedIn");
        assert_eq!(value["tone"], "Emotional");
        assert_eq!(value["framework"], "Urgency-Scarcity");
    }

    #[test]
    fn framework_cycles_through_all_variants() {
        let mut framework = Framework::Aida;
        for _ in 0..Framework::all().len() {
            framework = framework.cycled(1);
        }
        assert_eq!(framework, Framework::Aida);
        assert_eq!(Framework::Aida.cycled(-1), Framework::UrgencyScarcity);
    }
}
