use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    TikTok,
    Instagram,
    Twitter,
    LinkedIn,
    Other,
}

impl Platform {
    pub fn from_label(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "tiktok" => Platform::TikTok,
            "instagram" => Platform::Instagram,
            "twitter" => Platform::Twitter,
            "linkedin" => Platform::LinkedIn,
            _ => Platform::Other,
        }
    }

    pub fn multiplier(self) -> f64 {
        match self {
            Platform::TikTok => 1.2,
            Platform::Instagram => 1.1,
            Platform::Twitter => 1.0,
            Platform::LinkedIn => 0.9,
            Platform::Other => 1.0,
        }
    }

    pub fn best_time(self) -> &'static str {
        match self {
            Platform::Instagram => "11:00 AM - 1:00 PM",
            Platform::TikTok => "6:00 AM - 10:00 AM",
            Platform::Twitter => "9:00 AM - 10:00 AM",
            Platform::LinkedIn => "8:00 AM - 10:00 AM",
            Platform::Other => "2:00 PM - 4:00 PM",
        }
    }
}
