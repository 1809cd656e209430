// Constants shared across the core crate

/// Field stamped with the owner identity on every created record
pub const OWNER_FIELD: &str = "User";

/// Storage key of the campaign collection
pub const CAMPAIGNS_KEY: &str = "metaCampaigns";
/// Storage key of the ad set collection
pub const AD_SETS_KEY: &str = "metaAdSets";
/// Storage key of the ad collection
pub const ADS_KEY: &str = "metaAds";

/// Campaign metric fields
pub mod campaign_fields {
    /// Budget spent, currency units
    pub const BUDGET_SPENT: &str = "Budget Spent (€)";
    /// Conversion count
    pub const CONVERSIONS: &str = "Conversions";
    /// Click count
    pub const CLICKS: &str = "Clicks";
    /// Click-through rate, percent
    pub const CTR: &str = "CTR (%)";
    /// Cost per acquisition, currency units
    pub const CPA: &str = "CPA (Cost per Acquisition)";
    /// Return on ad spend
    pub const ROAS: &str = "ROAS";
}

/// Ad set fields
pub mod ad_set_fields {
    /// Allocated budget
    pub const BUDGET: &str = "Budget";
    /// Flight start date
    pub const START_DATE: &str = "Start Date";
    /// Flight end date
    pub const END_DATE: &str = "End Date";
}

/// Ad metric fields
pub mod ad_fields {
    /// Click count
    pub const CLICKS: &str = "Clicks";
    /// Conversion count
    pub const CONVERSIONS: &str = "Conversions";
    /// Click-through rate, percent
    pub const CTR: &str = "CTR (%)";
    /// Engagement rate, percent
    pub const ENGAGEMENT: &str = "Engagement Rate (%)";
}

/// Advisory thresholds used by the KPI analyzer
pub mod thresholds {
    /// Campaign CTR below this (percent) suggests a creative refresh
    pub const CAMPAIGN_MIN_CTR: f64 = 2.0;
    /// Campaign CPA above this (currency units) suggests a bidding review
    pub const CAMPAIGN_MAX_CPA: f64 = 20.0;
    /// Campaign ROAS below this suggests remarketing
    pub const CAMPAIGN_MIN_ROAS: f64 = 2.0;
    /// Conversion rate below this (percent) suggests landing-page work
    pub const CAMPAIGN_MIN_CONVERSION_RATE: f64 = 5.0;
    /// Average ad set budget below this is considered low
    pub const AD_SET_MIN_BUDGET: f64 = 100.0;
    /// Ad CTR below this (percent) is very low
    pub const AD_MIN_CTR: f64 = 1.0;
    /// Ad engagement rate below this (percent) is low
    pub const AD_MIN_ENGAGEMENT: f64 = 2.0;
}

/// Default chat-completion endpoint
pub const DEFAULT_AI_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
/// Default chat-completion model
pub const DEFAULT_AI_MODEL: &str = "gpt-4o";
/// Default sampling temperature
pub const DEFAULT_AI_TEMPERATURE: f64 = 0.7;
/// Default target market interpolated into prompts
pub const DEFAULT_AI_MARKET: &str = "American";
/// Response cap for text campaign scripts
pub const CAMPAIGN_SCRIPT_MAX_TOKENS: u32 = 500;
/// Response cap for video campaign scripts
pub const VIDEO_SCRIPT_MAX_TOKENS: u32 = 600;

/// Default cadence of the periodic analysis, seconds
pub const DEFAULT_ANALYSIS_INTERVAL_SECS: u64 = 3600;

/// Milliseconds per day, used for ad set flight spans
pub const MILLIS_PER_DAY: f64 = 1000.0 * 3600.0 * 24.0;
