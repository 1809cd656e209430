//! KPI analyzer
//!
//! Averages, totals and rates over the three collections, with fixed
//! threshold advice. Read-only: nothing here writes to storage.

mod dates;
mod numbers;

pub use dates::{parse_date, span_days};
pub use numbers::{parse_float, parse_float_prefix, round2, Metric};

use serde::Serialize;
use crate::constants::{ad_fields, ad_set_fields, campaign_fields, thresholds};
use crate::storage::{PropertyStore, UserSpace};
use crate::types::{Record, RecordKind};
use numbers::{count, two_decimals};

/// Advisory sentences. Each is emitted with one trailing space.
pub mod advice {
    /// Campaign CTR under threshold
    pub const CTR_LOW: &str = "Your CTR is below the expected threshold. Consider testing new creative assets and refining your targeting.";
    /// Campaign CTR acceptable
    pub const CTR_OK: &str = "Your CTR is within an acceptable range.";
    /// Campaign CPA over threshold
    pub const CPA_HIGH: &str = "Your CPA is high. Review your bidding strategy and conversion funnel to optimize costs.";
    /// Campaign CPA acceptable
    pub const CPA_OK: &str = "Your CPA is under control.";
    /// Campaign ROAS under threshold
    pub const ROAS_LOW: &str = "Your ROAS is below the desired level. Consider remarketing strategies or adjusting your budget allocation.";
    /// Campaign ROAS acceptable
    pub const ROAS_OK: &str = "Your ROAS is satisfactory.";
    /// Campaign conversion rate under threshold
    pub const CONVERSION_LOW: &str = "The conversion rate is low; optimize your landing pages and call-to-action elements.";
    /// Campaign conversion rate acceptable
    pub const CONVERSION_OK: &str = "The conversion rate is good.";
    /// Ad set budgets under threshold
    pub const BUDGET_LOW: &str = "Your ad set budgets are low; consider increasing them for better reach.";
    /// Ad set budgets acceptable
    pub const BUDGET_OK: &str = "Ad set budgets appear adequate.";
    /// Ad CTR under threshold
    pub const AD_CTR_LOW: &str = "Ad CTR is very low; experiment with different ad formats and messaging.";
    /// Ad CTR acceptable
    pub const AD_CTR_OK: &str = "Ad CTR is acceptable.";
    /// Ad engagement under threshold
    pub const ENGAGEMENT_LOW: &str = "Engagement is low; try more interactive or engaging content.";
    /// Ad engagement acceptable
    pub const ENGAGEMENT_OK: &str = "Engagement levels are satisfactory.";
}

/// Campaign summary
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignSection {
    /// Sum of budget spent
    #[serde(serialize_with = "two_decimals")]
    pub total_budget: f64,
    /// Sum of conversions
    #[serde(serialize_with = "count")]
    pub total_conversions: f64,
    /// Sum of clicks
    #[serde(serialize_with = "count")]
    pub total_clicks: f64,
    /// Mean CTR over campaigns that report one
    #[serde(rename = "averageCTR")]
    pub average_ctr: Metric,
    /// Mean CPA, stored or derived from budget and conversions
    #[serde(rename = "averageCPA")]
    pub average_cpa: Metric,
    /// Mean ROAS over campaigns that report one
    #[serde(rename = "averageROAS")]
    pub average_roas: Metric,
    /// Total conversions per hundred total clicks
    pub conversion_rate: Metric,
    /// Advisory text
    pub suggestion: String,
}

/// Ad set summary
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdSetSection {
    /// Sum of budgets
    #[serde(serialize_with = "two_decimals")]
    pub total_budget: f64,
    /// Total budget over the number of ad sets
    pub average_budget: Metric,
    /// Total budget over the summed flight days of well-dated sets
    pub average_daily_budget: Metric,
    /// Advisory text
    pub suggestion: String,
}

/// Ad summary
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdSection {
    /// Sum of clicks
    #[serde(serialize_with = "count")]
    pub total_clicks: f64,
    /// Sum of conversions
    #[serde(serialize_with = "count")]
    pub total_conversions: f64,
    /// Mean CTR over ads that report one
    #[serde(rename = "averageCTR")]
    pub average_ctr: Metric,
    /// Mean engagement rate over ads that report one
    pub average_engagement: Metric,
    /// Total conversions per hundred total clicks
    pub conversion_rate: Metric,
    /// Advisory text
    pub suggestion: String,
}

/// Full report; a section is present only when its collection is non-empty
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnalysisReport {
    /// Campaign section
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaigns: Option<CampaignSection>,
    /// Ad set section
    #[serde(rename = "adSets", skip_serializing_if = "Option::is_none")]
    pub ad_sets: Option<AdSetSection>,
    /// Ad section
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ads: Option<AdSection>,
}

impl AnalysisReport {
    /// No collection had any records
    pub fn is_empty(&self) -> bool {
        self.campaigns.is_none() && self.ad_sets.is_none() && self.ads.is_none()
    }

    /// One-line digest for logs
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if let Some(c) = &self.campaigns {
            parts.push(format!("campaigns ctr={} cpa={} roas={} conv={}", c.average_ctr, c.average_cpa, c.average_roas, c.conversion_rate));
        }
        if let Some(s) = &self.ad_sets {
            parts.push(format!("adsets avg={} daily={}", s.average_budget, s.average_daily_budget));
        }
        if let Some(a) = &self.ads {
            parts.push(format!("ads ctr={} engagement={} conv={}", a.average_ctr, a.average_engagement, a.conversion_rate));
        }
        if parts.is_empty() {
            "no records".to_string()
        } else {
            parts.join("; ")
        }
    }
}

/// Analyze the current contents of one identity's collections
pub fn analyze<S: PropertyStore>(space: &UserSpace<S>) -> AnalysisReport {
    analyze_collections(
        &space.load(RecordKind::Campaign),
        &space.load(RecordKind::AdSet),
        &space.load(RecordKind::Ad),
    )
}

/// Analyze already-loaded collections
pub fn analyze_collections(campaigns: &[Record], ad_sets: &[Record], ads: &[Record]) -> AnalysisReport {
    AnalysisReport {
        campaigns: (!campaigns.is_empty()).then(|| analyze_campaigns(campaigns)),
        ad_sets: (!ad_sets.is_empty()).then(|| analyze_ad_sets(ad_sets)),
        ads: (!ads.is_empty()).then(|| analyze_ads(ads)),
    }
}

/// Running sum and sample count of an optional metric
#[derive(Default)]
struct Samples {
    sum: f64,
    count: usize,
}

impl Samples {
    fn push(&mut self, value: Option<f64>) {
        if let Some(v) = value {
            self.sum += v;
            self.count += 1;
        }
    }

    fn mean(&self) -> Metric {
        Metric::mean(self.sum, self.count)
    }
}

fn field(record: &Record, name: &str) -> Option<f64> {
    parse_float(record.get(name))
}

/// Absent or unparsable counts as zero
fn amount(record: &Record, name: &str) -> f64 {
    field(record, name).unwrap_or(0.0)
}

fn pick(condition: bool, when_true: &str, when_false: &str, out: &mut String) {
    out.push_str(if condition { when_true } else { when_false });
    out.push(' ');
}

fn analyze_campaigns(campaigns: &[Record]) -> CampaignSection {
    let (mut total_budget, mut total_conversions, mut total_clicks) = (0.0, 0.0, 0.0);
    let (mut ctr, mut cpa, mut roas) = (Samples::default(), Samples::default(), Samples::default());

    for c in campaigns {
        let budget = amount(c, campaign_fields::BUDGET_SPENT);
        let conversions = amount(c, campaign_fields::CONVERSIONS);
        total_budget += budget;
        total_conversions += conversions;
        total_clicks += amount(c, campaign_fields::CLICKS);

        ctr.push(field(c, campaign_fields::CTR));
        cpa.push(
            field(c, campaign_fields::CPA)
                .or_else(|| (budget > 0.0 && conversions > 0.0).then(|| budget / conversions)),
        );
        roas.push(field(c, campaign_fields::ROAS));
    }

    let average_ctr = ctr.mean();
    let average_cpa = cpa.mean();
    let average_roas = roas.mean();
    let conversion_rate = Metric::ratio(total_conversions, total_clicks, 100.0);

    let mut suggestion = String::new();
    pick(average_ctr.is_below(thresholds::CAMPAIGN_MIN_CTR), advice::CTR_LOW, advice::CTR_OK, &mut suggestion);
    pick(average_cpa.is_above(thresholds::CAMPAIGN_MAX_CPA), advice::CPA_HIGH, advice::CPA_OK, &mut suggestion);
    pick(average_roas.is_below(thresholds::CAMPAIGN_MIN_ROAS), advice::ROAS_LOW, advice::ROAS_OK, &mut suggestion);
    pick(
        conversion_rate.is_below(thresholds::CAMPAIGN_MIN_CONVERSION_RATE),
        advice::CONVERSION_LOW,
        advice::CONVERSION_OK,
        &mut suggestion,
    );

    CampaignSection {
        total_budget,
        total_conversions,
        total_clicks,
        average_ctr,
        average_cpa,
        average_roas,
        conversion_rate,
        suggestion,
    }
}

fn analyze_ad_sets(ad_sets: &[Record]) -> AdSetSection {
    let mut total_budget = 0.0;
    let mut total_days = 0.0;
    for set in ad_sets {
        total_budget += amount(set, ad_set_fields::BUDGET);
        if let Some(days) = span_days(set.get(ad_set_fields::START_DATE), set.get(ad_set_fields::END_DATE)) {
            total_days += days;
        }
    }

    let average_budget = Metric::mean(total_budget, ad_sets.len());
    let average_daily_budget = Metric::ratio(total_budget, total_days, 1.0);

    let mut suggestion = String::new();
    pick(average_budget.is_below(thresholds::AD_SET_MIN_BUDGET), advice::BUDGET_LOW, advice::BUDGET_OK, &mut suggestion);
    suggestion.push_str(&format!("Average Daily Budget: €{}", average_daily_budget));

    AdSetSection {
        total_budget,
        average_budget,
        average_daily_budget,
        suggestion,
    }
}

fn analyze_ads(ads: &[Record]) -> AdSection {
    let (mut total_clicks, mut total_conversions) = (0.0, 0.0);
    let (mut ctr, mut engagement) = (Samples::default(), Samples::default());

    for ad in ads {
        total_clicks += amount(ad, ad_fields::CLICKS);
        total_conversions += amount(ad, ad_fields::CONVERSIONS);
        ctr.push(field(ad, ad_fields::CTR));
        engagement.push(field(ad, ad_fields::ENGAGEMENT));
    }

    let average_ctr = ctr.mean();
    let average_engagement = engagement.mean();
    let conversion_rate = Metric::ratio(total_conversions, total_clicks, 100.0);

    let mut suggestion = String::new();
    pick(average_ctr.is_below(thresholds::AD_MIN_CTR), advice::AD_CTR_LOW, advice::AD_CTR_OK, &mut suggestion);
    pick(
        average_engagement.is_below(thresholds::AD_MIN_ENGAGEMENT),
        advice::ENGAGEMENT_LOW,
        advice::ENGAGEMENT_OK,
        &mut suggestion,
    );
    suggestion.push_str(&format!("Conversion Rate: {}%.", conversion_rate));

    AdSection {
        total_clicks,
        total_conversions,
        average_ctr,
        average_engagement,
        conversion_rate,
        suggestion,
    }
}

#[cfg(test)]
mod tests;
