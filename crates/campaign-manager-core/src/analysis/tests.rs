use super::*;
use crate::storage::MemoryPropertyStore;
use crate::types::UserId;
use serde_json::{json, Value};
use std::sync::Arc;

fn records(value: Value) -> Vec<Record> {
    serde_json::from_value(value).unwrap()
}

#[test]
fn empty_collections_omit_every_section() {
    let report = analyze_collections(&[], &[], &[]);
    assert!(report.is_empty());
    assert_eq!(serde_json::to_value(&report).unwrap(), json!({}));
    assert_eq!(report.summary(), "no records");
}

#[test]
fn cpa_falls_back_to_budget_over_conversions() {
    let campaigns = records(json!([{
        "Budget Spent (€)": "50",
        "Conversions": "10",
        "Clicks": "500"
    }]));
    let report = analyze_collections(&campaigns, &[], &[]);
    assert!(report.ad_sets.is_none());
    assert!(report.ads.is_none());

    let c = report.campaigns.unwrap();
    assert_eq!(c.average_cpa, Metric::Value(5.0));
    assert_eq!(c.conversion_rate.to_string(), "2.00");
    assert_eq!(c.average_ctr, Metric::NotApplicable);
    assert_eq!(c.average_roas, Metric::NotApplicable);
    assert_eq!(
        c.suggestion,
        format!(
            "{} {} {} {} ",
            advice::CTR_OK,
            advice::CPA_OK,
            advice::ROAS_OK,
            advice::CONVERSION_LOW
        )
    );
}

#[test]
fn campaign_section_json_shape() {
    let campaigns = records(json!([{
        "Budget Spent (€)": "50",
        "Conversions": 10,
        "Clicks": "500"
    }]));
    let report = analyze_collections(&campaigns, &[], &[]);
    assert_eq!(
        serde_json::to_value(&report).unwrap(),
        json!({
            "campaigns": {
                "totalBudget": "50.00",
                "totalConversions": 10,
                "totalClicks": 500,
                "averageCTR": "N/A",
                "averageCPA": "5.00",
                "averageROAS": "N/A",
                "conversionRate": "2.00",
                "suggestion": c_suggestion(false, false, false, true)
            }
        })
    );
}

fn c_suggestion(ctr_low: bool, cpa_high: bool, roas_low: bool, conv_low: bool) -> String {
    [
        if ctr_low { advice::CTR_LOW } else { advice::CTR_OK },
        if cpa_high { advice::CPA_HIGH } else { advice::CPA_OK },
        if roas_low { advice::ROAS_LOW } else { advice::ROAS_OK },
        if conv_low { advice::CONVERSION_LOW } else { advice::CONVERSION_OK },
    ]
    .iter()
    .map(|s| format!("{} ", s))
    .collect()
}

#[test]
fn every_campaign_threshold_can_trigger() {
    let campaigns = records(json!([
        {"Budget Spent (€)": "300", "Conversions": "5", "Clicks": "1000", "CTR (%)": "1.2", "CPA (Cost per Acquisition)": "30", "ROAS": "1.5"},
        {"Budget Spent (€)": "100", "Conversions": "4", "Clicks": "1000", "CTR (%)": "1.8%", "CPA (Cost per Acquisition)": "25", "ROAS": "1.1"}
    ]));
    let c = analyze_collections(&campaigns, &[], &[]).campaigns.unwrap();
    assert_eq!(c.total_budget, 400.0);
    assert_eq!(c.average_ctr.to_string(), "1.50");
    assert_eq!(c.average_cpa.to_string(), "27.50");
    assert_eq!(c.average_roas.to_string(), "1.30");
    assert_eq!(c.conversion_rate.to_string(), "0.45");
    assert_eq!(c.suggestion, c_suggestion(true, true, true, true));
}

#[test]
fn healthy_campaigns_get_positive_advice() {
    let campaigns = records(json!([
        {"Budget Spent (€)": "100", "Conversions": "20", "Clicks": "200", "CTR (%)": "3.5", "ROAS": "4"}
    ]));
    let c = analyze_collections(&campaigns, &[], &[]).campaigns.unwrap();
    assert_eq!(c.average_cpa.to_string(), "5.00");
    assert_eq!(c.conversion_rate.to_string(), "10.00");
    assert_eq!(c.suggestion, c_suggestion(false, false, false, false));
}

#[test]
fn stored_cpa_wins_and_unusable_rows_skip_fallback() {
    let campaigns = records(json!([
        {"Budget Spent (€)": "100", "Conversions": "10", "CPA (Cost per Acquisition)": "12"},
        {"Budget Spent (€)": "100", "Conversions": "0"},
        {"Budget Spent (€)": "abc", "Conversions": "4"}
    ]));
    let c = analyze_collections(&campaigns, &[], &[]).campaigns.unwrap();
    assert_eq!(c.average_cpa, Metric::Value(12.0));
    assert_eq!(c.total_budget, 200.0);
    assert_eq!(c.total_conversions, 14.0);
    assert_eq!(c.conversion_rate, Metric::NotApplicable);
    assert!(c.suggestion.ends_with(&format!("{} ", advice::CONVERSION_OK)));
}

#[test]
fn ad_set_daily_budget_uses_valid_spans_only() {
    let ad_sets = records(json!([
        {"Budget": "50", "Start Date": "2024-01-01", "End Date": "2024-01-11"},
        {"Budget": "70", "Start Date": "2024-02-10", "End Date": "2024-02-01"},
        {"Budget": "30", "Start Date": "someday", "End Date": "2024-02-01"}
    ]));
    let s = analyze_collections(&[], &ad_sets, &[]).ad_sets.unwrap();
    assert_eq!(s.average_budget.to_string(), "50.00");
    assert_eq!(s.average_daily_budget.to_string(), "15.00");
    assert_eq!(s.suggestion, format!("{} Average Daily Budget: €15.00", advice::BUDGET_LOW));
    assert_eq!(
        serde_json::to_value(&s).unwrap(),
        json!({
            "totalBudget": "150.00",
            "averageBudget": "50.00",
            "averageDailyBudget": "15.00",
            "suggestion": s.suggestion
        })
    );
}

#[test]
fn ad_set_without_any_span_reports_na() {
    let ad_sets = records(json!([{"Budget": "500"}]));
    let s = analyze_collections(&[], &ad_sets, &[]).ad_sets.unwrap();
    assert_eq!(s.average_daily_budget, Metric::NotApplicable);
    assert_eq!(s.suggestion, format!("{} Average Daily Budget: €N/A", advice::BUDGET_OK));
}

#[test]
fn ad_section_advice_and_conversion_rate() {
    let ads = records(json!([
        {"Clicks": "200", "Conversions": "6", "CTR (%)": "0.5", "Engagement Rate (%)": "1.5"},
        {"Clicks": "100", "Conversions": "3", "CTR (%)": "0.9"}
    ]));
    let a = analyze_collections(&[], &[], &ads).ads.unwrap();
    assert_eq!(a.average_ctr.to_string(), "0.70");
    assert_eq!(a.average_engagement.to_string(), "1.50");
    assert_eq!(
        a.suggestion,
        format!("{} {} Conversion Rate: 3.00%.", advice::AD_CTR_LOW, advice::ENGAGEMENT_LOW)
    );
    assert_eq!(
        serde_json::to_value(&a).unwrap()["totalClicks"],
        json!(300)
    );
}

#[test]
fn ads_without_metrics_are_satisfactory() {
    let ads = records(json!([{"Name": "Just Listed"}]));
    let a = analyze_collections(&[], &[], &ads).ads.unwrap();
    assert_eq!(
        a.suggestion,
        format!("{} {} Conversion Rate: N/A%.", advice::AD_CTR_OK, advice::ENGAGEMENT_OK)
    );
}

#[test]
fn analyze_reads_the_users_collections() {
    let store = Arc::new(MemoryPropertyStore::new());
    let space = UserSpace::new(UserId::new("agent@example.com").unwrap(), store);
    space
        .save(RecordKind::Ad, &records(json!([{"Clicks": "10", "Conversions": "1"}])))
        .unwrap();

    let report = analyze(&space);
    assert!(report.campaigns.is_none());
    assert!(report.ad_sets.is_none());
    assert_eq!(report.ads.unwrap().conversion_rate.to_string(), "10.00");
}

#[test]
fn halfway_totals_and_averages_round_up() {
    let campaigns = records(json!([{
        "Budget Spent (€)": "0.125",
        "CTR (%)": "1.125"
    }]));
    let value = serde_json::to_value(analyze_collections(&campaigns, &[], &[])).unwrap();
    assert_eq!(value["campaigns"]["totalBudget"], json!("0.13"));
    assert_eq!(value["campaigns"]["averageCTR"], json!("1.13"));
}
