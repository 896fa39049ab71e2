//! Aggregate case-study statistics over a generated dataset.

use crate::{
    catalog,
    config::PopulatorConfig,
    generator::{Dataset, SimulationDetail, SimulationRecord},
    sampler::{mean, round_to},
};
use serde::Serialize;

/// Realised distribution of one rate field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RateSummary {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub target: f64,
    pub within_tolerance: bool,
}

impl RateSummary {
    fn from_values(values: &[f64], target: &crate::config::RateTarget) -> Self {
        let m = mean(values);
        let (min, max) = if values.is_empty() {
            (0.0, 0.0)
        } else {
            values.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
        };
        Self {
            count: values.len(),
            mean: m,
            min,
            max,
            target: target.mean,
            // An empty table has no realised mean to judge.
            within_tolerance: values.is_empty() || target.accepts(m),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BranchCount {
    pub branch_code: &'static str,
    pub branch_location: &'static str,
    pub employees: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncidentCounts {
    pub malicious_qr_clicks: usize,
    pub successful_social_engineering: usize,
    pub tailgating_opportunities: usize,
    pub usb_incidents: u32,
}

/// Baseline vs post-intervention outcome and ROI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseStudyReport {
    pub baseline_click_rate: f64,
    pub post_intervention_click_rate: f64,
    /// Percentage points.
    pub click_rate_reduction: f64,
    pub baseline_reporting_rate: f64,
    pub post_intervention_reporting_rate: f64,
    pub engagement_cost: f64,
    pub avoided_fraud_amount: f64,
    /// `avoided_fraud_amount / engagement_cost`.
    pub roi_multiple: f64,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryReport {
    pub employees: usize,
    pub phish_click_rate: RateSummary,
    pub vishing_response_rate: RateSummary,
    pub quishing_scan_rate: RateSummary,
    /// Share of quishing records whose response action was a report, in %.
    pub quishing_reporting_rate: f64,
    pub incidents: IncidentCounts,
    pub red_team_assessments: usize,
    pub mean_physical_score: f64,
    pub mean_human_score: f64,
    pub mean_overall_score: f64,
    /// Largest branch first; ties in branch-list order.
    pub branch_distribution: Vec<BranchCount>,
    pub case_study: CaseStudyReport,
}

fn rates(records: &[SimulationRecord]) -> Vec<f64> {
    records.iter().map(|r| r.response_rate).collect()
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        round_to(part as f64 * 100.0 / whole as f64, 2)
    }
}

pub fn compute_summary_statistics(dataset: &Dataset, config: &PopulatorConfig) -> SummaryReport {
    let targets = &config.targets;
    let phish_click_rate = RateSummary::from_values(&rates(&dataset.phish_smish), &targets.phish_click_rate);
    let vishing_response_rate = RateSummary::from_values(&rates(&dataset.vishing), &targets.vishing_response_rate);
    let quishing_scan_rate = RateSummary::from_values(&rates(&dataset.quishing), &targets.quishing_scan_rate);

    let mut reported = 0;
    let mut malicious_qr_clicks = 0;
    for record in &dataset.quishing {
        if let SimulationDetail::Quishing { response_action, malicious_qr_clicked, .. } = &record.detail {
            if *response_action == catalog::REPORTED_ACTION {
                reported += 1;
            }
            if *malicious_qr_clicked {
                malicious_qr_clicks += 1;
            }
        }
    }

    let red_team = &dataset.red_team;
    let incidents = IncidentCounts {
        malicious_qr_clicks,
        successful_social_engineering: red_team
            .iter()
            .filter(|a| a.controls.social_engineering_successful)
            .count(),
        tailgating_opportunities: red_team.iter().filter(|a| a.controls.tailgating_possible).count(),
        usb_incidents: config.case_study.usb_incidents,
    };

    let physical: Vec<f64> = red_team.iter().map(|a| a.physical_security_score).collect();
    let human: Vec<f64> = red_team.iter().map(|a| a.human_security_score).collect();
    let overall: Vec<f64> = red_team.iter().map(|a| a.overall_assessment_score).collect();

    let mut branch_distribution: Vec<BranchCount> = catalog::BRANCHES
        .iter()
        .map(|b| BranchCount {
            branch_code: b.code,
            branch_location: b.location,
            employees: dataset.employees.iter().filter(|e| e.branch.code == b.code).count(),
        })
        .filter(|b| b.employees > 0)
        .collect();
    // Stable sort keeps branch-list order among equal counts.
    branch_distribution.sort_by(|a, b| b.employees.cmp(&a.employees));

    let outcome = &config.case_study;
    let baseline_click_rate = round_to(phish_click_rate.mean, 2);
    let case_study = CaseStudyReport {
        baseline_click_rate,
        post_intervention_click_rate: outcome.post_intervention_click_rate,
        click_rate_reduction: round_to(baseline_click_rate - outcome.post_intervention_click_rate, 2),
        baseline_reporting_rate: outcome.baseline_reporting_rate,
        post_intervention_reporting_rate: outcome.post_intervention_reporting_rate,
        engagement_cost: outcome.engagement_cost,
        avoided_fraud_amount: outcome.avoided_fraud_amount,
        roi_multiple: if outcome.engagement_cost > 0.0 {
            round_to(outcome.avoided_fraud_amount / outcome.engagement_cost, 1)
        } else {
            0.0
        },
        currency: outcome.currency.clone(),
    };

    SummaryReport {
        employees: dataset.employees.len(),
        phish_click_rate,
        vishing_response_rate,
        quishing_scan_rate,
        quishing_reporting_rate: percentage(reported, dataset.quishing.len()),
        incidents,
        red_team_assessments: red_team.len(),
        mean_physical_score: round_to(mean(&physical), 2),
        mean_human_score: round_to(mean(&human), 2),
        mean_overall_score: round_to(mean(&overall), 2),
        branch_distribution,
        case_study,
    }
}
