//! Aggregate rates and scores stay on target whatever the record count.

use chrono::NaiveDate;
use populator_core::{
    config::{PopulatorConfig, RedTeamCardinality},
    generator::{Dataset, RecordGenerator},
    statistics::compute_summary_statistics,
};

fn generate(config: &PopulatorConfig, seed: u64, count: usize) -> Dataset {
    let reference = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
    RecordGenerator::new(config.clone(), seed, reference).generate_dataset(count)
}

#[test]
fn rate_means_hold_across_counts() {
    let config = PopulatorConfig::default();
    for count in [10usize, 100, 1000] {
        for seed in [1u64, 42, 9_999] {
            let summary = compute_summary_statistics(&generate(&config, seed, count), &config);
            for (label, rate) in [
                ("phish", summary.phish_click_rate),
                ("vishing", summary.vishing_response_rate),
                ("quishing", summary.quishing_scan_rate),
            ] {
                assert_eq!(rate.count, count);
                assert!(
                    (rate.mean - rate.target).abs() <= 1.0,
                    "{label} mean {} vs target {} (count {count}, seed {seed})",
                    rate.mean,
                    rate.target
                );
                assert!(rate.within_tolerance, "{label} flagged out of tolerance");
            }
            assert!((summary.mean_physical_score - 7.5).abs() <= 0.5, "physical {}", summary.mean_physical_score);
            assert!((summary.mean_human_score - 8.0).abs() <= 0.5, "human {}", summary.mean_human_score);
        }
    }
}

#[test]
fn odd_counts_stay_on_target() {
    let config = PopulatorConfig::default();
    for count in [1usize, 3, 11, 99] {
        let summary = compute_summary_statistics(&generate(&config, 5, count), &config);
        assert!(
            (summary.phish_click_rate.mean - 23.1).abs() <= 1.0,
            "count {count}: {}",
            summary.phish_click_rate.mean
        );
    }
}

#[test]
fn empty_run_has_a_summary() {
    let config = PopulatorConfig::default();
    let summary = compute_summary_statistics(&generate(&config, 1, 0), &config);
    assert_eq!(summary.employees, 0);
    assert_eq!(summary.red_team_assessments, 0);
    assert_eq!(summary.phish_click_rate.mean, 0.0);
    assert!(summary.mean_overall_score.is_finite());
    assert_eq!(summary.case_study.roi_multiple, 15.0);
}

#[test]
fn incident_counts_follow_alternation() {
    let config = PopulatorConfig::default();
    let summary = compute_summary_statistics(&generate(&config, 3, 10), &config);
    assert_eq!(summary.incidents.malicious_qr_clicks, 5);
    assert_eq!(summary.incidents.successful_social_engineering, 5);
    assert_eq!(summary.incidents.tailgating_opportunities, 5);
    assert_eq!(summary.incidents.usb_incidents, 11);
}

#[test]
fn per_branch_assessments_cover_each_branch_once() {
    let config = PopulatorConfig {
        red_team_cardinality: RedTeamCardinality::PerBranch,
        ..PopulatorConfig::default()
    };
    let summary = compute_summary_statistics(&generate(&config, 8, 40), &config);
    assert_eq!(summary.red_team_assessments, 8);
    assert_eq!(summary.branch_distribution.len(), 8);
    assert!(summary.branch_distribution.iter().all(|b| b.employees == 5));
}
