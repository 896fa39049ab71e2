use crate::error::{PopulatorError, PopulatorResult};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

// ── Case-study target constants ────────────────────────────────────

/// Baseline phishing click rate (%) the generated population reports.
pub const PHISH_CLICK_RATE_TARGET: f64 = 23.1;
/// Baseline vishing response rate (%).
pub const VISHING_RESPONSE_RATE_TARGET: f64 = 25.5;
/// Baseline quishing scan rate (%).
pub const QUISHING_SCAN_RATE_TARGET: f64 = 24.0;
/// Mean red-team physical security score (0-10).
pub const PHYSICAL_SCORE_TARGET: f64 = 7.5;
/// Mean red-team human security score (0-10).
pub const HUMAN_SCORE_TARGET: f64 = 8.0;

/// Allowed distance between a realised rate mean and its target, in
/// percentage points.
pub const RATE_TOLERANCE_PP: f64 = 1.0;
/// Allowed distance between a realised score mean and its target.
pub const SCORE_TOLERANCE: f64 = 0.5;

/// A numeric field sampled around a fixed mean.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RateTarget {
    pub mean: f64,
    /// Half-width of the jitter window around `mean`.
    pub spread: f64,
    /// Largest acceptable distance between realised mean and `mean`.
    pub tolerance: f64,
    /// Decimal places kept on every sampled value.
    pub decimals: u32,
    pub min: f64,
    pub max: f64,
}

impl RateTarget {
    pub const fn percentage(mean: f64) -> Self {
        Self { mean, spread: 0.8, tolerance: RATE_TOLERANCE_PP, decimals: 2, min: 0.0, max: 100.0 }
    }

    pub const fn score(mean: f64) -> Self {
        Self { mean, spread: 0.4, tolerance: SCORE_TOLERANCE, decimals: 1, min: 0.0, max: 10.0 }
    }

    /// Worst-case rounding error of a single sampled value.
    pub fn rounding_slack(&self) -> f64 {
        0.5 * 10f64.powi(-(self.decimals as i32))
    }

    pub fn validate(&self, field: &str) -> PopulatorResult<()> {
        if !(self.spread >= 0.0 && self.tolerance > 0.0) {
            return Err(PopulatorError::Config(format!(
                "{field}: spread and tolerance must be positive"
            )));
        }
        if self.spread + self.rounding_slack() > self.tolerance {
            return Err(PopulatorError::Config(format!(
                "{field}: spread {} plus rounding {} exceeds tolerance {}",
                self.spread,
                self.rounding_slack(),
                self.tolerance
            )));
        }
        if self.mean - self.spread < self.min || self.mean + self.spread > self.max {
            return Err(PopulatorError::Config(format!(
                "{field}: {}±{} leaves bounds [{}, {}]",
                self.mean, self.spread, self.min, self.max
            )));
        }
        Ok(())
    }

    /// True when `observed` lies within tolerance of the target mean.
    pub fn accepts(&self, observed: f64) -> bool {
        (observed - self.mean).abs() <= self.tolerance
    }
}

/// Partial override of one `RateTarget`. Absent fields keep the value of
/// the target it is applied to.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RateTargetOverride {
    mean: Option<f64>,
    spread: Option<f64>,
    tolerance: Option<f64>,
    decimals: Option<u32>,
    min: Option<f64>,
    max: Option<f64>,
}

impl RateTargetOverride {
    fn apply(self, base: RateTarget) -> RateTarget {
        RateTarget {
            mean: self.mean.unwrap_or(base.mean),
            spread: self.spread.unwrap_or(base.spread),
            tolerance: self.tolerance.unwrap_or(base.tolerance),
            decimals: self.decimals.unwrap_or(base.decimals),
            min: self.min.unwrap_or(base.min),
            max: self.max.unwrap_or(base.max),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RateTargetsOverride {
    phish_click_rate: RateTargetOverride,
    vishing_response_rate: RateTargetOverride,
    quishing_scan_rate: RateTargetOverride,
    physical_security_score: RateTargetOverride,
    human_security_score: RateTargetOverride,
}

impl RateTargetsOverride {
    fn apply(self, base: RateTargets) -> RateTargets {
        RateTargets {
            phish_click_rate: self.phish_click_rate.apply(base.phish_click_rate),
            vishing_response_rate: self.vishing_response_rate.apply(base.vishing_response_rate),
            quishing_scan_rate: self.quishing_scan_rate.apply(base.quishing_scan_rate),
            physical_security_score: self
                .physical_security_score
                .apply(base.physical_security_score),
            human_security_score: self.human_security_score.apply(base.human_security_score),
        }
    }
}

/// Deserialised field by field over the defaults, so a config file may
/// override a single key of a single target.
#[derive(Debug, Clone, Serialize)]
pub struct RateTargets {
    pub phish_click_rate: RateTarget,
    pub vishing_response_rate: RateTarget,
    pub quishing_scan_rate: RateTarget,
    pub physical_security_score: RateTarget,
    pub human_security_score: RateTarget,
}

impl<'de> Deserialize<'de> for RateTargets {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RateTargetsOverride::deserialize(deserializer).map(|o| o.apply(RateTargets::default()))
    }
}

impl Default for RateTargets {
    fn default() -> Self {
        Self {
            phish_click_rate: RateTarget::percentage(PHISH_CLICK_RATE_TARGET),
            vishing_response_rate: RateTarget::percentage(VISHING_RESPONSE_RATE_TARGET),
            quishing_scan_rate: RateTarget::percentage(QUISHING_SCAN_RATE_TARGET),
            physical_security_score: RateTarget::score(PHYSICAL_SCORE_TARGET),
            human_security_score: RateTarget::score(HUMAN_SCORE_TARGET),
        }
    }
}

/// Weighted average used for `overall_assessment_score`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub physical: f64,
    pub human: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self { physical: 0.5, human: 0.5 }
    }
}

impl ScoreWeights {
    pub fn combine(&self, physical: f64, human: f64) -> f64 {
        physical * self.physical + human * self.human
    }
}

/// How many red-team assessments a run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedTeamCardinality {
    /// One assessment per employee.
    #[default]
    PerEmployee,
    /// One assessment per distinct branch, against its first employee.
    PerBranch,
}

/// Fixed outcomes of the case study that do not depend on the
/// generated population.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaseStudyOutcome {
    pub baseline_reporting_rate: f64,
    pub post_intervention_click_rate: f64,
    pub post_intervention_reporting_rate: f64,
    pub usb_incidents: u32,
    pub engagement_cost: f64,
    pub avoided_fraud_amount: f64,
    pub currency: String,
}

impl Default for CaseStudyOutcome {
    fn default() -> Self {
        Self {
            baseline_reporting_rate: 0.0,
            post_intervention_click_rate: 5.0,
            post_intervention_reporting_rate: 38.0,
            usb_incidents: 11,
            engagement_cost: 48_666_666.67,
            avoided_fraud_amount: 730_000_000.00,
            currency: "INR".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulatorConfig {
    pub targets: RateTargets,
    pub overall_score_weights: ScoreWeights,
    pub red_team_cardinality: RedTeamCardinality,
    pub organisation_name: String,
    pub email_domain: String,
    pub case_study: CaseStudyOutcome,
}

impl Default for PopulatorConfig {
    fn default() -> Self {
        Self {
            targets: RateTargets::default(),
            overall_score_weights: ScoreWeights::default(),
            red_team_cardinality: RedTeamCardinality::PerEmployee,
            organisation_name: "FISST Academy".into(),
            email_domain: "fisstacademy.com".into(),
            case_study: CaseStudyOutcome::default(),
        }
    }
}

impl PopulatorConfig {
    /// Load overrides from a JSON file. Missing keys keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> PopulatorResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            PopulatorError::Config(format!("Cannot read {}: {e}", path.display()))
        })?;
        let config: PopulatorConfig = serde_json::from_str(&content)?;
        config.validate()?;
        log::info!("loaded populator config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> PopulatorResult<()> {
        let t = &self.targets;
        t.phish_click_rate.validate("phish_click_rate")?;
        t.vishing_response_rate.validate("vishing_response_rate")?;
        t.quishing_scan_rate.validate("quishing_scan_rate")?;
        t.physical_security_score.validate("physical_security_score")?;
        t.human_security_score.validate("human_security_score")?;

        let w = self.overall_score_weights;
        if w.physical < 0.0 || w.human < 0.0 || ((w.physical + w.human) - 1.0).abs() > 1e-9 {
            return Err(PopulatorError::Config(format!(
                "overall_score_weights must be non-negative and sum to 1 (got {} + {})",
                w.physical, w.human
            )));
        }
        if self.case_study.engagement_cost <= 0.0 {
            return Err(PopulatorError::Config(
                "case_study.engagement_cost must be positive".into(),
            ));
        }
        if self.email_domain.trim().is_empty() {
            return Err(PopulatorError::Config("email_domain must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        PopulatorConfig::default().validate().unwrap();
    }

    #[test]
    fn spread_wider_than_tolerance_is_rejected() {
        let mut config = PopulatorConfig::default();
        config.targets.phish_click_rate.spread = 1.5;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("phish_click_rate"), "{err}");
    }

    #[test]
    fn weights_must_sum_to_one() {
        let mut config = PopulatorConfig::default();
        config.overall_score_weights = ScoreWeights { physical: 0.7, human: 0.7 };
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: PopulatorConfig =
            serde_json::from_str(r#"{ "red_team_cardinality": "per_branch" }"#).unwrap();
        assert_eq!(config.red_team_cardinality, RedTeamCardinality::PerBranch);
        assert_eq!(config.targets.phish_click_rate.mean, PHISH_CLICK_RATE_TARGET);
        assert_eq!(config.case_study.usb_incidents, 11);
    }

    #[test]
    fn nested_overrides_keep_sibling_defaults() {
        let config: PopulatorConfig =
            serde_json::from_str(r#"{ "case_study": { "usb_incidents": 5 } }"#).unwrap();
        assert_eq!(config.case_study.usb_incidents, 5);
        assert_eq!(config.case_study.post_intervention_click_rate, 5.0);
        assert_eq!(config.case_study.currency, "INR");

        let config: PopulatorConfig = serde_json::from_str(
            r#"{ "targets": { "phish_click_rate": { "mean": 30.0 } } }"#,
        )
        .unwrap();
        let phish = config.targets.phish_click_rate;
        assert_eq!(phish.mean, 30.0);
        assert_eq!(phish, RateTarget { mean: 30.0, ..RateTarget::percentage(0.0) });
        assert_eq!(config.targets.vishing_response_rate.mean, VISHING_RESPONSE_RATE_TARGET);
        assert_eq!(config.targets.human_security_score, RateTarget::score(HUMAN_SCORE_TARGET));
        config.validate().unwrap();
    }

    #[test]
    fn misspelled_target_key_is_rejected() {
        let parsed = serde_json::from_str::<PopulatorConfig>(
            r#"{ "targets": { "phish_click_rate": { "meen": 30.0 } } }"#,
        );
        assert!(parsed.is_err());
    }
}
