//! Deterministic random number generation.
//!
//! RULE: Nothing in the generator may call any platform RNG.
//! All randomness flows through StreamRng instances derived
//! from the single master seed of a generation run.
//!
//! Each stream is seeded deterministically from
//! (master_seed XOR slot * golden ratio). This means:
//!   - Adding a new stream never changes existing streams.
//!   - Profile fields and numeric samplers never share a stream, so
//!     tests can check cyclic assignment and sampling separately.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// A named, deterministic RNG for a single stream.
pub struct StreamRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl StreamRng {
    /// Create a stream RNG from the master seed and a stable slot index.
    /// The index must never change once assigned.
    pub fn new(master_seed: u64, slot_index: u64) -> Self {
        let derived_seed = master_seed ^ (slot_index.wrapping_mul(0x9e37_79b9_7f4a_7c15));
        Self {
            name: "unnamed",
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }

    /// Roll an integer in [lo, hi] inclusive.
    pub fn range_inclusive(&mut self, lo: i64, hi: i64) -> i64 {
        assert!(lo <= hi, "empty range {lo}..={hi}");
        let span = (hi - lo) as u64 + 1;
        lo + self.next_u64_below(span) as i64
    }

    /// Roll a float in [lo, hi).
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    /// Pick one element of a non-empty slice.
    pub fn pick<T: Copy>(&mut self, items: &[T]) -> T {
        let index = self.next_u64_below(items.len() as u64) as usize;
        items[index]
    }
}

/// All stream RNGs for a single run, indexed by stable slot.
#[derive(Debug, Clone, Copy)]
pub struct RngBank {
    master_seed: u64,
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    pub fn for_stream(&self, slot: StreamSlot) -> StreamRng {
        log::debug!("seeding stream '{}' (slot {})", slot.name(), slot as u64);
        StreamRng::new(self.master_seed, slot as u64).with_name(slot.name())
    }
}

/// Stable stream slot assignments.
/// NEVER reorder or remove entries, only append.
/// Reordering changes every stream's seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum StreamSlot {
    // Profile streams (names, phones, dates).
    EmployeeProfile = 0,
    PhishSmishProfile = 1,
    VishingProfile = 2,
    QuishingProfile = 3,
    RedTeamProfile = 4,
    // Numeric sampler streams.
    EmployeeClickRate = 5,
    EmployeeVishRate = 6,
    EmployeeQuishRate = 7,
    EmployeePhysicalScore = 8,
    EmployeeHumanScore = 9,
    PhishClickRate = 10,
    VishingResponseRate = 11,
    QuishingScanRate = 12,
    RedTeamPhysicalScore = 13,
    RedTeamHumanScore = 14,
    // Add new streams here, append only.
}

impl StreamSlot {
    pub fn name(&self) -> &'static str {
        match self {
            Self::EmployeeProfile => "employee_profile",
            Self::PhishSmishProfile => "phish_smish_profile",
            Self::VishingProfile => "vishing_profile",
            Self::QuishingProfile => "quishing_profile",
            Self::RedTeamProfile => "red_team_profile",
            Self::EmployeeClickRate => "employee_click_rate",
            Self::EmployeeVishRate => "employee_vish_rate",
            Self::EmployeeQuishRate => "employee_quish_rate",
            Self::EmployeePhysicalScore => "employee_physical_score",
            Self::EmployeeHumanScore => "employee_human_score",
            Self::PhishClickRate => "phish_click_rate",
            Self::VishingResponseRate => "vishing_response_rate",
            Self::QuishingScanRate => "quishing_scan_rate",
            Self::RedTeamPhysicalScore => "red_team_physical_score",
            Self::RedTeamHumanScore => "red_team_human_score",
        }
    }
}
