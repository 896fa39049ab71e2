use super::{employee::Employee, RecordGenerator};
use crate::{
    catalog,
    config::RateTarget,
    profile_faker::ProfileFaker,
    rng::StreamSlot,
    round_robin::{alternating, RoundRobin},
    sampler::RateSampler,
    types::{EmployeeId, SimulationKind},
};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

/// One row of a simulation child table. The shared columns live here;
/// channel-specific columns are in `detail`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationRecord {
    pub employee_id: EmployeeId,
    /// Click rate, response rate or scan rate depending on the channel.
    pub response_rate: f64,
    pub last_simulation_date: NaiveDate,
    pub testing_status: &'static str,
    pub detail: SimulationDetail,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SimulationDetail {
    PhishSmish {
        simulation_type: &'static str,
        work_email: String,
        personal_email: String,
        phone_number: String,
    },
    Vishing {
        phone_number: String,
        alt_phone_number: String,
        voice_auth_test: bool,
    },
    Quishing {
        qr_code_type: &'static str,
        qr_code_link: &'static str,
        device_used: &'static str,
        scan_location: &'static str,
        scan_time: NaiveDateTime,
        response_action: &'static str,
        malicious_qr_clicked: bool,
    },
}

impl SimulationRecord {
    pub fn kind(&self) -> SimulationKind {
        match self.detail {
            SimulationDetail::PhishSmish { .. } => SimulationKind::PhishSmish,
            SimulationDetail::Vishing { .. } => SimulationKind::Vishing,
            SimulationDetail::Quishing { .. } => SimulationKind::Quishing,
        }
    }
}

const SIMULATION_WINDOW_DAYS: (i64, i64) = (182, 0);

/// Per-channel categorical counters, fresh for every generation call.
enum ChannelCycles {
    PhishSmish {
        simulation_types: RoundRobin<&'static str>,
    },
    Vishing,
    Quishing {
        qr_code_types: RoundRobin<&'static str>,
        qr_code_links: RoundRobin<&'static str>,
        devices: RoundRobin<&'static str>,
        locations: RoundRobin<&'static str>,
        actions: RoundRobin<&'static str>,
    },
}

impl ChannelCycles {
    fn new(kind: SimulationKind) -> Self {
        match kind {
            SimulationKind::PhishSmish => Self::PhishSmish {
                simulation_types: RoundRobin::new(catalog::PHISH_SIMULATION_TYPES),
            },
            SimulationKind::Vishing => Self::Vishing,
            SimulationKind::Quishing => Self::Quishing {
                qr_code_types: RoundRobin::new(catalog::QR_CODE_TYPES),
                qr_code_links: RoundRobin::new(catalog::QR_CODE_LINKS),
                devices: RoundRobin::new(catalog::DEVICE_TYPES),
                locations: RoundRobin::new(catalog::SCAN_LOCATIONS),
                actions: RoundRobin::new(catalog::RESPONSE_ACTIONS),
            },
        }
    }
}

fn stream_slots(kind: SimulationKind) -> (StreamSlot, StreamSlot) {
    match kind {
        SimulationKind::PhishSmish => (StreamSlot::PhishSmishProfile, StreamSlot::PhishClickRate),
        SimulationKind::Vishing => (StreamSlot::VishingProfile, StreamSlot::VishingResponseRate),
        SimulationKind::Quishing => (StreamSlot::QuishingProfile, StreamSlot::QuishingScanRate),
    }
}

impl RecordGenerator {
    pub fn rate_target(&self, kind: SimulationKind) -> RateTarget {
        let targets = &self.config().targets;
        match kind {
            SimulationKind::PhishSmish => targets.phish_click_rate,
            SimulationKind::Vishing => targets.vishing_response_rate,
            SimulationKind::Quishing => targets.quishing_scan_rate,
        }
    }

    /// Exactly one record of `kind` per employee, in employee order.
    pub fn generate_simulation_records(
        &self,
        employees: &[Employee],
        kind: SimulationKind,
    ) -> Vec<SimulationRecord> {
        let (profile_slot, rate_slot) = stream_slots(kind);
        let mut rng = self.rng_bank().for_stream(profile_slot);
        let mut rates = RateSampler::new(self.rate_target(kind), self.rng_bank().for_stream(rate_slot));
        let mut statuses = RoundRobin::new(catalog::SIMULATION_STATUSES);
        let mut cycles = ChannelCycles::new(kind);
        let reference = self.reference_date();
        let (far, near) = SIMULATION_WINDOW_DAYS;

        let records: Vec<SimulationRecord> = employees
            .iter()
            .enumerate()
            .map(|(i, employee)| {
                let last_simulation_date = ProfileFaker::date_between(&mut rng, reference, far, near);
                let detail = match &mut cycles {
                    ChannelCycles::PhishSmish { simulation_types } => SimulationDetail::PhishSmish {
                        simulation_type: simulation_types.next().unwrap_or_default(),
                        work_email: employee.work_email.clone(),
                        personal_email: employee.personal_email.clone(),
                        phone_number: employee.phone_number.clone(),
                    },
                    ChannelCycles::Vishing => SimulationDetail::Vishing {
                        phone_number: employee.vishing_phone_number.clone(),
                        alt_phone_number: employee.vishing_alt_phone_number.clone(),
                        voice_auth_test: alternating(i),
                    },
                    ChannelCycles::Quishing { qr_code_types, qr_code_links, devices, locations, actions } => {
                        SimulationDetail::Quishing {
                            qr_code_type: qr_code_types.next().unwrap_or_default(),
                            qr_code_link: qr_code_links.next().unwrap_or_default(),
                            device_used: devices.next().unwrap_or_default(),
                            scan_location: locations.next().unwrap_or_default(),
                            scan_time: ProfileFaker::datetime_on(&mut rng, last_simulation_date),
                            response_action: actions.next().unwrap_or_default(),
                            malicious_qr_clicked: alternating(i),
                        }
                    }
                };
                SimulationRecord {
                    employee_id: employee.employee_id,
                    response_rate: rates.sample(),
                    last_simulation_date,
                    testing_status: statuses.next().unwrap_or_default(),
                    detail,
                }
            })
            .collect();

        log::debug!("generated {} {} records", records.len(), kind.name());
        records
    }
}
