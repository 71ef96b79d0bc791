//! The one-minute state advance.

use amb_core::{AmbulanceId, DispatchConfig, DurationSampler, Minute, SimRng};
use amb_fleet::{Admission, AmbulanceStatus, EmergencyStatus, Registry};
use tracing::debug;

use crate::{DischargeQueue, EngineEvent};

/// Advances ambulances, emergencies and hospital beds by one minute.
///
/// Holds the duration parameters and the pending discharges; all other state
/// lives in the [`Registry`] passed to [`advance`](Self::advance).
#[derive(Clone, Debug)]
pub struct TransitionEngine {
    sampler:          DurationSampler,
    /// `None` keeps admitted patients in their bed for the rest of the run.
    bed_stay_minutes: Option<u64>,
    discharges:       DischargeQueue,
}

impl TransitionEngine {
    pub fn new(sampler: DurationSampler, bed_stay_minutes: Option<u64>) -> Self {
        Self { sampler, bed_stay_minutes, discharges: DischargeQueue::new() }
    }

    pub fn from_config(config: &DispatchConfig) -> Self {
        Self::new(DurationSampler::from_config(config), config.bed_stay_minutes)
    }

    pub fn sampler(&self) -> &DurationSampler {
        &self.sampler
    }

    pub fn pending_discharges(&self) -> usize {
        self.discharges.len()
    }

    /// Advance every entity through minute `now`.
    ///
    /// Due discharges are processed first, then ambulances in ascending id
    /// order.  That order fixes the sequence of RNG draws, which is what
    /// makes runs reproducible.
    pub fn advance(&mut self, registry: &mut Registry, now: Minute, rng: &mut SimRng) -> Vec<EngineEvent> {
        let end = now.offset(1);
        let mut events = Vec::new();

        for hospital in self.discharges.drain_due(now) {
            registry.discharge_patient(hospital);
            debug!(minute = now.0, %hospital, "bed released");
            events.push(EngineEvent::Discharged { hospital });
        }

        for idx in 0..registry.ambulances.len() {
            let id = registry.ambulances[idx].id;
            match registry.ambulances[idx].status {
                AmbulanceStatus::Idle | AmbulanceStatus::Broken => {}
                AmbulanceStatus::BeingCleaned => self.tick_cleaning(registry, id, &mut events),
                AmbulanceStatus::AtEmergency => self.tick_on_scene(registry, id, end, rng, &mut events),
                AmbulanceStatus::Relocating
                | AmbulanceStatus::EnRouteToEmergency
                | AmbulanceStatus::EnRouteToHospital => {
                    self.tick_moving(registry, id, end, rng, &mut events)
                }
            }
        }

        for event in &events {
            debug!(minute = now.0, ?event, "transition");
        }
        events
    }

    // ── Per-status steps ──────────────────────────────────────────────────

    fn tick_cleaning(&self, registry: &mut Registry, id: AmbulanceId, events: &mut Vec<EngineEvent>) {
        let amb = &mut registry.ambulances[id.index()];
        amb.timer = amb.timer.saturating_sub(1);
        if amb.timer == 0 {
            amb.transition(AmbulanceStatus::Idle);
            events.push(EngineEvent::CleaningDone { ambulance: id });
        }
    }

    fn tick_on_scene(
        &self,
        registry: &mut Registry,
        id:       AmbulanceId,
        end:      Minute,
        rng:      &mut SimRng,
        events:   &mut Vec<EngineEvent>,
    ) {
        let amb = &mut registry.ambulances[id.index()];
        // Patient already on board: waiting for a SendToHospital decision.
        if amb.patient.is_some() {
            return;
        }
        let Some(emergency) = amb.assigned_emergency else {
            return;
        };
        amb.timer = amb.timer.saturating_sub(1);
        if amb.timer > 0 {
            return;
        }

        let needed = self.sampler.transport_needed(rng);
        if needed {
            amb.patient = Some(emergency);
            events.push(EngineEvent::PatientOnboard { ambulance: id, emergency });
        } else {
            amb.assigned_emergency = None;
            amb.transition(AmbulanceStatus::Idle);
            events.push(EngineEvent::ResolvedOnScene { ambulance: id, emergency });
        }

        if let Some(e) = registry.emergencies.get_mut(emergency.index()) {
            e.needs_transport = Some(needed);
            if !needed {
                e.advance(EmergencyStatus::ResolvedNoTransport);
                e.resolved_at = Some(end);
            }
        }
    }

    fn tick_moving(
        &mut self,
        registry: &mut Registry,
        id:       AmbulanceId,
        end:      Minute,
        rng:      &mut SimRng,
        events:   &mut Vec<EngineEvent>,
    ) {
        let amb = &mut registry.ambulances[id.index()];
        if let Some(trip) = amb.trip.as_mut() {
            if trip.remaining_minutes() > 0 {
                if self.sampler.delayed(rng) {
                    events.push(EngineEvent::Delayed { ambulance: id });
                    return;
                }
                trip.advance();
                amb.position = trip.position();
                if !trip.is_complete() {
                    return;
                }
            }
        }
        self.arrive(registry, id, end, rng, events);
    }

    fn arrive(
        &mut self,
        registry: &mut Registry,
        id:       AmbulanceId,
        end:      Minute,
        rng:      &mut SimRng,
        events:   &mut Vec<EngineEvent>,
    ) {
        let amb = &mut registry.ambulances[id.index()];
        if let Some(trip) = amb.trip.take() {
            amb.position = trip.destination;
        }

        let status = amb.status;
        match status {
            AmbulanceStatus::Relocating => {
                amb.transition(AmbulanceStatus::Idle);
                events.push(EngineEvent::RelocationDone { ambulance: id });
            }

            AmbulanceStatus::EnRouteToEmergency => {
                let dwell = self.sampler.dwell_minutes(rng);
                amb.transition(AmbulanceStatus::AtEmergency);
                amb.timer = dwell;
                let Some(emergency) = amb.assigned_emergency else {
                    return;
                };
                if let Some(e) = registry.emergencies.get_mut(emergency.index()) {
                    e.advance(EmergencyStatus::BeingServed);
                    e.ambulance_arrival = Some(end);
                }
                events.push(EngineEvent::ArrivedAtEmergency { ambulance: id, emergency, dwell });
            }

            AmbulanceStatus::EnRouteToHospital => {
                let cleaning = self.sampler.cleaning_minutes(rng);
                amb.transition(AmbulanceStatus::BeingCleaned);
                amb.timer = cleaning;
                let patient = amb.patient.take();

                let admitted = registry.admit_patient(id);
                if let Some(e) = patient.and_then(|p| registry.emergencies.get_mut(p.index())) {
                    e.advance(EmergencyStatus::ResolvedTransported);
                    e.hospital_arrival = Some(end);
                    e.resolved_at = Some(end);
                }

                if let Some((hospital, admission)) = admitted {
                    if let (Admission::Bed, Some(stay)) = (admission, self.bed_stay_minutes) {
                        self.discharges.schedule(end.offset(stay), hospital);
                    }
                    if let Some(emergency) = patient {
                        events.push(EngineEvent::ArrivedAtHospital {
                            ambulance: id,
                            emergency,
                            hospital,
                            admission,
                            cleaning,
                        });
                    }
                }
            }

            _ => {}
        }
    }
}
