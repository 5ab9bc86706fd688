//! Fan-out of one command to many strips.

use std::time::Duration;

use futures::future::join_all;
use log::{debug, warn};

use crate::catalog::{self, CatalogEntry, CatalogListing, CatalogSource};
use crate::client::WledApi;
use crate::errors::Error;
use crate::intent::WledIntent;
use crate::payload::{SegmentPatch, StatePatch};
use crate::registry::Device;
use crate::response::FanOutResult;
use crate::runtime;
use crate::status::{DeviceInfo, DeviceState};
use crate::types::{PowerMode, Speed};

/// One step of the demo sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoStep {
    pub name: &'static str,
    pub effect: u16,
    pub palette: u16,
}

/// Effects cycled by [`FanOut::demo`].
pub const DEMO_STEPS: [DemoStep; 5] = [
    DemoStep { name: "Rainbow", effect: 9, palette: 5 },
    DemoStep { name: "Fire", effect: 66, palette: 35 },
    DemoStep { name: "Aurora", effect: 113, palette: 48 },
    DemoStep { name: "Pacifica", effect: 101, palette: 7 },
    DemoStep { name: "Meteor", effect: 94, palette: 1 },
];

/// Status of one strip, or why it could not be read.
#[derive(Debug)]
pub struct StripStatus {
    pub device: Device,
    pub report: Result<(DeviceInfo, DeviceState), Error>,
}

/// Sends commands to a set of strips concurrently.
///
/// Every submission owns its own request and timeout. A device that fails
/// is recorded in its [`FanOutResult`] and never affects the others; results
/// always come back in target order.
#[derive(Debug, Clone)]
pub struct FanOut<C> {
    client: C,
}

impl<C: WledApi> FanOut<C> {
    pub fn new(client: C) -> Self {
        FanOut { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Apply a scene intent to every target, optionally on one segment.
    pub async fn apply(
        &self,
        intent: &WledIntent,
        targets: &[Device],
        segment: Option<u16>,
    ) -> Vec<FanOutResult> {
        let patch = intent.to_patch(segment);
        self.send(&patch, targets).await
    }

    /// Switch every target on or off.
    pub async fn power_all(&self, targets: &[Device], on: bool) -> Vec<FanOutResult> {
        self.send(&StatePatch::from(&PowerMode::from(on)), targets).await
    }

    /// Submit the same patch to every target.
    pub async fn send(&self, patch: &StatePatch, targets: &[Device]) -> Vec<FanOutResult> {
        let submissions = targets.iter().map(|device| async move {
            let result = self.client.set_state(device, patch).await;
            if let Err(e) = &result {
                warn!("{}: {e}", device.id());
            }
            FanOutResult::from_result(device, result)
        });
        join_all(submissions).await
    }

    /// Read info and state from every target.
    pub async fn status(&self, targets: &[Device]) -> Vec<StripStatus> {
        let reads = targets.iter().map(|device| async move {
            let (info, state) = futures::join!(
                self.client.get_info(device),
                self.client.get_state(device)
            );
            StripStatus {
                device: device.clone(),
                report: info.and_then(|info| state.map(|state| (info, state))),
            }
        });
        join_all(reads).await
    }

    /// Effects as reported by `device`, or the built-in table if it is
    /// unreachable.
    pub async fn effect_catalog(&self, device: &Device) -> CatalogListing {
        let live = self.client.effects(device).await;
        listing(device, live, catalog::effects)
    }

    /// Palettes as reported by `device`, or the built-in table if it is
    /// unreachable.
    pub async fn palette_catalog(&self, device: &Device) -> CatalogListing {
        let live = self.client.palettes(device).await;
        listing(device, live, catalog::palettes)
    }

    /// Cycle through [`DEMO_STEPS`], holding each for `dwell`.
    ///
    /// `observe` is called after each step with that step's results.
    pub async fn demo<F>(&self, targets: &[Device], dwell: Duration, mut observe: F)
    where
        F: FnMut(&DemoStep, &[FanOutResult]),
    {
        for (idx, step) in DEMO_STEPS.iter().enumerate() {
            let mut seg = SegmentPatch::new();
            seg.effect(step.effect);
            seg.palette(step.palette);
            seg.speed(&Speed::new());
            seg.intensity(&Speed::new());

            let mut patch = StatePatch::from(&PowerMode::On);
            patch.segment(None, seg);

            let results = self.send(&patch, targets).await;
            observe(step, &results);
            if idx + 1 < DEMO_STEPS.len() {
                runtime::sleep(dwell).await;
            }
        }
    }
}

fn listing<I>(
    device: &Device,
    live: Result<Vec<CatalogEntry>, Error>,
    builtin: fn() -> I,
) -> CatalogListing
where
    I: Iterator<Item = CatalogEntry>,
{
    match live {
        Ok(entries) if !entries.is_empty() => CatalogListing {
            source: CatalogSource::Device,
            entries,
        },
        Ok(_) => {
            debug!("{} reported an empty catalog", device.id());
            CatalogListing {
                source: CatalogSource::Builtin,
                entries: builtin().collect(),
            }
        }
        Err(e) => {
            warn!("falling back to built-in catalog: {e}");
            CatalogListing {
                source: CatalogSource::Builtin,
                entries: builtin().collect(),
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    /// How a fake strip answers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Behaviour {
        Online,
        Offline,
        Broken,
    }

    /// In-memory [`WledApi`] recording every patch it receives.
    #[derive(Debug, Default)]
    pub struct FakeStrips {
        behaviour: HashMap<String, Behaviour>,
        sent: Mutex<Vec<(String, StatePatch)>>,
    }

    impl FakeStrips {
        pub fn with(mut self, id: &str, behaviour: Behaviour) -> Self {
            self.behaviour.insert(id.to_string(), behaviour);
            self
        }

        pub fn sent(&self) -> Vec<(String, StatePatch)> {
            self.sent.lock().unwrap().clone()
        }

        fn answer(&self, device: &Device) -> Result<(), Error> {
            match self.behaviour.get(device.id()).copied().unwrap_or(Behaviour::Online) {
                Behaviour::Online => Ok(()),
                Behaviour::Offline => Err(Error::unreachable(device.id(), "connection refused")),
                Behaviour::Broken => {
                    Err(Error::device(device.id(), "HTTP 500 Internal Server Error"))
                }
            }
        }
    }

    impl WledApi for FakeStrips {
        async fn set_state(&self, device: &Device, patch: &StatePatch) -> Result<(), Error> {
            self.sent
                .lock()
                .unwrap()
                .push((device.id().to_string(), patch.clone()));
            self.answer(device)
        }

        async fn get_state(&self, device: &Device) -> Result<DeviceState, Error> {
            self.answer(device).map(|()| DeviceState {
                on: true,
                bri: 99,
                ..DeviceState::default()
            })
        }

        async fn get_info(&self, device: &Device) -> Result<DeviceInfo, Error> {
            self.answer(device).map(|()| DeviceInfo {
                name: device.name().to_string(),
                ..DeviceInfo::default()
            })
        }

        async fn effects(&self, device: &Device) -> Result<Vec<CatalogEntry>, Error> {
            self.answer(device)
                .map(|()| vec![CatalogEntry::new(0, "Solid"), CatalogEntry::new(2, "Breathe")])
        }

        async fn palettes(&self, device: &Device) -> Result<Vec<CatalogEntry>, Error> {
            self.answer(device).map(|()| Vec::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fake::{Behaviour, FakeStrips};
    use super::*;
    use crate::response::Outcome;

    fn strips(n: usize) -> Vec<Device> {
        (0..n)
            .map(|i| Device::new(&format!("s{i}"), &format!("WLED-S{i}"), "10.0.0.1", 60))
            .collect()
    }

    #[tokio::test]
    async fn test_isolate_a_single_offline_device() {
        let targets = strips(5);
        for k in 0..targets.len() {
            let strips = FakeStrips::default().with(&format!("s{k}"), Behaviour::Offline);
            let fleet = FanOut::new(strips);
            let results = fleet.apply(&WledIntent::new(66), &targets, None).await;

            assert_eq!(results.len(), targets.len());
            for (i, (result, device)) in results.iter().zip(&targets).enumerate() {
                assert_eq!(result.device_id, device.id());
                let expected = if i == k { Outcome::Offline } else { Outcome::Online };
                assert_eq!(result.outcome, expected);
            }
            // every device received the same patch, failing or not
            let sent = fleet.client().sent();
            assert_eq!(sent.len(), targets.len());
            assert!(sent.iter().all(|(_, patch)| patch == &sent[0].1));
        }
    }

    #[tokio::test]
    async fn test_report_errors_separately_from_offline() {
        let targets = strips(3);
        let fleet = FanOut::new(
            FakeStrips::default()
                .with("s0", Behaviour::Broken)
                .with("s2", Behaviour::Offline),
        );
        let results = fleet.power_all(&targets, false).await;
        let outcomes: Vec<_> = results.iter().map(|r| r.outcome).collect();
        assert_eq!(outcomes, [Outcome::Error, Outcome::Online, Outcome::Offline]);
        assert_eq!(results[0].detail.as_deref(), Some("HTTP 500 Internal Server Error"));
        assert_eq!(fleet.client().sent()[1].1, StatePatch::from(&PowerMode::Off));
    }

    #[tokio::test]
    async fn test_return_nothing_for_no_targets() {
        let fleet = FanOut::new(FakeStrips::default());
        assert!(fleet.power_all(&[], true).await.is_empty());
        assert!(fleet.client().sent().is_empty());
    }

    #[tokio::test]
    async fn test_prefer_device_catalog() {
        let targets = strips(1);
        let fleet = FanOut::new(FakeStrips::default());
        let listing = fleet.effect_catalog(&targets[0]).await;
        assert_eq!(listing.source, CatalogSource::Device);
        assert_eq!(listing.entries[1], CatalogEntry::new(2, "Breathe"));

        // empty device list falls back too
        let listing = fleet.palette_catalog(&targets[0]).await;
        assert_eq!(listing.source, CatalogSource::Builtin);
    }

    #[tokio::test]
    async fn test_fall_back_to_builtin_catalog_when_offline() {
        let targets = strips(1);
        let fleet = FanOut::new(FakeStrips::default().with("s0", Behaviour::Offline));
        let listing = fleet.effect_catalog(&targets[0]).await;
        assert_eq!(listing.source, CatalogSource::Builtin);
        assert!(listing.entries.contains(&CatalogEntry::new(66, "fire")));
    }

    #[tokio::test]
    async fn test_report_status_per_device() {
        let targets = strips(2);
        let fleet = FanOut::new(FakeStrips::default().with("s1", Behaviour::Offline));
        let status = fleet.status(&targets).await;
        assert_eq!(status[0].report.as_ref().unwrap().1.bri, 99);
        assert!(matches!(status[1].report, Err(Error::DeviceUnreachable { .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_every_demo_step() {
        let targets = strips(2);
        let fleet = FanOut::new(FakeStrips::default());
        let mut seen = Vec::new();
        fleet
            .demo(&targets, Duration::from_secs(5), |step, results| {
                seen.push((step.effect, results.len()));
            })
            .await;
        assert_eq!(seen, vec![(9, 2), (66, 2), (113, 2), (101, 2), (94, 2)]);
        assert_eq!(fleet.client().sent().len(), 10);
    }
}
