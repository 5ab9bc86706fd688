//! Safety exclusion policy.
//!
//! Routine operations (scenes, all-on, all-off) only ever see
//! [`routine_targets`]. The single way to address an excluded device is
//! [`emergency_target`], which takes an explicit id and never consults the
//! scene catalog.

use crate::errors::Error;
use crate::registry::{Device, DeviceRegistry};

/// Registry devices minus the exclusion set, in registry order.
///
/// # Example
///
/// ```
/// use lightfleet::{DeviceRegistry, routine_targets};
///
/// let registry = DeviceRegistry::home();
/// let ids: Vec<_> = routine_targets(&registry).iter().map(|d| d.id().to_string()).collect();
/// assert_eq!(ids, ["ap1", "ap2"]);
/// ```
pub fn routine_targets(registry: &DeviceRegistry) -> Vec<Device> {
    registry
        .devices()
        .iter()
        .filter(|device| !registry.is_excluded(device.id()))
        .cloned()
        .collect()
}

/// Resolve a device for an emergency command, bypassing the exclusion set.
pub fn emergency_target<'a>(registry: &'a DeviceRegistry, id: &str) -> Result<&'a Device, Error> {
    registry.resolve(id)
}
