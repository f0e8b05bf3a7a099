//! Writes pending values into the configuration object.

use tracing::trace;

use crate::error::Result;
use crate::model::Configurable;
use crate::resolve::descriptor::Descriptor;

/// Apply and clear every pending value. Fields without one keep their
/// current value.
pub fn commit(target: &mut dyn Configurable, descriptors: &mut [Descriptor<'_>]) -> Result<()> {
    for descriptor in descriptors.iter_mut() {
        if let Some(value) = descriptor.take_pending() {
            trace!("Committing {}", descriptor.name());
            target.apply(descriptor.name(), value)?;
        }
    }
    Ok(())
}
