//! One-call entry points tying the pipeline together.

use tracing::info;

use crate::error::Result;
use crate::layout::Layout;
use crate::operations::{GenerateIlots, Measure, PlaceIlots, SynthesizeCorridors};
use crate::settings::Settings;
use crate::zones::{ClassifyZones, RawEntity, Zones};

/// Runs generation, placement, corridor synthesis and measurement over
/// already-classified zones.
///
/// The run is a pure function of its inputs: the same zones, settings and
/// seed always produce the same layout.
///
/// # Errors
///
/// Returns `LayoutError::Settings` if the settings fail validation. Nothing
/// is generated or placed in that case.
pub fn run(zones: &Zones, settings: &Settings, seed: u64) -> Result<Layout> {
    settings.validate()?;

    let walkable = zones.walkable_area();
    let requests = GenerateIlots::new(&settings.size_categories, walkable, seed).execute();
    let placement = PlaceIlots::new(zones, settings, &requests).execute();
    let corridors = SynthesizeCorridors::new(&placement.ilots, settings.corridor_width).execute();
    let measurements = Measure::new(zones, &placement.ilots, &corridors).execute();

    info!(
        seed,
        requested = requests.len(),
        placed = placement.ilots.len(),
        corridors = corridors.len(),
        "layout complete"
    );

    Ok(Layout {
        placed_ilots: placement.ilots,
        corridors,
        measurements,
        unplaced: placement.unplaced,
    })
}

/// Classifies raw entities, then calls [`run`].
///
/// # Errors
///
/// Same as [`run`]. Malformed entities are dropped, not reported as errors.
pub fn run_entities(entities: &[RawEntity], settings: &Settings, seed: u64) -> Result<Layout> {
    settings.validate()?;
    let classification = ClassifyZones::new(entities, settings).execute();
    run(&classification.zones, settings, seed)
}
