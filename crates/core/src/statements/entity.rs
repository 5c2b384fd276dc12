//! Per-entity batch runs.
//!
//! A portfolio batch mixes events for several legal entities. Each entity
//! keeps its own books, so the batch is split by entity and every partition
//! goes through the applier independently on the rayon pool.

use std::collections::BTreeMap;

use hotelbooks_shared::types::{EntityId, RoundingPolicy};
use rayon::prelude::*;
use tracing::info;

use super::applier::EventApplier;
use super::types::StatementOutput;
use crate::ledger::{AccountRegistry, StatementEvent};

/// Groups events by entity, keeping input order within each entity.
#[must_use]
pub fn partition_by_entity(events: &[StatementEvent]) -> BTreeMap<EntityId, Vec<StatementEvent>> {
    let mut partitions: BTreeMap<EntityId, Vec<StatementEvent>> = BTreeMap::new();
    for event in events {
        partitions
            .entry(event.entity_id.clone())
            .or_default()
            .push(event.clone());
    }
    partitions
}

/// Applies each entity's events separately, in parallel.
///
/// The result equals calling [`EventApplier::apply`] on each partition in
/// turn.
#[must_use]
pub fn apply_by_entity(
    events: &[StatementEvent],
    registry: &AccountRegistry,
    rounding: RoundingPolicy,
) -> BTreeMap<EntityId, StatementOutput> {
    let partitions = partition_by_entity(events);
    info!(entities = partitions.len(), events = events.len(), "Applying events by entity");

    partitions
        .into_par_iter()
        .map(|(entity, entity_events)| {
            let output = EventApplier::apply(&entity_events, registry, rounding);
            (entity, output)
        })
        .collect()
}
