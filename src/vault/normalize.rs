use crate::vault::model::Arc;

/// Replace raw source arc numbers with a dense 1-based sequence, in input
/// order, and restamp each episode with its owner's final id.
///
/// Raw numbers arrive scaled by ten so fractional arc numbers survive the
/// upstream pipeline without float noise: `65` means arc `6.5`. The scaled
/// value is ceiling-divided back to an integer (`6.5` → 7, `6.0` → 6) and
/// only tracked as provenance to detect when two source numbers land in
/// the same slot; the visible id is always the dense counter.
pub fn normalize_arc_ids(arcs: Vec<Arc>) -> Vec<Arc> {
    if arcs.is_empty() {
        return arcs;
    }

    let mut next_id: u32 = 1;
    let mut last_assigned: u32 = 0;

    let mut out = Vec::with_capacity(arcs.len());
    for mut arc in arcs {
        let mut rounded = arc.arc.div_ceil(10);

        // Colliding provenance values resolve by input order, never by
        // numeric value.
        if rounded <= last_assigned {
            rounded = last_assigned + 1;
        }

        arc.arc = next_id;
        for episode in &mut arc.episodes {
            episode.arc = next_id;
        }

        last_assigned = rounded;
        next_id += 1;
        out.push(arc);
    }

    out
}
