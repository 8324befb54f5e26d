//! Plain-text rendering of a mission result.

use deconflict_core::MissionResult;

pub fn format_report(result: &MissionResult) -> String {
    let mut out = format!("MISSION STATUS: {}\n", result.status);
    for conflict in result.conflicts() {
        let (x, y, z) = conflict.location;
        out.push_str(&format!(
            "  t={:.2}s at ({:.2}, {:.2}, {:.2}) with {}: distance {:.2}\n",
            conflict.time, x, y, z, conflict.with_id, conflict.distance
        ));
    }
    out
}
