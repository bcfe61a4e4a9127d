use crate::angle::AngleConverter;
use crate::error::ProfileError;
use crate::point::{ClickPoint, HorizonPoint};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProfileOrdering {
    // Right of the zero column in click order, then left of it in click order.
    // Not a true sort: out-of-order clicks give non-monotonic azimuths.
    #[default]
    ClickOrder,
    // Stable ascending sort by rounded azimuth
    Ascending,
    // Unrounded azimuths sorted ascending, a zero point prepended when missing
    // and duplicates kept
    SortedExact,
}

impl ProfileOrdering {
    pub const ALL: [ProfileOrdering; 3] = [
        ProfileOrdering::ClickOrder,
        ProfileOrdering::Ascending,
        ProfileOrdering::SortedExact,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ProfileOrdering::ClickOrder => "Click order (right of zero first)",
            ProfileOrdering::Ascending => "Ascending azimuth",
            ProfileOrdering::SortedExact => "Exact azimuths, zero point prepended",
        }
    }
}

/// An azimuth/elevation horizon profile ready to be written out.
///
/// Never empty and the first azimuth is exactly 0. Apart from
/// `SortedExact` profiles, no two neighbouring entries share an azimuth.
#[derive(Debug, Clone, PartialEq)]
pub struct HorizonProfile {
    points: Vec<HorizonPoint>,
}

impl HorizonProfile {
    pub fn points(&self) -> &[HorizonPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HorizonPoint> {
        self.points.iter()
    }
}

impl<'a> IntoIterator for &'a HorizonProfile {
    type Item = &'a HorizonPoint;
    type IntoIter = std::slice::Iter<'a, HorizonPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

pub fn build_profile(
    clicks: &[ClickPoint],
    converter: &AngleConverter,
    ordering: ProfileOrdering,
) -> Result<HorizonProfile, ProfileError> {
    if clicks.is_empty() {
        return Err(ProfileError::NoPoints);
    }

    let points = match ordering {
        ProfileOrdering::ClickOrder => {
            let (right, left): (Vec<&ClickPoint>, Vec<&ClickPoint>) = clicks
                .iter()
                .partition(|click| converter.is_right_of_zero(click.x));
            let points = right
                .into_iter()
                .chain(left)
                .map(|click| converter.convert(*click))
                .collect();
            dedup_and_anchor(points)
        }
        ProfileOrdering::Ascending => {
            let mut points: Vec<HorizonPoint> =
                clicks.iter().map(|click| converter.convert(*click)).collect();
            points.sort_by(|a, b| a.azimuth.total_cmp(&b.azimuth));
            dedup_and_anchor(points)
        }
        ProfileOrdering::SortedExact => {
            let mut points: Vec<HorizonPoint> =
                clicks.iter().map(|click| converter.convert_exact(*click)).collect();
            points.sort_by(|a, b| a.azimuth.total_cmp(&b.azimuth));
            // The first point keeps its azimuth; a zero entry takes its elevation
            if points[0].azimuth != 0.0 {
                points.insert(0, HorizonPoint::new(0.0, points[0].elevation));
            }
            points
        }
    };

    log::debug!(
        "built horizon profile: {} clicks -> {} points ({:?})",
        clicks.len(),
        points.len(),
        ordering
    );

    Ok(HorizonProfile { points })
}

// Keep the first of each run of equal azimuths, then force the first azimuth to 0
fn dedup_and_anchor(mut points: Vec<HorizonPoint>) -> Vec<HorizonPoint> {
    points.dedup_by(|current, kept| current.azimuth == kept.azimuth);

    if let Some(first) = points.first_mut() {
        first.azimuth = 0.0;
    }
    // Forcing the first azimuth can make it equal to the second one
    if points.len() > 1 && points[1].azimuth == 0.0 {
        points.remove(1);
    }
    points
}
