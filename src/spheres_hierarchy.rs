use crate::geometry::sphere_intersects_sphere;
use crate::types::Sphere;

/// One cluster of a hierarchy level: a bounding sphere plus the indices of
/// the children it covers (input spheres at the leaf level, clusters of the
/// level below everywhere else).
#[derive(Debug, Clone)]
struct Cluster {
    bounding: Sphere,
    children: Vec<usize>,
}

/// Multi-level bounding-sphere index over an immutable sphere list.
///
/// Level 0 clusters the input spheres; every further level clusters the
/// bounding spheres of the level below with the cluster radius scaled up,
/// until a level is small enough to scan directly. Construction is a
/// one-time batch operation; the supported pattern for changed input is a
/// rebuild.
pub struct SpheresHierarchy {
    spheres: Vec<Sphere>,
    levels: Vec<Vec<Cluster>>,
}

/// Growth factor for the cluster radius from one level to the next
const LEVEL_RADIUS_SCALE: f64 = 3.5;

impl SpheresHierarchy {
    /// Build the hierarchy.
    ///
    /// `init_radius` is the clustering radius of the leaf level;
    /// `min_level_size` stops level construction once a level holds at most
    /// that many clusters. Empty input yields an empty, queryable hierarchy.
    pub fn new(spheres: Vec<Sphere>, init_radius: f64, min_level_size: usize) -> Self {
        let mut hierarchy = Self {
            spheres,
            levels: Vec::new(),
        };
        if hierarchy.spheres.is_empty() {
            return hierarchy;
        }

        let init_radius = init_radius.max(f64::MIN_POSITIVE);
        let min_level_size = min_level_size.max(1);

        let leaf_bounds: Vec<Sphere> = hierarchy.spheres.clone();
        let mut level = cluster_spheres(&leaf_bounds, init_radius);
        let mut radius = init_radius;

        loop {
            let done = level.len() <= min_level_size;
            hierarchy.levels.push(level);
            if done {
                break;
            }
            radius *= LEVEL_RADIUS_SCALE;
            let bounds: Vec<Sphere> = hierarchy
                .levels
                .last()
                .map(|l| l.iter().map(|c| c.bounding).collect())
                .unwrap_or_default();
            let next = cluster_spheres(&bounds, radius);
            if next.len() >= hierarchy.levels.last().map_or(0, Vec::len) {
                // Clustering stalled; the current top level is final
                break;
            }
            level = next;
        }

        hierarchy
    }

    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }

    /// Find every sphere whose surface overlaps the probe.
    ///
    /// Cluster bounding spheres only prune candidates; each candidate is
    /// re-tested exactly before being returned, so the result carries no
    /// false positives. The returned ids are sorted ascending.
    pub fn find_all_collisions(&self, probe: &Sphere) -> Vec<usize> {
        let mut result = Vec::new();
        self.walk(probe, &mut |id| {
            result.push(id);
            false
        });
        result.sort_unstable();
        result
    }

    /// Early-exit variant: the first colliding sphere whose id is not in
    /// `excluded_ids`, if any.
    pub fn find_any_collision(&self, probe: &Sphere, excluded_ids: &[usize]) -> Option<usize> {
        let mut found = None;
        self.walk(probe, &mut |id| {
            if excluded_ids.contains(&id) {
                false
            } else {
                found = Some(id);
                true
            }
        });
        found
    }

    /// Depth-first descent through intersecting clusters. The visitor gets
    /// each exactly-colliding sphere id and returns true to stop early.
    fn walk(&self, probe: &Sphere, visit: &mut dyn FnMut(usize) -> bool) {
        let Some(top) = self.levels.last() else {
            return;
        };

        // Stack of (level index, cluster index)
        let mut stack: Vec<(usize, usize)> = Vec::with_capacity(64);
        let top_level = self.levels.len() - 1;
        for (ci, cluster) in top.iter().enumerate() {
            if sphere_intersects_sphere(probe, &cluster.bounding) {
                stack.push((top_level, ci));
            }
        }

        while let Some((li, ci)) = stack.pop() {
            let cluster = &self.levels[li][ci];
            if li == 0 {
                for &id in &cluster.children {
                    if sphere_intersects_sphere(probe, &self.spheres[id]) && visit(id) {
                        return;
                    }
                }
            } else {
                for &child in &cluster.children {
                    if sphere_intersects_sphere(probe, &self.levels[li - 1][child].bounding) {
                        stack.push((li - 1, child));
                    }
                }
            }
        }
    }
}

/// Greedy deterministic clustering: each sphere joins the first existing
/// cluster whose seed center lies within `radius`, otherwise seeds a new
/// cluster. Bounding radii cover the full member spheres.
fn cluster_spheres(spheres: &[Sphere], radius: f64) -> Vec<Cluster> {
    let mut clusters: Vec<Cluster> = Vec::new();

    for (i, s) in spheres.iter().enumerate() {
        let mut assigned = false;
        for cluster in &mut clusters {
            let d = (s.center - cluster.bounding.center).norm();
            if d <= radius {
                cluster.bounding.r = cluster.bounding.r.max(d + s.r);
                cluster.children.push(i);
                assigned = true;
                break;
            }
        }
        if !assigned {
            clusters.push(Cluster {
                bounding: Sphere::new(s.center, s.r),
                children: vec![i],
            });
        }
    }

    clusters
}
