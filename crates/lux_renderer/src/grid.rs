//! Uniform grid acceleration structure.
//!
//! Space around the contained objects is cut into `nx * ny * nz` equal cells.
//! Each cell lists every object whose bounding box overlaps it, and rays walk
//! the cells front to back (Amanatides-Woo 3D-DDA), stopping at the first cell
//! that yields a hit inside its own bounds.

use crate::{nearest_hit, Compound, Hit, Material, Renderable};
use lux_math::{Aabb, Ray, Vec3, HIT_EPSILON, HUGE_VALUE};
use std::sync::Arc;

/// Contents of one grid cell.
enum Cell {
    Empty,
    Single(Arc<dyn Renderable>),
    Many(Compound),
}

impl Cell {
    /// Add an object, promoting the cell to a compound once it is shared.
    fn insert(&mut self, object: Arc<dyn Renderable>) {
        *self = match std::mem::replace(self, Cell::Empty) {
            Cell::Empty => Cell::Single(object),
            Cell::Single(first) => Cell::Many([first, object].into_iter().collect()),
            Cell::Many(mut group) => {
                group.add(object);
                Cell::Many(group)
            }
        };
    }

    fn hit(&self, ray: &Ray, t_max: f32) -> Option<Hit<'_>> {
        match self {
            Cell::Empty => None,
            Cell::Single(object) => object.hit(ray, t_max),
            Cell::Many(group) => group.hit(ray, t_max),
        }
    }

    fn shadow_hit(&self, ray: &Ray, t_max: f32) -> bool {
        match self {
            Cell::Empty => false,
            Cell::Single(object) => object.shadow_hit(ray, t_max),
            Cell::Many(group) => group.shadow_hit(ray, t_max),
        }
    }
}

/// A spatial index over a group of renderables.
///
/// Populate it with [`add_object`](Self::add_object), then call
/// [`setup_cells`](Self::setup_cells) once before rendering. Unbounded objects
/// such as planes cannot be binned; they are kept aside and tested linearly.
pub struct UniformGrid {
    objects: Vec<Arc<dyn Renderable>>,
    unbounded: Vec<Arc<dyn Renderable>>,
    cells: Vec<Cell>,
    counts: [usize; 3],
    bbox: Aabb,
    multiplier: f32,
    material: Option<Arc<dyn Material>>,
    built: bool,
}

impl UniformGrid {
    /// Create an empty grid with the default cell density.
    pub fn new() -> Self {
        Self::with_multiplier(2.0)
    }

    /// Create an empty grid. `multiplier` scales the cell count per axis;
    /// 2.0 gives roughly eight cells per object.
    pub fn with_multiplier(multiplier: f32) -> Self {
        Self {
            objects: Vec::new(),
            unbounded: Vec::new(),
            cells: Vec::new(),
            counts: [0; 3],
            bbox: Aabb::EMPTY,
            multiplier,
            material: None,
            built: false,
        }
    }

    /// Build a grid over `objects` in one go.
    pub fn from_objects<I>(objects: I, multiplier: f32) -> Self
    where
        I: IntoIterator<Item = Arc<dyn Renderable>>,
    {
        let mut grid = Self::with_multiplier(multiplier);
        for object in objects {
            grid.add_object(object);
        }
        grid.setup_cells();
        grid
    }

    /// Add an object. The grid must be (re)built before it is queried.
    pub fn add_object(&mut self, object: Arc<dyn Renderable>) {
        if object.bounding_box().is_finite() {
            self.objects.push(object);
        } else {
            self.unbounded.push(object);
        }
        self.built = false;
    }

    pub fn len(&self) -> usize {
        self.objects.len() + self.unbounded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_built(&self) -> bool {
        self.built
    }

    /// Cells per axis.
    pub fn cell_counts(&self) -> [usize; 3] {
        self.counts
    }

    /// Bin every bounded object into the cells its bounding box overlaps.
    pub fn setup_cells(&mut self) {
        let bounds = self
            .objects
            .iter()
            .fold(Aabb::EMPTY, |acc, object| Aabb::surrounding(&acc, &object.bounding_box()));

        if self.objects.is_empty() {
            log::warn!("Uniform grid has no bounded objects, using a single empty cell");
            self.bbox = Aabb::EMPTY;
            self.counts = [1, 1, 1];
            self.cells = vec![Cell::Empty];
            self.built = true;
            return;
        }

        self.bbox = bounds.pad(HIT_EPSILON);
        self.counts = self.cell_counts_for(self.objects.len());

        let [nx, ny, nz] = self.counts;
        self.cells = std::iter::repeat_with(|| Cell::Empty).take(nx * ny * nz).collect();

        for object in &self.objects {
            let object_box = object.bounding_box().pad(HIT_EPSILON);
            let lo = self.cell_coords(object_box.min());
            let hi = self.cell_coords(object_box.max());

            for iz in lo[2]..=hi[2] {
                for iy in lo[1]..=hi[1] {
                    for ix in lo[0]..=hi[0] {
                        let index = ix + nx * iy + nx * ny * iz;
                        self.cells[index].insert(object.clone());
                    }
                }
            }
        }

        self.built = true;

        let empty = self.cells.iter().filter(|c| matches!(c, Cell::Empty)).count();
        let shared = self.cells.iter().filter(|c| matches!(c, Cell::Many(_))).count();
        log::info!(
            "Uniform grid: {} objects ({} unbounded), {}x{}x{} cells, {} empty, {} shared",
            self.objects.len(),
            self.unbounded.len(),
            nx,
            ny,
            nz,
            empty,
            shared
        );
    }

    /// Shirley's heuristic: cubic cells of side `(V / n)^(1/3)`, scaled by
    /// the multiplier.
    fn cell_counts_for(&self, object_count: usize) -> [usize; 3] {
        let extent = self.bbox.extent();
        let volume = extent.x * extent.y * extent.z;
        let side = (volume / object_count as f32).cbrt();

        if !(side.is_finite() && side > 0.0) {
            return [1, 1, 1];
        }

        let per_axis = |width: f32| (self.multiplier * width / side) as usize + 1;
        [per_axis(extent.x), per_axis(extent.y), per_axis(extent.z)]
    }

    /// Cell coordinates containing `p`, clamped to the lattice.
    fn cell_coords(&self, p: Vec3) -> [usize; 3] {
        let (lo, extent) = (self.bbox.min(), self.bbox.extent());
        let mut coords = [0; 3];
        for axis in 0..3 {
            let n = self.counts[axis];
            let cell = ((p[axis] - lo[axis]) * n as f32 / extent[axis]) as isize;
            coords[axis] = cell.clamp(0, n as isize - 1) as usize;
        }
        coords
    }

    fn walk(&self, ray: &Ray) -> Option<GridWalk> {
        GridWalk::new(self, ray)
    }

    /// Nearest hit among the binned objects.
    fn hit_cells(&self, ray: &Ray, t_max: f32) -> Option<Hit<'_>> {
        let walk = self.walk(ray)?;
        let mut t_enter = walk.t_enter;

        for (index, t_exit) in walk {
            if t_enter >= t_max {
                break;
            }
            // A hit past this cell's far side may be beaten by an object
            // in a later cell, so only accept hits inside the cell
            if let Some(hit) = self.cells[index].hit(ray, t_max) {
                if hit.t < t_exit {
                    return Some(hit);
                }
            }
            t_enter = t_exit;
        }

        None
    }
}

impl Default for UniformGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderable for UniformGrid {
    fn hit(&self, ray: &Ray, t_max: f32) -> Option<Hit<'_>> {
        let binned = if self.built {
            self.hit_cells(ray, t_max)
        } else {
            nearest_hit(&self.objects, ray, t_max)
        };

        let bound = binned.map_or(t_max, |hit| hit.t);
        nearest_hit(&self.unbounded, ray, bound)
            .or(binned)
            .map(|hit| hit.override_material(self.material.as_deref()))
    }

    fn shadow_hit(&self, ray: &Ray, t_max: f32) -> bool {
        if self.unbounded.iter().any(|object| object.shadow_hit(ray, t_max)) {
            return true;
        }

        if !self.built {
            return self.objects.iter().any(|object| object.shadow_hit(ray, t_max));
        }

        let Some(walk) = self.walk(ray) else {
            return false;
        };
        let mut t_enter = walk.t_enter;
        for (index, t_exit) in walk {
            if t_enter >= t_max {
                break;
            }
            if self.cells[index].shadow_hit(ray, t_max) {
                return true;
            }
            t_enter = t_exit;
        }
        false
    }

    fn bounding_box(&self) -> Aabb {
        if !self.unbounded.is_empty() {
            return Aabb::UNIVERSE;
        }
        if self.built {
            self.bbox
        } else {
            self.objects
                .iter()
                .fold(Aabb::EMPTY, |acc, object| Aabb::surrounding(&acc, &object.bounding_box()))
        }
    }

    fn material(&self) -> Option<&Arc<dyn Material>> {
        self.material.as_ref()
    }

    /// Shade every contained object with `material`.
    fn set_material(&mut self, material: Arc<dyn Material>) {
        self.material = Some(material);
    }
}

/// Incremental cell walk along a ray.
///
/// Yields each visited cell index with the ray parameter at which the ray
/// leaves that cell.
struct GridWalk {
    counts: [usize; 3],
    cell: [isize; 3],
    step: [isize; 3],
    stop: [isize; 3],
    next: [f32; 3],
    delta: [f32; 3],
    t_enter: f32,
    done: bool,
}

impl GridWalk {
    fn new(grid: &UniformGrid, ray: &Ray) -> Option<Self> {
        let (lo, hi) = (grid.bbox.min(), grid.bbox.max());

        let mut t_min = [0.0; 3];
        let mut t_max = [0.0; 3];
        for axis in 0..3 {
            let a = 1.0 / ray.direction[axis];
            let near = (lo[axis] - ray.origin[axis]) * a;
            let far = (hi[axis] - ray.origin[axis]) * a;
            (t_min[axis], t_max[axis]) = if a >= 0.0 { (near, far) } else { (far, near) };
        }

        let t0 = t_min[0].max(t_min[1]).max(t_min[2]);
        let t1 = t_max[0].min(t_max[1]).min(t_max[2]);
        if t0 > t1 || t1 < HIT_EPSILON {
            return None;
        }

        let start = if grid.bbox.inside(ray.origin) {
            ray.origin
        } else {
            ray.at(t0)
        };
        let coords = grid.cell_coords(start);

        let mut walk = Self {
            counts: grid.counts,
            cell: coords.map(|c| c as isize),
            step: [-1; 3],
            stop: [-1; 3],
            next: [HUGE_VALUE; 3],
            delta: [0.0; 3],
            t_enter: t0,
            done: false,
        };

        for axis in 0..3 {
            let n = grid.counts[axis];
            let d = ray.direction[axis];
            let delta = (t_max[axis] - t_min[axis]) / n as f32;
            walk.delta[axis] = delta;

            // Zero components keep the HUGE_VALUE sentinel and never advance
            if d > 0.0 {
                walk.next[axis] = t_min[axis] + (coords[axis] + 1) as f32 * delta;
                walk.step[axis] = 1;
                walk.stop[axis] = n as isize;
            } else if d < 0.0 {
                walk.next[axis] = t_min[axis] + (n - coords[axis]) as f32 * delta;
            }
        }

        Some(walk)
    }

    fn index(&self) -> usize {
        let [nx, ny, _] = self.counts;
        let [x, y, z] = self.cell.map(|c| c as usize);
        x + nx * y + nx * ny * z
    }
}

impl Iterator for GridWalk {
    type Item = (usize, f32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let index = self.index();
        let [tx, ty, tz] = self.next;
        let axis = if tx < ty && tx < tz {
            0
        } else if ty < tz {
            1
        } else {
            2
        };

        let t_exit = self.next[axis];
        self.next[axis] += self.delta[axis];
        self.cell[axis] += self.step[axis];
        if self.cell[axis] == self.stop[axis] {
            self.done = true;
        }

        Some((index, t_exit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::matte;
    use crate::{Plane, Sphere, Triangle};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_point(rng: &mut StdRng, extent: f32) -> Vec3 {
        Vec3::new(
            rng.gen_range(-extent..extent),
            rng.gen_range(-extent..extent),
            rng.gen_range(-extent..extent),
        )
    }

    fn random_direction(rng: &mut StdRng) -> Vec3 {
        loop {
            let v = random_point(rng, 1.0);
            if v.length_squared() > 1e-3 && v.length_squared() <= 1.0 {
                return v.normalize();
            }
        }
    }

    fn random_scene(rng: &mut StdRng) -> Vec<Arc<dyn Renderable>> {
        let material = matte(Vec3::splat(0.5));
        let mut objects: Vec<Arc<dyn Renderable>> = Vec::new();

        for _ in 0..40 {
            let center = random_point(rng, 10.0);
            let radius = rng.gen_range(0.2..1.5);
            objects.push(Arc::new(Sphere::new(center, radius, material.clone())));
        }
        for _ in 0..30 {
            let base = random_point(rng, 10.0);
            objects.push(Arc::new(Triangle::new(
                base,
                base + random_point(rng, 2.0),
                base + random_point(rng, 2.0),
                material.clone(),
            )));
        }
        objects
    }

    #[test]
    fn test_grid_matches_linear_scan() {
        let mut rng = StdRng::seed_from_u64(42);
        let objects = random_scene(&mut rng);

        let grid = UniformGrid::from_objects(objects.iter().cloned(), 2.0);
        let linear: Compound = objects.iter().cloned().collect();

        for i in 0..2000 {
            // Half the rays start inside the grid, half well outside it
            let extent = if i % 2 == 0 { 9.0 } else { 30.0 };
            let ray = Ray::new(random_point(&mut rng, extent), random_direction(&mut rng));

            let expected = linear.hit(&ray, f32::INFINITY);
            let got = grid.hit(&ray, f32::INFINITY);
            assert_eq!(got.is_some(), expected.is_some(), "ray {i}");
            if let (Some(got), Some(expected)) = (got, expected) {
                assert!((got.t - expected.t).abs() < 1e-4, "ray {i}: {} vs {}", got.t, expected.t);
            }

            let t_max = rng.gen_range(1.0..40.0);
            assert_eq!(
                grid.shadow_hit(&ray, t_max),
                linear.shadow_hit(&ray, t_max),
                "shadow ray {i}"
            );
        }
    }

    #[test]
    fn test_grid_axis_aligned_rays() {
        let mut rng = StdRng::seed_from_u64(3);
        let objects = random_scene(&mut rng);
        let grid = UniformGrid::from_objects(objects.iter().cloned(), 2.0);
        let linear: Compound = objects.iter().cloned().collect();

        let axes = [Vec3::X, Vec3::NEG_X, Vec3::Y, Vec3::NEG_Y, Vec3::Z, Vec3::NEG_Z];
        for i in 0..300 {
            let ray = Ray::new(random_point(&mut rng, 12.0), axes[i % axes.len()]);
            let expected = linear.hit(&ray, f32::INFINITY).map(|h| h.t);
            let got = grid.hit(&ray, f32::INFINITY).map(|h| h.t);

            match (got, expected) {
                (Some(a), Some(b)) => assert!((a - b).abs() < 1e-4, "ray {i}: {a} vs {b}"),
                (None, None) => {}
                _ => panic!("ray {i}: grid {got:?}, linear {expected:?}"),
            }
        }
    }

    #[test]
    fn test_grid_cell_counts_follow_object_count() {
        let mut rng = StdRng::seed_from_u64(1);
        let grid = UniformGrid::from_objects(random_scene(&mut rng), 2.0);

        let [nx, ny, nz] = grid.cell_counts();
        let cells = nx * ny * nz;
        // Roughly multiplier^3 cells per object
        assert!(cells >= 70 * 4 && cells <= 70 * 20, "{nx}x{ny}x{nz}");
        assert!(grid.is_built());
    }

    #[test]
    fn test_empty_grid_has_one_cell_and_never_hits() {
        let mut grid = UniformGrid::new();
        grid.setup_cells();

        assert_eq!(grid.cell_counts(), [1, 1, 1]);
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert!(grid.hit(&ray, f32::INFINITY).is_none());
        assert!(!grid.shadow_hit(&ray, f32::INFINITY));
    }

    #[test]
    fn test_single_object_grid() {
        let sphere: Arc<dyn Renderable> = Arc::new(Sphere::new(Vec3::ZERO, 1.0, matte(Vec3::ONE)));
        let grid = UniformGrid::from_objects([sphere], 2.0);

        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
        let hit = grid.hit(&ray, f32::INFINITY).unwrap();
        assert!((hit.t - 4.0).abs() < 1e-5);

        // Starting inside the sphere and the grid
        let inside = Ray::new(Vec3::new(0.2, 0.1, 0.0), Vec3::X);
        assert!(grid.hit(&inside, f32::INFINITY).is_some());
    }

    #[test]
    fn test_planes_are_kept_unbounded() {
        let material = matte(Vec3::ONE);
        let objects: Vec<Arc<dyn Renderable>> = vec![
            Arc::new(Sphere::new(Vec3::new(0.0, 1.0, 0.0), 1.0, material.clone())),
            Arc::new(Plane::new(Vec3::new(0.0, -1.0, 0.0), Vec3::Y, material)),
        ];
        let grid = UniformGrid::from_objects(objects, 2.0);

        assert!(!grid.bounding_box().is_finite());

        let at_sphere = Ray::new(Vec3::new(0.0, 10.0, 0.0), Vec3::NEG_Y);
        assert!((grid.hit(&at_sphere, f32::INFINITY).unwrap().t - 8.0).abs() < 1e-5);

        let at_floor = Ray::new(Vec3::new(5.0, 10.0, 0.0), Vec3::NEG_Y);
        assert!((grid.hit(&at_floor, f32::INFINITY).unwrap().t - 11.0).abs() < 1e-5);
        assert!(grid.shadow_hit(&at_floor, 20.0));
    }

    #[test]
    fn test_unbuilt_grid_falls_back_to_scan() {
        let mut grid = UniformGrid::new();
        grid.add_object(Arc::new(Sphere::new(Vec3::ZERO, 1.0, matte(Vec3::ONE))));

        assert!(!grid.is_built());
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
        assert!(grid.hit(&ray, f32::INFINITY).is_some());
    }

    #[test]
    fn test_cell_promotion() {
        let material = matte(Vec3::ONE);
        let mut cell = Cell::Empty;
        for i in 0..3 {
            cell.insert(Arc::new(Sphere::new(Vec3::ZERO, 1.0 + i as f32, material.clone())));
        }
        match cell {
            Cell::Many(group) => assert_eq!(group.len(), 3),
            _ => panic!("cell should hold a compound"),
        }
    }
}
