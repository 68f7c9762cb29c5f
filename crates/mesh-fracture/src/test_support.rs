//! Shared fixtures for the unit tests.

use std::collections::{HashMap, VecDeque};

use nalgebra::{Point3, Vector3};

use crate::{FractureRng, MeshFragment, SourceMesh};

/// Axis-aligned cube of side 1 centered on the origin: 8 vertices, 12 outward-facing triangles.
pub fn unit_cube() -> SourceMesh {
    let h = 0.5;
    let vertices = vec![
        Point3::new(-h, -h, -h), // 0: left-bottom-back
        Point3::new(h, -h, -h),  // 1: right-bottom-back
        Point3::new(h, h, -h),   // 2: right-top-back
        Point3::new(-h, h, -h),  // 3: left-top-back
        Point3::new(-h, -h, h),  // 4: left-bottom-front
        Point3::new(h, -h, h),   // 5: right-bottom-front
        Point3::new(h, h, h),    // 6: right-top-front
        Point3::new(-h, h, h),   // 7: left-top-front
    ];

    // Counter-clockwise viewed from outside
    let faces: [[u32; 4]; 6] = [
        [4, 5, 6, 7], // front (+Z)
        [1, 0, 3, 2], // back (-Z)
        [0, 4, 7, 3], // left (-X)
        [5, 1, 2, 6], // right (+X)
        [7, 6, 2, 3], // top (+Y)
        [0, 1, 5, 4], // bottom (-Y)
    ];
    let indices = faces
        .iter()
        .flat_map(|[a, b, c, d]| [*a, *b, *c, *a, *c, *d])
        .collect();

    SourceMesh::new(vertices, vec![], indices)
}

/// Asserts that every directed edge of the fragment is matched by exactly one
/// edge running the other way, after welding positions closer than `1e-4`.
///
/// That holds exactly for a closed, consistently oriented surface.
pub fn assert_closed(fragment: &MeshFragment) {
    let mut welded: Vec<Point3<f32>> = Vec::new();
    let mut weld = |p: Point3<f32>| -> usize {
        match welded.iter().position(|q| (q - p).norm() < 1e-4) {
            Some(i) => i,
            None => {
                welded.push(p);
                welded.len() - 1
            }
        }
    };

    let mut edges: HashMap<(usize, usize), usize> = HashMap::new();
    for tri in fragment.triangles.chunks_exact(3) {
        let ids = [tri[0], tri[1], tri[2]].map(|i| weld(fragment.vertices[i as usize]));
        for k in 0..3 {
            let (a, b) = (ids[k], ids[(k + 1) % 3]);
            if a != b {
                *edges.entry((a, b)).or_default() += 1;
            }
        }
    }

    for (&(a, b), &count) in &edges {
        assert_eq!(count, 1, "edge {a}->{b} used {count} times");
        assert_eq!(
            edges.get(&(b, a)),
            Some(&1),
            "edge {a}->{b} has no opposite edge"
        );
    }
}

/// Replays fixed values; sticks to the last value once a queue runs dry.
#[derive(Debug, Default)]
pub struct ScriptedRng {
    pub floats: VecDeque<f32>,
    pub directions: VecDeque<Vector3<f32>>,
    pub offsets: VecDeque<Vector3<f32>>,
}

impl ScriptedRng {
    pub fn new(float: f32, direction: Vector3<f32>, offset: Vector3<f32>) -> Self {
        Self {
            floats: VecDeque::from([float]),
            directions: VecDeque::from([direction]),
            offsets: VecDeque::from([offset]),
        }
    }
}

fn next_or_last<T: Copy>(queue: &mut VecDeque<T>) -> T {
    if queue.len() > 1 {
        queue.pop_front().unwrap()
    } else {
        *queue.front().expect("scripted queue is empty")
    }
}

impl FractureRng for ScriptedRng {
    fn next_unit_vector(&mut self) -> Vector3<f32> {
        next_or_last(&mut self.directions).normalize()
    }

    fn next_float(&mut self, min: f32, max: f32) -> f32 {
        next_or_last(&mut self.floats).clamp(min, max)
    }

    fn next_inside_sphere(&mut self, _radius: f32) -> Vector3<f32> {
        next_or_last(&mut self.offsets)
    }
}
