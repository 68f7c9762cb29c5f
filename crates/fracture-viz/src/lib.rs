//! Drawing helpers and scene setup for the fracture viewer.

use std::hash::{Hash, Hasher};

use macroquad::models::{Mesh, Vertex, draw_mesh};
use macroquad::prelude::*;
use mesh_fracture::{Aabb, FractureRng, FragmentBody, OutputMesh, SourceMesh};
use nalgebra::{Point3, UnitQuaternion, Vector3};

/// Direction the flat shading is lit from.
const LIGHT_DIR: [f32; 3] = [0.4, 0.8, 0.45];

/// Generates a deterministic color from a fragment's geometry using hashing.
/// This keeps a fragment's color stable across frames.
pub fn fragment_color(mesh: &OutputMesh) -> Color {
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    mesh.vertices.len().hash(&mut hasher);
    for v in mesh.vertices.iter().take(3) {
        v.x.to_bits().hash(&mut hasher);
        v.y.to_bits().hash(&mut hasher);
        v.z.to_bits().hash(&mut hasher);
    }
    let hash = hasher.finish();

    // Extract RGB from hash bytes
    let r = ((hash >> 16) & 0xFF) as u8;
    let g = ((hash >> 8) & 0xFF) as u8;
    let b = (hash & 0xFF) as u8;

    // Ensure colors aren't too dark by adding a minimum brightness
    Color::from_rgba(r.max(60), g.max(60), b.max(60), 255)
}

/// Draws a fragment mesh placed by a rigid transform, flat shaded from its normals.
pub fn draw_output_mesh(
    mesh: &OutputMesh,
    position: Point3<f32>,
    orientation: &UnitQuaternion<f32>,
    base: Color,
    opacity: f32,
) {
    // macroquad meshes index with u16
    if mesh.vertices.len() > u16::MAX as usize {
        log::warn!("Skipping fragment with {} vertices", mesh.vertices.len());
        return;
    }

    let light = Vector3::from(LIGHT_DIR).normalize();
    let vertices: Vec<Vertex> = mesh
        .vertices
        .iter()
        .zip(&mesh.uvs)
        .zip(&mesh.normals)
        .map(|((p, uv), n)| {
            let world = position + *orientation * p.coords;
            let shade = 0.45 + 0.55 * (*orientation * *n).dot(&light).max(0.0);
            let color = Color::new(base.r * shade, base.g * shade, base.b * shade, opacity);
            Vertex::new2(vec3(world.x, world.y, world.z), vec2(uv.x, uv.y), color)
        })
        .collect();

    let indices: Vec<u16> = mesh.indices.iter().map(|&i| i as u16).collect();

    draw_mesh(&Mesh {
        vertices,
        indices,
        texture: None,
    });
}

/// Draws a spawned fragment at its current pose and opacity.
pub fn draw_fragment(body: &FragmentBody) {
    let mesh = body.mesh();
    draw_output_mesh(
        mesh,
        body.position,
        &body.orientation,
        fragment_color(mesh),
        body.opacity(),
    );
}

/// Generates an axis-aligned cube as an indexed mesh. UVs are left empty so the fracturer derives planar ones.
pub fn generate_cube_mesh(center: Point3<f32>, size: f32) -> SourceMesh {
    let half = size / 2.0;

    // 8 corners of the cube
    let vertices = vec![
        center + Vector3::new(-half, -half, -half), // 0: left-bottom-back
        center + Vector3::new(half, -half, -half),  // 1: right-bottom-back
        center + Vector3::new(half, half, -half),   // 2: right-top-back
        center + Vector3::new(-half, half, -half),  // 3: left-top-back
        center + Vector3::new(-half, -half, half),  // 4: left-bottom-front
        center + Vector3::new(half, -half, half),   // 5: right-bottom-front
        center + Vector3::new(half, half, half),    // 6: right-top-front
        center + Vector3::new(-half, half, half),   // 7: left-top-front
    ];

    // 6 faces with counter-clockwise winding (viewed from outside)
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

    SourceMesh::new(vertices, Vec::new(), indices)
}

/// A random point on the surface of a box, used as the impact point.
pub fn random_surface_point<R: FractureRng + ?Sized>(rng: &mut R, bounds: &Aabb) -> Point3<f32> {
    let mut local = Vector3::new(
        rng.next_float(-1.0, 1.0),
        rng.next_float(-1.0, 1.0),
        rng.next_float(-1.0, 1.0),
    );
    // Push the dominant axis out to the face.
    let axis = local.iamax();
    local[axis] = local[axis].signum();
    bounds.center + local.component_mul(&bounds.extents)
}

/// Orbit camera that frames a breakable object and drifts after its debris.
///
/// Zoom limits are derived from the framed bounds, so small and large objects
/// get the same feel. Keyboard orbiting is scaled by frame time.
pub struct OrbitCamera {
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub target: Vec3,
    /// Fraction of the distance covered per scroll step.
    pub zoom_step: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// How quickly `target` catches up with the followed point, per second.
    pub follow_rate: f32,
}

impl OrbitCamera {
    const ORBIT_KEY_SPEED: f32 = 1.2;
    const DRAG_SPEED: f32 = 2.0;

    /// Looks at the center of `bounds` from far enough to see all of it.
    pub fn framing(bounds: &Aabb, yaw: f32, pitch: f32) -> Self {
        let radius = bounds.extents.norm().max(1e-3);
        Self {
            distance: radius * 3.5,
            yaw,
            pitch,
            target: to_vec3(bounds.center),
            zoom_step: 0.1,
            min_distance: radius * 1.2,
            max_distance: radius * 25.0,
            follow_rate: 2.0,
        }
    }

    /// Updates the camera from mouse drag, scroll and arrow keys.
    pub fn update(&mut self, dt: f32) {
        if is_mouse_button_down(MouseButton::Left) {
            let delta = mouse_delta_position();
            self.yaw -= delta.x * Self::DRAG_SPEED;
            self.pitch -= delta.y * Self::DRAG_SPEED;
        }

        let step = Self::ORBIT_KEY_SPEED * dt;
        if is_key_down(KeyCode::Left) {
            self.yaw += step;
        }
        if is_key_down(KeyCode::Right) {
            self.yaw -= step;
        }
        if is_key_down(KeyCode::Up) {
            self.pitch += step;
        }
        if is_key_down(KeyCode::Down) {
            self.pitch -= step;
        }

        self.zoom(mouse_wheel().1);
    }

    /// Zooms by `clicks` scroll steps; positive zooms in.
    pub fn zoom(&mut self, clicks: f32) {
        self.distance *= (1.0 - self.zoom_step).powf(clicks.clamp(-5.0, 5.0));
        self.clamp();
    }

    /// Moves the look-at point part of the way toward `point`.
    pub fn follow(&mut self, point: Point3<f32>, dt: f32) {
        let blend = (self.follow_rate * dt).clamp(0.0, 1.0);
        self.target = self.target.lerp(to_vec3(point), blend);
    }

    fn clamp(&mut self) {
        // Stay clear of the poles.
        self.pitch = self.pitch.clamp(-1.5, 1.5);
        self.distance = self.distance.clamp(self.min_distance, self.max_distance);
    }

    /// Returns the camera's world position.
    pub fn position(&self) -> Vec3 {
        let pitch = self.pitch.clamp(-1.5, 1.5);
        let x = self.distance * pitch.cos() * self.yaw.sin();
        let y = self.distance * pitch.sin();
        let z = self.distance * pitch.cos() * self.yaw.cos();
        self.target + vec3(x, y, z)
    }

    /// Converts to macroquad's Camera3D for rendering.
    pub fn to_camera3d(&self) -> Camera3D {
        Camera3D {
            position: self.position(),
            up: vec3(0.0, 1.0, 0.0),
            target: self.target,
            ..Default::default()
        }
    }
}

/// Centroid of the live fragments, if there are any.
pub fn debris_center<'a>(bodies: impl IntoIterator<Item = &'a FragmentBody>) -> Option<Point3<f32>> {
    let (sum, count) = bodies
        .into_iter()
        .fold((Vector3::zeros(), 0usize), |(sum, n), b| (sum + b.center().coords, n + 1));
    (count > 0).then(|| Point3::from(sum / count as f32))
}

fn to_vec3(p: Point3<f32>) -> Vec3 {
    vec3(p.x, p.y, p.z)
}
