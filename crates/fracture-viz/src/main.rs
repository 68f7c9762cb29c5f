use ::rand::SeedableRng;
use ::rand::rngs::StdRng;
use fracture_viz::{
    OrbitCamera, debris_center, draw_fragment, draw_output_mesh, generate_cube_mesh, random_surface_point,
};
use macroquad::prelude::*;
use mesh_fracture::{
    DebrisField, FractureConfig, MeshFracturer, MeshFragment, OutputMesh, spawn_fragments,
};
use nalgebra::{Point3, UnitQuaternion, Vector3};

const CONFIG_PATH: &str = "fracture.ron";
const EXPLOSION_FORCE: f32 = 3.0;
const EXPLOSION_RADIUS: f32 = 2.0;

#[macroquad::main("Mesh Fracture")]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let fracturer = MeshFracturer::new(FractureConfig::load_or_default(CONFIG_PATH));
    let cube = generate_cube_mesh(Point3::origin(), 1.0);
    let bounds = cube.bounds();
    let Some(intact_mesh) = OutputMesh::from_fragment(MeshFragment::from_source(&cube)) else {
        log::error!("Cube mesh is degenerate");
        return;
    };

    let mut rng = StdRng::from_entropy();
    let mut debris = DebrisField::new();
    let mut intact = true;
    let mut piece_count: usize = 12;
    let mut last_impact: Option<Point3<f32>> = None;

    let mut camera = OrbitCamera::framing(&bounds, 0.6, 0.4);

    loop {
        let dt = get_frame_time();
        camera.update(dt);

        if is_key_pressed(KeyCode::Equal) {
            piece_count = (piece_count + 1).min(20);
        }
        if is_key_pressed(KeyCode::Minus) {
            piece_count = piece_count.saturating_sub(1).max(6);
        }

        if intact && is_key_pressed(KeyCode::Space) {
            let impact = random_surface_point(&mut rng, &bounds);
            match fracturer.fracture(&cube, piece_count, impact, &bounds, &mut rng) {
                Ok(pieces) if pieces.is_empty() => log::warn!("Fracture produced no pieces"),
                Ok(pieces) => {
                    log::info!("Broke cube into {} pieces at {:?}", pieces.len(), impact);
                    debris.spawn(spawn_fragments(
                        pieces,
                        Point3::origin(),
                        Vector3::zeros(),
                        &mut rng,
                        &fracturer.config().debris,
                    ));
                    debris.explode(impact, EXPLOSION_FORCE, EXPLOSION_RADIUS);
                    last_impact = Some(impact);
                    intact = false;
                }
                Err(e) => log::error!("Fracture failed: {}", e),
            }
        }

        if is_key_pressed(KeyCode::R) {
            debris.clear();
        }

        debris.tick(dt);
        if !intact && debris.is_empty() {
            intact = true;
            last_impact = None;
        }
        let focus = debris_center(debris.iter()).unwrap_or(bounds.center);
        camera.follow(focus, dt);

        clear_background(Color::from_rgba(20, 20, 30, 255));
        set_camera(&camera.to_camera3d());

        draw_grid(20, 0.5, DARKGRAY, Color::from_rgba(40, 40, 50, 255));

        if intact {
            draw_output_mesh(
                &intact_mesh,
                Point3::origin(),
                &UnitQuaternion::identity(),
                LIGHTGRAY,
                1.0,
            );
        } else {
            for body in debris.iter() {
                draw_fragment(body);
            }
        }

        if let Some(p) = last_impact {
            draw_sphere(vec3(p.x, p.y, p.z), 0.03, None, RED);
        }

        set_default_camera();

        draw_text("Mesh Fracture", 10.0, 25.0, 24.0, WHITE);
        draw_text(
            &format!("Pieces requested: {} | Live fragments: {}", piece_count, debris.len()),
            10.0,
            50.0,
            18.0,
            GRAY,
        );
        draw_text(
            "Space: break  R: reset  +/-: piece count  Drag/scroll: camera",
            10.0,
            75.0,
            16.0,
            DARKGRAY,
        );
        draw_text(&format!("FPS: {}", get_fps()), 10.0, 95.0, 16.0, DARKGRAY);

        next_frame().await
    }
}
