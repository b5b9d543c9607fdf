//! Entry point for tessera.
//! Loads OBJ meshes, packs them with the ground grid into one vertex buffer,
//! then simulates a few frames of scene animation and keyframe playback.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use asset::{ExpandedMesh, KeyframeSet, build_grid, builtin, obj};
use clap::Parser;
use corelib::{
    Vec3,
    playback::PingPong,
    scene::{Material, ObjectId, Param, Scene, SceneObject, SceneParams},
    transform::Transform,
};
use renderer::{EntryId, MeshSet, PackedBuffer, prepare_frame};

/// Degrees per millisecond for the spinning anchor object.
const ROTATION_SPEED: f32 = 0.02;
/// Distance between neighbouring meshes attached to the anchor.
const MESH_SPACING: f32 = 3.0;
/// Height of the ground grid.
const GRID_HEIGHT: f32 = -2.0;

#[derive(Parser, Debug)]
#[command(
    name = "tessera",
    version,
    about = "Pack OBJ meshes into one shared vertex buffer and simulate a few frames"
)]
struct Args {
    /// OBJ meshes to load. The built-in cube is used when none is given.
    meshes: Vec<PathBuf>,
    /// OBJ pose of the animated object; repeat in playback order.
    #[arg(long = "keyframe", value_name = "OBJ")]
    keyframes: Vec<PathBuf>,
    /// Spacing between grid rows, at least 1.
    #[arg(long, default_value_t = 1.0)]
    grid_rows: f32,
    /// Spacing between grid columns, at least 1.
    #[arg(long, default_value_t = 1.0)]
    grid_columns: f32,
    /// Pack texture coordinates after the normals.
    #[arg(long)]
    texcoords: bool,
    /// Number of frames to simulate.
    #[arg(long, default_value_t = 6)]
    frames: usize,
    /// Simulated frame duration in milliseconds.
    #[arg(long, default_value_t = 16.0)]
    frame_ms: f32,
    /// Override a scene parameter, e.g. `--set light-x=1.5`. Repeatable.
    #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_override)]
    overrides: Vec<(Param, f32)>,
}

fn parse_override(arg: &str) -> Result<(Param, f32), String> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{arg}'"))?;
    let param = name.parse::<Param>().map_err(|e| e.to_string())?;
    let value = value
        .trim()
        .parse::<f32>()
        .map_err(|e| format!("invalid value for {param}: {e}"))?;
    Ok((param, value))
}

fn mesh_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("mesh")
        .to_owned()
}

fn load_meshes(paths: &[PathBuf]) -> Result<Vec<(String, ExpandedMesh)>> {
    if paths.is_empty() {
        log::info!("No meshes given, using the built-in cube");
        let cube = obj::parse(builtin::CUBE_OBJ).context("Built-in cube failed to parse")?;
        return Ok(vec![("cube".to_owned(), cube)]);
    }
    paths
        .iter()
        .map(|p| Ok((mesh_name(p), obj::load_obj_from_path(p)?)))
        .collect()
}

fn scene_params(overrides: &[(Param, f32)]) -> Result<SceneParams> {
    let mut params = SceneParams::default();
    for &(param, value) in overrides {
        params
            .set(param, value)
            .with_context(|| format!("Cannot apply --set {param}={value}"))?;
    }
    Ok(params)
}

/// Object ids of interest after scene assembly.
struct Handles {
    animated: Option<ObjectId>,
}

/// The first mesh spins in place; every other mesh, and the animated object,
/// is attached to it and orbits along. The grid stays fixed below.
fn build_scene(
    scene: &mut Scene,
    meshes: &[EntryId],
    pose0: Option<EntryId>,
    grid: EntryId,
) -> Result<Handles> {
    scene.add(
        SceneObject::new("grid", grid)
            .with_world(Transform::identity().translate(0.0, GRID_HEIGHT, 0.0))
            .with_material(Material::GRID),
    )?;

    let mut anchor = None;
    for (i, &entry) in meshes.iter().enumerate() {
        let object = match anchor {
            None => SceneObject::new(format!("mesh{i}"), entry)
                .with_world(Transform::identity().translate(0.4, GRID_HEIGHT, 2.0))
                .with_model(Transform::identity().scale(0.65, 0.65, 0.65))
                .with_spin(ROTATION_SPEED, Vec3::Y),
            Some(parent) => SceneObject::new(format!("mesh{i}"), entry)
                .with_world(Transform::identity().translate(i as f32 * MESH_SPACING, 0.0, 0.0))
                .with_parent(parent),
        };
        let id = scene.add(object)?;
        anchor.get_or_insert(id);
    }

    let animated = match pose0 {
        Some(entry) => {
            let mut object = SceneObject::new("keyframes", entry)
                .with_world(Transform::identity().translate(-MESH_SPACING, 0.0, 0.0));
            if let Some(parent) = anchor {
                object = object.with_parent(parent);
            }
            Some(scene.add(object)?)
        }
        None => None,
    };

    Ok(Handles { animated })
}

fn report_layout(packed: &PackedBuffer) {
    log::info!(
        "Shared buffer: {} floats, {} bytes",
        packed.data.len(),
        packed.plan.byte_len()
    );
    for span in packed.plan.spans() {
        log::info!(
            "  {:<16} {:<8} offset={:>8} elements={}",
            packed.draws[span.entry].name,
            format!("{:?}", span.kind),
            span.byte_offset,
            span.element_count
        );
    }
    for draw in &packed.draws {
        log::info!(
            "  draw {:<16} {:?} vertices {:?} ({} primitives)",
            draw.name,
            draw.primitive,
            draw.vertices(),
            draw.primitive_count()
        );
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    log::info!(
        "Starting tessera: {} meshes, {} keyframes, grid={}x{}, texcoords={}",
        args.meshes.len(),
        args.keyframes.len(),
        args.grid_rows,
        args.grid_columns,
        args.texcoords
    );

    let meshes = load_meshes(&args.meshes)?;
    let keyframes = if args.keyframes.is_empty() {
        None
    } else {
        Some(KeyframeSet::load_paths(&args.keyframes)?)
    };
    let grid = build_grid(args.grid_rows, args.grid_columns);
    if grid.is_empty() {
        log::warn!("Grid is empty; continuing without it");
    }

    let mut set = MeshSet::new().with_texcoords(args.texcoords);
    let mesh_entries: Vec<EntryId> = meshes
        .iter()
        .map(|(name, mesh)| set.push_mesh(name.clone(), mesh))
        .collect();
    let group = keyframes
        .as_ref()
        .map(|frames| set.push_keyframes("keyframes", frames));
    let grid_entry = set.push_grid("grid", &grid);
    let packed = set.pack()?;
    report_layout(&packed);

    let mut scene = Scene::new(scene_params(&args.overrides)?);
    let pose0 = group.map(|g| packed.groups[g].first_entry);
    let handles = build_scene(&mut scene, &mesh_entries, pose0, grid_entry)?;

    let mut playback = match group {
        Some(g) => Some((g, PingPong::new(packed.groups[g].len)?)),
        None => None,
    };

    for frame in 0..args.frames {
        scene.advance(args.frame_ms);

        if let (Some((g, player)), Some(id)) = (playback.as_mut(), handles.animated) {
            let pose = player.tick();
            if let (Some(entry), Some(object)) = (packed.groups[*g].entry(pose), scene.get_mut(id)) {
                object.draw = entry;
            }
            log::debug!("frame {frame}: pose {pose}");
        }

        let data = prepare_frame(&scene, &packed);
        log::info!(
            "frame {frame}: {} draw calls, {} vertices",
            data.calls.len(),
            data.vertex_total()
        );
    }

    log::info!("Done.");
    Ok(())
}
