//! Headless brush stroke runner.
//!
//! Loads preferences, templates and a brush from the asset store, then drags
//! one stroke across a ground plane and reports the instances it placed.

use std::path::PathBuf;
use std::time::Instant;

use glam::{Vec2, Vec3};

use scenebrush::core::{logging, FrameInput, InputEvent, Result};
use scenebrush::math::{Aabb, Ray};
use scenebrush::placement::{ColliderSet, SeededRandom};
use scenebrush::preferences::Preferences;
use scenebrush::scene::{Scene, SceneGraph};
use scenebrush::store::{load_templates, AssetStore};
use scenebrush::stroke::{EditorRegistry, FrameContext, HandleRecorder, StrokeController};

const DEFAULT_PREFERENCES: &str = "assets/preferences.json";
const DEFAULT_BRUSH: &str = "New Brush";
const DEFAULT_STEPS: usize = 20;

#[derive(Debug)]
struct Args {
    preferences: PathBuf,
    brush: String,
    steps: usize,
    spacing: f32,
    seed: u64,
    percent: Option<f32>,
    self_colliders: bool,
}

fn parse_args() -> std::result::Result<Args, String> {
    let mut args = std::env::args().skip(1);

    let mut preferences = PathBuf::from(DEFAULT_PREFERENCES);
    let mut brush = DEFAULT_BRUSH.to_string();
    let mut steps = DEFAULT_STEPS;
    let mut spacing = 0.5f32;
    let mut seed = 42u64;
    let mut percent = None;
    let mut self_colliders = true;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-p" | "--preferences" => {
                if let Some(v) = args.next() {
                    preferences = PathBuf::from(v);
                }
            }
            "-b" | "--brush" => {
                if let Some(v) = args.next() {
                    brush = v;
                }
            }
            "-n" | "--steps" => {
                if let Some(v) = args.next() {
                    steps = v.parse().map_err(|_| format!("invalid step count '{v}'"))?;
                }
            }
            "--spacing" => {
                if let Some(v) = args.next() {
                    spacing = v.parse().map_err(|_| format!("invalid spacing '{v}'"))?;
                }
            }
            "-s" | "--seed" => {
                if let Some(v) = args.next() {
                    seed = v.parse().map_err(|_| format!("invalid seed '{v}'"))?;
                }
            }
            "--percent" => {
                if let Some(v) = args.next() {
                    percent = Some(v.parse().map_err(|_| format!("invalid percent '{v}'"))?);
                }
            }
            "--no-self-colliders" => { self_colliders = false; }
            "-h" | "--help" | "help" => {
                return Err("show_help".to_string());
            }
            other => return Err(format!("unknown argument '{other}'")),
        }
    }

    Ok(Args { preferences, brush, steps, spacing, seed, percent, self_colliders })
}

fn print_help() {
    println!("Brush Stroke Runner");
    println!("===================");
    println!();
    println!("Usage: paint_stroke [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -p, --preferences <FILE>  Preferences file (default: assets/preferences.json)");
    println!("  -b, --brush <NAME>        Brush to paint with, created if missing (default: New Brush)");
    println!("  -n, --steps <N>           Drag events in the stroke (default: 20)");
    println!("  --spacing <F>             Pointer travel per event in world units (default: 0.5)");
    println!("  -s, --seed <N>            Random seed (default: 42)");
    println!("  --percent <F>             Enable random set with this commit probability");
    println!("  --no-self-colliders       Do not add colliders for placed instances");
}

fn run(args: &Args) -> Result<()> {
    let prefs = Preferences::load_or_create(&args.preferences)?;
    let templates = load_templates(&prefs.templates_file)?;
    let store = AssetStore::open(&prefs.brushes_dir)?;
    let mut brushes = store.load_library(&templates)?;

    let brush_id = match brushes.find_by_name(&args.brush).map(|b| b.id()) {
        Some(id) => id,
        None => {
            let id = store.create(&mut brushes, &templates, "ObjectBrush", &args.brush)?;
            if let Some(brush) = brushes.get_mut(id) {
                brush.origin_rotation = prefs.default_origin_rotation;
            }
            id
        }
    };

    let editors = EditorRegistry::with_defaults();
    if let Some(brush) = brushes.get_mut(brush_id) {
        match editors.editor_for(brush) {
            Some(mut editor) => editor.init(brush, &templates),
            None => log::warn!("No editor for brush '{}'", brush.name),
        }
        if let Some(percent) = args.percent {
            for settings in brush.model_settings_mut() {
                settings.random_set = true;
                settings.set_random_set_percent(percent);
            }
        }
    }
    store.save(&brushes, &templates, brush_id)?;

    let mut surface = ColliderSet::new();
    surface.add_ground("Ground", 0.0);
    surface.add_box("Water", Aabb::new(Vec3::new(4.0, -0.5, -1.0), Vec3::new(6.0, 0.05, 1.0)));

    let mut scene = Scene::new();
    for template in templates.templates() {
        scene.add_template_object(template);
    }

    let mut controller = StrokeController::from_preferences(&prefs);
    controller.set_brush(Some(brush_id));
    println!("Painting with {} '{}'", controller.tool_label(&brushes), args.brush);

    let mut rng = SeededRandom::new(args.seed);
    let mut handles = HandleRecorder::new();
    let mut placed = 0;
    let start = Instant::now();

    for step in 0..args.steps {
        let x = step as f32 * args.spacing;
        let event = if step == 0 { InputEvent::PointerDown } else { InputEvent::PointerDrag };
        let mut input = FrameInput::new(Ray::new(Vec3::new(x, 10.0, 0.0), Vec3::NEG_Y), event)
            .with_delta(Vec2::new(args.spacing, 0.0));

        let report = {
            let mut ctx = FrameContext {
                brushes: &mut brushes,
                templates: &templates,
                surface: &surface,
                scene: &mut scene,
                rng: &mut rng,
                handles: Some(&mut handles),
            };
            controller.update(&mut input, &mut ctx)
        };

        for id in &report.committed {
            let Some(node) = scene.get(*id) else { continue };
            let position = node.local_transform.position;
            log::info!("Placed '{}' at ({:.2}, {:.2}, {:.2})", node.name, position.x, position.y, position.z);
            if args.self_colliders {
                // Later steps see earlier instances as surfaces
                let aabb = Aabb::from_center_half_extent(position + Vec3::Y * 0.25, Vec3::splat(0.25));
                surface.add_box(node.name.clone(), aabb);
            }
        }
        placed += report.committed.len();
    }

    let elapsed = start.elapsed();
    println!(
        "{} steps, {} instances placed, {} handle shapes in {:.2}ms",
        args.steps,
        placed,
        handles.shapes.len(),
        elapsed.as_secs_f64() * 1000.0
    );
    println!("Selection after stroke: {:?}", scene.selection());
    Ok(())
}

fn main() {
    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            if e == "show_help" {
                print_help();
                return;
            }
            eprintln!("Error: {}", e);
            print_help();
            std::process::exit(1);
        }
    };

    logging::init();

    if let Err(e) = run(&args) {
        log::error!("Stroke failed: {}", e);
        std::process::exit(1);
    }
}
