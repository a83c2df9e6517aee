use std::path::{Path, PathBuf};

use glpbd::{
    ModelContainer, ProbeGenerator, Settings,
    io::{COURSE_MODEL_FILE_NAMES, load_geometry_file, save, save_compressed},
};

const USAGE: &str = "Drag/drop a course_model.obj, or a Yaz0 compressed course_model.szs holding OBJ text, to use!";
const PROBE_FILE_SUFFIXES: [&str; 2] = ["bglpbd.szs", "bglpbd"];
const GEOMETRY_EXTENSIONS: [&str; 2] = [".szs", ".obj"];

#[derive(Debug, PartialEq, Eq)]
enum Input {
    /// An existing probe file, nothing to do with it yet.
    ProbeFile,
    Geometry(PathBuf),
    Skipped,
}

fn classify(arg: &str) -> Input {
    if PROBE_FILE_SUFFIXES.iter().any(|suffix| arg.ends_with(suffix)) {
        return Input::ProbeFile;
    }

    if GEOMETRY_EXTENSIONS.iter().any(|ext| arg.ends_with(ext)) {
        return Input::Geometry(PathBuf::from(arg));
    }

    let path = Path::new(arg);
    if path.is_dir() {
        return COURSE_MODEL_FILE_NAMES
            .iter()
            .map(|name| path.join(name))
            .find(|candidate| candidate.is_file())
            .map_or(Input::Skipped, Input::Geometry);
    }

    Input::Skipped
}

fn settings_directory() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

fn create_probes(path: &Path, settings_directory: &Path) -> glpbd::Result<PathBuf> {
    let file_name = path.file_name().unwrap_or(path.as_os_str());
    log::info!(
        "Loading {} to create bounding region",
        file_name.to_string_lossy()
    );

    let container = load_geometry_file(path)?;
    let settings = Settings::load(settings_directory)?;

    log::info!("Creating probes with color {}", settings.color);

    let platform = container.platform();
    let document =
        ProbeGenerator::for_platform(platform).generate_from_container(&container, &settings)?;

    let folder = path.parent().unwrap_or(Path::new(""));
    let output = folder.join(platform.output_file_name());

    if platform.is_compressed_output() {
        save_compressed(&document, &output)?;
    } else {
        save(&document, &output)?;
    }

    Ok(output)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.is_empty() {
        println!("{USAGE}");
        println!("Outputs a usable course bglpbd file to fix character/obj lighting.");
        return;
    }

    let settings_directory = settings_directory();
    let mut failed = false;

    for arg in args.iter() {
        match classify(arg) {
            Input::ProbeFile => println!("{USAGE}"),
            Input::Geometry(path) => {
                if let Err(err) = create_probes(&path, &settings_directory) {
                    log::error!("{}: {err}", path.display());
                    failed = true;
                }
            }
            Input::Skipped => log::warn!("Skipping {arg}: no course model found"),
        }
    }

    if failed {
        std::process::exit(1);
    }
}
