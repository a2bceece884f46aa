use crate::app;
use bevy::window::WindowResolution;
use clap::ArgAction;
use solar_system::scene::{ManifestError, SolarSystemManifest};
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(clap::Parser)]
#[clap(version, about)]
pub(crate) struct Cli {
    #[clap(subcommand)]
    command: CliCommand,
}

impl Cli {
    pub(crate) fn run(self) -> Result<(), CliError> {
        self.command.run()
    }
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Open the viewer
    Run {
        #[clap(short, long)]
        resolution: Option<Resolution>,
        #[clap(long, action = ArgAction::SetTrue)]
        inspector: bool,
        /// System manifest to load instead of the built-in one
        #[clap(long)]
        system: Option<PathBuf>,
        /// Extra tracing directives, e.g. `auto_tour=debug`
        #[clap(long)]
        log_filter: Option<String>,
    },
    /// Print the bodies of a system in tour order
    Bodies {
        #[clap(long)]
        system: Option<PathBuf>,
    },
}

#[derive(Debug, Copy, Clone, PartialEq)]
struct Resolution {
    width: f32,
    height: f32,
}

impl FromStr for Resolution {
    type Err = ResolutionInvalidFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s.split_once('x').ok_or(ResolutionInvalidFormat)?;
        let width = w.parse::<f32>().map_err(|_| ResolutionInvalidFormat)?;
        let height = h.parse::<f32>().map_err(|_| ResolutionInvalidFormat)?;
        if width <= 0.0 || height <= 0.0 {
            return Err(ResolutionInvalidFormat);
        }
        Ok(Self { width, height })
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Invalid format for resolution; expected <width>x<height>")]
struct ResolutionInvalidFormat;

#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("Cannot load system manifest {path}: {source}")]
    Manifest {
        path: String,
        #[source]
        source: ManifestError,
    },
}

fn load_manifest(path: Option<&Path>) -> Result<SolarSystemManifest, CliError> {
    let result = match path {
        Some(path) => SolarSystemManifest::load(path),
        None => SolarSystemManifest::builtin(),
    };
    result.map_err(|source| CliError::Manifest {
        path: path
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<built-in>".to_string()),
        source,
    })
}

impl CliCommand {
    fn run(self) -> Result<(), CliError> {
        match self {
            Self::Run {
                resolution,
                inspector,
                system,
                log_filter,
            } => {
                let manifest = load_manifest(system.as_deref())?;
                app::get_app(app::AppSettings {
                    resolution: resolution
                        .map(|r| WindowResolution::new(r.width, r.height))
                        .unwrap_or_default(),
                    with_inspector: inspector,
                    log_filter,
                    manifest,
                })
                .run();
            }
            Self::Bodies { system } => {
                let manifest = load_manifest(system.as_deref())?;
                for line in describe_bodies(&manifest) {
                    println!("{line}");
                }
            }
        }
        Ok(())
    }
}

fn describe_bodies(manifest: &SolarSystemManifest) -> Vec<String> {
    let sun = (&manifest.sun.name, &manifest.sun.info);
    let planets = manifest.planets.iter().map(|p| (&p.name, &p.info));
    std::iter::once(sun)
        .chain(planets)
        .enumerate()
        .map(|(i, (name, info))| {
            format!(
                "{i}. {name}: {}, orbit {}, day {}, moons {}",
                info.distance, info.orbital_period, info.rotation_period, info.moons
            )
        })
        .collect()
}
