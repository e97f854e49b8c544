//! Cosmic Arcade entry point
//!
//! Native builds get a small CLI for generating textures and running headless
//! arena sessions. The web build is driven from JS through `cosmic_arcade::web`.

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::collections::HashMap;
    use std::path::PathBuf;

    use cosmic_arcade::arena::{self, ArenaState, demo_input};
    use cosmic_arcade::consts::FRAME_MS;
    use cosmic_arcade::habitability::HabitabilityReport;
    use cosmic_arcade::orbits::{self, SolarSystem};
    use cosmic_arcade::platform::FileStore;
    use cosmic_arcade::surface::{AtmosphereKind, PlanetParameters, SurfaceGenerator};
    use cosmic_arcade::{Error, HighScore, QualityPreset, Result, Settings};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const USAGE: &str = "\
cosmic-arcade <command> [options]

commands:
  planet        [--water N] [--land N] [--temp C] [--atmosphere KIND]
                [--quality low|medium|high] [--seed N] [--out FILE]
  dodge         [--ticks N] [--seed N]
  habitability  [--water N] [--temp C] [--atmosphere KIND] [--size X] [--gravity G]
  system        [--add N] [--time T] [--seed N]

global:
  --store FILE  key-value store for settings and high score (default cosmic-arcade.json)";

    /// `--key value` pairs after the command
    struct Options {
        values: HashMap<String, String>,
    }

    impl Options {
        fn parse(args: &[String]) -> Result<Self> {
            let mut values = HashMap::new();
            let mut iter = args.iter();
            while let Some(arg) = iter.next() {
                let key = arg
                    .strip_prefix("--")
                    .ok_or_else(|| Error::Usage(format!("unexpected argument {arg}")))?;
                let value = iter
                    .next()
                    .ok_or_else(|| Error::Usage(format!("--{key} needs a value")))?;
                values.insert(key.to_string(), value.clone());
            }
            Ok(Self { values })
        }

        fn get<T: std::str::FromStr>(&self, key: &str) -> Result<Option<T>> {
            self.values
                .get(key)
                .map(|raw| {
                    raw.parse()
                        .map_err(|_| Error::Usage(format!("bad value for --{key}: {raw}")))
                })
                .transpose()
        }

        fn str(&self, key: &str) -> Option<&str> {
            self.values.get(key).map(String::as_str)
        }

        fn planet(&self) -> Result<PlanetParameters> {
            let mut params = PlanetParameters::default();
            // Sliders reconcile: whichever of water/land is given drives the other
            if let Some(water) = self.get::<f32>("water")? {
                params.set_water_percent(water);
            }
            if let Some(land) = self.get::<f32>("land")? {
                params.set_land_percent(land);
            }
            if let Some(temp) = self.get("temp")? {
                params.temperature_celsius = temp;
            }
            if let Some(size) = self.get("size")? {
                params.size_multiplier = size;
            }
            if let Some(kind) = self.str("atmosphere") {
                params.atmosphere = AtmosphereKind::from_str(kind)
                    .ok_or_else(|| Error::Usage(format!("unknown atmosphere {kind}")))?;
            }
            Ok(params.clamped())
        }
    }

    pub fn run(args: &[String]) -> Result<()> {
        let Some((command, rest)) = args.split_first() else {
            println!("{USAGE}");
            return Ok(());
        };
        let opts = Options::parse(rest)?;
        let store_path = opts
            .str("store")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("cosmic-arcade.json"));
        let mut store = FileStore::open(&store_path)?;
        let settings = Settings::load(&store);

        match command.as_str() {
            "planet" => {
                let params = opts.planet()?;
                let mut settings = settings;
                if let Some(q) = opts.str("quality") {
                    settings.quality = QualityPreset::from_str(q)
                        .ok_or_else(|| Error::Usage(format!("unknown quality {q}")))?;
                }
                let generator = SurfaceGenerator::from_settings(&settings);
                let surface = match opts.get::<u64>("seed")? {
                    Some(seed) => generator.generate_seeded(&params, seed),
                    None => generator.generate(&params),
                };
                let out = opts.str("out").unwrap_or("planet.png");
                surface.raster.save_png(out)?;
                let s = surface.stats;
                println!(
                    "{} landmasses, {} mountain ranges, {} ice rows per cap, {} clouds -> {}",
                    s.landmasses, s.mountain_ranges, s.ice_cap_rows, s.clouds, out
                );
            }
            "dodge" => {
                let ticks: u64 = opts.get("ticks")?.unwrap_or(10_000);
                let seed: u64 = opts.get("seed")?.unwrap_or(1);
                let mut high_score = HighScore::load(&store);
                let mut state = ArenaState::new(seed, settings.arena.clone(), high_score.best);
                arena::start(&mut state);

                let mut snapshot = state.snapshot();
                for _ in 0..ticks {
                    let input = demo_input(&state);
                    snapshot = arena::tick(&mut state, &input, FRAME_MS);
                    if snapshot.is_over() {
                        break;
                    }
                }

                if snapshot.is_over() {
                    println!("Crashed! Score: {}", snapshot.score);
                } else {
                    println!("Survived {} ticks. Score: {}", ticks, snapshot.score);
                }
                if high_score.record(snapshot.score) {
                    println!("New high score!");
                    high_score.save(&mut store)?;
                }
                println!("High Score: {}", high_score.best);
            }
            "habitability" => {
                let params = opts.planet()?;
                let gravity = opts.get("gravity")?.unwrap_or(1.0);
                let report = HabitabilityReport::analyze(&params, gravity);
                for (name, value) in report.factors() {
                    println!("{name:<26} {value:>3}%");
                }
                println!(
                    "Habitability Score: {}% ({} potential)",
                    report.score(),
                    report.rating().as_str()
                );
                for rec in report.recommendations() {
                    println!("  - {rec}");
                }
            }
            "system" => {
                let mut system = SolarSystem::default();
                let mut rng = Pcg32::seed_from_u64(opts.get("seed")?.unwrap_or(0));
                for _ in 0..opts.get::<u32>("add")?.unwrap_or(0) {
                    system.add_planet(&mut rng);
                }
                let time: f32 = opts.get("time")?.unwrap_or(0.0);
                for planet in &system.planets {
                    let pos = planet.position(time);
                    println!(
                        "{:<14} {} size {:.1}x orbit {:>4} AU  at ({:.2}, {:.2}) path {} pts",
                        planet.name,
                        planet.color,
                        planet.size,
                        planet.orbit_radius,
                        pos.x,
                        pos.z,
                        orbits::orbit_path(planet.orbit_radius, orbits::ORBIT_PATH_SEGMENTS).len()
                    );
                }
            }
            "help" | "--help" | "-h" => println!("{USAGE}"),
            other => return Err(Error::Usage(format!("unknown command {other}\n\n{USAGE}"))),
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Cosmic Arcade (native) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(e) = cli::run(&args) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
