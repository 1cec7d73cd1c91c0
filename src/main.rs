use std::time::Instant;

use clap::Parser;
use log::{debug, error, info};

use skytrace::cli::Args;
use skytrace::config::Config;
use skytrace::logger::{humanize_time, init_logger};
use skytrace::output::save_image;
use skytrace::random::random_seed;
use skytrace::render::render;
use skytrace::Result;

fn run(args: &Args) -> Result<()> {
    let start = Instant::now();

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => {
            debug!("No config file given, using the built-in scene");
            Config::default()
        }
    };
    config.apply_args(args);

    if let Some(path) = &args.save_config {
        config.save(path)?;
        info!("Config written to {}", path.display());
        return Ok(());
    }

    debug!("Scene: {}", config.scene.summary());
    let seed = match config.seed {
        Some(seed) => seed,
        None => {
            let seed = random_seed();
            info!("No seed given, using {}", seed);
            seed
        }
    };

    let settings = config.render_settings(seed);
    let image = render(&config.scene, &settings)?;
    save_image(&image, &config.image.output, config.image.quality)?;

    info!("Total time spent: {}", humanize_time(start.elapsed().as_secs_f64()));
    Ok(())
}

fn main() {
    let args = Args::parse();

    init_logger(args.debug_level.into());

    // Log application startup with version information
    info!("SkyTrace - Git Version {} ({})", env!("GIT_HASH"), env!("GIT_DATE"));

    if let Err(e) = run(&args) {
        error!("{}", e);
        std::process::exit(1);
    }
}
