use std::{
    fs::File,
    io::{self, BufWriter, Write},
};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{filter, layer::SubscriberExt, util::SubscriberInitExt};

use args::Args;
use demo::Demo;
use scene_sync::{config::Config, RenderContext};

mod args;
mod demo;

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        LevelFilter::TRACE
    } else {
        LevelFilter::INFO
    };
    let filter = filter::Targets::new()
        .with_default(LevelFilter::OFF)
        .with_target("scene_sync", level)
        .with_target("scene", level)
        .with_target("common", level);
    let format = tracing_subscriber::fmt::layer().with_writer(io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .init();

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let context = RenderContext::init(config);
    let mut sync = context.create_component()?;
    let demo = Demo::new(&args).context("Building demo scene")?;

    sync.hold(|sync| -> Result<()> {
        sync.load(demo.scene, demo.attributes);
        sync.display_color_bar(demo.color_bar, demo.color_bar_bounds);
        if let Some(clip) = &args.clip {
            sync.set_clip_pose(clip.as_slice())
                .context("Applying clip pose")?;
        }
        Ok(())
    })?;

    let frame = sync.frame();
    info!(
        "Publishing {} sub-meshes to `{}`",
        frame.sub_mesh_count(),
        context.bundle()
    );

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Creating `{}`", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    if args.pretty {
        serde_json::to_writer_pretty(&mut out, &*frame)?;
    } else {
        serde_json::to_writer(&mut out, &*frame)?;
    }
    writeln!(out)?;
    out.flush()?;

    context.teardown();
    Ok(())
}
