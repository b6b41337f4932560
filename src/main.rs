use crate::{
    config::CONFIG_SOURCE,
    dump::Dump,
    localization::Localization,
    pipeline::Pipeline,
    sink::{JsonLinesSink, Sink as _},
    title::Namespace,
    wikitext::{Configuration, DEFAULT_MAX_DEPTH},
};
use std::{
    path::{Path, PathBuf},
    time::Instant,
};

mod config;
mod dump;
mod localization;
mod page;
mod pipeline;
mod sink;
mod title;
mod wikitext;

fn usage<T>(err: &'static str) -> anyhow::Result<T> {
    let exe = std::env::args().next().unwrap_or_default();
    println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    println!("Usage: {exe} [options] <dump.xml[.bz2]>\n");
    println!("or, use environment variables:");
    println!("    WIKIPLAIN_DUMP\n");
    println!("Options:");
    println!("    -c, --categories: Keep category link labels in article text");
    println!("    -t, --templates: Also convert template pages");
    println!("    -p, --processes N: Number of workers (default: 1)");
    println!("    -o, --output DIR: Record output directory (default: .)");
    println!("    -l, --localization FILE: Localization file (default: by dump language)");
    println!("    --localization-dir DIR: Localization lookup directory (default: conf)");
    println!("    --max-depth N: Markup nesting limit (default: {DEFAULT_MAX_DEPTH})");
    println!("    --drop-unmatched: Drop characters which start no markup\n");
    Err(anyhow::Error::msg(err))
}

fn free_arg(
    args: &mut pico_args::Arguments,
    key: &str,
    err: &'static str,
) -> anyhow::Result<String> {
    if let Some(arg) = args.opt_free_from_str::<String>()? {
        Ok(arg)
    } else if let Ok(arg) = std::env::var(key) {
        Ok(arg)
    } else {
        usage(err)
    }
}

/// Loads the explicit localization file, or else the one for the language
/// of the dump.
fn load_localization(
    path: Option<PathBuf>,
    dir: &Path,
    dump: &Dump,
) -> anyhow::Result<Option<Localization>> {
    if let Some(path) = path {
        log::info!("Using localization {}", path.display());
        return Ok(Some(Localization::load_from_path(path)?));
    }

    let language = dump.language().unwrap_or_else(|| {
        log::warn!("Could not find dump content language; falling back to en");
        "en".into()
    });
    log::info!("Dump content language is {language}");
    Ok(Localization::for_language(dir, &language)?)
}

fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return usage("Help requested");
    }
    let keep_categories = args.contains(["-c", "--categories"]);
    let templates = args.contains(["-t", "--templates"]);
    let drop_unmatched = args.contains("--drop-unmatched");
    let processes = args
        .opt_value_from_str(["-p", "--processes"])?
        .unwrap_or(1_usize);
    let output = args
        .opt_value_from_str::<_, PathBuf>(["-o", "--output"])?
        .unwrap_or_else(|| ".".into());
    let localization_path = args.opt_value_from_str::<_, PathBuf>(["-l", "--localization"])?;
    let localization_dir = args
        .opt_value_from_str::<_, PathBuf>("--localization-dir")?
        .unwrap_or_else(|| "conf".into());
    let max_depth = args
        .opt_value_from_str("--max-depth")?
        .unwrap_or(DEFAULT_MAX_DEPTH);
    let _ = args.contains("--");
    let dump_path = free_arg(&mut args, "WIKIPLAIN_DUMP", "Missing dump file argument")?;

    if !args.finish().is_empty() {
        return usage("Unknown extra arguments passed");
    }

    if processes == 0 {
        return usage("At least one process is required");
    }

    let time = Instant::now();
    let dump = Dump::from_file(&dump_path)?;
    let localization = load_localization(localization_path, &localization_dir, &dump)?;
    let config = Configuration::new(&CONFIG_SOURCE, localization.as_ref())?
        .with_max_depth(max_depth)
        .with_drop_unmatched(drop_unmatched);

    let pipeline = Pipeline::new(&config, processes, keep_categories)?;
    let mut sink = JsonLinesSink::create(&output)?;

    if templates {
        let pages = dump.pages(Namespace::TEMPLATE)?;
        log::info!("Found {} template pages", pages.len());
        pipeline.process_templates(pages, &mut sink)?;
    }

    let pages = dump.pages(Namespace::MAIN)?;
    log::info!("Found {} article pages", pages.len());
    pipeline.process_articles(pages, &mut sink)?;

    sink.flush()?;
    log::info!("Finished in {:.2?}", time.elapsed());
    Ok(())
}
