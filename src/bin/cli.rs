use clap::Parser;
use polymap::logging::{DEFAULT_FILTER, init_logging};
use polymap::{GenerationParams, generate, summarize};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

/// Генератор полигональных карт
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Путь к конфигурационному файлу в формате TOML (по умолчанию: встроенные параметры)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Переопределить сид из конфигурации
    #[arg(short, long)]
    seed: Option<u64>,

    /// Переопределить число точек
    #[arg(short = 'n', long)]
    points: Option<usize>,

    /// Путь для сохранения графа карты в JSON
    #[arg(short, long, default_value = "map.json")]
    output: PathBuf,

    /// Путь для сохранения сводки в JSON
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Фильтр логов (перекрывается RUST_LOG)
    #[arg(long, default_value = DEFAULT_FILTER)]
    log_level: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    println!("🔍 Загрузка конфигурации...");
    let mut params = match &cli.config {
        Some(path) => GenerationParams::from_toml_file(path)?,
        None => GenerationParams::default(),
    };
    if let Some(seed) = cli.seed {
        params.seed = seed;
    }
    if let Some(points) = cli.points {
        params.point_count = points;
    }

    println!(
        "Генерация карты (размер: {}, точек: {}, сид: {})...",
        params.size, params.point_count, params.seed
    );
    let map = generate(&params)?;
    let summary = summarize(&map);

    println!(
        "Полигонов: {}, суша: {}, океан: {}, озёра: {} ({} полигонов), материков: {}",
        summary.centers,
        summary.land_centers,
        summary.ocean_centers,
        summary.lakes,
        summary.lake_centers,
        summary.landmasses
    );
    println!(
        "Рёбер с реками: {}, максимальный поток: {}",
        summary.river_edges, summary.max_river_flow
    );
    for (biome, count) in &summary.biomes {
        println!("  {biome}: {count}");
    }

    println!("Сохранение в {:?}", cli.output);
    serde_json::to_writer(BufWriter::new(File::create(&cli.output)?), &map)?;

    if let Some(path) = &cli.summary {
        serde_json::to_writer_pretty(BufWriter::new(File::create(path)?), &summary)?;
    }

    println!("\nГотово! Карта сохранена.");
    Ok(())
}
