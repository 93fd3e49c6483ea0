use anyhow::Context;
use clap::Parser;
use puzzle_gen::config::toml_config::TomlConfig;
use puzzle_gen::core::ConfigProvider;
use puzzle_gen::utils::error::ErrorSeverity;
use puzzle_gen::utils::{logger, validation::Validate};
use puzzle_gen::{LocalStorage, PuzzleEngine, PuzzlePipeline};

#[derive(Parser)]
#[command(name = "toml-puzzle")]
#[command(about = "Puzzle generator driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "puzzle.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the word soup seed from config
    #[arg(long)]
    seed: Option<u64>,

    /// Dry run - check inputs without writing anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 載入 TOML 配置
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 初始化日誌
    if config.json_logging() {
        logger::init_json_logger(config.log_level());
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting TOML-based puzzle generator");
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 應用命令列覆蓋設定
    if let Some(seed) = args.seed {
        config.soup.get_or_insert_with(Default::default).seed = Some(seed);
        tracing::info!("🔧 Seed overridden to: {}", seed);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    display_config_summary(&config);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No output will be written");
        perform_dry_run(&config)?;
        return Ok(());
    }

    let storage = LocalStorage::new(".".to_string());
    let pipeline = PuzzlePipeline::new(storage, config);
    let engine = PuzzleEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Puzzle generated successfully!");
            println!("✅ Puzzle generated successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Puzzle generation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig) {
    let settings = config.soup_settings();
    tracing::info!("📋 Puzzle: {} ({:?})", config.puzzle.name, config.puzzle.kind);
    if let Some(words) = config.words_file() {
        tracing::info!("   Words: {}", words);
    }
    if let Some(layout) = config.layout_file() {
        tracing::info!("   Layout: {}", layout);
    }
    tracing::info!(
        "   Soup: min {} / padding {} / {} attempts / {} filler letters",
        settings.min_grid_size,
        settings.padding,
        settings.max_attempts,
        settings.alphabet.len()
    );
    tracing::info!(
        "   Output: {} as {} (zip: {})",
        config.output_path(),
        config.output_formats().join(", "),
        config.compress()
    );
}

/// 只讀取並檢查輸入檔案，不產生任何輸出
fn perform_dry_run(config: &TomlConfig) -> anyhow::Result<()> {
    if let Some(path) = config.words_file() {
        let data = std::fs::read(path).with_context(|| format!("reading word list {}", path))?;
        let words = puzzle_gen::app::pipelines::parse_word_list(&data)
            .with_context(|| format!("parsing word list {}", path))?;
        let grid_size = config.soup_settings().grid_size_for(&words);
        tracing::info!("✅ {} words, grid would be {}x{}", words.len(), grid_size, grid_size);
    }

    if let Some(path) = config.layout_file() {
        let data = std::fs::read(path).with_context(|| format!("reading layout {}", path))?;
        let layout = puzzle_gen::app::pipelines::parse_layout(&data)
            .with_context(|| format!("parsing layout {}", path))?;
        tracing::info!(
            "✅ Layout {}x{} with {} entries",
            layout.rows,
            layout.cols,
            layout.entries.len()
        );
    }

    Ok(())
}
