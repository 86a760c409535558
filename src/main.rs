use clap::Parser;
use fragx::core::ConfigProvider;
use fragx::utils::{logger, validation::Validate};
use fragx::{CliConfig, ExtractionResult, FragmentEngine, FragmentError, FragmentPipeline, LocalStorage};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliConfig::parse();

    if args.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("Starting fragx");

    let config = match args.resolve() {
        Ok(config) => config,
        Err(e) => fail("Failed to load configuration", &e),
    };
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        fail("Configuration validation failed", &e);
    }

    display_config_summary(&config);

    let storage = LocalStorage::new(config.output_path().to_string());
    let dry_run = config.dry_run;
    let print = config.print;
    let pipeline = match FragmentPipeline::new(storage, config) {
        Ok(pipeline) => pipeline,
        Err(e) => fail("Invalid marker syntax", &e),
    };
    let engine = FragmentEngine::new(pipeline);

    if dry_run || print {
        let result = match engine.collect().await {
            Ok(result) => result,
            Err(e) => fail("Fragment extraction failed", &e),
        };
        if dry_run {
            perform_dry_run(&result);
        } else {
            print_fragments(&result);
        }
        return Ok(());
    }

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("Fragment extraction completed");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => fail("Fragment extraction failed", &e),
    }

    Ok(())
}

fn fail(context: &str, e: &FragmentError) -> ! {
    tracing::error!(
        "❌ {}: {} (Category: {:?}, Severity: {:?})",
        context,
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    std::process::exit(e.exit_code());
}

fn display_config_summary(config: &CliConfig) {
    tracing::info!("📋 Configuration Summary:");
    if let Some(name) = &config.project_name {
        tracing::info!("  Project: {}", name);
    }
    tracing::info!("  Sources: {}", config.sources().join(", "));
    if !config.extensions().is_empty() {
        tracing::info!("  Extensions: {}", config.extensions().join(", "));
    }
    tracing::info!("  Comment prefixes: {}", config.comment_prefixes().join(" "));
    tracing::info!("  Output: {}", config.output_path());
    tracing::info!("  Formats: {}", config.output_formats().join(", "));
    if config.zip_enabled() {
        tracing::info!("  ZIP bundle enabled");
    }
    if !config.only().is_empty() {
        tracing::info!("  Only: {}", config.only().join(", "));
    }
}

fn perform_dry_run(result: &ExtractionResult) {
    println!("🔍 Dry Run Analysis:");
    for file in &result.files {
        println!("  {} ({} fragments)", file.path.display(), file.fragments.len());
        for fragment in &file.fragments {
            println!(
                "    {} lines {}-{}",
                fragment.name,
                fragment.section.begin_line + 1,
                fragment.section.end_line + 1
            );
        }
    }
    for skipped in &result.skipped {
        println!("  ⚠️ {} skipped (marker error)", skipped.display());
    }
    println!("✅ Dry run complete, nothing was written.");
}

fn print_fragments(result: &ExtractionResult) {
    // a single fragment is printed bare so it can be piped
    if result.fragment_count() == 1 {
        if let Some(fragment) = result.files.iter().flat_map(|f| &f.fragments).next() {
            println!("{}", fragment.text);
        }
        return;
    }

    for file in &result.files {
        for fragment in &file.fragments {
            println!("# {}:{}", file.path.display(), fragment.name);
            println!("{}", fragment.text);
            println!();
        }
    }
}
