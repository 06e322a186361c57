use anyhow::Context;
use clap::Parser;
use population_import::adapters::PopulationSummary;
use population_import::utils::error::ErrorSeverity;
use population_import::utils::logger;
use population_import::{
    CliConfig, CsvPopulationParser, ImportError, ImportOrchestrator, IndividualTemplate,
    PopulationArchive, TracingProgress,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting population-import");
    tracing::debug!("CLI config: {:?}", config);

    let settings = match config.resolve() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("Configuration validation failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(exit_code(&e));
        }
    };

    let individual = IndividualTemplate::from_file(&settings.individual_template).with_context(|| {
        format!(
            "loading individual template {}",
            settings.individual_template.display()
        )
    })?;

    let parser = Arc::new(CsvPopulationParser::new().with_delimiter(settings.delimiter));
    let orchestrator =
        ImportOrchestrator::new(parser, Arc::new(TracingProgress::new()), settings.options.clone());

    let cancel = CancellationToken::new();
    let ctrl_c_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, cancelling import");
            ctrl_c_token.cancel();
        }
    });

    let population = match orchestrator
        .create_for(&settings.files, &individual, &cancel)
        .await
    {
        Ok(population) => population,
        Err(e) => {
            tracing::error!(
                "❌ Population import failed: {} (Severity: {:?})",
                e,
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(exit_code(&e));
        }
    };

    let summary = PopulationSummary::from_population(&population);
    for file in &summary.files {
        tracing::info!(
            "📁 {}: {} individuals, {} warnings",
            file.file_path.display(),
            file.number_of_individuals,
            file.warnings.len()
        );
    }
    println!(
        "✅ Imported {} individuals from {} files ({} advanced parameters)",
        summary.number_of_individuals,
        summary.files.len(),
        summary.advanced_parameters.len()
    );

    if settings.archive {
        let target = PopulationArchive::new(&settings.output_path)
            .write(&population)
            .await
            .context("writing population archive")?;
        println!("📁 Output saved to: {}", target.display());
    }

    Ok(())
}

fn exit_code(error: &ImportError) -> i32 {
    if error.is_cancelled() {
        return 130;
    }
    match error.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}
