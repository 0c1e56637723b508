use clap::Parser;
use payer_scout::utils::{logger, validation::Validate};
use payer_scout::{
    Cli, Command, DomainExtractPipeline, Engine, LocalStorage, SearchPipeline, SearchSettings,
    TargetListPipeline,
};

async fn run(command: Command, storage: LocalStorage) -> payer_scout::Result<String> {
    match command {
        Command::Domains(args) => {
            args.validate()?;
            Engine::new(DomainExtractPipeline::new(storage, args))
                .run()
                .await
        }
        Command::Targets(args) => {
            args.validate()?;
            Engine::new(TargetListPipeline::new(storage, args))
                .run()
                .await
        }
        Command::Search(args) => {
            args.validate()?;
            let settings = SearchSettings::resolve(&args)?;
            Engine::new(SearchPipeline::new(storage, args, settings))
                .run()
                .await
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logger::init_cli_logger(cli.verbose);
    tracing::info!("Starting payer-scout");

    let storage = LocalStorage::new(".".to_string());

    match run(cli.command, storage).await {
        Ok(output_path) => {
            println!("✅ Pipeline completed successfully!");
            println!("📁 Output saved to: {}", output_path);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Pipeline failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }
}
