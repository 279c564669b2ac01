use sketchwasm::build::CommandRunner;
use sketchwasm::cli::{CliArgs, OutputFormatter};
use sketchwasm::progress::{LoggingHandler, ProgressHandler};
use sketchwasm::util::logging::{config_from_env, init_logging, parse_level};
use sketchwasm::{
    CompileError, CompilerConfig, PipelineContext, PipelineOrchestrator, NAME, VERSION,
};

use clap::Parser;
use std::process;
use std::sync::Arc;
use tracing::{debug, error, info, Level};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = CliArgs::parse();
    init_logging_from_args(&args);

    debug!("{} v{} starting", NAME, VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = run(&args).await;
    process::exit(exit_code);
}

async fn run(args: &CliArgs) -> i32 {
    info!("Keep files flag: {}", args.keep_files);

    let config = match CompilerConfig::from_env().and_then(|c| c.validate().map(|_| c)) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return 1;
        }
    };
    debug!("{}", config);

    let runner = match CommandRunner::from_config(&config) {
        Ok(runner) => Arc::new(runner),
        Err(e) => {
            error!("{}", e);
            return 1;
        }
    };

    let pipeline = PipelineContext::new(config, runner, args.keep_files);
    let handler: Arc<dyn ProgressHandler> = Arc::new(LoggingHandler);
    let orchestrator = PipelineOrchestrator::new(Some(handler));

    match orchestrator.run(&pipeline).await {
        Ok(report) => {
            let formatter = OutputFormatter::new(args.format.into());
            match formatter.format(&report) {
                Ok(output) => {
                    println!("{}", output);
                    0
                }
                Err(e) => {
                    error!("Failed to format report: {:#}", e);
                    1
                }
            }
        }
        Err(e) => {
            let expected = e
                .downcast_ref::<CompileError>()
                .map(CompileError::is_expected)
                .unwrap_or(false);
            if expected {
                error!("{:#}", e);
            } else {
                error!("Unexpected failure: {:?}", e);
            }
            1
        }
    }
}

fn init_logging_from_args(args: &CliArgs) {
    let mut config = config_from_env();

    config.level = if let Some(level_str) = &args.log_level {
        parse_level(level_str)
    } else if args.verbose {
        Level::DEBUG
    } else if args.quiet {
        Level::ERROR
    } else {
        config.level
    };

    init_logging(config);
}
