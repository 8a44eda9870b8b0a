mod application;
mod domain;
mod infrastructure;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;

use application::config::IcoConfig;
use application::error::ApplicationError;
use application::ico_service::IcoService;
use infrastructure::image_codec::DefaultImageCodec;

const USAGE: &str = "
Usage: create_ico_image [source.png] [output.ico]
The source PNG file should be 256x256 with 32-bit color.
Sources may also be http(s):// or data: URLs.

Environment:
  ICO_TARGET_SIZES     comma separated sizes, default 16,24,32,48
  ICO_RESIZE_FILTER    nearest | triangle | catmullrom | gaussian | lanczos3
  ICO_PARALLEL_RESIZE  true | false
";

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() != 2 {
        println!("{}", USAGE);
        return ExitCode::from(2);
    }
    let (source, output) = (&args[0], &args[1]);

    match run(source, output).await {
        Ok(()) => {
            println!("Wrote output: {}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            if let Some(ApplicationError::SourceNotFound(path)) = e.downcast_ref::<ApplicationError>() {
                eprintln!("File does not exist: {}", path);
                println!("{}", USAGE);
            } else {
                eprintln!("Error occurred creating new ICO file: {:?}", e);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(source: &str, output: &str) -> anyhow::Result<()> {
    let config = IcoConfig::from_env()?;
    let codec = Arc::new(DefaultImageCodec::new(config.resize_filter));
    let service = IcoService::new(codec, config);

    service
        .create_icon(source, output)
        .await
        .with_context(|| format!("Cannot create {} from {}", output, source))?;
    Ok(())
}
