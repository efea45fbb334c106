mod application;
mod config;
mod domain;
mod infrastructure;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;

use application::error::ApplicationError;
use application::frame_service::FrameService;
use config::FrameConfig;
use domain::display_trait::Display;
use domain::typeface::FontProvider;
use infrastructure::external_image_fetcher::DefaultExternalImageFetcher;
use infrastructure::file_display::PngFileDisplay;
use infrastructure::font_provider::SystemFontProvider;
use infrastructure::http_client::ReqwestHttpClient;
use infrastructure::image_processor::DefaultImageProcessor;
use infrastructure::wikimedia_source::WikimediaSource;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // 表示は更新されていない
            match e.downcast_ref::<ApplicationError>() {
                Some(app_err) => log::error!("An error occurred ({}): {:#}", app_err.kind(), e),
                None => log::error!("An error occurred: {:#}", e),
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<()> {
    log::info!("Starting wiki_frame");
    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => {
            log::info!("Loading configuration from {}", path.display());
            FrameConfig::from_file(&path)?
        }
        None => FrameConfig::default(),
    };

    let http = ReqwestHttpClient::new(&config.http).context("building the HTTP client")?;
    let typeface = SystemFontProvider::new(config.caption.font_paths.clone(), config.caption.font_size).typeface();

    let service = FrameService::new(
        Box::new(WikimediaSource::new(Box::new(http.clone()), &config.source)),
        Box::new(DefaultExternalImageFetcher::new(Box::new(http))),
        Box::new(DefaultImageProcessor::new(typeface, config.caption.style())),
    );

    // ディスプレイは一度だけ作って注入する
    let mut display = PngFileDisplay::new(&config.display);
    display.set_border(config.display.border_color);
    log::info!(
        "Rendering to a {} panel at {}",
        display.resolution(),
        display.output_path().display()
    );

    service.run(&mut display)?;
    Ok(())
}
