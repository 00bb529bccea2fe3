//! Chapter 1: a red sphere on a cream background, drawn with a single frame.

mod chapter;
mod shader;

use firstlight_engine::device::GpuInit;
use firstlight_engine::logging::{init_logging, LoggingConfig};
use firstlight_engine::window::Runtime;

use chapter::Chapter01;

fn main() {
    init_logging(LoggingConfig::default());

    let chapter = Chapter01::new();
    let config = chapter.view().runtime_config(chapter::TITLE);

    if let Err(err) = Runtime::run(config, GpuInit::default(), chapter) {
        log::error!("fatal: {err:#}");
        std::process::exit(1);
    }
}
