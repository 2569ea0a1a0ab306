use sitemirror::command_argument_builder;
use sitemirror::handlers::{handle_mirror, report_format};
use sitemirror_core::print_banner;
use sitemirror_core::report::ReportFormat;

#[tokio::main]
async fn main() {
    let matches = command_argument_builder().get_matches();

    if !matches.get_flag("quiet") && report_format(&matches) != ReportFormat::Json {
        print_banner();
    }

    if let Err(e) = handle_mirror(&matches).await {
        eprintln!("✗ {:#}", e);
        std::process::exit(1);
    }
}
