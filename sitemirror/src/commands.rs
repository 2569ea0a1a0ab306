use crate::CLAP_STYLING;
use clap::arg;

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("sitemirror")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("sitemirror")
        .about("Mirror a website into a local directory for offline browsing")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and progress output").required(false))
        .arg(
            arg!(-u --"url" <URL>)
                .required(true)
                .help("The URL to mirror (https:// is assumed when no scheme is given)"),
        )
        .arg(
            arg!(-d --"depth" <DEPTH>)
                .required(false)
                .help("Maximum page depth to follow; resources are always fetched")
                .value_parser(clap::value_parser!(usize))
                .default_value("1"),
        )
        .arg(
            arg!(-n --"concurrency" <NUM>)
                .required(false)
                .help("Maximum number of concurrent downloads")
                .value_parser(clap::value_parser!(usize))
                .default_value("5"),
        )
        .arg(
            arg!(-w --"workers" <NUM_WORKERS>)
                .required(false)
                .help("The number of async workers draining the queue (default: concurrency)")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            arg!(-t --"timeout" <SECONDS>)
                .required(false)
                .help("HTTP client timeout in seconds")
                .value_parser(clap::value_parser!(u64))
                .default_value("30"),
        )
        .arg(
            arg!(-o --"output" <PATH>)
                .required(false)
                .help("Directory in which the <host> mirror directory is created")
                .default_value("."),
        )
        .arg(
            arg!(-f --"format" <FORMAT>)
                .required(false)
                .help("Summary report format: text, json")
                .value_parser(["text", "json"])
                .default_value("text"),
        )
}
