pub mod mirror;
pub mod report;

use colored::Colorize;

pub fn print_banner() {
    let banner = r#"
     _ _                  _
 ___(_) |_ ___ _ __ ___ (_)_ __ _ __ ___  _ __
/ __| | __/ _ \ '_ ` _ \| | '__| '__/ _ \| '__|
\__ \ | ||  __/ | | | | | | |  | | | (_) | |
|___/_|\__\___|_| |_| |_|_|_|  |_|  \___/|_|
"#;
    println!("{}", banner.bright_cyan());
    println!(
        "  {} {}\n",
        "offline website mirror".bright_white(),
        format!("v{}", env!("CARGO_PKG_VERSION")).bright_black()
    );
}
