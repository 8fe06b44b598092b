use std::io::{self, Read};

use tmux_pulseline::{
    config::{build_render_config, config_path, default_config_toml, load_config},
    logging,
    types::Side,
    PulseLineRunner,
};

const USAGE: &str = "tmux-pulseline: powerline status fragments for tmux

USAGE:
    tmux-pulseline                    read a segment list as JSON on stdin, print the fragment
    tmux-pulseline --session [SIDE]   print the session badge
    tmux-pulseline --windows [SIDE]   print the current and other window formats, one per line
    tmux-pulseline --print            print the effective config
    tmux-pulseline --init             write the default config file if none exists
    tmux-pulseline -h, --help         show this help

SIDE is left (default), right or center.

ENVIRONMENT:
    PULSELINE_THEME, PULSELINE_VARIANT, PULSELINE_SEPARATOR, PULSELINE_EDGE,
    PULSELINE_SPACING, PULSELINE_TRANSPARENT, PULSELINE_ICONS   override the config file
    PULSELINE_LOG                                                 stderr log filter (default warn)
";

fn main() {
    logging::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let side = || parse_side(args.get(1).map(String::as_str)).unwrap_or_else(|err| fail(&err));

    match args.first().map(String::as_str) {
        Some("-h" | "--help") => print!("{USAGE}"),
        Some("--print") => print_config(),
        Some("--init") => init_config(),
        Some("--session") => {
            let config = build_render_config(&load_config());
            println!("{}", PulseLineRunner::default().render_session(&config, side(), true));
        }
        Some("--windows") => {
            let config = build_render_config(&load_config());
            let formats = PulseLineRunner::default().render_window_formats(&config, side());
            println!("{}", formats.current);
            println!("{}", formats.other);
        }
        Some(other) => fail(&format!("unknown argument: {other}\n\n{USAGE}")),
        None => render_stdin(),
    }
}

fn parse_side(arg: Option<&str>) -> Result<Side, String> {
    match arg {
        None | Some("left") => Ok(Side::Left),
        Some("right") => Ok(Side::Right),
        Some("center") => Ok(Side::Center),
        Some(other) => Err(format!("unknown side: {other}")),
    }
}

fn render_stdin() {
    let mut input = String::new();
    if let Err(err) = io::stdin().read_to_string(&mut input) {
        fail(&format!("failed to read stdin: {err}"));
    }

    let config = build_render_config(&load_config());
    match PulseLineRunner::default().run_from_str(&input, &config) {
        Ok(line) => println!("{line}"),
        Err(err) => fail(&err.to_string()),
    }
}

fn print_config() {
    let config = build_render_config(&load_config());
    println!("config file: {}", config_path().display());
    println!("theme = {} ({})", config.theme, config.variant);
    println!("separator = {}", config.separators.main);
    println!(
        "edge = {}{}",
        config.separators.edge.style,
        if config.separators.edge.all { ":all" } else { "" }
    );
    if let Some(initial) = config.separators.initial {
        println!("initial = {initial}");
    }
    println!("spacing = {:?}", config.spacing);
    println!("transparent = {}", config.transparent);
    println!("icons = {:?}", config.glyph_mode);
    println!("contrast_threshold = {}", config.contrast_threshold);
}

fn init_config() {
    let path = config_path();
    if path.exists() {
        println!("config already exists: {}", path.display());
        return;
    }
    if let Some(parent) = path.parent() {
        if let Err(err) = std::fs::create_dir_all(parent) {
            fail(&format!("failed to create {}: {err}", parent.display()));
        }
    }
    if let Err(err) = std::fs::write(&path, default_config_toml()) {
        fail(&format!("failed to write {}: {err}", path.display()));
    }
    println!("wrote {}", path.display());
}

fn fail(message: &str) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}
