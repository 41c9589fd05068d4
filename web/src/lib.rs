use clap::Parser;
use wasm_bindgen::prelude::*;

mod audio;
mod game;
mod scheduler;
mod utils;

#[derive(Parser, Debug, Default)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    #[command(flatten)]
    game: game::GameProps,
}

/// Options come from the location hash, e.g. `#-vv&--seed=42`.
fn parse_args(location_hash: &str) -> Result<Args, clap::Error> {
    Args::try_parse_from(location_hash.split(['#', '&']))
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window()
        .location()
        .hash()
        .unwrap_or_else(|_| "".to_string());

    let args = parse_args(&location_hash).unwrap_or_else(|err| {
        gloo::console::warn!(format!("ignoring options {:?}: {}", location_hash, err));
        Args::default()
    });
    if let Some(log_level) = args.verbose.log_level() {
        if let Err(err) = console_log::init_with_level(log_level) {
            gloo::console::warn!(format!("Error initializing logger: {}", err));
        }
    }
    log::debug!("options: {:?}", args);

    match document().get_element_by_id("game") {
        Some(root) => {
            log::debug!("App started");
            yew::Renderer::<game::GameView>::with_root_and_props(root, args.game).render();
        }
        None => {
            log::warn!("no id=\"game\" element, rendering into body");
            yew::Renderer::<game::GameView>::with_props(args.game).render();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_hash_uses_defaults() {
        let args = parse_args("").unwrap();

        assert_eq!(args.game, game::GameProps::default());
        assert_eq!(args.verbose.log_level(), Some(log::Level::Error));
    }

    #[test]
    fn hash_options_are_parsed_like_a_command_line() {
        let args = parse_args("#-vv&--seed=42&--mute").unwrap();

        assert_eq!(args.game.seed, Some(42));
        assert!(args.game.mute);
        assert_eq!(args.verbose.log_level(), Some(log::Level::Info));
    }

    #[test]
    fn quiet_disables_logging() {
        let args = parse_args("#-q").unwrap();

        assert_eq!(args.verbose.log_level(), None);
    }

    #[test]
    fn unknown_options_are_rejected() {
        assert!(parse_args("#--bombs=9").is_err());
    }
}
