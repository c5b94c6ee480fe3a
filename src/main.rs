use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use log::{info, warn};
#[macro_use]
extern crate text_io;

use wordplay::scrabble::config::GameConfig;
use wordplay::scrabble::dictionary::Dictionary;
use wordplay::scrabble::{GaddagAlgorithm, Rack, ScrabbleAlgorithm, Trie, TrieBuilder};

fn setup_logger(matches: &ArgMatches) -> Result<()> {
    let level = match matches.get_count("verbose") {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    let log_dispatcher = fern::Dispatch::new().format(|out, message, record| {
        out.finish(format_args!(
            "{}[{}][{}] {}",
            chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
            record.target(),
            record.level(),
            message
        ))
    });

    if let Some(log_file) = matches.get_one::<String>("logfile") {
        log_dispatcher
            .chain(
                fern::Dispatch::new()
                    .level(log::LevelFilter::Debug)
                    .chain(fern::log_file(log_file)?),
            )
            .chain(fern::Dispatch::new().level(level).chain(io::stderr()))
            .apply()?
    } else {
        log_dispatcher.level(level).chain(io::stderr()).apply()?
    }
    Ok(())
}

/// Loads the trie from the cache if there is one, otherwise builds it from the
/// word list and writes the cache
fn load_trie(dictionary: &str, cache: Option<&String>) -> Result<Trie> {
    if let Some(cache) = cache {
        if Path::new(cache).exists() {
            match Trie::load(cache) {
                Ok(trie) => return Ok(trie),
                Err(e) => warn!("Ignoring trie cache {}: {}", cache, e),
            }
        }
    }

    let words = Dictionary::from_file(dictionary)
        .with_context(|| format!("Failed to read dictionary {}", dictionary))?;
    let trie = TrieBuilder::build_from_dictionary(&words)?;
    if let Some(cache) = cache {
        if let Err(e) = trie.save(cache) {
            warn!("Could not write trie cache {}: {}", cache, e);
        }
    }
    Ok(trie)
}

fn read_rack(config: &GameConfig, matches: &ArgMatches) -> Result<Rack> {
    let text = match matches.get_one::<String>("rack") {
        Some(text) => text.clone(),
        None => {
            println!("Enter rack (use * for blanks):");
            let line: String =
                try_read!("{}\n").map_err(|e| anyhow!("Could not read the rack: {}", e))?;
            line
        }
    };
    Ok(config.parse_rack(&text)?)
}

fn main() -> Result<()> {
    let matches = Command::new("wordplay")
        .about("Finds a tile placement for a rack on a crossword game board")
        .arg(
            Arg::new("dictionary")
                .short('d')
                .long("dictionary")
                .value_name("file")
                .help("Word list with one word per line")
                .required(true)
                .num_args(1),
        )
        .arg(
            Arg::new("board")
                .short('b')
                .long("board")
                .value_name("file")
                .help("Board drawn as text. Uppercase letters are tiles, lowercase letters are blanks")
                .num_args(1),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("file")
                .help("JSON game rules: board size, bonus squares, letter values and bingo")
                .num_args(1),
        )
        .arg(
            Arg::new("rack")
                .short('r')
                .long("rack")
                .help("Tiles to play, * for a blank. Read from stdin when left out")
                .num_args(1),
        )
        .arg(
            Arg::new("policy")
                .short('p')
                .long("policy")
                .help("How to choose among the legal moves")
                .num_args(1)
                .value_parser(["highest", "longest", "random"])
                .default_value("highest"),
        )
        .arg(
            Arg::new("cache")
                .long("cache")
                .value_name("file")
                .help("Trie cache, written after building from the dictionary and read on later runs")
                .num_args(1),
        )
        .arg(
            Arg::new("logfile")
                .long("logfile")
                .value_name("file")
                .help("Name of debug logfile")
                .num_args(1),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log more, repeat for more detail")
                .action(ArgAction::Count),
        )
        .get_matches();

    setup_logger(&matches)?;

    let config = match matches.get_one::<String>("config") {
        Some(path) => GameConfig::from_file(path)
            .with_context(|| format!("Failed to read config {}", path))?,
        None => GameConfig::default(),
    };
    let mut board = match matches.get_one::<String>("board") {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read board {}", path))?;
            config.board_from_text(&text)?
        }
        None => config.new_board()?,
    };

    let dictionary = matches
        .get_one::<String>("dictionary")
        .ok_or_else(|| anyhow!("--dictionary is required"))?;
    let trie = load_trie(dictionary, matches.get_one::<String>("cache"))?;
    let algorithm = GaddagAlgorithm::new(Arc::new(trie));

    let rack = read_rack(&config, &matches)?;
    let policy = matches
        .get_one::<String>("policy")
        .map(String::as_str)
        .unwrap_or("highest");
    info!("Searching {} with the {} policy", rack, policy);

    let mut rng = rand::thread_rng();
    let chosen = match policy {
        "longest" => algorithm.longest_placement(&board, &rack)?,
        "random" => algorithm.random_placement(&board, &rack, &mut rng)?,
        _ => algorithm.highest_score_placement(&board, &rack, &mut rng)?,
    };

    match chosen {
        Some(placements) => {
            let words = board.words_formed(&placements);
            let score = board.place(&placements)?;
            print!("{}", board);
            let tiles: Vec<String> = placements.iter().map(|p| p.to_string()).collect();
            println!("Placed {}", tiles.join(" "));
            println!("Words: {}", words.join(", ").to_uppercase());
            println!("Score: {}", score);
        }
        None => println!("Unable to play."),
    }
    Ok(())
}
