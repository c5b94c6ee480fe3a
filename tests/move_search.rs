use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use wordplay::scrabble::bag::TileBag;
use wordplay::scrabble::config::GameConfig;
use wordplay::scrabble::dictionary::Dictionary;
use wordplay::scrabble::{GaddagAlgorithm, Rack, ScrabbleAlgorithm, Trie, TrieBuilder};

const WORDS: &[&str] = &[
    "cat", "cats", "scat", "at", "act", "acts", "tab", "tabs", "bat", "bats", "stab", "as", "sat",
    "ta", "tea", "eat", "ate", "east", "seat", "teas", "set",
];

fn plain_config(size: usize) -> GameConfig {
    GameConfig::from_json(&format!(
        r#"{{"width": {size}, "height": {size}, "layout": "none"}}"#
    ))
    .unwrap()
}

fn algorithm(dictionary: &Dictionary) -> GaddagAlgorithm {
    GaddagAlgorithm::new(Arc::new(
        TrieBuilder::build_from_dictionary(dictionary).unwrap(),
    ))
}

#[test]
fn test_moves_from_text_board() {
    let dictionary = Dictionary::from_words(WORDS.iter()).unwrap();
    let algorithm = algorithm(&dictionary);
    let config = plain_config(7);
    let board = config
        .board_from_text(
            "\
. . . . . . .
. . . . . . .
. . . . . . .
. . . C A T .
",
        )
        .unwrap();
    let rack = config.parse_rack("s").unwrap();

    let moves = algorithm.all_placements(&board, &rack).unwrap();
    let mut scored: Vec<(String, u32)> = moves
        .iter()
        .map(|m| (board.words_formed(m)[0].clone(), board.score(m, true).unwrap()))
        .collect();
    scored.sort();
    assert_eq!(
        scored,
        vec![
            ("as".to_string(), 2),
            ("cats".to_string(), 6),
            ("scat".to_string(), 6)
        ]
    );
}

#[test]
fn test_short_game() {
    let dictionary = Dictionary::from_words(WORDS.iter()).unwrap();
    let algorithm = algorithm(&dictionary);
    let config = GameConfig::default();
    let mut board = config.new_board().unwrap();
    let mut rng = StdRng::seed_from_u64(11);

    let mut total = 0;
    for rack in ["tca", "s", "abt", "ee"] {
        let rack = config.parse_rack(rack).unwrap();
        let before = board.tile_count();
        let chosen = match algorithm
            .highest_score_placement(&board, &rack, &mut rng)
            .unwrap()
        {
            Some(chosen) => chosen,
            None => continue,
        };
        for word in board.words_formed(&chosen) {
            assert!(dictionary.contains(&word), "{} is not a word", word);
        }
        total += board.place(&chosen).unwrap();
        assert_eq!(board.tile_count(), before + chosen.len());
    }

    assert!(total > 0);
    for word in board.all_words() {
        assert!(dictionary.contains(&word), "{} is not a word", word);
    }
}

#[test]
fn test_racks_drawn_from_bag() {
    let dictionary = Dictionary::from_words(WORDS.iter()).unwrap();
    let algorithm = algorithm(&dictionary);
    let board = plain_config(9)
        .board_from_text(
            "\
. . . . . . . . .
. . . . . . . . .
. . . . . . . . .
. . . . S . . . .
. . . E A T . . .
. . . . T . . . .
",
        )
        .unwrap();
    let mut rng = StdRng::seed_from_u64(5);
    let mut bag = TileBag::default();

    for _ in 0..5 {
        let mut rack = Rack::default();
        bag.fill_rack(&mut rack, &mut rng);
        let snapshot = rack.clone();
        for m in algorithm.all_placements(&board, &rack).unwrap() {
            assert!(board.validate(&m).is_ok());
            for word in board.words_formed(&m) {
                assert!(dictionary.contains(&word), "{} is not a word", word);
            }
        }
        assert_eq!(rack, snapshot);
    }
}

#[test]
fn test_cached_trie_gives_same_moves() {
    let dictionary = Dictionary::from_words(WORDS.iter()).unwrap();
    let trie = TrieBuilder::build_from_dictionary(&dictionary).unwrap();
    let path = std::env::temp_dir().join(format!("wordplay-cache-{}.bin", std::process::id()));
    trie.save(&path).unwrap();
    let cached = Trie::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    let board = GameConfig::default().new_board().unwrap();
    let rack: Rack = "tseab".parse().unwrap();
    let fresh = GaddagAlgorithm::new(Arc::new(trie))
        .all_placements(&board, &rack)
        .unwrap();
    let loaded = GaddagAlgorithm::new(Arc::new(cached))
        .all_placements(&board, &rack)
        .unwrap();
    assert!(!fresh.is_empty());
    assert_eq!(fresh.len(), loaded.len());
    for m in &fresh {
        assert!(loaded.contains(m));
    }
}
