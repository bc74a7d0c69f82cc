use super::*;

fn vocab(words: &[&str]) -> BTreeSet<String> {
    words.iter().map(|w| w.to_string()).collect()
}

#[test]
fn splits_respect_min_size() {
    let splitter = TokenSplitter::new(3, 2);
    assert_eq!(
        splitter.splits("fireball"),
        vec![
            vec!["fir".to_string(), "eball".to_string()],
            vec!["fire".to_string(), "ball".to_string()],
            vec!["fireb".to_string(), "all".to_string()],
        ]
    );
    assert!(splitter.splits("fires").is_empty());
}

#[test]
fn three_piece_splits_need_room() {
    let splitter = TokenSplitter::new(3, 3);
    let splits = splitter.splits("abcdefghi");
    assert!(splits.contains(&vec!["abc".to_string(), "def".to_string(), "ghi".to_string()]));
    assert!(splits.iter().all(|split| split.iter().all(|piece| piece.len() >= 3)));
}

#[test]
fn compound_splits_into_known_words() {
    let splitter = TokenSplitter::new(3, 2);
    assert_eq!(
        splitter.best_split("fireball", &vocab(&["fire", "ball"])),
        Some(vec!["fire".to_string(), "ball".to_string()])
    );
}

#[test]
fn balanced_split_wins() {
    let splitter = TokenSplitter::new(3, 2);
    assert_eq!(
        splitter.best_split("fireball", &vocab(&["fir", "eball", "fire", "ball"])),
        Some(vec!["fire".to_string(), "ball".to_string()])
    );
}

#[test]
fn equally_good_splits_leave_token_whole() {
    let splitter = TokenSplitter::new(3, 2);
    assert_eq!(
        splitter.best_split("carpets", &vocab(&["car", "pets", "carp", "ets"])),
        None
    );
}

#[test]
fn fewer_pieces_win() {
    let splitter = TokenSplitter::new(3, 3);
    let words = vocab(&["fire", "ball", "fireball", "storm"]);
    assert_eq!(
        splitter.best_split("fireballstorm", &words),
        Some(vec!["fireball".to_string(), "storm".to_string()])
    );
}

#[test]
fn non_letters_are_ignored() {
    let splitter = TokenSplitter::new(3, 2);
    assert_eq!(
        splitter.best_split("fire_ball", &vocab(&["fire", "ball"])),
        Some(vec!["fire".to_string(), "ball".to_string()])
    );
    assert_eq!(splitter.best_split("firexball", &vocab(&["fire", "ball"])), None);
}

#[test]
fn spread_matches_variance_order() {
    let even = vec!["abcd".to_string(), "efgh".to_string()];
    let uneven = vec!["abc".to_string(), "defgh".to_string()];
    assert_eq!(length_spread(&even), 0);
    assert!(length_spread(&uneven) > length_spread(&even));
}
