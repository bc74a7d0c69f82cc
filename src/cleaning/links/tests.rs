use super::*;

fn catalog() -> PatternCatalog {
    PatternCatalog::default()
}

fn strip(text: &str) -> String {
    strip_links_and_images(text, &catalog()).expect("links should be stripped")
}

#[test]
fn text_without_links_is_untouched() {
    let text = "# Title\nA plain paragraph with no links.";
    assert_eq!(strip(text), text);
}

#[test]
fn links_become_their_label() {
    let text = "The ancient kingdom of Varn has a long and bloody history, see the [wiki](https://w.io) for more.";
    assert_eq!(
        strip(text),
        "The ancient kingdom of Varn has a long and bloody history, see the wiki for more."
    );
}

#[test]
fn images_are_removed_with_their_line() {
    let text = "# Map\n![world map](https://i.imgur.com/map.png)\nThe map shows the known world.";
    assert_eq!(
        strip(text),
        "# Map\nThe map shows the known world."
    );
}

#[test]
fn bare_urls_are_removed() {
    let text = "The full bestiary of the northern wastes is kept at https://example.com/b and elsewhere too.";
    assert_eq!(
        strip(text),
        "The full bestiary of the northern wastes is kept at  and elsewhere too."
    );
}

#[test]
fn mostly_link_lines_are_dropped() {
    let text = "Intro line\nCheck [this](https://example.com/a/very/long/path/to/a/page)\nOutro line";
    assert_eq!(
        strip(text),
        "Intro line\nOutro line"
    );
}

#[test]
fn headers_survive_even_when_mostly_link() {
    let text = "# [Title](https://example.com/a/very/long/path)\nBody";
    assert_eq!(strip(text), "# Title\nBody");
}

#[test]
fn linked_image_is_removed_once() {
    let text = "Intro line\n[![badge](https://img.io/b.png)](https://example.com/project)\nOutro line";
    assert_eq!(
        strip(text),
        "Intro line\nOutro line"
    );
}
