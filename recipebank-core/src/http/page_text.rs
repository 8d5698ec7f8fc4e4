use scraper::{Html, Node, Selector};

/// Upper bound on page text sent to the model.
pub const MAX_PAGE_TEXT_CHARS: usize = 20_000;

/// Elements whose text never reaches the model.
const HIDDEN_ELEMENTS: &[&str] = &[
    "script", "style", "svg", "nav", "header", "footer", "form", "button", "input", "textarea",
    "select", "iframe", "noscript", "head",
];

/// Reduce an HTML document to its visible text: hidden elements dropped, whitespace
/// collapsed to single spaces, cut to at most `max_chars` characters.
pub fn visible_text(html: &str, max_chars: usize) -> String {
    let document = Html::parse_document(html);
    let body_selector = Selector::parse("body").expect("Invalid selector");
    let root = document
        .select(&body_selector)
        .next()
        .unwrap_or_else(|| document.root_element());

    let mut text = String::new();
    for node in root.descendants() {
        let Node::Text(chunk) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| HIDDEN_ELEMENTS.contains(&el.name()))
        });
        if hidden {
            continue;
        }
        for word in chunk.split_whitespace() {
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(word);
        }
    }

    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => text[..cut].to_string(),
        None => text,
    }
}
