//! URL field example
//!
//! Tokenizes a URL with the structural tokenizer and prints the resulting
//! lines and token kinds, including the dimming of empty-valued query pairs.

use inline_editor::{StaticMacros, Tokenizer};
use inline_editor_tokenizers::{UrlLayout, UrlTokenizer};
use std::rc::Rc;

fn main() {
    let mut macros = StaticMacros::new();
    macros.set("HOST", "api.example.com");
    macros.set("EMPTY", "");

    let tokenizer = UrlTokenizer::new(UrlLayout::MultiLine).with_provider(Rc::new(macros));

    for url in [
        "https://${HOST}/v1/items?page=1&filter=${EMPTY}#results",
        "a.com",
        "",
    ] {
        println!("url: {url:?}");
        let tokenization = tokenizer.tokenize(url);
        for line in &tokenization.lines {
            let tokens: Vec<String> = line
                .tokens()
                .iter()
                .map(|t| format!("{:?}({:?})", t.text, t.kind))
                .collect();
            println!("  row {} @ {:>3}: {}", line.index, line.offset, tokens.join(" "));
        }
        if !tokenization.macro_names.is_empty() {
            println!("  macros: {:?}", tokenization.macro_names);
        }
        println!();
    }
}
