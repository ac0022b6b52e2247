use pulldown_cmark::{Options, Parser, html};

const TEMPLATE_HEAD: &str = "<!doctype html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n</head>\n<body>\n<div class=\"email-body\">\n";
const TEMPLATE_TAIL: &str = "</div>\n</body>\n</html>\n";

pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(markdown, options);
    let mut body = String::with_capacity(markdown.len() * 2);
    html::push_html(&mut body, parser);

    format!("{TEMPLATE_HEAD}{body}{TEMPLATE_TAIL}")
}
