use scraper::{ElementRef, Html, Selector};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMetadata {
    pub h1: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Pulls the first `<h1>`, the first `<title>` and the first
/// `<meta name="description">` out of an HTML document. Malformed markup is parsed
/// leniently; missing or blank values come back as `None`.
pub fn extract_metadata(html: &str) -> PageMetadata {
    let document = Html::parse_document(html);

    PageMetadata {
        h1: first_text(&document, "h1"),
        title: first_text(&document, "title"),
        description: first_attr(&document, r#"meta[name="description"]"#, "content"),
    }
}

fn first_element<'a>(document: &'a Html, selector: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(selector).ok()?;
    document.select(&selector).next()
}

fn first_text(document: &Html, selector: &str) -> Option<String> {
    let element = first_element(document, selector)?;
    non_blank(&element.text().collect::<String>())
}

fn first_attr(document: &Html, selector: &str, attr: &str) -> Option<String> {
    let element = first_element(document, selector)?;
    non_blank(element.value().attr(attr)?)
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}
