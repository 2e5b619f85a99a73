use nom::{
    branch::alt,
    bytes::complete::{tag, take_till, take_till1, take_until, take_while1},
    character::complete::{char, multispace0},
    combinator::{map, opt, value},
    multi::many0,
    sequence::{delimited, preceded, terminated},
    Parser,
};

type IResult<I, O> = nom::IResult<I, O>;

pub const MISSING_TITLE: &str = "Título não encontrado";

/// Elements whose content is not markup.
const RAW_TEXT: [&str; 4] = ["script", "style", "title", "textarea"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    Open {
        name: String,
        attrs: Vec<(String, String)>,
        self_closing: bool,
    },
    Close(String),
    Text(&'a str),
    Other,
}

impl Token<'_> {
    fn is_open(&self, tag_name: &str) -> bool {
        matches!(self, Token::Open { name, .. } if name == tag_name)
    }

    fn is_close(&self, tag_name: &str) -> bool {
        matches!(self, Token::Close(name) if name == tag_name)
    }

    fn has_class(&self, class: &str) -> bool {
        match self {
            Token::Open { attrs, .. } => attrs
                .iter()
                .filter(|(k, _)| k == "class")
                .any(|(_, v)| v.split_whitespace().any(|c| c == class)),
            _ => false,
        }
    }
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '-' | '_' | ':')
}

fn tag_name(input: &str) -> IResult<&str, String> {
    map(take_while1(is_name_char), |s: &str| s.to_ascii_lowercase()).parse(input)
}

fn attr_value(input: &str) -> IResult<&str, &str> {
    alt((
        delimited(char('"'), take_till(|c| c == '"'), char('"')),
        delimited(char('\''), take_till(|c| c == '\''), char('\'')),
        take_till1(|c: char| c.is_whitespace() || c == '>'),
    ))
    .parse(input)
}

fn attribute(input: &str) -> IResult<&str, (String, String)> {
    let (input, name) = preceded(
        multispace0,
        take_while1(|c: char| !c.is_whitespace() && !matches!(c, '=' | '>' | '/' | '"' | '\'')),
    )
    .parse(input)?;
    let (input, v) = opt(preceded(
        (multispace0, char('='), multispace0),
        attr_value,
    ))
    .parse(input)?;
    Ok((
        input,
        (name.to_ascii_lowercase(), v.map(decode_entities).unwrap_or_default()),
    ))
}

fn open_tag(input: &str) -> IResult<&str, Token<'_>> {
    let (input, (name, attrs, slash)) = delimited(
        char('<'),
        (
            tag_name,
            many0(attribute),
            preceded(multispace0, opt(char('/'))),
        ),
        char('>'),
    )
    .parse(input)?;
    Ok((
        input,
        Token::Open {
            name,
            attrs,
            self_closing: slash.is_some(),
        },
    ))
}

fn close_tag(input: &str) -> IResult<&str, Token<'_>> {
    map(
        delimited(tag("</"), terminated(tag_name, multispace0), char('>')),
        Token::Close,
    )
    .parse(input)
}

fn comment(input: &str) -> IResult<&str, Token<'_>> {
    value(
        Token::Other,
        delimited(tag("<!--"), take_until("-->"), tag("-->")),
    )
    .parse(input)
}

/// `<!DOCTYPE ...>` and `<?xml ...?>`.
fn declaration(input: &str) -> IResult<&str, Token<'_>> {
    value(
        Token::Other,
        (alt((tag("<!"), tag("<?"))), take_till(|c| c == '>'), char('>')),
    )
    .parse(input)
}

fn text(input: &str) -> IResult<&str, Token<'_>> {
    map(take_till1(|c| c == '<'), Token::Text).parse(input)
}

fn token(input: &str) -> IResult<&str, Token<'_>> {
    alt((comment, declaration, close_tag, open_tag, text)).parse(input)
}

/// Split `input` at the closing tag of a raw text element, case-insensitively.
fn raw_text<'a>(input: &'a str, name: &str) -> (&'a str, &'a str) {
    let needle = format!("</{name}");
    let found = input.to_ascii_lowercase().find(&needle);
    match found {
        Some(pos) => input.split_at(pos),
        None => (input, ""),
    }
}

/// Lenient tokenizer, a stray `<` becomes text.
pub fn tokenize(mut input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    while !input.is_empty() {
        match token(input) {
            Ok((rest, tok)) => {
                input = rest;
                let raw = match &tok {
                    Token::Open {
                        name,
                        self_closing: false,
                        ..
                    } if RAW_TEXT.contains(&name.as_str()) => Some(name.clone()),
                    _ => None,
                };
                tokens.push(tok);
                if let Some(name) = raw {
                    let (content, rest) = raw_text(input, &name);
                    if !content.is_empty() {
                        tokens.push(Token::Text(content));
                    }
                    input = rest;
                }
            }
            Err(_) => {
                let n = input.chars().next().map_or(1, char::len_utf8);
                let (stray, rest) = input.split_at(n);
                tokens.push(Token::Text(stray));
                input = rest;
            }
        }
    }
    tokens
}

/// Latin-1 named entities, `&nbsp;` (U+00A0) through `&yuml;` (U+00FF) in code point order.
const LATIN1: [&str; 96] = [
    "nbsp", "iexcl", "cent", "pound", "curren", "yen", "brvbar", "sect", "uml", "copy",
    "ordf", "laquo", "not", "shy", "reg", "macr", "deg", "plusmn", "sup2", "sup3", "acute",
    "micro", "para", "middot", "cedil", "sup1", "ordm", "raquo", "frac14", "frac12",
    "frac34", "iquest", "Agrave", "Aacute", "Acirc", "Atilde", "Auml", "Aring", "AElig",
    "Ccedil", "Egrave", "Eacute", "Ecirc", "Euml", "Igrave", "Iacute", "Icirc", "Iuml",
    "ETH", "Ntilde", "Ograve", "Oacute", "Ocirc", "Otilde", "Ouml", "times", "Oslash",
    "Ugrave", "Uacute", "Ucirc", "Uuml", "Yacute", "THORN", "szlig", "agrave", "aacute",
    "acirc", "atilde", "auml", "aring", "aelig", "ccedil", "egrave", "eacute", "ecirc",
    "euml", "igrave", "iacute", "icirc", "iuml", "eth", "ntilde", "ograve", "oacute",
    "ocirc", "otilde", "ouml", "divide", "oslash", "ugrave", "uacute", "ucirc", "uuml",
    "yacute", "thorn", "yuml",
];

/// Named entities outside Latin-1 that show up in page text.
const EXTRA: [(&str, char); 14] = [
    ("amp", '&'),
    ("lt", '<'),
    ("gt", '>'),
    ("quot", '"'),
    ("apos", '\''),
    ("ndash", '\u{2013}'),
    ("mdash", '\u{2014}'),
    ("lsquo", '\u{2018}'),
    ("rsquo", '\u{2019}'),
    ("ldquo", '\u{201c}'),
    ("rdquo", '\u{201d}'),
    ("bull", '\u{2022}'),
    ("hellip", '\u{2026}'),
    ("euro", '\u{20ac}'),
];

fn named_entity(name: &str) -> Option<char> {
    if let Some(i) = LATIN1.iter().position(|n| *n == name) {
        return char::from_u32(0xa0 + i as u32);
    }
    EXTRA.iter().find(|(n, _)| *n == name).map(|(_, c)| *c)
}

fn entity(input: &str) -> IResult<&str, char> {
    let numeric = |s: &str, radix| u32::from_str_radix(s, radix).ok().and_then(char::from_u32);
    let (rest, name) = delimited(
        char('&'),
        take_while1(|c: char| c.is_ascii_alphanumeric() || c == '#'),
        char(';'),
    )
    .parse(input)?;
    let c = match name.strip_prefix('#') {
        Some(num) => match num.strip_prefix(['x', 'X']) {
            Some(hex) => numeric(hex, 16),
            None => numeric(num, 10),
        },
        None => named_entity(name),
    };
    match c {
        Some(c) => Ok((rest, c)),
        None => Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Char,
        ))),
    }
}

/// Decode Latin-1 and common typographic named entities plus numeric
/// references. Names are case-sensitive, unknown entities are kept verbatim.
pub fn decode_entities(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        match entity(rest) {
            Ok((after, c)) => {
                out.push(c);
                rest = after;
            }
            Err(_) => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

pub fn page_title(tokens: &[Token<'_>]) -> Option<String> {
    let start = tokens.iter().position(|t| t.is_open("title"))?;
    let mut title = String::new();
    for tok in &tokens[start + 1..] {
        match tok {
            Token::Text(s) => title.push_str(&decode_entities(s)),
            t if t.is_close("title") => break,
            _ => {}
        }
    }
    let title = title.split_whitespace().collect::<Vec<_>>().join(" ");
    (!title.is_empty()).then_some(title)
}

/// Text content of the first `tag_name` element carrying `class`.
///
/// Nested elements of the same name are balanced, `<br>` becomes a newline.
pub fn text_by_class(tokens: &[Token<'_>], tag_name: &str, class: &str) -> Option<String> {
    let start = tokens
        .iter()
        .position(|t| t.is_open(tag_name) && t.has_class(class))?;
    let mut depth = 1usize;
    let mut text = String::new();
    for tok in &tokens[start + 1..] {
        match tok {
            Token::Open {
                name, self_closing, ..
            } => {
                if name == "br" {
                    text.push('\n');
                } else if name == tag_name && !self_closing {
                    depth += 1;
                }
            }
            Token::Close(name) if name == tag_name => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Token::Text(s) => text.push_str(&decode_entities(s)),
            _ => {}
        }
    }
    Some(text)
}

/// `(title, lyrics)` of a chord page, `None` without a lyrics block.
pub fn extract(html: &str) -> Option<(String, String)> {
    let tokens = tokenize(html);
    let lyrics = text_by_class(&tokens, "div", "cifra_cnt")?;
    let title = page_title(&tokens).unwrap_or_else(|| MISSING_TITLE.to_string());
    Some((title, lyrics))
}
