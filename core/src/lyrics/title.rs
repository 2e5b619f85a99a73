use nom::{
    bytes::complete::{tag, take_until},
    character::complete::anychar,
    combinator::{recognize, rest, verify},
    sequence::{pair, terminated},
    Parser,
};

type IResult<I, O> = nom::IResult<I, O>;

const SEPARATOR: &str = " - ";

/// Shortest non-empty run of text ending right before the next separator.
fn segment(input: &str) -> IResult<&str, &str> {
    terminated(recognize(pair(anychar, take_until(SEPARATOR))), tag(SEPARATOR)).parse(input)
}

fn song_artist_extra(input: &str) -> IResult<&str, (&str, &str, &str)> {
    (segment, segment, verify(rest, |s: &str| !s.is_empty())).parse(input)
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Split a page title shaped like `"<song> - <artist> - <site>"`.
///
/// Anything that does not have that exact three part shape yields `(None, None)`.
pub fn parse_title(title: &str) -> (Option<String>, Option<String>) {
    if title.contains('\n') {
        return (None, None);
    }
    match song_artist_extra(title) {
        Ok((_, (song, artist, _))) => (non_empty(song), non_empty(artist)),
        Err(_) => (None, None),
    }
}
