//! Rule table that turns normalized command text into a [`ParsedCommand`].
//!
//! Commands are short free-form sentences such as
//! `arrange containers in a grid 3x4`. Each rule looks for its phrase
//! anywhere in the text, so surrounding words are ignored. Rules are tried in
//! order and the first one that matches wins. After a rule matches, a final
//! pass looks for an `N rows` phrase and, when present, turns the command
//! into a rows layout.
//!
//! Phrases are recognized with small winnow parsers. A phrase is located by
//! trying its parser at every character boundary of the text, which gives
//! the unanchored search a sentence-level grammar needs.

use log::{debug, trace};
use winnow::{
    Parser as _,
    combinator::{alt, opt},
    error::{ContextError, ErrMode},
    token::{literal, take_while},
};

use gantry_core::command::{Action, CommandParams, CommandPattern, ParsedCommand};

use crate::span::Span;

type Input<'src> = &'src str;
type IResult<O> = std::result::Result<O, ErrMode<ContextError>>;

/// The numbers captured by a rule, in the order the rule's builder expects.
type Numbers = [u32; 2];

/// A phrase located in the scanned text.
#[derive(Debug, Clone, Copy)]
struct Found<O> {
    /// Byte offset just past the end of the phrase.
    end: usize,
    value: O,
}

/// A number in the scanned text that does not fit in a `u32`, together with
/// the phrase it was read for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Overflow {
    span: Span,
    phrase: Span,
}

impl Overflow {
    /// Locates the first oversized run of digits inside the phrase
    /// `text[start..end]`.
    fn within(text: &str, start: usize, end: usize) -> Self {
        let phrase = &text[start..end];
        let mut run = None;
        let mut span = Span::new(start..end);
        for (offset, c) in phrase.char_indices().chain([(phrase.len(), ' ')]) {
            match (c.is_ascii_digit(), run) {
                (true, None) => run = Some(offset),
                (false, Some(from)) => {
                    if phrase[from..offset].parse::<u32>().is_err() {
                        span = Span::new(start + from..start + offset);
                        break;
                    }
                    run = None;
                }
                _ => {}
            }
        }
        Self {
            span,
            phrase: Span::new(start..end),
        }
    }

    /// The out-of-range digits.
    pub(crate) fn span(&self) -> Span {
        self.span
    }

    pub(crate) fn phrase(&self) -> Span {
        self.phrase
    }
}

type Scan<O> = Result<Option<Found<O>>, Overflow>;
type Matched = Result<Option<Numbers>, Overflow>;

/// A single entry of the rule table.
struct Rule {
    name: &'static str,
    matcher: fn(&str) -> Matched,
    builder: fn(Numbers) -> ParsedCommand,
}

/// Rules in priority order.
static RULES: [Rule; 4] = [
    Rule {
        name: "place count",
        matcher: match_place_count,
        builder: build_place_count,
    },
    Rule {
        name: "arrange grid",
        matcher: match_arrange_grid,
        builder: build_arrange_grid,
    },
    Rule {
        name: "create line",
        matcher: match_create_line,
        builder: build_create_line,
    },
    Rule {
        name: "place circle",
        matcher: match_place_circle,
        builder: build_place_circle,
    },
];

/// The outcome of running the rule table over normalized text.
#[derive(Debug, Default)]
pub(crate) struct Evaluation {
    pub(crate) command: Option<ParsedCommand>,
    /// Out-of-range numbers met while matching, in the order rules met them.
    pub(crate) overflows: Vec<Overflow>,
}

/// Runs the rule table over `text`, which must already be trimmed and
/// lowercased.
///
/// A rule whose phrase carries an out-of-range number is abandoned and
/// evaluation moves on to the next rule; the overflow is still reported so
/// that strict callers can surface it. Oversized numbers outside a complete
/// phrase are ordinary text and never reported.
pub(crate) fn evaluate(text: &str) -> Evaluation {
    let mut overflows = Vec::new();

    for rule in &RULES {
        match (rule.matcher)(text) {
            Ok(Some(numbers)) => {
                debug!(rule = rule.name; "Command rule matched");
                let command = (rule.builder)(numbers);
                let command = match find_first(text, 0, rows_count) {
                    Ok(Some(found)) => {
                        debug!(rows = found.value; "Rows phrase overrides command pattern");
                        command
                            .with_pattern(CommandPattern::Rows)
                            .with_params(CommandParams::default().with_rows(found.value))
                    }
                    Ok(None) => command,
                    Err(err) => {
                        record(&mut overflows, err);
                        command
                    }
                };
                return Evaluation {
                    command: Some(command),
                    overflows,
                };
            }
            Ok(None) => trace!(rule = rule.name; "Command rule did not match"),
            Err(err) => {
                trace!(rule = rule.name, start = err.span.start(); "Command rule hit an out-of-range number");
                record(&mut overflows, err);
            }
        }
    }

    Evaluation {
        command: None,
        overflows,
    }
}

fn record(overflows: &mut Vec<Overflow>, err: Overflow) {
    if !overflows.contains(&err) {
        overflows.push(err);
    }
}

fn match_place_count(text: &str) -> Matched {
    Ok(find_first(text, 0, place_count)?.map(|found| [found.value, 0]))
}

fn match_arrange_grid(text: &str) -> Matched {
    let Some(prefix) = find_first(text, 0, arrange_modules)? else {
        return Ok(None);
    };
    Ok(find_last(text, prefix.end, grid_dimensions)?.map(|found| {
        let (rows, columns) = found.value;
        [rows, columns]
    }))
}

fn match_create_line(text: &str) -> Matched {
    Ok(find_first(text, 0, line_count)?.map(|found| [found.value, 0]))
}

fn match_place_circle(text: &str) -> Matched {
    let Some(place) = find_first(text, 0, place_keyword)? else {
        return Ok(None);
    };
    let Some(circle) = find_first(text, place.end, circle_keyword)? else {
        return Ok(None);
    };
    Ok(find_last(text, circle.end, radius_value)?.map(|found| [found.value, 0]))
}

fn build_place_count([count, _]: Numbers) -> ParsedCommand {
    ParsedCommand::new(Action::Place).with_count(count)
}

fn build_arrange_grid([rows, columns]: Numbers) -> ParsedCommand {
    ParsedCommand::new(Action::Arrange)
        .with_pattern(CommandPattern::Grid)
        .with_params(CommandParams::default().with_rows(rows).with_columns(columns))
}

fn build_create_line([count, _]: Numbers) -> ParsedCommand {
    ParsedCommand::new(Action::Create)
        .with_count(count)
        .with_pattern(CommandPattern::Line)
}

fn build_place_circle([radius, _]: Numbers) -> ParsedCommand {
    ParsedCommand::new(Action::Place)
        .with_pattern(CommandPattern::Circle)
        .with_params(CommandParams::default().with_radius(f64::from(radius)))
}

/// Tries `parser` at every character boundary of `text` from `from` onwards
/// and returns the earliest match.
fn find_first<'src, O>(
    text: &'src str,
    from: usize,
    mut parser: impl FnMut(&mut Input<'src>) -> IResult<O>,
) -> Scan<O> {
    for offset in boundaries(text, from) {
        if let Some(found) = attempt(text, offset, &mut parser)? {
            return Ok(Some(found));
        }
    }
    Ok(None)
}

/// Like [`find_first`] but returns the match that starts last.
fn find_last<'src, O>(
    text: &'src str,
    from: usize,
    mut parser: impl FnMut(&mut Input<'src>) -> IResult<O>,
) -> Scan<O> {
    let mut last = None;
    for offset in boundaries(text, from) {
        if let Some(found) = attempt(text, offset, &mut parser)? {
            last = Some(found);
        }
    }
    Ok(last)
}

fn boundaries(text: &str, from: usize) -> impl Iterator<Item = usize> + '_ {
    text.char_indices()
        .map(|(offset, _)| offset)
        .filter(move |&offset| offset >= from)
}

fn attempt<'src, O>(
    text: &'src str,
    offset: usize,
    parser: &mut impl FnMut(&mut Input<'src>) -> IResult<O>,
) -> Scan<O> {
    let mut input: Input<'src> = &text[offset..];
    match parser(&mut input) {
        Ok(value) => Ok(Some(Found {
            end: text.len() - input.len(),
            value,
        })),
        Err(ErrMode::Cut(_)) => Err(Overflow::within(text, offset, text.len() - input.len())),
        Err(_) => Ok(None),
    }
}

/// `place N <noun>`
fn place_count(input: &mut Input<'_>) -> IResult<u32> {
    let (_, _, count, _, _) =
        (literal("place"), whitespace, number, whitespace, module_noun).parse_next(input)?;
    fits(count)
}

/// `arrange <noun>`; the grid dimensions are searched for separately.
fn arrange_modules(input: &mut Input<'_>) -> IResult<()> {
    (literal("arrange"), whitespace, module_noun)
        .void()
        .parse_next(input)
}

/// `grid RxC`
fn grid_dimensions(input: &mut Input<'_>) -> IResult<(u32, u32)> {
    let (_, _, rows, _, columns) =
        (literal("grid"), whitespace, number, literal("x"), number).parse_next(input)?;
    Ok((fits(rows)?, fits(columns)?))
}

/// `create [a] line of N`
fn line_count(input: &mut Input<'_>) -> IResult<u32> {
    let (_, _, _, _, _, _, _, count) = (
        literal("create"),
        whitespace,
        opt((literal("a"), whitespace)),
        literal("line"),
        whitespace,
        literal("of"),
        whitespace,
        number,
    )
        .parse_next(input)?;
    fits(count)
}

fn place_keyword(input: &mut Input<'_>) -> IResult<()> {
    literal("place").void().parse_next(input)
}

fn circle_keyword(input: &mut Input<'_>) -> IResult<()> {
    literal("circle").void().parse_next(input)
}

/// `radius N`
fn radius_value(input: &mut Input<'_>) -> IResult<u32> {
    let (_, _, radius) = (literal("radius"), whitespace, number).parse_next(input)?;
    fits(radius)
}

/// `N row`, which also matches `N rows`.
fn rows_count(input: &mut Input<'_>) -> IResult<u32> {
    let (rows, _, _) = (number, whitespace, literal("row")).parse_next(input)?;
    fits(rows)
}

/// Words that name a module. Only the prefix is checked, so plurals match.
fn module_noun(input: &mut Input<'_>) -> IResult<()> {
    alt((literal("container"), literal("module"), literal("hd5")))
        .void()
        .parse_next(input)
}

fn whitespace(input: &mut Input<'_>) -> IResult<()> {
    take_while(1.., |c: char| c.is_whitespace())
        .void()
        .parse_next(input)
}

fn digits<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    take_while(1.., |c: char| c.is_ascii_digit()).parse_next(input)
}

/// A run of ASCII digits, `None` when the value does not fit in `u32`.
///
/// Oversized digits still match so that the rest of the phrase decides
/// whether the number mattered.
fn number(input: &mut Input<'_>) -> IResult<Option<u32>> {
    let digits = digits(input)?;
    Ok(digits.parse::<u32>().ok())
}

/// Checks a number of a fully matched phrase. An oversized value is a cut
/// error, which aborts the surrounding search.
fn fits(value: Option<u32>) -> IResult<u32> {
    value.ok_or(ErrMode::Cut(ContextError::new()))
}
